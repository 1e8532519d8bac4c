use super::{Column, LineNumber};

/// ## Errors from the compiler and the virtual machine
///
/// Every failure in this crate is an `Error`. The `ErrorCode` is the kind
/// callers match on; line number, column and message are context for people.

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn is_fault(&self) -> bool {
        self.code.is_fault()
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: line,
            column: self.column.clone(),
            message: self.message.clone(),
        }
    }

    /// The same error with its line number removed, for reports that
    /// print the line separately.
    pub fn without_line_number(&self) -> Error {
        Error {
            code: self.code,
            line_number: None,
            column: self.column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: self.column.clone(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // *** Runtime faults
    StackOverflow,
    StackUnderflow,
    InvalidMemoryAddress,
    InvalidJumpTarget,
    DivisionByZero,
    Overflow,
    InvalidInputLiteral,
    UnexpectedEndOfInput,
    UnknownOpcode,

    // *** Everything else
    SyntaxError,
    FileNotFound,
    InternalError,
}

impl ErrorCode {
    /// Faults abort a running program. The other codes come from
    /// compiling, loading or the host.
    pub fn is_fault(self) -> bool {
        use ErrorCode::*;
        !matches!(self, SyntaxError | FileNotFound | InternalError)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            StackOverflow => "stack overflow",
            StackUnderflow => "stack underflow",
            InvalidMemoryAddress => "invalid memory address",
            InvalidJumpTarget => "invalid jump target",
            DivisionByZero => "division by zero",
            Overflow => "integer overflow",
            InvalidInputLiteral => "invalid integer literal",
            UnexpectedEndOfInput => "unexpected end of input",
            UnknownOpcode => "unknown opcode",
            SyntaxError => "syntax error",
            FileNotFound => "file not found",
            InternalError => "internal error",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(":{}", self.column.start));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if self.line_number.is_some() || (0..0) != self.column {
            write!(f, "{} at line{}", code_str, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        match error.kind() {
            std::io::ErrorKind::NotFound => error!(FileNotFound; &error.to_string()),
            std::io::ErrorKind::UnexpectedEof => error!(UnexpectedEndOfInput),
            _ => error!(InternalError; &error.to_string()),
        }
    }
}
