use std::rc::Rc;

/// ## Virtual machine instruction set
///
/// The SIMPLESEM virtual machine has no registers besides the
/// instruction pointer. Every operation is performed on the stack.
///
/// For example: `set D[2], D[0] + 1` compiles to
/// `[Int(2), Int(0), Mem, Int(1), Add, Set]`
///
/// Binary operations pop the right operand first. Operands carried by the
/// instruction itself live in the variant, so "no operand" and "operand
/// is zero" can't be confused.

#[derive(Clone, PartialEq, Eq)]
pub enum Opcode {
    // *** Line markers
    /// Start of a source line. The jump table points just past it.
    SetLineNo(usize),

    // *** Stack and memory
    /// Push literal value on to the stack.
    Int(i32),
    /// Pop value, pop address, store value at address.
    Set,
    /// Pop address, push the value stored there.
    Mem,
    /// Pop address, read an integer from input and store it there.
    Read,
    /// Push the current line plus one.
    Ip,

    // *** Output
    WriteInt,
    WritelnInt,
    WriteStr(Rc<str>),
    WritelnStr(Rc<str>),

    // *** Expression operations
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,

    // *** Branch control
    /// Pop line number and continue from that line.
    Jump,
    /// Pop condition, pop line number, jump if the condition is not zero.
    Jumpt,
    Halt,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        use Opcode::*;
        match self {
            SetLineNo(_) => "SETLINENO",
            Int(_) => "INT",
            Set => "SET",
            Mem => "MEM",
            Read => "READ",
            Ip => "IP",
            WriteInt => "WRITE_INT",
            WritelnInt => "WRITELN_INT",
            WriteStr(_) => "WRITE_STR",
            WritelnStr(_) => "WRITELN_STR",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
            Eq => "EQ",
            Ne => "NE",
            Gt => "GT",
            Lt => "LT",
            Ge => "GE",
            Le => "LE",
            Jump => "JUMP",
            Jumpt => "JUMPT",
            Halt => "HALT",
        }
    }

    pub fn int_arg(&self) -> Option<i64> {
        match self {
            Opcode::SetLineNo(n) => Some(*n as i64),
            Opcode::Int(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn str_arg(&self) -> Option<&str> {
        match self {
            Opcode::WriteStr(s) | Opcode::WritelnStr(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(v) = self.int_arg() {
            return write!(f, "{} {}", self.name(), v);
        }
        if let Some(s) = self.str_arg() {
            return write!(f, "{} {}", self.name(), crate::lang::quote(s));
        }
        write!(f, "{}", self.name())
    }
}
