use super::escape::quote;
use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<String, Token> = Token::field_less()
        .into_iter()
        .chain(Word::all().into_iter().map(Token::Word))
        .chain(Operator::all().into_iter().map(Token::Operator))
        .map(|t| (t.to_string(), t))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Comment(String),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl Token {
    /// Keywords match without regard to case; punctuation matches exactly.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(&s.to_ascii_lowercase()).cloned())
    }

    fn field_less() -> Vec<Token> {
        use Token::*;
        vec![LParen, RParen, LBracket, RBracket, Comma]
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Comment(s) => write!(f, "#{}", s),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            LBracket => write!(f, "["),
            RBracket => write!(f, "]"),
            Comma => write!(f, ","),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    /// Unescaped body of a double-quoted string.
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Literal::Integer(s) => write!(f, "{}", s),
            Literal::String(s) => write!(f, "{}", quote(s)),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    D,
    Halt,
    Ip,
    Jump,
    Jumpt,
    Read,
    Set,
    Write,
    Writeln,
}

impl Word {
    fn all() -> Vec<Word> {
        use Word::*;
        vec![D, Halt, Ip, Jump, Jumpt, Read, Set, Write, Writeln]
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            D => write!(f, "d"),
            Halt => write!(f, "halt"),
            Ip => write!(f, "ip"),
            Jump => write!(f, "jump"),
            Jumpt => write!(f, "jumpt"),
            Read => write!(f, "read"),
            Set => write!(f, "set"),
            Write => write!(f, "write"),
            Writeln => write!(f, "writeln"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Multiply,
    Divide,
    Modulus,
    Plus,
    Minus,
    Equal,
    EqualEqual,
    NotEqual,
    LessGreater,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    fn all() -> Vec<Operator> {
        use Operator::*;
        vec![
            Multiply,
            Divide,
            Modulus,
            Plus,
            Minus,
            Equal,
            EqualEqual,
            NotEqual,
            LessGreater,
            Less,
            LessEqual,
            Greater,
            GreaterEqual,
        ]
    }

    pub fn is_relational(&self) -> bool {
        use Operator::*;
        match self {
            Multiply | Divide | Modulus | Plus | Minus => false,
            Equal | EqualEqual | NotEqual | LessGreater | Less | LessEqual | Greater
            | GreaterEqual => true,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Modulus => write!(f, "%"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            EqualEqual => write!(f, "=="),
            NotEqual => write!(f, "!="),
            LessGreater => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        assert_eq!(Token::from_string("JUMPT"), Some(Token::Word(Word::Jumpt)));
        assert_eq!(Token::from_string("set"), Some(Token::Word(Word::Set)));
        assert_eq!(
            Token::from_string(">="),
            Some(Token::Operator(Operator::GreaterEqual))
        );
        assert_eq!(Token::from_string("pickles"), None);
    }
}
