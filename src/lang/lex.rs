use super::escape::unquote;
use super::token::*;

/// Splits one source line into tokens. Never fails; anything the lexer
/// can't make sense of becomes `Token::Unknown` for the parser to report.
pub fn lex(s: &str) -> Vec<Token> {
    SemLexer {
        chars: s.chars().peekable(),
    }
    .collect()
}

fn is_sem_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_sem_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_sem_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars().next();
            len += 1;
            if let Some(pk) = self.chars().peek() {
                if is_sem_whitespace(*pk) {
                    continue;
                }
            }
            return Some(Token::Whitespace(len));
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_sem_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Literal(Literal::Integer(s)))
    }

    fn string(&mut self) -> Option<Token> {
        let mut raw = String::new();
        self.chars().next();
        let mut escaped = false;
        loop {
            match self.chars().next() {
                None => return Some(Token::Unknown(format!("\"{}", raw))),
                Some('"') if !escaped => break,
                Some(ch) => {
                    escaped = !escaped && ch == '\\';
                    raw.push(ch);
                }
            }
        }
        match unquote(&raw) {
            Some(s) => Some(Token::Literal(Literal::String(s))),
            None => Some(Token::Unknown(format!("\"{}\"", raw))),
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_sem_alphabetic(*pk) && !is_sem_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        match Token::from_string(&s) {
            Some(token) => Some(token),
            None => Some(Token::Unknown(s)),
        }
    }

    fn comment(&mut self) -> Option<Token> {
        self.chars().next();
        Some(Token::Comment(self.chars().by_ref().collect()))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        if let Some(pk) = self.chars().peek() {
            let pair: String = [ch, *pk].iter().collect();
            if let Some(t) = Token::from_string(&pair) {
                self.chars().next();
                return Some(t);
            }
        }
        match Token::from_string(&ch.to_string()) {
            Some(t) => Some(t),
            None => Some(Token::Unknown(ch.to_string())),
        }
    }
}

struct SemLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for SemLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for SemLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if is_sem_whitespace(pk) {
            return self.whitespace();
        }
        if is_sem_digit(pk) {
            return self.number();
        }
        if is_sem_alphabetic(pk) {
            return self.alphabetic();
        }
        if pk == '"' {
            return self.string();
        }
        if pk == '#' {
            return self.comment();
        }
        self.minutia()
    }
}
