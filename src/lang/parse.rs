use super::{ast::*, token::*, Column, Error, LineNumber};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parses the tokens of one source line. Blank and comment-only lines
/// produce `None`.
pub fn parse(line_number: LineNumber, tokens: &[Token]) -> Result<Option<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Option<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        if parse.peek().is_none() {
            return Ok(None);
        }
        let statement = match parse.statement() {
            Ok(s) => s,
            Err(e) if e.column() == (0..0) => return Err(e.in_column(&parse.col)),
            Err(e) => return Err(e),
        };
        match parse.next() {
            None => Ok(Some(statement)),
            Some(_) => Err(error!(SyntaxError, ..&parse.col; "unexpected text after statement")),
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) | Token::Comment(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn statement(&mut self) -> Result<Statement> {
        let word = match self.next() {
            Some(Token::Word(word)) => *word,
            _ => return Err(error!(SyntaxError; "expected set, jump, jumpt or halt")),
        };
        let column = self.column();
        match word {
            Word::Set => self.set(column),
            Word::Jump => Ok(Statement::Jump(column, self.expression()?)),
            Word::Jumpt => {
                let target = self.expression()?;
                self.expect(Token::Comma)?;
                Ok(Statement::Jumpt(column, target, self.expression()?))
            }
            Word::Halt => Ok(Statement::Halt(column)),
            _ => Err(error!(SyntaxError; "expected set, jump, jumpt or halt")),
        }
    }

    /// The destination is either `D[addr]` or a bare address expression.
    fn set(&mut self, column: Column) -> Result<Statement> {
        let addr = match self.peek() {
            Some(Token::Word(Word::Write)) => {
                self.next();
                return self.write(column, false);
            }
            Some(Token::Word(Word::Writeln)) => {
                self.next();
                return self.write(column, true);
            }
            Some(Token::Word(Word::D)) => {
                self.next();
                self.subscript()?
            }
            _ => self.arithmetic(0)?,
        };
        self.expect(Token::Comma)?;
        if let Some(Token::Word(Word::Read)) = self.peek() {
            self.next();
            return Ok(Statement::Read(column, addr));
        }
        Ok(Statement::Set(column, addr, self.expression()?))
    }

    fn write(&mut self, column: Column, newline: bool) -> Result<Statement> {
        self.expect(Token::Comma)?;
        if let Some(Token::Literal(Literal::String(s))) = self.peek() {
            let s: Rc<str> = s.as_str().into();
            self.next();
            return Ok(Statement::WriteStr(column, s, newline));
        }
        Ok(Statement::Write(column, self.expression()?, newline))
    }

    fn subscript(&mut self) -> Result<Expression> {
        self.expect(Token::LBracket)?;
        let expr = self.expression()?;
        self.expect(Token::RBracket)?;
        Ok(expr)
    }

    /// Relational operators bind loosest and do not chain.
    fn expression(&mut self) -> Result<Expression> {
        let lhs = self.arithmetic(0)?;
        if let Some(Token::Operator(op)) = self.peek() {
            if op.is_relational() {
                let op = *op;
                self.next();
                let column = self.column();
                let rhs = self.arithmetic(0)?;
                return Ok(Expression::for_binary_op(column, &op, lhs, rhs));
            }
        }
        Ok(lhs)
    }

    fn arithmetic(&mut self, precedence: usize) -> Result<Expression> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Operator(op)) if !op.is_relational() => *op,
                _ => break,
            };
            let op_precedence = Expression::op_precedence(&op);
            if op_precedence < precedence {
                break;
            }
            self.next();
            let column = self.column();
            let rhs = self.arithmetic(op_precedence + 1)?;
            lhs = Expression::for_binary_op(column, &op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Operator(Operator::Minus)) => {
                let column = self.column();
                if let Some(Token::Literal(Literal::Integer(s))) = self.peek() {
                    let s = format!("-{}", s);
                    self.next();
                    return Expression::for_literal(column.start..self.col.end, &s);
                }
                let operand = self.primary()?;
                Ok(Expression::Subtract(
                    column.clone(),
                    Box::new(Expression::Integer(column, 0)),
                    Box::new(operand),
                ))
            }
            Some(Token::Literal(Literal::Integer(s))) => Expression::for_literal(self.column(), s),
            Some(Token::Word(Word::D)) => {
                let column = self.column();
                let addr = self.subscript()?;
                Ok(Expression::Memory(column, Box::new(addr)))
            }
            Some(Token::Word(Word::Ip)) => Ok(Expression::Ip(self.column())),
            _ => Err(error!(SyntaxError; "expected expression")),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Unknown(_) | Whitespace(_) | Comment(_) => "unexpected token",
                Literal(_) => "expected literal",
                Word(_) => "expected reserved word",
                Operator(_) => "expected operator",
                LParen => "expected left parenthesis",
                RParen => "expected right parenthesis",
                LBracket => "expected left bracket",
                RBracket => "expected right bracket",
                Comma => "expected comma",
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Modulus => Expression::Modulus(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal | EqualEqual => Expression::Equal(col, lhs, rhs),
            NotEqual | LessGreater => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Plus | Minus => 10,
            Multiply | Divide | Modulus => 20,
            _ => 0,
        }
    }

    fn for_literal(col: Column, s: &str) -> Result<Expression> {
        match s.parse::<i32>() {
            Ok(n) => Ok(Expression::Integer(col, n)),
            Err(_) => Err(error!(SyntaxError, ..&col; "integer literal out of range")),
        }
    }
}
