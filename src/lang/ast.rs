use super::Column;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub enum Statement {
    /// `set D[addr], expr`
    Set(Column, Expression, Expression),
    /// `set D[addr], read`
    Read(Column, Expression),
    /// `set write, expr` or `set writeln, expr`
    Write(Column, Expression, bool),
    /// `set write, "text"` or `set writeln, "text"`
    WriteStr(Column, Rc<str>, bool),
    Jump(Column, Expression),
    /// `jumpt target, condition`
    Jumpt(Column, Expression, Expression),
    Halt(Column),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Integer(Column, i32),
    Memory(Column, Box<Expression>),
    Ip(Column),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Modulus(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Integer(col, _)
            | Memory(col, _)
            | Ip(col)
            | Multiply(col, ..)
            | Divide(col, ..)
            | Modulus(col, ..)
            | Add(col, ..)
            | Subtract(col, ..)
            | Equal(col, ..)
            | NotEqual(col, ..)
            | Less(col, ..)
            | LessEqual(col, ..)
            | Greater(col, ..)
            | GreaterEqual(col, ..) => col.clone(),
        }
    }
}

/// Visiting is post-order: operands are visited before the node that
/// consumes them, which is exactly the order a stack machine wants.
pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            Halt(_) | WriteStr(..) => {}
            Read(_, expr) | Write(_, expr, _) | Jump(_, expr) => {
                expr.accept(visitor);
            }
            Set(_, expr1, expr2) | Jumpt(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Integer(..) | Ip(_) => {}
            Memory(_, expr) => {
                expr.accept(visitor);
            }
            Multiply(_, expr1, expr2)
            | Divide(_, expr1, expr2)
            | Modulus(_, expr1, expr2)
            | Add(_, expr1, expr2)
            | Subtract(_, expr1, expr2)
            | Equal(_, expr1, expr2)
            | NotEqual(_, expr1, expr2)
            | Less(_, expr1, expr2)
            | LessEqual(_, expr1, expr2)
            | Greater(_, expr1, expr2)
            | GreaterEqual(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
