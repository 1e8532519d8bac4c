use super::{Listing, Opcode, Program};
use crate::lang::ast::{self, AcceptVisitor};
use crate::lang::{lex, parse, Error};
use tracing::debug;

/// Compiles every line of `listing`. Each source line starts with its
/// `SETLINENO`, and one more line holding `HALT` closes the program.
/// All syntax errors are collected; no program is produced if there are any.
pub fn compile(listing: &Listing) -> Result<Program, Vec<Error>> {
    let mut visitor = Visitor { ops: vec![] };
    let mut errors: Vec<Error> = vec![];
    for (number, text) in listing.lines() {
        visitor.ops.push(Opcode::SetLineNo(number));
        match parse(Some(number), &lex(text)) {
            Ok(Some(statement)) => statement.accept(&mut visitor),
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    visitor.ops.push(Opcode::SetLineNo(listing.len() + 1));
    visitor.ops.push(Opcode::Halt);
    debug!(lines = listing.len(), ops = visitor.ops.len(), "compiled");
    Program::assemble(visitor.ops).map_err(|e| vec![e])
}

struct Visitor {
    ops: Vec<Opcode>,
}

impl ast::Visitor for Visitor {
    fn visit_statement(&mut self, statement: &ast::Statement) {
        use ast::Statement::*;
        self.ops.push(match statement {
            Set(..) => Opcode::Set,
            Read(..) => Opcode::Read,
            Write(_, _, false) => Opcode::WriteInt,
            Write(_, _, true) => Opcode::WritelnInt,
            WriteStr(_, s, false) => Opcode::WriteStr(s.clone()),
            WriteStr(_, s, true) => Opcode::WritelnStr(s.clone()),
            Jump(..) => Opcode::Jump,
            Jumpt(..) => Opcode::Jumpt,
            Halt(_) => Opcode::Halt,
        });
    }

    fn visit_expression(&mut self, expression: &ast::Expression) {
        use ast::Expression::*;
        self.ops.push(match expression {
            Integer(_, val) => Opcode::Int(*val),
            Memory(..) => Opcode::Mem,
            Ip(_) => Opcode::Ip,
            Multiply(..) => Opcode::Mul,
            Divide(..) => Opcode::Div,
            Modulus(..) => Opcode::Mod,
            Add(..) => Opcode::Add,
            Subtract(..) => Opcode::Sub,
            Equal(..) => Opcode::Eq,
            NotEqual(..) => Opcode::Ne,
            Less(..) => Opcode::Lt,
            LessEqual(..) => Opcode::Le,
            Greater(..) => Opcode::Gt,
            GreaterEqual(..) => Opcode::Ge,
        });
    }
}
