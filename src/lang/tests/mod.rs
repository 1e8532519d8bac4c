use super::ast::*;
use super::{lex, parse, Error, ErrorCode};


fn parse_str(s: &str) -> Option<Statement> {
    parse(Some(1), &lex(s)).ok().flatten()
}

fn parse_err(s: &str) -> Error {
    match parse(Some(1), &lex(s)) {
        Err(e) => e,
        Ok(r) => panic!("expected an error, got {:?}", r),
    }
}
