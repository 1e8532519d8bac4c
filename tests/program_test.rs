mod common;
use common::*;
use pretty_assertions::assert_eq;
use sem::lang::ErrorCode;
use sem::mach::{Event, Runtime};

#[test]
fn test_add_and_writeln() {
    assert_eq!(exec("set writeln, 5 + 3", &[]), "8\n");
}

#[test]
fn test_write_has_no_newline() {
    assert_eq!(exec("set write, 1\nset write, \"-\"\nset write, 2", &[]), "1-2");
}

#[test]
fn test_precedence_and_unary_minus() {
    assert_eq!(exec("set writeln, -(2 - 5) * -2 + 10 % 4", &[]), "-4\n");
    assert_eq!(exec("set writeln, -7 / 2", &[]), "-3\n");
    assert_eq!(exec("set writeln, -7 % 2", &[]), "-1\n");
}

#[test]
fn test_comparisons() {
    let source = r#"
set write, 1 = 1
set write, 1 == 2
set write, 1 <> 2
set write, 1 != 1
set write, 2 > 1
set write, 2 < 1
set write, 2 >= 2
set write, 3 <= 2
"#;
    assert_eq!(exec(source, &[]), "10101010");
}

#[test]
fn test_bare_and_bracketed_destinations() {
    let source = "\
set 0, 4
set D[1], 7
set D[D[0]], D[1] + 2
set write, D[4]
set write, D[1]";
    assert_eq!(exec(source, &[]), "97");
}

#[test]
fn test_loop() {
    let source = "\
set 0, D[0] + 1
jumpt 1, D[0] < 3
set writeln, D[0]";
    assert_eq!(exec(source, &[]), "3\n");
}

#[test]
fn test_ip_and_computed_jump() {
    assert_eq!(exec("set write, ip", &[]), "2");
    let source = "\
jump ip + 1
set write, \"skipped\"
set write, \"landed\"";
    assert_eq!(exec(source, &[]), "landed");
}

#[test]
fn test_halt_stops_early() {
    assert_eq!(exec("set write, 1\nhalt\nset write, 2", &[]), "1");
}

#[test]
fn test_read() {
    let source = "\
set 0, read
set 1, read
set writeln, D[0] + D[1]";
    assert_eq!(exec(source, &["40", " 2 "]), "42\n");
}

#[test]
fn test_read_faults() {
    let e = fault("set 0, read", &[]);
    assert_eq!(e.code(), ErrorCode::UnexpectedEndOfInput);
    let e = fault("set 0, read", &["12x"]);
    assert_eq!(e.code(), ErrorCode::InvalidInputLiteral);
    assert_eq!(e.to_string(), "invalid integer literal at line 1; '12x'");
}

#[test]
fn test_division_by_zero() {
    let e = fault("set 0, 1\nset write, D[0] / 0", &[]);
    assert_eq!(e.code(), ErrorCode::DivisionByZero);
    assert_eq!(e.line_number(), Some(2));
    assert_eq!(fault("set write, 0 / 0", &[]).code(), ErrorCode::DivisionByZero);
    assert_eq!(fault("set write, 5 % 0", &[]).code(), ErrorCode::DivisionByZero);
}

#[test]
fn test_overflow() {
    let e = fault("set write, 2147483647 + 1", &[]);
    assert_eq!(e.code(), ErrorCode::Overflow);
    let e = fault("set write, -2147483648 / -1", &[]);
    assert_eq!(e.code(), ErrorCode::Overflow);
    let e = fault("set write, 65536 * 65536", &[]);
    assert_eq!(e.code(), ErrorCode::Overflow);
}

#[test]
fn test_jump_targets() {
    let e = fault("jump 0", &[]);
    assert_eq!(e.code(), ErrorCode::InvalidJumpTarget);
    assert_eq!(e.to_string(), "invalid jump target at line 1; cannot jump to line 0");
    assert_eq!(fault("jump 2", &[]).code(), ErrorCode::InvalidJumpTarget);
    assert_eq!(fault("jump -1", &[]).code(), ErrorCode::InvalidJumpTarget);
    assert_eq!(fault("set write, 1\njumpt 3, 0", &[]).code(), ErrorCode::InvalidJumpTarget);
}

#[test]
fn test_memory_bounds() {
    let e = fault("set 64, 1", &[]);
    assert_eq!(e.code(), ErrorCode::InvalidMemoryAddress);
    assert_eq!(fault("set write, D[-1]", &[]).code(), ErrorCode::InvalidMemoryAddress);
    let mut r = Runtime::new(128, 32).unwrap();
    assert_eq!(run_with(&mut r, "set 64, 1", &[]).0, Event::Halted);
    assert_eq!(r.memory()[64], 1);
}

#[test]
fn test_stack_overflow() {
    let mut r = Runtime::new(64, 2).unwrap();
    let (event, _) = run_with(&mut r, "set write, 1 + (2 + 3)", &[]);
    match event {
        Event::Faulted(e) => assert_eq!(e.code(), ErrorCode::StackOverflow),
        event => panic!("{:?}", event),
    }
    assert_eq!(r.stack(), &[1, 2]);
}

#[test]
fn test_blank_and_comment_lines_keep_numbering() {
    let source = "\
# counter
jump 4

set write, \"four\"  # line 4";
    assert_eq!(exec(source, &[]), "four");
}

#[test]
fn test_compile_errors_are_collected() {
    let errors = compile_errors("set 0,\nhalt\njump\nset write, 2147483648");
    let lines: Vec<_> = errors.iter().map(|e| e.line_number()).collect();
    assert_eq!(lines, vec![Some(1), Some(3), Some(4)]);
    assert!(errors.iter().all(|e| e.code() == ErrorCode::SyntaxError));
}

#[test]
fn test_rerun_matches_first_run() {
    let source = "\
set 0, D[0] + 1
set writeln, D[0]";
    let mut r = Runtime::default();
    let first = run_with(&mut r, source, &[]);
    let second = run_with(&mut r, source, &[]);
    assert_eq!(first, second);
    assert_eq!(second.1, "1\n");
}
