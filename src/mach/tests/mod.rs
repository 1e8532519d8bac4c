use crate::lang::Error;
use crate::mach::{Event, Opcode, Program, Runtime, Transcript};

mod debugger_test;

/// Wraps `ops` as line 1 of a two-line program.
fn program(ops: Vec<Opcode>) -> Program {
    let mut all = vec![Opcode::SetLineNo(1)];
    all.extend(ops);
    all.push(Opcode::SetLineNo(2));
    all.push(Opcode::Halt);
    Program::assemble(all).unwrap()
}

fn run(ops: Vec<Opcode>, input: &[&str]) -> (Runtime, Event, String) {
    let p = program(ops);
    let mut r = Runtime::default();
    let mut t = Transcript::new(input);
    let event = r.run(&p, &mut t);
    (r, event, t.take_output())
}

fn fault(ops: Vec<Opcode>) -> Error {
    match run(ops, &[]).1 {
        Event::Faulted(error) => error,
        event => panic!("expected a fault, got {:?}", event),
    }
}
