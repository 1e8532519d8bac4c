#![allow(dead_code)]
use sem::lang::Error;
use sem::mach::{compile, Event, Listing, Program, Runtime, Transcript};

pub fn program(source: &str) -> Program {
    compile(&Listing::new(source)).unwrap()
}

pub fn compile_errors(source: &str) -> Vec<Error> {
    compile(&Listing::new(source)).unwrap_err()
}

pub fn run_with(runtime: &mut Runtime, source: &str, input: &[&str]) -> (Event, String) {
    let mut t = Transcript::new(input);
    let event = runtime.run(&program(source), &mut t);
    (event, t.take_output())
}

/// Output of a program that must halt.
pub fn exec(source: &str, input: &[&str]) -> String {
    match run_with(&mut Runtime::default(), source, input) {
        (Event::Halted, out) => out,
        (event, out) => panic!("expected halt, got {:?} after {:?}", event, out),
    }
}

pub fn fault(source: &str, input: &[&str]) -> Error {
    match run_with(&mut Runtime::default(), source, input) {
        (Event::Faulted(error), _) => error,
        (event, out) => panic!("expected fault, got {:?} after {:?}", event, out),
    }
}
