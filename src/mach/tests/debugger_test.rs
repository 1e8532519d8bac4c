use crate::mach::{compile, Console, Debugger, Flow, Listing, Runtime, State, Transcript};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const COUNTDOWN: &str = "\
set 0, 3
set writeln, D[0]
set 0, D[0] - 1
jumpt 2, D[0] > 0
halt";

fn debugger(source: &str) -> Debugger {
    debugger_with(source, Runtime::default())
}

fn debugger_with(source: &str, runtime: Runtime) -> Debugger {
    let listing = Listing::new(source);
    let program = compile(&listing).unwrap();
    Debugger::new(program, listing, runtime)
}

fn exec(d: &mut Debugger, t: &mut Transcript, command: &str) -> String {
    assert_eq!(d.execute(command, t).unwrap(), Flow::Continue);
    t.take_output()
}

#[test]
fn test_next_through_division_fault() {
    let mut d = debugger("set write, 10 / 0");
    let mut t = Transcript::default();
    assert_eq!(
        exec(&mut d, &mut t, "next"),
        "Step mode enabled\n1   set write, 10 / 0\n"
    );
    exec(&mut d, &mut t, "n");
    exec(&mut d, &mut t, "n");
    assert_eq!(exec(&mut d, &mut t, "stack"), " [2] 0\n [1] 10\n");
    assert_eq!(d.state(), State::Running);
    assert_eq!(
        exec(&mut d, &mut t, "next"),
        "1   set write, 10 / 0\ndivision by zero at line 1\nDebug aborted.\n"
    );
    assert_eq!(d.state(), State::Halted);
    assert_eq!(exec(&mut d, &mut t, "stack"), "Stack is empty.\n");
}

#[test]
fn test_next_until_finished() {
    let mut d = debugger("set write, 7\nhalt");
    let mut t = Transcript::default();
    let mut out = String::new();
    while d.state() != State::Halted {
        out.push_str(&exec(&mut d, &mut t, "next"));
    }
    assert!(out.contains("\n7\n"));
    assert!(out.ends_with("2   halt\nDebug finished.\n"));
}

#[test]
fn test_ip() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::default();
    assert_eq!(exec(&mut d, &mut t, "ip"), "Nothing to show.\n");
    exec(&mut d, &mut t, "next");
    assert_eq!(exec(&mut d, &mut t, "ip"), "ip is 1.\n");
}

#[test]
fn test_run_then_run_again() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::default();
    assert_eq!(exec(&mut d, &mut t, "run"), "3\n2\n1\n");
    assert_eq!(d.state(), State::Halted);
    assert_eq!(exec(&mut d, &mut t, "r"), "3\n2\n1\n");
}

#[test]
fn test_run_and_step_agree() {
    let mut stepped = debugger(COUNTDOWN);
    let mut t = Transcript::default();
    while stepped.state() != State::Halted {
        exec(&mut stepped, &mut t, "next");
    }
    let mut ran = debugger(COUNTDOWN);
    exec(&mut ran, &mut t, "run");
    assert_eq!(stepped.runtime().memory(), ran.runtime().memory());
    assert_eq!(stepped.runtime().line(), ran.runtime().line());
}

#[test]
fn test_restart_asks_first() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::new(&["n", "y"]);
    exec(&mut d, &mut t, "next");
    assert_eq!(
        exec(&mut d, &mut t, "run"),
        "The debug has been already started.\nStart it from the beginning? (y or n) "
    );
    assert_eq!(d.state(), State::Running);
    assert_eq!(
        exec(&mut d, &mut t, "run"),
        "The debug has been already started.\nStart it from the beginning? (y or n) 3\n2\n1\n"
    );
    assert_eq!(d.state(), State::Halted);
}

#[test]
fn test_quit() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::new(&["maybe", "n", "yes"]);
    assert_eq!(d.execute("quit", &mut t).unwrap(), Flow::Quit);
    exec(&mut d, &mut t, "next");
    assert_eq!(d.execute("quit", &mut t).unwrap(), Flow::Continue);
    assert_eq!(
        t.take_output(),
        "The script is running. Exit anyway? (y or n) ".repeat(2)
    );
    assert_eq!(d.execute("q", &mut t).unwrap(), Flow::Quit);
    exec(&mut d, &mut t, "next");
    assert_eq!(d.execute("quit", &mut t).unwrap(), Flow::Quit);
}

#[test]
fn test_unknown_and_blank_commands() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::default();
    assert_eq!(
        exec(&mut d, &mut t, "frobnicate"),
        "Undefined command `frobnicate'; Try `help'.\n"
    );
    assert_eq!(exec(&mut d, &mut t, "   "), "");
    assert_eq!(d.state(), State::NotStarted);
}

#[test]
fn test_list() {
    let mut d = debugger("set 0, 1\n\nhalt");
    let mut t = Transcript::default();
    assert_eq!(exec(&mut d, &mut t, "LIST"), "1   set 0, 1\n2   \n3   halt\n");
}

#[test]
fn test_memory_rows() {
    let mut d = debugger_with("set 11, 5", Runtime::new(12, 4).unwrap());
    let mut t = Transcript::default();
    exec(&mut d, &mut t, "run");
    let out = exec(&mut d, &mut t, "memory");
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("   0    0"));
    assert!(rows[0].ends_with("   0 -    9"));
    assert!(rows[1].starts_with("   0    5"));
    assert!(rows[1].ends_with("  10 -   11"));
}

#[test]
fn test_dump_marks_next_instruction() {
    let mut d = debugger("set write, 1");
    let mut t = Transcript::default();
    let out = exec(&mut d, &mut t, "dump");
    assert!(!out.contains("=>"));
    assert!(out.starts_with("   SETLINENO"));
    exec(&mut d, &mut t, "next");
    let out = exec(&mut d, &mut t, "dump");
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].starts_with("=> INT"));
    assert!(lines[1].ends_with("\t1"));
}

#[test]
fn test_help_lists_every_command() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::default();
    let out = exec(&mut d, &mut t, "help");
    assert_eq!(out.lines().count(), 9);
    assert!(out.starts_with("next                 n          Execute next instruction.\n"));
}

#[test]
fn test_repl_ends_on_end_of_input() {
    let mut d = debugger(COUNTDOWN);
    let mut t = Transcript::new(&["", "l"]);
    d.repl(&mut t).unwrap();
    assert_eq!(
        t.output(),
        "Type `help' to get help.\nsem> sem> 1   set 0, 3\n\
         2   set writeln, D[0]\n3   set 0, D[0] - 1\n\
         4   jumpt 2, D[0] > 0\n5   halt\nsem> "
    );
}

/// Raises the interrupt flag as soon as the program writes.
struct Interrupting {
    inner: Transcript,
    flag: Arc<AtomicBool>,
}

impl Console for Interrupting {
    fn write(&mut self, text: &str, newline: bool) -> io::Result<()> {
        self.flag.store(true, Ordering::SeqCst);
        self.inner.write(text, newline)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.inner.read_line(prompt)
    }
}

#[test]
fn test_interrupt_suspends_run() {
    let mut d = debugger("set write, 1\njump 1");
    let mut c = Interrupting {
        inner: Transcript::default(),
        flag: d.interrupt_handle(),
    };
    assert_eq!(d.execute("run", &mut c).unwrap(), Flow::Continue);
    assert_eq!(d.state(), State::Running);
    assert!(c.inner.output().ends_with("Interrupted at line 1.\n")
        || c.inner.output().ends_with("Interrupted at line 2.\n"));
}

#[test]
fn test_run_after_fault_repeats_output() {
    let source = "set write, 7\nset write, 1 / D[0]";
    let mut d = debugger(source);
    let mut t = Transcript::default();
    let first = exec(&mut d, &mut t, "run");
    assert_eq!(first, "7division by zero at line 2\n");
    assert_eq!(d.state(), State::Halted);
    assert_eq!(exec(&mut d, &mut t, "run"), first);

    let mut fresh = Transcript::default();
    Runtime::default().run(&compile(&Listing::new(source)).unwrap(), &mut fresh);
    assert_eq!(fresh.output(), "7");
    assert!(first.starts_with(fresh.output()));
}
