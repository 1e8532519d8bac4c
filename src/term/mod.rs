extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::lang::Error;
use crate::mach::{compile, Console, Debugger, Event, Listing, Program, Runtime};
use crate::mach::{DEFAULT_MEMORY_SIZE, DEFAULT_STACK_SIZE};
use crate::error;
use ansi_term::Style;
use clap::Parser;
use linefeed::{DefaultTerminal, Interface, ReadResult};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sem", version)]
#[command(about = "Run or debug a SIMPLESEM program")]
struct Args {
    /// SIMPLESEM source file
    file: PathBuf,

    /// Start the interactive debugger instead of running
    #[arg(short, long)]
    debug: bool,

    /// Number of memory cells
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_SIZE, value_parser = positive_size)]
    memory: usize,

    /// Depth of the evaluation stack
    #[arg(short, long, default_value_t = DEFAULT_STACK_SIZE, value_parser = positive_size)]
    stack: usize,

    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,
}

fn positive_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive number", s)),
    }
}

pub fn main() {
    let args = Args::parse();
    init_logging(args.trace);
    let status = match main_loop(&args) {
        Ok(status) => status,
        Err(error) => {
            let text = format!("sem: {}: {}", args.file.display(), error);
            eprintln!("{}", Style::new().bold().paint(text));
            1
        }
    };
    std::process::exit(status);
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("sem=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main_loop(args: &Args) -> Result<i32, Error> {
    let listing = Listing::load(&args.file)?;
    info!(file = %args.file.display(), lines = listing.len(), "loaded");
    let program = match compile(&listing) {
        Ok(program) => program,
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
            }
            return Ok(1);
        }
    };
    let mut runtime = Runtime::new(args.memory, args.stack)?;
    if args.debug {
        debugger(program, listing, runtime)?;
        Ok(0)
    } else {
        batch(&program, &mut runtime, &mut StdConsole)
    }
}

/// Runs to completion. A fault prints its report and exits with 1; a
/// console failure is not a fault and goes back to the caller.
fn batch(program: &Program, runtime: &mut Runtime, console: &mut dyn Console) -> Result<i32, Error> {
    let event = runtime.run(program, console);
    io::stdout().flush()?;
    match event {
        Event::Faulted(error) if error.is_fault() => {
            for line in fault_report(runtime, &error) {
                eprintln!("{}", line);
            }
            Ok(1)
        }
        Event::Faulted(error) => Err(error),
        _ => Ok(0),
    }
}

fn fault_report(runtime: &Runtime, error: &Error) -> Vec<String> {
    let mut report = vec![
        format!("sem: {}", error.without_line_number()),
        format!("line: {}", runtime.line()),
        "stack:".to_string(),
    ];
    report.extend(runtime.stack_report());
    report
}

fn debugger(program: Program, listing: Listing, runtime: Runtime) -> Result<(), Error> {
    let mut debugger = Debugger::new(program, listing, runtime);
    let interrupted = debugger.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .map_err(|e| error!(InternalError; &e.to_string()))?;
    let mut console = TermConsole {
        interface: Interface::new("sem")?,
    };
    debugger.repl(&mut console)?;
    debug!("debugger closed");
    Ok(())
}

/// Plain stdin and stdout for batch runs.
struct StdConsole;

impl Console for StdConsole {
    fn write(&mut self, text: &str, newline: bool) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(text.as_bytes())?;
        if newline {
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut out = io::stdout();
        out.write_all(prompt.as_bytes())?;
        out.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }
}

/// Line editing and history for the debugger prompt.
struct TermConsole {
    interface: Interface<DefaultTerminal>,
}

impl Console for TermConsole {
    fn write(&mut self, text: &str, newline: bool) -> io::Result<()> {
        let end = if newline { "\n" } else { "" };
        self.interface.write_fmt(format_args!("{}{}", text, end))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.interface.set_prompt(prompt)?;
        match self.interface.read_line()? {
            ReadResult::Input(string) => Ok(Some(string)),
            ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
        }
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.interface
            .write_fmt(format_args!("{}\n", Style::new().bold().paint(text)))
    }

    fn add_history(&mut self, line: &str) {
        self.interface.add_history_unique(line.to_string());
    }
}
