use super::{Console, Event, LineConsole, Listing, Program, Runtime};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Cycles between checks for an interrupt while running.
const BURST: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NotStarted,
    Running,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

type Handler = fn(&mut Debugger, &mut dyn Console) -> io::Result<Flow>;

pub struct Command {
    pub name: &'static str,
    pub alias: char,
    pub doc: &'static str,
    handler: Handler,
}

/// ## Debugger command table
///
/// Names and single-character aliases both resolve to an entry in `list`,
/// which keeps the order `help` shows them in.
pub struct Commands {
    list: Vec<Command>,
    names: HashMap<&'static str, usize>,
    aliases: HashMap<char, usize>,
}

impl Commands {
    pub fn standard() -> Commands {
        let mut commands = Commands {
            list: vec![],
            names: HashMap::new(),
            aliases: HashMap::new(),
        };
        commands.insert("next", 'n', "Execute next instruction.", Debugger::next);
        commands.insert("run", 'r', "Run the program.", Debugger::run);
        commands.insert("memory", 'm', "Dump the memory.", Debugger::memory);
        commands.insert("stack", 's', "Dump the stack.", Debugger::stack);
        commands.insert("ip", 'i', "Print the instruction pointer.", Debugger::ip);
        commands.insert("list", 'l', "List the SIMPLESEM source.", Debugger::list);
        commands.insert("dump", 'd', "Dump internal code representation.", Debugger::dump);
        commands.insert("help", 'h', "Print this help.", Debugger::help);
        commands.insert("quit", 'q', "Quit the debugger.", Debugger::quit);
        commands
    }

    fn insert(&mut self, name: &'static str, alias: char, doc: &'static str, handler: Handler) {
        let index = self.list.len();
        self.list.push(Command {
            name,
            alias,
            doc,
            handler,
        });
        self.names.insert(name, index);
        self.aliases.insert(alias, index);
    }

    /// Input longer than one character is a name, otherwise an alias.
    pub fn find(&self, input: &str) -> Option<&Command> {
        let input = input.to_ascii_lowercase();
        let mut chars = input.chars();
        let index = match (chars.next(), chars.next()) {
            (Some(alias), None) => self.aliases.get(&alias),
            (Some(_), Some(_)) => self.names.get(input.as_str()),
            (None, _) => None,
        }?;
        self.list.get(*index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.list.iter()
    }
}

/// ## Interactive debugger
///
/// Drives the same `Runtime` the batch interpreter uses, one `step` at a
/// time for `next` and in bursts for `run`. Inspection commands only read.
pub struct Debugger {
    program: Program,
    listing: Listing,
    runtime: Runtime,
    state: State,
    commands: Commands,
    interrupted: Arc<AtomicBool>,
}

impl Debugger {
    pub fn new(program: Program, listing: Listing, runtime: Runtime) -> Debugger {
        Debugger {
            program,
            listing,
            runtime,
            state: State::NotStarted,
            commands: Commands::standard(),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Setting the flag stops a `run` at the next burst boundary.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// Prompts for commands until `quit` or end of input.
    pub fn repl(&mut self, console: &mut dyn Console) -> io::Result<()> {
        console.write("Type `help' to get help.", true)?;
        loop {
            let flow = match console.read_line("sem> ")? {
                Some(input) => {
                    if !input.trim().is_empty() {
                        console.add_history(input.trim());
                    }
                    self.execute(&input, console)?
                }
                None => Debugger::quit(self, console)?,
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Runs one command line. Blank input does nothing.
    pub fn execute(&mut self, input: &str, console: &mut dyn Console) -> io::Result<Flow> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }
        let handler = match self.commands.find(input) {
            Some(command) => command.handler,
            None => {
                console.error(&format!("Undefined command `{}'; Try `help'.", input))?;
                return Ok(Flow::Continue);
            }
        };
        debug!(command = input, state = ?self.state, "debugger");
        handler(self, console)
    }

    fn start(&mut self) {
        self.runtime.reset();
        self.interrupted.store(false, Ordering::SeqCst);
        self.state = State::Running;
    }

    fn next(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        if self.state != State::Running {
            self.start();
            console.write("Step mode enabled", true)?;
        }
        let line = self.runtime.line();
        let text = self.listing.line(line).unwrap_or("");
        console.write(&format!("{:<3} {}", line, text), true)?;
        let event = self
            .runtime
            .step(&self.program, &mut LineConsole::new(console));
        match event {
            Event::Continuing => {}
            Event::Halted => {
                self.state = State::Halted;
                console.write("Debug finished.", true)?;
            }
            Event::Faulted(error) => {
                self.state = State::Halted;
                console.error(&error.to_string())?;
                console.error("Debug aborted.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn run(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        if self.state == State::Running {
            console.write("The debug has been already started.", true)?;
            if !ask(console, "Start it from the beginning? (y or n) ")? {
                return Ok(Flow::Continue);
            }
        }
        self.start();
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                console.write(&format!("Interrupted at line {}.", self.runtime.line()), true)?;
                return Ok(Flow::Continue);
            }
            match self.runtime.execute(&self.program, console, BURST) {
                Event::Continuing => {}
                Event::Halted => break,
                Event::Faulted(error) => {
                    console.error(&error.to_string())?;
                    break;
                }
            }
        }
        self.state = State::Halted;
        Ok(Flow::Continue)
    }

    fn memory(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        for (row, cells) in self.runtime.memory().chunks(10).enumerate() {
            let start = row * 10;
            let values: String = cells.iter().map(|c| format!("{:>4} ", c)).collect();
            let end = start + cells.len() - 1;
            console.write(&format!("{:<50}  {:>4} - {:>4}", values, start, end), true)?;
        }
        Ok(Flow::Continue)
    }

    fn stack(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        let report = self.runtime.stack_report();
        if report.is_empty() {
            console.write("Stack is empty.", true)?;
        }
        for line in report {
            console.write(&line, true)?;
        }
        Ok(Flow::Continue)
    }

    fn ip(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        if self.state == State::NotStarted {
            console.write("Nothing to show.", true)?;
        } else {
            console.write(&format!("ip is {}.", self.runtime.line()), true)?;
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        for line in 1..self.program.size() {
            let text = self.listing.line(line).unwrap_or("");
            console.write(&format!("{:<3} {}", line, text), true)?;
        }
        Ok(Flow::Continue)
    }

    fn dump(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        let current = match self.state {
            State::Running => Some(self.runtime.ip()),
            _ => None,
        };
        for (addr, line) in self.program.dump().iter().enumerate() {
            let marker = if Some(addr) == current { "=>" } else { "  " };
            console.write(&format!("{} {}", marker, line), true)?;
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        for command in self.commands.iter() {
            let line = format!("{:<20} {:<10} {}", command.name, command.alias, command.doc);
            console.write(&line, true)?;
        }
        Ok(Flow::Continue)
    }

    fn quit(&mut self, console: &mut dyn Console) -> io::Result<Flow> {
        if self.state == State::Running
            && !ask(console, "The script is running. Exit anyway? (y or n) ")?
        {
            return Ok(Flow::Continue);
        }
        Ok(Flow::Quit)
    }
}

/// Asks until the answer is `y`, `yes`, `n` or `no`. End of input is yes.
fn ask(console: &mut dyn Console, question: &str) -> io::Result<bool> {
    loop {
        let answer = match console.read_line(question)? {
            Some(answer) => answer.trim().to_ascii_lowercase(),
            None => return Ok(true),
        };
        match answer.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}
