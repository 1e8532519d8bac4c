use super::{Address, Console, Memory, Opcode, Program, Stack};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_MEMORY_SIZE: usize = 64;
pub const DEFAULT_STACK_SIZE: usize = 32;

/// ## Outcome of a step
///
/// `Halted` and `Faulted` are terminal. Stepping a terminated runtime
/// repeats the outcome until it is `reset`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Continuing,
    Halted,
    Faulted(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    Faulted,
}

/// ## The SIMPLESEM virtual machine
///
/// Fetch, advance, execute. The instruction pointer moves past an
/// instruction before it runs, so a jump simply overwrites it.
///
/// ```text
///        +-------+          +---------+   fault   +---------+
///  reset | Fetch | -------> | Execute | --------> | Faulted |
///  ----> |       | <------- |         |           +---------+
///        +-------+   next   +---------+   HALT    +---------+
///                                |  --------------> | Halted  |
///                                                   +---------+
/// ```
pub struct Runtime {
    ip: Address,
    line: usize,
    memory: Memory,
    stack: Stack<i32>,
    fault: Option<Error>,
    halted: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::with_sizes(DEFAULT_MEMORY_SIZE, DEFAULT_STACK_SIZE)
    }
}

impl Runtime {
    /// Both sizes must be at least one.
    pub fn new(memory_size: usize, stack_size: usize) -> Result<Runtime> {
        if memory_size == 0 {
            return Err(error!(InternalError; "memory size must be positive"));
        }
        if stack_size == 0 {
            return Err(error!(InternalError; "stack size must be positive"));
        }
        Ok(Runtime::with_sizes(memory_size, stack_size))
    }

    fn with_sizes(memory_size: usize, stack_size: usize) -> Runtime {
        Runtime {
            ip: 0,
            line: 1,
            memory: Memory::new(memory_size),
            stack: Stack::new(stack_size),
            fault: None,
            halted: false,
        }
    }

    /// Zeroes memory, empties the stack and points at the first instruction.
    pub fn reset(&mut self) {
        self.ip = 0;
        self.line = 1;
        self.memory.clear();
        self.stack.clear();
        self.fault = None;
        self.halted = false;
    }

    pub fn ip(&self) -> Address {
        self.ip
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn memory(&self) -> &[i32] {
        self.memory.cells()
    }

    /// Bottom to top.
    pub fn stack(&self) -> &[i32] {
        self.stack.as_slice()
    }

    /// ` [level] value` from the top of the stack down to level 1.
    pub fn stack_report(&self) -> Vec<String> {
        let stack = self.stack.as_slice();
        (1..=stack.len())
            .rev()
            .map(|level| format!(" [{}] {}", level, stack[level - 1]))
            .collect()
    }

    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    pub fn status(&self) -> Status {
        if self.fault.is_some() {
            Status::Faulted
        } else if self.halted {
            Status::Halted
        } else {
            Status::Running
        }
    }

    /// Runs from the first instruction until `HALT` or a fault.
    pub fn run(&mut self, program: &Program, console: &mut dyn Console) -> Event {
        self.reset();
        loop {
            match self.execute(program, console, usize::max_value()) {
                Event::Continuing => continue,
                event => return event,
            }
        }
    }

    /// Steps at most `cycles` times. Returns `Continuing` when the budget
    /// runs out first.
    pub fn execute(&mut self, program: &Program, console: &mut dyn Console, cycles: usize) -> Event {
        for _ in 0..cycles {
            match self.step(program, console) {
                Event::Continuing => {}
                event => return event,
            }
        }
        Event::Continuing
    }

    /// Executes exactly one instruction. A `SETLINENO` counts as one.
    pub fn step(&mut self, program: &Program, console: &mut dyn Console) -> Event {
        if let Some(error) = &self.fault {
            return Event::Faulted(error.clone());
        }
        if self.halted {
            return Event::Halted;
        }
        let addr = self.ip;
        let op = match program.op(addr) {
            Some(op) => op,
            None => {
                let error = error!(UnknownOpcode; &format!("no instruction at address {}", addr));
                return self.die(error);
            }
        };
        trace!(line = self.line, addr, op = %op, "exec");
        self.ip += 1;
        match self.exec(program, op, console) {
            Ok(true) => {
                debug!(line = self.line, "halt");
                self.halted = true;
                Event::Halted
            }
            Ok(false) => Event::Continuing,
            Err(error) => self.die(error),
        }
    }

    fn die(&mut self, error: Error) -> Event {
        let error = if error.line_number().is_none() {
            error.in_line_number(Some(self.line))
        } else {
            error
        };
        debug!(%error, "fault");
        self.fault = Some(error.clone());
        Event::Faulted(error)
    }

    /// Returns true when the program halts.
    fn exec(&mut self, program: &Program, op: &Opcode, console: &mut dyn Console) -> Result<bool> {
        match op {
            Opcode::SetLineNo(line) => self.line = *line,
            Opcode::Int(val) => self.stack.push(*val)?,
            Opcode::Set => {
                let (addr, val) = self.stack.pop_2()?;
                self.memory.set(addr, val)?;
            }
            Opcode::Mem => {
                let addr = self.stack.pop()?;
                let val = self.memory.get(addr)?;
                self.stack.push(val)?;
            }
            Opcode::Read => {
                let addr = self.stack.pop()?;
                self.memory.address(addr)?;
                let val = self.read_int(console)?;
                self.memory.set(addr, val)?;
            }
            Opcode::Ip => {
                let next = i32::try_from(self.line + 1)
                    .map_err(|_| error!(Overflow; "line number out of range"))?;
                self.stack.push(next)?;
            }
            Opcode::WriteInt => {
                let val = self.stack.pop()?;
                console.write(&val.to_string(), false)?;
            }
            Opcode::WritelnInt => {
                let val = self.stack.pop()?;
                console.write(&val.to_string(), true)?;
            }
            Opcode::WriteStr(s) => console.write(s, false)?,
            Opcode::WritelnStr(s) => console.write(s, true)?,
            Opcode::Add => self.arithmetic(op, i32::checked_add)?,
            Opcode::Sub => self.arithmetic(op, i32::checked_sub)?,
            Opcode::Mul => self.arithmetic(op, i32::checked_mul)?,
            Opcode::Div => self.arithmetic(op, i32::checked_div)?,
            Opcode::Mod => self.arithmetic(op, i32::checked_rem)?,
            Opcode::Eq => self.compare(|p, q| p == q)?,
            Opcode::Ne => self.compare(|p, q| p != q)?,
            Opcode::Gt => self.compare(|p, q| p > q)?,
            Opcode::Lt => self.compare(|p, q| p < q)?,
            Opcode::Ge => self.compare(|p, q| p >= q)?,
            Opcode::Le => self.compare(|p, q| p <= q)?,
            Opcode::Jump => {
                let line = self.stack.pop()?;
                self.ip = program.jump_target(line)?;
                self.line = line as usize;
            }
            Opcode::Jumpt => {
                let (line, cond) = self.stack.pop_2()?;
                let target = program.jump_target(line)?;
                if cond != 0 {
                    self.ip = target;
                    self.line = line as usize;
                }
            }
            Opcode::Halt => return Ok(true),
        }
        Ok(false)
    }

    /// Pops `q` then `p` and pushes `p op q`. Division by zero and results
    /// that don't fit in 32 bits are faults.
    fn arithmetic(&mut self, op: &Opcode, f: fn(i32, i32) -> Option<i32>) -> Result<()> {
        let (p, q) = self.stack.pop_2()?;
        if q == 0 && (*op == Opcode::Div || *op == Opcode::Mod) {
            return Err(error!(DivisionByZero));
        }
        match f(p, q) {
            Some(val) => self.stack.push(val),
            None => Err(error!(Overflow; &format!("{} {} {}", op.name(), p, q))),
        }
    }

    fn compare(&mut self, f: fn(i32, i32) -> bool) -> Result<()> {
        let (p, q) = self.stack.pop_2()?;
        self.stack.push(f(p, q) as i32)
    }

    fn read_int(&mut self, console: &mut dyn Console) -> Result<i32> {
        let answer = match console.read_line("")? {
            Some(answer) => answer,
            None => return Err(error!(UnexpectedEndOfInput)),
        };
        let answer = answer.trim();
        match answer.parse::<i32>() {
            Ok(val) => Ok(val),
            Err(e) => {
                use std::num::IntErrorKind::*;
                let msg = match e.kind() {
                    PosOverflow | NegOverflow => format!("'{}' is out of range", answer),
                    _ => format!("'{}'", answer),
                };
                Err(error!(InvalidInputLiteral; &msg))
            }
        }
    }
}
