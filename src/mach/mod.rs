/*!
## Rust Machine Module

This Rust module is a compiler, virtual machine and debugger for SIMPLESEM.

*/

pub type Address = usize;

mod compile;
mod console;
mod debugger;
mod listing;
mod memory;
mod opcode;
mod program;
mod runtime;
mod stack;

pub use compile::compile;
pub use console::{Console, LineConsole, Transcript};
pub use debugger::{Command, Commands, Debugger, Flow, State};
pub use listing::Listing;
pub use memory::Memory;
pub use opcode::Opcode;
pub use program::Program;
pub use runtime::{Event, Runtime, Status, DEFAULT_MEMORY_SIZE, DEFAULT_STACK_SIZE};
pub use stack::Stack;

#[cfg(test)]
mod tests;
