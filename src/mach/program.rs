use super::{Address, Opcode};
use crate::error;
use crate::lang::{quote, Error};

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled instruction stream
///
/// Instructions live in one vector in program order; the instruction
/// after address `n` is `n + 1`. The jump table maps line `i` to the
/// address just past that line's `SETLINENO` marker.

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    ops: Vec<Opcode>,
    jumps: Vec<Address>,
}

impl Program {
    /// Builds the jump table and checks the stream: it starts with
    /// `SETLINENO 1`, line markers count up by one, and it ends in `HALT`.
    pub fn assemble(ops: Vec<Opcode>) -> Result<Program> {
        let mut jumps: Vec<Address> = vec![];
        for (addr, op) in ops.iter().enumerate() {
            if let Opcode::SetLineNo(line) = op {
                if *line != jumps.len() + 1 {
                    return Err(error!(InternalError;
                        &format!("line marker {} at address {} out of sequence", line, addr)));
                }
                jumps.push(addr + 1);
            } else if addr == 0 {
                return Err(error!(InternalError; "program must begin with a line marker"));
            }
        }
        match ops.last() {
            Some(Opcode::Halt) => Ok(Program { ops, jumps }),
            _ => Err(error!(InternalError; "program must end with HALT")),
        }
    }

    /// Number of lines, counting the final line that holds the closing `HALT`.
    pub fn size(&self) -> usize {
        self.jumps.len()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op(&self, addr: Address) -> Option<&Opcode> {
        self.ops.get(addr)
    }

    /// Resolves a jump. Only lines `1..size` are targets; the last line
    /// exists to hold the closing `HALT` and can't be jumped to.
    pub fn jump_target(&self, line: i32) -> Result<Address> {
        if line < 1 || line as usize >= self.size() {
            return Err(error!(InvalidJumpTarget; &format!("cannot jump to line {}", line)));
        }
        Ok(self.jumps[line as usize - 1])
    }

    /// One line per instruction: mnemonic, then the operand if it has one.
    pub fn dump(&self) -> Vec<String> {
        self.ops
            .iter()
            .map(|op| {
                let name = format!("{:<20}", op.name());
                if let Some(v) = op.int_arg() {
                    format!("{}\t{}", name, v)
                } else if let Some(s) = op.str_arg() {
                    let s: String = quote(s).chars().take(50).collect();
                    format!("{}\t{}", name, s)
                } else {
                    name.trim_end().to_string()
                }
            })
            .collect()
    }
}
