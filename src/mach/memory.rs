use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Data memory
///
/// A flat array of integers addressed from zero.

#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<i32>,
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory {
            cells: vec![0; size],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn address(&self, addr: i32) -> Result<usize> {
        if addr < 0 || addr as usize >= self.cells.len() {
            return Err(error!(InvalidMemoryAddress; &format!("address {}", addr)));
        }
        Ok(addr as usize)
    }

    pub fn get(&self, addr: i32) -> Result<i32> {
        Ok(self.cells[self.address(addr)?])
    }

    pub fn set(&mut self, addr: i32, val: i32) -> Result<()> {
        let addr = self.address(addr)?;
        self.cells[addr] = val;
        Ok(())
    }
}
