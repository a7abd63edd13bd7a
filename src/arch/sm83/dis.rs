//! Listing instructions out of memory

use crate::arch::sm83::{Instruction, Operation, EXTENDED, PRIMARY};
use crate::error::{Error, Result};
use crate::memory::Memory;
use std::fmt;

/// One disassembled instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub instruction: &'static Instruction,
}

impl Listing {
    /// Address of the instruction that follows this one in memory.
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.bytes.len() as u16)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "{:04X}  {:<10}{}",
            self.address, bytes, self.instruction.mnemonic
        )
    }
}

/// Decode the instruction at `address` without executing it.
pub fn disassemble(mem: &Memory, address: u16) -> Result<Listing> {
    let opcode = mem.read_byte(address);
    let mut instruction = PRIMARY
        .lookup(opcode)
        .ok_or(Error::UnknownOpcode { address, opcode })?;

    if let Operation::Prefix = instruction.operation {
        let address = address.wrapping_add(1);
        let opcode = mem.read_byte(address);

        instruction = EXTENDED
            .lookup(opcode)
            .ok_or(Error::UnknownExtendedOpcode { address, opcode })?;
    }

    let bytes = (0..instruction.length as u16)
        .map(|i| mem.read_byte(address.wrapping_add(i)))
        .collect();

    Ok(Listing {
        address,
        bytes,
        instruction,
    })
}
