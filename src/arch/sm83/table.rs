//! Opcode lookup tables

use crate::arch::sm83::{catalog, Instruction};

/// A 256-entry opcode page. Unused opcodes have no entry.
pub struct InstructionTable {
    entries: Vec<Option<Instruction>>,
}

impl InstructionTable {
    /// Place each instruction at its opcode. A later duplicate replaces an
    /// earlier one.
    pub fn build(instructions: Vec<Instruction>) -> Self {
        let mut entries: Vec<Option<Instruction>> = vec![None; 256];

        for instr in instructions {
            let slot = instr.opcode as usize;

            debug_assert!(entries[slot].is_none(), "opcode {:02X} listed twice", slot);
            entries[slot] = Some(instr);
        }

        InstructionTable { entries }
    }

    pub fn lookup(&self, opcode: u8) -> Option<&Instruction> {
        self.entries[opcode as usize].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static! {
    /// The primary opcode page.
    pub static ref PRIMARY: InstructionTable = InstructionTable::build(catalog::primary());

    /// The `CB` extended page.
    pub static ref EXTENDED: InstructionTable = InstructionTable::build(catalog::extended());
}
