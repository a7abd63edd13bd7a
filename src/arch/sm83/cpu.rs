//! The SM83 core: register file, memory, interrupt master enable and the
//! fetch/execute loop.

use crate::arch::sm83::exec::push;
use crate::arch::sm83::{InstructionTable, InterruptLine, INTERRUPT_MASK, PRIMARY};
use crate::error::{Error, Result};
use crate::memory::{Memory, IE, IF, LY};
use crate::reg::{Reg16, Registers};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Cycles spent vectoring to an interrupt handler.
pub const INTERRUPT_CYCLES: u64 = 20;

/// Cycles a halted CPU burns per step.
pub const HALT_CYCLES: u64 = 4;

/// What a call to `step` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Executed one instruction. `opcode` is the primary page byte, so `CB`
    /// for anything on the extended page; `cycles` is the full cost.
    Instruction { opcode: u8, cycles: u8 },

    /// Vectored to an interrupt handler instead of fetching.
    Interrupt(InterruptLine),

    /// Halted and nothing woke the CPU.
    Halted,

    /// The observer stopped execution before the fetch.
    Break,
}

/// An observer's decision on whether the pending instruction should run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Break,
}

/// Hooks invoked from inside `step`.
///
/// Observers get the CPU mutably and may change its state; whatever they
/// leave behind is what executes.
pub trait Observer {
    /// Called before each fetch with the address about to be fetched.
    fn instruction(&mut self, _cpu: &mut Cpu, _pc: u16) -> Verdict {
        Verdict::Continue
    }

    /// Called after the CPU vectored to an interrupt handler.
    fn interrupt(&mut self, _cpu: &mut Cpu, _line: InterruptLine, _vector: u16) {}
}

/// An observer that does nothing.
pub struct NoObserver;

impl Observer for NoObserver {}

/// Serializable copy of the CPU's own state. Memory is not included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub pc: u16,
    pub sp: u16,
    pub af: u16,
    pub bc: u16,
    pub de: u16,
    pub hl: u16,
    pub ime: bool,
    pub halted: bool,
    pub cycles: u64,
}

pub struct Cpu {
    pub(super) registers: Registers,
    pub(super) memory: Memory,
    pub(super) ime: bool,
    pub(super) halted: bool,
    pub(super) cycles: u64,
    primary: &'static InstructionTable,
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}

impl Cpu {
    /// A CPU in the state the boot ROM leaves it in, with empty memory.
    pub fn new() -> Self {
        Cpu::with_memory(Memory::new())
    }

    /// A CPU in post-boot state over an existing memory image.
    pub fn with_memory(mut memory: Memory) -> Self {
        memory.write_byte(LY, 0);

        Cpu::with_registers(Registers::post_boot(), memory)
    }

    pub fn with_registers(registers: Registers, memory: Memory) -> Self {
        Cpu {
            registers,
            memory,
            ime: true,
            halted: false,
            cycles: 0,
            primary: &*PRIMARY,
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Total cycles consumed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn ime(&self) -> bool {
        self.ime
    }

    pub fn set_ime(&mut self, ime: bool) {
        self.ime = ime;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The opcode table the CPU dispatches through.
    pub fn table(&self) -> &'static InstructionTable {
        self.primary
    }

    /// Raise an interrupt line. Only the IF bit is touched; whether it gets
    /// serviced depends on IE and IME.
    pub fn request_interrupt(&mut self, line: InterruptLine) {
        let flags = self.memory.read_byte(IF);

        self.memory.write_byte(IF, flags | line.mask());
    }

    /// Interrupts both requested and enabled.
    pub fn pending_interrupts(&self) -> u8 {
        self.memory.read_byte(IE) & self.memory.read_byte(IF) & INTERRUPT_MASK
    }

    /// Execute one instruction, or service one interrupt.
    pub fn step(&mut self) -> Result<Step> {
        self.step_observed(&mut NoObserver)
    }

    /// Like `step`, with hooks.
    ///
    /// On an unknown opcode PC is left on the offending byte, so the caller
    /// can inspect or patch it and step again.
    pub fn step_observed<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<Step> {
        let pending = self.pending_interrupts();

        if self.halted && pending != 0 {
            debug!("HALT released at {:04X}", self.registers.pc());
            self.halted = false;
        }

        if self.ime {
            if let Some(line) = InterruptLine::highest_pending(pending) {
                self.service(line);
                observer.interrupt(self, line, line.vector());

                return Ok(Step::Interrupt(line));
            }
        }

        if self.halted {
            self.cycles += HALT_CYCLES;

            return Ok(Step::Halted);
        }

        let pc = self.registers.pc();
        if observer.instruction(self, pc) == Verdict::Break {
            return Ok(Step::Break);
        }

        let table = self.primary;
        let pc = self.registers.pc();
        let opcode = self.memory.read_byte(pc);
        let instr = match table.lookup(opcode) {
            Some(instr) => instr,
            None => {
                warn!("Unknown opcode {:02X} at {:04X}", opcode, pc);

                return Err(Error::UnknownOpcode {
                    address: pc,
                    opcode,
                });
            }
        };

        self.registers.set_pc(pc.wrapping_add(1));

        let cycles = self.execute(instr)?;
        self.cycles += cycles as u64;

        Ok(Step::Instruction { opcode, cycles })
    }

    /// Vector to an interrupt handler.
    fn service(&mut self, line: InterruptLine) {
        let flags = self.memory.read_byte(IF);
        let pc = self.registers.pc();

        debug!("Servicing {} interrupt from {:04X}", line, pc);

        self.memory.write_byte(IF, flags & !line.mask());
        self.ime = false;
        push(&mut self.registers, &mut self.memory, pc);
        self.registers.set_pc(line.vector());
        self.cycles += INTERRUPT_CYCLES;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.registers.get16(Reg16::PC),
            sp: self.registers.get16(Reg16::SP),
            af: self.registers.get16(Reg16::AF),
            bc: self.registers.get16(Reg16::BC),
            de: self.registers.get16(Reg16::DE),
            hl: self.registers.get16(Reg16::HL),
            ime: self.ime,
            halted: self.halted,
            cycles: self.cycles,
        }
    }

    /// Load CPU state from a snapshot. Memory is left alone.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.registers.set16(Reg16::PC, snapshot.pc);
        self.registers.set16(Reg16::SP, snapshot.sp);
        self.registers.set16(Reg16::AF, snapshot.af);
        self.registers.set16(Reg16::BC, snapshot.bc);
        self.registers.set16(Reg16::DE, snapshot.de);
        self.registers.set16(Reg16::HL, snapshot.hl);
        self.ime = snapshot.ime;
        self.halted = snapshot.halted;
        self.cycles = snapshot.cycles;
    }
}
