//! Operand references: where an instruction reads from and writes to.
//!
//! An operand only names its location. It is resolved against the register
//! file and memory each time the instruction runs, so descriptors can be
//! built once and shared.

use crate::maths::Width;
use crate::memory::{Memory, Storable};
use crate::reg::{Reg16, Reg8, RegisterWidth, Registers};
use std::fmt;

/// A width operands can carry: a byte or a word.
pub trait Unit: Width + Storable + RegisterWidth {}

impl<T> Unit for T where T: Width + Storable + RegisterWidth {}

/// What to do to a register pair after it was used as a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PostAdjust {
    Keep,
    Increment,
    Decrement,
}

impl PostAdjust {
    fn apply(self, regs: &mut Registers, pair: Reg16) {
        let value = regs.get16(pair);

        match self {
            PostAdjust::Keep => {}
            PostAdjust::Increment => regs.set16(pair, value.wrapping_add(1)),
            PostAdjust::Decrement => regs.set16(pair, value.wrapping_sub(1)),
        }
    }
}

/// An operand of width `T`.
///
/// Operands that consume instruction bytes read them at PC, which the CPU
/// leaves pointing just past the opcode while the instruction executes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand<T: RegisterWidth> {
    /// A register of the operand's width.
    Direct(T::Name),

    /// Memory at the address held in a register pair.
    Indirect(Reg16, PostAdjust),

    /// Memory at `0xFF00` plus the byte at PC.
    ZeroPage,

    /// Memory at `0xFF00` plus C.
    ZeroPageC,

    /// Memory at the little-endian word at PC.
    Absolute,

    /// The value at PC itself. Read-only.
    Immediate,
}

impl<T: Unit> Operand<T> {
    /// Number of instruction bytes the operand consumes.
    pub fn immediate_len(&self) -> u8 {
        match self {
            Operand::ZeroPage => 1,
            Operand::Absolute => 2,
            Operand::Immediate => std::mem::size_of::<T>() as u8,
            _ => 0,
        }
    }

    /// The memory address this operand refers to, if it refers to memory.
    fn address(&self, regs: &Registers, mem: &Memory) -> Option<u16> {
        match *self {
            Operand::Direct(_) | Operand::Immediate => None,
            Operand::Indirect(pair, _) => Some(regs.get16(pair)),
            Operand::ZeroPage => Some(0xFF00 | mem.read_byte(regs.pc()) as u16),
            Operand::ZeroPageC => Some(0xFF00 | regs.get8(Reg8::C) as u16),
            Operand::Absolute => Some(mem.get::<u16>(regs.pc())),
        }
    }

    pub fn get(&self, regs: &mut Registers, mem: &Memory) -> T {
        let value = match (*self, self.address(regs, mem)) {
            (Operand::Direct(name), _) => T::read(regs, name),
            (Operand::Immediate, _) => mem.get(regs.pc()),
            (_, Some(address)) => mem.get(address),
            (_, None) => unreachable!("memory operand without an address"),
        };

        if let Operand::Indirect(pair, adjust) = *self {
            adjust.apply(regs, pair);
        }

        value
    }

    /// # Panics
    ///
    /// Writing to an immediate is a bug in the instruction catalog.
    pub fn set(&self, regs: &mut Registers, mem: &mut Memory, value: T) {
        match (*self, self.address(regs, mem)) {
            (Operand::Direct(name), _) => T::write(regs, name, value),
            (Operand::Immediate, _) => unreachable!("write to an immediate operand"),
            (_, Some(address)) => mem.set(address, value),
            (_, None) => unreachable!("memory operand without an address"),
        }

        if let Operand::Indirect(pair, adjust) = *self {
            adjust.apply(regs, pair);
        }
    }

    pub fn is_writable(&self) -> bool {
        *self != Operand::Immediate
    }
}

impl<T: RegisterWidth> fmt::Display for Operand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = std::mem::size_of::<T>() == 2;

        match self {
            Operand::Direct(name) => write!(f, "{:?}", name),
            Operand::Indirect(pair, PostAdjust::Keep) => write!(f, "({:?})", pair),
            Operand::Indirect(pair, PostAdjust::Increment) => write!(f, "({:?}+)", pair),
            Operand::Indirect(pair, PostAdjust::Decrement) => write!(f, "({:?}-)", pair),
            Operand::ZeroPage => write!(f, "(a8)"),
            Operand::ZeroPageC => write!(f, "(C)"),
            Operand::Absolute => write!(f, "(a16)"),
            Operand::Immediate if word => write!(f, "d16"),
            Operand::Immediate => write!(f, "d8"),
        }
    }
}
