//! Instruction descriptors

use crate::arch::sm83::Operand;
use crate::maths::Shift;
use crate::reg::{Flags, Reg16};
use std::borrow::Cow;
use std::fmt;

/// A condition code for a conditional instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Z,
    C,
    NZ,
    NC,
}

impl Condition {
    pub fn test(self, flags: Flags) -> bool {
        match self {
            Self::Z => flags.contains(Flags::ZERO),
            Self::C => flags.contains(Flags::CARRY),
            Self::NZ => !flags.contains(Flags::ZERO),
            Self::NC => !flags.contains(Flags::CARRY),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub static ALU_CONDCODE: [Condition; 4] =
    [Condition::NZ, Condition::Z, Condition::NC, Condition::C];

/// What an instruction does, together with the operands it does it to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Nop,
    Halt,
    /// Two bytes long; otherwise does nothing here.
    Stop,
    DisableInterrupts,
    EnableInterrupts,

    /// The `CB` prefix: the next byte selects from the extended page.
    Prefix,

    Load8(Operand<u8>, Operand<u8>),
    Load16(Operand<u16>, Operand<u16>),

    /// LD HL,SP+r8
    LoadSpOffset,

    Inc8(Operand<u8>),
    Dec8(Operand<u8>),
    Inc16(Reg16),
    Dec16(Reg16),

    Add8(Operand<u8>),
    AddCarry8(Operand<u8>),
    Sub8(Operand<u8>),
    SubCarry8(Operand<u8>),
    And8(Operand<u8>),
    Xor8(Operand<u8>),
    Or8(Operand<u8>),
    Compare8(Operand<u8>),

    /// ADD HL,rr
    AddHl(Reg16),

    /// ADD SP,r8
    AddSpOffset,

    DecimalAdjust,
    Complement,
    SetCarry,
    ComplementCarry,

    /// RLCA, RRCA, RLA and RRA. Zero is always cleared.
    RotateAccumulator(Shift),

    /// Extended page rotates, shifts and SWAP.
    Rotate(Shift, Operand<u8>),

    /// The bit index is the instruction's literal argument.
    BitTest(Operand<u8>),
    BitReset(Operand<u8>),
    BitSet(Operand<u8>),

    /// Absolute jump to the operand's value: `d16` or HL.
    Jump(Operand<u16>),
    JumpRelative,
    Call,
    Return,
    ReturnFromInterrupt,

    /// The vector is the instruction's literal argument.
    Restart,

    Push(Reg16),
    Pop(Reg16),
}

impl Operation {
    /// Number of instruction bytes this operation reads at PC.
    pub fn immediate_len(&self) -> u8 {
        use Operation::*;

        match self {
            Stop | LoadSpOffset | AddSpOffset | JumpRelative => 1,
            Call => 2,
            Load8(dest, src) => dest.immediate_len() + src.immediate_len(),
            Load16(dest, src) => dest.immediate_len() + src.immediate_len(),
            Add8(src) | AddCarry8(src) | Sub8(src) | SubCarry8(src) | And8(src)
            | Xor8(src) | Or8(src) | Compare8(src) => src.immediate_len(),
            Jump(target) => target.immediate_len(),
            _ => 0,
        }
    }

    /// The operands this operation may write through.
    pub fn write_targets(&self) -> Vec<WriteTarget> {
        use Operation::*;

        match *self {
            Load8(dest, _) | Inc8(dest) | Dec8(dest) | Rotate(_, dest) | BitReset(dest)
            | BitSet(dest) => vec![WriteTarget::Byte(dest)],
            Load16(dest, _) => vec![WriteTarget::Word(dest)],
            _ => vec![],
        }
    }
}

/// A write target, tagged with its width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteTarget {
    Byte(Operand<u8>),
    Word(Operand<u16>),
}

impl WriteTarget {
    pub fn is_writable(&self) -> bool {
        match self {
            WriteTarget::Byte(op) => op.is_writable(),
            WriteTarget::Word(op) => op.is_writable(),
        }
    }
}

/// One entry of an opcode page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,

    /// Whether this entry lives on the `CB` extended page.
    pub extended: bool,

    /// Total length in bytes, including the `CB` prefix on the extended
    /// page.
    pub length: u8,

    /// Cost in cycles; for conditional instructions, the cost when taken.
    pub cycles: u8,

    /// Cost when the condition does not hold. Zero for unconditional
    /// instructions.
    pub alt_cycles: u8,

    pub mnemonic: Cow<'static, str>,
    pub condition: Option<Condition>,

    /// Bit index for BIT/RES/SET, vector for RST.
    pub arg: Option<u8>,

    pub operation: Operation,
}

impl Instruction {
    pub fn new<M>(opcode: u8, length: u8, cycles: u8, mnemonic: M, operation: Operation) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Instruction {
            opcode,
            extended: false,
            length,
            cycles,
            alt_cycles: 0,
            mnemonic: mnemonic.into(),
            condition: None,
            arg: None,
            operation,
        }
    }

    /// Make the instruction conditional, costing `alt_cycles` when the
    /// condition fails.
    pub fn when(mut self, condition: Condition, alt_cycles: u8) -> Self {
        self.condition = Some(condition);
        self.alt_cycles = alt_cycles;
        self
    }

    pub fn with_arg(mut self, arg: u8) -> Self {
        self.arg = Some(arg);
        self
    }

    pub fn on_extended_page(mut self) -> Self {
        self.extended = true;
        self
    }

    /// Bytes after the opcode (and prefix) that belong to this instruction.
    pub fn immediate_len(&self) -> u16 {
        let opcode_len = if self.extended { 2 } else { 1 };

        (self.length as u16).saturating_sub(opcode_len)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)
    }
}
