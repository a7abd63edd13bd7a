//! The SM83 register file

use crate::reg::Word;
use bitflags::bitflags;
use std::fmt::Debug;
use std::{fmt, result, str};

bitflags! {
    /// The condition flags held in the low byte of AF.
    ///
    /// The low nibble of F has no flag assigned to it.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const ZERO = 0b1000_0000;
        const SUBTRACT = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY = 0b0001_0000;
    }
}

/// Enumeration of all architectural 8-bit registers.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// Enumeration of all 16-bit registers and register pairs.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reg16 {
    PC,
    SP,
    AF,
    BC,
    DE,
    HL,
}

impl Reg8 {
    /// The word slot holding this register, and whether it is the high half.
    fn slot(self) -> (usize, bool) {
        match self {
            Reg8::A => (Reg16::AF.slot(), true),
            Reg8::F => (Reg16::AF.slot(), false),
            Reg8::B => (Reg16::BC.slot(), true),
            Reg8::C => (Reg16::BC.slot(), false),
            Reg8::D => (Reg16::DE.slot(), true),
            Reg8::E => (Reg16::DE.slot(), false),
            Reg8::H => (Reg16::HL.slot(), true),
            Reg8::L => (Reg16::HL.slot(), false),
        }
    }
}

impl Reg16 {
    fn slot(self) -> usize {
        match self {
            Reg16::PC => 0,
            Reg16::SP => 1,
            Reg16::AF => 2,
            Reg16::BC => 3,
            Reg16::DE => 4,
            Reg16::HL => 5,
        }
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl str::FromStr for Reg8 {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        use Reg8::*;

        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(A),
            "F" => Ok(F),
            "B" => Ok(B),
            "C" => Ok(C),
            "D" => Ok(D),
            "E" => Ok(E),
            "H" => Ok(H),
            "L" => Ok(L),
            _ => Err(()),
        }
    }
}

impl str::FromStr for Reg16 {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        use Reg16::*;

        match s.to_ascii_uppercase().as_str() {
            "PC" => Ok(PC),
            "SP" => Ok(SP),
            "AF" => Ok(AF),
            "BC" => Ok(BC),
            "DE" => Ok(DE),
            "HL" => Ok(HL),
            _ => Err(()),
        }
    }
}

/// The register file: six word slots, with the byte registers aliased onto
/// the halves of AF, BC, DE and HL.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    slots: [Word; 6],
}

impl Registers {
    /// Register state left behind by the boot ROM.
    pub fn post_boot() -> Self {
        let mut regs = Registers::default();

        regs.set16(Reg16::PC, 0x0100);
        regs.set16(Reg16::SP, 0xFFFE);
        regs.set16(Reg16::AF, 0x0001);
        regs.set16(Reg16::BC, 0x0013);
        regs.set16(Reg16::DE, 0x00D8);
        regs.set16(Reg16::HL, 0x014D);

        regs
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        let (slot, high) = reg.slot();

        if high {
            self.slots[slot].hi()
        } else {
            self.slots[slot].lo()
        }
    }

    pub fn set8(&mut self, reg: Reg8, value: u8) {
        let (slot, high) = reg.slot();

        if high {
            self.slots[slot].set_hi(value);
        } else {
            self.slots[slot].set_lo(value);
        }
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        self.slots[reg.slot()].value()
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        self.slots[reg.slot()].set(value);
    }

    pub fn word(&self, reg: Reg16) -> Word {
        self.slots[reg.slot()]
    }

    pub fn pc(&self) -> u16 {
        self.get16(Reg16::PC)
    }

    pub fn set_pc(&mut self, value: u16) {
        self.set16(Reg16::PC, value);
    }

    pub fn sp(&self) -> u16 {
        self.get16(Reg16::SP)
    }

    pub fn set_sp(&mut self, value: u16) {
        self.set16(Reg16::SP, value);
    }

    pub fn a(&self) -> u8 {
        self.get8(Reg8::A)
    }

    pub fn set_a(&mut self, value: u8) {
        self.set8(Reg8::A, value);
    }

    /// The flags currently in F.
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.get8(Reg8::F))
    }

    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    /// Set or clear flag bits without disturbing any other bit of F.
    pub fn set_flag(&mut self, flag: Flags, on: bool) {
        let f = self.get8(Reg8::F);

        self.set8(
            Reg8::F,
            if on { f | flag.bits() } else { f & !flag.bits() },
        );
    }

    /// Replace the flag bits of F, keeping its unassigned low nibble.
    pub fn set_flags(&mut self, flags: Flags) {
        let f = self.get8(Reg8::F);

        self.set8(Reg8::F, (f & !Flags::all().bits()) | flags.bits());
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.flags();
        let flag = |bit: Flags, name: char| if flags.contains(bit) { name } else { '-' };

        writeln!(
            f,
            "AF: {}  BC: {}  DE: {}  HL: {}",
            self.word(Reg16::AF),
            self.word(Reg16::BC),
            self.word(Reg16::DE),
            self.word(Reg16::HL)
        )?;
        write!(
            f,
            "SP: {}  PC: {}  [{}{}{}{}]",
            self.word(Reg16::SP),
            self.word(Reg16::PC),
            flag(Flags::ZERO, 'Z'),
            flag(Flags::SUBTRACT, 'N'),
            flag(Flags::HALF_CARRY, 'H'),
            flag(Flags::CARRY, 'C')
        )
    }
}

/// A register width that can be named and accessed in the register file.
pub trait RegisterWidth: Copy {
    type Name: Copy + Debug + PartialEq + Eq;

    fn read(regs: &Registers, name: Self::Name) -> Self;

    fn write(regs: &mut Registers, name: Self::Name, value: Self);
}

impl RegisterWidth for u8 {
    type Name = Reg8;

    fn read(regs: &Registers, name: Reg8) -> Self {
        regs.get8(name)
    }

    fn write(regs: &mut Registers, name: Reg8, value: Self) {
        regs.set8(name, value)
    }
}

impl RegisterWidth for u16 {
    type Name = Reg16;

    fn read(regs: &Registers, name: Reg16) -> Self {
        regs.get16(name)
    }

    fn write(regs: &mut Registers, name: Reg16, value: Self) {
        regs.set16(name, value)
    }
}
