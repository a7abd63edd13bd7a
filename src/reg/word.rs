//! 16-bit register storage

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-bit value whose high and low bytes can be addressed on their own.
///
/// Both byte views alias the same storage, which is how the SM83 register
/// pairs behave: writing `H` changes `HL`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(u16);

impl Word {
    pub const fn new(value: u16) -> Self {
        Word(value)
    }

    pub fn from_bytes(hi: u8, lo: u8) -> Self {
        Word(u16::from_be_bytes([hi, lo]))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    pub fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn lo(self) -> u8 {
        self.0 as u8
    }

    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | (value as u16) << 8;
    }

    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }

    pub fn wrapping_add(self, rhs: u16) -> Self {
        Word(self.0.wrapping_add(rhs))
    }

    pub fn wrapping_sub(self, rhs: u16) -> Self {
        Word(self.0.wrapping_sub(rhs))
    }
}

impl From<u16> for Word {
    fn from(value: u16) -> Self {
        Word(value)
    }
}

impl From<Word> for u16 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
