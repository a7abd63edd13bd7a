//! Interrupt lines

use std::fmt;

/// One of the five interrupt lines, in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterruptLine {
    VBlank,
    LcdStatus,
    Timer,
    Serial,
    Joypad,
}

/// Interrupt lines from highest to lowest priority.
pub static INTERRUPT_LINES: [InterruptLine; 5] = [
    InterruptLine::VBlank,
    InterruptLine::LcdStatus,
    InterruptLine::Timer,
    InterruptLine::Serial,
    InterruptLine::Joypad,
];

/// Bits of IE and IF that correspond to an interrupt line.
pub const INTERRUPT_MASK: u8 = 0x1F;

impl InterruptLine {
    /// Bit position in IE and IF.
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u8 {
        1 << self.bit()
    }

    /// Address of the handler the CPU jumps to.
    pub fn vector(self) -> u16 {
        0x40 + 8 * self.bit() as u16
    }

    /// Pick the line to service out of a set of pending IF bits.
    pub fn highest_pending(pending: u8) -> Option<Self> {
        INTERRUPT_LINES
            .iter()
            .copied()
            .find(|line| pending & line.mask() != 0)
    }
}

impl fmt::Display for InterruptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterruptLine::VBlank => write!(f, "VBlank"),
            InterruptLine::LcdStatus => write!(f, "LCD STAT"),
            InterruptLine::Timer => write!(f, "Timer"),
            InterruptLine::Serial => write!(f, "Serial"),
            InterruptLine::Joypad => write!(f, "Joypad"),
        }
    }
}
