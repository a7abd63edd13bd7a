//! Fixed addresses of the memory-mapped hardware the interpreter models.

/// Joypad select/read register.
pub const JOYP: u16 = 0xFF00;

/// Interrupt request flags.
pub const IF: u16 = 0xFF0F;

/// Current scanline.
pub const LY: u16 = 0xFF44;

/// Writing a page number here copies that page into OAM.
pub const DMA: u16 = 0xFF46;

/// Interrupt enable mask.
pub const IE: u16 = 0xFFFF;

/// Start of sprite attribute memory.
pub const OAM: u16 = 0xFE00;

/// Number of bytes an OAM DMA transfer copies.
pub const OAM_LEN: usize = 160;

/// Writes below this address land in cartridge ROM and are discarded.
pub const ROM_END: u16 = 0x8000;
