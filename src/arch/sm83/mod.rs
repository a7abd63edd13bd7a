//! A Z80 derivative created by SHARP for use in the Nintendo Game Boy

pub mod catalog;
mod cpu;
mod dis;
mod exec;
mod instr;
mod interrupt;
mod operand;
mod table;

pub use cpu::*;
pub use dis::{disassemble, Listing};
pub use instr::*;
pub use interrupt::*;
pub use operand::*;
pub use table::*;
