//! Traits for integer widths the processor operates on

use num_traits::{PrimInt, WrappingAdd, WrappingSub};
use std::fmt::Debug;

/// An unsigned integer width the ALU can operate on.
///
/// The SM83 only has two: bytes for the accumulator and the 8-bit registers,
/// and words for register pairs and the stack pointer.
pub trait Width: PrimInt + WrappingAdd + WrappingSub + Debug {
    /// The bit which receives the half carry: carry out of bit 3 for bytes,
    /// out of bit 11 for words.
    const HALF_CARRY: Self;
}

macro_rules! width_impl {
    ($type:ident, $half:expr) => {
        impl Width for $type {
            const HALF_CARRY: $type = $half;
        }
    };
}

width_impl!(u8, 0x10);
width_impl!(u16, 0x1000);
