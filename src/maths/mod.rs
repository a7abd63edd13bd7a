//! Arithmetic over the SM83's two data widths and the flag results it yields

mod alu;
mod traits;

pub use alu::*;
pub use traits::*;

#[cfg(test)]
mod tests;
