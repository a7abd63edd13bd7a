//! Full platforms which wrap a CPU core into the execution environment a
//! program image actually runs in.

pub mod gb;
mod joypad;

pub use joypad::*;

#[cfg(test)]
mod tests;
