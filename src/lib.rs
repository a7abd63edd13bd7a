//! An interpreter for the SM83, the CPU core of the Game Boy.
//!
//! `arch::sm83::Cpu` executes one instruction per `step`; `platform::gb`
//! wraps it in the scanline host loop, and `cli` drives that from the command
//! line.

#[macro_use]
extern crate clap;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

pub mod arch;
pub mod cli;
pub mod error;
pub mod input;
pub mod maths;
pub mod memory;
pub mod platform;
pub mod project;
pub mod reg;

pub use error::{Error, Result};
