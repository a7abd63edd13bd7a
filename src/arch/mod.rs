//! Processor architectures the interpreter can execute.
//!
//! There is only one: the SM83 core of the Game Boy. Each architecture lives
//! in its own child module and exports a `Cpu` with a `step` function.

pub mod sm83;
