//! CLI commands

mod common;
mod dis;
mod main;
mod monitor;
mod run;
mod trace;

pub use common::Command;
pub use dis::dis;
pub use main::main;
pub use monitor::Monitor;
pub use run::run;
pub use trace::trace;
