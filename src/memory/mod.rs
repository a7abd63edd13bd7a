//! The SM83's flat 64KiB address space.

mod bus;
mod io;
mod traits;

pub use bus::Memory;
pub use io::*;
pub use traits::*;
