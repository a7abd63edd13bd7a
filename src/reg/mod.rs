//! Types which model the SM83 register file.

mod registers;
mod word;

pub use registers::*;
pub use word::Word;
