//! Error type for the interpreter and its command line driver

use std::{io, result};
use thiserror::Error;

/// Error type for execution and the things wrapped around it.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte at `address` does not name any instruction on the primary
    /// opcode page.
    ///
    /// The program counter is left pointing at the offending byte, so an
    /// inspector can look at it (or patch it) and retry the step.
    #[error("unknown opcode {opcode:02X} at {address:04X}")]
    UnknownOpcode { address: u16, opcode: u8 },

    /// The byte at `address` follows a `CB` prefix but has no descriptor on
    /// the extended page.
    #[error("unknown extended opcode CB {opcode:02X} at {address:04X}")]
    UnknownExtendedOpcode { address: u16, opcode: u8 },

    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Underlying cause of error is JSON related
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User input could not be parsed as a 16-bit address.
    #[error("{0} is not a valid address")]
    InvalidAddress(String),
}

impl Error {
    /// The address of the faulting opcode, if this is a dispatch failure.
    pub fn fault_address(&self) -> Option<u16> {
        match self {
            Error::UnknownOpcode { address, .. } => Some(*address),
            Error::UnknownExtendedOpcode { address, .. } => Some(*address),
            _ => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::InvalidAddress(_) => io::Error::new(io::ErrorKind::InvalidInput, err.to_string()),
            _ => io::Error::new(io::ErrorKind::Other, err.to_string()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
