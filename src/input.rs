//! Input utility functions

use crate::error::{Error, Result};
use std::io;
use std::str::FromStr;

/// Parse an address entered in by a user.
///
/// Addresses are hexadecimal, with an optional `0x` or `$` prefix. Anything
/// that doesn't fit in 16 bits is rejected.
pub fn parse_address(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed);

    u16::from_str_radix(digits, 16).map_err(|_| Error::InvalidAddress(text.to_string()))
}

/// Parse a decimal count for the command line argument `name`.
pub fn parse_count<T: FromStr>(text: &str, name: &str) -> io::Result<T> {
    text.trim().parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} must be a number, got {}", name, text),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(parse_address("0150").unwrap(), 0x0150);
        assert_eq!(parse_address("0xFF80").unwrap(), 0xFF80);
        assert_eq!(parse_address("$c000").unwrap(), 0xC000);
        assert_eq!(parse_address(" 40 ").unwrap(), 0x0040);
    }

    #[test]
    fn bad_addresses() {
        assert!(matches!(parse_address("10000"), Err(Error::InvalidAddress(_))));
        assert!(matches!(parse_address("0x"), Err(Error::InvalidAddress(_))));
        assert!(matches!(parse_address("start"), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count::<u64>("60", "frames").unwrap(), 60);
        assert_eq!(
            parse_count::<u64>("lots", "frames").unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }
}
