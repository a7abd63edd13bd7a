//! Static listing command

use crate::arch::sm83::disassemble;
use crate::input::{parse_address, parse_count};
use crate::memory::Memory;
use clap::ArgMatches;
use std::{fs, io};

/// List `--count` instructions from an image, starting at `start_pc`.
///
/// Listing stops early at the first byte that isn't a known opcode.
pub fn dis<'a>(argv: &ArgMatches<'a>) -> io::Result<()> {
    let image = argv
        .value_of("image")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Did not specify an image"))?;
    let start_spec = argv
        .value_of("start_pc")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Did not provide a start PC"))?;
    let count: usize = parse_count(argv.value_of("count").unwrap_or("16"), "count")?;

    let mut mem = Memory::new();
    mem.load(0, &fs::read(image)?);

    let mut pc = parse_address(start_spec)?;

    for _ in 0..count {
        match disassemble(&mem, pc) {
            Ok(listing) => {
                println!("{}", listing);
                pc = listing.next_address();
            }
            Err(e) => {
                eprintln!("{}", e);
                break;
            }
        }
    }

    Ok(())
}
