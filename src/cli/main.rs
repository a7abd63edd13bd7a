//! CLI support for non-command bits

use crate::cli;
use crate::cli::common::Command;
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    let (command, submatches) = matches.subcommand();
    let command = cli::Command::from_str(command);

    match (command, submatches) {
        (Ok(cli::Command::Run), Some(argv)) => cli::run(argv)?,
        (Ok(cli::Command::Trace), Some(argv)) => cli::trace(argv)?,
        (Ok(cli::Command::Disassemble), Some(argv)) => cli::dis(argv)?,
        _ => {
            eprintln!("{}", matches.usage());

            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "No command given",
            ));
        }
    };

    Ok(())
}
