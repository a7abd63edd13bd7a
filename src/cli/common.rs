//! Common utilities for command implementations

use crate::arch::sm83::{Cpu, Observer, Step};
use crate::error::{Error, Result};
use crate::platform::gb::Machine;
use crate::project::Program;
use clap::{App, Arg, SubCommand};
use std::io;
use std::str::FromStr;

/// Enumeration of all CLI commands
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Trace,
    Disassemble,
}

impl Command {
    /// Enumerate all commands that gbinterp recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Run, Trace, Disassemble]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Run => Program::configure_app(
                SubCommand::with_name("run").about("Run a program image on the Game Boy host loop"),
            )
            .arg(
                Arg::with_name("frames")
                    .long("frames")
                    .value_name("N")
                    .takes_value(true)
                    .help("How many frames to run (default 1)"),
            )
            .arg(
                Arg::with_name("steps")
                    .long("steps")
                    .value_name("N")
                    .takes_value(true)
                    .conflicts_with("frames")
                    .help("Run this many steps instead of whole frames"),
            )
            .arg(
                Arg::with_name("break")
                    .long("break")
                    .value_name("ADDR")
                    .takes_value(true)
                    .multiple(true)
                    .number_of_values(1)
                    .help("Stop before executing the instruction at this address"),
            )
            .arg(
                Arg::with_name("hold")
                    .long("hold")
                    .value_name("BUTTON")
                    .takes_value(true)
                    .multiple(true)
                    .number_of_values(1)
                    .help("Hold a joypad button down for the whole run"),
            )
            .arg(
                Arg::with_name("snapshot")
                    .long("snapshot")
                    .help("Print the final CPU state as JSON"),
            ),
            Command::Trace => Program::configure_app(
                SubCommand::with_name("trace")
                    .about("Execute a program image, listing each instruction as it runs"),
            )
            .arg(
                Arg::with_name("steps")
                    .long("steps")
                    .value_name("N")
                    .takes_value(true)
                    .default_value("64")
                    .help("How many steps to trace"),
            ),
            Command::Disassemble => SubCommand::with_name("dis")
                .about("List the instructions in an image starting from a given address")
                .arg(
                    Arg::with_name("image")
                        .value_name("image.gb")
                        .index(1)
                        .required(true)
                        .help("The program image to list"),
                )
                .arg(
                    Arg::with_name("start_pc")
                        .value_name("0150")
                        .index(2)
                        .required(true)
                        .help("The address to start listing from"),
                )
                .arg(
                    Arg::with_name("count")
                        .long("count")
                        .value_name("N")
                        .takes_value(true)
                        .default_value("16")
                        .help("How many instructions to list"),
                ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "run" => Ok(Command::Run),
            "trace" => Ok(Command::Trace),
            "dis" => Ok(Command::Disassemble),
            _ => Err(()),
        }
    }
}

/// Load a program's image and configuration into a fresh machine.
pub fn boot(prog: &Program) -> io::Result<Machine> {
    let image = prog.read_image()?;
    let config = prog.machine_config()?;

    Ok(Machine::from_image(&image, config))
}

/// Report an execution error along with the state the CPU was left in.
pub fn report_fault(cpu: &Cpu, err: Error) -> io::Error {
    eprintln!("{}", err);
    eprintln!("{}", cpu.registers());

    err.into()
}

/// Step the machine up to `steps` times, stopping early on a break.
pub fn run_steps<O: Observer + ?Sized>(
    machine: &mut Machine,
    observer: &mut O,
    steps: u64,
) -> Result<()> {
    for _ in 0..steps {
        if let Step::Break = machine.step_observed(observer)? {
            break;
        }
    }

    Ok(())
}
