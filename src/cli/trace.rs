//! Single-run tracing command

use crate::cli::common::{boot, report_fault, run_steps};
use crate::cli::Monitor;
use crate::input::parse_count;
use crate::project::Program;
use clap::ArgMatches;
use std::io;

/// Trace execution of a particular program and display the results to the
/// user.
///
/// Every instruction is listed before it executes; the register summary is
/// printed once the step budget runs out.
pub fn trace<'a>(argv: &ArgMatches<'a>) -> io::Result<()> {
    let prog = Program::from_arg_matches(argv);
    let steps = parse_count(argv.value_of("steps").unwrap_or("64"), "steps")?;
    let mut machine = boot(&prog)?;
    let mut monitor = Monitor::default().tracing();

    if let Err(e) = run_steps(&mut machine, &mut monitor, steps) {
        return Err(report_fault(machine.cpu(), e));
    }

    println!("{}", machine.cpu().registers());

    Ok(())
}
