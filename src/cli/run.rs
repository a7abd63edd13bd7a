//! Run a program image on the host loop

use crate::cli::common::{boot, report_fault, run_steps};
use crate::cli::Monitor;
use crate::error::Result;
use crate::input::{parse_address, parse_count};
use crate::platform::gb::{Machine, Run};
use crate::platform::Button;
use crate::project::Program;
use clap::ArgMatches;
use std::io;
use std::str::FromStr;

fn run_frames(machine: &mut Machine, monitor: &mut Monitor, frames: u64) -> Result<()> {
    for _ in 0..frames {
        if let Run::Break = machine.run_frame_observed(monitor)? {
            break;
        }
    }

    Ok(())
}

/// Print the machine state, either as a register summary or as a JSON
/// snapshot of the CPU.
fn print_state(machine: &Machine, as_json: bool) -> io::Result<()> {
    let cpu = machine.cpu();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&cpu.snapshot())?);
    } else {
        println!("{}", cpu.registers());
        println!(
            "LY: {:02X}  IME: {}  cycles: {}  frames: {}",
            machine.scanline(),
            cpu.ime() as u8,
            cpu.cycles(),
            machine.frames()
        );
    }

    Ok(())
}

pub fn run<'a>(argv: &ArgMatches<'a>) -> io::Result<()> {
    let prog = Program::from_arg_matches(argv);
    let mut machine = boot(&prog)?;

    let breakpoints = argv
        .values_of("break")
        .map_or(Ok(Vec::new()), |v| v.map(parse_address).collect::<Result<Vec<_>>>())?;

    for name in argv.values_of("hold").into_iter().flatten() {
        let button = Button::from_str(name).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a joypad button", name),
            )
        })?;

        machine.press(button);
    }

    let mut monitor = Monitor::new(breakpoints);
    let outcome = match argv.value_of("steps") {
        Some(steps) => run_steps(&mut machine, &mut monitor, parse_count(steps, "steps")?),
        None => {
            let frames = parse_count(argv.value_of("frames").unwrap_or("1"), "frames")?;
            run_frames(&mut machine, &mut monitor, frames)
        }
    };

    if let Err(e) = outcome {
        return Err(report_fault(machine.cpu(), e));
    }

    if let Some(pc) = monitor.hit() {
        eprintln!("Breakpoint at {:04X}", pc);
    }

    print_state(&machine, argv.is_present("snapshot"))
}
