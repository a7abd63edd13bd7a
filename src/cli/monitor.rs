//! Breakpoints and instruction tracing for command line runs

use crate::arch::sm83::{disassemble, Cpu, InterruptLine, Observer, Verdict};
use std::collections::BTreeSet;

#[derive(Default)]
pub struct Monitor {
    breakpoints: BTreeSet<u16>,
    tracing: bool,
    hit: Option<u16>,
}

impl Monitor {
    pub fn new<I: IntoIterator<Item = u16>>(breakpoints: I) -> Self {
        Monitor {
            breakpoints: breakpoints.into_iter().collect(),
            tracing: false,
            hit: None,
        }
    }

    /// Print each instruction (and interrupt) before it runs.
    pub fn tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// The breakpoint that stopped the last run, if any.
    pub fn hit(&self) -> Option<u16> {
        self.hit
    }
}

impl Observer for Monitor {
    fn instruction(&mut self, cpu: &mut Cpu, pc: u16) -> Verdict {
        if self.breakpoints.contains(&pc) {
            self.hit = Some(pc);
            return Verdict::Break;
        }

        if self.tracing {
            if let Ok(listing) = disassemble(cpu.memory(), pc) {
                println!("{}", listing);
            }
        }

        Verdict::Continue
    }

    fn interrupt(&mut self, _cpu: &mut Cpu, line: InterruptLine, vector: u16) {
        if self.tracing {
            println!("{:04X}  -- {} interrupt", vector, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::sm83::Step;
    use crate::memory::Memory;

    #[test]
    fn stops_at_breakpoint() {
        let mut mem = Memory::new();
        mem.load(0x0100, &[0x00, 0x00, 0x00]);

        let mut cpu = Cpu::with_memory(mem);
        let mut monitor = Monitor::new(vec![0x0102]);

        assert!(matches!(cpu.step_observed(&mut monitor), Ok(Step::Instruction { .. })));
        assert!(matches!(cpu.step_observed(&mut monitor), Ok(Step::Instruction { .. })));
        assert_eq!(monitor.hit(), None);

        assert!(matches!(cpu.step_observed(&mut monitor), Ok(Step::Break)));
        assert_eq!(monitor.hit(), Some(0x0102));
        assert_eq!(cpu.registers().pc(), 0x0102);
    }
}
