//! Game Boy host loop: scanline timing, VBlank and joypad plumbing around the
//! SM83 core.

use crate::arch::sm83::{Cpu, InterruptLine, NoObserver, Observer, Step};
use crate::error::Result;
use crate::memory::{Memory, JOYP, LY};
use crate::platform::{Button, Joypad};
use crate::project::MachineConfig;
use log::debug;

/// How a scanline or frame run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Run {
    Completed,

    /// The observer stopped execution. Running again resumes the same
    /// scanline.
    Break,
}

pub struct Machine {
    cpu: Cpu,
    config: MachineConfig,
    joypad: Joypad,

    /// CPU cycle count at the start of the current scanline.
    scanline_start: u64,
    frames: u64,
}

impl Machine {
    pub fn new(cpu: Cpu, config: MachineConfig) -> Self {
        let scanline_start = cpu.cycles();

        Machine {
            cpu,
            config,
            joypad: Joypad::new(),
            scanline_start,
            frames: 0,
        }
    }

    /// Boot a machine with `image` loaded at address 0.
    pub fn from_image(image: &[u8], config: MachineConfig) -> Self {
        let mut memory = Memory::new();
        let loaded = memory.load(0, image);

        debug!("Loaded {} of {} image bytes", loaded, image.len());

        Machine::new(Cpu::with_memory(memory), config)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn joypad(&self) -> &Joypad {
        &self.joypad
    }

    /// Hold a button down. Newly pressed buttons raise the joypad interrupt.
    pub fn press(&mut self, button: Button) {
        if !self.joypad.is_pressed(button) {
            self.joypad.press(button);
            self.cpu.request_interrupt(InterruptLine::Joypad);
        }
    }

    pub fn release(&mut self, button: Button) {
        self.joypad.release(button);
    }

    /// Completed frames, counted each time LY wraps to 0.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scanline(&self) -> u8 {
        self.cpu.memory().read_byte(LY)
    }

    fn refresh_joypad(&mut self) {
        let current = self.cpu.memory().read_byte(JOYP);
        let value = self.joypad.register(current);

        self.cpu.memory_mut().write_byte(JOYP, value);
    }

    /// Move LY to the next scanline once the current one has used up its
    /// cycle budget. Returns whether that happened.
    fn account(&mut self) -> bool {
        let budget = self.config.cycles_per_scanline as u64;

        if self.cpu.cycles().saturating_sub(self.scanline_start) < budget {
            return false;
        }

        self.scanline_start += budget;

        let mut ly = self.scanline() as u32 + 1;
        if ly >= self.config.scanlines_per_frame {
            ly = 0;
            self.frames += 1;
        }

        self.cpu.memory_mut().write_byte(LY, ly as u8);

        if ly == self.config.vblank_scanline {
            debug!("VBlank at frame {}", self.frames);
            self.cpu.request_interrupt(InterruptLine::VBlank);
        }

        true
    }

    fn tick<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<(Step, bool)> {
        self.refresh_joypad();

        let step = self.cpu.step_observed(observer)?;

        Ok((step, self.account()))
    }

    pub fn step(&mut self) -> Result<Step> {
        self.step_observed(&mut NoObserver)
    }

    /// Refresh the joypad register, step the CPU and advance the scanline if
    /// its budget is spent.
    pub fn step_observed<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<Step> {
        Ok(self.tick(observer)?.0)
    }

    pub fn run_scanline(&mut self) -> Result<Run> {
        self.run_scanline_observed(&mut NoObserver)
    }

    /// Step until the current scanline ends.
    pub fn run_scanline_observed<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<Run> {
        loop {
            match self.tick(observer)? {
                (Step::Break, _) => return Ok(Run::Break),
                (_, true) => return Ok(Run::Completed),
                (_, false) => {}
            }
        }
    }

    pub fn run_frame(&mut self) -> Result<Run> {
        self.run_frame_observed(&mut NoObserver)
    }

    /// Run scanlines until LY wraps back to 0.
    pub fn run_frame_observed<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<Run> {
        loop {
            if let Run::Break = self.run_scanline_observed(observer)? {
                return Ok(Run::Break);
            }

            if self.scanline() == 0 {
                return Ok(Run::Completed);
            }
        }
    }
}
