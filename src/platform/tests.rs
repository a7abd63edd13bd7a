use crate::arch::sm83::{Cpu, InterruptLine, Observer, Verdict};
use crate::memory::{IF, JOYP, LY};
use crate::platform::gb::{Machine, Run};
use crate::platform::{Button, Joypad};
use crate::project::MachineConfig;
use std::str::FromStr;

/// A machine whose entry point is `code` at `0x0100`.
fn machine(code: &[u8], config: MachineConfig) -> Machine {
    let mut image = vec![0; 0x8000];
    image[0x0100..0x0100 + code.len()].copy_from_slice(code);

    Machine::from_image(&image, config)
}

/// `JR -2`: spins in place at 12 cycles a step.
const SPIN: [u8; 2] = [0x18, 0xFE];

struct BreakAfter(u32);

impl Observer for BreakAfter {
    fn instruction(&mut self, _cpu: &mut Cpu, _pc: u16) -> Verdict {
        if self.0 == 0 {
            return Verdict::Break;
        }

        self.0 -= 1;
        Verdict::Continue
    }
}

#[test]
fn joypad_register() {
    let mut pad = Joypad::new();
    pad.press(Button::A);
    pad.press(Button::Start);
    pad.press(Button::Down);

    assert_eq!(pad.register(0x30), 0x3F);
    assert_eq!(pad.register(0x10), 0x16);
    assert_eq!(pad.register(0x20), 0x27);
    assert_eq!(pad.register(0x00), 0x06);
    assert_eq!(pad.register(0xF0), 0xFF);

    pad.release(Button::Start);
    assert!(!pad.is_pressed(Button::Start));
    assert_eq!(pad.register(0x10), 0x1E);
}

#[test]
fn button_names() {
    assert_eq!(Button::from_str("START"), Ok(Button::Start));
    assert_eq!(Button::from_str("left"), Ok(Button::Left));
    assert_eq!(Button::from_str("turbo"), Err(()));
    assert_eq!(serde_plain::from_str::<Button>("select").unwrap(), Button::Select);
    assert!(serde_plain::from_str::<Button>("home").is_err());
}

#[test]
fn scanline_advances_ly() {
    let mut gb = machine(&SPIN, MachineConfig::default());

    assert_eq!(gb.run_scanline().unwrap(), Run::Completed);
    assert_eq!(gb.scanline(), 1);
    assert_eq!(gb.cpu().cycles(), 456);
    assert_eq!(gb.cpu().registers().pc(), 0x0100);
}

#[test]
fn frame_wraps_and_requests_vblank() {
    let mut gb = machine(&SPIN, MachineConfig::default());

    assert_eq!(gb.run_frame().unwrap(), Run::Completed);
    assert_eq!(gb.scanline(), 0);
    assert_eq!(gb.frames(), 1);
    assert_eq!(gb.cpu().cycles(), 154 * 456);

    let requested = gb.cpu().memory().read_byte(IF);
    assert_eq!(requested & InterruptLine::VBlank.mask(), InterruptLine::VBlank.mask());
}

#[test]
fn custom_timing() {
    let config = MachineConfig {
        cycles_per_scanline: 24,
        scanlines_per_frame: 4,
        vblank_scanline: 2,
    };
    let mut gb = machine(&SPIN, config);

    gb.run_scanline().unwrap();
    assert_eq!(gb.cpu().memory().read_byte(IF), 0);

    gb.run_scanline().unwrap();
    assert_eq!(gb.cpu().memory().read_byte(LY), 2);
    assert_eq!(gb.cpu().memory().read_byte(IF), InterruptLine::VBlank.mask());

    gb.run_frame().unwrap();
    assert_eq!(gb.frames(), 1);
    assert_eq!(gb.cpu().cycles(), 4 * 24);
}

#[test]
fn break_resumes_scanline() {
    let mut gb = machine(&SPIN, MachineConfig::default());

    assert_eq!(gb.run_frame_observed(&mut BreakAfter(9)).unwrap(), Run::Break);
    assert_eq!(gb.cpu().cycles(), 9 * 12);
    assert_eq!(gb.scanline(), 0);

    assert_eq!(gb.run_scanline().unwrap(), Run::Completed);
    assert_eq!(gb.scanline(), 1);
    assert_eq!(gb.cpu().cycles(), 456);
}

#[test]
fn program_reads_joypad() {
    // LD A,10h / LDH (00h),A / LDH A,(00h)
    let mut gb = machine(&[0x3E, 0x10, 0xE0, 0x00, 0xF0, 0x00], MachineConfig::default());

    gb.press(Button::Start);
    gb.press(Button::Right);

    for _ in 0..3 {
        gb.step().unwrap();
    }

    assert_eq!(gb.cpu().registers().a(), 0x17);

    gb.release(Button::Start);
    gb.step().unwrap();
    assert_eq!(gb.cpu().memory().read_byte(JOYP), 0x1F);
}

#[test]
fn press_raises_joypad_interrupt() {
    let mut gb = machine(&SPIN, MachineConfig::default());

    gb.press(Button::B);
    assert_eq!(gb.cpu().memory().read_byte(IF), InterruptLine::Joypad.mask());

    gb.cpu_mut().memory_mut().write_byte(IF, 0);
    gb.press(Button::B);
    assert_eq!(gb.cpu().memory().read_byte(IF), 0);
}
