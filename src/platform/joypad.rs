//! Joypad buttons and the `0xFF00` register they show up in

use std::{fmt, str};

/// Select bit for the direction keys. Active low.
const SELECT_DIRECTIONS: u8 = 0x10;

/// Select bit for the action buttons. Active low.
const SELECT_ACTIONS: u8 = 0x20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// The button's bit in the joypad state. Directions occupy the low nibble
    /// and action buttons the high one, each in register order.
    fn mask(self) -> u8 {
        match self {
            Button::Right => 1 << 0,
            Button::Left => 1 << 1,
            Button::Up => 1 << 2,
            Button::Down => 1 << 3,
            Button::A => 1 << 4,
            Button::B => 1 << 5,
            Button::Select => 1 << 6,
            Button::Start => 1 << 7,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl str::FromStr for Button {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "right" => Ok(Button::Right),
            "left" => Ok(Button::Left),
            "up" => Ok(Button::Up),
            "down" => Ok(Button::Down),
            "a" => Ok(Button::A),
            "b" => Ok(Button::B),
            "select" => Ok(Button::Select),
            "start" => Ok(Button::Start),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(Button, "valid joypad button");

/// Which buttons are currently held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Joypad {
    held: u8,
}

impl Joypad {
    pub fn new() -> Self {
        Joypad::default()
    }

    pub fn press(&mut self, button: Button) {
        self.held |= button.mask();
    }

    pub fn release(&mut self, button: Button) {
        self.held &= !button.mask();
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.held & button.mask() != 0
    }

    /// Compute the joypad register from its current contents.
    ///
    /// The upper nibble, which holds the select bits the program wrote, is
    /// kept. The lower nibble reads held buttons of every selected group as 0
    /// bits; with no group selected it reads `0x0F`.
    pub fn register(&self, current: u8) -> u8 {
        let mut held = 0;

        if current & SELECT_ACTIONS == 0 {
            held |= self.held >> 4;
        }

        if current & SELECT_DIRECTIONS == 0 {
            held |= self.held & 0x0F;
        }

        (current & 0xF0) | (!held & 0x0F)
    }
}
