//! Flag-producing arithmetic for the SM83 ALU.
//!
//! Every function here is pure: it takes operand values (and, where the
//! operation consumes it, the incoming carry) and returns an `Outcome` naming
//! the result, the flag bits it produced and the flag bits it defines. The
//! caller merges the outcome into F, so a flag the operation does not define
//! is never disturbed.

use crate::maths::Width;
use crate::reg::Flags;
use num_traits::Zero;

/// The result of one ALU operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,

    /// Flag values produced by the operation.
    pub flags: Flags,

    /// Which flags the operation defines. Anything outside this mask is
    /// left as it was.
    pub affected: Flags,
}

impl<T> Outcome<T> {
    fn of(value: T) -> Self {
        Outcome {
            value,
            flags: Flags::empty(),
            affected: Flags::empty(),
        }
    }

    /// Define a flag.
    pub fn with(mut self, flag: Flags, on: bool) -> Self {
        self.flags.set(flag, on);
        self.affected |= flag;
        self
    }

    /// Stop defining a flag, so that it keeps whatever value it had.
    pub fn leaving(mut self, flag: Flags) -> Self {
        self.flags.remove(flag);
        self.affected.remove(flag);
        self
    }

    /// Combine with the current contents of F.
    pub fn merge(&self, current: Flags) -> Flags {
        (current - self.affected) | (self.flags & self.affected)
    }
}

pub fn add<T: Width>(a: T, b: T) -> Outcome<T> {
    let r = a.wrapping_add(&b);

    Outcome::of(r)
        .with(Flags::ZERO, r.is_zero())
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, !((r ^ a ^ b) & T::HALF_CARRY).is_zero())
        .with(Flags::CARRY, r < a)
}

/// Add with the incoming carry, computed at double width.
pub fn add_with_carry(a: u8, b: u8, carry: bool) -> Outcome<u8> {
    let wide = a as u16 + b as u16 + carry as u16;
    let r = wide as u8;

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, (a ^ b ^ r) & 0x10 != 0)
        .with(Flags::CARRY, wide > 0xFF)
}

pub fn sub<T: Width>(a: T, b: T) -> Outcome<T> {
    let r = a.wrapping_sub(&b);

    Outcome::of(r)
        .with(Flags::ZERO, r.is_zero())
        .with(Flags::SUBTRACT, true)
        .with(Flags::HALF_CARRY, !((r ^ a ^ b) & T::HALF_CARRY).is_zero())
        .with(Flags::CARRY, b > a)
}

/// Subtract with the incoming borrow, computed at double width.
pub fn sub_with_carry(a: u8, b: u8, carry: bool) -> Outcome<u8> {
    let wide = (a as u16)
        .wrapping_sub(b as u16)
        .wrapping_sub(carry as u16);
    let r = wide as u8;

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, true)
        .with(Flags::HALF_CARRY, (a ^ b ^ r) & 0x10 != 0)
        .with(Flags::CARRY, wide > 0xFF)
}

pub fn and(a: u8, b: u8) -> Outcome<u8> {
    logical(a & b, true)
}

pub fn or(a: u8, b: u8) -> Outcome<u8> {
    logical(a | b, false)
}

pub fn xor(a: u8, b: u8) -> Outcome<u8> {
    logical(a ^ b, false)
}

fn logical(r: u8, half_carry: bool) -> Outcome<u8> {
    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, half_carry)
        .with(Flags::CARRY, false)
}

/// Byte increment. Carry is not affected.
pub fn inc(a: u8) -> Outcome<u8> {
    let r = a.wrapping_add(1);

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, a & 0x0F == 0x0F)
}

/// Byte decrement. Carry is not affected.
pub fn dec(a: u8) -> Outcome<u8> {
    let r = a.wrapping_sub(1);

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, true)
        .with(Flags::HALF_CARRY, a & 0x0F == 0)
}

/// Add a signed 8-bit displacement to a 16-bit base.
///
/// Half carry and carry come out of the low nibble and low byte of the
/// addition. For a non-negative displacement that is the same as asking
/// whether the masked result went below the masked base; for a negative one
/// the comparison flips to "at or below", except that a displacement with a
/// zero low nibble never produces a half carry.
pub fn add_signed(base: u16, displacement: u8) -> Outcome<u16> {
    let r = base.wrapping_add(displacement as i8 as u16);
    let d = displacement as u16;

    Outcome::of(r)
        .with(Flags::ZERO, false)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, (base & 0x0F) + (d & 0x0F) > 0x0F)
        .with(Flags::CARRY, (base & 0xFF) + (d & 0xFF) > 0xFF)
}

/// One row of the decimal adjust table.
struct Adjustment {
    subtract: bool,
    carry: bool,
    high: (u8, u8),
    half_carry: bool,
    low: (u8, u8),
    correction: u8,
    carry_out: bool,
}

const fn adjust(
    subtract: bool,
    carry: bool,
    high: (u8, u8),
    half_carry: bool,
    low: (u8, u8),
    correction: u8,
    carry_out: bool,
) -> Adjustment {
    Adjustment {
        subtract,
        carry,
        high,
        half_carry,
        low,
        correction,
        carry_out,
    }
}

/// Corrections applied by DAA, keyed on N, C, the high nibble, H and the
/// low nibble of A.
static DECIMAL_ADJUST: [Adjustment; 13] = [
    adjust(false, false, (0x0, 0x9), false, (0x0, 0x9), 0x00, false),
    adjust(false, false, (0x0, 0x8), false, (0xA, 0xF), 0x06, false),
    adjust(false, false, (0x0, 0x9), true, (0x0, 0x3), 0x06, false),
    adjust(false, false, (0xA, 0xF), false, (0x0, 0x9), 0x60, true),
    adjust(false, false, (0x9, 0xF), false, (0xA, 0xF), 0x66, true),
    adjust(false, false, (0xA, 0xF), true, (0x0, 0x3), 0x66, true),
    adjust(false, true, (0x0, 0x2), false, (0x0, 0x9), 0x60, true),
    adjust(false, true, (0x0, 0x2), false, (0xA, 0xF), 0x66, true),
    adjust(false, true, (0x0, 0x3), true, (0x0, 0x3), 0x66, true),
    adjust(true, false, (0x0, 0x9), false, (0x0, 0x9), 0x00, false),
    adjust(true, false, (0x0, 0x8), true, (0x6, 0xF), 0xFA, false),
    adjust(true, true, (0x7, 0xF), false, (0x0, 0x9), 0xA0, true),
    adjust(true, true, (0x6, 0xF), true, (0x6, 0xF), 0x9A, true),
];

impl Adjustment {
    fn matches(&self, a: u8, flags: Flags) -> bool {
        let (high, low) = (a >> 4, a & 0x0F);

        self.subtract == flags.contains(Flags::SUBTRACT)
            && self.carry == flags.contains(Flags::CARRY)
            && self.half_carry == flags.contains(Flags::HALF_CARRY)
            && (self.high.0..=self.high.1).contains(&high)
            && (self.low.0..=self.low.1).contains(&low)
    }
}

/// Decimal adjust the accumulator after a BCD addition or subtraction.
///
/// Inputs that fall outside every row of the table get no correction and
/// keep their carry.
pub fn decimal_adjust(a: u8, flags: Flags) -> Outcome<u8> {
    let (correction, carry) = DECIMAL_ADJUST
        .iter()
        .find(|row| row.matches(a, flags))
        .map_or((0, flags.contains(Flags::CARRY)), |row| {
            (row.correction, row.carry_out)
        });
    let r = a.wrapping_add(correction);

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::HALF_CARRY, false)
        .with(Flags::CARRY, carry)
}

/// CPL
pub fn complement(a: u8) -> Outcome<u8> {
    Outcome::of(!a)
        .with(Flags::SUBTRACT, true)
        .with(Flags::HALF_CARRY, true)
}

/// SCF when `carry` is true, CCF when handed the inverse of the current
/// carry.
pub fn assign_carry(carry: bool) -> Outcome<()> {
    Outcome::of(())
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, false)
        .with(Flags::CARRY, carry)
}

/// The rotate and shift family, in extended page encoding order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    RotateLeftCircular,
    RotateRightCircular,
    RotateLeft,
    RotateRight,
    ShiftLeftArithmetic,
    ShiftRightArithmetic,
    Swap,
    ShiftRightLogical,
}

pub static SHIFTS: [Shift; 8] = [
    Shift::RotateLeftCircular,
    Shift::RotateRightCircular,
    Shift::RotateLeft,
    Shift::RotateRight,
    Shift::ShiftLeftArithmetic,
    Shift::ShiftRightArithmetic,
    Shift::Swap,
    Shift::ShiftRightLogical,
];

impl Shift {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Shift::RotateLeftCircular => "RLC",
            Shift::RotateRightCircular => "RRC",
            Shift::RotateLeft => "RL",
            Shift::RotateRight => "RR",
            Shift::ShiftLeftArithmetic => "SLA",
            Shift::ShiftRightArithmetic => "SRA",
            Shift::Swap => "SWAP",
            Shift::ShiftRightLogical => "SRL",
        }
    }
}

/// Rotate or shift a byte. `carry` is only consumed by RL and RR.
///
/// Zero is set from the result; the accumulator forms override it.
pub fn shift(kind: Shift, value: u8, carry: bool) -> Outcome<u8> {
    let (r, out) = match kind {
        Shift::RotateLeftCircular => (value.rotate_left(1), value & 0x80 != 0),
        Shift::RotateRightCircular => (value.rotate_right(1), value & 0x01 != 0),
        Shift::RotateLeft => (value << 1 | carry as u8, value & 0x80 != 0),
        Shift::RotateRight => (value >> 1 | (carry as u8) << 7, value & 0x01 != 0),
        Shift::ShiftLeftArithmetic => (value << 1, value & 0x80 != 0),
        Shift::ShiftRightArithmetic => (value >> 1 | value & 0x80, value & 0x01 != 0),
        Shift::Swap => (value.rotate_left(4), false),
        Shift::ShiftRightLogical => (value >> 1, value & 0x01 != 0),
    };

    Outcome::of(r)
        .with(Flags::ZERO, r == 0)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, false)
        .with(Flags::CARRY, out)
}

/// BIT n: Zero reports a clear bit. Carry is not affected.
pub fn bit_test(value: u8, bit: u8) -> Outcome<u8> {
    Outcome::of(value)
        .with(Flags::ZERO, value & (1 << bit) == 0)
        .with(Flags::SUBTRACT, false)
        .with(Flags::HALF_CARRY, true)
}
