//! ALU flag testing

use crate::maths::{
    add, add_signed, add_with_carry, bit_test, dec, decimal_adjust, inc, shift, sub,
    sub_with_carry, Shift,
};
use crate::reg::Flags;
use proptest::prelude::*;

proptest! {
    #[test]
    fn add_byte_flags(a: u8, b: u8) {
        let out = add(a, b);

        prop_assert_eq!(out.value, a.wrapping_add(b));
        prop_assert_eq!(out.flags.contains(Flags::CARRY), a as u16 + b as u16 > 0xFF);
        prop_assert_eq!(out.flags.contains(Flags::HALF_CARRY), (a & 0x0F) + (b & 0x0F) > 0x0F);
        prop_assert_eq!(out.flags.contains(Flags::ZERO), a.wrapping_add(b) == 0);
        prop_assert!(!out.flags.contains(Flags::SUBTRACT));
        prop_assert_eq!(out.affected, Flags::all());
    }

    #[test]
    fn add_word_flags(a: u16, b: u16) {
        let out = add(a, b);

        prop_assert_eq!(out.flags.contains(Flags::CARRY), a as u32 + b as u32 > 0xFFFF);
        prop_assert_eq!(
            out.flags.contains(Flags::HALF_CARRY),
            (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF
        );
    }

    #[test]
    fn sub_byte_flags(a: u8, b: u8) {
        let out = sub(a, b);

        prop_assert_eq!(out.value, a.wrapping_sub(b));
        prop_assert_eq!(out.flags.contains(Flags::CARRY), b > a);
        prop_assert_eq!(out.flags.contains(Flags::HALF_CARRY), (b & 0x0F) > (a & 0x0F));
        prop_assert_eq!(out.flags.contains(Flags::ZERO), a == b);
        prop_assert!(out.flags.contains(Flags::SUBTRACT));
    }

    #[test]
    fn carry_in_matches_plain_form_when_clear(a: u8, b: u8) {
        prop_assert_eq!(add_with_carry(a, b, false), add(a, b));
        prop_assert_eq!(sub_with_carry(a, b, false), sub(a, b));
    }

    #[test]
    fn add_with_carry_flags(a: u8, b: u8) {
        let out = add_with_carry(a, b, true);
        let wide = a as u16 + b as u16 + 1;

        prop_assert_eq!(out.value, wide as u8);
        prop_assert_eq!(out.flags.contains(Flags::CARRY), wide > 0xFF);
        prop_assert_eq!(
            out.flags.contains(Flags::HALF_CARRY),
            (a & 0x0F) + (b & 0x0F) + 1 > 0x0F
        );
    }

    #[test]
    fn sub_with_carry_flags(a: u8, b: u8) {
        let out = sub_with_carry(a, b, true);

        prop_assert_eq!(out.value, a.wrapping_sub(b).wrapping_sub(1));
        prop_assert_eq!(out.flags.contains(Flags::CARRY), b as u16 + 1 > a as u16);
        prop_assert_eq!(
            out.flags.contains(Flags::HALF_CARRY),
            (b & 0x0F) + 1 > (a & 0x0F)
        );
    }

    #[test]
    fn inc_dec_leave_carry(a: u8) {
        prop_assert!(!inc(a).affected.contains(Flags::CARRY));
        prop_assert!(!dec(a).affected.contains(Flags::CARRY));
        prop_assert_eq!(dec(inc(a).value).value, a);
    }

    #[test]
    fn signed_displacement_matches_low_byte_add(base: u16, d: u8) {
        let out = add_signed(base, d);
        let low = add(base as u8, d);

        prop_assert_eq!(out.value, base.wrapping_add(d as i8 as u16));
        prop_assert_eq!(
            out.flags.contains(Flags::CARRY),
            low.flags.contains(Flags::CARRY)
        );
        prop_assert_eq!(
            out.flags.contains(Flags::HALF_CARRY),
            low.flags.contains(Flags::HALF_CARRY)
        );
        prop_assert!(!out.flags.contains(Flags::ZERO));
    }

    #[test]
    fn swap_twice_is_identity(v: u8) {
        let once = shift(Shift::Swap, v, false).value;

        prop_assert_eq!(shift(Shift::Swap, once, true).value, v);
    }
}

#[test]
fn merge_keeps_undefined_flags() {
    let out = inc(0x0F);
    let merged = out.merge(Flags::CARRY | Flags::SUBTRACT);

    assert_eq!(merged, Flags::CARRY | Flags::HALF_CARRY);
}

#[test]
fn word_add_can_leave_zero() {
    let out = add(0x8000_u16, 0x8000_u16).leaving(Flags::ZERO);

    assert_eq!(out.value, 0);
    assert_eq!(out.merge(Flags::empty()), Flags::CARRY);
    assert_eq!(out.merge(Flags::ZERO), Flags::ZERO | Flags::CARRY);
}

#[test]
fn displacement_edges() {
    let up = add_signed(0x00FF, 0x01);
    assert_eq!(up.value, 0x0100);
    assert_eq!(up.flags, Flags::HALF_CARRY | Flags::CARRY);

    let down = add_signed(0x0000, 0xFF);
    assert_eq!(down.value, 0xFFFF);
    assert_eq!(down.flags, Flags::empty());

    let back = add_signed(0x0001, 0xFF);
    assert_eq!(back.value, 0x0000);
    assert_eq!(back.flags, Flags::HALF_CARRY | Flags::CARRY);

    let page = add_signed(0xC005, 0xF0);
    assert_eq!(page.value, 0xBFF5);
    assert_eq!(page.flags, Flags::empty());
}

#[test]
fn decimal_adjust_after_add() {
    let sum = add(0x15_u8, 0x27_u8);
    let out = decimal_adjust(sum.value, sum.merge(Flags::empty()));

    assert_eq!(out.value, 0x42);
    assert!(!out.flags.contains(Flags::CARRY));
    assert!(!out.flags.contains(Flags::HALF_CARRY));
}

#[test]
fn decimal_adjust_after_add_overflow() {
    let sum = add(0x99_u8, 0x01_u8);
    let out = decimal_adjust(sum.value, sum.merge(Flags::empty()));

    assert_eq!(out.value, 0x00);
    assert!(out.flags.contains(Flags::CARRY));
    assert!(out.flags.contains(Flags::ZERO));
}

#[test]
fn decimal_adjust_after_borrow() {
    let diff = sub(0x10_u8, 0x20_u8);
    let out = decimal_adjust(diff.value, diff.merge(Flags::empty()));

    assert_eq!(out.value, 0x90);
    assert!(out.flags.contains(Flags::CARRY));
}

#[test]
fn decimal_adjust_after_half_borrow() {
    let diff = sub(0x42_u8, 0x05_u8);
    let out = decimal_adjust(diff.value, diff.merge(Flags::empty()));

    assert_eq!(out.value, 0x37);
    assert!(!out.flags.contains(Flags::CARRY));
}

#[test]
fn decimal_adjust_unmatched_keeps_carry() {
    let flags = Flags::SUBTRACT | Flags::CARRY | Flags::HALF_CARRY;
    let out = decimal_adjust(0x00, flags);

    assert_eq!(out.value, 0x00);
    assert!(out.merge(flags).contains(Flags::CARRY));
    assert!(!out.merge(flags).contains(Flags::HALF_CARRY));
}

#[test]
fn rotates() {
    let rlc = shift(Shift::RotateLeftCircular, 0x85, false);
    assert_eq!(rlc.value, 0x0B);
    assert!(rlc.flags.contains(Flags::CARRY));

    let rl = shift(Shift::RotateLeft, 0x80, false);
    assert_eq!(rl.value, 0x00);
    assert_eq!(rl.flags, Flags::ZERO | Flags::CARRY);

    let rr = shift(Shift::RotateRight, 0x01, true);
    assert_eq!(rr.value, 0x80);
    assert!(rr.flags.contains(Flags::CARRY));

    let rrc = shift(Shift::RotateRightCircular, 0x01, false);
    assert_eq!(rrc.value, 0x80);
    assert!(rrc.flags.contains(Flags::CARRY));
}

#[test]
fn shifts() {
    let sla = shift(Shift::ShiftLeftArithmetic, 0xFF, true);
    assert_eq!(sla.value, 0xFE);
    assert!(sla.flags.contains(Flags::CARRY));

    let sra = shift(Shift::ShiftRightArithmetic, 0x81, false);
    assert_eq!(sra.value, 0xC0);
    assert!(sra.flags.contains(Flags::CARRY));

    let srl = shift(Shift::ShiftRightLogical, 0x01, false);
    assert_eq!(srl.value, 0x00);
    assert_eq!(srl.flags, Flags::ZERO | Flags::CARRY);

    let swap = shift(Shift::Swap, 0xF1, true);
    assert_eq!(swap.value, 0x1F);
    assert!(!swap.flags.contains(Flags::CARRY));
}

#[test]
fn bit_test_leaves_carry() {
    let clear = bit_test(0x7F, 7);
    assert_eq!(clear.flags, Flags::ZERO | Flags::HALF_CARRY);
    assert!(!clear.affected.contains(Flags::CARRY));

    let set = bit_test(0x80, 7);
    assert_eq!(set.flags, Flags::HALF_CARRY);
}
