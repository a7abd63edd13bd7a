//! The SM83 instruction catalog.
//!
//! Irregular opcodes are listed row by row. The regular blocks (8-bit loads,
//! accumulator ALU ops, and the whole `CB` page) are generated from the same
//! register ordering the hardware decodes with.

use crate::arch::sm83::Operation::*;
use crate::arch::sm83::{Condition, Instruction, Operand, Operation, PostAdjust, ALU_CONDCODE};
use crate::maths::{Shift, SHIFTS};
use crate::reg::Reg16::*;
use crate::reg::Reg8::*;
use crate::reg::{Reg16, Reg8};
use std::borrow::Cow;

/// Primary page opcodes with no instruction behind them.
pub static UNUSED_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

const D8: Operand<u8> = Operand::Immediate;
const D16: Operand<u16> = Operand::Immediate;

fn r(reg: Reg8) -> Operand<u8> {
    Operand::Direct(reg)
}

fn rr(reg: Reg16) -> Operand<u16> {
    Operand::Direct(reg)
}

fn at(pair: Reg16) -> Operand<u8> {
    Operand::Indirect(pair, PostAdjust::Keep)
}

fn op<M>(opcode: u8, length: u8, cycles: u8, mnemonic: M, operation: Operation) -> Instruction
where
    M: Into<Cow<'static, str>>,
{
    Instruction::new(opcode, length, cycles, mnemonic, operation)
}

/// The 8-bit operand selected by the low three bits of an opcode:
/// B, C, D, E, H, L, (HL), A.
pub fn target8(index: u8) -> Operand<u8> {
    match index & 0x07 {
        0 => r(B),
        1 => r(C),
        2 => r(D),
        3 => r(E),
        4 => r(H),
        5 => r(L),
        6 => at(HL),
        _ => r(A),
    }
}

/// Register pairs as selected by bits 4-5 of the 16-bit load and
/// arithmetic opcodes.
static PAIRS_SP: [Reg16; 4] = [BC, DE, HL, SP];

/// Register pairs as selected by bits 4-5 of PUSH and POP.
static PAIRS_AF: [Reg16; 4] = [BC, DE, HL, AF];

/// Build the primary opcode page.
pub fn primary() -> Vec<Instruction> {
    let mut page = vec![
        op(0x00, 1, 4, "NOP", Nop),
        op(0x02, 1, 8, "LD (BC),A", Load8(at(BC), r(A))),
        op(0x07, 1, 4, "RLCA", RotateAccumulator(Shift::RotateLeftCircular)),
        op(0x08, 3, 20, "LD (a16),SP", Load16(Operand::Absolute, rr(SP))),
        op(0x0A, 1, 8, "LD A,(BC)", Load8(r(A), at(BC))),
        op(0x0F, 1, 4, "RRCA", RotateAccumulator(Shift::RotateRightCircular)),
        op(0x10, 2, 4, "STOP", Stop),
        op(0x12, 1, 8, "LD (DE),A", Load8(at(DE), r(A))),
        op(0x17, 1, 4, "RLA", RotateAccumulator(Shift::RotateLeft)),
        op(0x18, 2, 12, "JR r8", JumpRelative),
        op(0x1A, 1, 8, "LD A,(DE)", Load8(r(A), at(DE))),
        op(0x1F, 1, 4, "RRA", RotateAccumulator(Shift::RotateRight)),
        op(0x22, 1, 8, "LD (HL+),A", Load8(Operand::Indirect(HL, PostAdjust::Increment), r(A))),
        op(0x27, 1, 4, "DAA", DecimalAdjust),
        op(0x2A, 1, 8, "LD A,(HL+)", Load8(r(A), Operand::Indirect(HL, PostAdjust::Increment))),
        op(0x2F, 1, 4, "CPL", Complement),
        op(0x32, 1, 8, "LD (HL-),A", Load8(Operand::Indirect(HL, PostAdjust::Decrement), r(A))),
        op(0x37, 1, 4, "SCF", SetCarry),
        op(0x3A, 1, 8, "LD A,(HL-)", Load8(r(A), Operand::Indirect(HL, PostAdjust::Decrement))),
        op(0x3F, 1, 4, "CCF", ComplementCarry),
        op(0x76, 1, 4, "HALT", Halt),
        op(0xC3, 3, 16, "JP a16", Jump(D16)),
        op(0xC6, 2, 8, "ADD A,d8", Add8(D8)),
        op(0xC9, 1, 16, "RET", Return),
        op(0xCB, 2, 0, "PREFIX CB", Prefix),
        op(0xCD, 3, 24, "CALL a16", Call),
        op(0xCE, 2, 8, "ADC A,d8", AddCarry8(D8)),
        op(0xD6, 2, 8, "SUB d8", Sub8(D8)),
        op(0xD9, 1, 16, "RETI", ReturnFromInterrupt),
        op(0xDE, 2, 8, "SBC A,d8", SubCarry8(D8)),
        op(0xE0, 2, 12, "LDH (a8),A", Load8(Operand::ZeroPage, r(A))),
        op(0xE2, 1, 8, "LD (C),A", Load8(Operand::ZeroPageC, r(A))),
        op(0xE6, 2, 8, "AND d8", And8(D8)),
        op(0xE8, 2, 16, "ADD SP,r8", AddSpOffset),
        op(0xE9, 1, 4, "JP (HL)", Jump(rr(HL))),
        op(0xEA, 3, 16, "LD (a16),A", Load8(Operand::Absolute, r(A))),
        op(0xEE, 2, 8, "XOR d8", Xor8(D8)),
        op(0xF0, 2, 12, "LDH A,(a8)", Load8(r(A), Operand::ZeroPage)),
        op(0xF2, 1, 8, "LD A,(C)", Load8(r(A), Operand::ZeroPageC)),
        op(0xF3, 1, 4, "DI", DisableInterrupts),
        op(0xF6, 2, 8, "OR d8", Or8(D8)),
        op(0xF8, 2, 12, "LD HL,SP+r8", LoadSpOffset),
        op(0xF9, 1, 8, "LD SP,HL", Load16(rr(SP), rr(HL))),
        op(0xFA, 3, 16, "LD A,(a16)", Load8(r(A), Operand::Absolute)),
        op(0xFB, 1, 4, "EI", EnableInterrupts),
        op(0xFE, 2, 8, "CP d8", Compare8(D8)),
    ];

    for (i, pair) in (0u8..).zip(PAIRS_SP.iter().copied()) {
        let base = i << 4;

        page.push(op(0x01 | base, 3, 12, format!("LD {},d16", pair), Load16(rr(pair), D16)));
        page.push(op(0x03 | base, 1, 8, format!("INC {}", pair), Inc16(pair)));
        page.push(op(0x09 | base, 1, 8, format!("ADD HL,{}", pair), AddHl(pair)));
        page.push(op(0x0B | base, 1, 8, format!("DEC {}", pair), Dec16(pair)));
    }

    for (i, pair) in (0u8..).zip(PAIRS_AF.iter().copied()) {
        let base = i << 4;

        page.push(op(0xC1 | base, 1, 12, format!("POP {}", pair), Pop(pair)));
        page.push(op(0xC5 | base, 1, 16, format!("PUSH {}", pair), Push(pair)));
    }

    for (i, cond) in (0u8..).zip(ALU_CONDCODE.iter().copied()) {
        let base = i << 3;

        page.push(conditional(0x20 | base, 2, 12, 8, "JR", cond, ",r8", JumpRelative));
        page.push(conditional(0xC0 | base, 1, 20, 8, "RET", cond, "", Return));
        page.push(conditional(0xC2 | base, 3, 16, 12, "JP", cond, ",a16", Jump(D16)));
        page.push(conditional(0xC4 | base, 3, 24, 12, "CALL", cond, ",a16", Call));
    }

    for i in 0..8u8 {
        page.push(
            op(0xC7 | i << 3, 1, 16, format!("RST {:02X}H", i << 3), Restart)
                .with_arg(i << 3),
        );
    }

    for t in 0..8u8 {
        let target = target8(t);
        let hl = t == 6;

        page.push(op(0x04 | t << 3, 1, if hl { 12 } else { 4 }, format!("INC {}", target), Inc8(target)));
        page.push(op(0x05 | t << 3, 1, if hl { 12 } else { 4 }, format!("DEC {}", target), Dec8(target)));
        page.push(op(0x06 | t << 3, 2, if hl { 12 } else { 8 }, format!("LD {},d8", target), Load8(target, D8)));
    }

    for opcode in 0x40..=0x7Fu8 {
        if opcode == 0x76 {
            continue;
        }

        let (dest, src) = ((opcode >> 3) & 0x07, opcode & 0x07);
        let cycles = if dest == 6 || src == 6 { 8 } else { 4 };

        page.push(
            op(
                opcode,
                1,
                cycles,
                format!("LD {},{}", target8(dest), target8(src)),
                Load8(target8(dest), target8(src)),
            ),
        );
    }

    for opcode in 0x80..=0xBFu8 {
        let src = target8(opcode & 0x07);
        let cycles = if opcode & 0x07 == 6 { 8 } else { 4 };
        let (operation, mnemonic) = match (opcode >> 3) & 0x07 {
            0 => (Add8(src), format!("ADD A,{}", src)),
            1 => (AddCarry8(src), format!("ADC A,{}", src)),
            2 => (Sub8(src), format!("SUB {}", src)),
            3 => (SubCarry8(src), format!("SBC A,{}", src)),
            4 => (And8(src), format!("AND {}", src)),
            5 => (Xor8(src), format!("XOR {}", src)),
            6 => (Or8(src), format!("OR {}", src)),
            _ => (Compare8(src), format!("CP {}", src)),
        };

        page.push(op(opcode, 1, cycles, mnemonic, operation));
    }

    page
}

#[allow(clippy::too_many_arguments)]
fn conditional(
    opcode: u8,
    length: u8,
    taken: u8,
    untaken: u8,
    name: &str,
    cond: Condition,
    suffix: &str,
    operation: Operation,
) -> Instruction {
    op(opcode, length, taken, format!("{} {}{}", name, cond, suffix), operation)
        .when(cond, untaken)
}

/// Build the `CB` extended page. Every byte is a valid instruction.
pub fn extended() -> Vec<Instruction> {
    (0..=0xFFu8)
        .map(|opcode| {
            let target = target8(opcode & 0x07);
            let hl = opcode & 0x07 == 6;
            let bit = (opcode >> 3) & 0x07;

            let (operation, cycles, mnemonic) = match opcode >> 6 {
                0 => {
                    let kind = SHIFTS[bit as usize];

                    (
                        Rotate(kind, target),
                        if hl { 16 } else { 8 },
                        format!("{} {}", kind.mnemonic(), target),
                    )
                }
                1 => (
                    BitTest(target),
                    if hl { 12 } else { 8 },
                    format!("BIT {},{}", bit, target),
                ),
                2 => (
                    BitReset(target),
                    if hl { 16 } else { 8 },
                    format!("RES {},{}", bit, target),
                ),
                _ => (
                    BitSet(target),
                    if hl { 16 } else { 8 },
                    format!("SET {},{}", bit, target),
                ),
            };

            let instr = op(opcode, 2, cycles, mnemonic, operation).on_extended_page();

            if opcode >> 6 == 0 {
                instr
            } else {
                instr.with_arg(bit)
            }
        })
        .collect()
}
