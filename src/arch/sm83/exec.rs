//! Instruction semantics.
//!
//! While an instruction executes PC points just past its opcode, so any
//! immediate bytes are read at PC. Once it finishes, PC either holds a jump
//! target or is moved past the immediates.

use crate::arch::sm83::{Cpu, Instruction, Operation, EXTENDED};
use crate::error::{Error, Result};
use crate::maths::{self, Outcome};
use crate::memory::Memory;
use crate::reg::{Flags, Reg16, Registers};
use log::{debug, trace, warn};

/// Push a word: high byte first, at the lower address last.
pub(super) fn push(regs: &mut Registers, mem: &mut Memory, value: u16) {
    let [lo, hi] = value.to_le_bytes();
    let sp = regs.sp().wrapping_sub(1);

    mem.write_byte(sp, hi);
    let sp = sp.wrapping_sub(1);
    mem.write_byte(sp, lo);

    regs.set_sp(sp);
}

/// Pop a word: low byte first.
pub(super) fn pop(regs: &mut Registers, mem: &Memory) -> u16 {
    let sp = regs.sp();
    let lo = mem.read_byte(sp);
    let hi = mem.read_byte(sp.wrapping_add(1));

    regs.set_sp(sp.wrapping_add(2));

    u16::from_le_bytes([lo, hi])
}

fn apply<T>(regs: &mut Registers, outcome: &Outcome<T>) {
    let flags = outcome.merge(regs.flags());

    regs.set_flags(flags);
}

impl Cpu {
    /// Execute a decoded instruction and return its cost in cycles.
    pub(super) fn execute(&mut self, instr: &'static Instruction) -> Result<u8> {
        use Operation::*;

        if let Prefix = instr.operation {
            return self.execute_extended(instr);
        }

        let regs = &mut self.registers;
        let mem = &mut self.memory;
        let next = regs.pc().wrapping_add(instr.immediate_len());
        let taken = instr.condition.map_or(true, |cond| cond.test(regs.flags()));
        let mut target = None;

        match instr.operation {
            Nop | Stop | Prefix => {}
            Halt => {
                debug!("HALT at {:04X}", regs.pc().wrapping_sub(1));
                self.halted = true;
            }
            DisableInterrupts => self.ime = false,
            EnableInterrupts => self.ime = true,

            Load8(dest, src) => {
                let value = src.get(regs, mem);
                dest.set(regs, mem, value);
            }
            Load16(dest, src) => {
                let value = src.get(regs, mem);
                dest.set(regs, mem, value);
            }
            LoadSpOffset => {
                let out = maths::add_signed(regs.sp(), mem.read_byte(regs.pc()));
                regs.set16(Reg16::HL, out.value);
                apply(regs, &out);
            }

            Inc8(op) => {
                let out = maths::inc(op.get(regs, mem));
                op.set(regs, mem, out.value);
                apply(regs, &out);
            }
            Dec8(op) => {
                let out = maths::dec(op.get(regs, mem));
                op.set(regs, mem, out.value);
                apply(regs, &out);
            }
            Inc16(pair) => regs.set16(pair, regs.get16(pair).wrapping_add(1)),
            Dec16(pair) => regs.set16(pair, regs.get16(pair).wrapping_sub(1)),

            Add8(src) => {
                let out = maths::add(regs.a(), src.get(regs, mem));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            AddCarry8(src) => {
                let b = src.get(regs, mem);
                let out = maths::add_with_carry(regs.a(), b, regs.flag(Flags::CARRY));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Sub8(src) => {
                let out = maths::sub(regs.a(), src.get(regs, mem));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            SubCarry8(src) => {
                let b = src.get(regs, mem);
                let out = maths::sub_with_carry(regs.a(), b, regs.flag(Flags::CARRY));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            And8(src) => {
                let out = maths::and(regs.a(), src.get(regs, mem));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Xor8(src) => {
                let out = maths::xor(regs.a(), src.get(regs, mem));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Or8(src) => {
                let out = maths::or(regs.a(), src.get(regs, mem));
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Compare8(src) => {
                let out = maths::sub(regs.a(), src.get(regs, mem));
                apply(regs, &out);
            }

            AddHl(src) => {
                let out = maths::add(regs.get16(Reg16::HL), regs.get16(src)).leaving(Flags::ZERO);
                regs.set16(Reg16::HL, out.value);
                apply(regs, &out);
            }
            AddSpOffset => {
                let out = maths::add_signed(regs.sp(), mem.read_byte(regs.pc()));
                regs.set_sp(out.value);
                apply(regs, &out);
            }

            DecimalAdjust => {
                let out = maths::decimal_adjust(regs.a(), regs.flags());
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Complement => {
                let out = maths::complement(regs.a());
                regs.set_a(out.value);
                apply(regs, &out);
            }
            SetCarry => apply(regs, &maths::assign_carry(true)),
            ComplementCarry => {
                let carry = regs.flag(Flags::CARRY);
                apply(regs, &maths::assign_carry(!carry));
            }

            RotateAccumulator(kind) => {
                let out = maths::shift(kind, regs.a(), regs.flag(Flags::CARRY))
                    .with(Flags::ZERO, false);
                regs.set_a(out.value);
                apply(regs, &out);
            }
            Rotate(kind, op) => {
                let value = op.get(regs, mem);
                let out = maths::shift(kind, value, regs.flag(Flags::CARRY));
                op.set(regs, mem, out.value);
                apply(regs, &out);
            }
            BitTest(op) => {
                let out = maths::bit_test(op.get(regs, mem), instr.arg.unwrap_or(0));
                apply(regs, &out);
            }
            BitReset(op) => {
                let value = op.get(regs, mem) & !(1 << instr.arg.unwrap_or(0));
                op.set(regs, mem, value);
            }
            BitSet(op) => {
                let value = op.get(regs, mem) | 1 << instr.arg.unwrap_or(0);
                op.set(regs, mem, value);
            }

            Jump(dest) if taken => target = Some(dest.get(regs, mem)),
            JumpRelative if taken => {
                let displacement = mem.read_byte(regs.pc());
                target = Some(maths::add_signed(next, displacement).value);
            }
            Call if taken => {
                let dest = mem.get::<u16>(regs.pc());
                push(regs, mem, next);
                target = Some(dest);
            }
            Return if taken => target = Some(pop(regs, mem)),
            ReturnFromInterrupt => {
                target = Some(pop(regs, mem));
                self.ime = true;
            }
            Restart => {
                push(regs, mem, next);
                target = Some(instr.arg.unwrap_or(0) as u16);
            }
            Jump(_) | JumpRelative | Call | Return => {}

            Push(pair) => {
                let value = regs.get16(pair);
                push(regs, mem, value);
            }
            Pop(pair) => {
                let value = pop(regs, mem);
                regs.set16(pair, value);
            }
        }

        regs.set_pc(target.unwrap_or(next));

        Ok(if taken { instr.cycles } else { instr.alt_cycles })
    }

    /// Dispatch the byte after a `CB` prefix through the extended page.
    fn execute_extended(&mut self, prefix: &'static Instruction) -> Result<u8> {
        let address = self.registers.pc();
        let opcode = self.memory.read_byte(address);
        let table = &*EXTENDED;

        let instr = match table.lookup(opcode) {
            Some(instr) => instr,
            None => {
                warn!("Unknown extended opcode CB {:02X} at {:04X}", opcode, address);
                self.registers.set_pc(address.wrapping_sub(1));

                return Err(Error::UnknownExtendedOpcode { address, opcode });
            }
        };

        trace!("CB {:02X} {}", opcode, instr.mnemonic);

        self.registers.set_pc(address.wrapping_add(1));

        Ok(prefix.cycles + self.execute(instr)?)
    }
}
