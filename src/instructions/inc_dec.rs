//! # Increment and Decrement Instructions
//!
//! The single-byte INC r16 (0x40-0x47) and DEC r16 (0x48-0x4F)
//! families. Both evaluate every arithmetic flag except carry, which
//! they leave untouched.

use crate::addressing::Width;
use crate::cpu::CPU;
use crate::flags::{ADJUST, OVERFLOW, PARITY, SIGN, ZERO};
use crate::memory::MemoryBus;
use crate::registers::Reg16;

const INC_DEC_FLAGS: u16 = PARITY | ADJUST | ZERO | SIGN | OVERFLOW;

/// INC r16: adds one with 16-bit wraparound.
pub(crate) fn execute_inc_reg<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg16) {
    let value = cpu.reg16(reg);
    let result = value.wrapping_add(1);
    cpu.set_reg16(reg, result);
    cpu.update_flags(value as i32, 1, result as i32, INC_DEC_FLAGS, Width::Word);
    cpu.ip = cpu.ip.wrapping_add(1);
}

/// DEC r16: subtracts one with 16-bit wraparound.
///
/// The flag evaluator sees the unclamped difference, so DEC of zero
/// reports a negative result through the sign flag.
pub(crate) fn execute_dec_reg<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg16) {
    let value = cpu.reg16(reg);
    let result = value as i32 - 1;
    cpu.set_reg16(reg, value.wrapping_sub(1));
    cpu.update_flags(value as i32, 1, result, INC_DEC_FLAGS, Width::Word);
    cpu.ip = cpu.ip.wrapping_add(1);
}
