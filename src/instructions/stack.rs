//! # Stack Instructions
//!
//! PUSH and POP for the general registers (0x50-0x5F) and the segment
//! registers. All stack traffic goes through the CPU's push/pop
//! machinery, which owns the SP movement and the zeroing of vacated
//! slots.

use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::registers::{Reg16, SegReg};

/// PUSH r16 (0x50-0x57).
pub(crate) fn execute_push_reg<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg16) {
    let value = cpu.reg16(reg);
    cpu.push_word(value);
    cpu.ip = cpu.ip.wrapping_add(1);
}

/// PUSH segment register (0x06, 0x0E, 0x16, 0x1E).
pub(crate) fn execute_push_seg<M: MemoryBus>(cpu: &mut CPU<M>, seg: SegReg) {
    let value = cpu.seg(seg);
    cpu.push_word(value);
    cpu.ip = cpu.ip.wrapping_add(1);
}

/// POP r16 (0x58-0x5F).
pub(crate) fn execute_pop_reg<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg16) {
    let value = cpu.pop_word();
    cpu.set_reg16(reg, value);
    cpu.ip = cpu.ip.wrapping_add(1);
}

/// POP segment register (0x07, 0x17, 0x1F).
pub(crate) fn execute_pop_seg<M: MemoryBus>(cpu: &mut CPU<M>, seg: SegReg) {
    let value = cpu.pop_word();
    cpu.set_seg(seg, value);
    cpu.ip = cpu.ip.wrapping_add(1);
}
