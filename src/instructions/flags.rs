//! # Flag Manipulation Instructions
//!
//! The single-byte clear/set pairs CLC/STC, CLI/STI, and CLD/STD. The
//! dispatch table encodes which flag bit each opcode targets, so one
//! function serves each direction.

use crate::cpu::CPU;
use crate::memory::MemoryBus;

/// Clears the flag bit named by the dispatch entry (CLC, CLI, CLD).
pub(crate) fn execute_clear_flag<M: MemoryBus>(cpu: &mut CPU<M>, mask: u16) {
    cpu.flags &= !mask;
    cpu.ip = cpu.ip.wrapping_add(1);
}

/// Sets the flag bit named by the dispatch entry (STC, STI, STD).
pub(crate) fn execute_set_flag<M: MemoryBus>(cpu: &mut CPU<M>, mask: u16) {
    cpu.flags |= mask;
    cpu.ip = cpu.ip.wrapping_add(1);
}
