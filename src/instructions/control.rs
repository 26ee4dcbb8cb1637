//! # Control Transfer and Halt Instructions
//!
//! Near CALL and RET, and HLT. CALL and RET use a fixed return-address
//! convention: CALL pushes the address of its own opcode, and RET adds
//! the CALL instruction's three-byte length back when it pops, so
//! execution resumes at the instruction after the CALL.

use crate::cpu::CPU;
use crate::memory::MemoryBus;

/// CALL rel16 (0xE8): pushes the current IP, then transfers to
/// IP + displacement + 3.
pub(crate) fn execute_call_near<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push_word(cpu.ip);
    let disp = cpu.fetch16(1);
    cpu.ip = cpu.ip.wrapping_add(disp).wrapping_add(3);
}

/// RET (0xC3): pops the saved IP and steps past the CALL that pushed
/// it.
pub(crate) fn execute_ret_near<M: MemoryBus>(cpu: &mut CPU<M>) {
    let ret = cpu.pop_word();
    cpu.ip = ret.wrapping_add(3);
}

/// HLT (0xF4): raises the halt flag. IP stays on the HLT opcode; only
/// a reset resumes execution.
pub(crate) fn execute_halt<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.halted = true;
}
