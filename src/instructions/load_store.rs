//! # Data Movement Instructions
//!
//! MOV in its immediate-to-register forms (0xB0-0xBF) and its
//! register/memory forms (0x88-0x8B). MOV never touches flags.

use crate::addressing::Instruction;
use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::registers::{Reg16, Reg8};

/// MOV r8, imm8 (0xB0-0xB7): loads an immediate byte into the register
/// encoded in the opcode.
pub(crate) fn execute_mov_imm_reg8<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg8) {
    let value = cpu.fetch8(1);
    cpu.set_reg8(reg, value);
    cpu.ip = cpu.ip.wrapping_add(2);
}

/// MOV r16, imm16 (0xB8-0xBF): loads a little-endian immediate word
/// into the register encoded in the opcode.
pub(crate) fn execute_mov_imm_reg16<M: MemoryBus>(cpu: &mut CPU<M>, reg: Reg16) {
    let value = cpu.fetch16(1);
    cpu.set_reg16(reg, value);
    cpu.ip = cpu.ip.wrapping_add(3);
}

/// MOV r/m, reg (0x88 byte, 0x89 word): the reg field is the source,
/// the resolved r/m operand the destination.
pub(crate) fn execute_mov_store<M: MemoryBus>(cpu: &mut CPU<M>, inst: &Instruction) {
    let (operand, disp_len) = cpu.resolve_rm(inst);
    let value = cpu.read_reg(inst.width, inst.reg);
    cpu.write_operand(inst.width, operand, value);
    cpu.ip = cpu.ip.wrapping_add(2 + disp_len);
}

/// MOV reg, r/m (0x8A byte, 0x8B word): the resolved r/m operand is the
/// source, the reg field the destination.
pub(crate) fn execute_mov_load<M: MemoryBus>(cpu: &mut CPU<M>, inst: &Instruction) {
    let (operand, disp_len) = cpu.resolve_rm(inst);
    let value = cpu.read_operand(inst.width, operand);
    cpu.write_reg(inst.width, inst.reg, value);
    cpu.ip = cpu.ip.wrapping_add(2 + disp_len);
}
