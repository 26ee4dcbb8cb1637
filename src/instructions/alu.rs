//! # Arithmetic and Logical Instructions
//!
//! XOR in its register/memory (0x30-0x33) and accumulator-immediate
//! (0x34, 0x35) forms, and the immediate group 0x80-0x83 whose reg
//! field selects the operation. Of the group, CMP is implemented; the
//! other sub-operations report themselves through the error channel
//! without touching state.

use crate::addressing::{Instruction, Width};
use crate::cpu::CPU;
use crate::flags::{ADJUST, CARRY, OVERFLOW, PARITY, SIGN, ZERO};
use crate::memory::MemoryBus;
use crate::ExecutionError;

/// Sign-extends a result to the evaluator's signed domain so the sign
/// rule sees the operand's top bit.
fn signed(width: Width, value: u16) -> i32 {
    match width {
        Width::Byte => value as u8 as i8 as i32,
        Width::Word => value as i16 as i32,
    }
}

fn xor_flags<M: MemoryBus>(cpu: &mut CPU<M>, result: u16, width: Width) {
    // Logical operations always clear carry and overflow
    cpu.flags &= !(CARRY | OVERFLOW);
    cpu.update_flags(0, 0, signed(width, result), PARITY | SIGN | ZERO, width);
}

/// XOR between a register and an r/m operand (0x30-0x33). The direction
/// bit picks which side receives the result.
pub(crate) fn execute_xor_rm<M: MemoryBus>(cpu: &mut CPU<M>, inst: &Instruction) {
    let (operand, disp_len) = cpu.resolve_rm(inst);
    let rm_value = cpu.read_operand(inst.width, operand);
    let reg_value = cpu.read_reg(inst.width, inst.reg);
    let result = rm_value ^ reg_value;

    if inst.direction {
        cpu.write_reg(inst.width, inst.reg, result);
    } else {
        cpu.write_operand(inst.width, operand, result);
    }

    xor_flags(cpu, result, inst.width);
    cpu.ip = cpu.ip.wrapping_add(2 + disp_len);
}

/// XOR AL, imm8 (0x34) and XOR AX, imm16 (0x35).
pub(crate) fn execute_xor_acc_imm<M: MemoryBus>(cpu: &mut CPU<M>, inst: &Instruction) {
    match inst.width {
        Width::Byte => {
            let result = cpu.al ^ cpu.fetch8(1);
            cpu.al = result;
            xor_flags(cpu, result as u16, Width::Byte);
            cpu.ip = cpu.ip.wrapping_add(2);
        }
        Width::Word => {
            let acc = ((cpu.ah as u16) << 8) | cpu.al as u16;
            let result = acc ^ cpu.fetch16(1);
            cpu.ah = (result >> 8) as u8;
            cpu.al = result as u8;
            xor_flags(cpu, result, Width::Word);
            cpu.ip = cpu.ip.wrapping_add(3);
        }
    }
}

/// The immediate group (0x80-0x83): the addressing byte's reg field
/// selects the operation, the r/m side is the destination, and the
/// immediate follows any displacement bytes.
///
/// Immediate widths per opcode: 0x80 and 0x82 take an 8-bit immediate,
/// 0x81 a 16-bit one, and 0x83 an 8-bit immediate sign-extended to 16
/// bits.
///
/// Only CMP (sub-operation 7) is implemented. CMP subtracts the
/// immediate from the destination, evaluates the full arithmetic flag
/// set, and discards the difference.
pub(crate) fn execute_group1<M: MemoryBus>(
    cpu: &mut CPU<M>,
    inst: &Instruction,
) -> Result<(), ExecutionError> {
    let (operand, disp_len) = cpu.resolve_rm(inst);
    let imm_offset = 2 + disp_len;

    let (imm, imm_len) = match inst.opcode {
        0x81 => (cpu.fetch16(imm_offset), 2),
        0x83 => (cpu.fetch8(imm_offset) as i8 as i16 as u16, 1),
        _ => (cpu.fetch8(imm_offset) as u16, 1),
    };

    match inst.reg {
        7 => {
            let dst = cpu.read_operand(inst.width, operand);
            let result = dst as i32 - imm as i32;
            cpu.update_flags(
                dst as i32,
                imm as i32,
                result,
                CARRY | PARITY | ADJUST | ZERO | SIGN | OVERFLOW,
                inst.width,
            );
            cpu.ip = cpu.ip.wrapping_add(imm_offset + imm_len);
            Ok(())
        }
        op => Err(ExecutionError::UnimplementedGroupOp {
            opcode: inst.opcode,
            op,
        }),
    }
}
