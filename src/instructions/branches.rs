//! # Conditional Jump Instructions
//!
//! The sixteen short conditional jumps (0x70-0x7F). Each tests a flag
//! predicate; when it holds, the signed 8-bit displacement is added to
//! the address of the next instruction, otherwise IP just moves past
//! the two instruction bytes.

use crate::cpu::CPU;
use crate::flags::{CARRY, OVERFLOW, PARITY, SIGN, ZERO};
use crate::memory::MemoryBus;
use crate::opcodes::Condition;

/// Tests a branch condition against the FLAGS word.
///
/// The signed conditions compose sign and overflow: "less" means the
/// two disagree, because a subtraction that overflowed reports the
/// wrong sign.
fn taken(flags: u16, cond: Condition) -> bool {
    let cf = flags & CARRY != 0;
    let pf = flags & PARITY != 0;
    let zf = flags & ZERO != 0;
    let sf = flags & SIGN != 0;
    let of = flags & OVERFLOW != 0;

    match cond {
        Condition::Overflow => of,
        Condition::NotOverflow => !of,
        Condition::Below => cf,
        Condition::NotBelow => !cf,
        Condition::Zero => zf,
        Condition::NotZero => !zf,
        Condition::BelowOrEqual => cf || zf,
        Condition::Above => !cf && !zf,
        Condition::Sign => sf,
        Condition::NotSign => !sf,
        Condition::Parity => pf,
        Condition::NotParity => !pf,
        Condition::Less => sf != of,
        Condition::GreaterOrEqual => sf == of,
        Condition::LessOrEqual => zf || sf != of,
        Condition::Greater => !zf && sf == of,
    }
}

/// Executes one of the 0x70-0x7F conditional short jumps.
pub(crate) fn execute_jump<M: MemoryBus>(cpu: &mut CPU<M>, cond: Condition) {
    if taken(cpu.flags, cond) {
        let disp = cpu.fetch8(1) as i8;
        cpu.ip = cpu.ip.wrapping_add(2).wrapping_add_signed(disp as i16);
    } else {
        cpu.ip = cpu.ip.wrapping_add(2);
    }
}
