//! # Status Flags
//!
//! Bit masks for the nine meaningful flags of the 8086 FLAGS word, and
//! the flag evaluator used by the arithmetic/logical instruction
//! handlers.
//!
//! FLAGS bit layout:
//!
//! ```text
//! MASK    BIT  FLAG  NAME
//! 0x0001  0    CF    Carry
//! 0x0004  2    PF    Parity
//! 0x0010  4    AF    Adjust
//! 0x0040  6    ZF    Zero
//! 0x0080  7    SF    Sign
//! 0x0100  8    TF    Trap (single step)
//! 0x0200  9    IF    Interrupt enable
//! 0x0400  10   DF    Direction
//! 0x0800  11   OF    Overflow
//! ```
//!
//! The remaining bits are reserved and never touched by instruction
//! logic; the reset value 0xF000 keeps the high reserved bits set the way
//! the hardware reports them.

use crate::addressing::Width;
use crate::cpu::CPU;
use crate::memory::MemoryBus;

/// Carry flag (CF).
pub const CARRY: u16 = 0x0001;
/// Parity flag (PF).
pub const PARITY: u16 = 0x0004;
/// Adjust flag (AF).
pub const ADJUST: u16 = 0x0010;
/// Zero flag (ZF).
pub const ZERO: u16 = 0x0040;
/// Sign flag (SF).
pub const SIGN: u16 = 0x0080;
/// Trap flag (TF).
pub const TRAP: u16 = 0x0100;
/// Interrupt-enable flag (IF).
pub const INTERRUPT: u16 = 0x0200;
/// Direction flag (DF).
pub const DIRECTION: u16 = 0x0400;
/// Overflow flag (OF).
pub const OVERFLOW: u16 = 0x0800;

impl<M: MemoryBus> CPU<M> {
    /// Evaluates status flags from an operation's operands and result.
    ///
    /// Only the flags named in `mask` are evaluated and written; every
    /// other bit of FLAGS is left untouched. Operands and result are
    /// passed as `i32` because a subtraction-class result may be negative
    /// and the sign rule depends on the signed value, not a truncated
    /// bit pattern.
    ///
    /// Semantics per flag:
    ///
    /// - **Carry**: set when `op1 < op2`. This is a borrow-style
    ///   comparison valid for subtraction-class operations; callers must
    ///   not request Carry for operations where it is not meaningful
    ///   (logical instructions clear CF directly instead).
    /// - **Parity**: set from the least-significant bit of the result.
    ///   This is a deliberate simplification of the 8086's
    ///   population-count parity, preserved as documented behavior.
    /// - **Adjust**: set when the low nibble of `op1` is less than the
    ///   low nibble of `op2`.
    /// - **Zero**: set when the result is zero.
    /// - **Sign**: set when the result is negative.
    /// - **Trap / Interrupt / Direction**: write-only set when masked.
    ///   Clearing these is the job of the dedicated clear instructions
    ///   (CLI, CLD), never of this routine.
    /// - **Overflow**: set when the operands' sign bits agree with each
    ///   other and disagree with the result's sign bit, at bit 7 for
    ///   byte width or bit 15 for word width.
    pub(crate) fn update_flags(&mut self, op1: i32, op2: i32, result: i32, mask: u16, width: Width) {
        if mask & CARRY != 0 {
            if op1 < op2 {
                self.flags |= CARRY;
            } else {
                self.flags &= !CARRY;
            }
        }

        if mask & PARITY != 0 {
            if result & 0x01 != 0 {
                self.flags |= PARITY;
            } else {
                self.flags &= !PARITY;
            }
        }

        if mask & ADJUST != 0 {
            if (op1 & 0x0F) < (op2 & 0x0F) {
                self.flags |= ADJUST;
            } else {
                self.flags &= !ADJUST;
            }
        }

        if mask & ZERO != 0 {
            if result == 0 {
                self.flags |= ZERO;
            } else {
                self.flags &= !ZERO;
            }
        }

        if mask & SIGN != 0 {
            if result < 0 {
                self.flags |= SIGN;
            } else {
                self.flags &= !SIGN;
            }
        }

        if mask & TRAP != 0 {
            self.flags |= TRAP;
        }

        if mask & INTERRUPT != 0 {
            self.flags |= INTERRUPT;
        }

        if mask & DIRECTION != 0 {
            self.flags |= DIRECTION;
        }

        if mask & OVERFLOW != 0 {
            let shift = match width {
                Width::Byte => 7,
                Width::Word => 15,
            };
            let sign1 = (op1 >> shift) & 1;
            let sign2 = (op2 >> shift) & 1;
            let sign_r = (result >> shift) & 1;

            if sign1 == sign2 && sign1 != sign_r {
                self.flags |= OVERFLOW;
            } else {
                self.flags &= !OVERFLOW;
            }
        }
    }
}
