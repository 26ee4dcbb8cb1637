//! # Register Identifiers and State Snapshot
//!
//! This module defines the identifiers used to address the 8086 register
//! file and the read-only [`RegisterSnapshot`] exported to display and
//! debugger collaborators.
//!
//! The enum discriminants follow the hardware encoding tables: the 3-bit
//! reg field of an addressing byte indexes [`Reg8`] for byte-width
//! operations and [`Reg16`] for word-width operations, in exactly the
//! declared order.

/// 8-bit register identifiers, in hardware table order.
///
/// The 3-bit reg field of an addressing byte selects these when the
/// operand-width bit is 0: AL, CL, DL, BL, AH, CH, DH, BH.
///
/// Each of AH/AL, BH/BL, CH/CL, DH/DL is one half of a 16-bit register;
/// writing a half never disturbs its sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
}

impl Reg8 {
    /// Resolves a 3-bit register-field value to its byte register.
    ///
    /// Shared by the reg-field path and the register-direct (mode 3)
    /// r/m-field path, which reinterprets the r/m bits through this same
    /// table.
    pub fn from_index(index: u8) -> Reg8 {
        match index & 0x07 {
            0 => Reg8::AL,
            1 => Reg8::CL,
            2 => Reg8::DL,
            3 => Reg8::BL,
            4 => Reg8::AH,
            5 => Reg8::CH,
            6 => Reg8::DH,
            _ => Reg8::BH,
        }
    }
}

/// 16-bit register identifiers, in hardware table order.
///
/// The 3-bit reg field of an addressing byte selects these when the
/// operand-width bit is 1: AX, CX, DX, BX, SP, BP, SI, DI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
}

impl Reg16 {
    /// Resolves a 3-bit register-field value to its word register.
    pub fn from_index(index: u8) -> Reg16 {
        match index & 0x07 {
            0 => Reg16::AX,
            1 => Reg16::CX,
            2 => Reg16::DX,
            3 => Reg16::BX,
            4 => Reg16::SP,
            5 => Reg16::BP,
            6 => Reg16::SI,
            _ => Reg16::DI,
        }
    }
}

/// Segment register identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegReg {
    CS,
    DS,
    ES,
    SS,
}

/// A read-only copy of every register and the flags word.
///
/// This is the sole state-export contract the emulator core owes the
/// outside world: a display or debugger collaborator takes a snapshot
/// after stepping and renders it however it likes. The byte-paired
/// general registers appear both as their halves and as the derived
/// word view (`ax == (ah << 8) | al`).
///
/// With the `serde` feature enabled the snapshot is `Serialize`, so
/// front-ends can ship it across a process or wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterSnapshot {
    pub ax: u16,
    pub ah: u8,
    pub al: u8,
    pub bx: u16,
    pub bh: u8,
    pub bl: u8,
    pub cx: u16,
    pub ch: u8,
    pub cl: u8,
    pub dx: u16,
    pub dh: u8,
    pub dl: u8,
    pub si: u16,
    pub di: u16,
    pub bp: u16,
    pub sp: u16,
    pub cs: u16,
    pub ds: u16,
    pub es: u16,
    pub ss: u16,
    pub ip: u16,
    pub flags: u16,
}
