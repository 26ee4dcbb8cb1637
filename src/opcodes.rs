//! # Opcode Metadata and Dispatch Table
//!
//! This module contains the single source of truth for the primary
//! opcode map: a 256-entry table indexed directly by the opcode byte.
//! Each entry carries the instruction's mnemonic and, where the
//! instruction is implemented, the [`Handler`] that executes it.
//!
//! Three kinds of entry exist:
//!
//! - implemented: mnemonic plus a handler
//! - recognized but unimplemented: mnemonic only, reported as
//!   [`UnimplementedOpcode`](crate::ExecutionError::UnimplementedOpcode)
//! - unassigned on the 8086: mnemonic `"???"`, reported as
//!   [`UnknownOpcode`](crate::ExecutionError::UnknownOpcode)
//!
//! Handlers are data, not function pointers: the step loop matches on
//! the [`Handler`] value and calls into the `instructions` modules. That
//! keeps every register-specific single-byte opcode (INC AX, PUSH SI,
//! MOV CL) a one-line table entry instead of its own function.

use crate::flags;
use crate::registers::{Reg16, Reg8, SegReg};

/// Branch condition of the 0x70-0x7F conditional jump family.
///
/// Variants appear in opcode order, so `0x70 + n` carries the `n`-th
/// condition. The signed comparisons (Less, Greater and friends) combine
/// the sign and overflow flags; the unsigned ones (Below, Above) use
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Overflow,
    NotOverflow,
    Below,
    NotBelow,
    Zero,
    NotZero,
    BelowOrEqual,
    Above,
    Sign,
    NotSign,
    Parity,
    NotParity,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
}

/// Execution strategy for an implemented opcode.
///
/// Register-specific opcodes carry their register in the variant, so
/// the whole INC/DEC/PUSH/POP/MOV-immediate families share one handler
/// each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// MOV r8, imm8 (0xB0-0xB7)
    MovImmReg8(Reg8),
    /// MOV r16, imm16 (0xB8-0xBF)
    MovImmReg16(Reg16),
    /// MOV r/m, reg (0x88, 0x89)
    MovStore,
    /// MOV reg, r/m (0x8A, 0x8B)
    MovLoad,
    /// XOR r/m and reg in either direction (0x30-0x33)
    XorRm,
    /// XOR AL/AX, imm (0x34, 0x35)
    XorAccImm,
    /// Immediate-group arithmetic, sub-operation in the reg field
    /// (0x80-0x83)
    Group1,
    /// INC r16 (0x40-0x47)
    IncReg(Reg16),
    /// DEC r16 (0x48-0x4F)
    DecReg(Reg16),
    /// Conditional short jump (0x70-0x7F)
    Jump(Condition),
    /// CALL rel16 (0xE8)
    CallNear,
    /// RET within segment (0xC3)
    RetNear,
    /// HLT (0xF4)
    Halt,
    /// PUSH r16 (0x50-0x57)
    PushReg(Reg16),
    /// PUSH segment register (0x06, 0x0E, 0x16, 0x1E)
    PushSeg(SegReg),
    /// POP r16 (0x58-0x5F)
    PopReg(Reg16),
    /// POP segment register (0x07, 0x17, 0x1F)
    PopSeg(SegReg),
    /// Clear a flag bit (CLC, CLI, CLD)
    ClearFlag(u16),
    /// Set a flag bit (STC, STI, STD)
    SetFlag(u16),
}

/// Static metadata for one opcode byte.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeMetadata {
    /// Assembler mnemonic with operand shorthand, `"???"` when the byte
    /// is unassigned.
    pub mnemonic: &'static str,
    /// Execution strategy, `None` when unimplemented or unassigned.
    pub handler: Option<Handler>,
}

const fn op(mnemonic: &'static str, handler: Handler) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        handler: Some(handler),
    }
}

const fn stub(mnemonic: &'static str) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        handler: None,
    }
}

const fn illegal() -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: "???",
        handler: None,
    }
}

/// The primary opcode map, indexed by the opcode byte.
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00 - 0x0F
    stub("ADD Eb Gb"),
    stub("ADD Ev Gv"),
    stub("ADD Gb Eb"),
    stub("ADD Gv Ev"),
    stub("ADD AL Ib"),
    stub("ADD eAX Iv"),
    op("PUSH ES", Handler::PushSeg(SegReg::ES)),
    op("POP ES", Handler::PopSeg(SegReg::ES)),
    stub("OR Eb Gb"),
    stub("OR Ev Gv"),
    stub("OR Gb Eb"),
    stub("OR Gv Ev"),
    stub("OR AL Ib"),
    stub("OR eAX Iv"),
    op("PUSH CS", Handler::PushSeg(SegReg::CS)),
    illegal(),
    // 0x10 - 0x1F
    stub("ADC Eb Gb"),
    stub("ADC Ev Gv"),
    stub("ADC Gb Eb"),
    stub("ADC Gv Ev"),
    stub("ADC AL Ib"),
    stub("ADC eAX Iv"),
    op("PUSH SS", Handler::PushSeg(SegReg::SS)),
    op("POP SS", Handler::PopSeg(SegReg::SS)),
    stub("SBB Eb Gb"),
    stub("SBB Ev Gv"),
    stub("SBB Gb Eb"),
    stub("SBB Gv Ev"),
    stub("SBB AL Ib"),
    stub("SBB eAX Iv"),
    op("PUSH DS", Handler::PushSeg(SegReg::DS)),
    op("POP DS", Handler::PopSeg(SegReg::DS)),
    // 0x20 - 0x2F
    stub("AND Eb Gb"),
    stub("AND Ev Gv"),
    stub("AND Gb Eb"),
    stub("AND Gv Ev"),
    stub("AND AL Ib"),
    stub("AND eAX Iv"),
    stub("ES:"),
    stub("DAA"),
    stub("SUB Eb Gb"),
    stub("SUB Ev Gv"),
    stub("SUB Gb Eb"),
    stub("SUB Gv Ev"),
    stub("SUB AL Ib"),
    stub("SUB eAX Iv"),
    stub("CS:"),
    stub("DAS"),
    // 0x30 - 0x3F
    op("XOR Eb Gb", Handler::XorRm),
    op("XOR Ev Gv", Handler::XorRm),
    op("XOR Gb Eb", Handler::XorRm),
    op("XOR Gv Ev", Handler::XorRm),
    op("XOR AL Ib", Handler::XorAccImm),
    op("XOR eAX Iv", Handler::XorAccImm),
    stub("SS:"),
    stub("AAA"),
    stub("CMP Eb Gb"),
    stub("CMP Ev Gv"),
    stub("CMP Gb Eb"),
    stub("CMP Gv Ev"),
    stub("CMP AL Ib"),
    stub("CMP eAX Iv"),
    stub("DS:"),
    stub("AAS"),
    // 0x40 - 0x4F
    op("INC eAX", Handler::IncReg(Reg16::AX)),
    op("INC eCX", Handler::IncReg(Reg16::CX)),
    op("INC eDX", Handler::IncReg(Reg16::DX)),
    op("INC eBX", Handler::IncReg(Reg16::BX)),
    op("INC eSP", Handler::IncReg(Reg16::SP)),
    op("INC eBP", Handler::IncReg(Reg16::BP)),
    op("INC eSI", Handler::IncReg(Reg16::SI)),
    op("INC eDI", Handler::IncReg(Reg16::DI)),
    op("DEC eAX", Handler::DecReg(Reg16::AX)),
    op("DEC eCX", Handler::DecReg(Reg16::CX)),
    op("DEC eDX", Handler::DecReg(Reg16::DX)),
    op("DEC eBX", Handler::DecReg(Reg16::BX)),
    op("DEC eSP", Handler::DecReg(Reg16::SP)),
    op("DEC eBP", Handler::DecReg(Reg16::BP)),
    op("DEC eSI", Handler::DecReg(Reg16::SI)),
    op("DEC eDI", Handler::DecReg(Reg16::DI)),
    // 0x50 - 0x5F
    op("PUSH eAX", Handler::PushReg(Reg16::AX)),
    op("PUSH eCX", Handler::PushReg(Reg16::CX)),
    op("PUSH eDX", Handler::PushReg(Reg16::DX)),
    op("PUSH eBX", Handler::PushReg(Reg16::BX)),
    op("PUSH eSP", Handler::PushReg(Reg16::SP)),
    op("PUSH eBP", Handler::PushReg(Reg16::BP)),
    op("PUSH eSI", Handler::PushReg(Reg16::SI)),
    op("PUSH eDI", Handler::PushReg(Reg16::DI)),
    op("POP eAX", Handler::PopReg(Reg16::AX)),
    op("POP eCX", Handler::PopReg(Reg16::CX)),
    op("POP eDX", Handler::PopReg(Reg16::DX)),
    op("POP eBX", Handler::PopReg(Reg16::BX)),
    op("POP eSP", Handler::PopReg(Reg16::SP)),
    op("POP eBP", Handler::PopReg(Reg16::BP)),
    op("POP eSI", Handler::PopReg(Reg16::SI)),
    op("POP eDI", Handler::PopReg(Reg16::DI)),
    // 0x60 - 0x6F: unassigned on the 8086
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    // 0x70 - 0x7F
    op("JO Jb", Handler::Jump(Condition::Overflow)),
    op("JNO Jb", Handler::Jump(Condition::NotOverflow)),
    op("JB Jb", Handler::Jump(Condition::Below)),
    op("JNB Jb", Handler::Jump(Condition::NotBelow)),
    op("JZ Jb", Handler::Jump(Condition::Zero)),
    op("JNZ Jb", Handler::Jump(Condition::NotZero)),
    op("JBE Jb", Handler::Jump(Condition::BelowOrEqual)),
    op("JA Jb", Handler::Jump(Condition::Above)),
    op("JS Jb", Handler::Jump(Condition::Sign)),
    op("JNS Jb", Handler::Jump(Condition::NotSign)),
    op("JPE Jb", Handler::Jump(Condition::Parity)),
    op("JPO Jb", Handler::Jump(Condition::NotParity)),
    op("JL Jb", Handler::Jump(Condition::Less)),
    op("JGE Jb", Handler::Jump(Condition::GreaterOrEqual)),
    op("JLE Jb", Handler::Jump(Condition::LessOrEqual)),
    op("JG Jb", Handler::Jump(Condition::Greater)),
    // 0x80 - 0x8F
    op("GRP1 Eb Ib", Handler::Group1),
    op("GRP1 Ev Iv", Handler::Group1),
    op("GRP1 Eb Ib", Handler::Group1),
    op("GRP1 Ev Ib", Handler::Group1),
    stub("TEST Gb Eb"),
    stub("TEST Gv Ev"),
    stub("XCHG Gb Eb"),
    stub("XCHG Gv Ev"),
    op("MOV Eb Gb", Handler::MovStore),
    op("MOV Ev Gv", Handler::MovStore),
    op("MOV Gb Eb", Handler::MovLoad),
    op("MOV Gv Ev", Handler::MovLoad),
    stub("MOV Ew Sw"),
    stub("LEA Gv M"),
    stub("MOV Sw Ew"),
    stub("POP Ev"),
    // 0x90 - 0x9F
    stub("NOP"),
    stub("XCHG eCX eAX"),
    stub("XCHG eDX eAX"),
    stub("XCHG eBX eAX"),
    stub("XCHG eSP eAX"),
    stub("XCHG eBP eAX"),
    stub("XCHG eSI eAX"),
    stub("XCHG eDI eAX"),
    stub("CBW"),
    stub("CWD"),
    stub("CALL Ap"),
    stub("WAIT"),
    stub("PUSHF"),
    stub("POPF"),
    stub("SAHF"),
    stub("LAHF"),
    // 0xA0 - 0xAF
    stub("MOV AL Ob"),
    stub("MOV eAX Ov"),
    stub("MOV Ob AL"),
    stub("MOV Ov eAX"),
    stub("MOVSB"),
    stub("MOVSW"),
    stub("CMPSB"),
    stub("CMPSW"),
    stub("TEST AL Ib"),
    stub("TEST eAX Iv"),
    stub("STOSB"),
    stub("STOSW"),
    stub("LODSB"),
    stub("LODSW"),
    stub("SCASB"),
    stub("SCASW"),
    // 0xB0 - 0xBF
    op("MOV AL Ib", Handler::MovImmReg8(Reg8::AL)),
    op("MOV CL Ib", Handler::MovImmReg8(Reg8::CL)),
    op("MOV DL Ib", Handler::MovImmReg8(Reg8::DL)),
    op("MOV BL Ib", Handler::MovImmReg8(Reg8::BL)),
    op("MOV AH Ib", Handler::MovImmReg8(Reg8::AH)),
    op("MOV CH Ib", Handler::MovImmReg8(Reg8::CH)),
    op("MOV DH Ib", Handler::MovImmReg8(Reg8::DH)),
    op("MOV BH Ib", Handler::MovImmReg8(Reg8::BH)),
    op("MOV eAX Iv", Handler::MovImmReg16(Reg16::AX)),
    op("MOV eCX Iv", Handler::MovImmReg16(Reg16::CX)),
    op("MOV eDX Iv", Handler::MovImmReg16(Reg16::DX)),
    op("MOV eBX Iv", Handler::MovImmReg16(Reg16::BX)),
    op("MOV eSP Iv", Handler::MovImmReg16(Reg16::SP)),
    op("MOV eBP Iv", Handler::MovImmReg16(Reg16::BP)),
    op("MOV eSI Iv", Handler::MovImmReg16(Reg16::SI)),
    op("MOV eDI Iv", Handler::MovImmReg16(Reg16::DI)),
    // 0xC0 - 0xCF
    illegal(),
    illegal(),
    stub("RET Iw"),
    op("RET", Handler::RetNear),
    stub("LES Gv Mp"),
    stub("LDS Gv Mp"),
    stub("MOV Eb Ib"),
    stub("MOV Ev Iv"),
    illegal(),
    illegal(),
    stub("RETF Iw"),
    stub("RETF"),
    stub("INT 3"),
    stub("INT Ib"),
    stub("INTO"),
    stub("IRET"),
    // 0xD0 - 0xDF
    stub("GRP2 Eb 1"),
    stub("GRP2 Ev 1"),
    stub("GRP2 Eb CL"),
    stub("GRP2 Ev CL"),
    stub("AAM I0"),
    stub("AAD I0"),
    illegal(),
    stub("XLAT"),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    illegal(),
    // 0xE0 - 0xEF
    stub("LOOPNZ Jb"),
    stub("LOOPZ Jb"),
    stub("LOOP Jb"),
    stub("JCXZ Jb"),
    stub("IN AL Ib"),
    stub("IN eAX Ib"),
    stub("OUT Ib AL"),
    stub("OUT Ib eAX"),
    op("CALL Jv", Handler::CallNear),
    stub("JMP Jv"),
    stub("JMP Ap"),
    stub("JMP Jb"),
    stub("IN AL DX"),
    stub("IN eAX DX"),
    stub("OUT DX AL"),
    stub("OUT DX eAX"),
    // 0xF0 - 0xFF
    stub("LOCK"),
    illegal(),
    stub("REPNZ"),
    stub("REPZ"),
    op("HLT", Handler::Halt),
    stub("CMC"),
    stub("GRP3a Eb"),
    stub("GRP3b Ev"),
    op("CLC", Handler::ClearFlag(flags::CARRY)),
    op("STC", Handler::SetFlag(flags::CARRY)),
    op("CLI", Handler::ClearFlag(flags::INTERRUPT)),
    op("STI", Handler::SetFlag(flags::INTERRUPT)),
    op("CLD", Handler::ClearFlag(flags::DIRECTION)),
    op("STD", Handler::SetFlag(flags::DIRECTION)),
    stub("GRP4 Eb"),
    stub("GRP5 Ev"),
];
