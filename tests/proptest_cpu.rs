//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to verify that fundamental invariants hold
//! across all possible input combinations: byte-pair aliasing, stack
//! round trips, immediate loads, and the no-state-change guarantee of
//! faulting steps.

use lib8086::{FlatMemory, MemoryBus, Reg16, Reg8, CPU, OPCODE_TABLE};
use proptest::prelude::*;

fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

/// Opcode bytes with no handler: both the unassigned ones and the
/// recognized-but-unimplemented ones fault without state change.
fn faulting_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| m.handler.is_none())
        .map(|(i, _)| i as u8)
        .collect()
}

proptest! {
    #[test]
    fn prop_word_view_recomposes_byte_halves(value in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::AX, value);

        prop_assert_eq!(cpu.reg8(Reg8::AH), (value >> 8) as u8);
        prop_assert_eq!(cpu.reg8(Reg8::AL), value as u8);
        prop_assert_eq!(
            ((cpu.reg8(Reg8::AH) as u16) << 8) | cpu.reg8(Reg8::AL) as u16,
            value
        );
    }

    #[test]
    fn prop_byte_write_never_disturbs_sibling(word in any::<u16>(), byte in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::DX, word);

        cpu.set_reg8(Reg8::DL, byte);

        prop_assert_eq!(cpu.reg8(Reg8::DH), (word >> 8) as u8);
        prop_assert_eq!(cpu.reg16(Reg16::DX), (word & 0xFF00) | byte as u16);
    }

    #[test]
    fn prop_mov_imm16_round_trips(value in any::<u16>()) {
        let mut cpu = setup_cpu();

        // MOV BX, value (0xBB low high)
        cpu.load(0x0000, &[0xBB, value as u8, (value >> 8) as u8]);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.reg16(Reg16::BX), value);
        prop_assert_eq!(cpu.ip(), 3);
    }

    #[test]
    fn prop_push_pop_round_trips(value in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::AX, value);

        // PUSH AX; POP DX
        cpu.load(0x0000, &[0x50, 0x5A]);
        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.reg16(Reg16::DX), value);
        prop_assert_eq!(cpu.reg16(Reg16::SP), 0x0100);
    }

    #[test]
    fn prop_inc_then_dec_is_identity(value in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::SI, value);

        // INC SI; DEC SI
        cpu.load(0x0000, &[0x46, 0x4E]);
        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.reg16(Reg16::SI), value);
        prop_assert_eq!(cpu.ip(), 2);
    }

    #[test]
    fn prop_memory_word_access_is_little_endian(addr in 0u32..0xF_FFFE, value in any::<u16>()) {
        let mut mem = FlatMemory::new();
        mem.write_word(addr, value);

        prop_assert_eq!(mem.read(addr), value as u8);
        prop_assert_eq!(mem.read(addr + 1), (value >> 8) as u8);
        prop_assert_eq!(mem.read_word(addr), value);
    }

    #[test]
    fn prop_faulting_step_changes_nothing(
        idx in 0usize..256,
        ax in any::<u16>(),
        flags_extra in any::<u16>(),
    ) {
        let opcodes = faulting_opcodes();
        let opcode = opcodes[idx % opcodes.len()];

        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::AX, ax);
        cpu.set_flags(cpu.flags() | (flags_extra & 0x0FD5));
        cpu.load(0x0000, &[opcode, 0x00, 0x00, 0x00]);

        let before = cpu.snapshot();
        prop_assert!(cpu.step().is_err());
        prop_assert_eq!(cpu.snapshot(), before);
        prop_assert!(!cpu.halted());
    }

    #[test]
    fn prop_xor_self_always_zeroes(value in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::AX, value);

        // XOR AX, AX
        cpu.load(0x0000, &[0x31, 0xC0]);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.reg16(Reg16::AX), 0);
        prop_assert!(cpu.flag_zf());
    }

    #[test]
    fn prop_xor_is_an_involution(value in any::<u16>(), key in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.set_reg16(Reg16::AX, value);
        cpu.set_reg16(Reg16::CX, key);

        // XOR AX, CX twice restores AX
        cpu.load(0x0000, &[0x31, 0xC8, 0x31, 0xC8]);
        cpu.step().unwrap();
        prop_assert_eq!(cpu.reg16(Reg16::AX), value ^ key);
        cpu.step().unwrap();
        prop_assert_eq!(cpu.reg16(Reg16::AX), value);
    }
}
