//! Comprehensive tests for the stack instructions.
//!
//! Tests cover:
//! - PUSH/POP of general registers (0x50-0x5F)
//! - PUSH/POP of segment registers
//! - SP movement and the downward-growing stack
//! - LIFO ordering
//! - Zeroing of vacated stack slots on pop

use lib8086::{FlatMemory, MemoryBus, Reg16, SegReg, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

#[test]
fn test_push_moves_sp_down_and_writes_word() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::AX, 0x1234);

    // PUSH AX (0x50)
    cpu.load(0x0000, &[0x50]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::SP), 0x00FE);
    assert_eq!(cpu.memory().read_word(0x00FE), 0x1234);
    assert_eq!(cpu.ip(), 0x0001);
}

#[test]
fn test_pop_restores_value_and_sp() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::AX, 0xBEEF);

    // PUSH AX; POP CX (0x50 0x59)
    cpu.load(0x0000, &[0x50, 0x59]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::CX), 0xBEEF);
    assert_eq!(cpu.reg16(Reg16::SP), 0x0100);
}

#[test]
fn test_pop_zeroes_vacated_slot() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::DX, 0xCAFE);

    // PUSH DX; POP BX (0x52 0x5B)
    cpu.load(0x0000, &[0x52, 0x5B]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::BX), 0xCAFE);
    // The slot below SP reads back as zero
    assert_eq!(cpu.memory().read_word(0x00FE), 0x0000);
}

#[test]
fn test_lifo_ordering() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::AX, 0x1111);
    cpu.set_reg16(Reg16::BX, 0x2222);

    // PUSH AX; PUSH BX; POP CX; POP DX
    cpu.load(0x0000, &[0x50, 0x53, 0x59, 0x5A]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    // Last in, first out
    assert_eq!(cpu.reg16(Reg16::CX), 0x2222);
    assert_eq!(cpu.reg16(Reg16::DX), 0x1111);
    assert_eq!(cpu.reg16(Reg16::SP), 0x0100);
}

#[test]
fn test_push_pop_segment_registers() {
    let mut cpu = setup_cpu();
    cpu.set_seg(SegReg::DS, 0x1000);

    // PUSH DS; POP ES (0x1E 0x07)
    cpu.load(0x0000, &[0x1E, 0x07]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.seg(SegReg::ES), 0x1000);
    assert_eq!(cpu.reg16(Reg16::SP), 0x0100);
    assert_eq!(cpu.ip(), 0x0002);
}

#[test]
fn test_stack_uses_stack_segment() {
    let mut cpu = setup_cpu();
    cpu.set_seg(SegReg::SS, 0x2000);
    cpu.set_reg16(Reg16::AX, 0x5555);

    // PUSH AX with SS = 0x2000: the word lands at 0x20000 + SP - 2
    cpu.load(0x0000, &[0x50]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read_word(0x200FE), 0x5555);
}
