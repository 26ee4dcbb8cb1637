//! Comprehensive tests for the MOV instruction family.
//!
//! Tests cover:
//! - Immediate-to-register forms, byte (0xB0-0xB7) and word (0xB8-0xBF)
//! - Register/memory forms in both directions (0x88-0x8B)
//! - Byte-pair aliasing of the general registers
//! - Instruction lengths, including displacement bytes
//! - MOV never modifies flags

use lib8086::{FlatMemory, MemoryBus, Reg16, Reg8, CPU};

/// Helper function to create a CPU over zeroed memory, executing at
/// 0000:0000.
fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

// ========== Immediate Forms ==========

#[test]
fn test_mov_imm_reg8_loads_byte() {
    let mut cpu = setup_cpu();

    // MOV CL, 0x42 (0xB1 0x42)
    cpu.load(0x0000, &[0xB1, 0x42]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg8(Reg8::CL), 0x42);
    assert_eq!(cpu.ip(), 0x0002);
}

#[test]
fn test_mov_imm_reg8_preserves_sibling_half() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::AX, 0x1234);

    // MOV AH, 0xFF (0xB4 0xFF)
    cpu.load(0x0000, &[0xB4, 0xFF]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg8(Reg8::AH), 0xFF);
    assert_eq!(cpu.reg8(Reg8::AL), 0x34);
    assert_eq!(cpu.reg16(Reg16::AX), 0xFF34);
}

#[test]
fn test_mov_imm_reg16_is_little_endian() {
    let mut cpu = setup_cpu();

    // MOV BX, 0x1234 (0xBB 0x34 0x12)
    cpu.load(0x0000, &[0xBB, 0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::BX), 0x1234);
    assert_eq!(cpu.reg8(Reg8::BH), 0x12);
    assert_eq!(cpu.reg8(Reg8::BL), 0x34);
    assert_eq!(cpu.ip(), 0x0003);
}

#[test]
fn test_mov_imm_does_not_touch_flags() {
    let mut cpu = setup_cpu();
    let flags = cpu.flags();

    // MOV AX, 0x0000 - a zero result, but MOV evaluates nothing
    cpu.load(0x0000, &[0xB8, 0x00, 0x00]);

    cpu.step().unwrap();

    assert_eq!(cpu.flags(), flags);
}

// ========== Register/Memory Forms ==========

#[test]
fn test_mov_store_register_to_register() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::CX, 0xBEEF);

    // MOV AX, CX via store direction (0x89 0xC8: mode 3, reg CX, rm AX)
    cpu.load(0x0000, &[0x89, 0xC8]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::AX), 0xBEEF);
    assert_eq!(cpu.reg16(Reg16::CX), 0xBEEF);
    assert_eq!(cpu.ip(), 0x0002);
}

#[test]
fn test_mov_store_word_to_memory() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::BX, 0x2000);
    cpu.set_reg16(Reg16::CX, 0x1234);

    // MOV [BX], CX (0x89 0x0F: mode 0, reg CX, rm [BX])
    cpu.load(0x0000, &[0x89, 0x0F]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read_word(0x2000), 0x1234);
    assert_eq!(cpu.ip(), 0x0002);
}

#[test]
fn test_mov_store_byte_to_memory() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::BX, 0x2000);
    cpu.set_reg16(Reg16::CX, 0xAABB);

    // MOV [BX], CL (0x88 0x0F)
    cpu.load(0x0000, &[0x88, 0x0F]);

    cpu.step().unwrap();

    // Only the low byte lands
    assert_eq!(cpu.memory().read(0x2000), 0xBB);
    assert_eq!(cpu.memory().read(0x2001), 0x00);
}

#[test]
fn test_mov_load_word_from_memory() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::BX, 0x2000);
    cpu.memory_mut().write_word(0x2000, 0xCAFE);

    // MOV CX, [BX] (0x8B 0x0F)
    cpu.load(0x0000, &[0x8B, 0x0F]);

    cpu.step().unwrap();

    assert_eq!(cpu.reg16(Reg16::CX), 0xCAFE);
    assert_eq!(cpu.ip(), 0x0002);
}

#[test]
fn test_mov_load_byte_zero_extends_nothing() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::BX, 0x2000);
    cpu.set_reg16(Reg16::AX, 0x1234);
    cpu.memory_mut().write(0x2000, 0x99);

    // MOV AL, [BX] (0x8A 0x07)
    cpu.load(0x0000, &[0x8A, 0x07]);

    cpu.step().unwrap();

    // AH untouched
    assert_eq!(cpu.reg16(Reg16::AX), 0x1299);
}

#[test]
fn test_mov_direct_address() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::CX, 0x5678);

    // MOV [0x1234], CX (0x89 0x0E 0x34 0x12: mode 0, rm 6 = direct)
    cpu.load(0x0000, &[0x89, 0x0E, 0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read_word(0x1234), 0x5678);
    // Two address bytes extend the instruction
    assert_eq!(cpu.ip(), 0x0004);
}

#[test]
fn test_mov_disp8_length() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::BX, 0x2000);
    cpu.set_reg16(Reg16::CX, 0x1111);

    // MOV [BX+0x10], CX (0x89 0x4F 0x10)
    cpu.load(0x0000, &[0x89, 0x4F, 0x10]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read_word(0x2010), 0x1111);
    assert_eq!(cpu.ip(), 0x0003);
}
