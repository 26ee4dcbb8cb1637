//! Comprehensive tests for CALL, RET, and HLT.
//!
//! Tests cover:
//! - The CALL/RET return-address convention: CALL pushes the address of
//!   its own opcode, RET adds the CALL length back on the way out
//! - Nested calls
//! - HLT raising the halt flag without advancing IP
//! - Steps after HLT are no-ops until reset

use lib8086::{FlatMemory, MemoryBus, Reg16, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

#[test]
fn test_call_pushes_own_address_and_jumps() {
    let mut cpu = setup_cpu();

    // CALL +0x0010 (0xE8 0x10 0x00) at 0x0000
    cpu.load(0x0000, &[0xE8, 0x10, 0x00]);

    cpu.step().unwrap();

    // Target is displacement plus the three instruction bytes
    assert_eq!(cpu.ip(), 0x0013);
    // The stack holds the CALL's own address
    assert_eq!(cpu.reg16(Reg16::SP), 0x00FE);
    assert_eq!(cpu.memory().read_word(0x00FE), 0x0000);
}

#[test]
fn test_ret_resumes_after_the_call() {
    let mut cpu = setup_cpu();

    // 0x0000: CALL +0x0010  -> subroutine at 0x0013
    // 0x0003: INC AX        <- expected resume point
    // 0x0013: RET
    cpu.load(0x0000, &[0xE8, 0x10, 0x00, 0x40]);
    cpu.load(0x0013, &[0xC3]);

    cpu.step().unwrap(); // CALL
    cpu.step().unwrap(); // RET

    assert_eq!(cpu.ip(), 0x0003);
    assert_eq!(cpu.reg16(Reg16::SP), 0x0100);

    cpu.step().unwrap(); // INC AX
    assert_eq!(cpu.reg16(Reg16::AX), 1);
}

#[test]
fn test_nested_calls_unwind_in_order() {
    let mut cpu = setup_cpu();

    // 0x0000: CALL +0x0010 -> 0x0013
    // 0x0013: CALL +0x0010 -> 0x0026
    // 0x0026: RET          -> 0x0016
    // 0x0016: RET          -> 0x0003
    cpu.load(0x0000, &[0xE8, 0x10, 0x00]);
    cpu.load(0x0013, &[0xE8, 0x10, 0x00]);
    cpu.load(0x0026, &[0xC3]);
    cpu.load(0x0016, &[0xC3]);

    cpu.step().unwrap();
    assert_eq!(cpu.ip(), 0x0013);
    cpu.step().unwrap();
    assert_eq!(cpu.ip(), 0x0026);
    assert_eq!(cpu.reg16(Reg16::SP), 0x00FC);

    cpu.step().unwrap();
    assert_eq!(cpu.ip(), 0x0016);
    cpu.step().unwrap();
    assert_eq!(cpu.ip(), 0x0003);
    assert_eq!(cpu.reg16(Reg16::SP), 0x0100);
}

#[test]
fn test_hlt_raises_halt_without_advancing_ip() {
    let mut cpu = setup_cpu();

    // HLT (0xF4)
    cpu.load(0x0000, &[0xF4]);

    cpu.step().unwrap();

    assert!(cpu.halted());
    assert_eq!(cpu.ip(), 0x0000);
}

#[test]
fn test_steps_after_hlt_are_noops() {
    let mut cpu = setup_cpu();
    cpu.set_reg16(Reg16::AX, 0x0042);

    cpu.load(0x0000, &[0xF4]);
    cpu.step().unwrap();

    let snapshot = cpu.snapshot();
    for _ in 0..5 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.snapshot(), snapshot);
}

#[test]
fn test_reset_leaves_halt_state() {
    let mut cpu = setup_cpu();
    cpu.load(0x0000, &[0xF4]);
    cpu.step().unwrap();
    assert!(cpu.halted());

    cpu.reset();

    assert!(!cpu.halted());
    assert_eq!(cpu.ip(), 0x0000);
    // Reset also wiped the program
    assert_eq!(cpu.memory().read(0x0000), 0x00);
}
