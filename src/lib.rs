//! # 8086 CPU Emulator Core
//!
//! An Intel 8086 CPU emulator designed for modularity, clarity, and
//! deterministic testing.
//!
//! This crate provides the fetch-decode-execute engine for the 8086
//! processor: the register file with its high/low byte-pair views, a
//! trait-based memory bus over a flat 1 MiB address space, the ModR/M
//! operand resolver, the status-flag evaluator, and a table-driven
//! opcode dispatch system.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib8086::{CPU, FlatMemory, Reg16};
//!
//! // Create 1 MiB of flat memory
//! let memory = FlatMemory::new();
//!
//! // Initialize CPU - execution begins at the reset vector (0x0000)
//! let mut cpu = CPU::new(memory);
//!
//! // Load a tiny program: MOV AX, 0x0005; HLT
//! cpu.load(0x0000, &[0xB8, 0x05, 0x00, 0xF4]);
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.reg16(Reg16::AX), 0x0005);
//! assert!(cpu.halted());
//! ```
//!
//! ## Architecture
//!
//! The emulator follows a modular architecture adhering to these principles:
//!
//! - **Modularity**: CPU state is separated from memory implementation via the `MemoryBus` trait
//! - **Determinism**: One `step()` call runs exactly one instruction to completion
//! - **Explicit instances**: Every `CPU` value is an independent machine; there is no global state
//! - **Table-Driven Design**: All opcode metadata and dispatch in a single source of truth
//!
//! ## Modules
//!
//! - `cpu` - CPU state, the step loop, and the stack machinery
//! - `memory` - MemoryBus trait and the flat 1 MiB implementation
//! - `registers` - Register identifiers and the state snapshot
//! - `addressing` - Instruction decoding and the ModR/M operand resolver
//! - `flags` - The status-flag evaluator
//! - `opcodes` - Opcode metadata and dispatch table
//!
//! ## Coverage
//!
//! Not every 8086 opcode is implemented. Opcodes with known mnemonics but
//! no semantics yet report [`ExecutionError::UnimplementedOpcode`] and are
//! an intentional extension point, not an error in the caller's program.
//! A faulting `step()` leaves all CPU and memory state untouched, so the
//! same fault repeats until a front-end intervenes.

pub mod addressing;
pub mod cpu;
pub mod flags;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::{AddressingMode, Instruction, Width};
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus, MEMORY_SIZE};
pub use opcodes::{Condition, Handler, OpcodeMetadata, OPCODE_TABLE};
pub use registers::{Reg16, Reg8, RegisterSnapshot, SegReg};

/// Errors that can occur during CPU execution.
///
/// A returned error is the emulator's diagnostic channel: the core never
/// consumes these itself, it surfaces them for a logging or debugger
/// collaborator. Every error path leaves registers, flags, IP, and memory
/// exactly as they were before the faulting `step()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Opcode byte has no assigned meaning on the 8086.
    ///
    /// Contains the opcode byte value for debugging purposes.
    UnknownOpcode(u8),

    /// Instruction opcode is recognized but has not been implemented yet.
    ///
    /// Contains the opcode byte value for debugging purposes.
    UnimplementedOpcode(u8),

    /// A grouped opcode (0x80-0x83) selected a sub-operation that has not
    /// been implemented yet. `op` is the 3-bit reg field of the addressing
    /// byte, which names the operation within the group.
    UnimplementedGroupOp { opcode: u8, op: u8 },

    /// The instruction reached an addressing-byte combination the
    /// emulator does not resolve. Every combination is currently
    /// resolved for the implemented instructions; the variant is the
    /// extension point for opcodes that only support a subset of modes.
    UnimplementedAddressing { opcode: u8, mode: u8, rm: u8 },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnknownOpcode(opcode) => {
                write!(f, "Opcode 0x{:02X} is not a known 8086 instruction", opcode)
            }
            ExecutionError::UnimplementedOpcode(opcode) => {
                write!(
                    f,
                    "Opcode 0x{:02X} ({}) is not implemented",
                    opcode, OPCODE_TABLE[*opcode as usize].mnemonic
                )
            }
            ExecutionError::UnimplementedGroupOp { opcode, op } => {
                write!(
                    f,
                    "Grouped opcode 0x{:02X} sub-operation {} is not implemented",
                    opcode, op
                )
            }
            ExecutionError::UnimplementedAddressing { opcode, mode, rm } => {
                write!(
                    f,
                    "Opcode 0x{:02X} does not support addressing mode {} with r/m {}",
                    opcode, mode, rm
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
