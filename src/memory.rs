//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from
//! specific memory implementations. This enables flexible memory
//! configurations including:
//!
//! - Flat 1 MiB RAM (FlatMemory implementation provided)
//! - Memory-mapped I/O
//! - ROM/RAM splits
//! - Debugging wrappers with logging
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 8086 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Word accesses are little-endian: low byte at `addr`, high at `addr + 1`
//! - Addresses are absolute 20-bit locations already combined from
//!   segment and offset by the CPU

/// Total addressable memory of the 8086: 1 MiB.
pub const MEMORY_SIZE: usize = 0x10_0000;

/// Memory bus trait for CPU byte and word access.
///
/// Implementations of this trait provide the memory backend for the CPU.
/// The CPU performs all memory traffic (code fetch, operands, stack)
/// through this abstraction.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: the 8086 has no bus error mechanism; the address
///   bus is 20 bits wide and an address beyond it wraps into low
///   memory, as a word access straddling the top of memory does on the
///   hardware
///
/// # Examples
///
/// ```
/// use lib8086::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// // Write a value
/// mem.write(0x1234, 0x42);
///
/// // Read it back
/// assert_eq!(mem.read(0x1234), 0x42);
///
/// // Little-endian word access
/// mem.write_word(0x0500, 0x1234);
/// assert_eq!(mem.read(0x0500), 0x34);
/// assert_eq!(mem.read(0x0501), 0x12);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified absolute address.
    fn read(&self, addr: u32) -> u8;

    /// Writes a byte to the specified absolute address.
    fn write(&mut self, addr: u32, value: u8);

    /// Zeroes the entire store. Called by `CPU::reset`.
    fn clear(&mut self);

    /// Reads a little-endian 16-bit word: low byte at `addr`, high byte
    /// at `addr + 1`.
    fn read_word(&self, addr: u32) -> u16 {
        let low = self.read(addr) as u16;
        let high = self.read(addr + 1) as u16;
        (high << 8) | low
    }

    /// Writes a little-endian 16-bit word: low byte at `addr`, high byte
    /// at `addr + 1`.
    fn write_word(&mut self, addr: u32, value: u16) {
        self.write(addr, (value & 0x00FF) as u8);
        self.write(addr + 1, (value >> 8) as u8);
    }

    /// Copies a byte sequence into memory starting at `addr`, overwriting
    /// prior content. Image loading is a reset-adjacent operation and must
    /// only happen between instruction steps.
    fn load(&mut self, addr: u32, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.write(addr + i as u32, *byte);
        }
    }
}

/// Flat 1 MiB memory: the canonical byte store for the emulator.
///
/// The backing array lives on the heap; the whole store is zero-filled on
/// construction and again on every [`MemoryBus::clear`].
///
/// # Examples
///
/// ```
/// use lib8086::{MemoryBus, FlatMemory, MEMORY_SIZE};
///
/// let mem = FlatMemory::new();
/// assert_eq!(mem.read(0x0000), 0x00);
/// assert_eq!(mem.read((MEMORY_SIZE - 1) as u32), 0x00);
/// ```
pub struct FlatMemory {
    bytes: Box<[u8]>,
}

impl FlatMemory {
    /// Creates a zero-filled 1 MiB memory.
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u32) -> u8 {
        self.bytes[addr as usize & (MEMORY_SIZE - 1)]
    }

    fn write(&mut self, addr: u32, value: u8) {
        self.bytes[addr as usize & (MEMORY_SIZE - 1)] = value;
    }

    fn clear(&mut self) {
        self.bytes.fill(0);
    }
}
