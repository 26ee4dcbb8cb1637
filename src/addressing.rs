//! # Instruction Decoding and Operand Resolution
//!
//! This module breaks the first two bytes of an instruction into their
//! hardware fields and resolves the r/m side of an addressing byte into
//! a concrete operand.
//!
//! The first byte (the opcode) carries a 6-bit operation group, a
//! direction bit, and a width bit. The second byte (the addressing byte,
//! ModR/M) carries a 2-bit mode, a 3-bit register field, and a 3-bit
//! r/m field:
//!
//! ```text
//! opcode:  | group (6) | d (1) | w (1) |
//! modrm:   | mode (2)  | reg (3) | r/m (3) |
//! ```
//!
//! Both bytes are decoded for every instruction; handlers that take no
//! addressing byte simply ignore those fields.

use crate::cpu::CPU;
use crate::memory::MemoryBus;
use crate::registers::{Reg16, Reg8};

/// Operand width of an instruction, taken from bit 0 of the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    /// Decodes the opcode's width bit: 0 selects byte, 1 selects word.
    pub fn from_bit(bit: u8) -> Width {
        if bit & 0x01 != 0 {
            Width::Word
        } else {
            Width::Byte
        }
    }
}

/// The 2-bit mode field of an addressing byte.
///
/// Modes 0 through 2 select a memory operand with zero, one, or two
/// displacement bytes; mode 3 reinterprets the r/m field as a second
/// register index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Memory operand, no displacement (except the direct-address row).
    MemoryNoDisp,
    /// Memory operand plus a sign-extended 8-bit displacement.
    MemoryDisp8,
    /// Memory operand plus a 16-bit displacement.
    MemoryDisp16,
    /// The r/m field names a register, same tables as the reg field.
    Register,
}

impl AddressingMode {
    /// Decodes the top two bits of an addressing byte.
    pub fn from_bits(bits: u8) -> AddressingMode {
        match bits & 0x03 {
            0 => AddressingMode::MemoryNoDisp,
            1 => AddressingMode::MemoryDisp8,
            2 => AddressingMode::MemoryDisp16,
            _ => AddressingMode::Register,
        }
    }
}

/// The decoded fields of an instruction's first two bytes.
///
/// Decoding is pure bit manipulation and never fails; whether the fields
/// are meaningful is the dispatch table's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The raw opcode byte.
    pub opcode: u8,
    /// Top six bits of the opcode, identifying the operation family.
    pub group: u8,
    /// Direction bit: for register/memory forms, set means the reg field
    /// is the destination.
    pub direction: bool,
    /// Operand width from bit 0 of the opcode.
    pub width: Width,
    /// Addressing mode from the top two bits of the addressing byte.
    pub mode: AddressingMode,
    /// 3-bit register field (also the sub-operation selector of grouped
    /// opcodes).
    pub reg: u8,
    /// 3-bit r/m field.
    pub rm: u8,
}

impl Instruction {
    /// Splits an opcode byte and its addressing byte into fields.
    pub fn decode(opcode: u8, modrm: u8) -> Instruction {
        Instruction {
            opcode,
            group: (opcode & 0xFC) >> 2,
            direction: opcode & 0x02 != 0,
            width: Width::from_bit(opcode & 0x01),
            mode: AddressingMode::from_bits((modrm & 0xC0) >> 6),
            reg: (modrm & 0x38) >> 3,
            rm: modrm & 0x07,
        }
    }
}

/// A resolved r/m operand: either a register index or an absolute
/// memory address.
///
/// The register index is kept raw and interpreted through [`Reg8`] or
/// [`Reg16`] at access time, because the same index means a different
/// register at each width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    Register(u8),
    Memory(u32),
}

impl<M: MemoryBus> CPU<M> {
    /// Reads a register selected by a 3-bit field at the given width.
    ///
    /// Byte reads return the half-register zero-extended so callers can
    /// use one code path for both widths.
    pub(crate) fn read_reg(&self, width: Width, index: u8) -> u16 {
        match width {
            Width::Byte => self.reg8(Reg8::from_index(index)) as u16,
            Width::Word => self.reg16(Reg16::from_index(index)),
        }
    }

    /// Writes a register selected by a 3-bit field at the given width.
    ///
    /// Byte writes truncate to the low 8 bits and never disturb the
    /// sibling half of the pair.
    pub(crate) fn write_reg(&mut self, width: Width, index: u8, value: u16) {
        match width {
            Width::Byte => self.set_reg8(Reg8::from_index(index), value as u8),
            Width::Word => self.set_reg16(Reg16::from_index(index), value),
        }
    }

    /// Resolves the r/m side of a decoded instruction into an operand.
    ///
    /// Returns the operand and the number of displacement bytes the
    /// addressing byte consumed beyond the first two instruction bytes,
    /// so the handler can advance IP past the whole instruction.
    ///
    /// The base-register combination is selected by the r/m field:
    ///
    /// ```text
    /// r/m  base
    /// 0    BX + SI
    /// 1    BX + DI
    /// 2    BP + SI
    /// 3    BP + DI
    /// 4    SI
    /// 5    DI
    /// 6    direct address (mode 0) or BP (modes 1 and 2)
    /// 7    BX
    /// ```
    ///
    /// Effective-address arithmetic wraps at 16 bits, and an 8-bit
    /// displacement is sign-extended before the add. The effective
    /// address is combined with DS into an absolute location.
    pub(crate) fn resolve_rm(&self, inst: &Instruction) -> (Operand, u16) {
        match inst.mode {
            AddressingMode::Register => (Operand::Register(inst.rm), 0),
            // Direct address: 16-bit address in place of a displacement
            AddressingMode::MemoryNoDisp if inst.rm == 6 => {
                let addr = self.memory().read_word(self.code_addr(self.ip().wrapping_add(2)));
                (Operand::Memory(self.data_addr(addr)), 2)
            }
            AddressingMode::MemoryNoDisp => {
                (Operand::Memory(self.data_addr(self.rm_base(inst.rm))), 0)
            }
            AddressingMode::MemoryDisp8 => {
                let disp = self.memory().read(self.code_addr(self.ip().wrapping_add(2))) as i8;
                let offset = self.rm_base(inst.rm).wrapping_add_signed(disp as i16);
                (Operand::Memory(self.data_addr(offset)), 1)
            }
            AddressingMode::MemoryDisp16 => {
                let disp = self.memory().read_word(self.code_addr(self.ip().wrapping_add(2)));
                let offset = self.rm_base(inst.rm).wrapping_add(disp);
                (Operand::Memory(self.data_addr(offset)), 2)
            }
        }
    }

    /// Base-register sum for a memory-mode r/m field, wrapping at 16
    /// bits.
    fn rm_base(&self, rm: u8) -> u16 {
        match rm {
            0 => self.reg16(Reg16::BX).wrapping_add(self.reg16(Reg16::SI)),
            1 => self.reg16(Reg16::BX).wrapping_add(self.reg16(Reg16::DI)),
            2 => self.reg16(Reg16::BP).wrapping_add(self.reg16(Reg16::SI)),
            3 => self.reg16(Reg16::BP).wrapping_add(self.reg16(Reg16::DI)),
            4 => self.reg16(Reg16::SI),
            5 => self.reg16(Reg16::DI),
            6 => self.reg16(Reg16::BP),
            _ => self.reg16(Reg16::BX),
        }
    }

    /// Reads an operand at the given width. Memory words are
    /// little-endian.
    pub(crate) fn read_operand(&self, width: Width, operand: Operand) -> u16 {
        match operand {
            Operand::Register(index) => self.read_reg(width, index),
            Operand::Memory(addr) => match width {
                Width::Byte => self.memory().read(addr) as u16,
                Width::Word => self.memory().read_word(addr),
            },
        }
    }

    /// Writes an operand at the given width. Byte writes truncate the
    /// value to its low 8 bits.
    pub(crate) fn write_operand(&mut self, width: Width, operand: Operand, value: u16) {
        match operand {
            Operand::Register(index) => self.write_reg(width, index, value),
            Operand::Memory(addr) => match width {
                Width::Byte => self.memory_mut().write(addr, value as u8),
                Width::Word => self.memory_mut().write_word(addr, value),
            },
        }
    }
}
