//! # CPU State and Execution Engine
//!
//! This module contains the `CPU` struct, the heart of the emulator,
//! holding the complete register file and driving the fetch-decode-execute
//! loop one instruction at a time.
//!
//! ## State
//!
//! The four general registers are stored as their byte halves (AH/AL and
//! so on); the 16-bit views are composed on access, which makes the
//! byte-pair aliasing of the hardware structural rather than something to
//! maintain. Index, pointer, and segment registers are plain 16-bit
//! values, along with IP and the FLAGS word.
//!
//! ## Execution model
//!
//! `step()` runs exactly one instruction to completion. There are no
//! partial instructions and no cycle accounting. A `step()` that returns
//! an error has changed nothing: registers, flags, IP, and memory are
//! exactly as they were, so the same fault repeats until a front-end
//! intervenes.

use crate::addressing::Instruction;
use crate::memory::MemoryBus;
use crate::opcodes::{Handler, OPCODE_TABLE};
use crate::registers::{Reg16, Reg8, RegisterSnapshot, SegReg};
use crate::{instructions, ExecutionError};

/// Offset within the code segment where execution begins after reset.
pub const RESET_VECTOR: u16 = 0x0000;

/// Initial stack pointer, leaving 256 bytes of stack below it.
pub const BOOT_SP: u16 = 0x0100;

/// FLAGS word after reset: all status flags clear, reserved high bits set.
pub const RESET_FLAGS: u16 = 0xF000;

/// The 8086 CPU.
///
/// Generic over the memory implementation via the [`MemoryBus`] trait.
/// Every `CPU` value is an independent machine; two instances never share
/// state.
///
/// # Examples
///
/// ```
/// use lib8086::{CPU, FlatMemory, Reg16};
///
/// let mut cpu = CPU::new(FlatMemory::new());
///
/// // INC AX; HLT
/// cpu.load(0x0000, &[0x40, 0xF4]);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.reg16(Reg16::AX), 1);
/// ```
pub struct CPU<M: MemoryBus> {
    // General registers as byte halves; the word views are derived.
    pub(crate) ah: u8,
    pub(crate) al: u8,
    pub(crate) bh: u8,
    pub(crate) bl: u8,
    pub(crate) ch: u8,
    pub(crate) cl: u8,
    pub(crate) dh: u8,
    pub(crate) dl: u8,

    // Index and pointer registers
    pub(crate) si: u16,
    pub(crate) di: u16,
    pub(crate) bp: u16,
    pub(crate) sp: u16,

    // Segment registers
    pub(crate) cs: u16,
    pub(crate) ds: u16,
    pub(crate) es: u16,
    pub(crate) ss: u16,

    pub(crate) ip: u16,
    pub(crate) flags: u16,

    pub(crate) halted: bool,

    memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU in the post-reset register state.
    ///
    /// The memory is taken as-is: a front-end may pre-load an image
    /// before handing the bus over. Use [`CPU::reset`] to also wipe
    /// memory.
    pub fn new(memory: M) -> Self {
        CPU {
            ah: 0,
            al: 0,
            bh: 0,
            bl: 0,
            ch: 0,
            cl: 0,
            dh: 0,
            dl: 0,
            si: 0,
            di: 0,
            bp: 0,
            sp: BOOT_SP,
            cs: 0,
            ds: 0,
            es: 0,
            ss: 0,
            ip: RESET_VECTOR,
            flags: RESET_FLAGS,
            halted: false,
            memory,
        }
    }

    /// Returns the CPU to its power-on state and zeroes all memory.
    ///
    /// After reset the machine is indistinguishable from a freshly
    /// constructed one over cleared memory: IP at the reset vector, SP at
    /// the boot value, FLAGS at the reset pattern, halt flag down.
    pub fn reset(&mut self) {
        self.ah = 0;
        self.al = 0;
        self.bh = 0;
        self.bl = 0;
        self.ch = 0;
        self.cl = 0;
        self.dh = 0;
        self.dl = 0;
        self.si = 0;
        self.di = 0;
        self.bp = 0;
        self.sp = BOOT_SP;
        self.cs = 0;
        self.ds = 0;
        self.es = 0;
        self.ss = 0;
        self.ip = RESET_VECTOR;
        self.flags = RESET_FLAGS;
        self.halted = false;
        self.memory.clear();
    }

    /// Copies a program image into memory at an absolute address.
    ///
    /// Loading only writes memory; registers and the halt flag are
    /// untouched. Must only be called between instruction steps.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) {
        self.memory.load(addr, bytes);
    }

    /// Executes a single instruction.
    ///
    /// Fetches the opcode at CS:IP, decodes it together with the byte
    /// after it, and dispatches through [`OPCODE_TABLE`]. When the CPU is
    /// halted this is a no-op returning `Ok(())`; the halt state is
    /// only left via [`CPU::reset`].
    ///
    /// # Errors
    ///
    /// Returns an [`ExecutionError`] when the opcode is unknown or not
    /// implemented. On error no state has changed and IP still points at
    /// the faulting instruction.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.halted {
            return Ok(());
        }

        let opcode = self.memory.read(self.code_addr(self.ip));
        let modrm = self.memory.read(self.code_addr(self.ip.wrapping_add(1)));
        let inst = Instruction::decode(opcode, modrm);

        let metadata = &OPCODE_TABLE[opcode as usize];
        let handler = match metadata.handler {
            Some(handler) => handler,
            None if metadata.mnemonic == "???" => {
                return Err(ExecutionError::UnknownOpcode(opcode));
            }
            None => return Err(ExecutionError::UnimplementedOpcode(opcode)),
        };

        match handler {
            Handler::MovImmReg8(reg) => instructions::load_store::execute_mov_imm_reg8(self, reg),
            Handler::MovImmReg16(reg) => instructions::load_store::execute_mov_imm_reg16(self, reg),
            Handler::MovStore => instructions::load_store::execute_mov_store(self, &inst),
            Handler::MovLoad => instructions::load_store::execute_mov_load(self, &inst),
            Handler::XorRm => instructions::alu::execute_xor_rm(self, &inst),
            Handler::XorAccImm => instructions::alu::execute_xor_acc_imm(self, &inst),
            Handler::Group1 => instructions::alu::execute_group1(self, &inst)?,
            Handler::IncReg(reg) => instructions::inc_dec::execute_inc_reg(self, reg),
            Handler::DecReg(reg) => instructions::inc_dec::execute_dec_reg(self, reg),
            Handler::Jump(cond) => instructions::branches::execute_jump(self, cond),
            Handler::CallNear => instructions::control::execute_call_near(self),
            Handler::RetNear => instructions::control::execute_ret_near(self),
            Handler::Halt => instructions::control::execute_halt(self),
            Handler::PushReg(reg) => instructions::stack::execute_push_reg(self, reg),
            Handler::PushSeg(seg) => instructions::stack::execute_push_seg(self, seg),
            Handler::PopReg(reg) => instructions::stack::execute_pop_reg(self, reg),
            Handler::PopSeg(seg) => instructions::stack::execute_pop_seg(self, seg),
            Handler::ClearFlag(mask) => instructions::flags::execute_clear_flag(self, mask),
            Handler::SetFlag(mask) => instructions::flags::execute_set_flag(self, mask),
        }

        Ok(())
    }

    /// Reads an 8-bit register.
    pub fn reg8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::AL => self.al,
            Reg8::CL => self.cl,
            Reg8::DL => self.dl,
            Reg8::BL => self.bl,
            Reg8::AH => self.ah,
            Reg8::CH => self.ch,
            Reg8::DH => self.dh,
            Reg8::BH => self.bh,
        }
    }

    /// Writes an 8-bit register without disturbing its pair sibling.
    pub fn set_reg8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::AL => self.al = value,
            Reg8::CL => self.cl = value,
            Reg8::DL => self.dl = value,
            Reg8::BL => self.bl = value,
            Reg8::AH => self.ah = value,
            Reg8::CH => self.ch = value,
            Reg8::DH => self.dh = value,
            Reg8::BH => self.bh = value,
        }
    }

    /// Reads a 16-bit register. For AX, BX, CX, and DX the value is
    /// composed from the byte halves.
    pub fn reg16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AX => ((self.ah as u16) << 8) | self.al as u16,
            Reg16::CX => ((self.ch as u16) << 8) | self.cl as u16,
            Reg16::DX => ((self.dh as u16) << 8) | self.dl as u16,
            Reg16::BX => ((self.bh as u16) << 8) | self.bl as u16,
            Reg16::SP => self.sp,
            Reg16::BP => self.bp,
            Reg16::SI => self.si,
            Reg16::DI => self.di,
        }
    }

    /// Writes a 16-bit register. For AX, BX, CX, and DX both byte halves
    /// are replaced.
    pub fn set_reg16(&mut self, reg: Reg16, value: u16) {
        let high = (value >> 8) as u8;
        let low = value as u8;
        match reg {
            Reg16::AX => {
                self.ah = high;
                self.al = low;
            }
            Reg16::CX => {
                self.ch = high;
                self.cl = low;
            }
            Reg16::DX => {
                self.dh = high;
                self.dl = low;
            }
            Reg16::BX => {
                self.bh = high;
                self.bl = low;
            }
            Reg16::SP => self.sp = value,
            Reg16::BP => self.bp = value,
            Reg16::SI => self.si = value,
            Reg16::DI => self.di = value,
        }
    }

    /// Reads a segment register.
    pub fn seg(&self, seg: SegReg) -> u16 {
        match seg {
            SegReg::CS => self.cs,
            SegReg::DS => self.ds,
            SegReg::ES => self.es,
            SegReg::SS => self.ss,
        }
    }

    /// Writes a segment register.
    pub fn set_seg(&mut self, seg: SegReg, value: u16) {
        match seg {
            SegReg::CS => self.cs = value,
            SegReg::DS => self.ds = value,
            SegReg::ES => self.es = value,
            SegReg::SS => self.ss = value,
        }
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> u16 {
        self.ip
    }

    /// Sets the instruction pointer. Intended for front-ends placing
    /// entry points; during execution IP is maintained by the handlers.
    pub fn set_ip(&mut self, ip: u16) {
        self.ip = ip;
    }

    /// Current FLAGS word.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Replaces the FLAGS word. Intended for front-ends and tests
    /// establishing a known state; during execution flags are maintained
    /// by the handlers.
    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags;
    }

    /// Whether the CPU has executed HLT since the last reset.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Carry flag (CF).
    pub fn flag_cf(&self) -> bool {
        self.flags & crate::flags::CARRY != 0
    }

    /// Parity flag (PF).
    pub fn flag_pf(&self) -> bool {
        self.flags & crate::flags::PARITY != 0
    }

    /// Adjust flag (AF).
    pub fn flag_af(&self) -> bool {
        self.flags & crate::flags::ADJUST != 0
    }

    /// Zero flag (ZF).
    pub fn flag_zf(&self) -> bool {
        self.flags & crate::flags::ZERO != 0
    }

    /// Sign flag (SF).
    pub fn flag_sf(&self) -> bool {
        self.flags & crate::flags::SIGN != 0
    }

    /// Trap flag (TF).
    pub fn flag_tf(&self) -> bool {
        self.flags & crate::flags::TRAP != 0
    }

    /// Interrupt-enable flag (IF).
    pub fn flag_if(&self) -> bool {
        self.flags & crate::flags::INTERRUPT != 0
    }

    /// Direction flag (DF).
    pub fn flag_df(&self) -> bool {
        self.flags & crate::flags::DIRECTION != 0
    }

    /// Overflow flag (OF).
    pub fn flag_of(&self) -> bool {
        self.flags & crate::flags::OVERFLOW != 0
    }

    /// Shared access to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Captures the complete register state for display or debugging.
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            ax: self.reg16(Reg16::AX),
            ah: self.ah,
            al: self.al,
            bx: self.reg16(Reg16::BX),
            bh: self.bh,
            bl: self.bl,
            cx: self.reg16(Reg16::CX),
            ch: self.ch,
            cl: self.cl,
            dx: self.reg16(Reg16::DX),
            dh: self.dh,
            dl: self.dl,
            si: self.si,
            di: self.di,
            bp: self.bp,
            sp: self.sp,
            cs: self.cs,
            ds: self.ds,
            es: self.es,
            ss: self.ss,
            ip: self.ip,
            flags: self.flags,
        }
    }

    // The segment:offset sum can reach 0x10FFEF; the address bus is 20
    // bits wide, so the carry falls off and the address wraps into low
    // memory.

    /// Absolute address of an offset within the code segment.
    pub(crate) fn code_addr(&self, offset: u16) -> u32 {
        (((self.cs as u32) << 4) + offset as u32) & 0xF_FFFF
    }

    /// Absolute address of an offset within the data segment.
    pub(crate) fn data_addr(&self, offset: u16) -> u32 {
        (((self.ds as u32) << 4) + offset as u32) & 0xF_FFFF
    }

    /// Absolute address of an offset within the stack segment.
    pub(crate) fn stack_addr(&self, offset: u16) -> u32 {
        (((self.ss as u32) << 4) + offset as u32) & 0xF_FFFF
    }

    /// Fetches an immediate byte `offset` bytes past the opcode.
    pub(crate) fn fetch8(&self, offset: u16) -> u8 {
        self.memory.read(self.code_addr(self.ip.wrapping_add(offset)))
    }

    /// Fetches a little-endian immediate word `offset` bytes past the
    /// opcode.
    pub(crate) fn fetch16(&self, offset: u16) -> u16 {
        self.memory.read_word(self.code_addr(self.ip.wrapping_add(offset)))
    }

    /// Pushes a word: SP moves down two, then the word is written at
    /// SS:SP.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.sp = self.sp.wrapping_sub(2);
        let addr = self.stack_addr(self.sp);
        self.memory.write_word(addr, value);
    }

    /// Pops a word from SS:SP, zeroing the vacated slot, then moves SP
    /// up two. The zeroing keeps stale stack content from masquerading
    /// as live data in memory dumps.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let addr = self.stack_addr(self.sp);
        let value = self.memory.read_word(addr);
        self.memory.write_word(addr, 0);
        self.sp = self.sp.wrapping_add(2);
        value
    }
}
