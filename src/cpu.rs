//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register** (P): packed `NV-BDIZC` flags, bit 5 always set
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt latches**: pending NMI and IRQ requests
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Service a pending interrupt, or execute one instruction
//! - `run_for_cycles()`: Execute until cycle budget exhausted
//!
//! Callers drive the loop; nothing here runs on its own.

use crate::instructions;
use crate::{ExecutionError, MemoryBus, Status, OPCODE_TABLE};

/// Address of the reset vector (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Address of the NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;

/// Status register after reset: interrupt disable and the unused bit.
pub const RESET_STATUS: u8 = 0x24;

/// 6502 CPU state and execution context.
///
/// The CPU owns its memory bus for its whole lifetime; embedders reach it
/// between steps through `memory()` and `memory_mut()`.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use core6502::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.status(), 0x24);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction byte)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status register
    pub(crate) p: Status,

    /// Total CPU cycles executed since the last reset
    pub(crate) cycles: u64,

    /// IRQ latch, set by `trigger_irq`
    pub(crate) irq_pending: bool,

    /// NMI latch, set by `trigger_nmi`
    pub(crate) nmi_pending: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus and resets it.
    ///
    /// After construction:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is 0xFD
    /// - P is 0x24 (Interrupt Disable and the unused bit)
    /// - A, X, Y and the cycle counter are zero
    /// - No interrupt is pending
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0,
            p: Status::UNUSED,
            cycles: 0,
            irq_pending: false,
            nmi_pending: false,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Puts the CPU back into its power-on state.
    ///
    /// Memory is left as it is; only registers, flags, the cycle counter and
    /// the interrupt latches change. PC is reloaded from the reset vector.
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.write(0xFFFC, 0x34);
    /// memory.write(0xFFFD, 0x12);
    ///
    /// let mut cpu = CPU::new(memory);
    /// cpu.set_a(0x55);
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.a(), 0);
    /// assert_eq!(cpu.pc(), 0x1234);
    /// ```
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.p = Status::from_byte(RESET_STATUS);
        self.cycles = 0;
        self.irq_pending = false;
        self.nmi_pending = false;
        self.pc = self.read_word(RESET_VECTOR);

        log::debug!("reset: pc=${:04X}", self.pc);
    }

    /// Executes one step and advances the CPU state.
    ///
    /// A step is one of:
    /// 1. Servicing a pending NMI (always) or IRQ (when I is clear), or
    /// 2. Fetching the opcode at PC, resolving its operand, executing it and
    ///    adding its base cycle cost.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the step completed
    /// - `Err(ExecutionError::UndefinedOpcode { .. })` if PC points at an
    ///   opcode with no documented instruction. PC is left on that opcode and
    ///   no other state changes, so every further call fails the same way.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xA9); // LDA #$05
    /// mem.write(0x8001, 0x05);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.a(), 0x05);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if let Some(interrupt) = self.pending_interrupt() {
            self.service_interrupt(interrupt);
            return Ok(());
        }

        let opcode_pc = self.pc;
        let opcode = self.fetch_byte();
        let metadata = &OPCODE_TABLE[opcode as usize];

        if !metadata.is_defined() {
            self.pc = opcode_pc;
            log::debug!("undefined opcode ${:02X} at ${:04X}", opcode, opcode_pc);
            return Err(ExecutionError::UndefinedOpcode {
                opcode,
                pc: opcode_pc,
            });
        }

        let operand = self.resolve(metadata.addressing_mode);

        log::trace!(
            "{:04X}  {:02X}  {} {:<11} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            opcode_pc,
            opcode,
            metadata.mnemonic,
            format!("{:?}", metadata.addressing_mode),
            self.a,
            self.x,
            self.y,
            self.p.bits(),
            self.sp,
            self.cycles
        );

        instructions::execute(self, metadata.instruction, operand);
        self.cycles += metadata.base_cycles as u64;

        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Steps until at least `cycle_budget` cycles have elapsed or a step
    /// fails. Returns the number of cycles actually consumed, which may
    /// overshoot the budget by up to one instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Fetch and Stack Helpers ==========

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word at `addr`.
    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word from zero page; the high byte wraps to $00.
    pub(crate) fn read_word_zero_page(&self, pointer: u8) -> u16 {
        let lo = self.memory.read(pointer as u16) as u16;
        let hi = self.memory.read(pointer.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push_byte(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte first, so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push_byte((value >> 8) as u8);
        self.push_byte(value as u8);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull_byte() as u16;
        let hi = self.pull_byte() as u16;
        (hi << 8) | lo
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Loads the status register from a packed byte. Bit 5 is forced to 1.
    pub fn set_status(&mut self, value: u8) {
        self.p = Status::from_byte(value);
    }

    // ========== Status Flags ==========

    /// Returns true if every bit of `flag` is set.
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, Status};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert!(cpu.flag(Status::INTERRUPT_DISABLE));
    /// assert!(!cpu.flag(Status::CARRY));
    /// ```
    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }

    /// Sets or clears `flag`, leaving every other bit untouched.
    ///
    /// The unused bit stays set whatever `flag` is.
    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.p.set(flag, value);
        self.p.insert(Status::UNUSED);
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag(Status::CARRY)
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.set_flag(Status::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.set_flag(Status::OVERFLOW, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.set_flag(Status::BREAK, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.set_flag(Status::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.set_flag(Status::INTERRUPT_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.set_flag(Status::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.set_flag(Status::CARRY, value);
    }
}
