//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! concrete memory store, and `FlatMemory`, the 64KB RAM array the emulator
//! normally runs against.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - every 16-bit address is valid and reads/writes always succeed
//! - The address space is exactly 65536 cells, so there is nothing to bounds-check
//! - An optional level-sensitive IRQ line lets a memory implementation model a
//!   peripheral that requests interrupts

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (program, data, stack, vectors) through this
/// abstraction.
///
/// # Design
///
/// - `read(&self)`: Immutable reference, reads have no side effects
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use core6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use core6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Read-only or unmapped regions may ignore
    /// the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reports whether a device behind this bus holds the IRQ line low.
    ///
    /// The line is level-sensitive: the CPU samples it before every
    /// instruction and it stays asserted until the device itself clears it.
    /// It is OR-ed with the CPU's own IRQ latch (see `CPU::trigger_irq`).
    ///
    /// Returns `false` by default, which is right for plain RAM.
    ///
    /// ```
    /// use core6502::{MemoryBus, FlatMemory};
    ///
    /// let mem = FlatMemory::new();
    /// assert_eq!(mem.irq_active(), false);
    /// ```
    fn irq_active(&self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) map to one contiguous RAM array,
/// initialized to 0x00.
///
/// # Examples
///
/// ```
/// use core6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
/// memory.write(0x8000, 0xEA); // NOP
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
        }
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
