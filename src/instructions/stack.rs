//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: Push / pull the accumulator
//! - PHP / PLP: Push / pull the status register
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page, and wraps silently at both ends.

use crate::{MemoryBus, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// ```
/// use core6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().read(0x01FD), 0x42);
/// assert_eq!(cpu.sp(), 0xFC);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push_byte(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has B (bit 4) and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push_byte(cpu.p.to_byte_brk());
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.pull_byte();
    cpu.p.set_zn(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Bit 5 is forced to 1 and B to 0 in the register.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.pull_byte();
    cpu.p = Status::from_pulled(value);
}
