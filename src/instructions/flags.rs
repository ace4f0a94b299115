//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC / SEC: Carry
//! - CLI / SEI: Interrupt Disable
//! - CLD / SED: Decimal Mode
//! - CLV: Overflow (there is no SEV)
//!
//! Each one changes exactly one bit and leaves the rest of P alone.

use crate::{MemoryBus, Status, CPU};

/// Clears `flag` (CLC, CLI, CLD, CLV).
///
/// ```
/// use core6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x18); // CLC
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_flag_c(true);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.flag_c(), false);
/// assert_eq!(cpu.pc(), 0x8001);
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub(crate) fn execute_clear<M: MemoryBus>(cpu: &mut CPU<M>, flag: Status) {
    cpu.p.remove(flag);
}

/// Sets `flag` (SEC, SEI, SED).
pub(crate) fn execute_set<M: MemoryBus>(cpu: &mut CPU<M>, flag: Status) {
    cpu.p.insert(flag);
}
