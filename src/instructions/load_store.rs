//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA / LDX / LDY: Load a register, updating Z and N
//! - STA / STX / STY: Store a register to the effective address, no flags

use crate::{MemoryBus, Operand, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a = operand.value;
    cpu.p.set_zn(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.x = operand.value;
    cpu.p.set_zn(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.y = operand.value;
    cpu.p.set_zn(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address, cpu.y);
}
