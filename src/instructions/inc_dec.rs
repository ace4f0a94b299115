//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC / DEC: Read-modify-write on memory
//! - INX / INY / DEX / DEY: Index registers
//!
//! All wrap modulo 256 and update Z and N from the result.

use crate::{MemoryBus, Operand, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let result = operand.value.wrapping_add(1);
    cpu.memory.write(operand.address, result);
    cpu.p.set_zn(result);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let result = operand.value.wrapping_sub(1);
    cpu.memory.write(operand.address, result);
    cpu.p.set_zn(result);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.p.set_zn(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.p.set_zn(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.p.set_zn(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.p.set_zn(cpu.y);
}
