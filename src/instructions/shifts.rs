//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each instruction is one byte transform. `modify` applies it either to the
//! accumulator (Accumulator mode) or to the byte at the effective address,
//! writing the result back.

use crate::{AddressingMode, MemoryBus, Operand, Status, CPU};

/// Applies `transform` to the operand and stores the result where it came from.
///
/// `transform` receives the status register and the input byte; it sets C and
/// returns the result. Z and N are updated here.
fn modify<M, F>(cpu: &mut CPU<M>, operand: Operand, transform: F)
where
    M: MemoryBus,
    F: FnOnce(&mut Status, u8) -> u8,
{
    let result = transform(&mut cpu.p, operand.value);

    if operand.mode == AddressingMode::Accumulator {
        cpu.a = result;
    } else {
        cpu.memory.write(operand.address, result);
    }

    cpu.p.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 7 goes to C, bit 0 becomes 0.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |p, value| {
        p.set(Status::CARRY, value & 0x80 != 0);
        value << 1
    });
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 0 goes to C, bit 7 becomes 0, so N always ends up clear.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |p, value| {
        p.set(Status::CARRY, value & 0x01 != 0);
        value >> 1
    });
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Bit 7 goes to C, the old C enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |p, value| {
        let carry_in = p.contains(Status::CARRY) as u8;
        p.set(Status::CARRY, value & 0x80 != 0);
        (value << 1) | carry_in
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Bit 0 goes to C, the old C enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |p, value| {
        let carry_in = p.contains(Status::CARRY) as u8;
        p.set(Status::CARRY, value & 0x01 != 0);
        (value >> 1) | (carry_in << 7)
    });
}
