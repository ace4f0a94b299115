//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Non-destructive compare
//! - BIT: Bit test
//!
//! ADC is always binary; the D flag has no effect on it. SBC has a binary
//! and a decimal (BCD) path selected by the D flag. In decimal mode V is
//! always cleared and Z/N follow the corrected result.

use crate::{MemoryBus, Operand, Status, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// The D flag is ignored.
/// - C: Set if `A + M + C > 255`
/// - Z: Set if the 8-bit result is 0
/// - N: Bit 7 of the result
/// - V: Set if both inputs share a sign and the result does not
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let a = cpu.a;
    let value = operand.value;
    let carry_in = cpu.p.contains(Status::CARRY) as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    cpu.p.set(Status::CARRY, sum > 0xFF);
    cpu.p.set(Status::OVERFLOW, !(a ^ value) & (a ^ result) & 0x80 != 0);
    cpu.p.set_zn(result);
    cpu.a = result;
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - M - (1 - C)`. C is set when no borrow occurred.
///
/// Binary mode sets V via `(A ^ M) & (A ^ result) & 0x80`. Decimal mode
/// corrects each nibble by -6 when it went negative, and clears V.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let a = cpu.a;
    let value = operand.value;
    let borrow = !cpu.p.contains(Status::CARRY) as i16;

    let diff = a as i16 - value as i16 - borrow;
    cpu.p.set(Status::CARRY, diff >= 0);

    let result = if cpu.p.contains(Status::DECIMAL) {
        cpu.p.remove(Status::OVERFLOW);
        bcd_sub(a, value, borrow)
    } else {
        let result = diff as u8;
        cpu.p
            .set(Status::OVERFLOW, (a ^ value) & (a ^ result) & 0x80 != 0);
        result
    };

    cpu.p.set_zn(result);
    cpu.a = result;
}

/// Nibble-wise BCD subtraction; `borrow` is 0 or 1.
fn bcd_sub(a: u8, value: u8, borrow: i16) -> u8 {
    let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (value >> 4) as i16;

    if lo < 0 {
        lo -= 6;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 6;
    }

    (((hi & 0x0F) << 4) | (lo & 0x0F)) as u8
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a &= operand.value;
    cpu.p.set_zn(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a |= operand.value;
    cpu.p.set_zn(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a ^= operand.value;
    cpu.p.set_zn(cpu.a);
}

/// Shared body of CMP, CPX and CPY.
///
/// - C: Set if register >= operand
/// - Z: Set if register == operand
/// - N: Bit 7 of `register - operand`
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    let diff = register.wrapping_sub(value);
    cpu.p.set(Status::CARRY, register >= value);
    cpu.p.set_zn(diff);
}

pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let register = cpu.a;
    compare(cpu, register, operand.value);
}

pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let register = cpu.x;
    compare(cpu, register, operand.value);
}

pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let register = cpu.y;
    compare(cpu, register, operand.value);
}

/// Executes the BIT (Bit Test) instruction.
///
/// N and V are copied from bits 7 and 6 of the operand; Z is set if
/// `A & M == 0`. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = operand.value;
    cpu.p.set(Status::ZERO, cpu.a & value == 0);
    cpu.p.set(Status::NEGATIVE, value & 0x80 != 0);
    cpu.p.set(Status::OVERFLOW, value & 0x40 != 0);
}
