//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//! - NOP: No operation
//!
//! JSR pushes the address of its own last byte (PC - 1), so RTS adds one to
//! the pulled value. RTI pulls the exact return address and adds nothing.

use crate::{MemoryBus, Operand, Status, CPU, IRQ_VECTOR};

/// Executes the JMP (Jump) instruction.
///
/// The target was resolved by the addressing mode, including the indirect
/// page-wrap bug for `JMP ($xxFF)`. Flags affected: none.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.pc = operand.address;
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes PC - 1 (high byte first), then jumps. Flags affected: none.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.pc = operand.address;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address (low byte first) and resumes one byte past it.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK forces a software interrupt by:
/// 1. Pushing PC + 1 (BRK is one byte, the byte after it is skipped as padding)
/// 2. Pushing the status register with B and bit 5 set
/// 3. Setting the I (interrupt disable) flag
/// 4. Loading PC from the IRQ/BRK vector at $FFFE/$FFFF
///
/// The live B flag is left alone; B only exists in the pushed copy.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    let return_address = cpu.pc.wrapping_add(1);
    cpu.push_word(return_address);
    cpu.push_byte(cpu.p.to_byte_brk());
    cpu.p.insert(Status::INTERRUPT_DISABLE);
    cpu.pc = cpu.read_word(IRQ_VECTOR);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (bit 5 forced set, B cleared), then PC.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pull_byte();
    cpu.p = Status::from_pulled(status);
    cpu.pc = cpu.pull_word();
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>) {}
