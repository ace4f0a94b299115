//! # Branch Instructions
//!
//! This module implements the eight conditional branches:
//! - BCC / BCS: Branch on Carry clear / set
//! - BNE / BEQ: Branch on Zero clear / set
//! - BPL / BMI: Branch on Negative clear / set
//! - BVC / BVS: Branch on Overflow clear / set
//!
//! All branch instructions use relative addressing; the resolver has already
//! computed the target from the signed offset. Cycle timing is the base cost
//! plus one when the branch is taken. The extra page-crossing cycle of real
//! hardware is not modeled.

use crate::{MemoryBus, Operand, Status, CPU};

/// Branches to `operand.address` when `flag` is in the `expected` state.
///
/// No flags are affected.
pub(crate) fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
    flag: Status,
    expected: bool,
) {
    if cpu.p.contains(flag) == expected {
        cpu.pc = operand.address;
        cpu.cycles += 1;
    }
}
