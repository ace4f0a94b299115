//! # Interrupt Controller
//!
//! The 6502 has two interrupt inputs:
//!
//! - **NMI** (non-maskable): serviced before the next instruction whenever its
//!   latch is set, regardless of the I flag.
//! - **IRQ** (maskable): serviced only while the I flag is clear. The line is
//!   the CPU's own latch OR-ed with `MemoryBus::irq_active()`, so a device
//!   behind the bus can hold it asserted.
//!
//! NMI wins when both are pending. Checking happens at the start of every
//! `step()`, so a request raised between steps is seen by the very next one.
//!
//! ## Interrupt Service Sequence
//!
//! 1. Clear the serviced latch
//! 2. Push PC (high byte, then low byte)
//! 3. Push the status register with bit 5 set and B clear
//! 4. Set the I flag to block nested IRQs
//! 5. Load PC from the vector ($FFFA for NMI, $FFFE for IRQ)
//!
//! **Total: 7 cycles**
//!
//! Unlike BRK, the pushed status never has B set, which is how a handler
//! sharing the IRQ vector tells the two apart.

use crate::{MemoryBus, Status, CPU, IRQ_VECTOR, NMI_VECTOR};

/// Cycle cost of servicing an interrupt.
pub const INTERRUPT_CYCLES: u64 = 7;

/// A hardware interrupt request the CPU can service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Non-maskable interrupt.
    Nmi,
    /// Maskable interrupt request.
    Irq,
}

impl Interrupt {
    /// Address of the vector holding this interrupt's handler.
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Latches a non-maskable interrupt.
    ///
    /// It is serviced at the start of the next `step()`, even with I set.
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.write(0xFFFC, 0x00);
    /// memory.write(0xFFFD, 0x80);
    /// memory.write(0xFFFA, 0x00);
    /// memory.write(0xFFFB, 0x90);
    ///
    /// let mut cpu = CPU::new(memory);
    /// cpu.trigger_nmi();
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.pc(), 0x9000);
    /// assert_eq!(cpu.cycles(), 7);
    /// ```
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Latches a maskable interrupt request.
    ///
    /// It is serviced at the start of the first `step()` that finds the I flag
    /// clear. The latch stays set until then.
    pub fn trigger_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Returns true while an NMI is latched and not yet serviced.
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Returns true while an IRQ is latched and not yet serviced.
    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Picks the interrupt the next step must service, if any.
    pub(crate) fn pending_interrupt(&self) -> Option<Interrupt> {
        if self.nmi_pending {
            return Some(Interrupt::Nmi);
        }

        let irq_line = self.irq_pending || self.memory.irq_active();
        if irq_line && !self.p.contains(Status::INTERRUPT_DISABLE) {
            return Some(Interrupt::Irq);
        }

        None
    }

    /// Runs the interrupt service sequence for `interrupt`.
    pub(crate) fn service_interrupt(&mut self, interrupt: Interrupt) {
        match interrupt {
            Interrupt::Nmi => self.nmi_pending = false,
            Interrupt::Irq => self.irq_pending = false,
        }

        self.push_word(self.pc);
        self.push_byte(self.p.to_byte_irq());
        self.p.insert(Status::INTERRUPT_DISABLE);

        let return_address = self.pc;
        self.pc = self.read_word(interrupt.vector());
        self.cycles += INTERRUPT_CYCLES;

        log::debug!(
            "{:?} serviced: ${:04X} -> ${:04X}",
            interrupt,
            return_address,
            self.pc
        );
    }
}
