//! Integration tests for CPU interrupt support.
//!
//! These tests verify:
//! - NMI is serviced regardless of the I flag
//! - IRQ waits while I is set and is serviced once it clears
//! - NMI takes priority over IRQ
//! - The 7-cycle service sequence and the pushed status byte
//! - A level-triggered IRQ line driven by a device behind the memory bus

use core6502::{FlatMemory, Interrupt, MemoryBus, CPU, INTERRUPT_CYCLES};

const NMI_HANDLER: u16 = 0xA000;
const IRQ_HANDLER: u16 = 0xB000;

/// Helper function to create a CPU with reset vector at 0x8000 and
/// NMI/IRQ handlers at $A000/$B000, each starting with RTI.
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0xA0);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0xB0);
    memory.write(NMI_HANDLER, 0x40);
    memory.write(IRQ_HANDLER, 0x40);
    for addr in 0x8000..0x8010 {
        memory.write(addr, 0xEA);
    }
    CPU::new(memory)
}

/// Flat memory with a device that holds the IRQ line while its status
/// register ($D000) has bit 7 set. Writing anything to $D000 acknowledges it.
struct DeviceBus {
    ram: FlatMemory,
    irq_asserted: bool,
}

const DEVICE_STATUS: u16 = 0xD000;

impl MemoryBus for DeviceBus {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            DEVICE_STATUS if self.irq_asserted => 0x80,
            DEVICE_STATUS => 0x00,
            _ => self.ram.read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            DEVICE_STATUS => self.irq_asserted = false,
            _ => self.ram.write(addr, value),
        }
    }

    fn irq_active(&self) -> bool {
        self.irq_asserted
    }
}

// ========== NMI ==========

#[test]
fn test_nmi_serviced_with_interrupts_disabled() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());

    cpu.trigger_nmi();
    assert!(cpu.nmi_pending());

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.cycles(), INTERRUPT_CYCLES);
    assert!(!cpu.nmi_pending());
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x00);
    assert_eq!(cpu.memory().read(0x01FB), 0x24);
    assert_eq!(cpu.sp(), 0xFA);
}

#[test]
fn test_nmi_return_with_rti() {
    let mut cpu = setup_cpu();
    cpu.step().unwrap(); // NOP at $8000
    cpu.trigger_nmi();

    cpu.step().unwrap(); // service
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), 0x24);
    assert_eq!(cpu.cycles(), 2 + INTERRUPT_CYCLES + 6);
}

// ========== IRQ ==========

#[test]
fn test_irq_waits_for_interrupt_enable() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8001, 0x58); // CLI

    cpu.trigger_irq();
    cpu.step().unwrap(); // NOP, IRQ masked

    assert_eq!(cpu.pc(), 0x8001);
    assert!(cpu.irq_pending());

    cpu.step().unwrap(); // CLI
    assert!(!cpu.flag_i());

    cpu.step().unwrap(); // IRQ service

    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert!(!cpu.irq_pending());
    assert!(cpu.flag_i());
    // Pushed status has I clear, B clear, bit 5 set
    assert_eq!(cpu.memory().read(0x01FB), 0x20);
    assert_eq!(cpu.cycles(), 2 + 2 + INTERRUPT_CYCLES);
}

#[test]
fn test_nmi_has_priority_over_irq() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);
    cpu.trigger_irq();
    cpu.trigger_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert!(cpu.irq_pending());

    // Still inside the NMI handler with I set; the RTI restores I clear
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8000);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), IRQ_HANDLER);
}

#[test]
fn test_interrupt_vectors() {
    assert_eq!(Interrupt::Nmi.vector(), 0xFFFA);
    assert_eq!(Interrupt::Irq.vector(), 0xFFFE);
}

#[test]
fn test_reset_clears_pending_interrupts() {
    let mut cpu = setup_cpu();
    cpu.trigger_irq();
    cpu.trigger_nmi();

    cpu.reset();

    assert!(!cpu.irq_pending());
    assert!(!cpu.nmi_pending());
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8001);
}

// ========== Device-driven IRQ line ==========

#[test]
fn test_device_irq_line_until_acknowledged() {
    let mut ram = FlatMemory::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    ram.write(0xFFFE, 0x00);
    ram.write(0xFFFF, 0xB0);
    // Main: CLI ; NOP ; NOP ...
    ram.write(0x8000, 0x58);
    for addr in 0x8001..0x8010 {
        ram.write(addr, 0xEA);
    }
    // Handler: STA $D000 (acknowledge) ; RTI
    ram.write(0xB000, 0x8D);
    ram.write(0xB001, 0x00);
    ram.write(0xB002, 0xD0);
    ram.write(0xB003, 0x40);

    let mut cpu = CPU::new(DeviceBus {
        ram,
        irq_asserted: false,
    });

    cpu.step().unwrap(); // CLI
    cpu.step().unwrap(); // NOP
    assert_eq!(cpu.pc(), 0x8002);

    cpu.memory_mut().irq_asserted = true;
    assert!(!cpu.irq_pending());

    cpu.step().unwrap(); // service
    assert_eq!(cpu.pc(), 0xB000);

    cpu.step().unwrap(); // STA $D000
    assert!(!cpu.memory().irq_asserted);

    cpu.step().unwrap(); // RTI
    assert_eq!(cpu.pc(), 0x8002);

    cpu.step().unwrap(); // NOP, line is quiet
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_device_irq_line_masked_by_i_flag() {
    let mut ram = FlatMemory::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    ram.write(0x8000, 0xEA);

    let mut cpu = CPU::new(DeviceBus {
        ram,
        irq_asserted: true,
    });

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8001);
}
