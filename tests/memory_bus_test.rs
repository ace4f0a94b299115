//! Memory bus trait tests
//!
//! Verifies FlatMemory and that the CPU works over a custom bus.

use core6502::{FlatMemory, MemoryBus, CPU};

#[test]
fn test_flat_memory_initialization() {
    let memory = FlatMemory::new();

    for addr in [0x0000, 0x1234, 0x8000, 0xFFFF] {
        assert_eq!(memory.read(addr), 0x00, "memory at 0x{:04X}", addr);
    }
}

#[test]
fn test_flat_memory_read_write() {
    let mut memory = FlatMemory::new();

    let test_data = [
        (0x0000, 0x01),
        (0x00FF, 0xFF),
        (0x0100, 0x7F),
        (0x8000, 0xAB),
        (0xFFFF, 0xCD),
    ];

    for &(addr, value) in &test_data {
        memory.write(addr, value);
    }
    for &(addr, value) in &test_data {
        assert_eq!(memory.read(addr), value, "memory at 0x{:04X}", addr);
    }
}

#[test]
fn test_flat_memory_irq_line_idle() {
    assert!(!FlatMemory::new().irq_active());
}

/// ROM in the top 16KB that silently ignores writes, RAM elsewhere.
struct RomRamMemory {
    ram: Vec<u8>,
    rom: Vec<u8>,
}

impl MemoryBus for RomRamMemory {
    fn read(&self, addr: u16) -> u8 {
        if addr >= 0xC000 {
            self.rom[(addr - 0xC000) as usize]
        } else {
            self.ram[addr as usize]
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr < 0xC000 {
            self.ram[addr as usize] = value;
        }
    }
}

#[test]
fn test_cpu_over_custom_bus() {
    let mut rom = vec![0xEA; 0x4000];
    // Reset vector -> $C000
    rom[0x3FFC] = 0x00;
    rom[0x3FFD] = 0xC0;
    // LDA #$77 ; STA $C100 ; STA $0300
    rom[..7].copy_from_slice(&[0xA9, 0x77, 0x8D, 0x00, 0xC1, 0x8D, 0x00]);
    rom[7] = 0x03;

    let mut cpu = CPU::new(RomRamMemory {
        ram: vec![0; 0xC000],
        rom,
    });

    assert_eq!(cpu.pc(), 0xC000);
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0xC100), 0xEA);
    assert_eq!(cpu.memory().read(0x0300), 0x77);
}
