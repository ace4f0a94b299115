//! Tests for the shift and rotate instructions (ASL, LSR, ROL, ROR).
//!
//! Each is exercised in accumulator mode and against memory, covering the
//! bit shifted into carry and the bit shifted in from carry.

use core6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== ASL ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x0A);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_asl_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x06);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0x40);
    cpu.set_a(0x11);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert_eq!(cpu.a(), 0x11);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_asl_absolute_x_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x1E);
    cpu.memory_mut().write(0x8001, 0x00);
    cpu.memory_mut().write(0x8002, 0x20);
    cpu.memory_mut().write(0x2005, 0x80);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2005), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 7);
}

// ========== LSR ==========

#[test]
fn test_lsr_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x4A);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x4E);
    cpu.memory_mut().write(0x8001, 0x34);
    cpu.memory_mut().write(0x8002, 0x12);
    cpu.memory_mut().write(0x1234, 0xFE);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x1234), 0x7F);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}

// ========== ROL ==========

#[test]
fn test_rol_accumulator_uses_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x2A);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_rol_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x36);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0012, 0x40);
    cpu.set_x(0x02);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0012), 0x80);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 6);
}

// ========== ROR ==========

#[test]
fn test_ror_accumulator_uses_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x6A);
    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_memory_without_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x66);
    cpu.memory_mut().write(0x8001, 0x20);
    cpu.memory_mut().write(0x0020, 0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0020), 0x01);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_rol_then_ror_restores_value() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x2A);
    cpu.memory_mut().write(0x8001, 0x6A);
    cpu.set_a(0xB4);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xB4);
    assert!(!cpu.flag_c());
}
