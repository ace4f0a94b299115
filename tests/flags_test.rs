//! Tests for the flag instructions (CLC, SEC, CLI, SEI, CLD, SED, CLV).

use core6502::{FlatMemory, MemoryBus, Status, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// Runs `opcode` from the given status byte and returns the resulting status.
fn run_flag_op(opcode: u8, status: u8) -> u8 {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, opcode);
    cpu.set_status(status);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
    cpu.status()
}

#[test]
fn test_clc_sec() {
    assert_eq!(run_flag_op(0x18, 0xFF), 0xFE);
    assert_eq!(run_flag_op(0x38, 0x20), 0x21);
}

#[test]
fn test_cli_sei() {
    assert_eq!(run_flag_op(0x58, 0x24), 0x20);
    assert_eq!(run_flag_op(0x78, 0x20), 0x24);
}

#[test]
fn test_cld_sed() {
    assert_eq!(run_flag_op(0xD8, 0x28), 0x20);
    assert_eq!(run_flag_op(0xF8, 0x20), 0x28);
}

#[test]
fn test_clv() {
    assert_eq!(run_flag_op(0xB8, 0x60), 0x20);
}

#[test]
fn test_flag_accessors_agree_with_status() {
    let mut cpu = setup_cpu();

    cpu.set_flag(Status::OVERFLOW, true);
    cpu.set_flag(Status::CARRY, true);

    assert!(cpu.flag_v());
    assert!(cpu.flag(Status::CARRY | Status::OVERFLOW));
    assert_eq!(cpu.status(), 0x65);

    cpu.set_flag(Status::CARRY, false);
    assert_eq!(cpu.status(), 0x64);
}

#[test]
fn test_set_status_keeps_unused_bit() {
    let mut cpu = setup_cpu();
    cpu.set_status(0x00);
    assert_eq!(cpu.status(), 0x20);
}
