//! Fuzz target for the step driver.
//!
//! Builds an arbitrary register file, a few populated memory regions and a
//! pending interrupt or two, then runs a short burst of steps. Any panic is
//! a bug; undefined opcodes must surface as errors that leave PC in place.

#![no_main]

use arbitrary::Arbitrary;
use core6502::{FlatMemory, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    nmi: bool,
    irq: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Code at the reset address
    program: [u8; 32],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Interrupt handler code at $9000
    handler: [u8; 16],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fn write_block(memory: &mut FlatMemory, start: u16, bytes: &[u8]) {
    for (i, &byte) in bytes.iter().enumerate() {
        memory.write(start.wrapping_add(i as u16), byte);
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    write_block(&mut memory, 0x0000, &input.memory.zero_page);
    write_block(&mut memory, 0x0100, &input.memory.stack_page);
    write_block(&mut memory, 0x8000, &input.memory.program);
    write_block(&mut memory, 0x9000, &input.memory.handler);

    // Reset -> $8000, NMI and IRQ -> $9000
    write_block(&mut memory, 0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0x90]);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    if input.cpu_state.nmi {
        cpu.trigger_nmi();
    }
    if input.cpu_state.irq {
        cpu.trigger_irq();
    }

    for _ in 0..input.steps % 64 {
        let pc = cpu.pc();
        let cycles = cpu.cycles();

        match cpu.step() {
            Ok(()) => {
                assert!(cpu.cycles() > cycles);
            }
            Err(_) => {
                assert_eq!(cpu.pc(), pc);
                assert_eq!(cpu.cycles(), cycles);
                break;
            }
        }

        assert!(cpu.status() & 0x20 != 0);
    }
});
