//! Klaus Dormann's 6502 Functional Test
//!
//! Runs the functional test image from
//! https://github.com/Klaus2m5/6502_65C02_functional_tests
//! which exercises every documented opcode and addressing mode.
//!
//! The image is not shipped with the crate. Assemble it (or download a
//! prebuilt `6502_functional_test.bin`) into `tests/fixtures/`, then run:
//!
//! ```text
//! cargo test --test functional_klaus -- --ignored
//! ```
//!
//! ADC has no decimal mode, so the image must be assembled with
//! `disable_decimal = 1`. The test traps with `JMP *` everywhere: at the
//! `success` label on success, anywhere else on failure. Pass the label's
//! address from the listing in `KLAUS_SUCCESS_ADDRESS` (hex) when it is not
//! $3469. The listing also maps a failing address back to the check that
//! tripped.

use core6502::{load_image, FlatMemory, MemoryBus, CPU};
use std::path::Path;

const IMAGE_PATH: &str = "tests/fixtures/6502_functional_test.bin";

/// Default success address - where PC ends up when all tests pass
const DEFAULT_SUCCESS_ADDRESS: u16 = 0x3469;

/// Entry point for the functional test
const ENTRY_POINT: u16 = 0x0400;

/// Upper bound on cycles; a correct run needs about 96 million
const MAX_CYCLES: u64 = 200_000_000;

fn success_address() -> u16 {
    std::env::var("KLAUS_SUCCESS_ADDRESS")
        .ok()
        .and_then(|text| u16::from_str_radix(text.trim_start_matches('$'), 16).ok())
        .unwrap_or(DEFAULT_SUCCESS_ADDRESS)
}

fn load_test_image() -> Option<FlatMemory> {
    if !Path::new(IMAGE_PATH).exists() {
        eprintln!("skipping: {} not found", IMAGE_PATH);
        return None;
    }

    let mut memory = FlatMemory::new();
    let written = load_image(&mut memory, IMAGE_PATH, 0x0000).unwrap();
    assert_eq!(written, 0x10000, "test image must be exactly 64KB");

    memory.write(0xFFFC, ENTRY_POINT as u8);
    memory.write(0xFFFD, (ENTRY_POINT >> 8) as u8);
    Some(memory)
}

/// Steps until PC stops moving and returns the trap address.
fn run_until_trap(cpu: &mut CPU<FlatMemory>) -> Result<u16, String> {
    loop {
        if cpu.cycles() >= MAX_CYCLES {
            return Err(format!("timeout at PC ${:04X}", cpu.pc()));
        }

        let pc = cpu.pc();
        cpu.step().map_err(|e| e.to_string())?;

        if cpu.pc() == pc {
            return Ok(pc);
        }
    }
}

fn format_cpu_state(cpu: &CPU<FlatMemory>) -> String {
    format!(
        "PC:${:04X} A:${:02X} X:${:02X} Y:${:02X} SP:${:02X} P:${:02X} Cycles:{}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.status(),
        cpu.cycles()
    )
}

#[test]
#[ignore = "needs tests/fixtures/6502_functional_test.bin and runs for several seconds"]
fn klaus_6502_functional_test() {
    let Some(memory) = load_test_image() else {
        return;
    };
    let mut cpu = CPU::new(memory);
    assert_eq!(cpu.pc(), ENTRY_POINT);

    let trap = match run_until_trap(&mut cpu) {
        Ok(pc) => pc,
        Err(e) => panic!("{} ({})", e, format_cpu_state(&cpu)),
    };

    assert_eq!(
        trap,
        success_address(),
        "trapped at ${:04X}; {}",
        trap,
        format_cpu_state(&cpu)
    );
}

#[test]
#[ignore = "needs tests/fixtures/6502_functional_test.bin"]
fn test_image_layout() {
    let Some(memory) = load_test_image() else {
        return;
    };

    // CLD at the entry point, JMP * at the success address
    assert_eq!(memory.read(ENTRY_POINT), 0xD8);
    let success = success_address();
    assert_eq!(memory.read(success), 0x4C);
    assert_eq!(memory.read(success + 1), success as u8);
    assert_eq!(memory.read(success + 2), (success >> 8) as u8);
}
