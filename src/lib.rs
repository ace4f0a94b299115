//! # 6502 CPU Emulator Core
//!
//! An instruction-level NMOS 6502 CPU emulator: registers and flags, the
//! thirteen addressing modes, the 151 documented opcodes with their base
//! cycle costs, NMI/IRQ servicing and a step driver.
//!
//! The CPU owns a memory bus implementing [`MemoryBus`]; embedders either use
//! the 64 KiB [`FlatMemory`] or plug in their own bus with memory-mapped
//! devices. Nothing runs on its own: callers drive execution one
//! [`CPU::step`] at a time or with [`CPU::run_for_cycles`].
//!
//! ## Quick Start
//!
//! ```rust
//! use core6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDX #$03 ; loop: DEX ; BNE loop
//! core6502::load_bytes(&mut memory, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD], 0x8000).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert_eq!(cpu.flag_i(), true);
//!
//! for _ in 0..7 {
//!     cpu.step().unwrap();
//! }
//! assert_eq!(cpu.x(), 0);
//! assert_eq!(cpu.pc(), 0x8005);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, reset and the step driver
//! - `status` - Status register flags
//! - `memory` - MemoryBus trait and the flat 64 KiB implementation
//! - `loader` - Copying program images into memory
//! - `addressing` - Addressing modes and operand resolution
//! - `opcodes` - Opcode metadata table
//! - `interrupts` - NMI/IRQ latching and servicing

pub mod addressing;
pub mod cpu;
pub mod interrupts;
pub mod loader;
pub mod memory;
pub mod opcodes;
pub mod status;

// Instruction semantics are reached only through the opcode table
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{AddressingMode, Operand};
pub use cpu::{CPU, IRQ_VECTOR, NMI_VECTOR, RESET_SP, RESET_STATUS, RESET_VECTOR, STACK_BASE};
pub use instructions::Instruction;
pub use interrupts::{Interrupt, INTERRUPT_CYCLES};
pub use loader::{load_bytes, load_image, LoadError};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};
pub use status::Status;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at `pc` is not one of the documented opcodes.
    ///
    /// The CPU is left with PC on the offending byte.
    UndefinedOpcode { opcode: u8, pc: u16 },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UndefinedOpcode { opcode, pc } => {
                write!(f, "undefined opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
