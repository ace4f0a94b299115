//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for decoding 6502 instructions.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **105 unassigned opcodes** - Left as the `UNDEFINED` marker ("???")
//!
//! Each opcode entry includes:
//! - Instruction to execute
//! - Mnemonic (diagnostic only)
//! - Addressing mode
//! - Base cycle cost (page-crossing penalties are not modeled)
//! - Instruction size in bytes

use crate::addressing::AddressingMode;
use crate::instructions::Instruction;

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use core6502::{AddressingMode, Instruction, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.instruction, Instruction::Lda);
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction semantics to run after resolving the operand.
    pub instruction: Instruction,

    /// Instruction mnemonic (e.g., "LDA", "STA", "???" for unassigned opcodes).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost.
    ///
    /// Documented instructions cost 2-7 cycles. Unassigned opcodes are 0.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    /// Marker for opcodes with no documented instruction.
    ///
    /// Executing it would change nothing, but the step driver never does:
    /// it reports `ExecutionError::UndefinedOpcode` instead.
    pub const UNDEFINED: OpcodeMetadata = OpcodeMetadata {
        instruction: Instruction::Undefined,
        mnemonic: "???",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 0,
        size_bytes: 1,
    };

    const fn new(instruction: Instruction, addressing_mode: AddressingMode, base_cycles: u8) -> Self {
        OpcodeMetadata {
            instruction,
            mnemonic: instruction.mnemonic(),
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_bytes(),
        }
    }

    /// Returns `false` for the `UNDEFINED` marker.
    pub const fn is_defined(&self) -> bool {
        !matches!(self.instruction, Instruction::Undefined)
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use core6502::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// let illegal = &OPCODE_TABLE[0x02];
/// assert!(!illegal.is_defined());
/// assert_eq!(illegal.mnemonic, "???");
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = build_opcode_table();

const fn build_opcode_table() -> [OpcodeMetadata; 256] {
    use AddressingMode::*;
    use Instruction::*;

    let mut t = [OpcodeMetadata::UNDEFINED; 256];

    // Load / store
    t[0xA9] = OpcodeMetadata::new(Lda, Immediate, 2);
    t[0xA5] = OpcodeMetadata::new(Lda, ZeroPage, 3);
    t[0xB5] = OpcodeMetadata::new(Lda, ZeroPageX, 4);
    t[0xAD] = OpcodeMetadata::new(Lda, Absolute, 4);
    t[0xBD] = OpcodeMetadata::new(Lda, AbsoluteX, 4);
    t[0xB9] = OpcodeMetadata::new(Lda, AbsoluteY, 4);
    t[0xA1] = OpcodeMetadata::new(Lda, IndirectX, 6);
    t[0xB1] = OpcodeMetadata::new(Lda, IndirectY, 5);

    t[0xA2] = OpcodeMetadata::new(Ldx, Immediate, 2);
    t[0xA6] = OpcodeMetadata::new(Ldx, ZeroPage, 3);
    t[0xB6] = OpcodeMetadata::new(Ldx, ZeroPageY, 4);
    t[0xAE] = OpcodeMetadata::new(Ldx, Absolute, 4);
    t[0xBE] = OpcodeMetadata::new(Ldx, AbsoluteY, 4);

    t[0xA0] = OpcodeMetadata::new(Ldy, Immediate, 2);
    t[0xA4] = OpcodeMetadata::new(Ldy, ZeroPage, 3);
    t[0xB4] = OpcodeMetadata::new(Ldy, ZeroPageX, 4);
    t[0xAC] = OpcodeMetadata::new(Ldy, Absolute, 4);
    t[0xBC] = OpcodeMetadata::new(Ldy, AbsoluteX, 4);

    t[0x85] = OpcodeMetadata::new(Sta, ZeroPage, 3);
    t[0x95] = OpcodeMetadata::new(Sta, ZeroPageX, 4);
    t[0x8D] = OpcodeMetadata::new(Sta, Absolute, 4);
    t[0x9D] = OpcodeMetadata::new(Sta, AbsoluteX, 5);
    t[0x99] = OpcodeMetadata::new(Sta, AbsoluteY, 5);
    t[0x81] = OpcodeMetadata::new(Sta, IndirectX, 6);
    t[0x91] = OpcodeMetadata::new(Sta, IndirectY, 6);

    t[0x86] = OpcodeMetadata::new(Stx, ZeroPage, 3);
    t[0x96] = OpcodeMetadata::new(Stx, ZeroPageY, 4);
    t[0x8E] = OpcodeMetadata::new(Stx, Absolute, 4);

    t[0x84] = OpcodeMetadata::new(Sty, ZeroPage, 3);
    t[0x94] = OpcodeMetadata::new(Sty, ZeroPageX, 4);
    t[0x8C] = OpcodeMetadata::new(Sty, Absolute, 4);

    // Register transfers
    t[0xAA] = OpcodeMetadata::new(Tax, Implicit, 2);
    t[0x8A] = OpcodeMetadata::new(Txa, Implicit, 2);
    t[0xA8] = OpcodeMetadata::new(Tay, Implicit, 2);
    t[0x98] = OpcodeMetadata::new(Tya, Implicit, 2);
    t[0xBA] = OpcodeMetadata::new(Tsx, Implicit, 2);
    t[0x9A] = OpcodeMetadata::new(Txs, Implicit, 2);

    // Stack
    t[0x48] = OpcodeMetadata::new(Pha, Implicit, 3);
    t[0x08] = OpcodeMetadata::new(Php, Implicit, 3);
    t[0x68] = OpcodeMetadata::new(Pla, Implicit, 4);
    t[0x28] = OpcodeMetadata::new(Plp, Implicit, 4);

    // Logic
    t[0x29] = OpcodeMetadata::new(And, Immediate, 2);
    t[0x25] = OpcodeMetadata::new(And, ZeroPage, 3);
    t[0x35] = OpcodeMetadata::new(And, ZeroPageX, 4);
    t[0x2D] = OpcodeMetadata::new(And, Absolute, 4);
    t[0x3D] = OpcodeMetadata::new(And, AbsoluteX, 4);
    t[0x39] = OpcodeMetadata::new(And, AbsoluteY, 4);
    t[0x21] = OpcodeMetadata::new(And, IndirectX, 6);
    t[0x31] = OpcodeMetadata::new(And, IndirectY, 5);

    t[0x49] = OpcodeMetadata::new(Eor, Immediate, 2);
    t[0x45] = OpcodeMetadata::new(Eor, ZeroPage, 3);
    t[0x55] = OpcodeMetadata::new(Eor, ZeroPageX, 4);
    t[0x4D] = OpcodeMetadata::new(Eor, Absolute, 4);
    t[0x5D] = OpcodeMetadata::new(Eor, AbsoluteX, 4);
    t[0x59] = OpcodeMetadata::new(Eor, AbsoluteY, 4);
    t[0x41] = OpcodeMetadata::new(Eor, IndirectX, 6);
    t[0x51] = OpcodeMetadata::new(Eor, IndirectY, 5);

    t[0x09] = OpcodeMetadata::new(Ora, Immediate, 2);
    t[0x05] = OpcodeMetadata::new(Ora, ZeroPage, 3);
    t[0x15] = OpcodeMetadata::new(Ora, ZeroPageX, 4);
    t[0x0D] = OpcodeMetadata::new(Ora, Absolute, 4);
    t[0x1D] = OpcodeMetadata::new(Ora, AbsoluteX, 4);
    t[0x19] = OpcodeMetadata::new(Ora, AbsoluteY, 4);
    t[0x01] = OpcodeMetadata::new(Ora, IndirectX, 6);
    t[0x11] = OpcodeMetadata::new(Ora, IndirectY, 5);

    t[0x24] = OpcodeMetadata::new(Bit, ZeroPage, 3);
    t[0x2C] = OpcodeMetadata::new(Bit, Absolute, 4);

    // Arithmetic
    t[0x69] = OpcodeMetadata::new(Adc, Immediate, 2);
    t[0x65] = OpcodeMetadata::new(Adc, ZeroPage, 3);
    t[0x75] = OpcodeMetadata::new(Adc, ZeroPageX, 4);
    t[0x6D] = OpcodeMetadata::new(Adc, Absolute, 4);
    t[0x7D] = OpcodeMetadata::new(Adc, AbsoluteX, 4);
    t[0x79] = OpcodeMetadata::new(Adc, AbsoluteY, 4);
    t[0x61] = OpcodeMetadata::new(Adc, IndirectX, 6);
    t[0x71] = OpcodeMetadata::new(Adc, IndirectY, 5);

    t[0xE9] = OpcodeMetadata::new(Sbc, Immediate, 2);
    t[0xE5] = OpcodeMetadata::new(Sbc, ZeroPage, 3);
    t[0xF5] = OpcodeMetadata::new(Sbc, ZeroPageX, 4);
    t[0xED] = OpcodeMetadata::new(Sbc, Absolute, 4);
    t[0xFD] = OpcodeMetadata::new(Sbc, AbsoluteX, 4);
    t[0xF9] = OpcodeMetadata::new(Sbc, AbsoluteY, 4);
    t[0xE1] = OpcodeMetadata::new(Sbc, IndirectX, 6);
    t[0xF1] = OpcodeMetadata::new(Sbc, IndirectY, 5);

    t[0xC9] = OpcodeMetadata::new(Cmp, Immediate, 2);
    t[0xC5] = OpcodeMetadata::new(Cmp, ZeroPage, 3);
    t[0xD5] = OpcodeMetadata::new(Cmp, ZeroPageX, 4);
    t[0xCD] = OpcodeMetadata::new(Cmp, Absolute, 4);
    t[0xDD] = OpcodeMetadata::new(Cmp, AbsoluteX, 4);
    t[0xD9] = OpcodeMetadata::new(Cmp, AbsoluteY, 4);
    t[0xC1] = OpcodeMetadata::new(Cmp, IndirectX, 6);
    t[0xD1] = OpcodeMetadata::new(Cmp, IndirectY, 5);

    t[0xE0] = OpcodeMetadata::new(Cpx, Immediate, 2);
    t[0xE4] = OpcodeMetadata::new(Cpx, ZeroPage, 3);
    t[0xEC] = OpcodeMetadata::new(Cpx, Absolute, 4);

    t[0xC0] = OpcodeMetadata::new(Cpy, Immediate, 2);
    t[0xC4] = OpcodeMetadata::new(Cpy, ZeroPage, 3);
    t[0xCC] = OpcodeMetadata::new(Cpy, Absolute, 4);

    // Increments and decrements
    t[0xE6] = OpcodeMetadata::new(Inc, ZeroPage, 5);
    t[0xF6] = OpcodeMetadata::new(Inc, ZeroPageX, 6);
    t[0xEE] = OpcodeMetadata::new(Inc, Absolute, 6);
    t[0xFE] = OpcodeMetadata::new(Inc, AbsoluteX, 7);
    t[0xE8] = OpcodeMetadata::new(Inx, Implicit, 2);
    t[0xC8] = OpcodeMetadata::new(Iny, Implicit, 2);

    t[0xC6] = OpcodeMetadata::new(Dec, ZeroPage, 5);
    t[0xD6] = OpcodeMetadata::new(Dec, ZeroPageX, 6);
    t[0xCE] = OpcodeMetadata::new(Dec, Absolute, 6);
    t[0xDE] = OpcodeMetadata::new(Dec, AbsoluteX, 7);
    t[0xCA] = OpcodeMetadata::new(Dex, Implicit, 2);
    t[0x88] = OpcodeMetadata::new(Dey, Implicit, 2);

    // Shifts and rotates
    t[0x0A] = OpcodeMetadata::new(Asl, Accumulator, 2);
    t[0x06] = OpcodeMetadata::new(Asl, ZeroPage, 5);
    t[0x16] = OpcodeMetadata::new(Asl, ZeroPageX, 6);
    t[0x0E] = OpcodeMetadata::new(Asl, Absolute, 6);
    t[0x1E] = OpcodeMetadata::new(Asl, AbsoluteX, 7);

    t[0x4A] = OpcodeMetadata::new(Lsr, Accumulator, 2);
    t[0x46] = OpcodeMetadata::new(Lsr, ZeroPage, 5);
    t[0x56] = OpcodeMetadata::new(Lsr, ZeroPageX, 6);
    t[0x4E] = OpcodeMetadata::new(Lsr, Absolute, 6);
    t[0x5E] = OpcodeMetadata::new(Lsr, AbsoluteX, 7);

    t[0x2A] = OpcodeMetadata::new(Rol, Accumulator, 2);
    t[0x26] = OpcodeMetadata::new(Rol, ZeroPage, 5);
    t[0x36] = OpcodeMetadata::new(Rol, ZeroPageX, 6);
    t[0x2E] = OpcodeMetadata::new(Rol, Absolute, 6);
    t[0x3E] = OpcodeMetadata::new(Rol, AbsoluteX, 7);

    t[0x6A] = OpcodeMetadata::new(Ror, Accumulator, 2);
    t[0x66] = OpcodeMetadata::new(Ror, ZeroPage, 5);
    t[0x76] = OpcodeMetadata::new(Ror, ZeroPageX, 6);
    t[0x6E] = OpcodeMetadata::new(Ror, Absolute, 6);
    t[0x7E] = OpcodeMetadata::new(Ror, AbsoluteX, 7);

    // Jumps and calls
    t[0x4C] = OpcodeMetadata::new(Jmp, Absolute, 3);
    t[0x6C] = OpcodeMetadata::new(Jmp, Indirect, 5);
    t[0x20] = OpcodeMetadata::new(Jsr, Absolute, 6);
    t[0x60] = OpcodeMetadata::new(Rts, Implicit, 6);

    // Branches
    t[0x90] = OpcodeMetadata::new(Bcc, Relative, 2);
    t[0xB0] = OpcodeMetadata::new(Bcs, Relative, 2);
    t[0xF0] = OpcodeMetadata::new(Beq, Relative, 2);
    t[0x30] = OpcodeMetadata::new(Bmi, Relative, 2);
    t[0xD0] = OpcodeMetadata::new(Bne, Relative, 2);
    t[0x10] = OpcodeMetadata::new(Bpl, Relative, 2);
    t[0x50] = OpcodeMetadata::new(Bvc, Relative, 2);
    t[0x70] = OpcodeMetadata::new(Bvs, Relative, 2);

    // Status flag changes
    t[0x18] = OpcodeMetadata::new(Clc, Implicit, 2);
    t[0xD8] = OpcodeMetadata::new(Cld, Implicit, 2);
    t[0x58] = OpcodeMetadata::new(Cli, Implicit, 2);
    t[0xB8] = OpcodeMetadata::new(Clv, Implicit, 2);
    t[0x38] = OpcodeMetadata::new(Sec, Implicit, 2);
    t[0xF8] = OpcodeMetadata::new(Sed, Implicit, 2);
    t[0x78] = OpcodeMetadata::new(Sei, Implicit, 2);

    // System functions
    t[0x00] = OpcodeMetadata::new(Brk, Implicit, 7);
    t[0xEA] = OpcodeMetadata::new(Nop, Implicit, 2);
    t[0x40] = OpcodeMetadata::new(Rti, Implicit, 6);

    t
}
