//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolver that turns the operand bytes following an opcode into an
//! effective address and a fetched operand.
//!
//! Resolution runs after the opcode byte has been fetched, so PC already
//! points at the first operand byte. Every mode consumes exactly
//! `operand_bytes()` bytes.

use crate::{MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    ///
    /// Reproduces the NMOS page-wrap bug: with a pointer of `$xxFF` the high
    /// byte of the target is read from `$xx00`, not from the next page.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    ///
    /// ```
    /// use core6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
    /// assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
    /// assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
    /// ```
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Result of addressing-mode resolution, handed to the instruction.
///
/// Built fresh on every step and consumed by the instruction that follows;
/// nothing in it survives into the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Mode that produced this operand.
    pub mode: AddressingMode,

    /// Effective address. Branch target for Relative, jump target for
    /// Indirect, 0 for Implicit and Accumulator.
    pub address: u16,

    /// Fetched operand byte. The accumulator for Accumulator mode, the raw
    /// offset byte for Relative, 0 for Implicit and Indirect.
    pub value: u8,
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves the operand for `mode`, advancing PC past its operand bytes.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let (address, value) = match mode {
            AddressingMode::Implicit => (0, 0),
            AddressingMode::Accumulator => (0, self.a),
            AddressingMode::Immediate => {
                let address = self.pc;
                (address, self.fetch_byte())
            }
            AddressingMode::ZeroPage => {
                let address = self.fetch_byte() as u16;
                (address, self.memory.read(address))
            }
            AddressingMode::ZeroPageX => {
                let address = self.fetch_byte().wrapping_add(self.x) as u16;
                (address, self.memory.read(address))
            }
            AddressingMode::ZeroPageY => {
                let address = self.fetch_byte().wrapping_add(self.y) as u16;
                (address, self.memory.read(address))
            }
            AddressingMode::Relative => {
                let offset = self.fetch_byte();
                let target = self.pc.wrapping_add_signed(offset as i8 as i16);
                (target, offset)
            }
            AddressingMode::Absolute => {
                let address = self.fetch_word();
                (address, self.memory.read(address))
            }
            AddressingMode::AbsoluteX => {
                let address = self.fetch_word().wrapping_add(self.x as u16);
                (address, self.memory.read(address))
            }
            AddressingMode::AbsoluteY => {
                let address = self.fetch_word().wrapping_add(self.y as u16);
                (address, self.memory.read(address))
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let lo = self.memory.read(pointer) as u16;
                // NMOS bug: the pointer increment never carries into the high byte
                let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let hi = self.memory.read(hi_addr) as u16;
                ((hi << 8) | lo, 0)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.x);
                let address = self.read_word_zero_page(pointer);
                (address, self.memory.read(address))
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let address = self
                    .read_word_zero_page(pointer)
                    .wrapping_add(self.y as u16);
                (address, self.memory.read(address))
            }
        };

        Operand {
            mode,
            address,
            value,
        }
    }
}
