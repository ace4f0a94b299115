//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all documented 6502
//! instructions, organized by category. Every instruction receives the
//! `Operand` produced by addressing-mode resolution and mutates the CPU
//! through it; none of them touch the opcode table or the cycle counter's
//! base cost, which the step driver owns.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::{MemoryBus, Operand, Status, CPU};

/// The 56 documented 6502 instructions, plus the marker for unassigned opcodes.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Opcode with no documented instruction. Executing it does nothing;
    /// the step driver refuses to reach that point.
    Undefined,
}

impl Instruction {
    /// Three-letter assembler mnemonic, `"???"` for `Undefined`.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Adc => "ADC",
            Instruction::And => "AND",
            Instruction::Asl => "ASL",
            Instruction::Bcc => "BCC",
            Instruction::Bcs => "BCS",
            Instruction::Beq => "BEQ",
            Instruction::Bit => "BIT",
            Instruction::Bmi => "BMI",
            Instruction::Bne => "BNE",
            Instruction::Bpl => "BPL",
            Instruction::Brk => "BRK",
            Instruction::Bvc => "BVC",
            Instruction::Bvs => "BVS",
            Instruction::Clc => "CLC",
            Instruction::Cld => "CLD",
            Instruction::Cli => "CLI",
            Instruction::Clv => "CLV",
            Instruction::Cmp => "CMP",
            Instruction::Cpx => "CPX",
            Instruction::Cpy => "CPY",
            Instruction::Dec => "DEC",
            Instruction::Dex => "DEX",
            Instruction::Dey => "DEY",
            Instruction::Eor => "EOR",
            Instruction::Inc => "INC",
            Instruction::Inx => "INX",
            Instruction::Iny => "INY",
            Instruction::Jmp => "JMP",
            Instruction::Jsr => "JSR",
            Instruction::Lda => "LDA",
            Instruction::Ldx => "LDX",
            Instruction::Ldy => "LDY",
            Instruction::Lsr => "LSR",
            Instruction::Nop => "NOP",
            Instruction::Ora => "ORA",
            Instruction::Pha => "PHA",
            Instruction::Php => "PHP",
            Instruction::Pla => "PLA",
            Instruction::Plp => "PLP",
            Instruction::Rol => "ROL",
            Instruction::Ror => "ROR",
            Instruction::Rti => "RTI",
            Instruction::Rts => "RTS",
            Instruction::Sbc => "SBC",
            Instruction::Sec => "SEC",
            Instruction::Sed => "SED",
            Instruction::Sei => "SEI",
            Instruction::Sta => "STA",
            Instruction::Stx => "STX",
            Instruction::Sty => "STY",
            Instruction::Tax => "TAX",
            Instruction::Tay => "TAY",
            Instruction::Tsx => "TSX",
            Instruction::Txa => "TXA",
            Instruction::Txs => "TXS",
            Instruction::Tya => "TYA",
            Instruction::Undefined => "???",
        }
    }

    /// True for instructions that load PC themselves rather than fall through
    /// to the next opcode (jumps, calls, returns, BRK and the branches).
    pub const fn changes_control_flow(self) -> bool {
        matches!(
            self,
            Instruction::Bcc
                | Instruction::Bcs
                | Instruction::Beq
                | Instruction::Bmi
                | Instruction::Bne
                | Instruction::Bpl
                | Instruction::Bvc
                | Instruction::Bvs
                | Instruction::Brk
                | Instruction::Jmp
                | Instruction::Jsr
                | Instruction::Rti
                | Instruction::Rts
        )
    }
}

/// Runs `instruction` against an already-resolved operand.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, instruction: Instruction, operand: Operand) {
    match instruction {
        Instruction::Adc => alu::execute_adc(cpu, operand),
        Instruction::Sbc => alu::execute_sbc(cpu, operand),
        Instruction::And => alu::execute_and(cpu, operand),
        Instruction::Ora => alu::execute_ora(cpu, operand),
        Instruction::Eor => alu::execute_eor(cpu, operand),
        Instruction::Cmp => alu::execute_cmp(cpu, operand),
        Instruction::Cpx => alu::execute_cpx(cpu, operand),
        Instruction::Cpy => alu::execute_cpy(cpu, operand),
        Instruction::Bit => alu::execute_bit(cpu, operand),

        Instruction::Bcc => branches::branch_if(cpu, operand, Status::CARRY, false),
        Instruction::Bcs => branches::branch_if(cpu, operand, Status::CARRY, true),
        Instruction::Bne => branches::branch_if(cpu, operand, Status::ZERO, false),
        Instruction::Beq => branches::branch_if(cpu, operand, Status::ZERO, true),
        Instruction::Bpl => branches::branch_if(cpu, operand, Status::NEGATIVE, false),
        Instruction::Bmi => branches::branch_if(cpu, operand, Status::NEGATIVE, true),
        Instruction::Bvc => branches::branch_if(cpu, operand, Status::OVERFLOW, false),
        Instruction::Bvs => branches::branch_if(cpu, operand, Status::OVERFLOW, true),

        Instruction::Asl => shifts::execute_asl(cpu, operand),
        Instruction::Lsr => shifts::execute_lsr(cpu, operand),
        Instruction::Rol => shifts::execute_rol(cpu, operand),
        Instruction::Ror => shifts::execute_ror(cpu, operand),

        Instruction::Lda => load_store::execute_lda(cpu, operand),
        Instruction::Ldx => load_store::execute_ldx(cpu, operand),
        Instruction::Ldy => load_store::execute_ldy(cpu, operand),
        Instruction::Sta => load_store::execute_sta(cpu, operand),
        Instruction::Stx => load_store::execute_stx(cpu, operand),
        Instruction::Sty => load_store::execute_sty(cpu, operand),

        Instruction::Inc => inc_dec::execute_inc(cpu, operand),
        Instruction::Dec => inc_dec::execute_dec(cpu, operand),
        Instruction::Inx => inc_dec::execute_inx(cpu),
        Instruction::Iny => inc_dec::execute_iny(cpu),
        Instruction::Dex => inc_dec::execute_dex(cpu),
        Instruction::Dey => inc_dec::execute_dey(cpu),

        Instruction::Jmp => control::execute_jmp(cpu, operand),
        Instruction::Jsr => control::execute_jsr(cpu, operand),
        Instruction::Rts => control::execute_rts(cpu),
        Instruction::Rti => control::execute_rti(cpu),
        Instruction::Brk => control::execute_brk(cpu),
        Instruction::Nop => control::execute_nop(cpu),

        Instruction::Pha => stack::execute_pha(cpu),
        Instruction::Php => stack::execute_php(cpu),
        Instruction::Pla => stack::execute_pla(cpu),
        Instruction::Plp => stack::execute_plp(cpu),

        Instruction::Clc => flags::execute_clear(cpu, Status::CARRY),
        Instruction::Sec => flags::execute_set(cpu, Status::CARRY),
        Instruction::Cli => flags::execute_clear(cpu, Status::INTERRUPT_DISABLE),
        Instruction::Sei => flags::execute_set(cpu, Status::INTERRUPT_DISABLE),
        Instruction::Cld => flags::execute_clear(cpu, Status::DECIMAL),
        Instruction::Sed => flags::execute_set(cpu, Status::DECIMAL),
        Instruction::Clv => flags::execute_clear(cpu, Status::OVERFLOW),

        Instruction::Tax => transfer::execute_tax(cpu),
        Instruction::Tay => transfer::execute_tay(cpu),
        Instruction::Txa => transfer::execute_txa(cpu),
        Instruction::Tya => transfer::execute_tya(cpu),
        Instruction::Tsx => transfer::execute_tsx(cpu),
        Instruction::Txs => transfer::execute_txs(cpu),

        Instruction::Undefined => {}
    }
}
