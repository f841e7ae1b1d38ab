// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CPU instruction implementations
//!
//! One handler per opcode/funct, organized by instruction category. Every
//! handler returns an [`Outcome`]: where the PC goes next and whether the
//! following instruction executes in a branch delay slot. Host errors never
//! travel through this channel — a handler that faults raises a guest
//! exception through CP0 and redirects the PC to the exception vector.

use super::decode::{Cop0Op, IType, Instruction, JType, RType};
use super::ExceptionCause;
use super::CPU;

// Instruction modules organized by category
mod arithmetic;
mod branch;
mod cop0;
mod exception;
mod jump;
mod load;
mod logical;
mod multiply;
mod shift;
mod store;
mod trap;

/// Result of executing one instruction
///
/// When `new_pc` is absent the CPU advances the PC by 4; when present it
/// jumps there. `delay_slot` marks the *next* instruction as a branch delay
/// slot; only jumps and taken branches set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Explicit next PC, if the instruction redirected control
    pub new_pc: Option<u32>,
    /// Whether the next instruction executes in a branch delay slot
    pub delay_slot: bool,
}

impl Outcome {
    /// Fall through to the next instruction
    pub(crate) fn advance() -> Self {
        Self {
            new_pc: None,
            delay_slot: false,
        }
    }

    /// Transfer control to `target` after the delay slot
    pub(crate) fn jump(target: u32) -> Self {
        Self {
            new_pc: Some(target),
            delay_slot: true,
        }
    }

    /// Transfer control to `target` with no delay slot (exceptions, ERET)
    pub(crate) fn redirect(target: u32) -> Self {
        Self {
            new_pc: Some(target),
            delay_slot: false,
        }
    }
}

impl CPU {
    /// Execute a decoded instruction
    ///
    /// Dispatches on the instruction form, then on the funct/opcode within
    /// it. Encodings with no architected meaning raise a
    /// reserved-instruction exception.
    pub(super) fn execute(&mut self, instr: Instruction) -> Outcome {
        match instr {
            Instruction::RType(r) => self.execute_rtype(r),
            Instruction::IType(i) => self.execute_itype(i),
            Instruction::JType(j) => self.execute_jtype(j),
            Instruction::Cop0(c) => self.execute_cop0(c),
        }
    }

    /// SPECIAL instructions (opcode 0x00), selected by funct
    fn execute_rtype(&mut self, r: RType) -> Outcome {
        match r.funct {
            0x00 => self.op_sll(r),     // SLL
            0x02 => self.op_srl(r),     // SRL
            0x03 => self.op_sra(r),     // SRA
            0x04 => self.op_sllv(r),    // SLLV
            0x06 => self.op_srlv(r),    // SRLV
            0x07 => self.op_srav(r),    // SRAV
            0x08 => self.op_jr(r),      // JR
            0x09 => self.op_jalr(r),    // JALR
            0x0A => self.op_movz(r),    // MOVZ
            0x0B => self.op_movn(r),    // MOVN
            0x0C => self.op_syscall(r), // SYSCALL
            0x0D => self.op_break(r),   // BREAK
            0x0F => self.op_sync(r),    // SYNC
            0x10 => self.op_mfhi(r),    // MFHI
            0x11 => self.op_mthi(r),    // MTHI
            0x12 => self.op_mflo(r),    // MFLO
            0x13 => self.op_mtlo(r),    // MTLO
            0x18 => self.op_mult(r),    // MULT
            0x19 => self.op_multu(r),   // MULTU
            0x1A => self.op_div(r),     // DIV
            0x1B => self.op_divu(r),    // DIVU
            0x20 => self.op_add(r),     // ADD
            0x21 => self.op_addu(r),    // ADDU
            0x22 => self.op_sub(r),     // SUB
            0x23 => self.op_subu(r),    // SUBU
            0x24 => self.op_and(r),     // AND
            0x25 => self.op_or(r),      // OR
            0x26 => self.op_xor(r),     // XOR
            0x27 => self.op_nor(r),     // NOR
            0x2A => self.op_slt(r),     // SLT
            0x2B => self.op_sltu(r),    // SLTU
            0x30 => self.op_tge(r),     // TGE
            0x31 => self.op_tgeu(r),    // TGEU
            0x32 => self.op_tlt(r),     // TLT
            0x33 => self.op_tltu(r),    // TLTU
            0x34 => self.op_teq(r),     // TEQ
            0x36 => self.op_tne(r),     // TNE
            _ => {
                log::warn!(
                    "Reserved SPECIAL function 0x{:02X} at PC=0x{:08X}",
                    r.funct,
                    self.pc()
                );
                self.raise(ExceptionCause::ReservedInstruction)
            }
        }
    }

    /// I-type instructions, selected by opcode
    fn execute_itype(&mut self, i: IType) -> Outcome {
        match i.opcode {
            0x01 => self.execute_regimm(i),            // BLTZ/BGEZ/BLTZAL/BGEZAL
            0x04 => self.op_beq(i),                    // BEQ
            0x05 => self.op_bne(i),                    // BNE
            0x06 => self.op_blez(i),                   // BLEZ
            0x07 => self.op_bgtz(i),                   // BGTZ
            0x08 => self.op_addi(i),                   // ADDI
            0x09 => self.op_addiu(i),                  // ADDIU
            0x0A => self.op_slti(i),                   // SLTI
            0x0B => self.op_sltiu(i),                  // SLTIU
            0x0C => self.op_andi(i),                   // ANDI
            0x0D => self.op_ori(i),                    // ORI
            0x0E => self.op_xori(i),                   // XORI
            0x0F => self.op_lui(i),                    // LUI
            0x11 | 0x12 | 0x13 => self.op_cop_unusable(i), // COP1/COP2/COP3
            0x20 => self.op_lb(i),                     // LB
            0x21 => self.op_lh(i),                     // LH
            0x22 => self.op_lwl(i),                    // LWL
            0x23 => self.op_lw(i),                     // LW
            0x24 => self.op_lbu(i),                    // LBU
            0x25 => self.op_lhu(i),                    // LHU
            0x26 => self.op_lwr(i),                    // LWR
            0x28 => self.op_sb(i),                     // SB
            0x29 => self.op_sh(i),                     // SH
            0x2A => self.op_swl(i),                    // SWL
            0x2B => self.op_sw(i),                     // SW
            0x2E => self.op_swr(i),                    // SWR
            0x30 => self.op_ll(i),                     // LL
            0x38 => self.op_sc(i),                     // SC
            _ => {
                log::warn!(
                    "Reserved opcode 0x{:02X} at PC=0x{:08X}",
                    i.opcode,
                    self.pc()
                );
                self.raise(ExceptionCause::ReservedInstruction)
            }
        }
    }

    /// J-type instructions (J, JAL)
    fn execute_jtype(&mut self, j: JType) -> Outcome {
        match j.opcode {
            0x02 => self.op_j(j),   // J
            0x03 => self.op_jal(j), // JAL
            _ => unreachable!("decode only produces J-type for opcodes 2 and 3"),
        }
    }

    /// COP0 instructions, selected by the rs field
    fn execute_cop0(&mut self, c: Cop0Op) -> Outcome {
        match c.rs {
            0x00 => self.op_mfc0(c), // MFC0
            0x04 => self.op_mtc0(c), // MTC0
            0x10 => self.execute_cop0_co(c),
            _ => {
                log::warn!(
                    "Reserved COP0 sub-opcode 0x{:02X} at PC=0x{:08X}",
                    c.rs,
                    self.pc()
                );
                self.raise(ExceptionCause::ReservedInstruction)
            }
        }
    }
}
