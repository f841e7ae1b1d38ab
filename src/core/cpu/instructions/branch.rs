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

//! Conditional branches
//!
//! A taken branch reports the target PC and marks the next instruction as
//! the delay slot; the instruction at PC+4 still executes before control
//! transfers. A branch that falls through reports neither.

use super::super::decode::IType;
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// Branch target for the currently executing instruction
    ///
    /// Target = PC + 4 + (sign_extend(imm) << 2), relative to the delay
    /// slot address.
    fn branch_target(&self, imm: u16) -> u32 {
        let offset = ((imm as i16 as i32) << 2) as u32;
        self.pc().wrapping_add(4).wrapping_add(offset)
    }

    /// BEQ: Branch on Equal
    ///
    /// Format: beq rs, rt, offset
    pub(in crate::core::cpu) fn op_beq(&mut self, i: IType) -> Outcome {
        if self.reg(i.rs) == self.reg(i.rt) {
            Outcome::jump(self.branch_target(i.imm))
        } else {
            Outcome::advance()
        }
    }

    /// BNE: Branch on Not Equal
    ///
    /// Format: bne rs, rt, offset
    pub(in crate::core::cpu) fn op_bne(&mut self, i: IType) -> Outcome {
        if self.reg(i.rs) != self.reg(i.rt) {
            Outcome::jump(self.branch_target(i.imm))
        } else {
            Outcome::advance()
        }
    }

    /// BLEZ: Branch on Less Than or Equal to Zero
    ///
    /// Format: blez rs, offset
    pub(in crate::core::cpu) fn op_blez(&mut self, i: IType) -> Outcome {
        if (self.reg(i.rs) as i32) <= 0 {
            Outcome::jump(self.branch_target(i.imm))
        } else {
            Outcome::advance()
        }
    }

    /// BGTZ: Branch on Greater Than Zero
    ///
    /// Format: bgtz rs, offset
    pub(in crate::core::cpu) fn op_bgtz(&mut self, i: IType) -> Outcome {
        if (self.reg(i.rs) as i32) > 0 {
            Outcome::jump(self.branch_target(i.imm))
        } else {
            Outcome::advance()
        }
    }

    /// REGIMM branches (opcode 0x01): BLTZ, BGEZ, BLTZAL, BGEZAL
    ///
    /// The rt field is the real opcode. The AL variants link PC + 8 into
    /// r31 whether or not the branch is taken.
    pub(in crate::core::cpu) fn execute_regimm(&mut self, i: IType) -> Outcome {
        let taken = match i.rt {
            0x00 | 0x10 => (self.reg(i.rs) as i32) < 0,  // BLTZ / BLTZAL
            0x01 | 0x11 => (self.reg(i.rs) as i32) >= 0, // BGEZ / BGEZAL
            _ => {
                log::warn!(
                    "Reserved REGIMM code 0x{:02X} at PC=0x{:08X}",
                    i.rt,
                    self.pc()
                );
                return self.raise(ExceptionCause::ReservedInstruction);
            }
        };

        // Link variants have bit 4 of rt set
        if i.rt & 0x10 != 0 {
            let link = self.pc().wrapping_add(8);
            self.set_reg(31, link);
        }

        if taken {
            Outcome::jump(self.branch_target(i.imm))
        } else {
            Outcome::advance()
        }
    }
}
