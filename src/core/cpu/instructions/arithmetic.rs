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

use super::super::decode::{IType, RType};
use super::super::overflow::{add_overflows, sub_overflows};
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    // === Arithmetic Instructions ===

    /// ADD: Add (with overflow exception)
    ///
    /// Adds two registers with signed overflow detection. On overflow the
    /// destination is left unchanged and an Overflow exception is raised.
    ///
    /// Format: add rd, rs, rt
    /// Operation: rd = rs + rt
    pub(in crate::core::cpu) fn op_add(&mut self, r: RType) -> Outcome {
        let a = self.reg(r.rs) as i32;
        let b = self.reg(r.rt) as i32;
        let sum = a.wrapping_add(b);

        if add_overflows(a, b, sum) {
            return self.raise(ExceptionCause::Overflow);
        }

        self.set_reg(r.rd, sum as u32);
        Outcome::advance()
    }

    /// ADDU: Add Unsigned (no overflow exception)
    ///
    /// Format: addu rd, rs, rt
    /// Operation: rd = rs + rt, wrapping modulo 2^32
    pub(in crate::core::cpu) fn op_addu(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rs).wrapping_add(self.reg(r.rt));
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SUB: Subtract (with overflow exception)
    ///
    /// On overflow the destination is left unchanged and an Overflow
    /// exception is raised.
    ///
    /// Format: sub rd, rs, rt
    /// Operation: rd = rs - rt
    pub(in crate::core::cpu) fn op_sub(&mut self, r: RType) -> Outcome {
        let a = self.reg(r.rs) as i32;
        let b = self.reg(r.rt) as i32;
        let diff = a.wrapping_sub(b);

        if sub_overflows(a, b, diff) {
            return self.raise(ExceptionCause::Overflow);
        }

        self.set_reg(r.rd, diff as u32);
        Outcome::advance()
    }

    /// SUBU: Subtract Unsigned (no overflow exception)
    ///
    /// Format: subu rd, rs, rt
    /// Operation: rd = rs - rt, wrapping modulo 2^32
    pub(in crate::core::cpu) fn op_subu(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rs).wrapping_sub(self.reg(r.rt));
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// ADDI: Add Immediate (with overflow exception)
    ///
    /// Format: addi rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addi(&mut self, i: IType) -> Outcome {
        let a = self.reg(i.rs) as i32;
        let b = i.imm as i16 as i32;
        let sum = a.wrapping_add(b);

        if add_overflows(a, b, sum) {
            return self.raise(ExceptionCause::Overflow);
        }

        self.set_reg(i.rt, sum as u32);
        Outcome::advance()
    }

    /// ADDIU: Add Immediate Unsigned (no overflow exception)
    ///
    /// Despite the name, the immediate is sign-extended.
    ///
    /// Format: addiu rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addiu(&mut self, i: IType) -> Outcome {
        let imm = i.imm as i16 as u32;
        let result = self.reg(i.rs).wrapping_add(imm);
        self.set_reg(i.rt, result);
        Outcome::advance()
    }

    /// SLT: Set on Less Than (signed)
    ///
    /// Format: slt rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(in crate::core::cpu) fn op_slt(&mut self, r: RType) -> Outcome {
        let result = ((self.reg(r.rs) as i32) < (self.reg(r.rt) as i32)) as u32;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SLTU: Set on Less Than Unsigned
    ///
    /// Format: sltu rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(in crate::core::cpu) fn op_sltu(&mut self, r: RType) -> Outcome {
        let result = (self.reg(r.rs) < self.reg(r.rt)) as u32;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SLTI: Set on Less Than Immediate (signed)
    ///
    /// Format: slti rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0
    pub(in crate::core::cpu) fn op_slti(&mut self, i: IType) -> Outcome {
        let imm = i.imm as i16 as i32;
        let result = ((self.reg(i.rs) as i32) < imm) as u32;
        self.set_reg(i.rt, result);
        Outcome::advance()
    }

    /// SLTIU: Set on Less Than Immediate Unsigned
    ///
    /// The immediate is sign-extended and then compared unsigned.
    ///
    /// Format: sltiu rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0
    pub(in crate::core::cpu) fn op_sltiu(&mut self, i: IType) -> Outcome {
        let imm = i.imm as i16 as u32;
        let result = (self.reg(i.rs) < imm) as u32;
        self.set_reg(i.rt, result);
        Outcome::advance()
    }
}
