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

use super::super::decode::RType;
use super::{Outcome, CPU};

impl CPU {
    // === Shift Instructions ===

    /// SLL: Shift Left Logical
    ///
    /// SLL with all fields zero is the canonical NOP encoding.
    ///
    /// Format: sll rd, rt, shamt
    /// Operation: rd = rt << shamt
    pub(in crate::core::cpu) fn op_sll(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rt) << r.shamt;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SRL: Shift Right Logical
    ///
    /// Format: srl rd, rt, shamt
    /// Operation: rd = rt >> shamt (zero fill)
    pub(in crate::core::cpu) fn op_srl(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rt) >> r.shamt;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SRA: Shift Right Arithmetic
    ///
    /// Format: sra rd, rt, shamt
    /// Operation: rd = rt >> shamt (sign fill)
    pub(in crate::core::cpu) fn op_sra(&mut self, r: RType) -> Outcome {
        let result = ((self.reg(r.rt) as i32) >> r.shamt) as u32;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SLLV: Shift Left Logical Variable
    ///
    /// The shift amount is the low five bits of rs.
    ///
    /// Format: sllv rd, rt, rs
    /// Operation: rd = rt << (rs & 0x1F)
    pub(in crate::core::cpu) fn op_sllv(&mut self, r: RType) -> Outcome {
        let s = self.reg(r.rs) & 0x1F;
        let result = self.reg(r.rt) << s;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SRLV: Shift Right Logical Variable
    ///
    /// Format: srlv rd, rt, rs
    /// Operation: rd = rt >> (rs & 0x1F) (zero fill)
    pub(in crate::core::cpu) fn op_srlv(&mut self, r: RType) -> Outcome {
        let s = self.reg(r.rs) & 0x1F;
        let result = self.reg(r.rt) >> s;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// SRAV: Shift Right Arithmetic Variable
    ///
    /// Format: srav rd, rt, rs
    /// Operation: rd = rt >> (rs & 0x1F) (sign fill)
    pub(in crate::core::cpu) fn op_srav(&mut self, r: RType) -> Outcome {
        let s = self.reg(r.rs) & 0x1F;
        let result = ((self.reg(r.rt) as i32) >> s) as u32;
        self.set_reg(r.rd, result);
        Outcome::advance()
    }
}
