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
use super::{Outcome, CPU};

impl CPU {
    // === Logical and Move Instructions ===

    /// AND: bitwise and
    ///
    /// Format: and rd, rs, rt
    pub(in crate::core::cpu) fn op_and(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rs) & self.reg(r.rt);
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// OR: bitwise or
    ///
    /// Format: or rd, rs, rt
    pub(in crate::core::cpu) fn op_or(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rs) | self.reg(r.rt);
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// XOR: bitwise exclusive or
    ///
    /// Format: xor rd, rs, rt
    pub(in crate::core::cpu) fn op_xor(&mut self, r: RType) -> Outcome {
        let result = self.reg(r.rs) ^ self.reg(r.rt);
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// NOR: bitwise not-or
    ///
    /// Format: nor rd, rs, rt
    pub(in crate::core::cpu) fn op_nor(&mut self, r: RType) -> Outcome {
        let result = !(self.reg(r.rs) | self.reg(r.rt));
        self.set_reg(r.rd, result);
        Outcome::advance()
    }

    /// ANDI: And Immediate (zero-extended)
    ///
    /// Format: andi rt, rs, imm
    pub(in crate::core::cpu) fn op_andi(&mut self, i: IType) -> Outcome {
        let result = self.reg(i.rs) & u32::from(i.imm);
        self.set_reg(i.rt, result);
        Outcome::advance()
    }

    /// ORI: Or Immediate (zero-extended)
    ///
    /// Format: ori rt, rs, imm
    pub(in crate::core::cpu) fn op_ori(&mut self, i: IType) -> Outcome {
        let result = self.reg(i.rs) | u32::from(i.imm);
        self.set_reg(i.rt, result);
        Outcome::advance()
    }

    /// XORI: Exclusive Or Immediate (zero-extended)
    ///
    /// Format: xori rt, rs, imm
    pub(in crate::core::cpu) fn op_xori(&mut self, i: IType) -> Outcome {
        let result = self.reg(i.rs) ^ u32::from(i.imm);
        self.set_reg(i.rt, result);
        Outcome::advance()
    }

    /// LUI: Load Upper Immediate
    ///
    /// Format: lui rt, imm
    /// Operation: rt = imm << 16
    pub(in crate::core::cpu) fn op_lui(&mut self, i: IType) -> Outcome {
        self.set_reg(i.rt, u32::from(i.imm) << 16);
        Outcome::advance()
    }

    /// MOVZ: Move Conditional on Zero
    ///
    /// Format: movz rd, rs, rt
    /// Operation: if (rt == 0) rd = rs
    pub(in crate::core::cpu) fn op_movz(&mut self, r: RType) -> Outcome {
        if self.reg(r.rt) == 0 {
            let value = self.reg(r.rs);
            self.set_reg(r.rd, value);
        }
        Outcome::advance()
    }

    /// MOVN: Move Conditional on Not Zero
    ///
    /// Format: movn rd, rs, rt
    /// Operation: if (rt != 0) rd = rs
    pub(in crate::core::cpu) fn op_movn(&mut self, r: RType) -> Outcome {
        if self.reg(r.rt) != 0 {
            let value = self.reg(r.rs);
            self.set_reg(r.rd, value);
        }
        Outcome::advance()
    }
}
