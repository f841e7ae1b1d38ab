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

use super::super::decode::{JType, RType};
use super::{Outcome, CPU};

impl CPU {
    // === Jump Instructions ===

    /// J: Jump
    ///
    /// The target combines the upper four bits of the delay-slot address
    /// with the 26-bit field shifted left by two.
    ///
    /// Format: j target
    /// Operation: PC = ((PC + 4) & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_j(&mut self, j: JType) -> Outcome {
        let high = self.pc().wrapping_add(4) & 0xF000_0000;
        Outcome::jump(high | (j.addr << 2))
    }

    /// JAL: Jump And Link
    ///
    /// Saves the return address (past the delay slot) in r31.
    ///
    /// Format: jal target
    /// Operation: r31 = PC + 8; PC = ((PC + 4) & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_jal(&mut self, j: JType) -> Outcome {
        let link = self.pc().wrapping_add(8);
        self.set_reg(31, link);

        let high = self.pc().wrapping_add(4) & 0xF000_0000;
        Outcome::jump(high | (j.addr << 2))
    }

    /// JR: Jump Register
    ///
    /// Format: jr rs
    /// Operation: PC = rs
    pub(in crate::core::cpu) fn op_jr(&mut self, r: RType) -> Outcome {
        Outcome::jump(self.reg(r.rs))
    }

    /// JALR: Jump And Link Register
    ///
    /// The link register defaults to r31 in assembly but is whatever rd
    /// encodes. The target is read before the link is written so
    /// `jalr rs, rs` jumps to the original value.
    ///
    /// Format: jalr rd, rs
    /// Operation: rd = PC + 8; PC = rs
    pub(in crate::core::cpu) fn op_jalr(&mut self, r: RType) -> Outcome {
        let target = self.reg(r.rs);
        let link = self.pc().wrapping_add(8);
        self.set_reg(r.rd, link);
        Outcome::jump(target)
    }
}
