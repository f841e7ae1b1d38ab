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

//! Multiply/divide instructions and the HI/LO accumulator moves

use super::super::decode::RType;
use super::{Outcome, CPU};

impl CPU {
    /// MULT: Multiply (signed)
    ///
    /// Format: mult rs, rt
    /// Operation: (HI, LO) = rs * rt as a signed 64-bit product
    pub(in crate::core::cpu) fn op_mult(&mut self, r: RType) -> Outcome {
        let a = self.reg(r.rs) as i32 as i64;
        let b = self.reg(r.rt) as i32 as i64;
        let prod = a * b;

        self.lo = prod as i32;
        self.hi = (prod >> 32) as i32;
        Outcome::advance()
    }

    /// MULTU: Multiply Unsigned
    ///
    /// Format: multu rs, rt
    /// Operation: (HI, LO) = rs * rt as an unsigned 64-bit product
    pub(in crate::core::cpu) fn op_multu(&mut self, r: RType) -> Outcome {
        let a = u64::from(self.reg(r.rs));
        let b = u64::from(self.reg(r.rt));
        let prod = a * b;

        self.lo = prod as u32 as i32;
        self.hi = (prod >> 32) as u32 as i32;
        Outcome::advance()
    }

    /// DIV: Divide (signed)
    ///
    /// LO receives the quotient and HI the remainder. A zero divisor is
    /// architecturally undefined; this core defines HI = LO = 0 and raises
    /// no exception. i32::MIN / -1 wraps.
    ///
    /// Format: div rs, rt
    pub(in crate::core::cpu) fn op_div(&mut self, r: RType) -> Outcome {
        let a = self.reg(r.rs) as i32;
        let b = self.reg(r.rt) as i32;

        if b == 0 {
            self.lo = 0;
            self.hi = 0;
            return Outcome::advance();
        }

        self.lo = a.wrapping_div(b);
        self.hi = a.wrapping_rem(b);
        Outcome::advance()
    }

    /// DIVU: Divide Unsigned
    ///
    /// Same zero-divisor convention as DIV: HI = LO = 0, no exception.
    ///
    /// Format: divu rs, rt
    pub(in crate::core::cpu) fn op_divu(&mut self, r: RType) -> Outcome {
        let a = self.reg(r.rs);
        let b = self.reg(r.rt);

        if b == 0 {
            self.lo = 0;
            self.hi = 0;
            return Outcome::advance();
        }

        self.lo = (a / b) as i32;
        self.hi = (a % b) as i32;
        Outcome::advance()
    }

    /// MFHI: Move From HI
    ///
    /// Format: mfhi rd
    pub(in crate::core::cpu) fn op_mfhi(&mut self, r: RType) -> Outcome {
        self.set_reg(r.rd, self.hi as u32);
        Outcome::advance()
    }

    /// MFLO: Move From LO
    ///
    /// Format: mflo rd
    pub(in crate::core::cpu) fn op_mflo(&mut self, r: RType) -> Outcome {
        self.set_reg(r.rd, self.lo as u32);
        Outcome::advance()
    }

    /// MTHI: Move To HI
    ///
    /// Format: mthi rs
    pub(in crate::core::cpu) fn op_mthi(&mut self, r: RType) -> Outcome {
        self.hi = self.reg(r.rs) as i32;
        Outcome::advance()
    }

    /// MTLO: Move To LO
    ///
    /// Format: mtlo rs
    pub(in crate::core::cpu) fn op_mtlo(&mut self, r: RType) -> Outcome {
        self.lo = self.reg(r.rs) as i32;
        Outcome::advance()
    }
}
