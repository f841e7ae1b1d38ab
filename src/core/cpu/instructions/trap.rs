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

//! Conditional trap instructions
//!
//! Each compares rs against rt and raises a Trap exception when the
//! condition holds; otherwise execution falls through.

use super::super::decode::RType;
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// TEQ: Trap if Equal
    ///
    /// Format: teq rs, rt
    pub(in crate::core::cpu) fn op_teq(&mut self, r: RType) -> Outcome {
        if self.reg(r.rs) == self.reg(r.rt) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }

    /// TNE: Trap if Not Equal
    ///
    /// Format: tne rs, rt
    pub(in crate::core::cpu) fn op_tne(&mut self, r: RType) -> Outcome {
        if self.reg(r.rs) != self.reg(r.rt) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }

    /// TGE: Trap if Greater or Equal (signed)
    ///
    /// Format: tge rs, rt
    pub(in crate::core::cpu) fn op_tge(&mut self, r: RType) -> Outcome {
        if (self.reg(r.rs) as i32) >= (self.reg(r.rt) as i32) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }

    /// TGEU: Trap if Greater or Equal Unsigned
    ///
    /// Format: tgeu rs, rt
    pub(in crate::core::cpu) fn op_tgeu(&mut self, r: RType) -> Outcome {
        if self.reg(r.rs) >= self.reg(r.rt) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }

    /// TLT: Trap if Less Than (signed)
    ///
    /// Format: tlt rs, rt
    pub(in crate::core::cpu) fn op_tlt(&mut self, r: RType) -> Outcome {
        if (self.reg(r.rs) as i32) < (self.reg(r.rt) as i32) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }

    /// TLTU: Trap if Less Than Unsigned
    ///
    /// Format: tltu rs, rt
    pub(in crate::core::cpu) fn op_tltu(&mut self, r: RType) -> Outcome {
        if self.reg(r.rs) < self.reg(r.rt) {
            return self.raise(ExceptionCause::Trap);
        }
        Outcome::advance()
    }
}
