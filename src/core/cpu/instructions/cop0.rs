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

//! Coprocessor 0 (System Control) instructions

use super::super::decode::Cop0Op;
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// MFC0: Move From Coprocessor 0
    ///
    /// Format: mfc0 rt, rd, sel
    /// Operation: rt = CP0[rd, sel]
    pub(in crate::core::cpu) fn op_mfc0(&mut self, c: Cop0Op) -> Outcome {
        let value = self.cop0.read(u32::from(c.rd), u32::from(c.sel));
        self.set_reg(c.rt, value);
        Outcome::advance()
    }

    /// MTC0: Move To Coprocessor 0
    ///
    /// Writes go through the CP0 register masks, so read-only registers
    /// and reserved bits silently keep their values.
    ///
    /// Format: mtc0 rt, rd, sel
    /// Operation: CP0[rd, sel] = rt
    pub(in crate::core::cpu) fn op_mtc0(&mut self, c: Cop0Op) -> Outcome {
        let value = self.reg(c.rt);
        self.cop0.write(u32::from(c.rd), u32::from(c.sel), value);
        Outcome::advance()
    }

    /// CO-encoded COP0 operations (rs = 0x10), selected by funct:
    /// TLBR, TLBWI, TLBWR, TLBP and ERET
    pub(in crate::core::cpu) fn execute_cop0_co(&mut self, c: Cop0Op) -> Outcome {
        match c.funct {
            0x01 => {
                // TLBR: read TLB[Index] into EntryHi/EntryLo/PageMask
                self.cop0.tlbr();
                Outcome::advance()
            }
            0x02 => {
                // TLBWI: write TLB[Index] from EntryHi/EntryLo/PageMask
                self.cop0.tlbwi();
                Outcome::advance()
            }
            0x06 => {
                // TLBWR: write TLB[Random]
                self.cop0.tlbwr();
                Outcome::advance()
            }
            0x08 => {
                // TLBP: probe for an entry matching EntryHi
                self.cop0.tlbp();
                Outcome::advance()
            }
            0x18 => {
                // ERET: return from exception. No delay slot.
                let target = self.cop0.eret();
                Outcome::redirect(target)
            }
            _ => {
                log::warn!(
                    "Reserved COP0 function 0x{:02X} at PC=0x{:08X}",
                    c.funct,
                    self.pc()
                );
                self.raise(ExceptionCause::ReservedInstruction)
            }
        }
    }
}
