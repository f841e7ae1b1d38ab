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

//! Load instructions
//!
//! The effective address is rs + sign_extend(imm). A misaligned or
//! out-of-range access raises AdEL with BadVAddr holding the offending
//! address; the destination register is left untouched on a fault.

use super::super::decode::IType;
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// Effective address of a load/store: rs + sign_extend(imm)
    pub(in crate::core::cpu) fn effective_address(&self, i: IType) -> u32 {
        self.reg(i.rs).wrapping_add(i.imm as i16 as i32 as u32)
    }

    /// Record a faulting load address and raise AdEL
    fn address_error_load(&mut self, addr: u32) -> Outcome {
        self.cop0.set_bad_vaddr(addr);
        self.raise(ExceptionCause::AddressErrorLoad)
    }

    /// LW: Load Word
    ///
    /// Format: lw rt, offset(base)
    pub(in crate::core::cpu) fn op_lw(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_word(addr) {
            Ok(value) => {
                self.set_reg(i.rt, value);
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }

    /// LH: Load Half-word (sign-extended)
    ///
    /// Format: lh rt, offset(base)
    pub(in crate::core::cpu) fn op_lh(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_half(addr) {
            Ok(value) => {
                self.set_reg(i.rt, value as i16 as i32 as u32);
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }

    /// LHU: Load Half-word Unsigned (zero-extended)
    ///
    /// Format: lhu rt, offset(base)
    pub(in crate::core::cpu) fn op_lhu(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_half(addr) {
            Ok(value) => {
                self.set_reg(i.rt, u32::from(value));
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }

    /// LB: Load Byte (sign-extended)
    ///
    /// Format: lb rt, offset(base)
    pub(in crate::core::cpu) fn op_lb(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_byte(addr) {
            Ok(value) => {
                self.set_reg(i.rt, value as i8 as i32 as u32);
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }

    /// LBU: Load Byte Unsigned (zero-extended)
    ///
    /// Format: lbu rt, offset(base)
    pub(in crate::core::cpu) fn op_lbu(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_byte(addr) {
            Ok(value) => {
                self.set_reg(i.rt, u32::from(value));
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }

    /// LWL: Load Word Left
    ///
    /// Big-endian: merges the bytes from the effective address through the
    /// end of its aligned word into the most significant end of rt. Any
    /// byte offset is legal; LWL pairs with LWR to assemble an unaligned
    /// word in two instructions.
    ///
    /// Format: lwl rt, offset(base)
    pub(in crate::core::cpu) fn op_lwl(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let word = match self.memory.load_word(addr & !3) {
            Ok(word) => word,
            Err(_) => return self.address_error_load(addr),
        };

        let n = addr & 3;
        let rt = self.reg(i.rt);
        let value = if n == 0 {
            word
        } else {
            (word << (8 * n)) | (rt & ((1u32 << (8 * n)) - 1))
        };
        self.set_reg(i.rt, value);
        Outcome::advance()
    }

    /// LWR: Load Word Right
    ///
    /// Big-endian: merges the bytes from the start of the aligned word
    /// through the effective address into the least significant end of rt.
    ///
    /// Format: lwr rt, offset(base)
    pub(in crate::core::cpu) fn op_lwr(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let word = match self.memory.load_word(addr & !3) {
            Ok(word) => word,
            Err(_) => return self.address_error_load(addr),
        };

        let n = addr & 3;
        let rt = self.reg(i.rt);
        let value = if n == 3 {
            word
        } else {
            (rt & (!0u32 << (8 * (n + 1)))) | (word >> (8 * (3 - n)))
        };
        self.set_reg(i.rt, value);
        Outcome::advance()
    }

    /// LL: Load Linked
    ///
    /// Behaves as LW and latches the effective address in CP0 LLAddr.
    /// There is no competing agent in this machine, so the subsequent SC
    /// always succeeds.
    ///
    /// Format: ll rt, offset(base)
    pub(in crate::core::cpu) fn op_ll(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        match self.memory.load_word(addr) {
            Ok(value) => {
                self.cop0.set_lladdr(addr);
                self.set_reg(i.rt, value);
                Outcome::advance()
            }
            Err(_) => self.address_error_load(addr),
        }
    }
}
