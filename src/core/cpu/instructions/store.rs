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

//! Store instructions
//!
//! The effective address is rs + sign_extend(imm). A misaligned or
//! out-of-range access raises AdES with BadVAddr holding the offending
//! address; memory is left untouched on a fault.

use super::super::decode::IType;
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// Record a faulting store address and raise AdES
    fn address_error_store(&mut self, addr: u32) -> Outcome {
        self.cop0.set_bad_vaddr(addr);
        self.raise(ExceptionCause::AddressErrorStore)
    }

    /// SW: Store Word
    ///
    /// Format: sw rt, offset(base)
    pub(in crate::core::cpu) fn op_sw(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let value = self.reg(i.rt);
        match self.memory.store_word(addr, value) {
            Ok(()) => Outcome::advance(),
            Err(_) => self.address_error_store(addr),
        }
    }

    /// SH: Store Half-word
    ///
    /// Format: sh rt, offset(base)
    pub(in crate::core::cpu) fn op_sh(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let value = self.reg(i.rt) as u16;
        match self.memory.store_half(addr, value) {
            Ok(()) => Outcome::advance(),
            Err(_) => self.address_error_store(addr),
        }
    }

    /// SB: Store Byte
    ///
    /// Format: sb rt, offset(base)
    pub(in crate::core::cpu) fn op_sb(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let value = self.reg(i.rt) as u8;
        match self.memory.store_byte(addr, value) {
            Ok(()) => Outcome::advance(),
            Err(_) => self.address_error_store(addr),
        }
    }

    /// SWL: Store Word Left
    ///
    /// Big-endian: stores the most significant bytes of rt into memory
    /// from the effective address through the end of its aligned word.
    /// Read-modify-write on the containing word.
    ///
    /// Format: swl rt, offset(base)
    pub(in crate::core::cpu) fn op_swl(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let aligned = addr & !3;
        let word = match self.memory.load_word(aligned) {
            Ok(word) => word,
            Err(_) => return self.address_error_store(addr),
        };

        let n = addr & 3;
        let rt = self.reg(i.rt);
        let merged = if n == 0 {
            rt
        } else {
            (word & (!0u32 << (32 - 8 * n))) | (rt >> (8 * n))
        };

        match self.memory.store_word(aligned, merged) {
            Ok(()) => Outcome::advance(),
            Err(_) => self.address_error_store(addr),
        }
    }

    /// SWR: Store Word Right
    ///
    /// Big-endian: stores the least significant bytes of rt into memory
    /// from the start of the aligned word through the effective address.
    ///
    /// Format: swr rt, offset(base)
    pub(in crate::core::cpu) fn op_swr(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let aligned = addr & !3;
        let word = match self.memory.load_word(aligned) {
            Ok(word) => word,
            Err(_) => return self.address_error_store(addr),
        };

        let n = addr & 3;
        let rt = self.reg(i.rt);
        let merged = if n == 3 {
            rt
        } else {
            (word & ((1u32 << (8 * (3 - n))) - 1)) | (rt << (8 * (3 - n)))
        };

        match self.memory.store_word(aligned, merged) {
            Ok(()) => Outcome::advance(),
            Err(_) => self.address_error_store(addr),
        }
    }

    /// SC: Store Conditional
    ///
    /// Behaves as SW and writes 1 into rt to report success; nothing in
    /// this machine can break the reservation taken by LL. A faulting
    /// address still raises AdES and leaves rt unchanged.
    ///
    /// Format: sc rt, offset(base)
    pub(in crate::core::cpu) fn op_sc(&mut self, i: IType) -> Outcome {
        let addr = self.effective_address(i);
        let value = self.reg(i.rt);
        match self.memory.store_word(addr, value) {
            Ok(()) => {
                self.set_reg(i.rt, 1);
                Outcome::advance()
            }
            Err(_) => self.address_error_store(addr),
        }
    }
}
