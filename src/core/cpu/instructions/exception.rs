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

//! Exception-triggering instructions

use super::super::decode::{IType, RType};
use super::super::ExceptionCause;
use super::{Outcome, CPU};

impl CPU {
    /// SYSCALL: System Call
    ///
    /// Raises a Syscall exception, transferring control to the exception
    /// vector. With no handler installed the CPU's disposition policy
    /// still lets execution continue at the vector.
    pub(in crate::core::cpu) fn op_syscall(&mut self, _r: RType) -> Outcome {
        self.raise(ExceptionCause::Syscall)
    }

    /// BREAK: Breakpoint
    ///
    /// Raises a Breakpoint exception.
    pub(in crate::core::cpu) fn op_break(&mut self, _r: RType) -> Outcome {
        self.raise(ExceptionCause::Breakpoint)
    }

    /// SYNC: Synchronize shared memory
    ///
    /// A single in-order core has nothing to order; SYNC retires as a NOP.
    pub(in crate::core::cpu) fn op_sync(&mut self, _r: RType) -> Outcome {
        Outcome::advance()
    }

    /// COP1/COP2/COP3 opcodes: Coprocessor Unusable
    ///
    /// No floating-point unit or COP2/COP3 is attached, so their opcodes
    /// decode but raise CpU instead of executing.
    pub(in crate::core::cpu) fn op_cop_unusable(&mut self, i: IType) -> Outcome {
        log::warn!(
            "Coprocessor {} unusable at PC=0x{:08X}",
            i.opcode - 0x10,
            self.pc()
        );
        self.raise(ExceptionCause::CoprocessorUnusable)
    }
}
