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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: initialization, register file, PC handling, run/stop
//! - `decode`: instruction decoding
//! - `instructions`: ALU, shift, multiply/divide and move execution
//! - `branch`: branches, jumps and delay-slot bookkeeping
//! - `memory_ops`: loads and stores, including the unaligned-word family
//! - `cop0`: CP0 register access, masks and MFC0/MTC0
//! - `tlb`: TLBP/TLBR/TLBWI/TLBWR
//! - `exceptions`: exception raising, dispositions, ERET
//! - `interrupts`: timer and interrupt pending/masking

use super::CPU;
use crate::core::memory::Memory;





#[cfg(test)]
mod exceptions;

#[cfg(test)]
mod instructions;


#[cfg(test)]
mod memory_ops;


/// Memory size used by the test programs
const TEST_MEMORY: u32 = 64 * 1024;

/// Build a CPU whose memory holds `words` as a program at address 0
fn cpu_with_program(words: &[u32]) -> CPU {
    let mut memory = Memory::new(TEST_MEMORY);
    for (i, word) in words.iter().enumerate() {
        memory.store_word(i as u32 * 4, *word).unwrap();
    }
    CPU::new(memory)
}

/// Exception code field of a raw Cause value
fn exc_code(cause: u32) -> u32 {
    (cause >> 2) & 0x1F
}

/// The general exception vector for the default EBase (0x80000000)
const VECTOR: u32 = 0x8000_0180;

/// The special interrupt vector used when Cause.IV is set
const IV_VECTOR: u32 = 0x8000_0200;
