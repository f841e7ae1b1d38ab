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

//! MIPS32 instruction-set interpreter library
//!
//! This library provides an in-process MIPS32 virtual machine: a flat
//! big-endian memory image, a CP0 system-control coprocessor (exceptions,
//! interrupts, timer, software TLB), and a fetch–execute loop with MIPS
//! branch-delay-slot semantics.
//!
//! # Example
//!
//! ```
//! use mipsvm::core::cpu::CPU;
//! use mipsvm::core::memory::Memory;
//!
//! let mut memory = Memory::new(64 * 1024);
//! // addiu $t0, $zero, 7
//! memory.store_word(0x0000, 0x24080007).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! cpu.step();
//! assert_eq!(cpu.get_reg(8), 7);
//! ```

pub mod core;
