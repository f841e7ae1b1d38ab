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

//! Shared fixtures for the integration tests

use mipsvm::core::cpu::CPU;
use mipsvm::core::memory::Memory;

/// Default memory size for test machines
pub const MEMORY_SIZE: u32 = 64 * 1024;

/// Build a VM with `words` loaded as a program at address 0
pub fn vm_with_program(words: &[u32]) -> CPU {
    let mut memory = Memory::new(MEMORY_SIZE);
    for (i, word) in words.iter().enumerate() {
        memory.store_word(i as u32 * 4, *word).unwrap();
    }
    CPU::new(memory)
}

/// Serialize instruction words into a big-endian raw image
pub fn image_of(words: &[u32]) -> Vec<u8> {
    let mut image = Vec::with_capacity(words.len() * 4);
    for word in words {
        image.extend_from_slice(&word.to_be_bytes());
    }
    image
}

/// Exception code field of a raw Cause value
pub fn exc_code(cause: u32) -> u32 {
    (cause >> 2) & 0x1F
}
