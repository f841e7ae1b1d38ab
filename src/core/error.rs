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

//! Host-plane error types
//!
//! These errors cover host operations only: memory accesses made through
//! the public API, configuration, and program loading. Guest exceptions
//! (overflow, address error, syscall, ...) are not errors at this level —
//! they are modeled in CP0 state and redirect the guest PC to its
//! exception vector.

use thiserror::Error;

/// Result type for VM operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Emulator error types
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Unaligned memory access error
    #[error("unaligned {}-bit access at address 0x{address:08X}", .size * 8)]
    UnalignedAccess {
        /// The address that was accessed
        address: u32,
        /// The size of the access in bytes (2 for 16-bit, 4 for 32-bit)
        size: u32,
    },

    /// Memory access outside the configured memory image
    #[error("invalid memory access at address 0x{address:08X}")]
    InvalidAddress {
        /// The address that was accessed
        address: u32,
    },

    /// Requested memory size does not fit the 32-bit guest address space
    #[error("memory size {requested} bytes exceeds the 32-bit address space")]
    MemoryTooLarge {
        /// Requested size in bytes
        requested: u64,
    },

    /// Program image does not fit in memory at the requested base address
    #[error("program image of {size} bytes does not fit at base 0x{base:08X}")]
    ImageTooLarge {
        /// Load base address
        base: u32,
        /// Image size in bytes
        size: usize,
    },

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
