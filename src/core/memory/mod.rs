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

//! Guest memory image
//!
//! Memory is a single contiguous byte array addressed by `u32`. Word layout
//! is big-endian: the byte at the lowest address holds the most significant
//! 8 bits. MIPS32 binaries executed by this core are big-endian, so the
//! byte order is hard-coded rather than configurable.
//!
//! Word and half-word accesses require natural alignment; a violation is
//! reported as [`EmulatorError::UnalignedAccess`] and an access past the end
//! of the array as [`EmulatorError::InvalidAddress`]. The CPU maps both onto
//! guest address-error exceptions; the host sees them directly when poking
//! memory through this API.
//!
//! # Example
//!
//! ```
//! use mipsvm::core::memory::Memory;
//!
//! let mut memory = Memory::new(1024);
//! memory.store_word(0x10, 0x12345678).unwrap();
//! assert_eq!(memory.load_word(0x10).unwrap(), 0x12345678);
//! // Big-endian: the most significant byte sits at the lowest address
//! assert_eq!(memory.load_byte(0x10).unwrap(), 0x12);
//! ```

use crate::core::error::{EmulatorError, Result};


/// Flat guest memory
///
/// Owns the full memory image of the virtual machine. There is no memory
/// map, no MMIO and no mirroring at this level; virtual-to-physical concerns
/// live in the CP0 TLB model.
pub struct Memory {
    /// Backing store, one byte per guest address
    data: Vec<u8>,
}

impl Memory {
    /// Create a new memory image of `size` bytes, zero-filled
    ///
    /// # Example
    ///
    /// ```
    /// use mipsvm::core::memory::Memory;
    ///
    /// let memory = Memory::new(64 * 1024);
    /// assert_eq!(memory.len(), 64 * 1024);
    /// ```
    pub fn new(size: u32) -> Self {
        Self {
            data: vec![0u8; size as usize],
        }
    }

    /// Size of the memory image in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the memory image is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero the entire image, simulating a power cycle
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Load a 32-bit word from `address`
    ///
    /// The address must be word-aligned and `address + 3` must be inside the
    /// image.
    ///
    /// # Errors
    ///
    /// [`EmulatorError::UnalignedAccess`] when `address` is not a multiple
    /// of 4, [`EmulatorError::InvalidAddress`] when the access runs past the
    /// end of memory.
    pub fn load_word(&self, address: u32) -> Result<u32> {
        self.check_access(address, 4)?;

        let i = address as usize;
        Ok(u32::from(self.data[i]) << 24
            | u32::from(self.data[i + 1]) << 16
            | u32::from(self.data[i + 2]) << 8
            | u32::from(self.data[i + 3]))
    }

    /// Store a 32-bit word to `address`
    ///
    /// Same alignment and range requirements as [`Memory::load_word`].
    pub fn store_word(&mut self, address: u32, value: u32) -> Result<()> {
        self.check_access(address, 4)?;

        let i = address as usize;
        self.data[i] = (value >> 24) as u8;
        self.data[i + 1] = (value >> 16) as u8;
        self.data[i + 2] = (value >> 8) as u8;
        self.data[i + 3] = value as u8;
        Ok(())
    }

    /// Load a 16-bit half-word from `address` (must be 2-aligned)
    pub fn load_half(&self, address: u32) -> Result<u16> {
        self.check_access(address, 2)?;

        let i = address as usize;
        Ok(u16::from(self.data[i]) << 8 | u16::from(self.data[i + 1]))
    }

    /// Store a 16-bit half-word to `address` (must be 2-aligned)
    pub fn store_half(&mut self, address: u32, value: u16) -> Result<()> {
        self.check_access(address, 2)?;

        let i = address as usize;
        self.data[i] = (value >> 8) as u8;
        self.data[i + 1] = value as u8;
        Ok(())
    }

    /// Load a single byte from `address`
    pub fn load_byte(&self, address: u32) -> Result<u8> {
        self.check_access(address, 1)?;
        Ok(self.data[address as usize])
    }

    /// Store a single byte to `address`
    pub fn store_byte(&mut self, address: u32, value: u8) -> Result<()> {
        self.check_access(address, 1)?;
        self.data[address as usize] = value;
        Ok(())
    }

    /// Copy `bytes` into memory starting at `base`
    ///
    /// Used by the program loader. The whole slice must fit inside the
    /// image; nothing is written on failure.
    pub fn write_slice(&mut self, base: u32, bytes: &[u8]) -> Result<()> {
        let start = base as usize;
        let end = start
            .checked_add(bytes.len())
            .ok_or(EmulatorError::ImageTooLarge {
                base,
                size: bytes.len(),
            })?;
        if end > self.data.len() {
            return Err(EmulatorError::ImageTooLarge {
                base,
                size: bytes.len(),
            });
        }

        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Validate alignment and range for an access of `size` bytes
    fn check_access(&self, address: u32, size: u32) -> Result<()> {
        if address % size != 0 {
            return Err(EmulatorError::UnalignedAccess { address, size });
        }
        // The end address is computed checked so an access wrapping the
        // 32-bit space cannot slip through the range test.
        let end = address
            .checked_add(size - 1)
            .ok_or(EmulatorError::InvalidAddress { address })?;
        if end as usize >= self.data.len() {
            return Err(EmulatorError::InvalidAddress { address });
        }
        Ok(())
    }
}
