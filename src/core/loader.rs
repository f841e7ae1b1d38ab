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

//! Program loading
//!
//! The core consumes no file format: a guest program is a raw big-endian
//! MIPS32 image copied into memory at a base address, with the host setting
//! the PC to the entry point afterwards. ELF parsing and disassembly belong
//! to external front ends.
//!
//! # Example
//!
//! ```
//! use mipsvm::core::loader;
//! use mipsvm::core::memory::Memory;
//!
//! let mut memory = Memory::new(4096);
//! // ori $t0, $zero, 1 ; break
//! let image = [0x34, 0x08, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0D];
//! loader::load_image(&mut memory, &image, 0x100).unwrap();
//! assert_eq!(memory.load_word(0x100).unwrap(), 0x34080001);
//! ```

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::core::memory::Memory;

/// Copy a raw program image into memory at `base`
///
/// The image is taken as already big-endian, the way a MIPS32 toolchain
/// emits it. Fails with [`crate::core::error::EmulatorError::ImageTooLarge`]
/// when the image does not fit; memory is untouched on failure.
pub fn load_image(memory: &mut Memory, image: &[u8], base: u32) -> Result<()> {
    memory.write_slice(base, image)?;
    log::debug!(
        "loaded {} byte image at 0x{:08X}..0x{:08X}",
        image.len(),
        base,
        base as usize + image.len()
    );
    Ok(())
}

/// Read a raw program image from `path` and load it at `base`
///
/// Returns the image size in bytes.
pub fn load_file<P: AsRef<Path>>(memory: &mut Memory, path: P, base: u32) -> Result<usize> {
    let image = fs::read(path.as_ref())?;
    load_image(memory, &image, base)?;
    log::info!(
        "loaded {} ({} bytes) at 0x{:08X}",
        path.as_ref().display(),
        image.len(),
        base
    );
    Ok(image.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_image_at_base() {
        let mut memory = Memory::new(256);
        load_image(&mut memory, &[0x12, 0x34, 0x56, 0x78], 0x40).unwrap();
        assert_eq!(memory.load_word(0x40).unwrap(), 0x12345678);
    }

    #[test]
    fn test_load_image_too_large() {
        let mut memory = Memory::new(8);
        assert!(load_image(&mut memory, &[0u8; 16], 0).is_err());
        assert!(load_image(&mut memory, &[0u8; 4], 0x08).is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

        let mut memory = Memory::new(64);
        let size = load_file(&mut memory, file.path(), 0x10).unwrap();
        assert_eq!(size, 4);
        assert_eq!(memory.load_word(0x10).unwrap(), 0xAABBCCDD);
    }

    #[test]
    fn test_load_missing_file() {
        let mut memory = Memory::new(64);
        assert!(load_file(&mut memory, "/no/such/image.bin", 0).is_err());
    }
}
