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

//! Core virtual-machine components
//!
//! This module contains all machine components:
//! - CPU (MIPS32 fetch–execute loop and instruction set)
//! - CP0 (system control coprocessor: exceptions, interrupts, timer, TLB)
//! - Memory (flat big-endian byte array)
//! - Loader (raw program images)

pub mod cpu;
pub mod error;
pub mod loader;
pub mod memory;

// Re-export commonly used types
pub use cpu::{ExceptionCause, StopHandle, CPU};
pub use error::{EmulatorError, Result};
pub use memory::Memory;
