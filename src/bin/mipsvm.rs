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

use clap::Parser;
use log::{error, info};
use mipsvm::core::cpu::CPU;
use mipsvm::core::error::{EmulatorError, Result};
use mipsvm::core::loader;
use mipsvm::core::memory::Memory;

/// MIPS32 virtual machine
#[derive(Parser)]
#[command(name = "mipsvm")]
#[command(about = "MIPS32 instruction-set interpreter", long_about = None)]
struct Args {
    /// Path to a raw big-endian MIPS32 program image
    program: String,

    /// Memory size in bytes
    #[arg(short = 'm', long, default_value = "1048576")]
    memory: u64,

    /// Load address for the program image
    #[arg(short = 'b', long, default_value = "0", value_parser = parse_u32)]
    base: u32,

    /// Entry point; defaults to the load address
    #[arg(short = 'e', long, value_parser = parse_u32)]
    entry: Option<u32>,

    /// Number of TLB entries
    #[arg(long, default_value = "16")]
    tlb_entries: u32,

    /// Stop after this many instructions instead of running to halt
    #[arg(short = 'n', long)]
    steps: Option<u64>,
}

/// Accept plain decimal or 0x-prefixed hexadecimal addresses
fn parse_u32(s: &str) -> std::result::Result<u32, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() -> Result<()> {
    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("mipsvm v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // The guest address space is 32-bit; reject anything larger up front
    if args.memory > u64::from(u32::MAX) {
        error!(
            "memory size {} exceeds the 32-bit address space",
            args.memory
        );
        return Err(EmulatorError::MemoryTooLarge {
            requested: args.memory,
        });
    }

    info!("allocating {} bytes of memory", args.memory);
    let mut memory = Memory::new(args.memory as u32);

    loader::load_file(&mut memory, &args.program, args.base)?;

    let mut cpu = CPU::with_tlb_size(memory, args.tlb_entries);
    cpu.set_pc(args.entry.unwrap_or(args.base));

    info!("starting CPU at PC=0x{:08X}", cpu.pc());
    match args.steps {
        Some(limit) => cpu.run_steps(limit),
        None => cpu.run(),
    }

    info!(
        "CPU stopped: {} instructions, final PC=0x{:08X}",
        cpu.cycles(),
        cpu.pc()
    );
    cpu.dump_registers();

    Ok(())
}
