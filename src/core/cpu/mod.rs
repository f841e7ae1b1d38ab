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

//! MIPS32 CPU
//!
//! The CPU owns all machine state: the general-purpose registers, PC,
//! HI/LO, the CP0 coprocessor (with its TLB), and guest memory. The
//! fetch–execute loop is single-threaded; the only value shared with other
//! threads is the atomic `running` flag, which a host or signal handler
//! may clear through a [`StopHandle`] to request cooperative termination.
//!
//! Exceptions are precise. The `in_delay` flag set by a taken branch or
//! jump applies to exactly the next instruction: an exception raised there
//! records BD=1 and EPC pointing at the branch.

pub mod decode;

pub(crate) mod overflow;

mod cop0;
mod instructions;

#[cfg(test)]
mod tests;

pub use cop0::{ExceptionCause, TLBEntry, COP0};
pub use instructions::Outcome;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::memory::Memory;
use decode::Instruction;

/// MIPS32 CPU
///
/// # Example
///
/// ```
/// use mipsvm::core::cpu::CPU;
/// use mipsvm::core::memory::Memory;
///
/// let mut memory = Memory::new(4096);
/// // ori $t0, $zero, 0x1234
/// memory.store_word(0x0000, 0x34081234).unwrap();
///
/// let mut cpu = CPU::new(memory);
/// cpu.step();
/// assert_eq!(cpu.get_reg(8), 0x1234);
/// assert_eq!(cpu.pc(), 0x0004);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31)
    ///
    /// r0 is hard-wired to zero; every write goes through `set_reg`, which
    /// discards stores to it
    regs: [u32; 32],

    /// Program counter
    pc: u32,

    /// HI register (multiply/divide result upper 32 bits)
    hi: i32,

    /// LO register (multiply/divide result lower 32 bits)
    lo: i32,

    /// Coprocessor 0 (System Control)
    cop0: COP0,

    /// Guest memory image
    memory: Memory,

    /// Whether the instruction at `pc` is a branch delay slot
    in_delay: bool,

    /// Branch target pending from a taken branch or jump; applied after
    /// the delay-slot instruction at `pc` executes
    next_target: Option<u32>,

    /// Instructions retired (or faulted) since creation
    cycles: u64,

    /// Cleared to request cooperative termination; shared with StopHandle
    running: Arc<AtomicBool>,
}

/// Clonable handle that can stop a running CPU from another thread
///
/// # Example
///
/// ```
/// use mipsvm::core::cpu::CPU;
/// use mipsvm::core::memory::Memory;
///
/// let cpu = CPU::new(Memory::new(4096));
/// let handle = cpu.stop_handle();
/// // ... hand `handle` to a signal handler or watchdog thread ...
/// handle.stop();
/// ```
#[derive(Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that the CPU stop at the next loop iteration
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl CPU {
    /// Create a new CPU owning `memory`, with the default TLB size
    ///
    /// The CPU starts halted at PC 0 with all registers zero; the host
    /// loads a program and sets the entry point before running.
    pub fn new(memory: Memory) -> Self {
        Self::with_tlb_size(memory, COP0::DEFAULT_TLB_SIZE)
    }

    /// Create a new CPU with a TLB of `tlb_size` entries
    pub fn with_tlb_size(memory: Memory, tlb_size: u32) -> Self {
        Self {
            regs: [0u32; 32],
            pc: 0,
            hi: 0,
            lo: 0,
            cop0: COP0::new(tlb_size),
            memory,
            in_delay: false,
            next_target: None,
            cycles: 0,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Reset architectural state to power-on values
    ///
    /// Memory contents are preserved; reloading the program image is the
    /// host's call.
    pub fn reset(&mut self) {
        self.regs = [0u32; 32];
        self.pc = 0;
        self.hi = 0;
        self.lo = 0;
        self.cop0 = COP0::new(self.cop0.tlb_size());
        self.in_delay = false;
        self.next_target = None;
        self.cycles = 0;
    }

    /// Read a general purpose register
    ///
    /// r0 always reads zero. An index outside 0-31 also reads zero,
    /// mirroring hardware which has no such register.
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        if index == 0 || index >= 32 {
            0
        } else {
            self.regs[index as usize]
        }
    }

    /// Write a general purpose register
    ///
    /// This is the single write path for the register file: writes to r0
    /// and to indices outside 0-31 are silently discarded.
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u32) {
        if index != 0 && index < 32 {
            self.regs[index as usize] = value;
        }
    }

    /// Read a general purpose register (host/debug alias of [`CPU::reg`])
    pub fn get_reg(&self, index: u8) -> u32 {
        self.reg(index)
    }

    /// Read CP0 register `(reg, sel)`
    pub fn get_cp0(&self, reg: u32, sel: u32) -> u32 {
        self.cop0.read(reg, sel)
    }

    /// Write CP0 register `(reg, sel)` through the architectural masks
    pub fn set_cp0(&mut self, reg: u32, sel: u32, value: u32) {
        self.cop0.write(reg, sel, value);
    }

    /// Set CP0 BadVAddr directly (it is read-only to guest software)
    pub fn set_bad_vaddr(&mut self, addr: u32) {
        self.cop0.set_bad_vaddr(addr);
    }

    /// Current PC
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Set the PC (host-driven setup: program entry point)
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// HI accumulator
    pub fn hi(&self) -> i32 {
        self.hi
    }

    /// LO accumulator
    pub fn lo(&self) -> i32 {
        self.lo
    }

    /// Instructions executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the instruction at PC is a branch delay slot
    pub fn in_delay_slot(&self) -> bool {
        self.in_delay
    }

    /// Whether the run loop is active
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Coprocessor 0 state
    pub fn cop0(&self) -> &COP0 {
        &self.cop0
    }

    /// Mutable coprocessor 0 state (host-driven setup and inspection)
    pub fn cop0_mut(&mut self) -> &mut COP0 {
        &mut self.cop0
    }

    /// Guest memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable guest memory (program loading, host pokes)
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Handle that can stop this CPU from another thread
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Request cooperative termination of [`CPU::run`]
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Run until stopped
    ///
    /// Enters the fetch–execute loop and returns when the running flag is
    /// cleared, either by [`CPU::stop`]/[`StopHandle::stop`] or by the
    /// fatal-exception policy. Re-entry while already running is refused.
    pub fn run(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("CPU already running");
            return;
        }

        log::debug!("CPU starting at PC=0x{:08X}", self.pc);
        while self.running.load(Ordering::SeqCst) {
            self.step();
        }
        log::debug!(
            "CPU stopped at PC=0x{:08X} after {} instructions",
            self.pc,
            self.cycles
        );
    }

    /// Run for at most `limit` instructions
    ///
    /// Same loop as [`CPU::run`] with an instruction cap; returns early if
    /// the running flag is cleared.
    pub fn run_steps(&mut self, limit: u64) {
        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("CPU already running");
            return;
        }

        for _ in 0..limit {
            if !self.running.load(Ordering::SeqCst) {
                return;
            }
            self.step();
        }
        self.running.store(false, Ordering::SeqCst);
    }

    /// Execute one instruction
    ///
    /// One full turn of the loop: fetch, advance the CP0 timer and Random,
    /// take a pending interrupt if any, then decode, execute, and move the
    /// PC. Guest exceptions are absorbed here — they redirect the PC to
    /// the exception vector and, for fatal causes, clear the running flag.
    pub fn step(&mut self) {
        self.cycles += 1;

        // Fetch. A PC outside memory or off word alignment is an address
        // error on the fetch itself.
        let word = match self.memory.load_word(self.pc) {
            Ok(word) => word,
            Err(_) => {
                self.cop0.set_bad_vaddr(self.pc);
                let outcome = self.raise(ExceptionCause::AddressErrorLoad);
                self.apply(outcome);
                return;
            }
        };

        // Count/Compare timer and the Random replacement counter advance
        // once per instruction.
        self.cop0.tick(1);
        self.cop0.step();

        // An enabled, unmasked interrupt preempts the fetched instruction;
        // it will re-execute after the handler returns via ERET.
        if self.cop0.pending_interrupt() {
            let outcome = self.raise(ExceptionCause::Interrupt);
            self.apply(outcome);
            return;
        }

        let instr = Instruction::decode(word);
        let outcome = self.execute(instr);
        self.apply(outcome);
    }

    /// Commit an instruction outcome: delay-slot flag and next PC
    ///
    /// Branching is two-phase. A taken branch or jump does not transfer
    /// control directly: it stashes the target, leaves the PC on the
    /// delay-slot instruction at PC+4, and marks it with `in_delay`. The
    /// stashed target is applied once that instruction has executed. An
    /// exception or ERET redirect transfers immediately and cancels any
    /// pending target; the re-executed branch recomputes it after ERET.
    fn apply(&mut self, outcome: Outcome) {
        let pending = self.next_target.take();
        self.in_delay = outcome.delay_slot;

        match outcome.new_pc {
            Some(target) if outcome.delay_slot => {
                // Taken branch or jump: execute the delay slot at PC+4
                // before control transfers
                self.next_target = Some(target);
                self.pc = self.pc.wrapping_add(4);
            }
            Some(target) => {
                // Exception vector or ERET: immediate, no delay slot
                self.pc = target;
            }
            None => {
                // Fall-through; leaving a delay slot lands on the branch
                // target stashed by the previous instruction
                self.pc = pending.unwrap_or_else(|| self.pc.wrapping_add(4));
            }
        }
    }

    /// Raise a guest exception at the current PC
    ///
    /// Routes through CP0 (which records ExcCode/BD/EPC and computes the
    /// vector), consumes the delay-slot flag, applies the disposition
    /// policy, and returns the redirect to the vector.
    pub(crate) fn raise(&mut self, cause: ExceptionCause) -> Outcome {
        let vector = self.cop0.raise_exception(cause, self.pc, self.in_delay);
        self.in_delay = false;
        self.dispose(cause);
        Outcome::redirect(vector)
    }

    /// Exception disposition policy
    ///
    /// Interrupts and syscalls continue at the installed vector. Every
    /// other cause is fatal in a fresh core — no guest handler exists to
    /// recover — so the CPU halts with a diagnostic. A host that installs
    /// vector code changes this behavior by handling the exception in
    /// guest space before it ever becomes fatal.
    fn dispose(&mut self, cause: ExceptionCause) {
        match cause {
            ExceptionCause::Interrupt | ExceptionCause::Syscall => {}
            _ => {
                log::error!(
                    "unhandled {:?} exception: PC=0x{:08X} EPC=0x{:08X} BadVAddr=0x{:08X} Cause=0x{:08X}; halting",
                    cause,
                    self.pc,
                    self.cop0.epc(),
                    self.cop0.bad_vaddr(),
                    self.cop0.cause()
                );
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Log the architectural register state (debugging aid)
    pub fn dump_registers(&self) {
        log::info!("PC=0x{:08X} HI=0x{:08X} LO=0x{:08X}", self.pc, self.hi, self.lo);
        for row in 0..8 {
            let i = row * 4;
            log::info!(
                "r{:02}=0x{:08X} r{:02}=0x{:08X} r{:02}=0x{:08X} r{:02}=0x{:08X}",
                i,
                self.reg(i as u8),
                i + 1,
                self.reg(i as u8 + 1),
                i + 2,
                self.reg(i as u8 + 2),
                i + 3,
                self.reg(i as u8 + 3)
            );
        }
        log::info!(
            "Status=0x{:08X} Cause=0x{:08X} EPC=0x{:08X} BadVAddr=0x{:08X}",
            self.cop0.status(),
            self.cop0.cause(),
            self.cop0.epc(),
            self.cop0.bad_vaddr()
        );
    }
}
