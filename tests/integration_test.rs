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

//! End-to-end scenarios through the public API: load a program image,
//! run the machine, inspect architectural state.

mod common;

use common::{exc_code, image_of, vm_with_program};
use mipsvm::core::cpu::CPU;
use mipsvm::core::loader;
use mipsvm::core::memory::Memory;

#[test]
fn test_loader_and_run_to_halt() {
    // A small program assembled by hand:
    //   addiu $t0, $zero, 6
    //   addiu $t1, $zero, 7
    //   mult  $t0, $t1
    //   mflo  $t2
    //   break
    let image = image_of(&[
        0x24080006, 0x24090007, 0x01090018, 0x00005012, 0x0000000D,
    ]);

    let mut memory = Memory::new(64 * 1024);
    loader::load_image(&mut memory, &image, 0).unwrap();

    let mut cpu = CPU::new(memory);
    cpu.run(); // BREAK is fatal under the default policy and halts the VM

    assert_eq!(cpu.get_reg(10), 42);
    assert_eq!(cpu.cycles(), 5);
    assert!(!cpu.is_running());
}

#[test]
fn test_mfc0_mtc0_round_trip() {
    let mut cpu = vm_with_program(&[
        0x40876000, // mtc0 $7, $12 (Status)
        0x40056000, // mfc0 $5, $12
    ]);
    cpu.set_reg(7, 0x30000000);

    cpu.run_steps(2);

    assert_eq!(cpu.get_cp0(12, 0), 0x30000000);
    assert_eq!(cpu.get_reg(5), 0x30000000);
}

#[test]
fn test_eret_scenario() {
    let mut cpu = vm_with_program(&[0x42000018]); // eret
    cpu.set_cp0(14, 0, 0x8000_1000); // EPC
    cpu.set_cp0(12, 0, 1 << 1); // Status.EXL

    cpu.run_steps(1);

    assert_eq!(cpu.pc(), 0x8000_1000);
    assert_eq!(cpu.get_cp0(12, 0) & (1 << 1), 0);
}

#[test]
fn test_overflow_trap_scenario() {
    // add $3, $1, $2 with 0x7FFFFFFF + 1
    let mut cpu = vm_with_program(&[0x00221820]);
    cpu.set_reg(1, 0x7FFF_FFFF);
    cpu.set_reg(2, 1);

    cpu.run();

    assert_eq!(cpu.get_reg(3), 0);
    assert_eq!(exc_code(cpu.get_cp0(13, 0)), 12); // Ov
    assert_eq!(cpu.get_cp0(12, 0) & (1 << 1), 1 << 1); // EXL
    assert_eq!(cpu.pc(), 0x8000_0180); // at the vector
}

#[test]
fn test_jump_scenario() {
    // j 0x40 from PC 0 lands at 0x40 after the delay slot
    let mut cpu = vm_with_program(&[0x08000010, 0x00000000]);

    cpu.run_steps(2);

    assert_eq!(cpu.pc(), 0x0000_0040);
}

#[test]
fn test_loop_program() {
    // Sum 1..=5 with a countdown loop:
    //   0x00: addiu $t0, $zero, 5    # counter
    //   0x04: addu  $t1, $zero, $zero # sum
    //   0x08: addu  $t1, $t1, $t0    # loop: sum += counter
    //   0x0C: bne   $t0, $zero, -2   # branch back to 0x08...
    //   0x10: addiu $t0, $t0, -1     # ...with the decrement in the slot
    //   0x14: break
    let mut cpu = vm_with_program(&[
        0x24080005, 0x00004821, 0x01284821, 0x1500FFFE, 0x2508FFFF, 0x0000000D,
    ]);

    cpu.run();

    // 5+4+3+2+1 = 15
    assert_eq!(cpu.get_reg(9), 15);
    assert!(!cpu.is_running());
}

#[test]
fn test_memory_store_program() {
    // Store a word, load it into another register, halt
    //   lui  $1, 0x0000  ; base 0 (no-op, keeps the base explicit)
    //   ori  $1, $1, 0x2000
    //   ori  $2, $zero, 0xBEEF
    //   sw   $2, 0($1)
    //   lw   $3, 0($1)
    //   break
    let mut cpu = vm_with_program(&[
        0x3C010000, 0x34212000, 0x3402BEEF, 0xAC220000, 0x8C230000, 0x0000000D,
    ]);

    cpu.run();

    assert_eq!(cpu.get_reg(3), 0xBEEF);
    assert_eq!(cpu.memory().load_word(0x2000).unwrap(), 0xBEEF);
}

#[test]
fn test_syscall_then_runaway_fetch_halts() {
    // With no handler installed at the vector, the syscall continues at
    // 0x80000180; the fetch there is outside this small memory, raising a
    // fatal AdEL that halts the machine. Two steps total.
    let mut cpu = vm_with_program(&[0x0000000C]);

    cpu.run();

    assert!(!cpu.is_running());
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.get_cp0(8, 0), 0x8000_0180); // BadVAddr = vector PC
}

#[test]
fn test_stop_handle_terminates_run() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    // An infinite loop: j 0x0 with a NOP in the delay slot
    let mut cpu = vm_with_program(&[0x08000000, 0x00000000]);
    let handle = cpu.stop_handle();

    // Keep firing the handle until the run loop has observably exited, so
    // the test cannot race a stop in before run() raises the flag
    let done = Arc::new(AtomicBool::new(false));
    let stopper = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                handle.stop();
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    cpu.run(); // returns once the handle fires
    done.store(true, Ordering::SeqCst);

    stopper.join().unwrap();
    assert!(!cpu.is_running());
}

#[test]
fn test_tlb_round_trip_through_instructions() {
    let mut cpu = vm_with_program(&[
        0x42000002, // tlbwi
        0x42000001, // tlbr
        0x0000000D, // break
    ]);

    cpu.set_cp0(10, 0, 0x1234_E042); // EntryHi
    cpu.set_cp0(2, 0, 0x03F0_00DF); // EntryLo0
    cpu.set_cp0(3, 0, 0x02AF_37AB); // EntryLo1
    cpu.set_cp0(5, 0, 0x0000_6000); // PageMask
    cpu.set_cp0(0, 0, 7); // Index

    cpu.run();

    assert_eq!(cpu.get_cp0(10, 0), 0x1234_E042);
    assert_eq!(cpu.get_cp0(2, 0), 0x03F0_00DF);
    assert_eq!(cpu.get_cp0(3, 0), 0x02AF_37AB);
    assert_eq!(cpu.get_cp0(5, 0), 0x0000_6000);
}
