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

//! Exception raising, ERET and disposition tests

use super::*;
use crate::core::cpu::{ExceptionCause, COP0};

const STATUS_EXL: u32 = 1 << 1;
const STATUS_ERL: u32 = 1 << 2;
const CAUSE_BD: u32 = 1 << 31;

#[test]
fn test_add_overflow_trap() {
    // add $3, $1, $2 with 0x7FFFFFFF + 1
    let mut cpu = cpu_with_program(&[0x00221820]);
    cpu.set_reg(1, 0x7FFF_FFFF);
    cpu.set_reg(2, 1);
    cpu.set_reg(3, 0xAAAA_AAAA);

    cpu.step();

    // Destination unchanged, Ov recorded, EXL set, PC at the vector
    assert_eq!(cpu.get_reg(3), 0xAAAA_AAAA);
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 12);
    assert_eq!(cpu.get_cp0(COP0::STATUS, 0) & STATUS_EXL, STATUS_EXL);
    assert_eq!(cpu.pc(), VECTOR);
    assert_eq!(cpu.get_cp0(COP0::EPC, 0), 0);
}

#[test]
fn test_sub_overflow_trap() {
    // sub $3, $1, $2 with INT_MIN - 1
    let mut cpu = cpu_with_program(&[0x00221822]);
    cpu.set_reg(1, 0x8000_0000);
    cpu.set_reg(2, 1);

    cpu.step();

    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 12);
    assert_eq!(cpu.get_reg(3), 0);
}

#[test]
fn test_addi_overflow_trap() {
    // addi $2, $1, 1 with $1 = INT_MAX
    let mut cpu = cpu_with_program(&[0x20220001]);
    cpu.set_reg(1, 0x7FFF_FFFF);

    cpu.step();

    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 12);
    assert_eq!(cpu.get_reg(2), 0);
}

#[test]
fn test_syscall_continues_at_vector() {
    let mut cpu = cpu_with_program(&[0x0000000C]); // syscall

    cpu.run_steps(1);

    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 8);
    assert_eq!(cpu.get_cp0(COP0::STATUS, 0) & STATUS_EXL, STATUS_EXL);
    assert_eq!(cpu.get_cp0(COP0::EPC, 0), 0);
    assert_eq!(cpu.pc(), VECTOR);
    // Syscall is not fatal: the running flag survived the step
    assert!(!cpu.is_running()); // cleared by the step cap, not the policy
}

#[test]
fn test_break_is_fatal() {
    let mut cpu = cpu_with_program(&[0x0000000D]); // break

    cpu.run();

    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 9);
    assert_eq!(cpu.pc(), VECTOR);
    assert_eq!(cpu.cycles(), 1); // halted immediately
}

#[test]
fn test_trap_instructions() {
    // teq $1, $2 with equal values traps
    let mut cpu = cpu_with_program(&[0x00220034]);
    cpu.set_reg(1, 5);
    cpu.set_reg(2, 5);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 13);
    assert_eq!(cpu.pc(), VECTOR);

    // teq with different values falls through
    let mut cpu = cpu_with_program(&[0x00220034]);
    cpu.set_reg(1, 5);
    cpu.set_reg(2, 6);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 0);
    assert_eq!(cpu.pc(), 4);

    // tne traps on inequality
    let mut cpu = cpu_with_program(&[0x00220036]);
    cpu.set_reg(1, 5);
    cpu.set_reg(2, 6);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 13);

    // tge: signed -1 >= -1
    let mut cpu = cpu_with_program(&[0x00220030]);
    cpu.set_reg(1, (-1i32) as u32);
    cpu.set_reg(2, (-1i32) as u32);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 13);

    // tgeu: 0xFFFFFFFF >= 1 unsigned
    let mut cpu = cpu_with_program(&[0x00220031]);
    cpu.set_reg(1, 0xFFFF_FFFF);
    cpu.set_reg(2, 1);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 13);

    // tlt: signed -1 < 1
    let mut cpu = cpu_with_program(&[0x00220032]);
    cpu.set_reg(1, (-1i32) as u32);
    cpu.set_reg(2, 1);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 13);

    // tltu: -1 as unsigned is large, does not trap against 1
    let mut cpu = cpu_with_program(&[0x00220033]);
    cpu.set_reg(1, (-1i32) as u32);
    cpu.set_reg(2, 1);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 0);
}

#[test]
fn test_reserved_instruction() {
    // SPECIAL funct 0x3F is unassigned
    let mut cpu = cpu_with_program(&[0x0000003F]);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 10);
    assert_eq!(cpu.pc(), VECTOR);

    // Opcode 0x3F likewise
    let mut cpu = cpu_with_program(&[0xFFFF_FFFF]);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 10);

    // Reserved REGIMM code
    let mut cpu = cpu_with_program(&[0x041F0000]);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 10);
}

#[test]
fn test_coprocessor_unusable() {
    // COP1 (FPU) opcode with no FPU attached
    let mut cpu = cpu_with_program(&[0x4600_0000]);
    cpu.step();
    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 11);
}

#[test]
fn test_fetch_address_error_sets_bad_vaddr() {
    let mut cpu = cpu_with_program(&[]);
    cpu.set_pc(0x0000_0002); // misaligned

    cpu.step();

    assert_eq!(exc_code(cpu.get_cp0(COP0::CAUSE, 0)), 4);
    assert_eq!(cpu.get_cp0(COP0::BAD_VADDR, 0), 0x0000_0002);
    assert_eq!(cpu.get_cp0(COP0::EPC, 0), 0x0000_0002);
    assert_eq!(cpu.pc(), VECTOR);
}

#[test]
fn test_exception_in_delay_slot_sets_bd() {
    let mut cpu = cpu_with_program(&[
        0x10000002, // 0x00: beq $0, $0, +2 (always taken)
        0x0000000C, // 0x04: syscall in the delay slot
    ]);

    cpu.step(); // branch
    assert!(cpu.in_delay_slot());

    cpu.step(); // syscall inside the slot

    let cause = cpu.get_cp0(COP0::CAUSE, 0);
    assert_eq!(exc_code(cause), 8);
    // BD set and EPC rewound to the branch
    assert_eq!(cause & CAUSE_BD, CAUSE_BD);
    assert_eq!(cpu.get_cp0(COP0::EPC, 0), 0x0000_0000);
    assert_eq!(cpu.pc(), VECTOR);
    assert!(!cpu.in_delay_slot());
}

#[test]
fn test_exception_outside_delay_slot_clears_bd() {
    let mut cpu = cpu_with_program(&[0x0000000C]); // syscall
    // Make BD sticky from an earlier exception to prove it gets cleared
    cpu.cop0_mut()
        .raise_exception(ExceptionCause::Syscall, 0x40, true);
    assert_eq!(cpu.get_cp0(COP0::CAUSE, 0) & CAUSE_BD, CAUSE_BD);
    cpu.set_cp0(COP0::STATUS, 0, 0); // clear EXL again

    cpu.step();

    let cause = cpu.get_cp0(COP0::CAUSE, 0);
    assert_eq!(cause & CAUSE_BD, 0);
    assert_eq!(cpu.get_cp0(COP0::EPC, 0), 0);
}

#[test]
fn test_eret_returns_to_epc() {
    let mut cpu = cpu_with_program(&[0x42000018]); // eret
    cpu.set_cp0(COP0::EPC, 0, 0x8000_1000);
    cpu.set_cp0(COP0::STATUS, 0, STATUS_EXL);

    cpu.step();

    assert_eq!(cpu.pc(), 0x8000_1000);
    assert_eq!(cpu.get_cp0(COP0::STATUS, 0) & STATUS_EXL, 0);
    assert!(!cpu.in_delay_slot()); // ERET has no delay slot
}

#[test]
fn test_eret_erl_path() {
    let mut cpu = cpu_with_program(&[0x42000018]); // eret
    cpu.set_cp0(COP0::ERROR_EPC, 0, 0x9000_2000);
    cpu.set_cp0(COP0::EPC, 0, 0x8000_1000);
    cpu.set_cp0(COP0::STATUS, 0, STATUS_ERL | STATUS_EXL);

    cpu.step();

    // ERL wins: ErrorEPC is the target and only ERL is cleared
    assert_eq!(cpu.pc(), 0x9000_2000);
    let status = cpu.get_cp0(COP0::STATUS, 0);
    assert_eq!(status & STATUS_ERL, 0);
    assert_eq!(status & STATUS_EXL, STATUS_EXL);
}

#[test]
fn test_eret_clears_bd() {
    let mut cpu = cpu_with_program(&[0x42000018]);
    cpu.cop0_mut()
        .raise_exception(ExceptionCause::Syscall, 0x44, true);
    assert_eq!(cpu.get_cp0(COP0::CAUSE, 0) & CAUSE_BD, CAUSE_BD);

    cpu.step();

    assert_eq!(cpu.get_cp0(COP0::CAUSE, 0) & CAUSE_BD, 0);
}

#[test]
fn test_vector_uses_ebase_when_in_window() {
    let mut cpu = cpu_with_program(&[0x0000000C]); // syscall
    cpu.set_cp0(COP0::PRID, 1, 0x9000_0000); // EBase inside the window

    cpu.step();
    assert_eq!(cpu.pc(), 0x9000_0180);
}

#[test]
fn test_vector_falls_back_to_boot_base() {
    let mut cpu = cpu_with_program(&[0x0000000C]); // syscall
    cpu.set_cp0(COP0::PRID, 1, 0x0000_1000); // outside [0x80000000, 0xBFC00000)

    cpu.step();
    assert_eq!(cpu.pc(), 0xBFC0_0180);
}

#[test]
fn test_exception_preserves_gpr_and_hi_lo() {
    let mut cpu = cpu_with_program(&[
        0x00600011, // mthi $3
        0x00800013, // mtlo $4
        0x0000000D, // break
    ]);
    for i in 1..32 {
        cpu.set_reg(i, u32::from(i) * 7);
    }
    cpu.set_reg(3, 0x1234);
    cpu.set_reg(4, 0x5678);

    cpu.step();
    cpu.step();
    cpu.step(); // break

    assert_eq!(cpu.hi(), 0x1234);
    assert_eq!(cpu.lo(), 0x5678);
    for i in 5..32 {
        assert_eq!(cpu.get_reg(i), u32::from(i) * 7);
    }
}
