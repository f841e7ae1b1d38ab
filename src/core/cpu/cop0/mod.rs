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

//! Coprocessor 0 (System Control)
//!
//! COP0 owns everything the architecture calls "system control": the
//! exception registers (Status/Cause/EPC/BadVAddr), the Count/Compare
//! timer, interrupt masking and pending state, the exception vector
//! computation, and the software TLB with its index registers.
//!
//! The model follows MIPS32r1 with a few r2 registers (EBase). All
//! registers are 32-bit and addressed as `(reg, sel)` pairs; reads of
//! unmapped pairs return 0 and writes to them are discarded, like hardware
//! that simply does not decode the select lines.

mod tlb;

pub use tlb::TLBEntry;

/// Exception cause codes
///
/// These are the `ExcCode` values written into Cause[6:2] when an exception
/// is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExceptionCause {
    /// Interrupt (hardware or software)
    Interrupt = 0,
    /// TLB modification (write to a clean page)
    TlbModified = 1,
    /// TLB miss on load or instruction fetch
    TlbLoad = 2,
    /// TLB miss on store
    TlbStore = 3,
    /// Address error on load or instruction fetch
    AddressErrorLoad = 4,
    /// Address error on store
    AddressErrorStore = 5,
    /// Syscall instruction executed
    Syscall = 8,
    /// Breakpoint instruction executed
    Breakpoint = 9,
    /// Reserved or illegal instruction
    ReservedInstruction = 10,
    /// Coprocessor unusable
    CoprocessorUnusable = 11,
    /// Arithmetic overflow
    Overflow = 12,
    /// Trap instruction condition met
    Trap = 13,
}

// Status register bits
const STATUS_IE: u32 = 1 << 0;
const STATUS_EXL: u32 = 1 << 1;
const STATUS_ERL: u32 = 1 << 2;
const STATUS_IM_SHIFT: u32 = 8;

// Cause register bits
const CAUSE_BD: u32 = 1 << 31;
const CAUSE_TI: u32 = 1 << 30;
const CAUSE_IV: u32 = 1 << 23;
const CAUSE_IP_SHIFT: u32 = 8;
const CAUSE_EXC_CODE_MASK: u32 = 0x7C;

/// Coprocessor 0 state
///
/// Owned exclusively by the CPU; the executor reaches the TLB and the
/// exception machinery only through these methods.
pub struct COP0 {
    // TLB state
    pub(super) tlb: Vec<TLBEntry>,
    pub(super) tlb_size: u32,

    // CP0 architectural registers (selected common ones)
    index: u32,     // 0, sel 0: [5:0] index, [31] P (probe fail)
    random: u32,    // 1, sel 0: cycles in [wired, tlb_size-1]
    entry_lo0: u32, // 2, sel 0
    entry_lo1: u32, // 3, sel 0
    context: u32,   // 4, sel 0
    page_mask: u32, // 5, sel 0
    wired: u32,     // 6, sel 0

    bad_vaddr: u32, // 8, sel 0 (read-only from software)
    count: u32,     // 9, sel 0 (incremented by tick)
    entry_hi: u32,  // 10, sel 0
    compare: u32,   // 11, sel 0

    status: u32, // 12, sel 0
    cause: u32,  // 13, sel 0
    epc: u32,    // 14, sel 0

    prid: u32,  // 15, sel 0 (read-only)
    ebase: u32, // 15, sel 1 (vector base)

    config0: u32, // 16, sel 0
    config1: u32, // 16, sel 1 (read-only)

    lladdr: u32,   // 17, sel 0
    watch_lo: u32, // 18, sel 0
    watch_hi: u32, // 19, sel 0

    xcontext: u32, // 20, sel 0

    error_epc: u32, // 30, sel 0
}

impl COP0 {
    /// Index
    pub const INDEX: u32 = 0;
    /// Random
    pub const RANDOM: u32 = 1;
    /// EntryLo0
    pub const ENTRY_LO0: u32 = 2;
    /// EntryLo1
    pub const ENTRY_LO1: u32 = 3;
    /// Context
    pub const CONTEXT: u32 = 4;
    /// PageMask
    pub const PAGE_MASK: u32 = 5;
    /// Wired
    pub const WIRED: u32 = 6;
    /// BadVAddr
    pub const BAD_VADDR: u32 = 8;
    /// Count
    pub const COUNT: u32 = 9;
    /// EntryHi
    pub const ENTRY_HI: u32 = 10;
    /// Compare
    pub const COMPARE: u32 = 11;
    /// Status
    pub const STATUS: u32 = 12;
    /// Cause
    pub const CAUSE: u32 = 13;
    /// EPC
    pub const EPC: u32 = 14;
    /// PRId (sel 0) / EBase (sel 1)
    pub const PRID: u32 = 15;
    /// Config0 (sel 0) / Config1 (sel 1)
    pub const CONFIG: u32 = 16;
    /// LLAddr
    pub const LLADDR: u32 = 17;
    /// WatchLo
    pub const WATCH_LO: u32 = 18;
    /// WatchHi
    pub const WATCH_HI: u32 = 19;
    /// XContext
    pub const XCONTEXT: u32 = 20;
    /// ErrorEPC
    pub const ERROR_EPC: u32 = 30;

    /// Default TLB size in entries
    pub const DEFAULT_TLB_SIZE: u32 = 16;

    /// Create a new CP0 with a TLB of `tlb_size` entries
    ///
    /// A size of 0 falls back to [`COP0::DEFAULT_TLB_SIZE`]. Reset state:
    /// Random at the top of the TLB, Wired 0, EBase 0x80000000, Config0
    /// advertising Config1 (M) with K0 = 3, Config1 carrying the MMU size.
    pub fn new(tlb_size: u32) -> Self {
        let tlb_size = if tlb_size == 0 {
            Self::DEFAULT_TLB_SIZE
        } else {
            tlb_size.min(64)
        };

        Self {
            tlb: (0..tlb_size).map(|_| TLBEntry::default()).collect(),
            tlb_size,
            index: 0,
            random: tlb_size - 1,
            entry_lo0: 0,
            entry_lo1: 0,
            context: 0,
            page_mask: 0,
            wired: 0,
            bad_vaddr: 0,
            count: 0,
            entry_hi: 0,
            compare: 0,
            status: 0,
            cause: 0,
            epc: 0,
            prid: 0x00018000,
            ebase: 0x8000_0000,
            // K0 = 3 (cacheable noncoherent), M = 1 (Config1 present)
            config0: (1 << 31) | 0x3,
            // MMUSize-1 field [30:25]
            config1: ((tlb_size - 1) & 0x3F) << 25,
            lladdr: 0,
            watch_lo: 0,
            watch_hi: 0,
            xcontext: 0,
            error_epc: 0,
        }
    }

    /// Number of TLB entries
    pub fn tlb_size(&self) -> u32 {
        self.tlb_size
    }

    /// Read CP0 register `(reg, sel)`
    ///
    /// Unmapped pairs read as 0.
    pub fn read(&self, reg: u32, sel: u32) -> u32 {
        match (reg, sel) {
            (Self::INDEX, 0) => self.index,
            (Self::RANDOM, 0) => self.random,
            (Self::ENTRY_LO0, 0) => self.entry_lo0,
            (Self::ENTRY_LO1, 0) => self.entry_lo1,
            (Self::CONTEXT, 0) => self.context,
            (Self::PAGE_MASK, 0) => self.page_mask,
            (Self::WIRED, 0) => self.wired,
            (Self::BAD_VADDR, 0) => self.bad_vaddr,
            (Self::COUNT, 0) => self.count,
            (Self::ENTRY_HI, 0) => self.entry_hi,
            (Self::COMPARE, 0) => self.compare,
            (Self::STATUS, 0) => self.status,
            (Self::CAUSE, 0) => self.cause,
            (Self::EPC, 0) => self.epc,
            (Self::PRID, 0) => self.prid,
            (Self::PRID, 1) => self.ebase,
            (Self::CONFIG, 0) => self.config0,
            (Self::CONFIG, 1) => self.config1,
            (Self::LLADDR, 0) => self.lladdr,
            (Self::WATCH_LO, 0) => self.watch_lo,
            (Self::WATCH_HI, 0) => self.watch_hi,
            (Self::XCONTEXT, 0) => self.xcontext,
            (Self::ERROR_EPC, 0) => self.error_epc,
            _ => {
                log::debug!("CP0 read of unmapped register ({}, {})", reg, sel);
                0
            }
        }
    }

    /// Write CP0 register `(reg, sel)`, applying the per-register masks and
    /// side effects
    ///
    /// Read-only registers (PRId, Config1, BadVAddr) and unmapped pairs
    /// discard the write.
    pub fn write(&mut self, reg: u32, sel: u32, value: u32) {
        match (reg, sel) {
            (Self::INDEX, 0) => {
                // [5:0] index; [31] P is read-only and preserved
                let p = self.index & 0x8000_0000;
                let idx = (value & 0x3F).min(self.tlb_size - 1);
                self.index = p | idx;
            }
            (Self::RANDOM, 0) => {
                // Read-only in hardware; accept the write but keep the
                // value inside [wired, tlb_size-1]
                self.random = value.clamp(self.wired, self.tlb_size - 1);
            }
            (Self::ENTRY_LO0, 0) => {
                // PFN [25:6], C [5:3], D [2], V [1], G [0]
                self.entry_lo0 = value & 0x3FFF_FFFF;
            }
            (Self::ENTRY_LO1, 0) => {
                self.entry_lo1 = value & 0x3FFF_FFFF;
            }
            (Self::CONTEXT, 0) => self.context = value,
            (Self::PAGE_MASK, 0) => {
                // Mask bits [24:13]
                self.page_mask = value & 0x01FF_E000;
            }
            (Self::WIRED, 0) => {
                self.wired = (value & 0x3F).min(self.tlb_size - 1);
                // Writing Wired resets Random to the top of the TLB
                self.random = self.tlb_size - 1;
            }
            (Self::BAD_VADDR, 0) => {
                // Read-only from software
            }
            (Self::COUNT, 0) => self.count = value,
            (Self::ENTRY_HI, 0) => {
                // VPN2 [31:13] and ASID [7:0]
                self.entry_hi = value & 0xFFFF_E0FF;
            }
            (Self::COMPARE, 0) => {
                self.compare = value;
                // Writing Compare acknowledges the timer interrupt
                self.cause &= !(CAUSE_TI | (1 << (CAUSE_IP_SHIFT + 7)));
            }
            (Self::STATUS, 0) => {
                // Stored whole: the core relies only on IE/EXL/ERL/IM and
                // does not interpret the remaining implementation-defined
                // bits, so software sees its value round-trip.
                self.status = value;
            }
            (Self::CAUSE, 0) => {
                // Writable bits: IV and the two software IP bits. BD, TI,
                // the hardware IP lines and ExcCode stay as they are.
                if value & CAUSE_IV != 0 {
                    self.cause |= CAUSE_IV;
                } else {
                    self.cause &= !CAUSE_IV;
                }
                let sw = (value >> CAUSE_IP_SHIFT) & 0x3;
                self.cause &= !(0x3 << CAUSE_IP_SHIFT);
                self.cause |= sw << CAUSE_IP_SHIFT;
            }
            (Self::EPC, 0) => self.epc = value,
            (Self::PRID, 0) => {
                // PRId is read-only
            }
            (Self::PRID, 1) => self.ebase = value,
            (Self::CONFIG, 0) => {
                // K0 [2:0] writable; M preserved
                let m = self.config0 & (1 << 31);
                self.config0 = m | (value & 0x7);
            }
            (Self::CONFIG, 1) => {
                // Config1 is read-only
            }
            (Self::LLADDR, 0) => self.lladdr = value,
            (Self::WATCH_LO, 0) => self.watch_lo = value,
            (Self::WATCH_HI, 0) => self.watch_hi = value,
            (Self::XCONTEXT, 0) => self.xcontext = value,
            (Self::ERROR_EPC, 0) => self.error_epc = value,
            _ => {
                log::debug!(
                    "CP0 write to unmapped register ({}, {}) = 0x{:08X} discarded",
                    reg,
                    sel,
                    value
                );
            }
        }
    }

    /// Set BadVAddr
    ///
    /// BadVAddr is read-only through [`COP0::write`]; address-error and TLB
    /// paths record the faulting address through this internal channel.
    pub fn set_bad_vaddr(&mut self, addr: u32) {
        self.bad_vaddr = addr;
    }

    /// Advance the Count timer by `cycles`
    ///
    /// When Compare is non-zero and the post-increment Count equals it
    /// exactly, the timer interrupt is asserted: Cause.TI and Cause.IP7 are
    /// set until software writes Compare. An equality skipped over by a
    /// multi-cycle tick does not fire.
    pub fn tick(&mut self, cycles: u32) {
        self.count = self.count.wrapping_add(cycles);
        if self.compare != 0 && self.count == self.compare {
            self.cause |= CAUSE_TI | (1 << (CAUSE_IP_SHIFT + 7));
        }
    }

    /// Per-instruction housekeeping: cycle Random downward
    ///
    /// Random walks down through [wired, tlb_size-1] and wraps back to the
    /// top when it reaches the wired boundary.
    pub fn step(&mut self) {
        if self.random <= self.wired {
            self.random = self.tlb_size - 1;
        } else {
            self.random -= 1;
        }
    }

    /// Assert or clear a hardware interrupt line (IP2..IP6)
    ///
    /// Lines outside 2..=6 are ignored; IP7 belongs to the timer and IP0/IP1
    /// to software.
    pub fn set_hw_interrupt(&mut self, line: u32, pending: bool) {
        if !(2..=6).contains(&line) {
            return;
        }
        let bit = 1 << (CAUSE_IP_SHIFT + line);
        if pending {
            self.cause |= bit;
        } else {
            self.cause &= !bit;
        }
    }

    /// Assert or clear a software interrupt (IP0 or IP1)
    pub fn set_sw_interrupt(&mut self, n: u32, pending: bool) {
        if n > 1 {
            return;
        }
        let bit = 1 << (CAUSE_IP_SHIFT + n);
        if pending {
            self.cause |= bit;
        } else {
            self.cause &= !bit;
        }
    }

    /// Whether an enabled interrupt is pending
    ///
    /// True iff interrupts are enabled (IE=1), no exception or error level
    /// is active (EXL=0, ERL=0) and an unmasked IP bit is set.
    pub fn pending_interrupt(&self) -> bool {
        if self.status & STATUS_IE == 0 || self.status & (STATUS_EXL | STATUS_ERL) != 0 {
            return false;
        }
        let ip = (self.cause >> CAUSE_IP_SHIFT) & 0xFF;
        let im = (self.status >> STATUS_IM_SHIFT) & 0xFF;
        ip & im != 0
    }

    /// Raise a guest exception and return the vector to fetch from next
    ///
    /// Writes the cause code into Cause.ExcCode and sets Status.EXL. When
    /// the faulting instruction sits in a branch delay slot, Cause.BD is
    /// set and EPC points at the branch (`pc - 4`); otherwise BD is cleared
    /// and EPC is `pc`.
    ///
    /// The vector base is 0xBFC00000 (the boot path) unless EBase has been
    /// pointed into [0x80000000, 0xBFC00000). The offset is 0x180, except
    /// for interrupts with Cause.IV set, which use the special vector at
    /// 0x200.
    pub fn raise_exception(&mut self, cause: ExceptionCause, pc: u32, in_delay_slot: bool) -> u32 {
        self.cause &= !CAUSE_EXC_CODE_MASK;
        self.cause |= (cause as u32 & 0x1F) << 2;

        if in_delay_slot {
            self.cause |= CAUSE_BD;
            self.epc = pc.wrapping_sub(4);
        } else {
            self.cause &= !CAUSE_BD;
            self.epc = pc;
        }

        self.status |= STATUS_EXL;

        let base = if (0x8000_0000..0xBFC0_0000).contains(&self.ebase) {
            self.ebase
        } else {
            0xBFC0_0000
        };
        let offset = if cause == ExceptionCause::Interrupt && self.cause & CAUSE_IV != 0 {
            0x200
        } else {
            0x180
        };

        base + offset
    }

    /// Return from exception, yielding the PC to resume at
    ///
    /// Clears Cause.BD. When ERL is set the error path wins: ERL is cleared
    /// and ErrorEPC is returned; otherwise EXL is cleared and EPC is
    /// returned.
    pub fn eret(&mut self) -> u32 {
        self.cause &= !CAUSE_BD;
        if self.status & STATUS_ERL != 0 {
            self.status &= !STATUS_ERL;
            return self.error_epc;
        }
        self.status &= !STATUS_EXL;
        self.epc
    }

    /// Latch the link address observed by LL
    pub fn set_lladdr(&mut self, addr: u32) {
        self.lladdr = addr;
    }

    /// Raw Status register value
    pub fn status(&self) -> u32 {
        self.status
    }

    /// Raw Cause register value
    pub fn cause(&self) -> u32 {
        self.cause
    }

    /// Current EPC value
    pub fn epc(&self) -> u32 {
        self.epc
    }

    /// Current BadVAddr value
    pub fn bad_vaddr(&self) -> u32 {
        self.bad_vaddr
    }
}
