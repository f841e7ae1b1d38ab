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

//! Software TLB
//!
//! The TLB is an ordered array of paired-page entries. Each entry maps a
//! VPN2 (the virtual page number of an 8 KiB-aligned pair of 4 KiB pages)
//! to two physical half-entries, one for the even and one for the odd page.
//! Matching honors the ASID unless the entry's global bit is set.
//!
//! The four architected operations — TLBP, TLBR, TLBWI, TLBWR — move data
//! between the TLB array and the staging registers EntryHi, EntryLo0,
//! EntryLo1 and PageMask, with Index/Random selecting the slot.

use super::COP0;

/// A two-page (even/odd) TLB entry
///
/// Field widths match the EntryHi/EntryLo register layouts: VPN2 occupies
/// bits [31:13] of the virtual address, each PFN is the 20-bit field from
/// EntryLo [25:6], and the cache attribute C is 3 bits wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TLBEntry {
    /// Virtual page-pair number, stored as address bits [31:13]
    pub vpn2: u32,
    /// Address-space identifier from EntryHi [7:0]
    pub asid: u8,
    /// Effective global bit: set only when both EntryLo G bits were set
    pub g: bool,

    /// Even page PFN (EntryLo0 [25:6])
    pub pfn0: u32,
    /// Even page cache attribute
    pub c0: u8,
    /// Even page dirty (write-enable) bit
    pub d0: bool,
    /// Even page valid bit
    pub v0: bool,

    /// Odd page PFN (EntryLo1 [25:6])
    pub pfn1: u32,
    /// Odd page cache attribute
    pub c1: u8,
    /// Odd page dirty bit
    pub d1: bool,
    /// Odd page valid bit
    pub v1: bool,

    /// PageMask register value for this entry (bits [24:13])
    pub mask: u32,
}

impl COP0 {
    /// TLBP: probe the TLB for an entry matching EntryHi
    ///
    /// An entry matches when its VPN2 equals EntryHi.VPN2 and it is either
    /// global or its ASID equals EntryHi.ASID. On a hit, Index receives the
    /// entry's position with the P bit clear; on a miss, Index.P is set.
    pub fn tlbp(&mut self) {
        let vpn2 = self.entry_hi & 0xFFFF_E000;
        let asid = (self.entry_hi & 0xFF) as u8;

        for (i, entry) in self.tlb.iter().enumerate() {
            if entry.vpn2 == vpn2 && (entry.g || entry.asid == asid) {
                self.index = i as u32 & 0x3F;
                return;
            }
        }
        self.index = 0x8000_0000; // P = 1
    }

    /// TLBR: read the entry selected by Index into the staging registers
    ///
    /// A no-op when Index.P is set (the last probe failed) or Index is out
    /// of range. Otherwise EntryHi, EntryLo0, EntryLo1 and PageMask are
    /// rebuilt from the stored entry; the single effective G bit
    /// materializes into bit 0 of both EntryLo values.
    pub fn tlbr(&mut self) {
        if self.index & 0x8000_0000 != 0 {
            return;
        }
        let idx = (self.index & 0x3F) as usize;
        if idx >= self.tlb.len() {
            return;
        }
        let entry = self.tlb[idx];

        self.entry_hi = (entry.vpn2 & 0xFFFF_E000) | u32::from(entry.asid);
        self.page_mask = entry.mask & 0x01FF_E000;
        self.entry_lo0 = pack_entry_lo(entry.pfn0, entry.c0, entry.d0, entry.v0, entry.g);
        self.entry_lo1 = pack_entry_lo(entry.pfn1, entry.c1, entry.d1, entry.v1, entry.g);
    }

    /// TLBWI: write the staging registers into the entry selected by Index
    ///
    /// A no-op when Index.P is set or Index is out of range.
    pub fn tlbwi(&mut self) {
        if self.index & 0x8000_0000 != 0 {
            return;
        }
        let idx = (self.index & 0x3F) as usize;
        if idx >= self.tlb.len() {
            return;
        }
        self.write_tlb_at(idx);
    }

    /// TLBWR: write the staging registers into the entry selected by Random
    ///
    /// Random is clamped into the replaceable window [wired, tlb_size-1]
    /// before use, then cycled so consecutive TLBWRs spread across it.
    pub fn tlbwr(&mut self) {
        let idx = (self.random & 0x3F).clamp(self.wired, self.tlb_size - 1);
        self.write_tlb_at(idx as usize);
        self.step();
    }

    /// Decode the staging registers into `tlb[idx]`
    fn write_tlb_at(&mut self, idx: usize) {
        let lo0 = self.entry_lo0 & 0x3FFF_FFFF;
        let lo1 = self.entry_lo1 & 0x3FFF_FFFF;

        let (pfn0, c0, d0, v0, g0) = unpack_entry_lo(lo0);
        let (pfn1, c1, d1, v1, g1) = unpack_entry_lo(lo1);

        self.tlb[idx] = TLBEntry {
            vpn2: self.entry_hi & 0xFFFF_E000,
            asid: (self.entry_hi & 0xFF) as u8,
            // The stored entry has a single global bit: both halves must
            // agree for the pair to be global
            g: g0 && g1,
            pfn0,
            c0,
            d0,
            v0,
            pfn1,
            c1,
            d1,
            v1,
            mask: self.page_mask & 0x01FF_E000,
        };
    }

    /// Entry at `idx`, for host inspection
    pub fn tlb_entry(&self, idx: usize) -> Option<&TLBEntry> {
        self.tlb.get(idx)
    }
}

/// Split an EntryLo value into (PFN, C, D, V, G)
fn unpack_entry_lo(lo: u32) -> (u32, u8, bool, bool, bool) {
    let pfn = (lo >> 6) & 0xF_FFFF;
    let c = ((lo >> 3) & 0x7) as u8;
    let d = lo & (1 << 2) != 0;
    let v = lo & (1 << 1) != 0;
    let g = lo & 1 != 0;
    (pfn, c, d, v, g)
}

/// Assemble an EntryLo value from (PFN, C, D, V, G)
fn pack_entry_lo(pfn: u32, c: u8, d: bool, v: bool, g: bool) -> u32 {
    let mut lo = (pfn & 0xF_FFFF) << 6;
    lo |= u32::from(c & 0x7) << 3;
    if d {
        lo |= 1 << 2;
    }
    if v {
        lo |= 1 << 1;
    }
    if g {
        lo |= 1;
    }
    lo
}
