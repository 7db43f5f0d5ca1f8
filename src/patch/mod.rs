// gbs2gb - Converts GBS music rips into playable Game Boy cartridge images
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Address patching of the embedded player.
//!
//! The player was assembled against a fixed GBS layout. Once the GBS file is
//! copied into the image, the player has to be told where the header fields
//! and code ended up. [`table`] lists every rewrite declaratively; this module
//! resolves the rules for a given header and writes them into the image.

pub mod table;

pub use table::{PLAYER_CODE, REGIONS};

use std::ops::Range;

use crate::gbs::GbsHeader;

/// Where a patched word points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Offset from the start of the relocated GBS file (header included).
    Relocated(u16),
    /// Fixed address inside the player.
    Player(u16),
}

/// A single rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Store a little-endian address at `offset`.
    Word { offset: usize, target: Target },
    /// Store raw bytes at `offset`.
    Bytes { offset: usize, data: &'static [u8] },
}

impl Rule {
    pub fn offset(&self) -> usize {
        match self {
            Rule::Word { offset, .. } | Rule::Bytes { offset, .. } => *offset,
        }
    }

    /// Image bytes written by this rule.
    pub fn range(&self) -> Range<usize> {
        let len = match self {
            Rule::Word { .. } => 2,
            Rule::Bytes { data, .. } => data.len(),
        };
        self.offset()..self.offset() + len
    }
}

/// When a region is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// Only if bit 6 of the GBS timer control byte is set.
    TimerInterrupt,
}

impl Condition {
    pub fn holds(&self, header: &GbsHeader) -> bool {
        match self {
            Condition::Always => true,
            Condition::TimerInterrupt => header.uses_timer_interrupt(),
        }
    }
}

/// A named group of rules sharing one condition.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub name: &'static str,
    pub condition: Condition,
    pub rules: &'static [Rule],
}

/// The bytes a resolved patch writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchData {
    Word(u16),
    Bytes(&'static [u8]),
}

/// A rule resolved against a concrete header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchEntry {
    pub region: &'static str,
    pub offset: usize,
    pub data: PatchData,
}

impl PatchEntry {
    fn resolve(region: &Region, rule: &Rule, gbs_start: usize) -> Self {
        let data = match *rule {
            // Addresses are 16 bits on the Game Boy.
            Rule::Word {
                target: Target::Relocated(delta),
                ..
            } => PatchData::Word((gbs_start + delta as usize) as u16),
            Rule::Word {
                target: Target::Player(address),
                ..
            } => PatchData::Word(address),
            Rule::Bytes { data, .. } => PatchData::Bytes(data),
        };

        Self {
            region: region.name,
            offset: rule.offset(),
            data,
        }
    }

    /// Image bytes written by this patch.
    pub fn range(&self) -> Range<usize> {
        let len = match self.data {
            PatchData::Word(_) => 2,
            PatchData::Bytes(data) => data.len(),
        };
        self.offset..self.offset + len
    }

    /// Write the patch into `image`.
    pub fn apply(&self, image: &mut [u8]) {
        match self.data {
            PatchData::Word(value) => {
                image[self.range()].copy_from_slice(&value.to_le_bytes());
                tracing::debug!(
                    region = self.region,
                    "patch 0x{:04X}: 0x{:04X}",
                    self.offset,
                    value
                );
            }
            PatchData::Bytes(data) => {
                image[self.range()].copy_from_slice(data);
                tracing::debug!(
                    region = self.region,
                    "patch 0x{:04X}: {:02X?}",
                    self.offset,
                    data
                );
            }
        }
    }
}

/// Resolve every applicable rule for `header`, in application order.
pub fn plan(header: &GbsHeader) -> Vec<PatchEntry> {
    let gbs_start = header.relocation_base();

    REGIONS
        .iter()
        .filter(|region| region.condition.holds(header))
        .flat_map(|region| {
            region
                .rules
                .iter()
                .map(move |rule| PatchEntry::resolve(region, rule, gbs_start))
        })
        .collect()
}

/// Apply every patch for `header` to `image`.
///
/// `image` must be at least [`crate::player::PLAYER_LENGTH`] bytes long.
pub fn apply_all(image: &mut [u8], header: &GbsHeader) -> usize {
    let patches = plan(header);
    for patch in &patches {
        patch.apply(image);
    }
    patches.len()
}
