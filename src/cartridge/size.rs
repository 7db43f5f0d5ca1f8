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

//! ROM size selection.
//!
//! Game Boy cartridges come in power-of-two sizes from 32 KiB up to 8 MiB.
//! The size code written at 0x148 is the exponent over 32 KiB.

use crate::error::{ConvertError, ErrorCode, Result};

/// Cartridge type byte for a plain 32 KiB ROM without a mapper.
pub const CART_TYPE_ROM_ONLY: u8 = 0x00;

/// Cartridge type byte for MBC1, the simplest banking controller.
pub const CART_TYPE_MBC1: u8 = 0x01;

/// One supported cartridge capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomSize {
    /// Value stored in the size byte of the cartridge header.
    pub code: u8,
    /// Capacity in bytes.
    pub bytes: usize,
    /// Whether ROM banking is needed to reach the whole image.
    pub uses_banking: bool,
}

impl RomSize {
    /// Cartridge type byte matching this size.
    pub fn cartridge_type(&self) -> u8 {
        if self.uses_banking {
            CART_TYPE_MBC1
        } else {
            CART_TYPE_ROM_ONLY
        }
    }
}

const fn tier(code: u8) -> RomSize {
    RomSize {
        code,
        bytes: 0x8000 << code,
        uses_banking: code > 0,
    }
}

/// All supported capacities, smallest first.
pub const ROM_SIZES: [RomSize; 9] = [
    tier(0), // 32 KiB
    tier(1), // 64 KiB
    tier(2), // 128 KiB
    tier(3), // 256 KiB
    tier(4), // 512 KiB
    tier(5), // 1 MiB
    tier(6), // 2 MiB
    tier(7), // 4 MiB
    tier(8), // 8 MiB
];

/// Largest image that fits on a supported cartridge.
pub const MAX_ROM_SIZE: usize = 0x80_0000;

/// Pick the smallest cartridge that holds `required` bytes.
pub fn rom_size_for(required: usize) -> Result<RomSize> {
    ROM_SIZES
        .iter()
        .copied()
        .find(|size| required <= size.bytes)
        .ok_or_else(|| {
            ConvertError::new(
                ErrorCode::ImageTooLarge,
                format!("final gb file is too large: {} bytes", required),
            )
            .with_hint(format!(
                "the largest supported cartridge holds {} bytes",
                MAX_ROM_SIZE
            ))
        })
}
