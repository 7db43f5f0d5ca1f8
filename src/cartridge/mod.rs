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

//! Game Boy cartridge header layout.
//!
//! The header lives at 0x100-0x14F of bank 0. Only the fields the
//! converter touches are named here.

pub mod checksum;
pub mod size;

pub use checksum::{
    global_checksum, header_checksum, write_global_checksum, write_header_checksum,
};
pub use size::{rom_size_for, RomSize, MAX_ROM_SIZE, ROM_SIZES};

use std::ops::Range;

/// Title field. Old-style headers use 16 bytes, the converter writes 15.
pub const TITLE: usize = 0x134;

/// Number of title bytes the converter writes.
pub const TITLE_LENGTH: usize = 15;

/// Cartridge type byte.
pub const CARTRIDGE_TYPE: usize = 0x147;

/// ROM size code byte.
pub const ROM_SIZE: usize = 0x148;

/// Header checksum byte.
pub const HEADER_CHECKSUM: usize = 0x14D;

/// Global checksum (big-endian word).
pub const GLOBAL_CHECKSUM: usize = 0x14E;

/// Bytes covered by the header checksum.
pub const HEADER_CHECKSUM_RANGE: Range<usize> = 0x134..0x14D;

/// First byte after the cartridge header.
pub const HEADER_END: usize = 0x150;

/// Header fields read back from a cartridge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomInfo {
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl RomInfo {
    /// Read the header of a cartridge image. Returns `None` for images
    /// too short to hold a header.
    pub fn read(image: &[u8]) -> Option<Self> {
        if image.len() < HEADER_END {
            return None;
        }

        let title = String::from_utf8_lossy(&image[TITLE..TITLE + TITLE_LENGTH])
            .trim_matches('\0')
            .trim()
            .to_string();

        Some(Self {
            title,
            cartridge_type: image[CARTRIDGE_TYPE],
            rom_size_code: image[ROM_SIZE],
            header_checksum: image[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([
                image[GLOBAL_CHECKSUM],
                image[GLOBAL_CHECKSUM + 1],
            ]),
        })
    }
}

/// Check the header checksum stored in a cartridge image.
///
/// The global checksum is not checked here: it is computed before its own
/// high byte at 0x14E is overwritten, so it cannot be recomputed from the
/// finished image.
pub fn verify_header_checksum(image: &[u8]) -> Option<bool> {
    let info = RomInfo::read(image)?;
    Some(header_checksum(&image[HEADER_CHECKSUM_RANGE]) == info.header_checksum)
}

/// Write title, cartridge type and size code into a cartridge header and
/// refresh its header checksum.
///
/// `title` is copied up to [`TITLE_LENGTH`] bytes; shorter titles leave the
/// remaining bytes untouched.
pub fn write_header_fields(rom: &mut [u8], title: &[u8], size: &RomSize) -> u8 {
    let count = title.len().min(TITLE_LENGTH);
    rom[TITLE..TITLE + count].copy_from_slice(&title[..count]);
    rom[CARTRIDGE_TYPE] = size.cartridge_type();
    rom[ROM_SIZE] = size.code;
    write_header_checksum(rom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_header_fields() {
        let mut rom = vec![0u8; 0x400];
        let size = rom_size_for(0x10000).unwrap();
        let checksum = write_header_fields(&mut rom, b"POKEMON RED MUSIC AND MORE", &size);

        assert_eq!(&rom[TITLE..TITLE + 15], b"POKEMON RED MUS");
        assert_eq!(rom[TITLE + 15], 0);
        assert_eq!(rom[CARTRIDGE_TYPE], 0x01);
        assert_eq!(rom[ROM_SIZE], 0x01);
        assert_eq!(rom[HEADER_CHECKSUM], checksum);
        assert_eq!(checksum, header_checksum(&rom[HEADER_CHECKSUM_RANGE]));
    }

    #[test]
    fn test_rom_info_roundtrip() {
        let mut rom = vec![0xFFu8; 0x8000];
        rom[TITLE..TITLE + 16].fill(0);
        let size = rom_size_for(0x8000).unwrap();
        write_header_fields(&mut rom, b"DEMO", &size);
        let global = write_global_checksum(&mut rom);

        let info = RomInfo::read(&rom).unwrap();
        assert_eq!(info.title, "DEMO");
        assert_eq!(info.cartridge_type, 0);
        assert_eq!(info.rom_size_code, 0);
        assert_eq!(info.global_checksum, global);
    }

    #[test]
    fn test_verify_header_checksum() {
        let mut rom = vec![0u8; 0x8000];
        write_header_checksum(&mut rom);
        assert_eq!(verify_header_checksum(&rom), Some(true));

        rom[TITLE] = b'X';
        assert_eq!(verify_header_checksum(&rom), Some(false));
    }

    #[test]
    fn test_short_image_has_no_header() {
        assert!(RomInfo::read(&[0u8; 0x100]).is_none());
        assert!(verify_header_checksum(&[0u8; 0x100]).is_none());
    }
}
