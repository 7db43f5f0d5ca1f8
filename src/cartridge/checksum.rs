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

//! Cartridge header checksums.
//!
//! See <https://gbdev.io/pandocs/The_Cartridge_Header.html>.

use super::{GLOBAL_CHECKSUM, HEADER_CHECKSUM, HEADER_CHECKSUM_RANGE};

/// Offsets skipped when summing the whole image.
///
/// This is 0x14F/0x150 rather than the documented 0x14E/0x14F. Existing
/// converted images carry checksums computed this way, and no hardware
/// verifies the value.
pub const GLOBAL_CHECKSUM_SKIP: [usize; 2] = [0x14F, 0x150];

/// Header checksum: `x = x - byte - 1` over every byte, starting at 0.
pub fn header_checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |cs, &b| cs.wrapping_sub(b).wrapping_sub(1))
}

/// Global checksum: 16-bit sum of every image byte except the skipped ones.
pub fn global_checksum(image: &[u8]) -> u16 {
    image
        .iter()
        .enumerate()
        .filter(|(i, _)| !GLOBAL_CHECKSUM_SKIP.contains(i))
        .fold(0u16, |cs, (_, &b)| cs.wrapping_add(b as u16))
}

/// Recompute the header checksum of a cartridge header and store it at 0x14D.
///
/// `rom` must cover at least the first 0x150 bytes.
pub fn write_header_checksum(rom: &mut [u8]) -> u8 {
    let checksum = header_checksum(&rom[HEADER_CHECKSUM_RANGE]);
    rom[HEADER_CHECKSUM] = checksum;
    checksum
}

/// Recompute the global checksum and store it big-endian at 0x14E.
pub fn write_global_checksum(image: &mut [u8]) -> u16 {
    let checksum = global_checksum(image);
    image[GLOBAL_CHECKSUM..GLOBAL_CHECKSUM + 2].copy_from_slice(&checksum.to_be_bytes());
    checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_checksum_of_zeros() {
        for n in [0usize, 1, 25, 255, 256, 300] {
            let bytes = vec![0u8; n];
            assert_eq!(header_checksum(&bytes) as usize, (256 - n % 256) % 256);
        }
    }

    #[test]
    fn test_header_checksum_known_value() {
        // "TETRIS" with old licensee 0x01 and version 0x01
        let mut header = [0u8; 0x19];
        header[..6].copy_from_slice(b"TETRIS");
        header[0x14B - 0x134] = 0x01;
        header[0x14C - 0x134] = 0x01;
        assert_eq!(header_checksum(&header), 0x0A);
    }

    #[test]
    fn test_global_checksum_ignores_skipped_offsets() {
        let mut image = vec![0u8; 0x200];
        image[0x10] = 0x12;
        image[0x14E] = 0x01;
        let base = global_checksum(&image);
        assert_eq!(base, 0x13);

        image[0x14F] = 0xFF;
        image[0x150] = 0xFF;
        assert_eq!(global_checksum(&image), base);
    }

    #[test]
    fn test_global_checksum_wraps() {
        let image = vec![0xFFu8; 0x8000];
        let expected = ((0x8000 - 2) * 0xFF) % 0x10000;
        assert_eq!(global_checksum(&image) as usize, expected);
    }

    #[test]
    fn test_write_global_checksum_big_endian() {
        let mut image = vec![0u8; 0x200];
        image[0x1FF] = 0xAB;
        image[0x1FE] = 0xCD;
        let checksum = write_global_checksum(&mut image);
        assert_eq!(checksum, 0x0178);
        assert_eq!(image[0x14E], 0x01);
        assert_eq!(image[0x14F], 0x78);
    }
}
