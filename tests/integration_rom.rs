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

//! End-to-end tests for cartridge image assembly.

use gbs2gb::cartridge::{
    self, global_checksum, header_checksum, rom_size_for, HEADER_CHECKSUM_RANGE,
};
use gbs2gb::gbs::{self, HEADER_LENGTH};
use gbs2gb::patch;
use gbs2gb::player::{PlayerRom, PLAYER_LENGTH};
use gbs2gb::rom::{convert, FILL_BYTE};
use pretty_assertions::assert_eq;

/// A synthetic player with a recognizable byte pattern.
fn player_bytes() -> Vec<u8> {
    (0..PLAYER_LENGTH).map(|i| (i % 0x3F) as u8).collect()
}

fn player() -> PlayerRom {
    PlayerRom::from_bytes(&player_bytes()).unwrap()
}

fn gbs_file(load_address: u16, timer_control: u8, code_len: usize) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_LENGTH];
    data[0..3].copy_from_slice(b"GBS");
    data[0x03] = 1;
    data[0x04] = 1;
    data[0x05] = 1;
    data[0x06..0x08].copy_from_slice(&load_address.to_le_bytes());
    data[0x08..0x0A].copy_from_slice(&(load_address + 0x10).to_le_bytes());
    data[0x0A..0x0C].copy_from_slice(&(load_address + 0x20).to_le_bytes());
    data[0x0C..0x0E].copy_from_slice(&0xFFFEu16.to_le_bytes());
    data[0x0F] = timer_control;
    data[0x10..0x1A].copy_from_slice(b"Test Tunes");
    data[0x30..0x36].copy_from_slice(b"Nobody");
    data[0x50..0x54].copy_from_slice(b"2026");
    data.extend((0..code_len).map(|i| (i * 13 + 7) as u8));
    data
}

/// Player bytes as they should appear in the image, apart from the global
/// checksum which depends on the whole image.
fn expected_player(gbs: &[u8]) -> Vec<u8> {
    let header = gbs::validate_header(gbs).unwrap();
    let required = gbs.len() + header.load_address as usize - HEADER_LENGTH;
    let size = rom_size_for(required).unwrap();

    let mut expected = player_bytes();
    cartridge::write_header_fields(&mut expected, &header.title_bytes, &size);
    patch::apply_all(&mut expected, &header);
    expected
}

#[test]
fn test_image_length_follows_sizer() {
    for code_len in [0x10, 0x7B90, 0x7B91, 0x20000] {
        let gbs = gbs_file(0x0470, 0, code_len);
        let conversion = convert(&gbs, &player()).unwrap();
        let expected = rom_size_for(gbs.len() + 0x0470 - 0x70).unwrap();
        assert_eq!(conversion.image.len(), expected.bytes, "code length {:#X}", code_len);
    }
}

#[test]
fn test_player_region_is_patched_player() {
    let gbs = gbs_file(0x0470, 0, 0x200);
    let conversion = convert(&gbs, &player()).unwrap();
    let image = &conversion.image;

    let mut expected = expected_player(&gbs);
    expected[0x14E..0x150].copy_from_slice(&image[0x14E..0x150]);
    assert_eq!(&image[..PLAYER_LENGTH], &expected[..]);
}

#[test]
fn test_gbs_is_copied_unmodified() {
    for load_address in [0x0470u16, 0x0500, 0x3F00, 0x4000] {
        let gbs = gbs_file(load_address, 0, 0x300);
        let conversion = convert(&gbs, &player()).unwrap();
        let start = load_address as usize - HEADER_LENGTH;

        assert_eq!(&conversion.image[start..start + gbs.len()], &gbs[..]);
    }
}

#[test]
fn test_gap_between_player_and_gbs_is_filled() {
    let gbs = gbs_file(0x1000, 0, 0x40);
    let conversion = convert(&gbs, &player()).unwrap();

    assert!(conversion.image[PLAYER_LENGTH..0x1000 - HEADER_LENGTH]
        .iter()
        .all(|&b| b == FILL_BYTE));
}

#[test]
fn test_cartridge_header_fields() {
    let gbs = gbs_file(0x0470, 0, 0x8000);
    let conversion = convert(&gbs, &player()).unwrap();
    let image = &conversion.image;

    assert_eq!(&image[0x134..0x13E], b"Test Tunes");
    assert!(image[0x13E..0x143].iter().all(|&b| b == 0));
    assert_eq!(image[0x147], 1);
    assert_eq!(image[0x148], 1);
    assert_eq!(image[0x14D], header_checksum(&image[HEADER_CHECKSUM_RANGE]));
}

#[test]
fn test_global_checksum_is_taken_before_it_is_written() {
    let gbs = gbs_file(0x0470, 0, 0x100);
    let conversion = convert(&gbs, &player()).unwrap();

    // Restore the byte that was at 0x14E while the sum was taken.
    let mut before = conversion.image.clone();
    before[0x14E] = player_bytes()[0x14E];

    let stored = u16::from_be_bytes([conversion.image[0x14E], conversion.image[0x14F]]);
    assert_eq!(stored, global_checksum(&before));
    assert_eq!(stored, conversion.report.global_checksum);
}

#[test]
fn test_timer_interrupt_changes_only_vectors() {
    let plain = convert(&gbs_file(0x0470, 0x04, 0x100), &player()).unwrap();
    let timer = convert(&gbs_file(0x0470, 0x44, 0x100), &player()).unwrap();
    assert_eq!(plain.image.len(), timer.image.len());

    // The timer control byte itself and the global checksum differ too.
    let tac = 0x0470 - HEADER_LENGTH + 0x0F;
    let differing: Vec<usize> = (0..plain.image.len())
        .filter(|&i| plain.image[i] != timer.image[i])
        .filter(|&i| i != tac && i != 0x14E && i != 0x14F)
        .collect();

    assert_eq!(differing, vec![0x40, 0x50, 0x188, 0x1AA]);
    assert_eq!(timer.image[0x40], 0xC3);
    assert_eq!(timer.image[0x50], 0xC3);
    assert_eq!(timer.image[0x188], 0x05);
    assert_eq!(timer.image[0x1AA], 0x05);
}

#[test]
fn test_conversion_is_deterministic() {
    let gbs = gbs_file(0x2000, 0x44, 0x1234);
    let first = convert(&gbs, &player()).unwrap();
    let second = convert(&gbs, &player()).unwrap();
    assert_eq!(first.image, second.image);
    assert_eq!(first.report, second.report);
}

#[test]
fn test_real_world_shape() {
    // Load address and size of a typical first-generation rip.
    let gbs = gbs_file(0x3F00, 0x00, 0x1C000);
    let conversion = convert(&gbs, &player()).unwrap();
    let report = &conversion.report;

    assert_eq!(report.gbs_start, 0x3E90);
    assert_eq!(report.rom_size.bytes, 0x20000);
    assert_eq!(report.rom_size.code, 2);
    assert!(report.rom_size.uses_banking);
    assert_eq!(report.header.title(), "Test Tunes");
    assert_eq!(report.header.author(), "Nobody");
}
