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

//! Fuzz target for the complete conversion pipeline.
//!
//! The fuzzer picks a load address and timer control byte and appends
//! random code, so most inputs pass header validation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_convert
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_convert -- -max_total_time=60

#![no_main]

use arbitrary::Arbitrary;
use gbs2gb::gbs::HEADER_LENGTH;
use gbs2gb::player::{PlayerRom, PLAYER_LENGTH};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    load_address: u16,
    timer_control: u8,
    code: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut gbs = vec![0u8; HEADER_LENGTH];
    gbs[0..3].copy_from_slice(b"GBS");
    gbs[0x03] = 1;
    gbs[0x06..0x08].copy_from_slice(&input.load_address.to_le_bytes());
    gbs[0x0F] = input.timer_control;
    gbs.extend_from_slice(&input.code);

    let player = PlayerRom::from_bytes(&[0u8; PLAYER_LENGTH]).unwrap();

    // Should never panic, only return Ok or Err
    if let Ok(conversion) = gbs2gb::convert(&gbs, &player) {
        let start = input.load_address as usize - HEADER_LENGTH;
        assert_eq!(&conversion.image[start..start + gbs.len()], &gbs[..]);
    }
});
