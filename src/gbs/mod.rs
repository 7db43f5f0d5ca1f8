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

//! GBS music file support.
//!
//! A GBS file is a 0x70 byte header followed by Game Boy program code that
//! expects to run at the header's load address.

mod header;

pub use header::{
    parse_header, trim_header_text, validate_header, GbsHeader, GBS_IDENTIFIER, GBS_VERSION,
    HEADER_LENGTH, MIN_LOAD_ADDRESS,
};

/// Offsets of the individual header fields.
///
/// The relocation tables point the bootstrap player at these fields once the
/// whole file has been copied into the cartridge image.
pub mod field {
    pub const SONG_COUNT: u16 = 0x04;
    pub const FIRST_SONG: u16 = 0x05;
    pub const INIT_ADDRESS: u16 = 0x08;
    pub const PLAY_ADDRESS: u16 = 0x0A;
    pub const STACK_POINTER: u16 = 0x0C;
    pub const TIMER_MODULO: u16 = 0x0E;
    pub const TIMER_CONTROL: u16 = 0x0F;
    pub const TITLE: u16 = 0x10;
    pub const AUTHOR: u16 = 0x30;
    pub const COPYRIGHT: u16 = 0x50;
}
