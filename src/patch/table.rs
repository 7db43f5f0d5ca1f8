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

//! Relocation tables for the GBSPlay 1.03 player.
//!
//! Every entry names a spot inside the first 0x400 bytes of the image and
//! what to store there. Word entries are little-endian Game Boy addresses.
//! No two entries touch the same byte.

use super::{Condition, Region, Rule, Target};
use crate::gbs::{field, HEADER_LENGTH};

/// Start of the player code, jumped to from the entry point at 0x100.
pub const PLAYER_CODE: usize = 0x150;

/// Player code that reads GBS header fields starts 7 bytes in.
const FIELD_BASE: usize = PLAYER_CODE + 0x07;

/// The player revision used here is 4 bytes longer than the one the
/// original offsets were taken from.
const REVISION_SHIFT: usize = 4;

/// GBS code begins right after the relocated header.
const CODE: u16 = HEADER_LENGTH as u16;

const fn relocated(offset: usize, delta: u16) -> Rule {
    Rule::Word {
        offset,
        target: Target::Relocated(delta),
    }
}

const fn player(offset: usize, address: usize) -> Rule {
    Rule::Word {
        offset,
        target: Target::Player(address as u16),
    }
}

const fn bytes(offset: usize, data: &'static [u8]) -> Rule {
    Rule::Bytes { offset, data }
}

/// `JP nnnn` operands of the RST vectors 0x00-0x38.
///
/// Each vector jumps to the matching 8-byte slot at the start of the GBS code.
pub const RST_VECTORS: Region = Region {
    name: "rst",
    condition: Condition::Always,
    rules: &[
        relocated(0x01, CODE),
        relocated(0x09, CODE + 0x08),
        relocated(0x11, CODE + 0x10),
        relocated(0x19, CODE + 0x18),
        relocated(0x21, CODE + 0x20),
        relocated(0x29, CODE + 0x28),
        relocated(0x31, CODE + 0x30),
        relocated(0x39, CODE + 0x38),
    ],
};

/// Pointers to the 16-byte halves of title, author and copyright, stored
/// in the gaps between the RST vectors.
pub const TEXT_POINTERS: Region = Region {
    name: "text",
    condition: Condition::Always,
    rules: &[
        relocated(0x0C, field::TITLE),
        relocated(0x14, field::TITLE + 0x10),
        relocated(0x1C, field::AUTHOR),
        relocated(0x24, field::AUTHOR + 0x10),
        relocated(0x2C, field::COPYRIGHT),
        relocated(0x34, field::COPYRIGHT + 0x10),
    ],
};

/// Operands of player instructions that load GBS header fields.
pub const FIELD_POINTERS: Region = Region {
    name: "field",
    condition: Condition::Always,
    rules: &[
        relocated(FIELD_BASE, field::STACK_POINTER),
        relocated(FIELD_BASE + 0x21, field::SONG_COUNT),
        relocated(FIELD_BASE + 0x2A, field::TIMER_CONTROL),
        relocated(FIELD_BASE + 0x39, field::TIMER_CONTROL),
        relocated(FIELD_BASE + 0x44, field::TIMER_MODULO),
        relocated(FIELD_BASE + 0x58, field::FIRST_SONG),
        relocated(FIELD_BASE + 0x72, field::TIMER_CONTROL),
    ],
};

/// Operands used when starting songs and calling the play routine.
pub const ENTRY_POINTERS: Region = Region {
    name: "entry",
    condition: Condition::Always,
    rules: &[
        relocated(PLAYER_CODE + 0x99, field::PLAY_ADDRESS),
        relocated(PLAYER_CODE + 0xB8, field::SONG_COUNT),
        relocated(PLAYER_CODE + 0xC7, field::SONG_COUNT),
        relocated(PLAYER_CODE + 0x104, field::INIT_ADDRESS),
    ],
};

/// Fixed code fixes inside the player.
pub const PLAYER_FIXES: Region = Region {
    name: "fix",
    condition: Condition::Always,
    rules: &[
        // EI; HALT
        bytes(PLAYER_CODE + 0x92, &[0xFB, 0x76]),
        // song number compare was off by one
        bytes(PLAYER_CODE + 0x65, &[0x64]),
    ],
};

/// Targets of the player's "is the GBS code valid" check, reached through
/// the VBlank and timer vectors.
pub const VALIDITY_CHECK: Region = Region {
    name: "check",
    condition: Condition::Always,
    rules: &[
        relocated(0x41, CODE + 0x40),
        relocated(0x51, CODE + 0x48),
    ],
};

/// Jump targets inside the 0x150-0x400 player code.
pub const PLAYER_JUMPS: Region = Region {
    name: "jump",
    condition: Condition::Always,
    rules: &[
        // FE11 'CC????' 11???? 210082
        player(0x9D + REVISION_SHIFT, PLAYER_CODE + 0x66),
        // FE11 CC???? '11????' 210082
        player(0xA0 + REVISION_SHIFT, PLAYER_CODE + 0x10B + 1),
        // entry point JP
        player(0x102, PLAYER_CODE),
        player(PLAYER_CODE + 0x95, PLAYER_CODE + 0x9E + 1),
        player(PLAYER_CODE + 0x100, PLAYER_CODE + 0x92),
    ],
};

/// Route the VBlank and timer vectors through `JP` when the GBS code drives
/// its own timer interrupt.
pub const TIMER_INTERRUPT: Region = Region {
    name: "timer",
    condition: Condition::TimerInterrupt,
    rules: &[
        bytes(0x40, &[0xC3]),
        bytes(0x50, &[0xC3]),
        bytes(PLAYER_CODE + 0x38, &[0x05]),
        bytes(PLAYER_CODE + 0x5A, &[0x05]),
    ],
};

/// All regions in the order they are applied.
pub const REGIONS: &[Region] = &[
    RST_VECTORS,
    TEXT_POINTERS,
    FIELD_POINTERS,
    ENTRY_POINTERS,
    PLAYER_FIXES,
    VALIDITY_CHECK,
    PLAYER_JUMPS,
    TIMER_INTERRUPT,
];
