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

//! GBS header parsing and validation.
//!
//! Layout (little-endian):
//!
//! | Offset | Size | Field           |
//! |--------|------|-----------------|
//! | 0x00   | 3    | Identifier "GBS"|
//! | 0x03   | 1    | Version (1)     |
//! | 0x04   | 1    | Number of songs |
//! | 0x05   | 1    | First song      |
//! | 0x06   | 2    | Load address    |
//! | 0x08   | 2    | Init address    |
//! | 0x0A   | 2    | Play address    |
//! | 0x0C   | 2    | Stack pointer   |
//! | 0x0E   | 1    | Timer modulo    |
//! | 0x0F   | 1    | Timer control   |
//! | 0x10   | 32   | Title           |
//! | 0x30   | 32   | Author          |
//! | 0x50   | 32   | Copyright       |

use crate::error::{ConvertError, ErrorCode, Result};

/// Length of the GBS header in bytes.
pub const HEADER_LENGTH: usize = 0x70;

/// Magic identifier at the start of every GBS file.
pub const GBS_IDENTIFIER: &[u8; 3] = b"GBS";

/// The only GBS version the converter understands.
pub const GBS_VERSION: u8 = 1;

/// Lowest accepted load address.
///
/// Everything below belongs to the bootstrap player: interrupt vectors,
/// cartridge header and the player code itself.
pub const MIN_LOAD_ADDRESS: u16 = 0x0470;

const TEXT_LENGTH: usize = 32;

/// A parsed GBS header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GbsHeader {
    pub identifier: [u8; 3],
    pub version: u8,
    pub song_count: u8,
    pub first_song: u8,
    pub load_address: u16,
    pub init_address: u16,
    pub play_address: u16,
    pub stack_pointer: u16,
    pub timer_modulo: u8,
    pub timer_control: u8,
    pub title_bytes: [u8; TEXT_LENGTH],
    pub author_bytes: [u8; TEXT_LENGTH],
    pub copyright_bytes: [u8; TEXT_LENGTH],
}

impl GbsHeader {
    /// Decode the fixed header layout without checking magic or version.
    ///
    /// `data` must hold at least [`HEADER_LENGTH`] bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LENGTH {
            return Err(ConvertError::new(
                ErrorCode::TruncatedHeader,
                format!(
                    "file is {} bytes long, a GBS header needs {} bytes",
                    data.len(),
                    HEADER_LENGTH
                ),
            ));
        }

        let word = |offset: usize| u16::from_le_bytes([data[offset], data[offset + 1]]);
        let text = |offset: usize| {
            let mut bytes = [0u8; TEXT_LENGTH];
            bytes.copy_from_slice(&data[offset..offset + TEXT_LENGTH]);
            bytes
        };

        Ok(Self {
            identifier: [data[0], data[1], data[2]],
            version: data[0x03],
            song_count: data[0x04],
            first_song: data[0x05],
            load_address: word(0x06),
            init_address: word(0x08),
            play_address: word(0x0A),
            stack_pointer: word(0x0C),
            timer_modulo: data[0x0E],
            timer_control: data[0x0F],
            title_bytes: text(0x10),
            author_bytes: text(0x30),
            copyright_bytes: text(0x50),
        })
    }

    /// Encode the header back into its 0x70 byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut data = [0u8; HEADER_LENGTH];

        data[0..3].copy_from_slice(&self.identifier);
        data[0x03] = self.version;
        data[0x04] = self.song_count;
        data[0x05] = self.first_song;
        data[0x06..0x08].copy_from_slice(&self.load_address.to_le_bytes());
        data[0x08..0x0A].copy_from_slice(&self.init_address.to_le_bytes());
        data[0x0A..0x0C].copy_from_slice(&self.play_address.to_le_bytes());
        data[0x0C..0x0E].copy_from_slice(&self.stack_pointer.to_le_bytes());
        data[0x0E] = self.timer_modulo;
        data[0x0F] = self.timer_control;
        data[0x10..0x30].copy_from_slice(&self.title_bytes);
        data[0x30..0x50].copy_from_slice(&self.author_bytes);
        data[0x50..0x70].copy_from_slice(&self.copyright_bytes);

        data
    }

    pub fn identifier(&self) -> String {
        trim_header_text(&self.identifier)
    }

    pub fn title(&self) -> String {
        trim_header_text(&self.title_bytes)
    }

    pub fn author(&self) -> String {
        trim_header_text(&self.author_bytes)
    }

    pub fn copyright(&self) -> String {
        trim_header_text(&self.copyright_bytes)
    }

    /// Offset inside the cartridge image where the GBS file (header included)
    /// has to start so its code lands on the load address.
    pub fn relocation_base(&self) -> usize {
        (self.load_address as usize).saturating_sub(HEADER_LENGTH)
    }

    /// Whether the music code wants the timer interrupt routed to itself.
    pub fn uses_timer_interrupt(&self) -> bool {
        self.timer_control & 0x40 != 0
    }
}

/// Trim a padded header text field.
///
/// NUL bytes are stripped from both ends first, then surrounding whitespace.
/// NULs inside the text are kept.
pub fn trim_header_text(bytes: &[u8]) -> String {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| b != 0).map_or(start, |i| i + 1);

    String::from_utf8_lossy(&bytes[start..end]).trim().to_string()
}

/// Parse a GBS header, checking identifier and version.
pub fn parse_header(data: &[u8]) -> Result<GbsHeader> {
    let header = GbsHeader::from_bytes(data)?;

    if &header.identifier != GBS_IDENTIFIER || header.version != GBS_VERSION {
        return Err(ConvertError::new(
            ErrorCode::InvalidHeader,
            "file does not have a valid GBS header",
        )
        .with_hint(format!(
            "expected identifier \"GBS\" and version {}, found {:?} version {}",
            GBS_VERSION,
            header.identifier(),
            header.version
        )));
    }

    Ok(header)
}

/// Parse a GBS header and check that it can be turned into a cartridge.
pub fn validate_header(data: &[u8]) -> Result<GbsHeader> {
    let header = parse_header(data)?;

    if header.load_address < MIN_LOAD_ADDRESS {
        return Err(ConvertError::new(
            ErrorCode::IncompatibleLoadAddress,
            format!("incompatible load address 0x{:04X}", header.load_address),
        )
        .with_hint(format!(
            "the bootstrap player occupies everything below 0x{:04X}",
            MIN_LOAD_ADDRESS
        )));
    }

    Ok(header)
}
