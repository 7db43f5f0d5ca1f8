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

//! Cartridge image assembly.
//!
//! Conversion runs in fixed steps over one image buffer:
//!
//! 1. validate the GBS header
//! 2. pick the cartridge size
//! 3. allocate the image, filled with 0xFF
//! 4. copy the player (with its header title, type, size and checksum updated)
//! 5. copy the whole GBS file so its code lands on the load address
//! 6. apply the relocation patches
//! 7. write the global checksum
//!
//! Nothing is allocated if steps 1 or 2 fail.

use crate::cartridge::{self, RomSize};
use crate::error::Result;
use crate::gbs::{self, GbsHeader, HEADER_LENGTH};
use crate::patch;
use crate::player::{PlayerRom, PLAYER_LENGTH};

/// Value of unprogrammed ROM bytes.
pub const FILL_BYTE: u8 = 0xFF;

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub header: GbsHeader,
    pub rom_size: RomSize,
    /// Bytes needed before rounding up to a cartridge size.
    pub required_length: usize,
    /// Image offset the GBS file was copied to.
    pub gbs_start: usize,
    pub patches_applied: usize,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

/// A finished cartridge image together with its report.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub image: Vec<u8>,
    pub report: ConversionReport,
}

/// Image length needed for a GBS file: the header is dropped and the code is
/// placed at its load address.
pub fn required_length(gbs_len: usize, header: &GbsHeader) -> usize {
    (gbs_len + header.load_address as usize).saturating_sub(HEADER_LENGTH)
}

/// Builds one cartridge image.
pub struct RomBuilder {
    header: GbsHeader,
    rom_size: RomSize,
    required_length: usize,
    data: Vec<u8>,
    header_checksum: u8,
    patches_applied: usize,
}

impl RomBuilder {
    /// Validate `gbs` and allocate an image large enough for it.
    pub fn new(gbs: &[u8]) -> Result<Self> {
        let header = gbs::validate_header(gbs)?;

        tracing::info!("Title:        {}", header.title());
        tracing::info!("Author:       {}", header.author());
        tracing::info!("Copyright:    {}", header.copyright());
        tracing::info!("Load Address: 0x{:04X}", header.load_address);

        let required_length = required_length(gbs.len(), &header);
        let rom_size = cartridge::rom_size_for(required_length)?;

        tracing::info!(
            "CartridgeType/ROMSize: {}/{} ({} bytes)",
            rom_size.cartridge_type(),
            rom_size.code,
            rom_size.bytes
        );

        Ok(Self {
            header,
            rom_size,
            required_length,
            data: vec![FILL_BYTE; rom_size.bytes],
            header_checksum: 0,
            patches_applied: 0,
        })
    }

    pub fn rom_size(&self) -> RomSize {
        self.rom_size
    }

    /// Get the image data built so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy the player into the first 0x400 bytes after stamping the GBS
    /// title, cartridge type and size into its cartridge header.
    pub fn embed_player(&mut self, player: &PlayerRom) -> &mut Self {
        let mut code = player.bytes().to_vec();
        self.header_checksum = cartridge::write_header_fields(
            &mut code,
            &self.header.title_bytes,
            &self.rom_size,
        );
        self.data[..PLAYER_LENGTH].copy_from_slice(&code);

        tracing::debug!(
            "player inserted: {} bytes, header checksum 0x{:02X}",
            PLAYER_LENGTH,
            self.header_checksum
        );
        self
    }

    /// Copy the complete GBS file, header included, to the relocation base.
    pub fn embed_gbs(&mut self, gbs: &[u8]) -> &mut Self {
        let start = self.header.relocation_base();
        self.data[start..start + gbs.len()].copy_from_slice(gbs);

        tracing::debug!("gbs file inserted: {} bytes at 0x{:04X}", gbs.len(), start);
        self
    }

    /// Apply the relocation patches to the player.
    pub fn apply_patches(&mut self) -> &mut Self {
        self.patches_applied = patch::apply_all(&mut self.data, &self.header);
        self
    }

    /// Write the global checksum and hand out the finished image.
    pub fn finish(mut self) -> Conversion {
        let global_checksum = cartridge::write_global_checksum(&mut self.data);
        tracing::debug!("global checksum 0x{:04X}", global_checksum);

        let report = ConversionReport {
            gbs_start: self.header.relocation_base(),
            header: self.header,
            rom_size: self.rom_size,
            required_length: self.required_length,
            patches_applied: self.patches_applied,
            header_checksum: self.header_checksum,
            global_checksum,
        };

        Conversion {
            image: self.data,
            report,
        }
    }
}

/// Convert a GBS file into a cartridge image.
pub fn convert(gbs: &[u8], player: &PlayerRom) -> Result<Conversion> {
    let mut builder = RomBuilder::new(gbs)?;
    builder.embed_player(player).embed_gbs(gbs).apply_patches();
    Ok(builder.finish())
}
