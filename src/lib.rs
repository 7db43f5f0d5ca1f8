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

//! gbs2gb Library
//!
//! Turns GBS music rips into Game Boy cartridge images that play on real
//! hardware. A pre-built player ROM is placed at the start of the cartridge,
//! the GBS file is copied to its load address, and the player's address
//! references are rewritten to point at it.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`gbs`] - GBS header parsing and validation
//! - [`cartridge`] - Cartridge header layout, sizes and checksums
//! - [`patch`] - Relocation tables for the embedded player
//! - [`player`] - Loading the bootstrap player ROM
//! - [`rom`] - Cartridge image assembly
//! - [`output`] - Output paths and image writing
//!
//! # Example
//!
//! ```no_run
//! use gbs2gb::player::{FilePlayer, PlayerSource};
//! use std::path::Path;
//!
//! fn run() -> gbs2gb::Result<()> {
//!     let player = FilePlayer::new("GBSPlay103_Mod.gb").load()?;
//!     let converted = gbs2gb::convert_file(Path::new("song.gbs"), Path::new("out"), &player)?;
//!     println!("wrote {}", converted.output.display());
//!     Ok(())
//! }
//! ```

pub mod cartridge;
pub mod error;
pub mod gbs;
pub mod output;
pub mod patch;
pub mod player;
pub mod rom;

// Re-export commonly used types
pub use error::{format_error, ConvertError, ErrorCode, Result};
pub use gbs::GbsHeader;
pub use player::{PlayerRom, PlayerSource};
pub use rom::{convert, Conversion, ConversionReport};

use std::fs;
use std::path::{Path, PathBuf};

/// The version of gbs2gb.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "gbs2gb";

/// A GBS file converted and written to disk.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: ConversionReport,
}

/// Read `input`, convert it and write the image into `out_dir`.
///
/// The output file is only created once the image is complete.
pub fn convert_file(input: &Path, out_dir: &Path, player: &PlayerRom) -> Result<ConvertedFile> {
    let gbs = fs::read(input).map_err(|e| ConvertError::io(input, "read", e))?;

    let conversion = convert(&gbs, player)?;

    let output_path = output::output_path_for(input, out_dir);
    output::write_rom(&conversion.image, &output_path)
        .map_err(|e| ConvertError::io(&output_path, "write", e))?;

    tracing::info!(
        "gb image written: {} ({} bytes)",
        output_path.display(),
        conversion.image.len()
    );

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output_path,
        report: conversion.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "gbs2gb");
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let player = PlayerRom::from_bytes(&[0u8; player::PLAYER_LENGTH]).unwrap();

        let err = convert_file(&dir.path().join("nope.gbs"), dir.path(), &player).unwrap_err();
        assert_eq!(err.code, ErrorCode::Io);
        assert!(!dir.path().join("nope.gb").exists());
    }
}
