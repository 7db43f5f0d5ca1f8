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

//! Bootstrap player ROM.
//!
//! The converter embeds a pre-built GBS player (GBSPlay 1.03, modified) at the
//! start of every cartridge. Only its first 0x400 bytes are used: interrupt
//! vectors, cartridge header and the player code at 0x150-0x3FF. The player is
//! opaque data here; [`crate::patch`] knows which bytes to rewrite.

use std::fs;
use std::path::PathBuf;

use crate::error::{ConvertError, ErrorCode, Result};

/// Number of player bytes copied into the image.
pub const PLAYER_LENGTH: usize = 0x400;

/// File name of the player ROM looked up when none is configured.
pub const DEFAULT_PLAYER_FILE: &str = "GBSPlay103_Mod.gb";

/// The first [`PLAYER_LENGTH`] bytes of a player ROM.
#[derive(Clone, PartialEq, Eq)]
pub struct PlayerRom {
    bytes: Vec<u8>,
}

impl PlayerRom {
    /// Take the player from a ROM dump. Extra bytes past 0x400 are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PLAYER_LENGTH {
            return Err(ConvertError::new(
                ErrorCode::InvalidPlayer,
                format!(
                    "player ROM is {} bytes long, at least {} bytes are required",
                    data.len(),
                    PLAYER_LENGTH
                ),
            ));
        }

        Ok(Self {
            bytes: data[..PLAYER_LENGTH].to_vec(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for PlayerRom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerRom")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Something that can hand out the bootstrap player.
pub trait PlayerSource {
    fn load(&self) -> Result<PlayerRom>;
}

impl PlayerSource for PlayerRom {
    fn load(&self) -> Result<PlayerRom> {
        Ok(self.clone())
    }
}

impl PlayerSource for Vec<u8> {
    fn load(&self) -> Result<PlayerRom> {
        PlayerRom::from_bytes(self)
    }
}

/// Player ROM read from disk.
#[derive(Debug, Clone)]
pub struct FilePlayer {
    path: PathBuf,
}

impl FilePlayer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlayerSource for FilePlayer {
    fn load(&self) -> Result<PlayerRom> {
        let data = fs::read(&self.path).map_err(|e| {
            ConvertError::io(&self.path, "read player ROM", e)
                .with_hint("point --player or GBS2GB_PLAYER at a GBSPlay ROM")
        })?;
        tracing::debug!(path = %self.path.display(), len = data.len(), "loaded player ROM");
        PlayerRom::from_bytes(&data).map_err(|e| e.with_hint(format!("player file {}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_player_rejected() {
        let err = PlayerRom::from_bytes(&[0u8; 0x3FF]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlayer);
    }

    #[test]
    fn test_player_is_truncated_to_bank_prefix() {
        let mut data = vec![0u8; 0x8000];
        data[0x3FF] = 0x11;
        data[0x400] = 0x22;
        let player = PlayerRom::from_bytes(&data).unwrap();
        assert_eq!(player.bytes().len(), PLAYER_LENGTH);
        assert_eq!(player.bytes()[0x3FF], 0x11);
    }

    #[test]
    fn test_vec_source() {
        let data = vec![0xAAu8; PLAYER_LENGTH];
        let player = data.load().unwrap();
        assert_eq!(player.bytes(), &data[..]);
    }

    #[test]
    fn test_file_player() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("player.gb");
        fs::write(&path, vec![0x31u8; 0x8000]).unwrap();

        let player = FilePlayer::new(&path).load().unwrap();
        assert!(player.bytes().iter().all(|&b| b == 0x31));
    }

    #[test]
    fn test_missing_file_player() {
        let err = FilePlayer::new("/nonexistent/player.gb").load().unwrap_err();
        assert_eq!(err.code, ErrorCode::Io);
    }
}
