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

//! Output handling for converted cartridge images.
//!
//! An image is written to a temporary file next to its destination and only
//! renamed into place once every byte is on disk, so a failed conversion
//! never leaves a file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File extension of Game Boy cartridge images.
pub const ROM_EXTENSION: &str = "gb";

/// File extension of GBS music files.
pub const GBS_EXTENSION: &str = "gbs";

/// Check whether a path looks like a GBS file.
pub fn is_gbs_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GBS_EXTENSION))
}

/// Output path for `input` inside `out_dir`: the input file name with its
/// extension replaced by `.gb`.
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".");
    name.push(ROM_EXTENSION);

    out_dir.join(name)
}

/// Write a cartridge image.
///
/// Either the complete image ends up at `path` or nothing does. The
/// temporary file is removed when writing or renaming fails.
pub fn write_rom(image: &[u8], path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(image)?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read a cartridge image back.
pub fn read_rom(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}
