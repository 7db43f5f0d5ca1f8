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

//! Error types for the gbs2gb converter.
//!
//! Every failure a conversion can hit is reported as a [`ConvertError`]
//! tagged with an [`ErrorCode`]. Header and sizing errors are detected
//! before any output buffer is allocated.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Error codes for the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Header errors (E001-E010)
    InvalidHeader,
    TruncatedHeader,
    IncompatibleLoadAddress,

    // Sizing errors (E020)
    ImageTooLarge,

    // Bootstrap player errors (E030)
    InvalidPlayer,

    // Boundary errors (E100)
    Io,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidHeader => "E001",
            ErrorCode::TruncatedHeader => "E002",
            ErrorCode::IncompatibleLoadAddress => "E010",
            ErrorCode::ImageTooLarge => "E020",
            ErrorCode::InvalidPlayer => "E030",
            ErrorCode::Io => "E100",
        }
    }
}

/// A conversion error.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct ConvertError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
    /// Underlying I/O error, if any.
    #[source]
    pub source: Option<io::Error>,
}

impl ConvertError {
    /// Create a new conversion error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
            source: None,
        }
    }

    /// Wrap an I/O error that happened while touching `path`.
    pub fn io(path: &Path, action: &str, source: io::Error) -> Self {
        Self {
            code: ErrorCode::Io,
            message: format!("cannot {} {}: {}", action, path.display(), source),
            hint: None,
            source: Some(source),
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Format an error for terminal output.
pub fn format_error(error: &ConvertError, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));
    output.push_str(&format!("  --> {}\n", filename));

    if let Some(hint) = &error.hint {
        output.push_str(&format!("   = hint: {}\n", hint));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_code() {
        assert_eq!(ErrorCode::InvalidHeader.code(), "E001");
        assert_eq!(ErrorCode::IncompatibleLoadAddress.code(), "E010");
        assert_eq!(ErrorCode::ImageTooLarge.code(), "E020");
        assert_eq!(ErrorCode::Io.code(), "E100");
    }

    #[test]
    fn test_convert_error_display() {
        let error = ConvertError::new(ErrorCode::ImageTooLarge, "too big");
        assert_eq!(error.to_string(), "[E020] too big");
        assert!(error.hint.is_none());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = ConvertError::io(
            Path::new("missing.gbs"),
            "read",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(error.code, ErrorCode::Io);
        assert!(error.message.contains("missing.gbs"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_format_error_with_hint() {
        let error = ConvertError::new(ErrorCode::IncompatibleLoadAddress, "load address 0x0400")
            .with_hint("GBS code must load at 0x0470 or above");
        let text = format_error(&error, Some("song.gbs"));

        assert!(text.starts_with("error[E010]: load address 0x0400\n"));
        assert!(text.contains("  --> song.gbs\n"));
        assert!(text.contains("= hint: GBS code must load at 0x0470 or above"));
    }
}
