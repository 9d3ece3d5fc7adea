use std::str::FromStr;

use crate::{Error, Result};

/// Size of one part file, in bytes.
///
/// Parsed from a decimal byte count with an optional binary-unit suffix:
/// `512`, `64k`, `100m`, `2G`, `1t`. Suffixes are powers of 1024 and
/// case-insensitive. The size must be at least one byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkSize(u64);

impl ChunkSize {
    pub fn new(bytes: u64) -> Result<ChunkSize> {
        if bytes == 0 {
            return Err(Error::InvalidConfiguration(
                "chunk size must be at least one byte".to_string(),
            ));
        }

        Ok(ChunkSize(bytes))
    }

    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl Default for ChunkSize {
    /// The default part size, 2 GiB.
    fn default() -> ChunkSize {
        ChunkSize(2 * 1024 * 1024 * 1024)
    }
}

impl FromStr for ChunkSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<ChunkSize> {
        let invalid = || Error::InvalidConfiguration(format!("`{}` is not a valid chunk size", s));

        let trimmed = s.trim();
        let last = trimmed.chars().last().ok_or_else(invalid)?;

        let (digits, multiplier) = if last.is_ascii_digit() {
            (trimmed, 1)
        } else {
            let multiplier: u64 = match last.to_ascii_lowercase() {
                'k' => 1024,
                'm' => 1024 * 1024,
                'g' => 1024 * 1024 * 1024,
                't' => 1024 * 1024 * 1024 * 1024,
                _ => return Err(invalid()),
            };
            (&trimmed[..trimmed.len() - 1], multiplier)
        };

        let count: u64 = digits.parse().map_err(|_| invalid())?;
        let bytes = count.checked_mul(multiplier).ok_or_else(invalid)?;

        ChunkSize::new(bytes)
    }
}
