use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Error, Result};

/// A dotted numeric version, as reported by `git --version`.
///
/// Comparison is segment-wise numeric, never lexicographic: `2.9` is older
/// than `2.13`. A shorter version is padded with zero segments, so `2.13`
/// and `2.13.0` compare equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Version(Vec<u32>);

impl Version {
    pub fn new(segments: Vec<u32>) -> Version {
        Version(segments)
    }

    /// Extract a version from the full output of `git --version`, e.g.
    /// `git version 2.39.2` or `git version 2.37.1 (Apple Git-137.1)`.
    pub fn from_git_output(output: &str) -> Result<Version> {
        output
            .split_whitespace()
            .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(|| Error::VersionParse(output.trim().to_string()))?
            .parse()
    }

    pub fn is_older_than(&self, other: &Version) -> bool {
        let len = self.0.len().max(other.0.len());

        for i in 0..len {
            let mine = self.0.get(i).copied().unwrap_or(0);
            let theirs = other.0.get(i).copied().unwrap_or(0);
            if mine != theirs {
                return mine < theirs;
            }
        }

        false
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Version> {
        let segments = s
            .trim()
            .split('.')
            .map(|segment| segment.parse::<u32>())
            .collect::<std::result::Result<Vec<u32>, _>>()
            .map_err(|_| Error::VersionParse(s.to_string()))?;

        Ok(Version(segments))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let dotted = self
            .0
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<String>>()
            .join(".");
        write!(f, "{}", dotted)
    }
}
