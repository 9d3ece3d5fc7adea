use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::chunk::part::{is_part_file_name, PART_SUFFIX};
use crate::{Error, Result};

/// Parameters for one join operation.
#[derive(Clone, Debug)]
pub struct JoinOptions {
    /// Logical name of the part set.
    pub prefix: String,
    /// Directory to search: parts are expected under `<in_dir>/<prefix>/`,
    /// or directly in `in_dir` when no such subdirectory exists.
    pub in_dir: PathBuf,
    /// Where to write the rebuilt image.
    pub output: PathBuf,
}

impl JoinOptions {
    /// Options for rebuilding part set `prefix` from the current directory
    /// into `<prefix>.sif`.
    pub fn new(prefix: &str) -> JoinOptions {
        JoinOptions {
            prefix: prefix.to_string(),
            in_dir: PathBuf::from("."),
            output: PathBuf::from(format!("{}{}", prefix, PART_SUFFIX)),
        }
    }
}

/// Outcome of a successful join.
#[derive(Debug)]
pub struct JoinReport {
    /// The rebuilt image.
    pub output: PathBuf,
    /// How many part files were concatenated.
    pub parts: u64,
    /// Total bytes written.
    pub bytes: u64,
}

/// Concatenate the part files of `options.prefix` into `options.output`,
/// creating or truncating it.
///
/// Parts are taken in lexicographic name order, which equals numeric index
/// order because indices within one part set share a fixed zero-padded width.
pub fn join(options: &JoinOptions) -> Result<JoinReport> {
    let search_dir = {
        let nested = options.in_dir.join(&options.prefix);
        if nested.is_dir() {
            nested
        } else {
            options.in_dir.clone()
        }
    };

    let no_parts = || Error::NoPartsFound {
        prefix: options.prefix.clone(),
        dir: search_dir.clone(),
    };

    if !search_dir.is_dir() {
        return Err(no_parts());
    }

    let mut parts: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&search_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_part = name
            .to_str()
            .map_or(false, |n| is_part_file_name(&options.prefix, n));
        if is_part && entry.path().is_file() {
            parts.push(entry.path());
        }
    }

    // The output file is only created once we know there is something to join.
    if parts.is_empty() {
        return Err(no_parts());
    }

    parts.sort();
    debug!(
        "joining {} part(s) from {} into {}",
        parts.len(),
        search_dir.display(),
        options.output.display()
    );

    // TODO: reject gapped index sequences instead of concatenating past them;
    // today parts 1,2,4 silently yield a corrupted image.
    let mut out = File::create(&options.output)?;
    let mut bytes = 0u64;
    for part in &parts {
        let mut file = File::open(part)?;
        bytes += io::copy(&mut file, &mut out)?;
    }

    info!(
        "wrote {} ({} bytes from {} part(s))",
        options.output.display(),
        bytes,
        parts.len()
    );

    Ok(JoinReport {
        output: options.output.clone(),
        parts: parts.len() as u64,
        bytes,
    })
}
