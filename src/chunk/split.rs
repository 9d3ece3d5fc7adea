use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::chunk::part::{is_part_file_name, part_file_name, PART_SUFFIX};
use crate::chunk::ChunkSize;
use crate::{Error, Result};

/// Parameters for one split operation.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// The image file to split.
    pub input: PathBuf,
    /// Logical name of the part set; also the name of the part directory.
    pub prefix: String,
    /// Directory under which the part directory is created.
    pub out_dir: PathBuf,
    pub chunk_size: ChunkSize,
    /// Zero-padded width of the part index.
    pub digits: usize,
    /// Index given to the first part.
    pub start_index: u32,
}

impl SplitOptions {
    /// Options for splitting `input` as part set `prefix`, with all other
    /// fields at their defaults (current directory, 2 GiB parts, five-digit
    /// indices starting at 1).
    pub fn new<P: AsRef<Path>>(input: P, prefix: &str) -> SplitOptions {
        SplitOptions {
            input: input.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            out_dir: PathBuf::from("."),
            chunk_size: ChunkSize::default(),
            digits: 5,
            start_index: 1,
        }
    }

    fn part_dir(&self) -> PathBuf {
        self.out_dir.join(&self.prefix)
    }

    fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::InvalidConfiguration(
                "prefix must not be empty".to_string(),
            ));
        }

        if self.digits == 0 {
            return Err(Error::InvalidConfiguration(
                "digit width must be at least 1".to_string(),
            ));
        }

        // Input problems must surface before any output is created.
        match fs::metadata(&self.input) {
            Ok(meta) if meta.is_file() => Ok(()),
            _ => Err(Error::InputNotFound(self.input.clone())),
        }
    }
}

/// Which chunking implementation writes the part files.
///
/// Both engines produce byte-identical part sets for the same options.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Engine {
    /// GNU `split(1)` from coreutils.
    System,
    /// An in-process buffered read/write loop.
    Native,
}

/// Outcome of a successful split.
#[derive(Debug)]
pub struct SplitReport {
    /// The directory holding the part files.
    pub part_dir: PathBuf,
    /// How many part files were written.
    pub parts: u64,
}

/// Probe for a usable system `split`.
///
/// The numbered `.sif` suffix scheme needs GNU extensions
/// (`--numeric-suffixes`, `--additional-suffix`). Any other split, or no
/// split at all, selects the native engine.
pub fn detect_engine() -> Engine {
    match Command::new("split").arg("--version").output() {
        Ok(out)
            if out.status.success()
                && String::from_utf8_lossy(&out.stdout).contains("GNU coreutils") =>
        {
            Engine::System
        }
        _ => Engine::Native,
    }
}

/// Split `options.input` into numbered part files under
/// `<out_dir>/<prefix>/`, choosing the engine automatically.
pub fn split(options: &SplitOptions) -> Result<SplitReport> {
    split_with(detect_engine(), options)
}

/// Split with an explicitly chosen engine.
pub fn split_with(engine: Engine, options: &SplitOptions) -> Result<SplitReport> {
    options.validate()?;

    let part_dir = options.part_dir();
    fs::create_dir_all(&part_dir)?;

    debug!(
        "splitting {} into {} with {:?} engine",
        options.input.display(),
        part_dir.display(),
        engine
    );

    let parts = match engine {
        Engine::System => split_system(options, &part_dir)?,
        Engine::Native => split_native(options, &part_dir)?,
    };

    info!("wrote {} part(s) under {}", parts, part_dir.display());

    Ok(SplitReport { part_dir, parts })
}

fn split_system(options: &SplitOptions, part_dir: &Path) -> Result<u64> {
    let output = Command::new("split")
        .arg("--bytes")
        .arg(options.chunk_size.bytes().to_string())
        .arg(format!("--numeric-suffixes={}", options.start_index))
        .arg("--suffix-length")
        .arg(options.digits.to_string())
        .arg(format!("--additional-suffix={}", PART_SUFFIX))
        .arg(&options.input)
        .arg(part_dir.join(format!("{}.", options.prefix)))
        .output()?;

    if !output.status.success() {
        return Err(Error::IoError(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "split exited with status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        )));
    }

    // split(1) doesn't report a count, so count what's on disk.
    let mut parts = 0;
    for entry in fs::read_dir(part_dir)? {
        let name = entry?.file_name();
        if name
            .to_str()
            .map_or(false, |n| is_part_file_name(&options.prefix, n))
        {
            parts += 1;
        }
    }

    Ok(parts)
}

fn split_native(options: &SplitOptions, part_dir: &Path) -> Result<u64> {
    let file = File::open(&options.input)?;
    let mut reader = BufReader::new(file);

    let chunk_bytes = options.chunk_size.bytes();
    // With a fixed suffix length, split(1) fails once it runs out of
    // suffixes; the native engine enforces the same limit.
    let index_limit = 10u64.checked_pow(options.digits as u32);

    let mut index = options.start_index;
    let mut parts = 0u64;

    loop {
        // An empty input produces no parts at all.
        if reader.fill_buf()?.is_empty() {
            break;
        }

        if index_limit.map_or(false, |limit| u64::from(index) >= limit) {
            return Err(Error::InvalidConfiguration(format!(
                "digit width {} cannot number part {}",
                options.digits, index
            )));
        }

        let name = part_file_name(&options.prefix, index, options.digits);
        let mut out = File::create(part_dir.join(&name))?;
        let mut chunk = (&mut reader).take(chunk_bytes);
        io::copy(&mut chunk, &mut out)?;

        index += 1;
        parts += 1;
    }

    Ok(parts)
}
