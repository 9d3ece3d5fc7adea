use std::path::PathBuf;

use thiserror::Error;

/// Describes the potential error conditions that might arise from `sifstore`
/// chunking and install operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The file to be split does not exist or is not a regular file.
    #[error("input file {} does not exist or is not a regular file", .0.display())]
    InputNotFound(PathBuf),

    /// A size, digit-width, or start-index value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required external command could not be found on this host.
    #[error("required command `{0}` is not available on this system")]
    MissingDependency(String),

    /// The installed git's version string could not be parsed.
    #[error("could not parse a git version from `{0}`")]
    VersionParse(String),

    /// The latest release carries no asset for this platform.
    #[error("no release asset matching `{0}` was found")]
    AssetNotFound(String),

    /// The downloaded archive did not have the expected layout.
    #[error("downloaded archive did not contain a `{0}` directory")]
    MalformedArchive(String),

    /// The release index response could not be deserialized.
    #[error("could not parse release metadata: {0}")]
    ReleaseParse(#[from] serde_json::Error),

    /// No part files for the requested prefix exist in the searched directory.
    #[error("no part files named {}.<index>.sif were found in {}", .prefix, .dir.display())]
    NoPartsFound { prefix: String, dir: PathBuf },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for `sifstore` operations.
pub type Result<T> = std::result::Result<T, Error>;
