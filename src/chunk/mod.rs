//! Splitting large images into numbered part files and joining them back.
//!
//! A part set for an image named `fedora38.sif`, produced with the default
//! width, lives at `fedora38/fedora38.00001.sif`, `fedora38/fedora38.00002.sif`,
//! and so on. Concatenating the parts in index order reproduces the original
//! image byte-for-byte.

mod size;
pub use size::ChunkSize;

mod part;
pub use part::{default_prefix, is_part_file_name, part_file_name, PART_SUFFIX};

mod split;
pub use split::{detect_engine, split, split_with, Engine, SplitOptions, SplitReport};

mod join;
pub use join::{join, JoinOptions, JoinReport};
