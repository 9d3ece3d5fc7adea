//! This crate keeps large Singularity/Apptainer SIF container images
//! manageable in a git repository backed by git-lfs.
//!
//! Two concerns live here:
//!
//! * [`chunk`] splits one large image into fixed-size numbered part files
//!   (and joins them back) so each tracked object stays under storage and
//!   transfer size limits.
//! * [`install`] bootstraps a user-local git-lfs installation on hosts whose
//!   git predates built-in large-file support.
//!
//! The `sifstore` command-line binary is a thin shell over these modules.

#![deny(warnings)]

pub mod chunk;
pub mod install;

mod error;
pub use error::{Error, Result};
