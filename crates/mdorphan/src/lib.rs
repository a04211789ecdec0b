//! # mdorphan
//!
//! Orphan markdown checker: scans a directory, follows local links from a
//! root document and reports every document no link path reaches.
//!
//! The binary is a thin wrapper around [`run`]; [`check`] exposes the same
//! pipeline without any output for embedding.

pub mod cli;
pub mod runner;

pub use cli::Args;
pub use runner::{CheckOutcome, EXIT_ERROR, EXIT_FINDINGS, EXIT_OK, check, run};
pub use mdorphan_core::prelude::*;
