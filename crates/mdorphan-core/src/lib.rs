//! # mdorphan Core
//!
//! Error types, configuration, accepted-extension sets and path helpers
//! shared by every mdorphan crate.
//!
//! ## Architecture Principles
//!
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Lexical Path Identity**: documents are identified by absolute,
//!   `.`/`..`-free paths; targets of broken links never need to exist
//! - **Type-Driven Settings**: enums replace free-form mode strings
//!
//! ## Core Modules
//!
//! - [`error`] - Error taxonomy and Result alias
//! - [`config`] - Config file, merged settings and validation
//! - [`extensions`] - Case-insensitive accepted-extension set
//! - [`utils`] - Path normalization and JSON helpers
//!
//! ## Usage Examples
//!
//! ```
//! use mdorphan_core::prelude::*;
//!
//! let exts = ExtensionSet::parse("md, .Markdown");
//! assert!(exts.contains(".MD"));
//!
//! let err = Error::config_error("graph root is required");
//! assert!(err.is_config());
//! ```

pub mod config;
pub mod error;
pub mod extensions;
pub mod utils;

pub use config::{
    CheckSettings, DEFAULT_CONFIG_PATH, FileConfig, GraphFormat, OutputFormat, UnresolvedMode,
};
pub use error::{Error, Result};
pub use extensions::{DEFAULT_EXTENSIONS, ExtensionSet};
pub use utils::to_json_string;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{CheckSettings, FileConfig, GraphFormat, OutputFormat, UnresolvedMode};
    pub use crate::error::{Error, Result};
    pub use crate::extensions::ExtensionSet;
    pub use crate::utils::{clean_slash, is_blank_path, is_within_dir, normalize_abs, relative_slash};
}
