//! # Inventory Scanner
//!
//! Builds the document inventory for one run: every file under the scan
//! directory with an accepted extension, minus ignored paths.
//!
//! - [`Scanner`] walks the directory (`walkdir`), pruning ignored
//!   directories and returning sorted absolute paths
//! - [`IgnoreRules`] compiles `--ignore` rules: globs (`globset`, `*` does
//!   not cross `/`) and plain path prefixes
//! - [`CheckFileFilter`] exempts orphans named by `--ignore-check-file`
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdorphan_scan::prelude::*;
//!
//! let files = Scanner::new("docs")
//!     .extensions(ExtensionSet::parse(".md,.markdown"))
//!     .ignore(["drafts", "*.tmp.md"])
//!     .scan()?;
//! println!("{} documents", files.len());
//! # Ok::<(), mdorphan_core::Error>(())
//! ```

pub mod ignore;
pub mod scanner;

pub use ignore::{CheckFileFilter, IgnoreRules};
pub use scanner::Scanner;

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::ignore::{CheckFileFilter, IgnoreRules};
    pub use crate::scanner::Scanner;
    pub use mdorphan_core::prelude::*;
}
