//! # Link Graph
//!
//! Directed graph of local markdown links and root reachability analysis.
//!
//! Provides:
//! - Concurrent graph construction over a document inventory
//! - Boundary, extension and inventory filtering of link targets
//! - Unresolved link warnings
//! - Reachability from a root document and orphan detection
//! - Graph statistics
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdorphan_graph::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! let files: Vec<PathBuf> = vec!["docs/index.md".into(), "docs/a.md".into()];
//!
//! let graph = GraphBuilder::new("docs/index.md", "docs")
//!     .files(files.iter().cloned())
//!     .extensions(ExtensionSet::default())
//!     .max_workers(8)
//!     .build()?;
//!
//! let analysis = analyze(&graph, Path::new("docs"), &files)?;
//! for orphan in &analysis.orphans {
//!     println!("orphan: {}", orphan.display());
//! }
//! # Ok::<(), mdorphan_core::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: every inventory document, including isolated ones
//! - **Edges**: a local link whose resolved target is inside the scan
//!   directory, carries an accepted extension and exists in the inventory
//! - **Warnings**: links that pass the first two checks but name a document
//!   missing from the inventory
//! - **Orphans**: inventory documents not reachable from the root
//!
//! Node sets, edge sets and warnings are kept sorted, so the graph is
//! identical for any worker count.

pub mod builder;
pub mod graph;
pub mod reachability;

pub use builder::GraphBuilder;
pub use graph::{Adjacency, GraphStats, LinkGraph};
pub use reachability::{Analysis, analyze};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::builder::GraphBuilder;
    pub use crate::graph::{GraphStats, LinkGraph};
    pub use crate::reachability::{Analysis, analyze};
    pub use mdorphan_core::prelude::*;
}
