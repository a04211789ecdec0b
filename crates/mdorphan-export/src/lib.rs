//! # Export System
//!
//! Rendering of orphan-check results for humans and machines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdorphan_export::prelude::*;
//! use mdorphan_graph::{GraphBuilder, analyze};
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = Path::new("/docs");
//! let files: Vec<PathBuf> = vec!["/docs/index.md".into(), "/docs/a.md".into()];
//! let graph = GraphBuilder::new("/docs/index.md", dir)
//!     .files(files.iter().cloned())
//!     .build()?;
//! let analysis = analyze(&graph, dir, &files)?;
//!
//! let report = OrphanReport::new(graph.root(), dir, &analysis, files.len())?
//!     .with_graph(GraphExporter::to_mermaid(&graph, dir)?);
//!
//! println!("{}", ReportRenderer::to_text(&report, TextOptions::default()));
//! println!("{}", ReportRenderer::to_json(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Graph Formats
//!
//! - **DOT**: `digraph mdorphan { "a.md" -> "b.md"; }`, for Graphviz
//! - **Mermaid**: `graph TD` flowchart, for markdown renderers
//!
//! ## Report Formats
//!
//! ### Text
//! - Orphan list, or `No orphan markdown files found.`
//! - Optional `Summary:`, `Unresolved local links` and `Graph:` blocks
//!
//! ### JSON
//! - Pretty-printed, stable key order
//! - `warnings` and `graph` omitted when empty
//!
//! Exporters return strings; nothing here touches the file system.

pub mod graph_export;
pub mod report;

pub use graph_export::GraphExporter;
pub use report::{OrphanReport, ReportRenderer, ReportSummary, TextOptions};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::graph_export::GraphExporter;
    pub use crate::report::{OrphanReport, ReportRenderer, ReportSummary, TextOptions};
}
