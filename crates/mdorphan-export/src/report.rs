//! Orphan report model and its text / JSON renderings

use mdorphan_core::prelude::*;
use mdorphan_core::to_json_string;
use mdorphan_core::utils::relative_slash_many;
use mdorphan_graph::Analysis;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub scanned: usize,
    pub reachable: usize,
    pub orphans: usize,
}

/// Final report of one orphan check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanReport {
    pub root: String,
    pub dir: String,
    /// Orphans relative to `dir`, `/`-separated
    pub orphans: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Rendered DOT or Mermaid graph, if one was requested
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graph: String,
    pub summary: ReportSummary,
}

impl OrphanReport {
    /// Assemble a report from an analysis whose orphans have already been
    /// filtered. `scanned` is the inventory size.
    pub fn new(root: &Path, dir: &Path, analysis: &Analysis, scanned: usize) -> Result<Self> {
        let orphans = relative_slash_many(dir, &analysis.orphans)
            .map_err(|e| Error::export_error(format!("convert orphan path to relative: {e}")))?;

        Ok(Self {
            root: root.display().to_string(),
            dir: dir.display().to_string(),
            summary: ReportSummary {
                scanned,
                reachable: analysis.reachable.len(),
                orphans: orphans.len(),
            },
            orphans,
            warnings: Vec::new(),
            graph: String::new(),
        })
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = graph.into();
        self
    }
}

/// Which optional sections the text report contains
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Append the `Summary:` block
    pub verbose: bool,
    /// Append the `Unresolved local links` block
    pub show_warnings: bool,
    /// Append the `Graph:` block
    pub show_graph: bool,
}

/// Report renderer
pub struct ReportRenderer;

impl ReportRenderer {
    /// Export report as plain text (no trailing newline)
    pub fn to_text(report: &OrphanReport, options: TextOptions) -> String {
        let mut lines = Vec::new();

        if report.orphans.is_empty() {
            lines.push("No orphan markdown files found.".to_string());
        } else {
            lines.push(format!("Orphan markdown files ({}):", report.orphans.len()));
            lines.extend(report.orphans.iter().map(|o| format!("- {o}")));
        }

        if options.verbose {
            lines.push(String::new());
            lines.push("Summary:".to_string());
            lines.push(format!("- root: {}", report.root));
            lines.push(format!("- dir: {}", report.dir));
            lines.push(format!("- scanned: {}", report.summary.scanned));
            lines.push(format!("- reachable: {}", report.summary.reachable));
            lines.push(format!("- orphans: {}", report.summary.orphans));
            lines.push(format!("- warnings: {}", report.warnings.len()));
        }

        if options.show_warnings && !report.warnings.is_empty() {
            lines.push(String::new());
            lines.push(format!("Unresolved local links ({}):", report.warnings.len()));
            lines.extend(report.warnings.iter().map(|w| format!("- {w}")));
        }

        if options.show_graph && !report.graph.trim().is_empty() {
            lines.push(String::new());
            lines.push("Graph:".to_string());
            lines.push(report.graph.clone());
        }

        lines.join("\n")
    }

    /// Export report as pretty-printed JSON
    pub fn to_json(report: &OrphanReport) -> Result<String> {
        to_json_string(report, "orphan report")
    }
}
