//! Directed link graph over a document inventory

use crate::builder::GraphBuilder;
use crate::reachability::{Analysis, analyze};
use mdorphan_core::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Sorted adjacency: every inventory document maps to the sorted set of
/// inventory documents it links to.
pub type Adjacency = BTreeMap<PathBuf, BTreeSet<PathBuf>>;

/// Link graph for one run.
///
/// Built once by [`GraphBuilder`] and read-only afterwards. Every key and
/// every edge target is a member of the inventory the graph was built from;
/// isolated documents are present with an empty edge set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkGraph {
    root: PathBuf,
    adjacency: Adjacency,
    warnings: Vec<String>,
}

impl LinkGraph {
    /// Start building a graph rooted at `root` for documents under `scan_dir`
    pub fn builder(root: impl Into<PathBuf>, scan_dir: impl Into<PathBuf>) -> GraphBuilder {
        GraphBuilder::new(root, scan_dir)
    }

    /// Assemble a graph from an already resolved adjacency map.
    ///
    /// Warnings are deduplicated and sorted.
    pub fn from_parts(root: PathBuf, adjacency: Adjacency, warnings: Vec<String>) -> Self {
        let warnings: BTreeSet<String> = warnings.into_iter().collect();
        Self {
            root,
            adjacency,
            warnings: warnings.into_iter().collect(),
        }
    }

    /// The root document
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Unresolved-link warnings, sorted
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// All documents, sorted
    pub fn nodes(&self) -> impl Iterator<Item = &Path> {
        self.adjacency.keys().map(PathBuf::as_path)
    }

    /// Documents linked from `path`, sorted. Empty for unknown paths.
    pub fn forward_links(&self, path: &Path) -> Vec<&Path> {
        self.adjacency
            .get(path)
            .map(|targets| targets.iter().map(PathBuf::as_path).collect())
            .unwrap_or_default()
    }

    /// Documents linking to `path`, sorted
    pub fn backlinks(&self, path: &Path) -> Vec<&Path> {
        self.adjacency
            .iter()
            .filter(|(_, targets)| targets.contains(path))
            .map(|(source, _)| source.as_path())
            .collect()
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.node_count();
        let edge_count = self.edge_count();

        let average_links_per_file = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_files: node_count,
            total_links: edge_count,
            unresolved_links: self.warnings.len(),
            average_links_per_file,
        }
    }

    /// Reachability from the root over this graph. See [`analyze`].
    pub fn analyze(&self, scan_dir: &Path, inventory: &[PathBuf]) -> Result<Analysis> {
        analyze(self, scan_dir, inventory)
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_files: usize,
    pub total_links: usize,
    pub unresolved_links: usize,
    pub average_links_per_file: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> LinkGraph {
        let adjacency = edges
            .iter()
            .map(|(src, dsts)| {
                (
                    PathBuf::from(src),
                    dsts.iter().map(PathBuf::from).collect::<BTreeSet<_>>(),
                )
            })
            .collect();
        LinkGraph::from_parts(PathBuf::from("/d/index.md"), adjacency, vec![])
    }

    #[test]
    fn test_counts_and_stats() {
        let g = graph(&[
            ("/d/index.md", &["/d/a.md", "/d/b.md"]),
            ("/d/a.md", &["/d/b.md"]),
            ("/d/b.md", &[]),
            ("/d/lonely.md", &[]),
        ]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);

        let stats = g.stats();
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_links, 3);
        assert_eq!(stats.unresolved_links, 0);
        assert!((stats.average_links_per_file - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_forward_and_backlinks() {
        let g = graph(&[
            ("/d/index.md", &["/d/b.md", "/d/a.md"]),
            ("/d/a.md", &["/d/b.md"]),
            ("/d/b.md", &[]),
        ]);
        assert_eq!(
            g.forward_links(Path::new("/d/index.md")),
            vec![Path::new("/d/a.md"), Path::new("/d/b.md")]
        );
        assert_eq!(
            g.backlinks(Path::new("/d/b.md")),
            vec![Path::new("/d/a.md"), Path::new("/d/index.md")]
        );
        assert!(g.forward_links(Path::new("/d/missing.md")).is_empty());
    }

    #[test]
    fn test_from_parts_sorts_and_dedups_warnings() {
        let g = LinkGraph::from_parts(
            PathBuf::from("/d/index.md"),
            Adjacency::new(),
            vec!["b".to_string(), "a".to_string(), "b".to_string()],
        );
        assert_eq!(g.warnings(), ["a", "b"]);
    }
}
