//! Root reachability and orphan detection

use crate::graph::LinkGraph;
use mdorphan_core::prelude::*;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Result of a reachability pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Documents reachable from the root, root included
    pub reachable: BTreeSet<PathBuf>,
    /// Inventory documents that are not reachable, sorted
    pub orphans: Vec<PathBuf>,
}

impl Analysis {
    pub fn has_orphans(&self) -> bool {
        !self.orphans.is_empty()
    }

    pub fn is_reachable(&self, path: &Path) -> bool {
        self.reachable.contains(path)
    }
}

/// Paths interned to dense petgraph node handles
#[derive(Default)]
struct PathIndex {
    graph: DiGraph<PathBuf, ()>,
    ids: HashMap<PathBuf, NodeIndex>,
}

impl PathIndex {
    fn intern(&mut self, path: &Path) -> NodeIndex {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = self.graph.add_node(path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }

    fn path(&self, id: NodeIndex) -> &Path {
        &self.graph[id]
    }
}

/// Compute the documents reachable from the graph root and the orphans
/// among `inventory`.
///
/// Fails with [`Error::RootNotInScan`] when the root is not part of the
/// inventory. Cycles and self-links are harmless.
#[instrument(skip_all, name = "graph_analyze")]
pub fn analyze(graph: &LinkGraph, scan_dir: &Path, inventory: &[PathBuf]) -> Result<Analysis> {
    if is_blank_path(scan_dir) {
        return Err(Error::config_error("scan dir is required"));
    }
    let scan_dir = normalize_abs(scan_dir)?;
    let root = normalize_abs(graph.root())?;

    let mut index = PathIndex::default();
    let mut inventory_ids = Vec::with_capacity(inventory.len());
    let mut in_inventory = HashSet::with_capacity(inventory.len());
    for file in inventory {
        let id = index.intern(&normalize_abs(file)?);
        if in_inventory.insert(id) {
            inventory_ids.push(id);
        }
    }

    let root_id = index.intern(&root);
    if !in_inventory.contains(&root_id) {
        return Err(Error::root_not_in_scan(root));
    }

    for (source, targets) in graph.adjacency() {
        let from = index.intern(source);
        for target in targets {
            let to = index.intern(target);
            index.graph.add_edge(from, to, ());
        }
    }

    let visited = traverse_from(&index.graph, root_id);

    let reachable: BTreeSet<PathBuf> = visited
        .iter()
        .map(|&id| index.path(id).to_path_buf())
        .collect();
    let mut orphans: Vec<PathBuf> = inventory_ids
        .into_iter()
        .filter(|id| !visited.contains(id))
        .map(|id| index.path(id).to_path_buf())
        .collect();
    orphans.sort();

    log::info!(
        "Reachability under {}: {} reachable, {} orphans",
        scan_dir.display(),
        reachable.len(),
        orphans.len()
    );

    Ok(Analysis { reachable, orphans })
}

/// Iterative depth-first walk; every node is expanded at most once.
fn traverse_from(graph: &DiGraph<PathBuf, ()>, start: NodeIndex) -> HashSet<NodeIndex> {
    let mut visited = HashSet::with_capacity(graph.node_count());
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        for next in graph.neighbors(node) {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Adjacency;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    fn graph(root: &str, edges: &[(&str, &[&str])]) -> LinkGraph {
        let adjacency: Adjacency = edges
            .iter()
            .map(|(src, dsts)| (p(src), dsts.iter().map(|d| p(d)).collect()))
            .collect();
        LinkGraph::from_parts(p(root), adjacency, vec![])
    }

    #[test]
    fn test_orphans_and_reachable() {
        let g = graph(
            "/d/index.md",
            &[
                ("/d/index.md", &["/d/a.md"]),
                ("/d/a.md", &["/d/b.md"]),
                ("/d/b.md", &[]),
                ("/d/z.md", &["/d/a.md"]),
                ("/d/c.md", &[]),
            ],
        );
        let inventory: Vec<PathBuf> = g.nodes().map(Path::to_path_buf).collect();
        let analysis = analyze(&g, Path::new("/d"), &inventory).unwrap();

        assert_eq!(analysis.orphans, vec![p("/d/c.md"), p("/d/z.md")]);
        assert_eq!(analysis.reachable.len(), 3);
        assert!(analysis.is_reachable(Path::new("/d/index.md")));
        assert!(analysis.has_orphans());
    }

    #[test]
    fn test_cycles_terminate() {
        let g = graph(
            "/d/index.md",
            &[
                ("/d/index.md", &["/d/index.md", "/d/a.md"]),
                ("/d/a.md", &["/d/b.md"]),
                ("/d/b.md", &["/d/a.md", "/d/index.md"]),
            ],
        );
        let inventory = vec![p("/d/index.md"), p("/d/a.md"), p("/d/b.md")];
        let analysis = analyze(&g, Path::new("/d"), &inventory).unwrap();
        assert!(analysis.orphans.is_empty());
        assert_eq!(analysis.reachable.len(), 3);
    }

    #[test]
    fn test_root_only() {
        let g = graph("/d/index.md", &[("/d/index.md", &[])]);
        let analysis = analyze(&g, Path::new("/d"), &[p("/d/index.md")]).unwrap();
        assert_eq!(analysis.reachable, BTreeSet::from([p("/d/index.md")]));
        assert!(!analysis.has_orphans());
    }

    #[test]
    fn test_duplicate_inventory_reported_once() {
        let g = graph("/d/index.md", &[("/d/index.md", &[]), ("/d/x.md", &[])]);
        let inventory = vec![p("/d/index.md"), p("/d/x.md"), p("/d/./x.md")];
        let analysis = analyze(&g, Path::new("/d"), &inventory).unwrap();
        assert_eq!(analysis.orphans, vec![p("/d/x.md")]);
    }

    #[test]
    fn test_root_not_in_inventory() {
        let g = graph("/d/index.md", &[("/d/a.md", &[])]);
        let err = analyze(&g, Path::new("/d"), &[p("/d/a.md")]).unwrap_err();
        assert!(matches!(err, Error::RootNotInScan { .. }));
        assert_eq!(
            err.to_string(),
            "root markdown file is not in scan result: /d/index.md"
        );
    }

    #[test]
    fn test_empty_scan_dir() {
        let g = graph("/d/index.md", &[("/d/index.md", &[])]);
        let err = analyze(&g, Path::new(""), &[p("/d/index.md")]).unwrap_err();
        assert!(err.is_config());
        let err = analyze(&g, Path::new("  "), &[p("/d/index.md")]).unwrap_err();
        assert!(err.is_config());
    }
}
