//! Concurrent graph construction
//!
//! Each inventory document is read and parsed on a bounded rayon pool; the
//! per-document results are merged into the adjacency map on the calling
//! thread once every worker has finished. The first failing document aborts
//! the build.

use crate::graph::{Adjacency, LinkGraph};
use mdorphan_core::prelude::*;
use mdorphan_parser::LinkExtractor;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Builder for [`LinkGraph`].
///
/// ```no_run
/// use mdorphan_graph::GraphBuilder;
///
/// let graph = GraphBuilder::new("docs/index.md", "docs")
///     .files(["docs/index.md", "docs/a.md"])
///     .max_workers(4)
///     .build()?;
/// println!("{} links", graph.edge_count());
/// # Ok::<(), mdorphan_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    root: PathBuf,
    scan_dir: PathBuf,
    files: Vec<PathBuf>,
    extensions: ExtensionSet,
    max_workers: usize,
}

impl GraphBuilder {
    pub fn new(root: impl Into<PathBuf>, scan_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scan_dir: scan_dir.into(),
            files: Vec::new(),
            extensions: ExtensionSet::default(),
            max_workers: 0,
        }
    }

    /// The document inventory. Duplicates collapse after normalization.
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Accepted document extensions (defaults to `.md`, `.markdown`)
    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Upper bound on concurrent workers. `0` means no bound beyond the
    /// available parallelism.
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Read every inventory document, resolve its links and assemble the graph.
    #[instrument(skip_all, name = "graph_build")]
    pub fn build(&self) -> Result<LinkGraph> {
        if is_blank_path(&self.root) {
            return Err(Error::config_error("graph root is required"));
        }
        if is_blank_path(&self.scan_dir) {
            return Err(Error::config_error("graph scan dir is required"));
        }

        let root = normalize_abs(&self.root)?;
        let scan_dir = normalize_abs(&self.scan_dir)?;

        let mut adjacency = Adjacency::new();
        for file in &self.files {
            adjacency.entry(normalize_abs(file)?).or_default();
        }

        let inventory: HashSet<PathBuf> = adjacency.keys().cloned().collect();
        let sources: Vec<PathBuf> = adjacency.keys().cloned().collect();
        let workers = resolve_worker_count(sources.len(), self.max_workers);

        log::debug!(
            "Building link graph: {} documents, {} workers",
            sources.len(),
            workers
        );

        let ctx = EdgeContext {
            scan_dir: &scan_dir,
            inventory: &inventory,
            extractor: LinkExtractor::new(self.extensions.clone()),
        };
        let results = collect_edges(&sources, &ctx, workers)?;

        let mut warnings = BTreeSet::new();
        for edges in results {
            warnings.extend(edges.warnings);
            adjacency.insert(edges.source, edges.targets);
        }

        let graph = LinkGraph::from_parts(root, adjacency, warnings.into_iter().collect());
        log::info!(
            "Link graph built: {} nodes, {} edges, {} unresolved",
            graph.node_count(),
            graph.edge_count(),
            graph.warnings().len()
        );
        Ok(graph)
    }
}

/// Shared, read-only inputs for edge discovery
struct EdgeContext<'a> {
    scan_dir: &'a Path,
    inventory: &'a HashSet<PathBuf>,
    extractor: LinkExtractor,
}

/// Outcome of one source document
#[derive(Debug)]
struct SourceEdges {
    source: PathBuf,
    targets: BTreeSet<PathBuf>,
    warnings: Vec<String>,
}

/// min(available parallelism, cap when positive, number of sources), at least 1
pub(crate) fn resolve_worker_count(sources: usize, cap: usize) -> usize {
    let mut workers = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    if cap > 0 {
        workers = workers.min(cap);
    }
    workers.min(sources).max(1)
}

fn collect_edges(
    sources: &[PathBuf],
    ctx: &EdgeContext<'_>,
    workers: usize,
) -> Result<Vec<SourceEdges>> {
    if sources.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("mdorphan-edges-{i}"))
        .build()
        .map_err(|e| Error::concurrency_error(format!("build worker pool: {e}")))?;

    pool.install(|| {
        sources
            .par_iter()
            .map(|source| edges_for_source(source, ctx))
            .collect()
    })
}

fn edges_for_source(source: &Path, ctx: &EdgeContext<'_>) -> Result<SourceEdges> {
    let bytes = std::fs::read(source).map_err(|e| Error::read_file(source, e))?;
    let content = String::from_utf8_lossy(&bytes);
    let links = ctx.extractor.extract(&content);

    let source_dir = source.parent().unwrap_or(ctx.scan_dir);
    let mut targets = BTreeSet::new();
    let mut warnings = Vec::new();

    for link in links {
        let target = normalize_abs(&source_dir.join(&link))?;
        if !is_within_dir(ctx.scan_dir, &target) {
            continue;
        }
        if !ctx.extractor.extensions().matches_path(&target) {
            continue;
        }
        if !ctx.inventory.contains(&target) {
            warnings.push(unresolved_warning(source, &target));
            continue;
        }
        targets.insert(target);
    }

    log::debug!(
        "Parsed {}: {} local links, {} unresolved",
        source.display(),
        targets.len(),
        warnings.len()
    );

    Ok(SourceEdges {
        source: source.to_path_buf(),
        targets,
        warnings,
    })
}

pub(crate) fn unresolved_warning(source: &Path, target: &Path) -> String {
    format!(
        "unresolved local markdown link: {} -> {}",
        source.display(),
        target.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_resolve_worker_count() {
        assert_eq!(resolve_worker_count(0, 0), 1);
        assert_eq!(resolve_worker_count(0, 8), 1);
        assert_eq!(resolve_worker_count(1, 8), 1);
        assert_eq!(resolve_worker_count(100, 1), 1);
        assert!(resolve_worker_count(100, 2) <= 2);
        assert!(resolve_worker_count(100, 0) >= 1);
    }

    #[test]
    fn test_empty_root_or_dir_is_config_error() {
        let err = GraphBuilder::new("", "docs").build().unwrap_err();
        assert!(err.is_config());
        let err = GraphBuilder::new("docs/index.md", "").build().unwrap_err();
        assert!(err.is_config());
        let err = GraphBuilder::new("   ", "docs").build().unwrap_err();
        assert!(err.is_config());
        let err = GraphBuilder::new("docs/index.md", " \t").build().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_inventory_yields_empty_graph() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("index.md");
        let graph = GraphBuilder::new(&root, tmp.path()).build().unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.warnings().is_empty());
    }

    #[test]
    fn test_self_link_and_duplicate_inventory() {
        let tmp = TempDir::new().unwrap();
        let index = write(tmp.path(), "index.md", "[me](index.md) [again](./index.md)");

        let graph = GraphBuilder::new(&index, tmp.path())
            .files([index.clone(), tmp.path().join("./index.md")])
            .build()
            .unwrap();

        let index = normalize_abs(&index).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.forward_links(&index), vec![index.as_path()]);
    }

    #[test]
    fn test_unresolved_warning_format() {
        let warning = unresolved_warning(Path::new("/d/index.md"), Path::new("/d/missing.md"));
        assert_eq!(
            warning,
            "unresolved local markdown link: /d/index.md -> /d/missing.md"
        );
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.md", "");
        let index = tmp.path().join("index.md");
        let mut bytes = b"\xff\xfe [a](a.md)".to_vec();
        bytes.push(b'\n');
        fs::write(&index, bytes).unwrap();

        let graph = GraphBuilder::new(&index, tmp.path())
            .files([index.clone(), a.clone()])
            .build()
            .unwrap();
        let a = normalize_abs(&a).unwrap();
        assert_eq!(
            graph.forward_links(&normalize_abs(&index).unwrap()),
            vec![a.as_path()]
        );
    }
}
