//! Integration tests for graph construction and reachability over real files

use mdorphan_core::{Error, ExtensionSet, utils::normalize_abs};
use mdorphan_graph::{GraphBuilder, LinkGraph, analyze};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    normalize_abs(&path).unwrap()
}

fn build(root: &Path, dir: &Path, files: &[PathBuf], workers: usize) -> LinkGraph {
    GraphBuilder::new(root, dir)
        .files(files.iter().cloned())
        .extensions(ExtensionSet::default())
        .max_workers(workers)
        .build()
        .unwrap()
}

/// index -> a <-> b, c -> d, plus a handful of filtered links
fn setup_test_docs() -> (TempDir, PathBuf, Vec<PathBuf>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let outer = temp_dir.path();
    let dir = outer.join("docs");

    write(outer, "outside.md", "# Outside\n");
    let files = vec![
        write(
            &dir,
            "index.md",
            "# Index\n[a](./a.md) [out](../outside.md) [img](pic.png) \
             [web](https://example.com/x.md) [gone](missing.md)\n",
        ),
        write(&dir, "a.md", "# A\n[b][bee]\n\n[bee]: b.md\n"),
        write(&dir, "b.md", "# B\n[back to a](a.md#top)\n"),
        write(&dir, "c.md", "# C\n[d](sub/../d.md)\n"),
        write(&dir, "d.md", "# D\nNo links\n"),
    ];
    write(&dir, "pic.png", "not an image");

    let dir = normalize_abs(&dir).unwrap();
    (temp_dir, dir, files)
}

#[test]
fn test_end_to_end_reachability() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let root = dir.join("index.md");

    let graph = build(&root, &dir, &files, 0);
    let analysis = analyze(&graph, &dir, &files).unwrap();

    let expected: BTreeSet<PathBuf> = ["index.md", "a.md", "b.md"]
        .iter()
        .map(|name| dir.join(name))
        .collect();
    assert_eq!(analysis.reachable, expected);
    assert_eq!(analysis.orphans, vec![dir.join("c.md"), dir.join("d.md")]);
}

#[test]
fn test_filtering_and_single_warning() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let root = dir.join("index.md");

    let graph = build(&root, &dir, &files, 2);

    assert_eq!(graph.forward_links(&root), vec![dir.join("a.md").as_path()]);
    assert_eq!(
        graph.warnings(),
        [format!(
            "unresolved local markdown link: {} -> {}",
            root.display(),
            dir.join("missing.md").display()
        )]
    );
    assert_eq!(graph.stats().unresolved_links, 1);
}

#[test]
fn test_determinism_across_worker_counts() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let root = dir.join("index.md");

    let baseline = build(&root, &dir, &files, 1);
    for workers in [2, 8, 0] {
        for _ in 0..3 {
            assert_eq!(build(&root, &dir, &files, workers), baseline);
        }
    }
}

#[test]
fn test_every_inventory_file_is_a_node() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let graph = build(&dir.join("index.md"), &dir, &files, 4);

    assert_eq!(graph.node_count(), files.len());
    for file in &files {
        assert!(graph.adjacency().contains_key(file));
    }
    assert!(graph.forward_links(&dir.join("d.md")).is_empty());
}

#[test]
fn test_partition_of_inventory() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let graph = build(&dir.join("index.md"), &dir, &files, 0);
    let analysis = graph.analyze(&dir, &files).unwrap();

    let orphans: BTreeSet<PathBuf> = analysis.orphans.iter().cloned().collect();
    let inventory: BTreeSet<PathBuf> = files.iter().cloned().collect();

    assert!(analysis.reachable.is_disjoint(&orphans));
    let union: BTreeSet<PathBuf> = analysis.reachable.union(&orphans).cloned().collect();
    assert_eq!(union, inventory);
}

#[test]
fn test_root_excluded_from_inventory() {
    let (_temp_dir, dir, files) = setup_test_docs();
    let root = dir.join("index.md");
    let without_root: Vec<PathBuf> = files.into_iter().filter(|f| *f != root).collect();

    let graph = build(&root, &dir, &without_root, 0);
    let err = analyze(&graph, &dir, &without_root).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("index.md"));
}

#[test]
fn test_unreadable_inventory_file_aborts_build() {
    let (_temp_dir, dir, mut files) = setup_test_docs();
    let ghost = dir.join("ghost.md");
    files.push(ghost.clone());

    let err = GraphBuilder::new(dir.join("index.md"), &dir)
        .files(files)
        .max_workers(4)
        .build()
        .unwrap_err();

    match err {
        Error::ReadFile { path, .. } => assert_eq!(path, ghost),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn test_custom_extensions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = normalize_abs(temp_dir.path()).unwrap();
    let files = vec![
        write(&dir, "index.mdx", "[a](a.mdx) [b](b.md)"),
        write(&dir, "a.mdx", ""),
        write(&dir, "b.md", ""),
    ];

    let graph = GraphBuilder::new(dir.join("index.mdx"), &dir)
        .files(files.iter().cloned())
        .extensions(ExtensionSet::parse(".mdx"))
        .build()
        .unwrap();

    assert_eq!(
        graph.forward_links(&dir.join("index.mdx")),
        vec![dir.join("a.mdx").as_path()]
    );
    assert!(graph.warnings().is_empty());
}
