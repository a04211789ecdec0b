//! DOT and Mermaid rendering of the link graph

use mdorphan_core::prelude::*;
use mdorphan_graph::LinkGraph;
use std::path::{Path, PathBuf};

/// Graph exporter
///
/// Labels are paths relative to the scan directory with `/` separators, or
/// the absolute paths when `scan_dir` is empty. Nodes come out in sorted
/// order; nodes without outgoing links are emitted on their own line.
pub struct GraphExporter;

impl GraphExporter {
    /// Export as a Graphviz `digraph`
    pub fn to_dot(graph: &LinkGraph, scan_dir: &Path) -> Result<String> {
        let mut lines = vec!["digraph mdorphan {".to_string()];
        lines.extend(Self::render(graph, scan_dir, |src, dst| match dst {
            Some(dst) => format!("  {src:?} -> {dst:?};"),
            None => format!("  {src:?};"),
        })?);
        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }

    /// Export as a Mermaid `graph TD` flowchart
    pub fn to_mermaid(graph: &LinkGraph, scan_dir: &Path) -> Result<String> {
        let mut lines = vec!["graph TD".to_string()];
        lines.extend(Self::render(graph, scan_dir, |src, dst| match dst {
            Some(dst) => format!("  {src:?} --> {dst:?}"),
            None => format!("  {src:?}"),
        })?);
        Ok(lines.join("\n"))
    }

    fn render<F>(graph: &LinkGraph, scan_dir: &Path, line: F) -> Result<Vec<String>>
    where
        F: Fn(&str, Option<&str>) -> String,
    {
        let labeler = Labeler::new(scan_dir)?;
        let mut lines = Vec::with_capacity(graph.edge_count() + graph.node_count());

        for (src, targets) in graph.adjacency() {
            let src_label = labeler.label(src)?;
            if targets.is_empty() {
                lines.push(line(&src_label, None));
                continue;
            }
            for dst in targets {
                lines.push(line(&src_label, Some(&labeler.label(dst)?)));
            }
        }
        Ok(lines)
    }
}

struct Labeler {
    base: Option<PathBuf>,
}

impl Labeler {
    fn new(scan_dir: &Path) -> Result<Self> {
        let base = if scan_dir.as_os_str().is_empty() {
            None
        } else {
            Some(normalize_abs(scan_dir)?)
        };
        Ok(Self { base })
    }

    fn label(&self, path: &Path) -> Result<String> {
        match &self.base {
            Some(base) => relative_slash(base, path)
                .map_err(|e| Error::export_error(format!("make relative label: {e}"))),
            None => Ok(path.to_string_lossy().replace('\\', "/")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdorphan_graph::Adjacency;
    use std::collections::BTreeSet;

    fn sample() -> LinkGraph {
        let mut adjacency = Adjacency::new();
        adjacency.insert(
            PathBuf::from("/d/index.md"),
            BTreeSet::from([PathBuf::from("/d/a.md"), PathBuf::from("/d/sub/b.md")]),
        );
        adjacency.insert(
            PathBuf::from("/d/a.md"),
            BTreeSet::from([PathBuf::from("/d/index.md")]),
        );
        adjacency.insert(PathBuf::from("/d/sub/b.md"), BTreeSet::new());
        adjacency.insert(PathBuf::from("/d/say \"hi\".md"), BTreeSet::new());
        LinkGraph::from_parts(PathBuf::from("/d/index.md"), adjacency, vec![])
    }

    #[test]
    fn test_dot_export() {
        let dot = GraphExporter::to_dot(&sample(), Path::new("/d")).unwrap();
        insta::assert_snapshot!(dot, @r#"
        digraph mdorphan {
          "a.md" -> "index.md";
          "index.md" -> "a.md";
          "index.md" -> "sub/b.md";
          "say \"hi\".md";
          "sub/b.md";
        }
        "#);
    }

    #[test]
    fn test_mermaid_export() {
        let mermaid = GraphExporter::to_mermaid(&sample(), Path::new("/d")).unwrap();
        insta::assert_snapshot!(mermaid, @r#"
        graph TD
          "a.md" --> "index.md"
          "index.md" --> "a.md"
          "index.md" --> "sub/b.md"
          "say \"hi\".md"
          "sub/b.md"
        "#);
    }

    #[test]
    fn test_empty_scan_dir_uses_absolute_labels() {
        let mut adjacency = Adjacency::new();
        adjacency.insert(PathBuf::from("/d/index.md"), BTreeSet::new());
        let graph = LinkGraph::from_parts(PathBuf::from("/d/index.md"), adjacency, vec![]);

        let dot = GraphExporter::to_dot(&graph, Path::new("")).unwrap();
        assert_eq!(dot, "digraph mdorphan {\n  \"/d/index.md\";\n}");
    }

    #[test]
    fn test_empty_graph() {
        let graph = LinkGraph::from_parts(PathBuf::from("/d/index.md"), Adjacency::new(), vec![]);
        assert_eq!(
            GraphExporter::to_mermaid(&graph, Path::new("/d")).unwrap(),
            "graph TD"
        );
    }
}
