//! One orphan check, from settings to exit code

use crate::cli::Args;
use anyhow::Context;
use mdorphan_core::prelude::*;
use mdorphan_export::{GraphExporter, OrphanReport, ReportRenderer, TextOptions};
use mdorphan_graph::{Analysis, GraphBuilder, LinkGraph, analyze};
use mdorphan_scan::{CheckFileFilter, Scanner};
use std::io::Write;
use std::path::PathBuf;
use tracing::instrument;

/// No orphans, no failing unresolved links
pub const EXIT_OK: i32 = 0;
/// Orphans found, or unresolved links under `--unresolved fail`
pub const EXIT_FINDINGS: i32 = 1;
/// Usage, configuration, I/O or rendering error
pub const EXIT_ERROR: i32 = 2;

/// Results of the scan / build / analyze pipeline
#[derive(Debug)]
pub struct CheckOutcome {
    pub settings: CheckSettings,
    /// Scanned inventory, sorted
    pub files: Vec<PathBuf>,
    pub graph: LinkGraph,
    /// Analysis with exempt orphans already removed
    pub analysis: Analysis,
    /// Rendered graph export, empty when none was requested or it was skipped
    pub graph_text: String,
    /// Node count that exceeded `max_graph_nodes`, if the export was skipped
    pub graph_skipped: Option<usize>,
}

/// Scan, build the link graph, analyze it and prepare the graph export.
#[instrument(skip_all, name = "check")]
pub fn check(settings: CheckSettings) -> Result<CheckOutcome> {
    let files = Scanner::new(&settings.dir)
        .extensions(settings.extensions.clone())
        .ignore(settings.ignore.iter().cloned())
        .scan()?;
    log::info!("Scanned {} markdown files", files.len());

    let graph = GraphBuilder::new(&settings.root, &settings.dir)
        .files(files.iter().cloned())
        .extensions(settings.extensions.clone())
        .max_workers(settings.workers)
        .build()?;

    let mut analysis = analyze(&graph, &settings.dir, &files)?;
    let filter = CheckFileFilter::new(&settings.dir, &settings.ignore_check_files);
    analysis.orphans = filter.retain_checked(&settings.dir, analysis.orphans)?;

    let node_count = graph.node_count();
    let limited = settings.graph != GraphFormat::None
        && settings.max_graph_nodes > 0
        && node_count > settings.max_graph_nodes;

    let (graph_text, graph_skipped) = if limited {
        (String::new(), Some(node_count))
    } else {
        let text = match settings.graph {
            GraphFormat::None => String::new(),
            GraphFormat::Dot => GraphExporter::to_dot(&graph, &settings.dir)?,
            GraphFormat::Mermaid => GraphExporter::to_mermaid(&graph, &settings.dir)?,
        };
        (text, None)
    };

    Ok(CheckOutcome {
        settings,
        files,
        graph,
        analysis,
        graph_text,
        graph_skipped,
    })
}

/// Run the whole command, writing the report to `stdout` and diagnostics to
/// `stderr`. Returns the process exit code.
pub fn run(args: &Args, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    match execute(args, stdout, stderr) {
        Ok(code) => code,
        Err(e) => {
            log::debug!("Run failed: {e:?}");
            let _ = writeln!(stderr, "error: {e}");
            EXIT_ERROR
        }
    }
}

fn execute(args: &Args, stdout: &mut dyn Write, stderr: &mut dyn Write) -> anyhow::Result<i32> {
    let settings = args.load_settings()?;
    let outcome = check(settings)?;
    let settings = &outcome.settings;

    if let Some(node_count) = outcome.graph_skipped {
        writeln!(
            stderr,
            "warning: graph export skipped: node count {} exceeds --max-graph-nodes={}",
            node_count, settings.max_graph_nodes
        )?;
    }

    if settings.verbose {
        write_validated_inputs(stdout, &outcome)?;
    }

    let mut warnings = outcome.graph.warnings().to_vec();
    let mut unresolved_failed = false;
    match settings.unresolved {
        UnresolvedMode::None => warnings.clear(),
        UnresolvedMode::Warn => {
            for warning in &warnings {
                writeln!(stderr, "warning: {warning}")?;
            }
        }
        UnresolvedMode::Fail => {
            unresolved_failed = !warnings.is_empty();
            for warning in &warnings {
                writeln!(stderr, "error: {warning}")?;
            }
        }
        UnresolvedMode::Report => {}
    }

    let report = OrphanReport::new(
        &settings.root,
        &settings.dir,
        &outcome.analysis,
        outcome.files.len(),
    )?
    .with_warnings(warnings)
    .with_graph(outcome.graph_text.clone());

    match settings.format {
        OutputFormat::Json => {
            let rendered = ReportRenderer::to_json(&report)?;
            writeln!(stdout, "{rendered}")?;
        }
        OutputFormat::Text => {
            let options = TextOptions {
                verbose: settings.verbose,
                show_warnings: settings.unresolved == UnresolvedMode::Report,
                show_graph: settings.graph != GraphFormat::None,
            };
            writeln!(stdout, "{}", ReportRenderer::to_text(&report, options))
                .context("write report")?;
        }
    }

    if outcome.analysis.has_orphans() || unresolved_failed {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_OK)
    }
}

fn write_validated_inputs(out: &mut dyn Write, outcome: &CheckOutcome) -> std::io::Result<()> {
    let settings = &outcome.settings;
    let lines = [
        "Validated inputs:".to_string(),
        format!("- root: {}", settings.root.display()),
        format!("- dir: {}", settings.dir.display()),
        format!("- ext: {}", settings.extensions),
        format!("- ignore: [{}]", settings.ignore.join(" ")),
        format!(
            "- ignore-check-files: [{}]",
            settings.ignore_check_files.join(" ")
        ),
        format!("- format: {}", settings.format),
        format!("- unresolved: {}", settings.unresolved),
        format!("- graph: {}", settings.graph),
        format!("- max-graph-nodes: {}", settings.max_graph_nodes),
        format!("- workers: {}", settings.workers),
        format!("- scanned markdown files: {}", outcome.files.len()),
        format!("- graph nodes: {}", outcome.graph.node_count()),
        format!("- graph edges: {}", outcome.graph.edge_count()),
        format!("- reachable files: {}", outcome.analysis.reachable.len()),
        format!("- orphan files: {}", outcome.analysis.orphans.len()),
    ];
    writeln!(out, "{}\n", lines.join("\n"))
}
