//! Command-line arguments and settings merge

use clap::Parser;
use mdorphan_core::prelude::*;
use mdorphan_core::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

/// mdorphan - find markdown files no link path reaches from a root document
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mdorphan", author, version, about, long_about = None)]
pub struct Args {
    /// Root markdown file (required, here or in the config file)
    #[arg(long, value_name = "FILE")]
    pub root: Option<PathBuf>,

    /// Directory to scan recursively (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Comma-separated markdown extensions
    #[arg(long, value_name = "EXTS")]
    pub ext: Option<String>,

    /// Ignore a path prefix or glob relative to --dir (repeatable)
    #[arg(long = "ignore", value_name = "RULE")]
    pub ignore: Vec<String>,

    /// Skip the orphan check for a file, by relative path or file name (repeatable)
    #[arg(long = "ignore-check-file", value_name = "RULE")]
    pub ignore_check_files: Vec<String>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print validated inputs and a summary (`--verbose=false` overrides the config file)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verbose: Option<bool>,

    /// Unresolved-link mode: fail, warn, report or none
    #[arg(long, value_name = "MODE")]
    pub unresolved: Option<UnresolvedMode>,

    /// Graph export: none, dot or mermaid
    #[arg(long, value_name = "FORMAT")]
    pub graph: Option<GraphFormat>,

    /// Max concurrent graph build workers (0 uses all cores)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Skip graph export above this many nodes (0 disables the limit)
    #[arg(long, value_name = "N")]
    pub max_graph_nodes: Option<usize>,

    /// Config file path (default: .mdorphan.yaml when present)
    #[arg(long, env = "MDORPHAN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Merge flags over the config file over defaults, then validate.
    pub fn load_settings(&self) -> Result<CheckSettings> {
        let (path, required) = match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        let file = FileConfig::load(&path, required)?.unwrap_or_default();

        let mut settings = CheckSettings::from_file(&file)?;
        self.apply_to(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay explicitly given flags. Repeatable rules extend the file's lists.
    pub fn apply_to(&self, settings: &mut CheckSettings) {
        if let Some(root) = &self.root {
            settings.root = root.clone();
        }
        if let Some(dir) = &self.dir {
            settings.dir = dir.clone();
        }
        if let Some(ext) = &self.ext {
            settings.extensions = ExtensionSet::parse(ext);
        }
        settings.ignore.extend(self.ignore.iter().cloned());
        settings
            .ignore_check_files
            .extend(self.ignore_check_files.iter().cloned());
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(mode) = self.unresolved {
            settings.unresolved = mode;
        }
        if let Some(graph) = self.graph {
            settings.graph = graph;
        }
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
        if let Some(max) = self.max_graph_nodes {
            settings.max_graph_nodes = max;
        }
    }
}
