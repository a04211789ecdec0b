//! Configuration types for the orphan checker.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, the YAML config file, built-in defaults. [`FileConfig`] is the
//! on-disk shape; [`CheckSettings`] is the merged, validated result.

use crate::error::{Error, Result};
use crate::extensions::ExtensionSet;
use crate::utils::{is_within_dir, normalize_abs};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = ".mdorphan.yaml";

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(Error::config_error("--format must be one of: text, json")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// What to do with unresolved local links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedMode {
    /// Print as errors and fail the run
    #[default]
    Fail,
    /// Print as warnings on stderr
    Warn,
    /// Include in the report body
    Report,
    /// Drop silently
    None,
}

impl FromStr for UnresolvedMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            "report" => Ok(Self::Report),
            "none" => Ok(Self::None),
            _ => Err(Error::config_error(
                "--unresolved must be one of: fail, warn, report, none",
            )),
        }
    }
}

impl fmt::Display for UnresolvedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Report => "report",
            Self::None => "none",
        })
    }
}

/// Graph export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    None,
    Dot,
    Mermaid,
}

impl FromStr for GraphFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "dot" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            _ => Err(Error::config_error("--graph must be one of: none, dot, mermaid")),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Dot => "dot",
            Self::Mermaid => "mermaid",
        })
    }
}

/// A list that may be written as a single scalar in YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// On-disk configuration (`.mdorphan.yaml`). Every key is optional;
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FileConfig {
    pub root: Option<String>,
    pub dir: Option<String>,
    pub ext: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub ignore: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub ignore_check_files: Vec<String>,
    pub format: Option<String>,
    pub verbose: Option<bool>,
    pub unresolved: Option<String>,
    pub graph: Option<String>,
    pub workers: Option<usize>,
    pub max_graph_nodes: Option<usize>,
}

impl FileConfig {
    /// Parse YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::parse_error(e.to_string()))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields `Ok(None)` unless `required` is set, which is the
    /// case when the user named the file explicitly.
    pub fn load(path: &Path, required: bool) -> Result<Option<Self>> {
        let abs = normalize_abs(path)?;
        let content = match std::fs::read_to_string(&abs) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    return Err(Error::config_error(format!(
                        "config file does not exist: {}",
                        abs.display()
                    )));
                }
                log::debug!("No config file at {}", abs.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::config_error(format!("read config file: {}", e)));
            }
        };

        let config = Self::from_yaml(&content).map_err(|e| {
            Error::config_error(format!("parse config file {}: {}", abs.display(), e))
        })?;
        log::debug!("Loaded config file {}", abs.display());
        Ok(Some(config))
    }
}

/// Fully merged settings for one orphan check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSettings {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub extensions: ExtensionSet,
    pub ignore: Vec<String>,
    pub ignore_check_files: Vec<String>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub unresolved: UnresolvedMode,
    pub graph: GraphFormat,
    /// Worker cap for graph construction (0 = platform default)
    pub workers: usize,
    /// Skip graph export above this many nodes (0 = no limit)
    pub max_graph_nodes: usize,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            dir: PathBuf::from("."),
            extensions: ExtensionSet::default(),
            ignore: Vec::new(),
            ignore_check_files: Vec::new(),
            format: OutputFormat::default(),
            verbose: false,
            unresolved: UnresolvedMode::default(),
            graph: GraphFormat::default(),
            workers: 0,
            max_graph_nodes: 0,
        }
    }
}

impl CheckSettings {
    /// Defaults overlaid with a config file.
    pub fn from_file(file: &FileConfig) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(root) = non_blank(&file.root) {
            settings.root = PathBuf::from(root);
        }
        if let Some(dir) = non_blank(&file.dir) {
            settings.dir = PathBuf::from(dir);
        }
        if let Some(ext) = non_blank(&file.ext) {
            settings.extensions = ExtensionSet::parse(ext);
        }
        settings.ignore = file.ignore.clone();
        settings.ignore_check_files = file.ignore_check_files.clone();
        if let Some(format) = non_blank(&file.format) {
            settings.format = format.parse()?;
        }
        if let Some(verbose) = file.verbose {
            settings.verbose = verbose;
        }
        if let Some(mode) = non_blank(&file.unresolved) {
            settings.unresolved = mode.parse()?;
        }
        if let Some(graph) = non_blank(&file.graph) {
            settings.graph = graph.parse()?;
        }
        if let Some(workers) = file.workers {
            settings.workers = workers;
        }
        if let Some(max) = file.max_graph_nodes {
            settings.max_graph_nodes = max;
        }
        Ok(settings)
    }

    /// Check the root/dir pair against the filesystem and replace both with
    /// absolute normalized paths.
    pub fn validate(&mut self) -> Result<()> {
        if self.root.to_string_lossy().trim().is_empty() {
            return Err(Error::config_error("--root is required"));
        }
        if self.dir.to_string_lossy().trim().is_empty() {
            self.dir = PathBuf::from(".");
        }

        let dir = normalize_abs(&self.dir)
            .map_err(|e| Error::config_error(format!("resolve --dir: {}", e)))?;
        match std::fs::metadata(&dir) {
            Err(_) => {
                return Err(Error::config_error(format!(
                    "scan directory does not exist: {}",
                    dir.display()
                )));
            }
            Ok(meta) if !meta.is_dir() => {
                return Err(Error::config_error(format!(
                    "--dir must be a directory: {}",
                    dir.display()
                )));
            }
            Ok(_) => {}
        }

        let root = normalize_abs(&self.root)
            .map_err(|e| Error::config_error(format!("resolve --root: {}", e)))?;
        match std::fs::metadata(&root) {
            Err(_) => {
                return Err(Error::config_error(format!(
                    "root file does not exist: {}",
                    root.display()
                )));
            }
            Ok(meta) if meta.is_dir() => {
                return Err(Error::config_error(format!(
                    "--root must be a file: {}",
                    root.display()
                )));
            }
            Ok(_) => {}
        }

        if !is_within_dir(&dir, &root) {
            return Err(Error::config_error(format!(
                "--root must be within --dir: root={} dir={}",
                root.display(),
                dir.display()
            )));
        }

        self.dir = dir;
        self.root = root;
        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
