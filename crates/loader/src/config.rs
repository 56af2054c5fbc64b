//! `Configuration` (§6/§0): languages, depth/worker limits, custom
//! sources, skip directories, include patterns. Loaded from an optional
//! TOML file plus CLI flags, in the shape of the teacher's
//! `crates/cli/src/config.rs` (`config_dir()`, `load_config`/
//! `save_config`), but living in `loader` since it is the tracer's own
//! input, not a CLI-only concern — `engine::orchestrator` takes it
//! directly.

use anyhow::{Context, Result};
use ir::{InputLabel, SourceType};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, str::FromStr};

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("inputtracer")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("inputtracer")
}

fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// A user-supplied source definition (§4.1: "registering custom
/// definitions at startup"), the TOML-friendly shape of
/// `patterns::SourceDefinition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSourceSpec {
    pub name: String,
    pub pattern: String,
    pub language: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub node_types: Vec<String>,
    #[serde(default)]
    pub key_extractor: Option<String>,
}

fn parse_label(s: &str) -> Option<InputLabel> {
    match s {
        "http_get" => Some(InputLabel::HttpGet),
        "http_post" => Some(InputLabel::HttpPost),
        "http_cookie" => Some(InputLabel::HttpCookie),
        "http_header" => Some(InputLabel::HttpHeader),
        "http_body" => Some(InputLabel::HttpBody),
        "cli" => Some(InputLabel::Cli),
        "environment" => Some(InputLabel::Environment),
        "file" => Some(InputLabel::File),
        "database" => Some(InputLabel::Database),
        "network" => Some(InputLabel::Network),
        "user_input" => Some(InputLabel::UserInput),
        _ => None,
    }
}

fn parse_source_type(s: &str) -> SourceType {
    match s {
        "http_get" => SourceType::HttpGet,
        "http_post" => SourceType::HttpPost,
        "http_body" => SourceType::HttpBody,
        "http_json" => SourceType::HttpJson,
        "http_header" => SourceType::HttpHeader,
        "http_cookie" => SourceType::HttpCookie,
        "http_path" => SourceType::HttpPath,
        "http_file" => SourceType::HttpFile,
        "http_request" => SourceType::HttpRequest,
        "session" => SourceType::Session,
        "cli_arg" => SourceType::CliArg,
        "env_var" => SourceType::EnvVar,
        "stdin" => SourceType::Stdin,
        "file" => SourceType::File,
        "database" => SourceType::Database,
        "network" => SourceType::Network,
        "user_input" => SourceType::UserInput,
        _ => SourceType::Unknown,
    }
}

impl CustomSourceSpec {
    pub fn into_definition(self) -> patterns::SourceDefinition {
        let source_type = self.source_type.as_deref().map(parse_source_type).unwrap_or(SourceType::UserInput);
        let labels: Vec<InputLabel> = self.labels.iter().filter_map(|l| parse_label(l)).collect();
        let mut def = patterns::SourceDefinition::new(
            &self.name,
            &self.pattern,
            &self.language,
            source_type,
            &labels,
            &self.description,
        );
        if !self.node_types.is_empty() {
            let refs: Vec<&str> = self.node_types.iter().map(String::as_str).collect();
            def = def.with_node_types(&refs);
        }
        if let Some(ke) = &self.key_extractor {
            def = def.with_key_extractor(ke);
        }
        def
    }
}

fn default_max_depth() -> usize {
    engine_default_max_depth()
}

/// Kept as a free function (rather than importing `engine`, which already
/// depends on `loader`) to avoid a crate cycle; mirrors
/// `engine::propagator::DEFAULT_MAX_DEPTH`.
fn engine_default_max_depth() -> usize {
    5
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn default_skip_dirs() -> Vec<String> {
    patterns::DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_include_patterns() -> Vec<String> {
    Vec::new()
}

fn default_languages() -> Vec<String> {
    parsers::SUPPORTED.iter().map(|s| s.to_string()).collect()
}

/// Tracer configuration (§6's `Configuration` shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub custom_sources: Vec<CustomSourceSpec>,
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            max_depth: default_max_depth(),
            workers: default_workers(),
            custom_sources: Vec::new(),
            skip_dirs: default_skip_dirs(),
            include_patterns: default_include_patterns(),
        }
    }
}

impl Configuration {
    /// Registers every `custom_sources` entry into the `patterns` catalog.
    /// Meant to run exactly once, before any file is analyzed (§9).
    pub fn apply_custom_sources(&self) {
        for spec in self.custom_sources.clone() {
            patterns::register_custom_source(spec.into_definition());
        }
    }

    pub fn is_language_enabled(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    pub fn should_skip_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }
}

impl FromStr for Configuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse configuration TOML")
    }
}

/// Loads configuration from `path`, falling back to defaults if `path` is
/// `None` and the user config file does not exist.
pub fn load_config(path: Option<&std::path::Path>) -> Result<Configuration> {
    let resolved = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path(),
    };
    if !resolved.exists() {
        return Ok(Configuration::default());
    }
    let content = fs::read_to_string(&resolved)
        .with_context(|| format!("failed to read {}", resolved.display()))?;
    content.parse()
}

pub fn save_config(config: &Configuration, path: Option<&std::path::Path>) -> Result<()> {
    let resolved = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path(),
    };
    if let Some(dir) = resolved.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let data = toml::to_string_pretty(config).context("failed to serialize configuration")?;
    fs::write(&resolved, data).with_context(|| format!("failed to write {}", resolved.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_covers_every_supported_language() {
        let cfg = Configuration::default();
        assert!(cfg.is_language_enabled("php"));
        assert!(cfg.is_language_enabled("rust"));
        assert_eq!(cfg.max_depth, 5);
    }

    #[test]
    fn default_skip_dirs_includes_vendor_and_node_modules() {
        let cfg = Configuration::default();
        assert!(cfg.should_skip_dir("node_modules"));
        assert!(cfg.should_skip_dir(".git"));
        assert!(!cfg.should_skip_dir("src"));
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Configuration {
            max_depth: 9,
            workers: 4,
            ..Configuration::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Configuration = text.parse().unwrap();
        assert_eq!(back.max_depth, 9);
        assert_eq!(back.workers, 4);
    }

    #[test]
    fn custom_source_spec_converts_to_a_catalog_definition() {
        let spec = CustomSourceSpec {
            name: "custom_loader_test_xyz".into(),
            pattern: r"custom_input\(\)".into(),
            language: "php".into(),
            source_type: Some("user_input".into()),
            labels: vec!["user_input".into()],
            description: "test".into(),
            node_types: vec![],
            key_extractor: None,
        };
        let def = spec.into_definition();
        assert_eq!(def.name, "custom_loader_test_xyz");
        assert_eq!(def.language, "php");
    }
}
