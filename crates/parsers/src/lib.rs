//! Parses source files into the materialized AST the tracing engine
//! consumes (§6/§13): `parse_file(path) -> Result<Option<ParsedFile>>` and
//! `detect_language(path) -> Option<&'static str>`, plus the `tree-sitter`
//! plumbing behind them.
//!
//! Deliberately does not carry forward the teacher's Dockerfile/YAML/
//! HCL/JSON "IR-Doc" configuration parsers (`languages::{hcl,dockerfile,
//! yaml,json,generic}`): those target configuration-file scanning, a
//! different feature this crate's distillation and expansion both exclude
//! (see DESIGN.md).

use anyhow::{Context, Result};
use ir::ParsedFile;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub mod languages;
mod tree;

pub use languages::{detect_language, grammar, SUPPORTED};

#[derive(Debug, Default, Serialize)]
pub struct ParserMetrics {
    pub files_parsed: usize,
    pub parse_errors: usize,
    pub files_skipped: usize,
}

/// Reads and parses a single file, returning `None` when the language is
/// unsupported (§7 `UnsupportedLanguage`: file silently skipped) rather
/// than an error.
pub fn parse_file(path: &Path, metrics: Option<&mut ParserMetrics>) -> Result<Option<ParsedFile>> {
    let Some(language) = detect_language(path) else {
        debug!(file = %path.display(), "no grammar for this file, skipping");
        if let Some(m) = metrics {
            m.files_skipped += 1;
        }
        return Ok(None);
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match parse_source(&source, path.to_string_lossy().as_ref(), language) {
        Ok(parsed) => {
            if let Some(m) = metrics {
                m.files_parsed += 1;
            }
            Ok(Some(parsed))
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "parse error");
            if let Some(m) = metrics {
                m.parse_errors += 1;
            }
            Err(e)
        }
    }
}

/// Parses already-read `source` text under a known `language` tag. Exposed
/// separately from `parse_file` so tests and the `paths` CLI subcommand
/// can hand in literal source without touching the filesystem.
pub fn parse_source(source: &str, file_path: &str, language: &str) -> Result<ParsedFile> {
    let grammar = grammar(language)
        .with_context(|| format!("unsupported language tag: {language}"))?;
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(grammar)
        .with_context(|| format!("failed to load {language} grammar"))?;
    let tree = parser
        .parse(source, None)
        .with_context(|| format!("tree-sitter failed to parse {file_path}"))?;
    if tree.root_node().has_error() {
        debug!(file = %file_path, "parse tree contains error nodes, continuing best-effort");
    }
    let ast = tree::build_ast(&tree, source, file_path, language);
    Ok(ParsedFile::new(file_path, language, source.to_string(), ast))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_php_into_an_ast_with_source_attached() {
        let parsed = parse_source("<?php $x = 1;", "a.php", "php").unwrap();
        assert_eq!(parsed.language, "php");
        assert!(!parsed.ast.index.is_empty());
        assert_eq!(parsed.source, "<?php $x = 1;");
    }

    #[test]
    fn unsupported_language_tag_errors_rather_than_panics() {
        assert!(parse_source("x", "a.txt", "brainfuck").is_err());
    }
}
