//! Output reporters (§11): thin formatting wrappers around
//! `engine::TraceResult`.
//!
//! Structurally this is the teacher's `reporters::Format` /
//! `print_findings`/`write_findings` split (a small output-format enum
//! plus a pair of functions that render to a string or write straight to
//! a `Write`), but the teacher's finding/severity/SARIF model (its
//! `sarif.rs`, `ScanInfo`, `PluginSummary`) has no counterpart here — a
//! taint tracer has no "rule violation", only traced flows, so the JSON/
//! DOT/Mermaid graph formats already implemented on `ir::FlowGraph`
//! (`to_json`/`to_dot`/`to_mermaid`) are exposed as-is and a new
//! plain-text summary takes the place of the teacher's ASCII-box finding
//! stats.

use engine::TraceResult;
use ir::InputLabel;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Dot,
    Mermaid,
    Text,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "dot" => Some(Format::Dot),
            "mermaid" | "mmd" => Some(Format::Mermaid),
            "text" | "txt" => Some(Format::Text),
            _ => None,
        }
    }
}

/// Renders `result` in `format`, returning the formatted string.
///
/// `Json` serializes the entire `TraceResult` (sources, tainted
/// variables/functions, stats, errors); `Dot`/`Mermaid` only make sense
/// for the graph, so they render `result.flow_graph` alone.
pub fn render(result: &TraceResult, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(result)?,
        Format::Dot => result.flow_graph.to_dot(),
        Format::Mermaid => result.flow_graph.to_mermaid(),
        Format::Text => summary_text(result),
    })
}

pub fn write_result<W: Write>(mut out: W, result: &TraceResult, format: Format) -> io::Result<()> {
    let rendered = render(result, format).map_err(io::Error::other)?;
    writeln!(out, "{rendered}")
}

fn label_name(label: InputLabel) -> &'static str {
    match label {
        InputLabel::HttpGet => "http_get",
        InputLabel::HttpPost => "http_post",
        InputLabel::HttpCookie => "http_cookie",
        InputLabel::HttpHeader => "http_header",
        InputLabel::HttpBody => "http_body",
        InputLabel::Cli => "cli",
        InputLabel::Environment => "environment",
        InputLabel::File => "file",
        InputLabel::Database => "database",
        InputLabel::Network => "network",
        InputLabel::UserInput => "user_input",
    }
}

/// Counts by `InputLabel` across every discovered source, and the
/// functions with the most distinct tainted parameters, analogous to the
/// teacher's semgrep-style stats box but over this data model.
fn summary_text(result: &TraceResult) -> String {
    let mut by_label: BTreeMap<&'static str, usize> = BTreeMap::new();
    for source in &result.sources {
        for label in &source.labels {
            *by_label.entry(label_name(*label)).or_insert(0) += 1;
        }
    }

    let mut top_functions: Vec<_> = result.tainted_functions.iter().collect();
    top_functions.sort_by(|a, b| b.tainted_params.len().cmp(&a.tainted_params.len()).then(a.name.cmp(&b.name)));

    let mut out = String::new();
    out.push_str("input flow trace summary\n");
    out.push_str(&format!("  files analyzed:        {}\n", result.stats.files_analyzed));
    out.push_str(&format!("  sources found:         {}\n", result.stats.sources_found));
    out.push_str(&format!("  tainted variables:     {}\n", result.stats.tainted_variables_found));
    out.push_str(&format!("  tainted functions:     {}\n", result.stats.tainted_functions_found));
    out.push_str(&format!("  propagation paths:     {}\n", result.stats.propagation_paths));
    out.push_str(&format!("  duration:              {}ms\n", result.stats.analysis_duration_ms));

    if !by_label.is_empty() {
        out.push_str("\nsources by label\n");
        for (label, count) in &by_label {
            out.push_str(&format!("  {label:<14} {count}\n"));
        }
    }

    if !top_functions.is_empty() {
        out.push_str("\ntop tainted functions\n");
        for f in top_functions.iter().take(10) {
            out.push_str(&format!(
                "  {} ({}:{}) - {} tainted param(s)\n",
                f.name,
                f.file_path,
                f.line,
                f.tainted_params.len()
            ));
        }
    }

    if !result.errors.is_empty() {
        out.push_str(&format!("\n{} error(s) during analysis\n", result.errors.len()));
        for e in &result.errors {
            out.push_str(&format!("  {e}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_result() -> TraceResult {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.php"), "<?php\n$id = $_GET['id'];\necho query($id);\n").unwrap();
        engine::trace_directory(dir.path(), &loader::Configuration::default())
    }

    #[test]
    fn format_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(Format::parse("JSON"), Some(Format::Json));
        assert_eq!(Format::parse("mmd"), Some(Format::Mermaid));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn json_render_round_trips_through_serde() {
        let result = sample_result();
        let rendered = render(&result, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("sources").is_some());
        assert!(value.get("flow_graph").is_some());
    }

    #[test]
    fn dot_render_contains_digraph_header() {
        let result = sample_result();
        let rendered = render(&result, Format::Dot).unwrap();
        assert!(rendered.starts_with("digraph FlowGraph"));
    }

    #[test]
    fn text_summary_reports_counts_and_labels() {
        let result = sample_result();
        let rendered = render(&result, Format::Text).unwrap();
        assert!(rendered.contains("files analyzed:        1"));
        assert!(rendered.contains("sources by label"));
        assert!(rendered.contains("http_get"));
    }
}
