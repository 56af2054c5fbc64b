//! Tracer orchestrator (C8): walks a source tree, fans files out to a
//! worker pool, merges per-file results into the shared `AnalysisState`,
//! then runs the inter-procedural analyzer (C6) across every file's
//! accumulated function summaries before materializing the flow graph.
//!
//! The spec's "bounded channel + worker pool" (§4.8/§5) is realized with
//! `rayon`'s work-stealing pool: a fresh `ThreadPoolBuilder` is built per
//! call sized to `Configuration::workers` rather than cached behind a
//! single process-wide `OnceLock` (worker count is a per-run config value,
//! not process-wide catalog data, so caching it would ignore later runs'
//! own worker counts — see DESIGN.md). The merge step still funnels every
//! file's private slice through a single `Mutex<AnalysisState>`, matching
//! §5's "single merger holds an exclusive lock for each merge".

use crate::propagator;
use crate::state::AnalysisState;
use ir::{FlowGraph, FunctionSummary, InputSource, ParsedFile, TaintedFunction, TaintedVariable};
use loader::Configuration;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// One file's contribution, pre-merge (§2's "FileResult").
pub struct FileResult {
    pub file_path: String,
    pub language: String,
    pub state: Option<AnalysisState>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceStats {
    pub files_analyzed: usize,
    pub sources_found: usize,
    pub tainted_variables_found: usize,
    pub tainted_functions_found: usize,
    pub propagation_paths: usize,
    pub files_by_language: HashMap<String, usize>,
    pub analysis_duration_ns: u128,
    pub analysis_duration_ms: u128,
}

#[derive(Serialize, Deserialize)]
pub struct TraceResult {
    pub sources: Vec<InputSource>,
    pub tainted_variables: Vec<TaintedVariable>,
    pub tainted_functions: Vec<TaintedFunction>,
    pub flow_graph: FlowGraph,
    pub stats: TraceStats,
    pub errors: Vec<String>,
}

/// Walks `root`, skipping configured directories and unparseable/
/// disabled-language files, returning the surviving file paths plus
/// their detected language tag.
fn discover_files(root: &Path, config: &Configuration) -> Vec<(std::path::PathBuf, String)> {
    let mut out = Vec::new();
    let exclude = |p: &Path| {
        p.file_name()
            .and_then(|n| n.to_str())
            .map(|n| config.should_skip_dir(n) || patterns::is_non_parseable_filename(n))
            .unwrap_or(false)
    };
    let _ = loader::visit(root, &exclude, &mut |path: &Path| {
        if path.is_dir() {
            return Ok(());
        }
        let Some(language) = parsers::detect_language(path) else {
            return Ok(());
        };
        if !config.is_language_enabled(language) {
            return Ok(());
        }
        if !config.include_patterns.is_empty() {
            let text = path.to_string_lossy();
            if !config.include_patterns.iter().any(|pat| text.contains(pat.as_str())) {
                return Ok(());
            }
        }
        out.push((path.to_path_buf(), language.to_string()));
        Ok(())
    });
    out
}

fn parse_all(files: &[(std::path::PathBuf, String)], errors: &Mutex<Vec<String>>) -> Vec<ParsedFile> {
    files
        .par_iter()
        .filter_map(|(path, language)| match parsers::parse_file(path, None) {
            Ok(Some(parsed)) => Some(parsed),
            Ok(None) => None,
            Err(e) => {
                errors
                    .lock()
                    .expect("errors mutex poisoned")
                    .push(format!("{}: parse error: {e}", path.display()));
                let _ = language;
                None
            }
        })
        .collect()
}

/// C6's "for every function definition node encountered during analysis"
/// read literally: one pass over every file's AST collecting
/// `FunctionSummary`s before any cross-call propagation runs, so a call
/// in file A to a function defined in file B resolves regardless of
/// which file a worker happened to analyze first.
fn build_global_summaries(files: &[ParsedFile]) -> HashMap<String, FunctionSummary> {
    let mut summaries = HashMap::new();
    for file in files {
        let (local, _graph) = crate::interproc::build_summaries(&file.ast, &file.language);
        for (name, summary) in local {
            summaries.entry(name).or_insert(summary);
        }
    }
    summaries
}

/// Runs the full tracer over a directory tree per C8's five steps:
/// discover, analyze-in-parallel-and-merge, run C6 globally (folded into
/// the summary-build step above since it must precede propagation, not
/// follow it, for cross-file flows to resolve), build the flow graph,
/// fill stats.
pub fn trace_directory(root: &Path, config: &Configuration) -> TraceResult {
    trace_directory_cancellable(root, config, None)
}

pub fn trace_directory_cancellable(
    root: &Path,
    config: &Configuration,
    cancel: Option<&AtomicBool>,
) -> TraceResult {
    let start = Instant::now();
    config.apply_custom_sources();

    let errors = Mutex::new(Vec::new());
    let discovered = discover_files(root, config);
    let parsed = parse_all(&discovered, &errors);
    let global_summaries = build_global_summaries(&parsed);

    let shared = Mutex::new(AnalysisState::new());
    let files_by_language: Mutex<HashMap<String, usize>> = Mutex::new(HashMap::new());
    let files_analyzed = Mutex::new(0usize);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.max(1))
        .build()
        .expect("failed to build worker pool");

    pool.install(|| {
        parsed.par_iter().for_each(|file| {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
            }
            let (state, _scope) = propagator::analyze_file_with_summaries(
                &file.ast,
                &file.language,
                config.max_depth.max(1),
                &global_summaries,
            );
            shared.lock().expect("analysis state mutex poisoned").merge_from(state);
            *files_by_language
                .lock()
                .expect("language stats mutex poisoned")
                .entry(file.language.clone())
                .or_insert(0) += 1;
            *files_analyzed.lock().expect("files_analyzed mutex poisoned") += 1;
        });
    });

    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            errors.lock().expect("errors mutex poisoned").push("cancelled".to_string());
        }
    }

    let state = shared.into_inner().expect("analysis state mutex poisoned");
    let flow_graph = state.build_flow_graph();
    let elapsed = start.elapsed();

    let stats = TraceStats {
        files_analyzed: files_analyzed.into_inner().expect("files_analyzed mutex poisoned"),
        sources_found: state.sources().len(),
        tainted_variables_found: state.tainted_variables().len(),
        tainted_functions_found: state.tainted_functions().len(),
        propagation_paths: state.propagation_path_count(),
        files_by_language: files_by_language.into_inner().expect("language stats mutex poisoned"),
        analysis_duration_ns: elapsed.as_nanos(),
        analysis_duration_ms: elapsed.as_millis(),
    };

    TraceResult {
        sources: state.sources().into_iter().cloned().collect(),
        tainted_variables: state.tainted_variables().into_iter().cloned().collect(),
        tainted_functions: state.tainted_functions().into_iter().cloned().collect(),
        flow_graph,
        stats,
        errors: errors.into_inner().expect("errors mutex poisoned"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn traces_a_directory_of_php_files_end_to_end() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.php"), "<?php\n$id = $_GET['id'];\necho query($id);\n").unwrap();
        let config = Configuration::default();
        let result = trace_directory(dir.path(), &config);
        assert_eq!(result.stats.files_analyzed, 1);
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.tainted_variables.len(), 1);
        assert_eq!(result.tainted_functions.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn skips_configured_skip_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/dep.php"), "<?php\n$x = $_GET['x'];\n").unwrap();
        fs::write(dir.path().join("a.php"), "<?php\n$y = 1;\n").unwrap();
        let config = Configuration::default();
        let result = trace_directory(dir.path(), &config);
        assert_eq!(result.stats.files_analyzed, 1);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn cross_file_function_summary_enables_interprocedural_propagation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("helpers.php"), "<?php\nfunction identity($x) {\n  return $x;\n}\n").unwrap();
        fs::write(
            dir.path().join("main.php"),
            "<?php\n$id = $_GET['id'];\n$safe = identity($id);\n",
        )
        .unwrap();
        let config = Configuration::default();
        let result = trace_directory(dir.path(), &config);
        assert!(
            result.tainted_variables.iter().any(|v| v.name == "$safe"),
            "cross-file summary for identity() should propagate taint to $safe"
        );
    }

    #[test]
    fn parse_errors_are_recorded_and_do_not_halt_the_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.php"), "<?php\n$id = $_GET['id'];\n").unwrap();
        fs::write(dir.path().join("b.txt"), "not a supported language").unwrap();
        let config = Configuration::default();
        let result = trace_directory(dir.path(), &config);
        assert_eq!(result.stats.files_analyzed, 1, "the .txt file should be silently skipped, not errored");
    }
}
