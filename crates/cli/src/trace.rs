//! The `trace` subcommand (§10): runs the orchestrator over a directory
//! and writes the rendered result, in the shape of the teacher's
//! `scan::run_scan`.

use crate::args::TraceArgs;
use crate::{config, output, ui};
use anyhow::{Context, Result};
use tracing::info;

pub fn run(args: &TraceArgs) -> Result<()> {
    ui::print_header();

    let configuration = config::resolve(args).context("failed to resolve configuration")?;

    info!(path = %args.path.display(), workers = configuration.workers, "starting trace");
    let result = engine::trace_directory(&args.path, &configuration);
    info!(
        files_analyzed = result.stats.files_analyzed,
        sources_found = result.stats.sources_found,
        duration_ms = result.stats.analysis_duration_ms,
        "trace complete"
    );

    output::write_trace_result(&result, &args.format, args.output.as_deref())?;

    if !result.errors.is_empty() {
        for err in &result.errors {
            tracing::warn!("{err}");
        }
    }

    Ok(())
}
