//! Command-line surface (§10): `trace` runs the tracer over a directory
//! and prints the result; `paths` re-derives C9 path queries from a
//! previously exported JSON result. Shaped after the teacher's
//! `Cli`/`Commands`/per-command-`Args` split in `crates/cli/src/args.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inputtracer", version, about = "Multi-language static user-input flow tracer")]
pub struct Cli {
    /// Increase log verbosity; repeatable (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output below error level.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trace untrusted-input flows across a source tree.
    Trace(TraceArgs),
    /// Derive concrete paths from a previously exported JSON result.
    Paths(PathsArgs),
}

#[derive(clap::Args)]
pub struct TraceArgs {
    /// Root directory to analyze.
    pub path: PathBuf,

    /// TOML configuration file (defaults to the user config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: json, dot, mermaid, or text.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Worker thread count (defaults to available parallelism).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Maximum intra-procedural propagation depth.
    #[arg(long = "max-depth")]
    pub max_depth: Option<usize>,

    /// Restrict analysis to these languages (repeatable); defaults to all
    /// supported languages.
    #[arg(long = "lang")]
    pub lang: Vec<String>,

    /// Additional directory names to skip (repeatable), added to the
    /// catalog's default skip set.
    #[arg(long = "skip")]
    pub skip: Vec<String>,

    /// Write the rendered result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct PathsArgs {
    /// A JSON file previously produced by `trace --format json`.
    pub result: PathBuf,

    /// The input source's uuid to start from. Defaults to every source in
    /// the result.
    #[arg(long)]
    pub source: Option<uuid::Uuid>,

    /// Only keep paths that pass through this function's flow-graph node.
    #[arg(long)]
    pub to: Option<String>,

    /// Stop a path once it exceeds this many nodes.
    #[arg(long = "max-depth", default_value_t = 25)]
    pub max_depth: usize,

    /// Keep infeasible paths in the output instead of dropping them
    /// (still annotated as infeasible).
    #[arg(long = "show-infeasible")]
    pub show_infeasible: bool,

    /// Write the rendered paths here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
