//! CLI-layer configuration overlay: loads `loader::Configuration` (the
//! tracer's own input, §12) and applies `trace` flags on top of it, in
//! the shape of the teacher's `load_config`/flag-merge split — the
//! config *file* format itself now lives in `loader::config` since it is
//! the tracer's input, not a CLI-only concern.

use crate::args::TraceArgs;
use anyhow::Result;
use loader::Configuration;

pub fn resolve(args: &TraceArgs) -> Result<Configuration> {
    let mut config = loader::load_config(args.config.as_deref())?;

    if let Some(workers) = args.workers {
        config.workers = workers.max(1);
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if !args.lang.is_empty() {
        config.languages = args.lang.clone();
    }
    config.skip_dirs.extend(args.skip.iter().cloned());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> TraceArgs {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            inner: TraceArgs,
        }
        Wrapper::parse_from(argv).inner
    }

    #[test]
    fn overlays_workers_and_max_depth_flags() {
        let args = parse(&["inputtracer", ".", "--workers", "2", "--max-depth", "9"]);
        let config = resolve(&args).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.max_depth, 9);
    }

    #[test]
    fn extra_skip_dirs_are_appended_to_the_default_set() {
        let args = parse(&["inputtracer", ".", "--skip", "fixtures"]);
        let config = resolve(&args).unwrap();
        assert!(config.should_skip_dir("fixtures"));
        assert!(config.should_skip_dir("node_modules"));
    }
}
