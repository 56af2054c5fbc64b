//! Common utilities for the `inputtracer` command-line interface. The
//! teacher's glob/`.gitignore`-pattern exclusion layer (`IgnorePattern`,
//! `glob_to_regex`, `is_excluded`) has no counterpart here: `loader`
//! already owns directory-walking exclusion (`Configuration::skip_dirs`/
//! `include_patterns`, §12), so duplicating it at the CLI layer would
//! just be two exclusion mechanisms disagreeing with each other.

pub mod args;
pub mod config;
pub mod output;
pub mod paths;
pub mod trace;
pub mod ui;

/// Initializes `tracing-subscriber` from the CLI's `-v`/`-q` flags,
/// matching the teacher's verbosity wiring: `-q` forces `error`-only,
/// otherwise each `-v` widens the default `info` level by one notch.
pub fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::filter::LevelFilter;

    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
