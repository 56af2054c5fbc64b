//! Terminal banner for the CLI, in the shape of the teacher's
//! `ui::print_header`. The teacher's `ProgressBar`/`print_plugin_status`
//! are dropped: `engine::trace_directory` runs as a single blocking call
//! with no per-file progress callback to drive a bar from, and there is
//! no plugin concept in this tracer.

pub fn print_header() {
    let version = env!("CARGO_PKG_VERSION");
    let spaces = " ".repeat(24usize.saturating_sub(version.len()));
    eprintln!(
        r#"
    ╭──────────────────────────────────────╮
    │                                      │
    │        INPUTTRACER  FLOW  TOOL       │
    │                                      │
    │     Multi-language static user-      │
    │     input flow tracer                │
    │     Version: {version}{spaces}│
    │                                      │
    ╰──────────────────────────────────────╯
"#
    );
}
