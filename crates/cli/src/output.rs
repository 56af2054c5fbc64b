//! Writes an `engine::TraceResult` to a destination using `reporters`,
//! in the shape of the teacher's thin `output::print_findings` wrapper.

use anyhow::{anyhow, Result};
use engine::TraceResult;
use reporters::Format;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn write_trace_result(result: &TraceResult, format: &str, output: Option<&Path>) -> Result<()> {
    let format = Format::parse(format).ok_or_else(|| anyhow!("unknown output format: {format}"))?;
    let rendered = reporters::render(result, format)?;
    write_rendered(&rendered, output)
}

pub fn write_rendered(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered).map_err(Into::into),
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{rendered}")?;
            Ok(())
        }
    }
}
