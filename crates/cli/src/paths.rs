//! The `paths` subcommand (§10): loads a previously exported JSON result
//! and runs C9's `PathFinder` over its `flow_graph`.

use crate::args::PathsArgs;
use crate::output::write_rendered;
use anyhow::{Context, Result};
use engine::paths::path_is_feasible;
use engine::{GraphPath, PathFinder, TraceResult};
use ir::{FlowGraph, FlowNodeKind};
use std::fs;

pub fn run(args: &PathsArgs) -> Result<()> {
    let content = fs::read_to_string(&args.result)
        .with_context(|| format!("failed to read {}", args.result.display()))?;
    let result: TraceResult =
        serde_json::from_str(&content).context("failed to parse a previously exported trace result")?;

    let finder = PathFinder::new(&result.flow_graph, args.max_depth);

    let source_ids: Vec<String> = match args.source {
        Some(uuid) => vec![FlowGraph::source_node_id(&uuid)],
        None => result.sources.iter().map(|s| FlowGraph::source_node_id(&s.id)).collect(),
    };

    let mut paths: Vec<GraphPath> = source_ids.iter().flat_map(|id| finder.find_all_paths(id)).collect();

    if let Some(to) = &args.to {
        let func_ids: Vec<&str> = result
            .flow_graph
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, FlowNodeKind::Function) && n.label == *to)
            .map(|n| n.id.as_str())
            .collect();
        paths.retain(|p| func_ids.iter().any(|id| p.contains_node(id)));
    }

    // §4.9: a path is feasible unless the conditions guarding it make
    // contradictory null-state claims about the same variable.
    let mut feasible: Vec<(GraphPath, bool)> = paths
        .into_iter()
        .map(|p| {
            let is_feasible = path_is_feasible(&result, &p);
            (p, is_feasible)
        })
        .collect();
    let dropped = feasible.iter().filter(|(_, f)| !f).count();
    if !args.show_infeasible {
        feasible.retain(|(_, f)| *f);
    }

    let rendered = render_paths(&feasible, dropped, args.show_infeasible);
    write_rendered(&rendered, args.output.as_deref())
}

fn render_paths(paths: &[(GraphPath, bool)], dropped: usize, show_infeasible: bool) -> String {
    if paths.is_empty() {
        return "no paths found\n".to_string();
    }
    let mut out = String::new();
    for (i, (path, is_feasible)) in paths.iter().enumerate() {
        let marker = if *is_feasible { "" } else { " [infeasible]" };
        out.push_str(&format!("path {}: {}{}\n", i + 1, path.nodes.join(" -> "), marker));
    }
    if dropped > 0 && !show_infeasible {
        out.push_str(&format!("{dropped} infeasible path(s) dropped; pass --show-infeasible to keep them\n"));
    }
    out
}
