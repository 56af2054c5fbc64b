//! Path & condition derivations (C9), path half: a DFS path finder over
//! the completed `FlowGraph` (§4.9).
//!
//! Nothing here mutates `AnalysisState` — it runs once, after C7 has
//! built the final graph, which is why it borrows the graph rather than
//! taking ownership: callers typically run several queries (one per
//! `--source`, one per `--to`) against the same materialized result.

use crate::conditions::{self, Condition};
use crate::orchestrator::TraceResult;
use ir::{FlowEdge, FlowGraph, FlowNodeKind};
use std::collections::{HashMap, HashSet};

/// One DFS leaf: the node ids visited in order, plus the edges taken to
/// reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath {
    pub nodes: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

impl GraphPath {
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|n| n == node_id)
    }
}

pub struct PathFinder<'g> {
    graph: &'g FlowGraph,
    max_depth: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g FlowGraph, max_depth: usize) -> Self {
        Self { graph, max_depth }
    }

    /// DFS from `source_id` with a per-stack-frame `visited` set that is
    /// reset on backtrack (so the same node can appear on two sibling
    /// branches), recording a path copy at every leaf (no outgoing edges)
    /// or once the stack depth exceeds `max_depth` (§4.9).
    pub fn find_all_paths(&self, source_id: &str) -> Vec<GraphPath> {
        if !self.graph.has_node(source_id) {
            return Vec::new();
        }
        let adjacency = self.graph.adjacency();
        let mut results = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut node_stack = vec![source_id.to_string()];
        let mut edge_stack: Vec<FlowEdge> = Vec::new();
        self.dfs(source_id, &adjacency, &mut visited, &mut node_stack, &mut edge_stack, &mut results);
        results
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        current: &str,
        adjacency: &HashMap<&str, Vec<&FlowEdge>>,
        visited: &mut HashSet<String>,
        node_stack: &mut Vec<String>,
        edge_stack: &mut Vec<FlowEdge>,
        results: &mut Vec<GraphPath>,
    ) {
        visited.insert(current.to_string());

        let neighbors: Vec<&&FlowEdge> = adjacency
            .get(current)
            .map(|edges| edges.iter().filter(|e| !visited.contains(e.to.as_str())).collect())
            .unwrap_or_default();

        if neighbors.is_empty() || node_stack.len() > self.max_depth {
            results.push(GraphPath {
                nodes: node_stack.clone(),
                edges: edge_stack.clone(),
            });
        } else {
            for edge in neighbors {
                node_stack.push(edge.to.clone());
                edge_stack.push((*edge).clone());
                self.dfs(&edge.to.clone(), adjacency, visited, node_stack, edge_stack, results);
                edge_stack.pop();
                node_stack.pop();
            }
        }

        // Reset on backtrack: a node visited down one branch must still be
        // reachable from a sibling branch explored afterward.
        visited.remove(current);
    }

    /// Every path starting from a `source`-typed node that passes through
    /// `func_id` anywhere along it.
    pub fn find_paths_to_function(&self, func_id: &str) -> Vec<GraphPath> {
        self.graph
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, FlowNodeKind::Source))
            .flat_map(|n| self.find_all_paths(&n.id))
            .filter(|p| p.contains_node(func_id))
            .collect()
    }
}

/// Resolves a flow-graph node id back to the `(file_path, line)` it was
/// recorded at, by looking the id up among the taint entities a
/// `TraceResult` already carries — the graph itself only stores a label,
/// not a source location.
fn node_location<'r>(result: &'r TraceResult, node_id: &str) -> Option<(&'r str, usize)> {
    if node_id.starts_with("src:") {
        return result
            .sources
            .iter()
            .find(|s| FlowGraph::source_node_id(&s.id) == node_id)
            .map(|s| (s.location.file_path.as_str(), s.location.line));
    }
    if node_id.starts_with("var:") {
        return result
            .tainted_variables
            .iter()
            .find(|v| FlowGraph::variable_node_id(&v.name, &v.location.file_path) == node_id)
            .map(|v| (v.location.file_path.as_str(), v.location.line));
    }
    if node_id.starts_with("func:") {
        return result
            .tainted_functions
            .iter()
            .find(|f| FlowGraph::function_node_id(&f.name, &f.file_path) == node_id)
            .map(|f| (f.file_path.as_str(), f.line));
    }
    None
}

/// Feasibility of one candidate path (§4.9): for every file a path's
/// nodes land in, reads that file's source text, extracts the conditions
/// guarding lines up to the furthest point the path reaches there, and
/// checks the combined set for contradictory null-state claims about the
/// same variable. Unreadable files (moved/deleted since the result was
/// exported) contribute no conditions rather than failing the check.
pub fn path_is_feasible(result: &TraceResult, path: &GraphPath) -> bool {
    let mut max_line_by_file: HashMap<&str, usize> = HashMap::new();
    for node_id in &path.nodes {
        if let Some((file, line)) = node_location(result, node_id) {
            let entry = max_line_by_file.entry(file).or_insert(line);
            if line > *entry {
                *entry = line;
            }
        }
    }

    let mut all_conditions: Vec<Condition> = Vec::new();
    for (file, max_line) in &max_line_by_file {
        let Ok(source) = std::fs::read_to_string(file) else { continue };
        all_conditions.extend(conditions::extract_conditions(&source).into_iter().filter(|c| c.line <= *max_line));
    }

    let refs: Vec<&Condition> = all_conditions.iter().collect();
    conditions::is_feasible(&refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir::{FlowEdgeKind, FlowNode};

    fn graph() -> FlowGraph {
        let mut g = FlowGraph::default();
        g.nodes.push(FlowNode { id: "src:1".into(), kind: FlowNodeKind::Source, label: "$_GET".into() });
        g.nodes.push(FlowNode { id: "var:id:a.php".into(), kind: FlowNodeKind::Variable, label: "$id".into() });
        g.nodes.push(FlowNode { id: "func:query:a.php".into(), kind: FlowNodeKind::Function, label: "query".into() });
        g.edges.push(FlowEdge { from: "src:1".into(), to: "var:id:a.php".into(), kind: FlowEdgeKind::Taint });
        g.edges.push(FlowEdge { from: "src:1".into(), to: "func:query:a.php".into(), kind: FlowEdgeKind::Call });
        g
    }

    #[test]
    fn finds_every_leaf_path_from_a_source() {
        let g = graph();
        let finder = PathFinder::new(&g, 10);
        let paths = finder.find_all_paths("src:1");
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().any(|p| p.contains_node("var:id:a.php")));
        assert!(paths.iter().any(|p| p.contains_node("func:query:a.php")));
    }

    #[test]
    fn unknown_source_returns_no_paths() {
        let g = graph();
        let finder = PathFinder::new(&g, 10);
        assert!(finder.find_all_paths("src:missing").is_empty());
    }

    #[test]
    fn find_paths_to_function_filters_by_terminal_node() {
        let g = graph();
        let finder = PathFinder::new(&g, 10);
        let paths = finder.find_paths_to_function("func:query:a.php");
        assert_eq!(paths.len(), 1);
        assert!(paths[0].contains_node("func:query:a.php"));
    }

    #[test]
    fn depth_cutoff_truncates_long_chains() {
        let mut g = FlowGraph::default();
        for i in 0..5 {
            g.nodes.push(FlowNode { id: format!("n{i}"), kind: FlowNodeKind::Variable, label: format!("v{i}") });
        }
        for i in 0..4 {
            g.edges.push(FlowEdge { from: format!("n{i}"), to: format!("n{}", i + 1), kind: FlowEdgeKind::Assignment });
        }
        let finder = PathFinder::new(&g, 2);
        let paths = finder.find_all_paths("n0");
        assert_eq!(paths.len(), 1);
        assert!(paths[0].nodes.len() <= 4, "path should be cut off past max_depth, got {:?}", paths[0].nodes);
    }
}
