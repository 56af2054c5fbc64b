//! The input-flow graph materialized from the final analysis state (C7).
//!
//! Node ids follow the `"kind:value"` convention resolved in DESIGN.md
//! (Open Question, §9): `src:<uuid>`, `var:<name>:<file>`,
//! `func:<name>:<file>`. The same convention is used for both nodes and
//! edge endpoints, so the graph's referential-integrity invariant (every
//! edge endpoint is a valid node id) is just a string-equality check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlowNodeKind {
    Source,
    Variable,
    Function,
    Parameter,
    Carrier,
    Property,
    Param,
    Return,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlowEdgeKind {
    Assignment,
    Parameter,
    Return,
    Property,
    ArraySet,
    ArrayGet,
    MethodCall,
    Constructor,
    Framework,
    Concatenate,
    Destructure,
    Iteration,
    Conditional,
    Call,
    DataFlow,
    Taint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub kind: FlowNodeKind,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub kind: FlowEdgeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn source_node_id(id: &uuid::Uuid) -> String {
        format!("src:{id}")
    }

    pub fn variable_node_id(name: &str, file_path: &str) -> String {
        format!("var:{name}:{file_path}")
    }

    pub fn function_node_id(name: &str, file_path: &str) -> String {
        format!("func:{name}:{file_path}")
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Adjacency list keyed by node id, used by the C9 path finder.
    pub fn adjacency(&self) -> std::collections::HashMap<&str, Vec<&FlowEdge>> {
        let mut adj: std::collections::HashMap<&str, Vec<&FlowEdge>> =
            std::collections::HashMap::new();
        for edge in &self.edges {
            adj.entry(edge.from.as_str()).or_default().push(edge);
        }
        adj
    }

    /// Exports the graph to DOT format using the canonical colors/styles
    /// from §6.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph FlowGraph {\n");
        for node in &self.nodes {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\", fillcolor=\"{}\", style=filled];\n",
                node.id,
                node.label,
                node_color(node.kind)
            ));
        }
        for edge in &self.edges {
            let (style, color) = edge_style(edge.kind);
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [style={}, color={}];\n",
                edge.from, edge.to, style, color
            ));
        }
        out.push('}');
        out
    }

    /// Exports the graph to Mermaid format.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");
        for node in &self.nodes {
            out.push_str(&format!("    {}[\"{}\"]\n", sanitize_id(&node.id), node.label));
        }
        for edge in &self.edges {
            out.push_str(&format!(
                "    {} --> {}\n",
                sanitize_id(&edge.from),
                sanitize_id(&edge.to)
            ));
        }
        out
    }

    /// Exports the graph to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn node_color(kind: FlowNodeKind) -> &'static str {
    match kind {
        FlowNodeKind::Source => "#ff6b6b",
        FlowNodeKind::Variable => "#4ecdc4",
        FlowNodeKind::Function => "#45b7d1",
        FlowNodeKind::Parameter | FlowNodeKind::Param => "#96ceb4",
        _ => "#f9f9f9",
    }
}

fn edge_style(kind: FlowEdgeKind) -> (&'static str, &'static str) {
    match kind {
        FlowEdgeKind::Assignment => ("solid", "black"),
        FlowEdgeKind::Call => ("dashed", "blue"),
        FlowEdgeKind::Return => ("dotted", "green"),
        FlowEdgeKind::Taint => ("bold", "red"),
        _ => ("solid", "gray"),
    }
}
