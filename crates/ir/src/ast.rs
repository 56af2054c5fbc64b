//! Generic AST representation produced by `parsers` from a tree-sitter
//! parse tree.
//!
//! This is the "consumed AST abstraction" the tracing engine is built
//! against: a materialized, owned tree (kind, span, start/end points,
//! children, parent) rather than a borrowed `tree_sitter::Node`. Building it
//! once per file lets the rest of the engine stay independent of the
//! tree-sitter lifetime and grammar-specific node shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    pub file: String,
    /// 1-indexed start line.
    pub line: usize,
    /// 0-indexed start column (codepoint-counted).
    pub column: usize,
    /// 1-indexed end line.
    pub end_line: usize,
    /// 0-indexed end column (codepoint-counted).
    pub end_column: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstNode {
    /// Incremental unique identifier of the node within the file.
    pub id: usize,
    /// Reference to the parent node, if any.
    pub parent: Option<usize>,
    /// Grammar node kind as reported by the parser ("call_expression", ...).
    pub kind: String,
    /// Value associated with the node (identifier text, literal, etc.).
    pub value: JsonValue,
    /// Node children, preserving structural context.
    pub children: Vec<AstNode>,
    /// Location metadata.
    pub meta: Meta,
}

impl AstNode {
    pub fn text_value(&self) -> Option<&str> {
        self.value.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAst {
    pub file_path: String,
    pub language: String,
    /// Root nodes of the AST.
    pub nodes: Vec<AstNode>,
    /// Flat node index ordered by `id`.
    pub index: Vec<AstNode>,
}

impl FileAst {
    pub fn new(file_path: String, language: String) -> Self {
        Self {
            file_path,
            language,
            nodes: Vec::new(),
            index: Vec::new(),
        }
    }

    pub fn push(&mut self, node: AstNode) {
        self.collect(&node);
        self.nodes.push(node);
    }

    fn collect(&mut self, node: &AstNode) {
        if node.id == self.index.len() {
            self.index.push(node.clone());
        } else if node.id < self.index.len() {
            self.index[node.id] = node.clone();
        } else {
            self.index.push(node.clone());
        }
        for child in &node.children {
            self.collect(child);
        }
    }

    /// Gets the parent node of `id`, if any.
    pub fn parent(&self, id: usize) -> Option<&AstNode> {
        self.index
            .get(id)
            .and_then(|n| n.parent.and_then(|p| self.index.get(p)))
    }

    /// Returns the direct children of node `id`.
    pub fn children(&self, id: usize) -> Vec<&AstNode> {
        self.index
            .get(id)
            .map(|n| {
                n.children
                    .iter()
                    .filter_map(|c| self.index.get(c.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Depth-first pre-order iteration over every node in the tree.
    pub fn walk_preorder(&self) -> impl Iterator<Item = &AstNode> {
        self.index.iter()
    }

    /// Exports the AST to DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph AST {\n");
        for node in &self.index {
            let label = match &node.value {
                JsonValue::String(s) => format!("{}:{}", node.kind, s),
                _ => node.kind.clone(),
            };
            out.push_str(&format!("    {} [label=\"{}\"];\n", node.id, label));
            for child in &node.children {
                out.push_str(&format!("    {} -> {};\n", node.id, child.id));
            }
        }
        out.push('}');
        out
    }

    /// Exports the AST to Mermaid format.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");
        for node in &self.index {
            let label = match &node.value {
                JsonValue::String(s) => format!("{}:{}", node.kind, s),
                _ => node.kind.clone(),
            };
            out.push_str(&format!("    {}[\"{}\"]\n", node.id, label));
            for child in &node.children {
                out.push_str(&format!("    {} --> {}\n", node.id, child.id));
            }
        }
        out
    }

    /// Exports the AST to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
