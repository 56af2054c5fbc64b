//! AST extractor (C3): per-language-aware readers that yield `Assignment`
//! and `Call` records from the materialized AST (§4.3), plus the
//! boundary-aware `expression_contains` anti-substring test.
//!
//! There is a base (language-agnostic) implementation driven entirely by
//! the catalog's node-kind tables (§4.1); "language overrides" are just
//! that table differing per language; no per-language Rust code is
//! required beyond the catalog data itself.

use ir::{FileAst, Location};
use patterns::catalog::NodeKindTable;

pub use crate::varref::{expression_contains, VarRef};

#[derive(Debug, Clone)]
pub struct Assignment {
    pub lhs: String,
    /// AST node id of the right-hand side expression.
    pub rhs_node: usize,
    pub rhs_text: String,
    /// Span of the right-hand side alone, narrower than `location` — used
    /// to decide whether a source match found elsewhere in the file falls
    /// inside this particular assignment's value.
    pub rhs_location: Location,
    pub scope_name: String,
    pub location: Location,
    pub snippet: String,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub expression_text: String,
    pub scope_name: String,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct CallArgument {
    pub name: Option<String>,
    pub node: usize,
    pub text: String,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<CallArgument>,
    pub scope_name: String,
    pub location: Location,
}

const ASSIGN_OP_KINDS: &[&str] = &["=", ":=", "<-"];

pub(crate) fn location_of(node: &ir::AstNode) -> Location {
    let loc = Location::new(node.meta.file.clone(), node.meta.line, node.meta.column)
        .with_end(node.meta.end_line, node.meta.end_column);
    match node.text_value() {
        Some(text) => loc.with_snippet(text),
        None => loc,
    }
}

/// Anonymous tokens in tree-sitter grammars have a kind equal to their own
/// literal text (`"("`, `","`, `"="`); named nodes have alphabetic/`_`
/// snake_case kinds. This tells the two apart without per-grammar tables.
fn is_punctuation(node: &ir::AstNode) -> bool {
    !node
        .kind
        .chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false)
}

fn is_identifier_like(node: &ir::AstNode, table: &NodeKindTable) -> bool {
    table.identifiers.iter().any(|k| k == &node.kind)
        || node.kind.contains("identifier")
        || node.kind == "variable_name"
        || node.kind.ends_with("_pattern")
}

fn is_assign_operator(node: &ir::AstNode) -> bool {
    ASSIGN_OP_KINDS.contains(&node.kind.as_str())
}

/// Strips `let`/`const`/`var`/`mut` declaration keywords and, per
/// language, a type annotation from a textual LHS fallback (§4.3).
fn strip_lhs_decoration(lhs: &str, language: &str) -> String {
    let mut s = lhs.trim();
    for kw in ["let mut ", "let ", "const ", "var ", "mut "] {
        if let Some(rest) = s.strip_prefix(kw) {
            s = rest.trim();
        }
    }
    match language {
        "rust" | "typescript" | "tsx" => {
            // "x: i32" -> "x": the annotation lives after the colon.
            s.split(':').next().unwrap_or(s).trim().to_string()
        }
        "java" | "c" | "cpp" | "c_sharp" => {
            // "String name" -> "name": the last whitespace-separated token.
            s.split_whitespace().last().unwrap_or(s).to_string()
        }
        _ => s.to_string(),
    }
}

/// Splits `text` on the first top-level assignment operator not part of a
/// comparison (`==`, `!=`, `<=`, `>=`, `=>`), preferring `:=` (Go) first.
fn textual_split_assignment(text: &str) -> Option<(&str, &str)> {
    if let Some(idx) = text.find(":=") {
        return Some((&text[..idx], &text[idx + 2..]));
    }
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'=' {
            continue;
        }
        let prev = if i > 0 { bytes[i - 1] } else { 0 };
        let next = if i + 1 < bytes.len() { bytes[i + 1] } else { 0 };
        if matches!(prev, b'=' | b'!' | b'<' | b'>') || next == b'=' || prev == b'=' {
            continue;
        }
        return Some((&text[..i], &text[i + 1..]));
    }
    None
}

fn parse_assignment_shape(ast: &FileAst, node: &ir::AstNode, table: &NodeKindTable) -> Option<(String, usize)> {
    let children = ast.children(node.id);
    let op_idx = children.iter().position(|c| is_assign_operator(c))?;
    let lhs_node = children[..op_idx].iter().find(|c| is_identifier_like(c, table))?;
    let rhs_node = children[op_idx + 1..].iter().find(|c| !is_punctuation(c))?;
    Some((lhs_node.text_value()?.to_string(), rhs_node.id))
}

pub(crate) fn parse_assignment_node(ast: &FileAst, node: &ir::AstNode, language: &str) -> Option<Assignment> {
    let table = patterns::catalog::node_kinds_for(language);
    if !table.assignments.iter().any(|k| k == &node.kind) {
        return None;
    }

    let (lhs, rhs_node_id) = if let Some(shape) = parse_assignment_shape(ast, node, &table) {
        shape
    } else {
        let text = node.text_value()?;
        let (lhs, _rhs) = textual_split_assignment(text)?;
        (strip_lhs_decoration(lhs, language), node.id)
    };

    let rhs_node = ast.index.get(rhs_node_id);
    let rhs_text = rhs_node.and_then(|n| n.text_value()).unwrap_or_default().to_string();
    let rhs_location = rhs_node.map(location_of).unwrap_or_else(|| location_of(node));

    Some(Assignment {
        lhs: strip_lhs_decoration(&lhs, language),
        rhs_node: rhs_node_id,
        rhs_text,
        rhs_location,
        scope_name: scope_path(ast, node.id, language),
        location: location_of(node),
        snippet: node.text_value().map(ir::model::normalize_snippet).unwrap_or_default(),
    })
}

pub(crate) fn parse_return_node(ast: &FileAst, node: &ir::AstNode, language: &str) -> Option<ReturnStmt> {
    if !node.kind.contains("return") {
        return None;
    }
    let text = node.text_value()?;
    let expr = text
        .trim()
        .strip_prefix("return")
        .map(|s| s.trim_start().trim_end_matches(';').trim())
        .unwrap_or_else(|| text.trim());
    Some(ReturnStmt {
        expression_text: expr.to_string(),
        scope_name: scope_path(ast, node.id, language),
        location: location_of(node),
    })
}

pub(crate) fn parse_call_node(ast: &FileAst, node: &ir::AstNode, language: &str) -> Option<Call> {
    let table = patterns::catalog::node_kinds_for(language);
    if !table.calls.iter().any(|k| k == &node.kind) {
        return None;
    }
    let children = ast.children(node.id);
    let name_node = children.iter().find(|c| {
        is_identifier_like(c, &table)
            || c.kind.contains("member")
            || c.kind.contains("field_expression")
            || c.kind.contains("scoped")
            || c.kind.contains("attribute")
    })?;
    let args_node = children.iter().find(|c| {
        matches!(
            c.kind.as_str(),
            "arguments" | "argument_list" | "argument_expression_list" | "formal_parameters"
        )
    });
    let arguments = match args_node {
        Some(args) => ast
            .children(args.id)
            .into_iter()
            .filter(|c| !is_punctuation(c))
            .enumerate()
            .map(|(index, c)| CallArgument {
                name: None,
                node: c.id,
                text: c.text_value().unwrap_or_default().to_string(),
                index,
            })
            .collect(),
        None => Vec::new(),
    };

    Some(Call {
        name: name_node.text_value().unwrap_or_default().to_string(),
        arguments,
        scope_name: scope_path(ast, node.id, language),
        location: location_of(node),
    })
}

/// Walks from `node_id` up through its ancestors, collecting a label for
/// every scope-introducing ancestor (per the catalog's `scopes` node-kind
/// list), root-to-leaf, dot-joined — independent of any live
/// `ScopeManager` so both the bulk extractors and the propagator's
/// per-node parse agree on the same qualified name.
pub fn scope_path(ast: &FileAst, node_id: usize, language: &str) -> String {
    let table = patterns::catalog::node_kinds_for(language);
    let mut chain = Vec::new();
    let mut cur = ast.index.get(node_id).and_then(|n| n.parent);
    while let Some(id) = cur {
        if let Some(n) = ast.index.get(id) {
            if table.scopes.iter().any(|k| k == &n.kind) {
                chain.push(scope_label(ast, n, &table));
            }
            cur = n.parent;
        } else {
            break;
        }
    }
    chain.reverse();
    chain.join(".")
}

pub(crate) fn scope_label(ast: &FileAst, node: &ir::AstNode, table: &NodeKindTable) -> String {
    for child in ast.children(node.id) {
        if is_identifier_like(child, table) {
            if let Some(text) = child.text_value() {
                return text.to_string();
            }
        }
    }
    node.kind.clone()
}

/// Walks the whole tree in pre-order, collecting every assignment. Order
/// matches the tree's own pre-order DFS, which for statement-level
/// assignment nodes in practice follows program order (§4.5's ordering
/// guarantee).
pub fn extract_assignments(ast: &FileAst, language: &str) -> Vec<Assignment> {
    ast.walk_preorder()
        .filter_map(|n| parse_assignment_node(ast, n, language))
        .collect()
}

pub fn extract_calls(ast: &FileAst, language: &str) -> Vec<Call> {
    ast.walk_preorder()
        .filter_map(|n| parse_call_node(ast, n, language))
        .collect()
}

pub fn extract_returns(ast: &FileAst, language: &str) -> Vec<ReturnStmt> {
    ast.walk_preorder()
        .filter_map(|n| parse_return_node(ast, n, language))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str, language: &str) -> FileAst {
        parsers::parse_source(src, "t", language).unwrap().ast
    }

    #[test]
    fn extracts_php_superglobal_assignment() {
        let ast = parse("<?php\n$id = $_GET['id'];\n", "php");
        let assigns = extract_assignments(&ast, "php");
        assert_eq!(assigns.len(), 1);
        assert_eq!(assigns[0].lhs, "$id");
        assert!(assigns[0].rhs_text.contains("$_GET"));
    }

    #[test]
    fn extracts_call_with_zero_based_argument_index() {
        let ast = parse("<?php\necho query($id);\n", "php");
        let calls = extract_calls(&ast, "php");
        let query = calls.iter().find(|c| c.name == "query").unwrap();
        assert_eq!(query.arguments.len(), 1);
        assert_eq!(query.arguments[0].index, 0);
        assert_eq!(query.arguments[0].text, "$id");
    }

    #[test]
    fn rust_let_assignment_strips_type_annotation_on_fallback() {
        assert_eq!(strip_lhs_decoration("let mut count: i32", "rust"), "count");
    }

    #[test]
    fn java_declaration_keeps_last_identifier_on_fallback() {
        assert_eq!(strip_lhs_decoration("String name", "java"), "name");
    }

    #[test]
    fn scope_path_is_dot_joined_and_excludes_file_level() {
        let ast = parse("<?php\nfunction handler() {\n  $x = 1;\n}\n", "php");
        let assigns = extract_assignments(&ast, "php");
        assert_eq!(assigns[0].scope_name, "handler");
    }
}
