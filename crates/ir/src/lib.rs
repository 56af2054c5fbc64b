//! Shared data types for the input-flow tracer.
//!
//! `ast` holds the generic tree representation `parsers` builds from a
//! tree-sitter parse tree (the "consumed AST abstraction" of spec §6).
//! `model` holds the taint data model proper: sources, tainted
//! variables/functions, propagation paths, scopes, function summaries.
//! `flow` holds the materialized input-flow graph these populate.

pub mod ast;
pub mod flow;
pub mod model;

pub use ast::{AstNode, FileAst, Meta};
pub use flow::{FlowEdge, FlowEdgeKind, FlowGraph, FlowNode, FlowNodeKind};
pub use model::{
    FunctionSummary, InputLabel, InputSource, Location, PropagationPath, PropagationStep,
    PropagationStepType, Scope, ScopeKind, SourceType, TaintedFunction, TaintedParam,
    TaintedVariable,
};

/// A single parsed file: the materialized AST plus the raw source bytes,
/// handed from `parsers` to `engine`.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub file_path: String,
    pub language: String,
    pub source: String,
    pub ast: FileAst,
}

impl ParsedFile {
    pub fn new(file_path: impl Into<String>, language: impl Into<String>, source: String, ast: FileAst) -> Self {
        Self {
            file_path: file_path.into(),
            language: language.into(),
            source,
            ast,
        }
    }

    pub fn line(&self, line: usize) -> &str {
        self.source.lines().nth(line.saturating_sub(1)).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(line: usize, column: usize) -> Meta {
        Meta {
            file: "a.rs".into(),
            line,
            column,
            end_line: line,
            end_column: column + 1,
        }
    }

    #[test]
    fn file_ast_indexes_nodes_by_id() {
        let mut ast = FileAst::new("a.rs".into(), "rust".into());
        let child = AstNode {
            id: 1,
            parent: Some(0),
            kind: "Identifier".into(),
            value: json!("x"),
            children: vec![],
            meta: meta(1, 4),
        };
        let root = AstNode {
            id: 0,
            parent: None,
            kind: "LetStmt".into(),
            value: json!(null),
            children: vec![child],
            meta: meta(1, 0),
        };
        ast.push(root);

        assert_eq!(ast.index.len(), 2);
        assert_eq!(ast.children(0).len(), 1);
        assert_eq!(ast.parent(1).unwrap().kind, "LetStmt");
    }

    #[test]
    fn location_snippet_is_normalized_and_truncated() {
        let loc = Location::new("a.php", 2, 0).with_snippet("  echo   'x'  ;  \n\t next");
        assert_eq!(loc.snippet.as_deref(), Some("echo 'x' ; next"));

        let long = "a".repeat(200);
        let loc2 = Location::new("a.php", 2, 0).with_snippet(&long);
        assert_eq!(loc2.snippet.unwrap().chars().count(), 100);
    }

    #[test]
    fn source_type_label_mapping_matches_canonical_table() {
        assert_eq!(SourceType::HttpGet.input_label(), Some(InputLabel::HttpGet));
        assert_eq!(SourceType::CliArg.input_label(), Some(InputLabel::Cli));
        assert_eq!(SourceType::EnvVar.input_label(), Some(InputLabel::Environment));
        assert_eq!(SourceType::HttpJson.input_label(), None);
        assert_eq!(SourceType::Session.input_label(), None);
    }

    #[test]
    fn tainted_function_merge_params_is_a_union() {
        let src = InputSource::new("$_GET", Some("id".into()), Location::new("a.php", 2, 0), vec![], "php");
        let mut f = TaintedFunction {
            id: uuid::Uuid::new_v4(),
            name: "query".into(),
            file_path: "a.php".into(),
            line: 3,
            language: "php".into(),
            tainted_params: vec![TaintedParam {
                index: 0,
                name: "$id".into(),
                source: src.id,
                path: None,
            }],
            receives_through: None,
        };
        f.merge_params(&[
            TaintedParam {
                index: 0,
                name: "$id".into(),
                source: src.id,
                path: None,
            },
            TaintedParam {
                index: 1,
                name: "$extra".into(),
                source: src.id,
                path: None,
            },
        ]);
        assert_eq!(f.tainted_params.len(), 2);
    }
}
