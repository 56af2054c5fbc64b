//! Per-language AST node-kind classification tables (§4.1) plus a universal
//! fallback superset used when a language has no bespoke table.

use crate::catalog::NodeKindTable;

pub fn table(
    language: &str,
    function_defs: &[&str],
    scopes: &[&str],
    assignments: &[&str],
    calls: &[&str],
    identifiers: &[&str],
) -> NodeKindTable {
    NodeKindTable {
        language: language.to_string(),
        function_defs: function_defs.iter().map(|s| s.to_string()).collect(),
        scopes: scopes.iter().map(|s| s.to_string()).collect(),
        assignments: assignments.iter().map(|s| s.to_string()).collect(),
        calls: calls.iter().map(|s| s.to_string()).collect(),
        identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
    }
}

/// A conservative superset of node-kind names seen across the eleven
/// supported grammars, used when a language's own table misses a kind or
/// when a language tag has no dedicated table at all.
pub fn universal_fallback() -> NodeKindTable {
    table(
        "*",
        &[
            "function_definition",
            "function_declaration",
            "method_declaration",
            "function_item",
            "arrow_function",
            "closure_expression",
            "lambda",
        ],
        &[
            "function_definition",
            "function_declaration",
            "method_declaration",
            "function_item",
            "class_declaration",
            "class_definition",
            "block",
            "compound_statement",
            "statement_block",
        ],
        &[
            "assignment",
            "assignment_expression",
            "variable_declarator",
            "let_declaration",
            "short_var_declaration",
            "local_variable_declaration",
            "expression_statement",
        ],
        &["call_expression", "call", "method_invocation", "invocation_expression"],
        &["identifier", "variable_name", "field_identifier"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universal_fallback_is_nonempty_everywhere() {
        let t = universal_fallback();
        assert!(!t.function_defs.is_empty());
        assert!(!t.scopes.is_empty());
        assert!(!t.assignments.is_empty());
        assert!(!t.calls.is_empty());
        assert!(!t.identifiers.is_empty());
    }
}
