//! Inter-procedural analyzer (C6): builds one `FunctionSummary` per
//! function definition encountered in a file (first definition wins,
//! per §4.6 point 4 — a known imprecision the spec accepts), plus the
//! `caller -> [callees]` call graph used to cross-check recursion.
//!
//! Summaries are built same-file: the propagator calls `build_summaries`
//! once up front and consults it while walking, so a call to a helper
//! defined earlier or later in the same file resolves; a callee defined
//! in a different file does not get cross-call propagation (the
//! `FunctionSummary`/`TaintedParam` data model carries no cross-file
//! call-site linkage to thread that through — see DESIGN.md).

use crate::extractor;
use ir::{AstNode, FileAst, FunctionSummary};
use patterns::catalog::NodeKindTable;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CallGraph {
    pub edges: HashMap<String, Vec<String>>,
}

impl CallGraph {
    fn record(&mut self, caller: &str, callee: &str) {
        self.edges.entry(caller.to_string()).or_default().push(callee.to_string());
    }
}

fn extract_parameters(ast: &FileAst, node: &AstNode, table: &NodeKindTable) -> Vec<String> {
    let params_container = ast
        .children(node.id)
        .into_iter()
        .find(|c| c.kind.contains("parameter"));
    let Some(container) = params_container else { return Vec::new() };
    ast.children(container.id)
        .into_iter()
        .filter(|c| {
            table.identifiers.iter().any(|k| k == &c.kind) || c.kind.contains("identifier") || c.kind.contains("parameter")
        })
        .filter_map(|c| {
            // A typed parameter node (e.g. `int x`) wraps its own
            // identifier child; a bare identifier parameter has none.
            ast.children(c.id)
                .into_iter()
                .find(|gc| table.identifiers.iter().any(|k| k == &gc.kind) || gc.kind.contains("identifier"))
                .and_then(|gc| gc.text_value())
                .or_else(|| c.text_value())
                .map(str::to_string)
        })
        .collect()
}

fn function_body<'a>(ast: &'a FileAst, node: &'a AstNode, table: &NodeKindTable) -> Option<&'a AstNode> {
    ast.children(node.id).into_iter().find(|c| table.scopes.iter().any(|k| k == &c.kind) || c.kind.contains("block"))
}

/// A call argument that is a bare reference to one of the *caller's* own
/// parameters (§9, resolved: `params_to_params` population rule). Recorded
/// while scanning the caller and resolved against the callee's summary
/// once every function in the file has been collected, since the callee
/// may be defined later in the same file.
struct ParamLink {
    callee: String,
    arg_index: usize,
    caller_param_index: usize,
}

fn scan_body(
    ast: &FileAst,
    body: &AstNode,
    language: &str,
    summary: &mut FunctionSummary,
    graph: &mut CallGraph,
    links: &mut Vec<ParamLink>,
) {
    for node in body.children.iter() {
        scan_node(ast, node, language, summary, graph, links);
    }
}

fn scan_node(
    ast: &FileAst,
    node: &AstNode,
    language: &str,
    summary: &mut FunctionSummary,
    graph: &mut CallGraph,
    links: &mut Vec<ParamLink>,
) {
    if let Some(r) = extractor::parse_return_node(ast, node, language) {
        for (i, param) in summary.parameters.iter().enumerate() {
            if extractor::expression_contains(&r.expression_text, param) {
                summary.params_to_return.insert(i);
            }
        }
    }
    if let Some(c) = extractor::parse_call_node(ast, node, language) {
        summary.called_functions.push(c.name.clone());
        graph.record(&summary.name, &c.name);
        for arg in &c.arguments {
            let text = arg.text.trim();
            if let Some(caller_param_index) = summary.parameters.iter().position(|p| p == text) {
                links.push(ParamLink {
                    callee: c.name.clone(),
                    arg_index: arg.index,
                    caller_param_index,
                });
            }
        }
    }
    for child in &node.children {
        scan_node(ast, child, language, summary, graph, links);
    }
}

/// Builds one summary per distinct function name defined in `ast`
/// (first definition wins), plus the file-local call graph.
pub fn build_summaries(ast: &FileAst, language: &str) -> (HashMap<String, FunctionSummary>, CallGraph) {
    let table = patterns::catalog::node_kinds_for(language);
    let mut summaries = HashMap::new();
    let mut graph = CallGraph::default();
    let mut links = Vec::new();
    for root in &ast.nodes {
        collect(ast, root, language, &table, &mut summaries, &mut graph, &mut links);
    }
    for link in links {
        if let Some(callee) = summaries.get_mut(&link.callee) {
            callee
                .params_to_params
                .entry(link.arg_index)
                .or_default()
                .insert(link.caller_param_index);
        }
    }
    (summaries, graph)
}

#[allow(clippy::too_many_arguments)]
fn collect(
    ast: &FileAst,
    node: &AstNode,
    language: &str,
    table: &NodeKindTable,
    summaries: &mut HashMap<String, FunctionSummary>,
    graph: &mut CallGraph,
    links: &mut Vec<ParamLink>,
) {
    if table.function_defs.iter().any(|k| k == &node.kind) {
        let name = extractor::scope_label(ast, node, table);
        if !summaries.contains_key(&name) {
            let mut summary = FunctionSummary::new(name.clone(), ast.file_path.clone(), language);
            summary.parameters = extract_parameters(ast, node, table);
            if let Some(body) = function_body(ast, node, table) {
                scan_body(ast, body, language, &mut summary, graph, links);
            }
            summaries.insert(name, summary);
        }
    }
    for child in &node.children {
        collect(ast, child, language, table, summaries, graph, links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str, language: &str) -> FileAst {
        parsers::parse_source(src, "a.php", language).unwrap().ast
    }

    #[test]
    fn records_params_to_return_for_a_pass_through_function() {
        let ast = parse("<?php\nfunction identity($x) {\n  return $x;\n}\n", "php");
        let (summaries, _graph) = build_summaries(&ast, "php");
        let s = summaries.get("identity").unwrap();
        assert_eq!(s.parameters, vec!["$x".to_string()]);
        assert!(s.params_to_return.contains(&0));
    }

    #[test]
    fn first_definition_wins_on_redefinition() {
        let ast = parse(
            "<?php\nfunction f($a) { return $a; }\nfunction f($b) { return 1; }\n",
            "php",
        );
        let (summaries, _graph) = build_summaries(&ast, "php");
        let s = summaries.get("f").unwrap();
        assert_eq!(s.parameters, vec!["$a".to_string()]);
    }

    #[test]
    fn call_graph_records_caller_to_callee_edge() {
        let ast = parse("<?php\nfunction outer() {\n  helper();\n}\n", "php");
        let (_summaries, graph) = build_summaries(&ast, "php");
        assert_eq!(graph.edges.get("outer").map(|v| v.as_slice()), Some(["helper".to_string()].as_slice()));
    }

    #[test]
    fn params_to_params_links_a_bare_argument_to_the_caller_parameter() {
        let ast = parse(
            "<?php\nfunction outer($req) {\n  helper($req);\n}\nfunction helper($x) {\n  return $x;\n}\n",
            "php",
        );
        let (summaries, _graph) = build_summaries(&ast, "php");
        let helper = summaries.get("helper").unwrap();
        let linked = helper.params_to_params.get(&0);
        assert!(linked.is_some_and(|set| set.contains(&0)), "expected helper's arg 0 linked to outer's param 0, got {:?}", helper.params_to_params);
    }

    #[test]
    fn non_bare_argument_expressions_do_not_create_a_param_link() {
        let ast = parse(
            "<?php\nfunction outer($req) {\n  helper($req . \"x\");\n}\nfunction helper($x) {\n  return $x;\n}\n",
            "php",
        );
        let (summaries, _graph) = build_summaries(&ast, "php");
        let helper = summaries.get("helper").unwrap();
        assert!(helper.params_to_params.is_empty());
    }
}
