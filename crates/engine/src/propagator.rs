//! Intra-procedural propagator (C5): the single pre-order DFS over a
//! file's AST that drives the live `ScopeManager`, and at assignment/call/
//! return nodes runs the three propagation rules from §4.5, plus the
//! same-file cross-call rule from §4.6.
//!
//! Calls and returns are handled in the same pass as assignments (the
//! spec's ordering guarantee), which is why this walks the owned
//! `AstNode` tree directly instead of running C3's three bulk extractors
//! and merging their output afterward — only a live recursive walk keeps
//! the `ScopeManager` cursor correctly nested against arbitrary grammars.

use crate::extractor;
use crate::interproc;
use crate::scope::ScopeManager;
use crate::state::AnalysisState;
use ir::{
    AstNode, FileAst, FunctionSummary, InputSource, Location, PropagationStep, PropagationStepType,
    ScopeKind, TaintedFunction, TaintedParam, TaintedVariable,
};
use patterns::catalog::NodeKindTable;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Runs C2 (via `source_matcher`), C6's same-file summary pre-pass, and
/// C5 over one file, returning the accumulated per-file state and the
/// scope tree it built (§5: one `AnalysisState` slice, owned by exactly
/// one worker, per file).
pub fn analyze_file(ast: &FileAst, language: &str) -> (AnalysisState, ScopeManager) {
    analyze_file_with_depth(ast, language, DEFAULT_MAX_DEPTH)
}

pub fn analyze_file_with_depth(ast: &FileAst, language: &str, max_depth: usize) -> (AnalysisState, ScopeManager) {
    analyze_file_with_summaries(ast, language, max_depth, &HashMap::new())
}

/// Same as `analyze_file_with_depth`, but seeds same-file summary
/// resolution with `extra` first — entries already known from other files
/// in the run (C8's global pre-pass), so `cross_call_propagate` resolves
/// calls into functions this file never defines. A same-file definition
/// still wins over an external one of the same name.
pub fn analyze_file_with_summaries(
    ast: &FileAst,
    language: &str,
    max_depth: usize,
    extra: &HashMap<String, FunctionSummary>,
) -> (AnalysisState, ScopeManager) {
    let scope = ScopeManager::new();
    let mut state = AnalysisState::new();
    let sources = crate::source_matcher::find_sources(ast, language);
    for source in &sources {
        state.add_source(source.clone());
    }
    let (local_summaries, _call_graph) = interproc::build_summaries(ast, language);
    let mut summaries = extra.clone();
    for (name, summary) in local_summaries {
        summaries.insert(name, summary);
    }
    let table = patterns::catalog::node_kinds_for(language);
    let mut visited = HashSet::new();
    for root in &ast.nodes {
        walk(
            root, ast, language, &table, &scope, &mut state, &sources, &summaries, &mut visited, max_depth, None,
        );
    }
    (state, scope)
}

fn scope_kind_for(kind: &str, table: &NodeKindTable) -> ScopeKind {
    if table.function_defs.iter().any(|k| k == kind) {
        ScopeKind::Function
    } else if kind.contains("class") {
        ScopeKind::Class
    } else if kind.contains("module") || kind.contains("program") || kind.contains("source_file") {
        ScopeKind::Module
    } else {
        ScopeKind::Block
    }
}

#[allow(clippy::too_many_arguments)]
fn walk(
    node: &AstNode,
    ast: &FileAst,
    language: &str,
    table: &NodeKindTable,
    scope: &ScopeManager,
    state: &mut AnalysisState,
    sources: &[InputSource],
    summaries: &HashMap<String, FunctionSummary>,
    visited: &mut HashSet<String>,
    max_depth: usize,
    assign_target: Option<String>,
) {
    let is_scope = table.scopes.iter().any(|k| k == &node.kind);
    if is_scope {
        let kind = scope_kind_for(&node.kind, table);
        let label = extractor::scope_label(ast, node, table);
        scope.enter(kind, &label, extractor::location_of(node));
    }

    let mut child_assign_target = if is_scope { None } else { assign_target.clone() };

    if table.assignments.iter().any(|k| k == &node.kind) {
        if let Some(a) = extractor::parse_assignment_node(ast, node, language) {
            handle_assignment(&a, scope, state, sources, max_depth);
            child_assign_target = Some(a.lhs.clone());
        }
    }
    if table.calls.iter().any(|k| k == &node.kind) {
        if let Some(c) = extractor::parse_call_node(ast, node, language) {
            handle_call(
                &c,
                scope,
                state,
                &ast.file_path,
                language,
                summaries,
                assign_target.as_deref(),
                max_depth,
                visited,
            );
        }
    }
    if let Some(r) = extractor::parse_return_node(ast, node, language) {
        handle_return(&r, scope, state);
    }

    for child in &node.children {
        walk(
            child,
            ast,
            language,
            table,
            scope,
            state,
            sources,
            summaries,
            visited,
            max_depth,
            child_assign_target.clone(),
        );
    }

    if is_scope {
        scope.exit();
    }
}

fn source_inside(sources: &[InputSource], location: &Location) -> Option<InputSource> {
    sources
        .iter()
        .find(|s| {
            s.location.file_path == location.file_path
                && s.location.line >= location.line
                && s.location.line <= location.end_line
        })
        .cloned()
}

fn handle_assignment(a: &extractor::Assignment, scope: &ScopeManager, state: &mut AnalysisState, sources: &[InputSource], max_depth: usize) {
    if let Some(source) = source_inside(sources, &a.rhs_location) {
        taint(a, &source, 0, scope, state);
        return;
    }

    let existing = scope
        .all_tainted_in_scope()
        .into_iter()
        .find(|tv| extractor::expression_contains(&a.rhs_text, &tv.name));

    match existing {
        Some(tv) if tv.source.is_some() => {
            let source = tv.source.clone().expect("checked is_some");
            let depth = tv.depth + 1;
            if depth > max_depth {
                return;
            }
            taint(a, &source, depth, scope, state);
        }
        _ => {
            scope.declare(&a.lhs, false, None, 0, a.location.clone());
        }
    }
}

fn taint(a: &extractor::Assignment, source: &InputSource, depth: usize, scope: &ScopeManager, state: &mut AnalysisState) {
    scope.mark_tainted(&a.lhs, source.clone(), depth, a.location.clone());
    state.add_tainted_variable(TaintedVariable {
        id: Uuid::new_v4(),
        name: a.lhs.clone(),
        scope: a.scope_name.clone(),
        source: source.clone(),
        location: a.location.clone(),
        depth,
        language: source.language.clone(),
    });
    state.add_propagation_step(
        source.id,
        PropagationStep {
            step_type: PropagationStepType::Assignment,
            variable: a.lhs.clone(),
            function: None,
            location: a.location.clone(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
fn handle_call(
    c: &extractor::Call,
    scope: &ScopeManager,
    state: &mut AnalysisState,
    file_path: &str,
    language: &str,
    summaries: &HashMap<String, FunctionSummary>,
    assign_target: Option<&str>,
    max_depth: usize,
    visited: &mut HashSet<String>,
) {
    let tainted = scope.all_tainted_in_scope();
    let mut hits: Vec<(TaintedParam, usize, InputSource)> = Vec::new();
    for arg in &c.arguments {
        let Some(tv) = tainted.iter().find(|tv| extractor::expression_contains(&arg.text, &tv.name)) else {
            continue;
        };
        let Some(source) = tv.source.clone() else { continue };
        hits.push((
            TaintedParam {
                index: arg.index,
                name: tv.name.clone(),
                source: source.id,
                path: None,
            },
            tv.depth,
            source,
        ));
    }

    for (param, _, source) in &hits {
        state.add_propagation_step(
            source.id,
            PropagationStep {
                step_type: PropagationStepType::ParameterPass,
                variable: param.name.clone(),
                function: Some(c.name.clone()),
                location: c.location.clone(),
            },
        );
    }

    if !hits.is_empty() {
        state.add_tainted_function(TaintedFunction {
            id: Uuid::new_v4(),
            name: c.name.clone(),
            file_path: file_path.to_string(),
            line: c.location.line,
            language: language.to_string(),
            tainted_params: hits.iter().map(|(p, _, _)| p.clone()).collect(),
            receives_through: None,
        });
    }

    cross_call_propagate(c, scope, state, summaries, assign_target, max_depth, visited, &hits);
}

/// §4.6 cross-call propagation: if a tainted argument lands on a
/// parameter the callee's summary says flows to its return value, the
/// enclosing assignment's target is tainted too, one depth deeper.
#[allow(clippy::too_many_arguments)]
fn cross_call_propagate(
    c: &extractor::Call,
    scope: &ScopeManager,
    state: &mut AnalysisState,
    summaries: &HashMap<String, FunctionSummary>,
    assign_target: Option<&str>,
    max_depth: usize,
    visited: &mut HashSet<String>,
    hits: &[(TaintedParam, usize, InputSource)],
) {
    let Some(target) = assign_target else { return };
    let Some(summary) = summaries.get(&c.name) else { return };
    let key = format!("{}:{}", c.name, summary.file_path);
    if visited.contains(&key) {
        return;
    }
    for (param, depth, source) in hits {
        if !summary.params_to_return.contains(&param.index) {
            continue;
        }
        let new_depth = depth + 1;
        if new_depth > max_depth {
            continue;
        }
        visited.insert(key);
        scope.mark_tainted(target, source.clone(), new_depth, c.location.clone());
        state.add_tainted_variable(TaintedVariable {
            id: Uuid::new_v4(),
            name: target.to_string(),
            scope: c.scope_name.clone(),
            source: source.clone(),
            location: c.location.clone(),
            depth: new_depth,
            language: source.language.clone(),
        });
        state.add_propagation_step(
            source.id,
            PropagationStep {
                step_type: PropagationStepType::InterproceduralReturn,
                variable: target.to_string(),
                function: Some(c.name.clone()),
                location: c.location.clone(),
            },
        );
        return;
    }
}

fn handle_return(r: &extractor::ReturnStmt, scope: &ScopeManager, state: &mut AnalysisState) {
    let Some(tv) = scope
        .all_tainted_in_scope()
        .into_iter()
        .find(|tv| extractor::expression_contains(&r.expression_text, &tv.name))
    else {
        return;
    };
    let Some(source) = tv.source else { return };
    let function_name = r.scope_name.rsplit('.').next().unwrap_or(&r.scope_name).to_string();
    state.mark_function_returns_tainted(&function_name, source.clone());
    state.add_propagation_step(
        source.id,
        PropagationStep {
            step_type: PropagationStepType::Return,
            variable: tv.name.clone(),
            function: Some(function_name),
            location: r.location.clone(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str, language: &str) -> FileAst {
        parsers::parse_source(src, "a.php", language).unwrap().ast
    }

    #[test]
    fn direct_source_assignment_is_depth_zero() {
        let ast = parse("<?php\n$id = $_GET['id'];\n", "php");
        let (state, _scope) = analyze_file(&ast, "php");
        let vars = state.tainted_variables();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "$id");
        assert_eq!(vars[0].depth, 0);
    }

    #[test]
    fn chained_assignment_increments_depth() {
        let ast = parse("<?php\n$id = $_GET['id'];\n$copy = $id;\n", "php");
        let (state, _scope) = analyze_file(&ast, "php");
        let copy = state.tainted_variables().into_iter().find(|v| v.name == "$copy").unwrap();
        assert_eq!(copy.depth, 1);
    }

    #[test]
    fn tainted_argument_records_tainted_function() {
        let ast = parse("<?php\n$id = $_GET['id'];\nquery($id);\n", "php");
        let (state, _scope) = analyze_file(&ast, "php");
        let funcs = state.tainted_functions();
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "query");
        assert_eq!(funcs[0].tainted_params[0].index, 0);
    }

    #[test]
    fn anti_substring_prevents_false_positive_propagation() {
        let ast = parse("<?php\n$order = 1;\n$order_id = 2;\nlog_msg($order);\n", "php");
        let (state, _scope) = analyze_file(&ast, "php");
        assert!(state.tainted_variables().is_empty());
        assert!(state.tainted_functions().is_empty());
    }

    #[test]
    fn cross_call_return_taints_the_assignment_target() {
        let ast = parse(
            "<?php\nfunction identity($x) {\n  return $x;\n}\n$id = $_GET['id'];\n$safe = identity($id);\n",
            "php",
        );
        let (state, _scope) = analyze_file(&ast, "php");
        let safe = state.tainted_variables().into_iter().find(|v| v.name == "$safe");
        assert!(safe.is_some(), "identity() flows its tainted param to its return, so $safe should taint");
        assert_eq!(safe.unwrap().depth, 1);
    }

    #[test]
    fn function_return_marks_returns_tainted() {
        let ast = parse("<?php\nfunction handler() {\n  $id = $_GET['id'];\n  return $id;\n}\n", "php");
        let (state, _scope) = analyze_file(&ast, "php");
        assert!(state.function_returns_tainted("handler").is_some());
    }
}
