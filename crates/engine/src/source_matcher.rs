//! Source matcher (C2): walks a materialized AST against the catalog
//! (§4.1/§4.2) to produce the `InputSource` records a file's tainted
//! variables and functions will trace back to.
//!
//! Two catalog tables feed this, matched differently:
//! - `SourceDefinition`s carry their own node-kind filter and regex, so
//!   matching is a direct per-node `matches_node_kind` + `matches_text`.
//! - `InputMethod`s describe a receiver/method call shape (`request.args
//!   .get(...)`) and are matched against the calls C3 already extracts,
//!   except for the handful of `"[]"` entries (`ENV[]`, `params[]`) that
//!   are subscript access, not calls, and get their own subscript walk.

use crate::extractor;
use ir::{FileAst, InputSource, Location};
use patterns::catalog::InputMethod;

fn location_of(node: &ir::AstNode) -> Location {
    let loc = Location::new(node.meta.file.clone(), node.meta.line, node.meta.column)
        .with_end(node.meta.end_line, node.meta.end_column);
    match node.text_value() {
        Some(text) => loc.with_snippet(text),
        None => loc,
    }
}

fn strip_quotes(s: &str) -> String {
    s.trim_matches(|c| c == '\'' || c == '"').to_string()
}

fn is_subscript_kind(kind: &str) -> bool {
    kind.contains("subscript") || kind.contains("index") || kind.contains("element_access") || kind.contains("element_reference")
}

/// Reads `receiver[<key>]` out of a subscript node's own text.
fn key_from_subscript_text(text: &str, receiver: &str) -> Option<String> {
    let rest = text.strip_prefix(receiver)?.trim_start();
    let rest = rest.strip_prefix('[')?;
    let inner = rest.split(']').next()?;
    Some(strip_quotes(inner.trim()))
}

/// Does a parsed call's name (`"request.args.get"`, `"env::var"`) match an
/// input-method table row? Compared as `.`/`::`-split path segments so
/// both dot-call and module-path call shapes work: the row's
/// (possibly multi-segment) `method_name` must match the call name's
/// trailing segments, and `var_pattern` (unless `"*"`) must match the
/// leading one.
fn call_name_matches(call_name: &str, im: &InputMethod) -> bool {
    let segs: Vec<&str> = call_name.split(['.', ':']).filter(|s| !s.is_empty()).collect();
    let method_segs: Vec<&str> = im.method_name.split('.').collect();
    if segs.len() < method_segs.len() {
        return false;
    }
    let tail = &segs[segs.len() - method_segs.len()..];
    if tail != method_segs.as_slice() {
        return false;
    }
    im.var_pattern == "*" || segs.first() == Some(&im.var_pattern.as_str())
}

fn from_source_definitions(ast: &FileAst, language: &str) -> Vec<InputSource> {
    let mut out = Vec::new();
    let defs = patterns::sources_for(language);
    for node in ast.walk_preorder() {
        let Some(text) = node.text_value() else { continue };
        for def in &defs {
            if !def.matches_node_kind(&node.kind) {
                continue;
            }
            if !def.matches_text(text).unwrap_or(false) {
                continue;
            }
            let key = def.extract_key(text).unwrap_or(None);
            let labels = if def.labels.is_empty() {
                def.source_type.input_label().into_iter().collect()
            } else {
                def.labels.clone()
            };
            out.push(InputSource::new(def.name.clone(), key, location_of(node), labels, language));
        }
    }
    out
}

fn from_input_methods(ast: &FileAst, language: &str) -> Vec<InputSource> {
    let mut out = Vec::new();
    let methods = patterns::input_methods_for(language);

    for im in methods.iter().filter(|im| im.method_name == "[]" && im.var_pattern != "*") {
        for node in ast.walk_preorder() {
            if !is_subscript_kind(&node.kind) {
                continue;
            }
            let Some(text) = node.text_value() else { continue };
            let Some(key) = key_from_subscript_text(text, &im.var_pattern) else { continue };
            let labels = im.source_type.input_label().into_iter().collect();
            out.push(InputSource::new(
                format!("{}[]", im.var_pattern),
                Some(key),
                location_of(node),
                labels,
                language,
            ));
        }
    }

    let calls = extractor::extract_calls(ast, language);
    for im in methods.iter().filter(|im| im.method_name != "[]") {
        for call in &calls {
            if !call_name_matches(&call.name, im) {
                continue;
            }
            let key = call.arguments.first().map(|a| strip_quotes(&a.text));
            let labels = im.source_type.input_label().into_iter().collect();
            out.push(InputSource::new(
                format!("{}.{}", im.var_pattern, im.method_name),
                key,
                call.location.clone(),
                labels,
                language,
            ));
        }
    }
    out
}

/// Returns every untrusted-input entry point found in `ast` (§4.2).
///
/// Two definitions can legitimately fire on the same node (e.g. a
/// wrapper node and its single child sharing a span), so the raw walk
/// can yield duplicate `(span, source_type)` pairs; §4.2 requires those
/// collapse to one `Match`, so the last step dedups on that key while
/// keeping first-seen order.
pub fn find_sources(ast: &FileAst, language: &str) -> Vec<InputSource> {
    let mut out = from_source_definitions(ast, language);
    out.extend(from_input_methods(ast, language));
    let mut seen = std::collections::HashSet::new();
    out.retain(|s| {
        let key = (
            s.source_type.clone(),
            s.location.file_path.clone(),
            s.location.line,
            s.location.column,
            s.location.end_line,
            s.location.end_column,
        );
        seen.insert(key)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str, language: &str) -> FileAst {
        parsers::parse_source(src, "t", language).unwrap().ast
    }

    #[test]
    fn finds_php_get_superglobal_with_extracted_key() {
        let ast = parse("<?php\n$id = $_GET['id'];\n", "php");
        let sources = find_sources(&ast, "php");
        let got = sources.iter().find(|s| s.source_type == "$_GET").unwrap();
        assert_eq!(got.key.as_deref(), Some("id"));
    }

    #[test]
    fn finds_flask_request_args_get_call() {
        let ast = parse("id = request.args.get('id')\n", "python");
        let sources = find_sources(&ast, "python");
        let got = sources.iter().find(|s| s.source_type.contains("args.get")).unwrap();
        assert_eq!(got.key.as_deref(), Some("id"));
    }

    #[test]
    fn finds_ruby_params_subscript_access() {
        let ast = parse("id = params['id']\n", "ruby");
        let sources = find_sources(&ast, "ruby");
        assert!(sources.iter().any(|s| s.source_type == "params[]" && s.key.as_deref() == Some("id")));
    }

    #[test]
    fn does_not_confuse_unrelated_calls_with_input_methods() {
        let ast = parse("x = logger.get('message')\n", "python");
        let sources = find_sources(&ast, "python");
        assert!(!sources.iter().any(|s| s.source_type.contains("args.get")));
    }
}
