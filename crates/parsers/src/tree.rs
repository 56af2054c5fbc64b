//! Materializes a `tree_sitter::Tree` into the owned `ir::FileAst`
//! abstraction engine consumes (§6's "consumed AST abstraction").
//!
//! Node kinds are kept verbatim (`"subscript_expression"`, not a
//! camel-cased rename) because the pattern catalog's `node_types` lists
//! (§4.1) are written against tree-sitter's own grammar kind strings. Every
//! node's `value` holds its exact source text: C2's matcher and C3's
//! extractor both need to regex-match and textually parse node spans, and
//! storing the text once at build time is simpler than re-slicing the
//! source by byte range at every call site.

use ir::{AstNode, FileAst, Meta};

pub fn build_ast(tree: &tree_sitter::Tree, source: &str, file_path: &str, language: &str) -> FileAst {
    let mut ast = FileAst::new(file_path.to_string(), language.to_string());
    let mut counter = 0usize;
    let root = tree.root_node();
    ast.push(convert(root, source, file_path, &mut counter, None));
    ast
}

fn convert(
    node: tree_sitter::Node,
    source: &str,
    file: &str,
    counter: &mut usize,
    parent: Option<usize>,
) -> AstNode {
    let id = *counter;
    *counter += 1;

    let text = node
        .utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string();
    let start = node.start_position();
    let end = node.end_position();

    let mut cursor = node.walk();
    let children: Vec<AstNode> = node
        .children(&mut cursor)
        .map(|child| convert(child, source, file, counter, Some(id)))
        .collect();

    AstNode {
        id,
        parent,
        kind: node.kind().to_string(),
        value: serde_json::Value::String(text),
        children,
        meta: Meta {
            file: file.to_string(),
            line: start.row + 1,
            column: start.column,
            end_line: end.row + 1,
            end_column: end.column,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materializes_raw_grammar_kinds_with_full_text() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(tree_sitter_php::language()).unwrap();
        let src = "<?php\n$id = $_GET['id'];\n";
        let tree = parser.parse(src, None).unwrap();
        let ast = build_ast(&tree, src, "a.php", "php");

        let subscript = ast
            .walk_preorder()
            .find(|n| n.kind == "subscript_expression")
            .expect("subscript_expression present");
        assert_eq!(subscript.text_value(), Some("$_GET['id']"));
        assert_eq!(subscript.meta.line, 2);
    }
}
