//! TypeScript reuses the JavaScript catalog verbatim: the taint-relevant
//! surface (Express/Node APIs, browser globals) is identical, and the
//! extra type syntax tree-sitter-typescript parses doesn't change which
//! node kinds carry assignments or calls.

use crate::catalog::{NodeKindTable, SecurityCatalog, SourceDefinition};
use crate::languages::javascript;

pub fn sources() -> Vec<SourceDefinition> {
    javascript::sources()
        .into_iter()
        .map(|mut def| {
            def.language = "typescript".to_string();
            def
        })
        .collect()
}

pub fn node_kinds() -> NodeKindTable {
    let mut t = javascript::node_kinds();
    t.language = "typescript".to_string();
    t
}

pub fn security() -> SecurityCatalog {
    let mut s = javascript::security();
    s.language = "typescript".to_string();
    s
}
