//! Per-language source catalogs, node-kind tables and security catalogs.
//!
//! Each submodule owns one language's tables; `all()` aggregates them for
//! `catalog::build_registry`. Adding a language means adding one file here
//! and one line in `all()` — the registry, matcher (C2) and extractor (C3)
//! need no further changes.

pub(crate) mod c;
mod cpp;
mod csharp;
mod go;
mod java;
pub(crate) mod javascript;
mod php;
mod python;
mod ruby;
mod rust;
mod typescript;

use crate::catalog::{NodeKindTable, SecurityCatalog, SourceDefinition};

type LanguageTables = (&'static str, Vec<SourceDefinition>, NodeKindTable, SecurityCatalog);

pub fn all() -> Vec<LanguageTables> {
    vec![
        ("php", php::sources(), php::node_kinds(), php::security()),
        ("javascript", javascript::sources(), javascript::node_kinds(), javascript::security()),
        ("typescript", typescript::sources(), typescript::node_kinds(), typescript::security()),
        ("python", python::sources(), python::node_kinds(), python::security()),
        ("go", go::sources(), go::node_kinds(), go::security()),
        ("java", java::sources(), java::node_kinds(), java::security()),
        ("ruby", ruby::sources(), ruby::node_kinds(), ruby::security()),
        ("rust", rust::sources(), rust::node_kinds(), rust::security()),
        ("c", c::sources(), c::node_kinds(), c::security()),
        ("cpp", cpp::sources(), cpp::node_kinds(), cpp::security()),
        ("c_sharp", csharp::sources(), csharp::node_kinds(), csharp::security()),
    ]
}
