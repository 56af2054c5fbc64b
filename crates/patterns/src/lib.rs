//! Language-keyed catalogs of sources, input methods, node kinds and
//! security predicates that back C2 (source matching) and C3 (extraction).
//!
//! The catalog itself is built once behind a process-wide registry
//! (`catalog::registry`) and is otherwise read-only after startup, except
//! for the loader's one-time `register_custom_source` call (§9).

pub mod catalog;
pub mod input_methods;
pub mod languages;
pub mod node_kinds;
pub mod php;
pub mod regex_cache;
pub mod skip;

pub use catalog::{
    all_superglobals, input_methods_for, is_server_key_user_controllable, node_kinds_for,
    register_custom_source, security_for, sources_for, superglobal, AuthPattern, InputMethod,
    MethodCategory, NodeKindTable, SecurityCatalog, SourceDefinition, Superglobal,
    ValidationPattern,
};
pub use regex_cache::InvalidRegex;
pub use skip::{is_non_parseable_filename, is_skip_dir, DEFAULT_SKIP_DIRS, NON_PARSEABLE_FILENAMES};
