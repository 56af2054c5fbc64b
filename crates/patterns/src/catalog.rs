//! Core catalog types and the process-wide registry that backs them.
//!
//! The registry is populated once at startup from the built-in
//! per-language tables (`languages::*`) and never mutated afterward except
//! for `register_custom_source`, which the loader calls once, before any
//! file is analyzed (§9).

use crate::regex_cache::{self, InvalidRegex};
use ir::{InputLabel, SourceType};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// A single catalog entry: "this text, in this AST node kind, in this
/// language, is user input."
#[derive(Debug, Clone)]
pub struct SourceDefinition {
    pub name: String,
    pub pattern: String,
    pub language: String,
    pub labels: Vec<InputLabel>,
    pub description: String,
    /// Eligible AST node-kind names. Empty means "any kind".
    pub node_types: Vec<String>,
    /// Regex with one or two alternation capturing groups; the first
    /// non-empty group becomes the match's `key`.
    pub key_extractor: Option<String>,
    pub source_type: SourceType,
}

impl SourceDefinition {
    pub fn new(
        name: &str,
        pattern: &str,
        language: &str,
        source_type: SourceType,
        labels: &[InputLabel],
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            language: language.to_string(),
            labels: labels.to_vec(),
            description: description.to_string(),
            node_types: Vec::new(),
            key_extractor: None,
            source_type,
        }
    }

    pub fn with_node_types(mut self, kinds: &[&str]) -> Self {
        self.node_types = kinds.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_key_extractor(mut self, pattern: &str) -> Self {
        self.key_extractor = Some(pattern.to_string());
        self
    }

    pub fn matches_node_kind(&self, kind: &str) -> bool {
        self.node_types.is_empty() || self.node_types.iter().any(|k| k == kind)
    }

    /// Checks the definition's regex against `text`, surfacing a catalog
    /// load error (not a per-file error) per §4.2/§7.
    pub fn matches_text(&self, text: &str) -> Result<bool, InvalidRegex> {
        Ok(regex_cache::get_or_compile(&self.pattern)?.is_match(text))
    }

    /// Applies the key extractor, if any, returning the first non-empty
    /// capturing group.
    pub fn extract_key(&self, text: &str) -> Result<Option<String>, InvalidRegex> {
        let Some(pattern) = &self.key_extractor else {
            return Ok(None);
        };
        let re = regex_cache::get_or_compile(pattern)?;
        Ok(re.captures(text).and_then(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .find(|s| !s.is_empty())
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodCategory {
    Http,
    File,
    Command,
    Generic,
}

/// `(var_pattern, method_name, category, source_type, framework)`.
/// `var_pattern = "*"` matches any receiver.
#[derive(Debug, Clone)]
pub struct InputMethod {
    pub var_pattern: String,
    pub method_name: String,
    pub category: MethodCategory,
    pub source_type: SourceType,
    pub framework: String,
}

impl InputMethod {
    pub fn new(
        var_pattern: &str,
        method_name: &str,
        category: MethodCategory,
        source_type: SourceType,
        framework: &str,
    ) -> Self {
        Self {
            var_pattern: var_pattern.to_string(),
            method_name: method_name.to_string(),
            category,
            source_type,
            framework: framework.to_string(),
        }
    }

    pub fn matches_receiver(&self, receiver: &str) -> bool {
        self.var_pattern == "*" || self.var_pattern == receiver
    }
}

/// PHP superglobal metadata, keyed by canonical name (`$_GET`).
#[derive(Debug, Clone)]
pub struct Superglobal {
    pub name: String,
    pub alias: String,
    pub source_type: SourceType,
    pub labels: Vec<InputLabel>,
    pub description: String,
}

/// Per-language AST node-kind classification used by the extractor (C3)
/// and matcher (C2) to decide what counts as a function definition, a
/// scope-introducing node, an assignment, a call, or an identifier.
#[derive(Debug, Clone, Default)]
pub struct NodeKindTable {
    pub language: String,
    pub function_defs: Vec<String>,
    pub scopes: Vec<String>,
    pub assignments: Vec<String>,
    pub calls: Vec<String>,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ValidationPattern {
    pub pattern: String,
    pub tag: String,
    pub confidence: f32,
}

#[derive(Debug, Clone)]
pub struct AuthPattern {
    pub pattern: String,
    pub role: String,
}

/// Per-language security predicates (§4.1): validation function regexes
/// with a classification tag and confidence, a sanitizer name set, and
/// auth-pattern regexes with a role tag. These are recorded for downstream
/// consumers; the engine itself does not use them to quash taint (Non-goal
/// in §1: "the engine records security-relevant predicates but does not
/// soundly quash taint").
#[derive(Debug, Clone, Default)]
pub struct SecurityCatalog {
    pub language: String,
    pub validations: Vec<ValidationPattern>,
    pub sanitizers: Vec<String>,
    pub auth_patterns: Vec<AuthPattern>,
}

impl SecurityCatalog {
    pub fn is_sanitizer(&self, name: &str) -> bool {
        self.sanitizers.iter().any(|s| s == name)
    }
}

struct Registry {
    sources: HashMap<String, Vec<SourceDefinition>>,
    input_methods: HashMap<String, Vec<InputMethod>>,
    superglobals: HashMap<String, Superglobal>,
    server_user_controllable: Vec<String>,
    node_kinds: HashMap<String, NodeKindTable>,
    security: HashMap<String, SecurityCatalog>,
}

fn build_registry() -> Registry {
    let mut sources: HashMap<String, Vec<SourceDefinition>> = HashMap::new();
    let mut node_kinds: HashMap<String, NodeKindTable> = HashMap::new();
    let mut security: HashMap<String, SecurityCatalog> = HashMap::new();

    for (lang, defs, kinds, sec) in crate::languages::all() {
        sources.insert(lang.to_string(), defs);
        node_kinds.insert(lang.to_string(), kinds);
        security.insert(lang.to_string(), sec);
    }

    let (superglobals, server_user_controllable) = crate::php::superglobals();

    Registry {
        sources,
        input_methods: crate::input_methods::all(),
        superglobals,
        server_user_controllable,
        node_kinds,
        security,
    }
}

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(build_registry()))
}

/// Registers a custom source definition. Intended to run once at startup,
/// before any file is analyzed (§9) — the loader calls this while applying
/// `Configuration::custom_sources`.
pub fn register_custom_source(def: SourceDefinition) {
    registry()
        .write()
        .expect("catalog registry lock poisoned")
        .sources
        .entry(def.language.clone())
        .or_default()
        .push(def);
}

/// `tsx` carries its own tree-sitter grammar (§13) but shares TypeScript's
/// catalog entries: the taint-relevant surface is identical and splitting
/// it into a twelfth language table would just duplicate `typescript`'s.
fn canonical_language(language: &str) -> &str {
    match language {
        "tsx" => "typescript",
        other => other,
    }
}

/// Returns every source definition registered for `language`.
pub fn sources_for(language: &str) -> Vec<SourceDefinition> {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .sources
        .get(canonical_language(language))
        .cloned()
        .unwrap_or_default()
}

pub fn input_methods_for(language: &str) -> Vec<InputMethod> {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .input_methods
        .get(canonical_language(language))
        .cloned()
        .unwrap_or_default()
}

pub fn superglobal(name: &str) -> Option<Superglobal> {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .superglobals
        .get(name)
        .cloned()
}

pub fn all_superglobals() -> Vec<Superglobal> {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .superglobals
        .values()
        .cloned()
        .collect()
}

/// Whether a `$_SERVER['KEY']` selector is user-controllable (as opposed to
/// server-config, e.g. `DOCUMENT_ROOT`).
pub fn is_server_key_user_controllable(key: &str) -> bool {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .server_user_controllable
        .iter()
        .any(|k| k == key)
}

pub fn node_kinds_for(language: &str) -> NodeKindTable {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .node_kinds
        .get(canonical_language(language))
        .cloned()
        .unwrap_or_else(crate::node_kinds::universal_fallback)
}

pub fn security_for(language: &str) -> SecurityCatalog {
    registry()
        .read()
        .expect("catalog registry lock poisoned")
        .security
        .get(canonical_language(language))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_custom_source_is_visible_immediately() {
        let before = sources_for("php").len();
        register_custom_source(SourceDefinition::new(
            "custom_test_source_xyz",
            r"custom_input\(\)",
            "php",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "test-only custom source",
        ));
        assert_eq!(sources_for("php").len(), before + 1);
    }

    #[test]
    fn unknown_language_returns_empty_catalog() {
        assert!(sources_for("brainfuck").is_empty());
        assert!(input_methods_for("brainfuck").is_empty());
    }
}
