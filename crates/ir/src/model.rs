//! The taint data model: sources, tainted variables/functions, propagation
//! paths, scopes and function summaries.
//!
//! Everything here is a plain data type; the logic that builds and mutates
//! these values lives in the `engine` crate. Keeping the model in its own
//! crate lets `patterns`, `engine`, `reporters` and `cli` all depend on it
//! without depending on each other.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A location within a source file. Lines are 1-indexed; columns are
/// 0-indexed and codepoint-counted, matching tree-sitter's own convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Location {
    pub fn new(file_path: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
            end_line: line,
            end_column: column,
            snippet: None,
        }
    }

    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = end_line;
        self.end_column = end_column;
        self
    }

    pub fn with_snippet(mut self, text: &str) -> Self {
        self.snippet = Some(normalize_snippet(text));
        self
    }
}

/// Whitespace-normalizes and truncates a snippet to 100 chars, matching the
/// C2 source-matcher contract.
pub fn normalize_snippet(text: &str) -> String {
    let normalized: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() > 100 {
        normalized.chars().take(100).collect()
    } else {
        normalized
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputLabel {
    HttpGet,
    HttpPost,
    HttpCookie,
    HttpHeader,
    HttpBody,
    Cli,
    Environment,
    File,
    Database,
    Network,
    UserInput,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    HttpGet,
    HttpPost,
    HttpBody,
    HttpJson,
    HttpHeader,
    HttpCookie,
    HttpPath,
    HttpFile,
    HttpRequest,
    Session,
    CliArg,
    EnvVar,
    Stdin,
    File,
    Database,
    Network,
    UserInput,
    Unknown,
}

impl SourceType {
    /// The fixed partial `SourceType -> InputLabel` mapping from §6. A
    /// handful of finer types (http_json, http_path, http_file,
    /// http_request, session) have no single label partner and map to
    /// `None`.
    pub fn input_label(self) -> Option<InputLabel> {
        match self {
            SourceType::HttpGet => Some(InputLabel::HttpGet),
            SourceType::HttpPost => Some(InputLabel::HttpPost),
            SourceType::HttpCookie => Some(InputLabel::HttpCookie),
            SourceType::HttpHeader => Some(InputLabel::HttpHeader),
            SourceType::HttpBody => Some(InputLabel::HttpBody),
            SourceType::CliArg => Some(InputLabel::Cli),
            SourceType::EnvVar => Some(InputLabel::Environment),
            SourceType::File => Some(InputLabel::File),
            SourceType::Database => Some(InputLabel::Database),
            SourceType::Network => Some(InputLabel::Network),
            SourceType::UserInput => Some(InputLabel::UserInput),
            SourceType::HttpJson
            | SourceType::HttpPath
            | SourceType::HttpFile
            | SourceType::HttpRequest
            | SourceType::Session
            | SourceType::Stdin
            | SourceType::Unknown => None,
        }
    }
}

/// An untrusted-input entry point discovered by the source matcher (C2).
/// Immutable once recorded (invariant: created during file analysis, never
/// mutated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub id: Uuid,
    /// The matcher's definition name, e.g. `"$_GET"` or `"request.args"`.
    #[serde(rename = "type")]
    pub source_type: String,
    pub key: Option<String>,
    pub location: Location,
    pub labels: Vec<InputLabel>,
    pub language: String,
}

impl InputSource {
    pub fn new(
        source_type: impl Into<String>,
        key: Option<String>,
        location: Location,
        labels: Vec<InputLabel>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_type: source_type.into(),
            key,
            location,
            labels,
            language: language.into(),
        }
    }
}

/// A variable known to carry tainted data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintedVariable {
    pub id: Uuid,
    pub name: String,
    /// Qualified scope name, e.g. `"handler.inner"`.
    pub scope: String,
    pub source: InputSource,
    pub location: Location,
    pub depth: usize,
    pub language: String,
}

impl TaintedVariable {
    /// Dedup key per invariant 6: `name ":" scope ":" file_path`.
    pub fn dedup_key(name: &str, scope: &str, file_path: &str) -> String {
        format!("{name}:{scope}:{file_path}")
    }

    pub fn key(&self) -> String {
        Self::dedup_key(&self.name, &self.scope, &self.source.location.file_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaintedParam {
    pub index: usize,
    pub name: String,
    pub source: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A function observed to receive tainted arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintedFunction {
    pub id: Uuid,
    pub name: String,
    pub file_path: String,
    pub line: usize,
    pub language: String,
    pub tainted_params: Vec<TaintedParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receives_through: Option<String>,
}

impl TaintedFunction {
    /// Dedup key per invariant 7: `name ":" file_path`.
    pub fn dedup_key(name: &str, file_path: &str) -> String {
        format!("{name}:{file_path}")
    }

    pub fn key(&self) -> String {
        Self::dedup_key(&self.name, &self.file_path)
    }

    /// Merges another function's tainted params into this one: a union
    /// keyed by `(index, name)`, matching the C7 add-tainted-function
    /// semantics.
    pub fn merge_params(&mut self, other: &[TaintedParam]) {
        for p in other {
            let exists = self
                .tainted_params
                .iter()
                .any(|e| e.index == p.index && e.name == p.name);
            if !exists {
                self.tainted_params.push(p.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropagationStepType {
    Assignment,
    ParameterPass,
    Return,
    Concatenation,
    ArrayAccess,
    ObjectAccess,
    Destructure,
    InterproceduralReturn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationStep {
    #[serde(rename = "type")]
    pub step_type: PropagationStepType,
    pub variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationPath {
    pub source: Uuid,
    pub steps: Vec<PropagationStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl PropagationPath {
    pub fn new(source: Uuid) -> Self {
        Self {
            source,
            steps: Vec::new(),
            destination: None,
        }
    }
}

/// A lexical scope. Scopes form a rooted tree with `Global` at the root
/// (invariant 3: acyclic, every variable definition belongs to exactly one
/// scope).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Global,
    File,
    Module,
    Class,
    Function,
    Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: ScopeKind,
    pub name: String,
    /// `None` only for the root scope. Serialized as `parent_id` per §9:
    /// parent/child links must not be serialized as object graphs.
    #[serde(rename = "parent_id")]
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub start_loc: Location,
}

/// A per-function capsule approximating inter-procedural dataflow (C6).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FunctionSummary {
    pub name: String,
    pub file_path: String,
    pub language: String,
    pub parameters: Vec<String>,
    pub params_to_return: std::collections::BTreeSet<usize>,
    pub params_to_params: std::collections::BTreeMap<usize, std::collections::BTreeSet<usize>>,
    pub called_functions: Vec<String>,
    pub is_source: bool,
}

impl FunctionSummary {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            language: language.into(),
            ..Default::default()
        }
    }
}
