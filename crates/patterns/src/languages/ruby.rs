use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "params",
            r"params\s*\[\s*[:'\"]",
            "ruby",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Rails route/query/form parameter access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "request.cookies",
            r"(request\.)?cookies\s*\[",
            "ruby",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Rails cookie jar access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "request.headers",
            r"request\.headers\s*\[",
            "ruby",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Rails request header access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "request.body",
            r"request\.(body|raw_post)\b",
            "ruby",
            SourceType::HttpBody,
            &[InputLabel::HttpBody],
            "Rails raw request body",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "ENV",
            r"ENV\s*\[\s*['\"]",
            "ruby",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Process environment access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "ARGV",
            r"ARGV\s*\[",
            "ruby",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument vector access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "gets_stdin",
            r"\bgets\b",
            "ruby",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin read",
        )
        .with_node_types(&["identifier"]),
        SourceDefinition::new(
            "session",
            r"session\s*\[\s*[:'\"]",
            "ruby",
            SourceType::Session,
            &[],
            "Rails session value access",
        )
        .with_node_types(&["element_reference"]),
        SourceDefinition::new(
            "query_parameters",
            r"request\.query_parameters\b",
            "ruby",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Rails parsed query-string hash",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "path_parameters",
            r"request\.path_parameters\b",
            "ruby",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "Rails matched-route path parameter hash",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "yaml_load",
            r"YAML\.(safe_)?load\(",
            "ruby",
            SourceType::File,
            &[InputLabel::File],
            "YAML document deserialization",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "json_parse_body",
            r"JSON\.parse\(\s*request\.body\.read\s*\)",
            "ruby",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "JSON decode of the raw request body",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "activerecord_find",
            r"\.(find|where)\(\s*params\[",
            "ruby",
            SourceType::Database,
            &[InputLabel::Database],
            "ActiveRecord lookup keyed directly off request params",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "net_http_get",
            r"Net::HTTP\.get\(",
            "ruby",
            SourceType::Network,
            &[InputLabel::Network],
            "Net::HTTP client response body",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "open3_capture",
            r"Open3\.capture[23]?\(",
            "ruby",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess stdout/stderr capture",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "option_parser",
            r"OptionParser\.new\b",
            "ruby",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI option parser declaration",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "stdin_read",
            r"STDIN\.(read|gets)\b",
            "ruby",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Explicit stdin stream read",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "file_read",
            r"File\.(read|readlines)\(",
            "ruby",
            SourceType::File,
            &[InputLabel::File],
            "Whole-file read",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "rack_request",
            r"Rack::Request\.new\(",
            "ruby",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Rack request wrapper construction",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "request_remote_ip",
            r"request\.remote_ip\b",
            "ruby",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Client-controllable remote address, derived from request headers",
        )
        .with_node_types(&["call"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "ruby",
        &["method", "singleton_method", "lambda", "block"],
        &["method", "singleton_method", "class", "module", "do_block"],
        &["assignment", "operator_assignment"],
        &["call", "method_call"],
        &["identifier", "instance_variable"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "ruby".to_string(),
        validations: vec![ValidationPattern {
            pattern: r"validates\s+:".to_string(),
            tag: "activerecord_validation".to_string(),
            confidence: 0.6,
        }],
        sanitizers: vec![
            "ERB::Util.html_escape".to_string(),
            "sanitize".to_string(),
            "CGI.escape".to_string(),
            "ActiveRecord::Base.sanitize_sql".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"current_user\b".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r"current_user\.admin\?".to_string(),
                role: "admin".to_string(),
            },
        ],
    }
}
