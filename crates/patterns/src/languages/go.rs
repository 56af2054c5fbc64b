use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "r.FormValue",
            r"\.FormValue\(",
            "go",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "net/http merged form value lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "r.URL.Query",
            r"\.URL\.Query\(\)",
            "go",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "net/http query-string values",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "r.PostFormValue",
            r"\.PostFormValue\(",
            "go",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "net/http POST-only form value lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "r.Header.Get",
            r"\.Header\.Get\(",
            "go",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "net/http request header lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "c.Query",
            r"\.Query\(",
            "go",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "gin context query-string lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "c.PostForm",
            r"\.PostForm\(",
            "go",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "gin context form-field lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "os.Getenv",
            r"os\.Getenv\(",
            "go",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "os.Args",
            r"os\.Args\b",
            "go",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument vector",
        )
        .with_node_types(&["selector_expression"]),
        SourceDefinition::new(
            "bufio_stdin",
            r"bufio\.NewReader\(\s*os\.Stdin\s*\)",
            "go",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Buffered stdin reader",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "r.Cookie",
            r"\.Cookie\(",
            "go",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "net/http request cookie lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "mux.Vars",
            r"mux\.Vars\(",
            "go",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "gorilla/mux route path-parameter map",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "gin_param",
            r"\.Param\(",
            "go",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "gin context route path-parameter lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "json_decode_body",
            r"json\.NewDecoder\(\s*r\.Body\s*\)",
            "go",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Streaming JSON decode of the request body",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "yaml_unmarshal",
            r"yaml\.Unmarshal\(",
            "go",
            SourceType::File,
            &[InputLabel::File],
            "YAML document deserialization",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "rows_scan",
            r"rows\.Scan\(",
            "go",
            SourceType::Database,
            &[InputLabel::Database],
            "database/sql rows cursor read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "http_get_response",
            r"http\.Get\(",
            "go",
            SourceType::Network,
            &[InputLabel::Network],
            "net/http client response",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "flag_parse",
            r"flag\.(String|Int|Bool)\(",
            "go",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI flag declaration",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "ioutil_readfile",
            r"(ioutil|os)\.ReadFile\(",
            "go",
            SourceType::File,
            &[InputLabel::File],
            "Whole-file read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "grpc_metadata",
            r"metadata\.FromIncomingContext\(",
            "go",
            SourceType::Network,
            &[InputLabel::Network],
            "gRPC incoming request metadata",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "os.Environ",
            r"os\.Environ\(\)",
            "go",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Full process environment listing",
        )
        .with_node_types(&["call_expression"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "go",
        &["function_declaration", "method_declaration", "func_literal"],
        &["function_declaration", "method_declaration", "func_literal", "block"],
        &["short_var_declaration", "assignment_statement"],
        &["call_expression"],
        &["identifier", "field_identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "go".to_string(),
        validations: vec![ValidationPattern {
            pattern: r"validator\.(New|Struct)\(".to_string(),
            tag: "struct_validation".to_string(),
            confidence: 0.6,
        }],
        sanitizers: vec![
            "html.EscapeString".to_string(),
            "template.HTMLEscapeString".to_string(),
            "strconv.Quote".to_string(),
        ],
        auth_patterns: vec![AuthPattern {
            pattern: r"session\.Get\(\s*['\"]user_id['\"]".to_string(),
            role: "authenticated".to_string(),
        }],
    }
}
