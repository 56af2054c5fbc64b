use crate::catalog::{NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "env_var",
            r"std::env::var\(|env::var\(",
            "rust",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "env_args",
            r"std::env::args\(\)|env::args\(\)",
            "rust",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument iterator",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "stdin_read_line",
            r"\.read_line\(",
            "rust",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "axum_query",
            r"Query<",
            "rust",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Axum typed query-string extractor",
        )
        .with_node_types(&["generic_type"]),
        SourceDefinition::new(
            "axum_json",
            r"Json<",
            "rust",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Axum typed JSON-body extractor",
        )
        .with_node_types(&["generic_type"]),
        SourceDefinition::new(
            "http_header_map",
            r"HeaderMap\b",
            "rust",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Axum/actix-web header-map extractor",
        )
        .with_node_types(&["type_identifier"]),
        SourceDefinition::new(
            "actix_web_query",
            r"web::Query<",
            "rust",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "actix-web typed query-string extractor",
        )
        .with_node_types(&["generic_type"]),
        SourceDefinition::new(
            "axum_path",
            r"Path<",
            "rust",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "Axum typed route path-parameter extractor",
        )
        .with_node_types(&["generic_type"]),
        SourceDefinition::new(
            "actix_web_form",
            r"web::Form<|web::Json<",
            "rust",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "actix-web typed form/JSON body extractor",
        )
        .with_node_types(&["generic_type"]),
        SourceDefinition::new(
            "serde_json_from_str",
            r"serde_json::from_(str|reader|slice)\(",
            "rust",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "serde_json deserialization of external bytes",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "serde_yaml_from_str",
            r"serde_yaml::from_(str|reader)\(",
            "rust",
            SourceType::File,
            &[InputLabel::File],
            "serde_yaml document deserialization",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "toml_from_str",
            r"toml::from_str\(",
            "rust",
            SourceType::File,
            &[InputLabel::File],
            "TOML document deserialization",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "fs_read_to_string",
            r"std::fs::read_to_string\(|fs::read_to_string\(",
            "rust",
            SourceType::File,
            &[InputLabel::File],
            "Whole-file read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "reqwest_response",
            r"reqwest::get\(|\.send\(\)\.await",
            "rust",
            SourceType::Network,
            &[InputLabel::Network],
            "reqwest HTTP client response",
        )
        .with_node_types(&["call_expression", "await_expression"]),
        SourceDefinition::new(
            "process_command_output",
            r"std::process::Command::new\(|Command::new\(",
            "rust",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess output capture",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "clap_parser",
            r"#\[derive\(.*Parser.*\)\]|#\[command\(",
            "rust",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "clap derive CLI argument struct",
        )
        .with_node_types(&["attribute_item"]),
        SourceDefinition::new(
            "sqlx_query_row",
            r"\.fetch_(one|all|optional)\(",
            "rust",
            SourceType::Database,
            &[InputLabel::Database],
            "sqlx query result row(s)",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "rusqlite_row_get",
            r"row\.get\(",
            "rust",
            SourceType::Database,
            &[InputLabel::Database],
            "rusqlite row column read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "tcp_stream_read",
            r"TcpStream::(connect|read)\(",
            "rust",
            SourceType::Network,
            &[InputLabel::Network],
            "Raw TCP socket read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "tonic_request",
            r"tonic::Request<",
            "rust",
            SourceType::Network,
            &[InputLabel::Network],
            "tonic gRPC request payload",
        )
        .with_node_types(&["generic_type"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "rust",
        &["function_item", "closure_expression"],
        &["function_item", "closure_expression", "impl_item", "block"],
        &["let_declaration", "assignment_expression"],
        &["call_expression", "macro_invocation"],
        &["identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "rust".to_string(),
        validations: vec![ValidationPattern {
            pattern: r"\.validate\(\)".to_string(),
            tag: "validator_crate".to_string(),
            confidence: 0.5,
        }],
        sanitizers: vec!["askama_escape::escape".to_string(), "v_htmlescape::escape".to_string()],
        auth_patterns: vec![],
    }
}
