use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "request.args",
            r"request\.args\b",
            "python",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Flask query-string MultiDict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.form",
            r"request\.form\b",
            "python",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "Flask form-encoded MultiDict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.json",
            r"request\.(get_json\(\)|json)\b",
            "python",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Flask parsed JSON body",
        )
        .with_node_types(&["call", "attribute"]),
        SourceDefinition::new(
            "request.cookies",
            r"request\.cookies\b",
            "python",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Flask cookie dict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.headers",
            r"request\.headers\b",
            "python",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Flask request headers dict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.GET",
            r"request\.GET\b",
            "python",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Django query-string QueryDict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.POST",
            r"request\.POST\b",
            "python",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "Django form-encoded QueryDict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "sys.argv",
            r"sys\.argv\b",
            "python",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument vector",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "os.environ",
            r"os\.environ\b",
            "python",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Process environment mapping",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "os.getenv",
            r"os\.getenv\(",
            "python",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "input_builtin",
            r"\binput\(",
            "python",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin prompt",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "flask_session",
            r"session\s*\[\s*['\"]",
            "python",
            SourceType::Session,
            &[],
            "Flask/Django session value access",
        )
        .with_node_types(&["subscript"]),
        SourceDefinition::new(
            "request.files",
            r"request\.files\b",
            "python",
            SourceType::HttpFile,
            &[InputLabel::HttpBody],
            "Flask/Django uploaded-file mapping",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "request.values",
            r"request\.values\b",
            "python",
            SourceType::UserInput,
            &[InputLabel::HttpGet, InputLabel::HttpPost],
            "Flask merged args/form MultiDict",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "fastapi_query_param",
            r"[:=]\s*Query\(",
            "python",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "FastAPI Query() dependency-injected parameter",
        )
        .with_node_types(&["default_parameter", "typed_default_parameter"]),
        SourceDefinition::new(
            "fastapi_body_param",
            r"[:=]\s*Body\(",
            "python",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "FastAPI Body() dependency-injected parameter",
        )
        .with_node_types(&["default_parameter", "typed_default_parameter"]),
        SourceDefinition::new(
            "yaml_safe_load",
            r"yaml\.safe_load\(",
            "python",
            SourceType::File,
            &[InputLabel::File],
            "YAML document deserialization",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "json_load_file",
            r"json\.load\(\s*open\(",
            "python",
            SourceType::File,
            &[InputLabel::File],
            "JSON deserialized from an opened file",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "cursor_fetchall",
            r"\.fetch(all|one|many)\(\)",
            "python",
            SourceType::Database,
            &[InputLabel::Database],
            "DB-API 2.0 cursor result read",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "requests_response_json",
            r"requests\.(get|post|put|delete)\([^)]*\)\.json\(\)",
            "python",
            SourceType::Network,
            &[InputLabel::Network],
            "requests HTTP client decoded JSON response",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "subprocess_output",
            r"subprocess\.check_output\(",
            "python",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess stdout capture",
        )
        .with_node_types(&["call"]),
        SourceDefinition::new(
            "click_option",
            r"@click\.(option|argument)\(",
            "python",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "click CLI option/argument declaration",
        )
        .with_node_types(&["decorator"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "python",
        &["function_definition", "lambda"],
        &["function_definition", "class_definition", "block"],
        &["assignment", "augmented_assignment"],
        &["call"],
        &["identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "python".to_string(),
        validations: vec![
            ValidationPattern {
                pattern: r"\w+\.is_valid\(\)".to_string(),
                tag: "form_validation".to_string(),
                confidence: 0.6,
            },
            ValidationPattern {
                pattern: r"re\.match\(".to_string(),
                tag: "pattern_validation".to_string(),
                confidence: 0.5,
            },
        ],
        sanitizers: vec![
            "escape".to_string(),
            "markupsafe.escape".to_string(),
            "bleach.clean".to_string(),
            "shlex.quote".to_string(),
            "html.escape".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"request\.user\.is_authenticated".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r"request\.user\.is_staff".to_string(),
                role: "admin".to_string(),
            },
            AuthPattern {
                pattern: r"login_required".to_string(),
                role: "authenticated".to_string(),
            },
        ],
    }
}
