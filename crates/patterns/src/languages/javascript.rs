use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "req.query",
            r"req\.query\b",
            "javascript",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Express query-string object",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "req.body",
            r"req\.body\b",
            "javascript",
            SourceType::HttpBody,
            &[InputLabel::HttpBody],
            "Express parsed request body",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "req.params",
            r"req\.params\b",
            "javascript",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "Express route-parameter object",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "req.cookies",
            r"req\.cookies\b",
            "javascript",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Express cookie-jar object",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "req.headers",
            r"req\.headers\b",
            "javascript",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Express request headers object",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "process.argv",
            r"process\.argv\b",
            "javascript",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "Node CLI argument vector",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "process.env",
            r"process\.env\b",
            "javascript",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Node process environment map",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "window.location",
            r"(window\.)?location\.(search|hash|href)\b",
            "javascript",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Browser URL-derived input",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "fetch_response_json",
            r"\.json\(\)\s*$",
            "javascript",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Parsed JSON response body, treated as externally controlled",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "stdin_readline",
            r"readline\.createInterface\(",
            "javascript",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin reader",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "req.files",
            r"req\.files\b",
            "javascript",
            SourceType::HttpFile,
            &[InputLabel::HttpBody],
            "multer/express-fileupload uploaded-file object",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "fs.readFileSync",
            r"fs\.readFileSync\(",
            "javascript",
            SourceType::File,
            &[InputLabel::File],
            "Synchronous file read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "child_process_exec",
            r"(child_process\.)?exec(Sync)?\(",
            "javascript",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess stdout capture",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "db_query_rows",
            r"\.(query|find)\([^)]*\)\.then\(",
            "javascript",
            SourceType::Database,
            &[InputLabel::Database],
            "Database driver/ORM query result rows",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "json_parse_file",
            r"JSON\.parse\(\s*fs\.readFileSync",
            "javascript",
            SourceType::File,
            &[InputLabel::File],
            "JSON deserialized from a file on disk",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "yaml_load",
            r"(yaml|YAML)\.(load|parse)\(",
            "javascript",
            SourceType::File,
            &[InputLabel::File],
            "js-yaml document load",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "document.cookie",
            r"document\.cookie\b",
            "javascript",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Browser document cookie jar",
        )
        .with_node_types(&["member_expression"]),
        SourceDefinition::new(
            "localStorage.getItem",
            r"localStorage\.getItem\(",
            "javascript",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Browser localStorage read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "process.stdin",
            r"process\.stdin\.on\(",
            "javascript",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Raw stdin stream subscription",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "axios_response",
            r"axios\.(get|post|put|delete)\([^)]*\)\.then\(",
            "javascript",
            SourceType::Network,
            &[InputLabel::Network],
            "axios HTTP client response body",
        )
        .with_node_types(&["call_expression"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "javascript",
        &["function_declaration", "function_expression", "arrow_function", "method_definition"],
        &["function_declaration", "function_expression", "arrow_function", "method_definition", "class_declaration", "statement_block"],
        &["assignment_expression", "variable_declarator"],
        &["call_expression", "new_expression"],
        &["identifier", "shorthand_property_identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "javascript".to_string(),
        validations: vec![
            ValidationPattern {
                pattern: r"validator\.\w+\(".to_string(),
                tag: "input_validation".to_string(),
                confidence: 0.7,
            },
            ValidationPattern {
                pattern: r"\.test\(".to_string(),
                tag: "pattern_validation".to_string(),
                confidence: 0.4,
            },
        ],
        sanitizers: vec![
            "escapeHtml".to_string(),
            "DOMPurify.sanitize".to_string(),
            "encodeURIComponent".to_string(),
            "sanitize-html".to_string(),
            "mysql.escape".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"req\.session\.userId".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r"req\.user\.isAdmin".to_string(),
                role: "admin".to_string(),
            },
        ],
    }
}
