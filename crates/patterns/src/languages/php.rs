use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "$_GET",
            r"\$_GET\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Query-string parameter access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_GET\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_POST",
            r"\$_POST\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "Form-encoded POST field access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_POST\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_REQUEST",
            r"\$_REQUEST\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpRequest,
            &[InputLabel::HttpGet, InputLabel::HttpPost],
            "Merged GET/POST/COOKIE field access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_REQUEST\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_COOKIE",
            r"\$_COOKIE\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Cookie value access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_COOKIE\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_SERVER",
            r"\$_SERVER\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Server/request metadata access, see server key table for user-controllability",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_SERVER\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_FILES",
            r"\$_FILES\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::HttpFile,
            &[InputLabel::HttpBody],
            "Uploaded file metadata access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_FILES\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_ENV",
            r"\$_ENV\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable access via superglobal",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_ENV\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "$_SESSION",
            r"\$_SESSION\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]",
            "php",
            SourceType::Session,
            &[],
            "Session-stored value access",
        )
        .with_node_types(&["subscript_expression"])
        .with_key_extractor(r"\$_SESSION\s*\[\s*['\"]([A-Za-z0-9_]+)['\"]\s*\]"),
        SourceDefinition::new(
            "php://input",
            r#"file_get_contents\(\s*['"]php://input['"]\s*\)"#,
            "php",
            SourceType::HttpBody,
            &[InputLabel::HttpBody],
            "Raw request body read",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "getenv",
            r"getenv\(",
            "php",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "argv",
            r"\$argv\s*\[",
            "php",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument access",
        )
        .with_node_types(&["subscript_expression"]),
        SourceDefinition::new(
            "fgets_stdin",
            r"fgets\(\s*STDIN\s*\)",
            "php",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin read",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "http_getallheaders",
            r"getallheaders\(\)",
            "php",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "All-headers accessor",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "apache_request_headers",
            r"apache_request_headers\(\)",
            "php",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Apache request headers accessor",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "pdo_query_param",
            r"\$_(GET|POST|REQUEST|COOKIE)\b",
            "php",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Bare superglobal reference fallback, used when the node kind isn't subscript",
        )
        .with_node_types(&["variable_name"]),
        SourceDefinition::new(
            "filter_input",
            r"filter_input\(\s*INPUT_(GET|POST|COOKIE|ENV|SERVER)",
            "php",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Filtered superglobal read via filter_input()",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "laravel_request_input",
            r"\$request->(input|query|get|all|file)\(",
            "php",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Laravel Illuminate\\Http\\Request accessor",
        )
        .with_node_types(&["member_call_expression"]),
        SourceDefinition::new(
            "symfony_request_get",
            r"\$request->(query|request|cookies|headers|files)->get\(",
            "php",
            SourceType::UserInput,
            &[InputLabel::UserInput],
            "Symfony HttpFoundation ParameterBag accessor",
        )
        .with_node_types(&["member_call_expression"]),
        SourceDefinition::new(
            "mysqli_fetch_row",
            r"mysqli_fetch_(assoc|array|row)\(",
            "php",
            SourceType::Database,
            &[InputLabel::Database],
            "mysqli result-row cursor read",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "pdo_fetch",
            r"->fetch(All)?\(",
            "php",
            SourceType::Database,
            &[InputLabel::Database],
            "PDOStatement result-row cursor read",
        )
        .with_node_types(&["member_call_expression"]),
        SourceDefinition::new(
            "curl_exec",
            r"curl_exec\(",
            "php",
            SourceType::Network,
            &[InputLabel::Network],
            "cURL response body",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "json_decode_input",
            r"json_decode\(\s*file_get_contents",
            "php",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Decoded JSON read from the raw request body",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "getopt",
            r"\bgetopt\(",
            "php",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "Command-line option parsing",
        )
        .with_node_types(&["function_call_expression"]),
        SourceDefinition::new(
            "yaml_parse_file",
            r"yaml_parse_file\(",
            "php",
            SourceType::File,
            &[InputLabel::File],
            "YAML file deserialization",
        )
        .with_node_types(&["function_call_expression"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "php",
        &["function_definition", "method_declaration", "anonymous_function", "arrow_function"],
        &["function_definition", "method_declaration", "class_declaration", "compound_statement"],
        &["assignment_expression"],
        &["function_call_expression", "member_call_expression", "scoped_call_expression"],
        &["variable_name", "name"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "php".to_string(),
        validations: vec![
            ValidationPattern {
                pattern: r"filter_var\(".to_string(),
                tag: "input_validation".to_string(),
                confidence: 0.8,
            },
            ValidationPattern {
                pattern: r"ctype_\w+\(".to_string(),
                tag: "type_check".to_string(),
                confidence: 0.6,
            },
            ValidationPattern {
                pattern: r"preg_match\(".to_string(),
                tag: "pattern_validation".to_string(),
                confidence: 0.5,
            },
        ],
        sanitizers: vec![
            "htmlspecialchars".to_string(),
            "htmlentities".to_string(),
            "addslashes".to_string(),
            "mysqli_real_escape_string".to_string(),
            "filter_var".to_string(),
            "strip_tags".to_string(),
            "intval".to_string(),
            "escapeshellarg".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"\$_SESSION\s*\[\s*['\"]user_id['\"]".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r"is_admin\(".to_string(),
                role: "admin".to_string(),
            },
        ],
    }
}
