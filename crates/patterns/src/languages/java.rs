use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "getParameter",
            r"\.getParameter\(",
            "java",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Servlet query/form parameter lookup",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "getHeader",
            r"\.getHeader\(",
            "java",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Servlet request header lookup",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "getCookies",
            r"\.getCookies\(\)",
            "java",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Servlet cookie array",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "getInputStream",
            r"\.getInputStream\(\)",
            "java",
            SourceType::HttpBody,
            &[InputLabel::HttpBody],
            "Servlet raw request body stream",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "RequestParam_annotation",
            r"@RequestParam\b",
            "java",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Spring MVC bound query parameter",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "RequestBody_annotation",
            r"@RequestBody\b",
            "java",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Spring MVC bound JSON request body",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "System.getenv",
            r"System\.getenv\(",
            "java",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "System.getProperty",
            r"System\.getProperty\(",
            "java",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "JVM system property lookup",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "Scanner_stdin",
            r"new\s+Scanner\(\s*System\.in\s*\)",
            "java",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin scanner",
        )
        .with_node_types(&["object_creation_expression"]),
        SourceDefinition::new(
            "PathVariable_annotation",
            r"@PathVariable\b",
            "java",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "Spring MVC bound route path parameter",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "QueryParam_annotation",
            r"@QueryParam\b",
            "java",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "JAX-RS bound query parameter",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "HeaderParam_annotation",
            r"@HeaderParam\b",
            "java",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "JAX-RS bound request header",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "CookieParam_annotation",
            r"@CookieParam\b",
            "java",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "JAX-RS bound request cookie",
        )
        .with_node_types(&["marker_annotation"]),
        SourceDefinition::new(
            "getParameterMap",
            r"\.getParameterMap\(\)",
            "java",
            SourceType::UserInput,
            &[InputLabel::HttpGet, InputLabel::HttpPost],
            "Servlet full parameter map",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "ResultSet_get",
            r"\.getString\(|\.getInt\(|\.getObject\(",
            "java",
            SourceType::Database,
            &[InputLabel::Database],
            "JDBC ResultSet column read",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "ObjectMapper_readValue",
            r"\.readValue\(",
            "java",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "Jackson ObjectMapper JSON deserialization",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "Files_readAllBytes",
            r"Files\.readAllBytes\(",
            "java",
            SourceType::File,
            &[InputLabel::File],
            "Whole-file byte read",
        )
        .with_node_types(&["method_invocation"]),
        SourceDefinition::new(
            "BufferedReader_stdin",
            r"new\s+InputStreamReader\(\s*System\.in\s*\)",
            "java",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Buffered stdin reader",
        )
        .with_node_types(&["object_creation_expression"]),
        SourceDefinition::new(
            "ProcessBuilder_start",
            r"new\s+ProcessBuilder\(|Runtime\.getRuntime\(\)\.exec\(",
            "java",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess output capture",
        )
        .with_node_types(&["object_creation_expression", "method_invocation"]),
        SourceDefinition::new(
            "HttpClient_send",
            r"HttpClient\.(newHttpClient\(\)\.)?send\(",
            "java",
            SourceType::Network,
            &[InputLabel::Network],
            "java.net.http HTTP client response",
        )
        .with_node_types(&["method_invocation"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "java",
        &["method_declaration", "constructor_declaration", "lambda_expression"],
        &["method_declaration", "constructor_declaration", "class_declaration", "block"],
        &["assignment_expression", "local_variable_declaration"],
        &["method_invocation", "object_creation_expression"],
        &["identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "java".to_string(),
        validations: vec![ValidationPattern {
            pattern: r"@Valid\b".to_string(),
            tag: "bean_validation".to_string(),
            confidence: 0.7,
        }],
        sanitizers: vec![
            "StringEscapeUtils.escapeHtml4".to_string(),
            "ESAPI.encoder".to_string(),
            "Jsoup.clean".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"@PreAuthorize\(".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r#"hasRole\(\s*['"]ADMIN['"]"#.to_string(),
                role: "admin".to_string(),
            },
        ],
    }
}
