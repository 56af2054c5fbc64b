use crate::catalog::{AuthPattern, NodeKindTable, SecurityCatalog, SourceDefinition, ValidationPattern};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "Request.Query",
            r"Request\.Query\b",
            "c_sharp",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "ASP.NET Core query-string collection",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "Request.Form",
            r"Request\.Form\b",
            "c_sharp",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "ASP.NET Core form-field collection",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "Request.Cookies",
            r"Request\.Cookies\b",
            "c_sharp",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "ASP.NET Core cookie collection",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "Request.Headers",
            r"Request\.Headers\b",
            "c_sharp",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "ASP.NET Core request header collection",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "FromBody_attribute",
            r"\[FromBody\]",
            "c_sharp",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "ASP.NET Core model-bound JSON body",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "Environment.GetEnvironmentVariable",
            r"Environment\.GetEnvironmentVariable\(",
            "c_sharp",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "Console_ReadLine",
            r"Console\.ReadLine\(\)",
            "c_sharp",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive console read",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "Environment.GetCommandLineArgs",
            r"Environment\.GetCommandLineArgs\(\)",
            "c_sharp",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument vector",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "FromRoute_attribute",
            r"\[FromRoute\]",
            "c_sharp",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "ASP.NET Core model-bound route path parameter",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "FromQuery_attribute",
            r"\[FromQuery\]",
            "c_sharp",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "ASP.NET Core model-bound query-string parameter",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "FromHeader_attribute",
            r"\[FromHeader\]",
            "c_sharp",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "ASP.NET Core model-bound request header",
        )
        .with_node_types(&["attribute"]),
        SourceDefinition::new(
            "Request.RouteValues",
            r"Request\.RouteValues\b",
            "c_sharp",
            SourceType::HttpPath,
            &[InputLabel::UserInput],
            "ASP.NET Core route-value dictionary",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "JsonSerializer_Deserialize",
            r"JsonSerializer\.Deserialize(Async)?\(",
            "c_sharp",
            SourceType::HttpJson,
            &[InputLabel::HttpBody],
            "System.Text.Json deserialization",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "File.ReadAllText",
            r"File\.ReadAllText(Async)?\(",
            "c_sharp",
            SourceType::File,
            &[InputLabel::File],
            "Whole-file read",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "SqlDataReader_Get",
            r"\.GetString\(|\.GetInt32\(|\.GetValue\(",
            "c_sharp",
            SourceType::Database,
            &[InputLabel::Database],
            "ADO.NET SqlDataReader column read",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "HttpClient_GetStringAsync",
            r"HttpClient\(\)\.GetStringAsync\(|\.GetStringAsync\(",
            "c_sharp",
            SourceType::Network,
            &[InputLabel::Network],
            "HttpClient response body",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "Process.Start",
            r"Process\.Start\(",
            "c_sharp",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess output capture",
        )
        .with_node_types(&["invocation_expression"]),
        SourceDefinition::new(
            "Environment.CommandLine",
            r"Environment\.CommandLine\b",
            "c_sharp",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "Raw CLI command-line string",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "HttpContext_Request_Form",
            r"HttpContext\.Request\.Form\b",
            "c_sharp",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "ASP.NET Core form-field collection via HttpContext",
        )
        .with_node_types(&["member_access_expression"]),
        SourceDefinition::new(
            "Console_ReadLine_explicit",
            r"Console\.In\.ReadLine\(\)",
            "c_sharp",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Explicit standard-input stream read",
        )
        .with_node_types(&["invocation_expression"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "c_sharp",
        &["method_declaration", "local_function_statement", "lambda_expression"],
        &["method_declaration", "local_function_statement", "class_declaration", "block"],
        &["assignment_expression", "variable_declaration"],
        &["invocation_expression", "object_creation_expression"],
        &["identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "c_sharp".to_string(),
        validations: vec![ValidationPattern {
            pattern: r"ModelState\.IsValid\b".to_string(),
            tag: "model_validation".to_string(),
            confidence: 0.7,
        }],
        sanitizers: vec![
            "HttpUtility.HtmlEncode".to_string(),
            "System.Net.WebUtility.HtmlEncode".to_string(),
            "Microsoft.Security.Application.Encoder.HtmlEncode".to_string(),
        ],
        auth_patterns: vec![
            AuthPattern {
                pattern: r"\[Authorize\]".to_string(),
                role: "authenticated".to_string(),
            },
            AuthPattern {
                pattern: r#"\[Authorize\(Roles\s*=\s*"Admin"\)\]"#.to_string(),
                role: "admin".to_string(),
            },
        ],
    }
}
