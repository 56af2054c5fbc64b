use crate::catalog::{NodeKindTable, SecurityCatalog, SourceDefinition};
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new(
            "getenv",
            r"\bgetenv\(",
            "c",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "argv",
            r"\bargv\s*\[",
            "c",
            SourceType::CliArg,
            &[InputLabel::Cli],
            "CLI argument vector access, assumes the conventional argv parameter name",
        )
        .with_node_types(&["subscript_expression"]),
        SourceDefinition::new(
            "fgets_stdin",
            r"fgets\([^,]*,\s*[^,]*,\s*stdin\s*\)",
            "c",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Interactive stdin line read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "scanf",
            r"\bscanf\(",
            "c",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Formatted stdin read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "recv_socket",
            r"\brecv\(",
            "c",
            SourceType::Network,
            &[InputLabel::Network],
            "Socket receive call",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "read_syscall",
            r"\bread\(\s*\d",
            "c",
            SourceType::Network,
            &[InputLabel::Network],
            "Raw file-descriptor read, commonly a socket fd",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "fread_file",
            r"\bfread\(",
            "c",
            SourceType::File,
            &[InputLabel::File],
            "Buffered file read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "fscanf_file",
            r"\bfscanf\(",
            "c",
            SourceType::File,
            &[InputLabel::File],
            "Formatted file read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "gets_stdin",
            r"\bgets\(",
            "c",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Unbounded interactive stdin read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "popen_cmd",
            r"\bpopen\(",
            "c",
            SourceType::Network,
            &[InputLabel::UserInput],
            "Subprocess pipe, reads the child's stdout",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "accept_socket",
            r"\baccept\(",
            "c",
            SourceType::Network,
            &[InputLabel::Network],
            "Accepted socket connection",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "getenv_array",
            r"\benviron\b",
            "c",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Direct access to the process environment array",
        )
        .with_node_types(&["identifier"]),
        SourceDefinition::new(
            "recvfrom_socket",
            r"\brecvfrom\(",
            "c",
            SourceType::Network,
            &[InputLabel::Network],
            "UDP socket receive call",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "getchar_stdin",
            r"\bgetchar\(\)",
            "c",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Single-character interactive stdin read",
        )
        .with_node_types(&["call_expression"]),
        SourceDefinition::new(
            "getenv_named",
            r#"getenv\(\s*"[A-Za-z_][A-Za-z0-9_]*"\s*\)"#,
            "c",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Environment variable lookup by literal name, refined key extraction",
        )
        .with_node_types(&["call_expression"])
        .with_key_extractor(r#"getenv\(\s*"([A-Za-z_][A-Za-z0-9_]*)"\s*\)"#),
        SourceDefinition::new(
            "mmap_fd",
            r"\bmmap\(",
            "c",
            SourceType::File,
            &[InputLabel::File],
            "Memory-mapped file or descriptor contents",
        )
        .with_node_types(&["call_expression"]),
    ]
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "c",
        &["function_definition"],
        &["function_definition", "compound_statement"],
        &["assignment_expression", "init_declarator"],
        &["call_expression"],
        &["identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    SecurityCatalog {
        language: "c".to_string(),
        validations: vec![],
        sanitizers: vec!["snprintf".to_string()],
        auth_patterns: vec![],
    }
}
