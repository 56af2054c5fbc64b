//! C++ reuses the C catalog plus iostream-specific stdin sources: the
//! node-kind grammar differs (tree-sitter-cpp extends tree-sitter-c's node
//! set) but the call/assignment/identifier kinds C reuses are unchanged.

use crate::catalog::{NodeKindTable, SecurityCatalog, SourceDefinition};
use crate::languages::c;
use crate::node_kinds;
use ir::{InputLabel, SourceType};

pub fn sources() -> Vec<SourceDefinition> {
    let mut defs: Vec<SourceDefinition> = c::sources()
        .into_iter()
        .map(|mut def| {
            def.language = "cpp".to_string();
            def
        })
        .collect();
    defs.push(
        SourceDefinition::new(
            "cin_stream",
            r"std::cin\s*>>|cin\s*>>",
            "cpp",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "iostream stdin extraction",
        )
        .with_node_types(&["binary_expression"]),
    );
    defs.push(
        SourceDefinition::new(
            "ifstream_read",
            r"std::ifstream\s|ifstream\s",
            "cpp",
            SourceType::File,
            &[InputLabel::File],
            "iostream file-stream read",
        )
        .with_node_types(&["declaration"]),
    );
    defs.push(
        SourceDefinition::new(
            "boost_asio_socket_read",
            r"boost::asio::(read|read_some)\(",
            "cpp",
            SourceType::Network,
            &[InputLabel::Network],
            "Boost.Asio socket read",
        )
        .with_node_types(&["call_expression"]),
    );
    defs.push(
        SourceDefinition::new(
            "getline_stdin",
            r"std::getline\(\s*std::cin|getline\(\s*cin",
            "cpp",
            SourceType::Stdin,
            &[InputLabel::UserInput],
            "Line-buffered stdin read",
        )
        .with_node_types(&["call_expression"]),
    );
    defs.push(
        SourceDefinition::new(
            "curlpp_response",
            r"curlpp::Easy\(\)|curl_easy_perform\(",
            "cpp",
            SourceType::Network,
            &[InputLabel::Network],
            "cURL/curlpp HTTP client response",
        )
        .with_node_types(&["call_expression"]),
    );
    defs.push(
        SourceDefinition::new(
            "grpc_server_context",
            r"grpc::ServerContext\b",
            "cpp",
            SourceType::Network,
            &[InputLabel::Network],
            "gRPC server request context",
        )
        .with_node_types(&["parameter_declaration"]),
    );
    defs
}

pub fn node_kinds() -> NodeKindTable {
    node_kinds::table(
        "cpp",
        &["function_definition", "lambda_expression"],
        &["function_definition", "lambda_expression", "class_specifier", "compound_statement"],
        &["assignment_expression", "init_declarator"],
        &["call_expression"],
        &["identifier", "field_identifier"],
    )
}

pub fn security() -> SecurityCatalog {
    let mut s = c::security();
    s.language = "cpp".to_string();
    s
}
