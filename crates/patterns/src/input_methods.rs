//! Input-method table (§4.1): tuples of `(var_pattern, method_name,
//! category, source_type, framework)` describing framework-specific
//! accessor calls like `request.args.get(...)` or `req.header(...)`.

use crate::catalog::{InputMethod, MethodCategory};
use ir::SourceType;
use std::collections::HashMap;

fn m(
    var_pattern: &str,
    method_name: &str,
    category: MethodCategory,
    source_type: SourceType,
    framework: &str,
) -> InputMethod {
    InputMethod::new(var_pattern, method_name, category, source_type, framework)
}

pub fn all() -> HashMap<String, Vec<InputMethod>> {
    let mut map: HashMap<String, Vec<InputMethod>> = HashMap::new();

    map.insert(
        "python".into(),
        vec![
            m("request", "args.get", MethodCategory::Http, SourceType::HttpGet, "flask"),
            m("request", "form.get", MethodCategory::Http, SourceType::HttpPost, "flask"),
            m("request", "json", MethodCategory::Http, SourceType::HttpJson, "flask"),
            m("request", "cookies.get", MethodCategory::Http, SourceType::HttpCookie, "flask"),
            m("request", "headers.get", MethodCategory::Http, SourceType::HttpHeader, "flask"),
            m("request", "query_params.get", MethodCategory::Http, SourceType::HttpGet, "django"),
            m("request", "POST.get", MethodCategory::Http, SourceType::HttpPost, "django"),
            m("sys", "argv", MethodCategory::Generic, SourceType::CliArg, "stdlib"),
            m("os", "environ.get", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
            m("*", "readline", MethodCategory::Generic, SourceType::Stdin, "stdlib"),
        ],
    );

    map.insert(
        "javascript".into(),
        vec![
            m("req", "body", MethodCategory::Http, SourceType::HttpBody, "express"),
            m("req", "query", MethodCategory::Http, SourceType::HttpGet, "express"),
            m("req", "params", MethodCategory::Http, SourceType::HttpPath, "express"),
            m("req", "cookies", MethodCategory::Http, SourceType::HttpCookie, "express"),
            m("req", "get", MethodCategory::Http, SourceType::HttpHeader, "express"),
            m("process", "argv", MethodCategory::Generic, SourceType::CliArg, "node"),
            m("process", "env", MethodCategory::Generic, SourceType::EnvVar, "node"),
        ],
    );
    map.insert("typescript".into(), map.get("javascript").cloned().unwrap_or_default());
    map.insert("tsx".into(), map.get("javascript").cloned().unwrap_or_default());

    map.insert(
        "go".into(),
        vec![
            m("r", "FormValue", MethodCategory::Http, SourceType::HttpGet, "net/http"),
            m("r", "URL.Query", MethodCategory::Http, SourceType::HttpGet, "net/http"),
            m("r", "PostFormValue", MethodCategory::Http, SourceType::HttpPost, "net/http"),
            m("r", "Header.Get", MethodCategory::Http, SourceType::HttpHeader, "net/http"),
            m("c", "Query", MethodCategory::Http, SourceType::HttpGet, "gin"),
            m("c", "PostForm", MethodCategory::Http, SourceType::HttpPost, "gin"),
            m("os", "Getenv", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
            m("os", "Args", MethodCategory::Generic, SourceType::CliArg, "stdlib"),
        ],
    );

    map.insert(
        "java".into(),
        vec![
            m("request", "getParameter", MethodCategory::Http, SourceType::HttpGet, "servlet"),
            m("request", "getHeader", MethodCategory::Http, SourceType::HttpHeader, "servlet"),
            m("request", "getCookies", MethodCategory::Http, SourceType::HttpCookie, "servlet"),
            m("System", "getenv", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
            m("System", "getProperty", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
        ],
    );

    map.insert(
        "ruby".into(),
        vec![
            m("params", "[]", MethodCategory::Http, SourceType::HttpGet, "rails"),
            m("request", "cookies", MethodCategory::Http, SourceType::HttpCookie, "rails"),
            m("request", "headers", MethodCategory::Http, SourceType::HttpHeader, "rails"),
            m("ENV", "[]", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
            m("ARGV", "[]", MethodCategory::Generic, SourceType::CliArg, "stdlib"),
        ],
    );

    map.insert(
        "php".into(),
        vec![
            m("*", "file_get_contents", MethodCategory::File, SourceType::File, "stdlib"),
            m("*", "fgets", MethodCategory::File, SourceType::Stdin, "stdlib"),
            m("*", "getenv", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
        ],
    );

    map.insert(
        "rust".into(),
        vec![
            m("*", "var", MethodCategory::Generic, SourceType::EnvVar, "std::env"),
            m("*", "args", MethodCategory::Generic, SourceType::CliArg, "std::env"),
            m("*", "read_line", MethodCategory::Generic, SourceType::Stdin, "std::io"),
            m("*", "query", MethodCategory::Http, SourceType::HttpGet, "axum"),
            m("*", "json", MethodCategory::Http, SourceType::HttpJson, "axum"),
            m("*", "headers", MethodCategory::Http, SourceType::HttpHeader, "axum"),
        ],
    );

    map.insert(
        "c".into(),
        vec![
            m("*", "getenv", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
            m("*", "fgets", MethodCategory::File, SourceType::Stdin, "stdlib"),
            m("*", "scanf", MethodCategory::Generic, SourceType::Stdin, "stdlib"),
        ],
    );
    map.insert("cpp".into(), map.get("c").cloned().unwrap_or_default());

    map.insert(
        "c_sharp".into(),
        vec![
            m("Request", "Query", MethodCategory::Http, SourceType::HttpGet, "aspnetcore"),
            m("Request", "Form", MethodCategory::Http, SourceType::HttpPost, "aspnetcore"),
            m("Request", "Cookies", MethodCategory::Http, SourceType::HttpCookie, "aspnetcore"),
            m("Environment", "GetEnvironmentVariable", MethodCategory::Generic, SourceType::EnvVar, "stdlib"),
        ],
    );

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_receiver_matches_any_variable_name() {
        let methods = all();
        let rust_methods = &methods["rust"];
        let var_method = rust_methods.iter().find(|m| m.method_name == "var").unwrap();
        assert!(var_method.matches_receiver("env"));
        assert!(var_method.matches_receiver("anything"));
    }

    #[test]
    fn exact_receiver_pattern_rejects_mismatches() {
        let methods = all();
        let go_methods = &methods["go"];
        let form_value = go_methods.iter().find(|m| m.method_name == "FormValue").unwrap();
        assert!(form_value.matches_receiver("r"));
        assert!(!form_value.matches_receiver("req"));
    }
}
