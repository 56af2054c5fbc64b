//! PHP superglobal metadata (§6, canonical table) and the subsidiary table
//! of which `$_SERVER` keys are user-controllable versus server-config.

use crate::catalog::Superglobal;
use ir::{InputLabel, SourceType};
use std::collections::HashMap;

fn sg(name: &str, source_type: SourceType, labels: &[InputLabel], description: &str) -> Superglobal {
    Superglobal {
        name: name.to_string(),
        alias: name.trim_start_matches('$').trim_start_matches('_').to_string(),
        source_type,
        labels: labels.to_vec(),
        description: description.to_string(),
    }
}

/// Returns the canonical superglobal table (keyed by both the full name
/// `$_GET` and its short alias `GET`) plus the list of `$_SERVER` keys that
/// are user-controllable.
pub fn superglobals() -> (HashMap<String, Superglobal>, Vec<String>) {
    let entries = vec![
        sg(
            "$_GET",
            SourceType::HttpGet,
            &[InputLabel::HttpGet],
            "Query-string parameters",
        ),
        sg(
            "$_POST",
            SourceType::HttpPost,
            &[InputLabel::HttpPost],
            "Form-encoded POST body",
        ),
        sg(
            "$_REQUEST",
            SourceType::HttpRequest,
            &[InputLabel::HttpGet, InputLabel::HttpPost, InputLabel::HttpCookie],
            "Merged GET/POST/COOKIE data",
        ),
        sg(
            "$_COOKIE",
            SourceType::HttpCookie,
            &[InputLabel::HttpCookie],
            "Client-supplied cookies",
        ),
        sg(
            "$_SERVER",
            SourceType::HttpHeader,
            &[InputLabel::HttpHeader],
            "Request/server metadata (partly user-controllable, see server key table)",
        ),
        sg(
            "$_FILES",
            SourceType::HttpFile,
            &[InputLabel::HttpBody],
            "Uploaded file metadata",
        ),
        sg(
            "$_ENV",
            SourceType::EnvVar,
            &[InputLabel::Environment],
            "Process environment variables",
        ),
        sg(
            "$_SESSION",
            SourceType::Session,
            &[],
            "Session-stored data (no single InputLabel partner)",
        ),
    ];

    let mut map = HashMap::with_capacity(entries.len() * 2);
    for e in entries {
        map.insert(e.alias.clone(), e.clone());
        map.insert(e.name.clone(), e);
    }

    // $_SERVER keys that reflect attacker-controlled request data, as
    // opposed to server-config keys like DOCUMENT_ROOT or SERVER_SOFTWARE.
    let user_controllable = vec![
        "HTTP_USER_AGENT",
        "HTTP_REFERER",
        "HTTP_ACCEPT_LANGUAGE",
        "HTTP_ACCEPT",
        "HTTP_X_FORWARDED_FOR",
        "HTTP_HOST",
        "QUERY_STRING",
        "REQUEST_URI",
        "PATH_INFO",
        "PHP_SELF",
        "REMOTE_ADDR",
        "REQUEST_METHOD",
    ]
    .into_iter()
    .map(|s| s.to_string())
    .collect();

    (map, user_controllable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_aliases_resolve_to_the_same_metadata_as_full_names() {
        let (map, _) = superglobals();
        let full = map.get("$_GET").unwrap();
        let short = map.get("GET").unwrap();
        assert_eq!(full.source_type, short.source_type);
    }

    #[test]
    fn server_key_table_distinguishes_user_from_config_keys() {
        let (_, user_keys) = superglobals();
        assert!(user_keys.iter().any(|k| k == "HTTP_USER_AGENT"));
        assert!(!user_keys.iter().any(|k| k == "DOCUMENT_ROOT"));
    }
}
