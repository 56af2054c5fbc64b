//! Language-tag -> `tree_sitter::Language` wiring plus the extension and
//! filename tables `detect_language` consults (§6/§13).
//!
//! One grammar crate per language, exactly as the teacher's workspace
//! dependencies list them. C, C++ and C# are new additions to cover the
//! eleven languages §4.1 requires; the rest carry over unchanged.

/// Lowercase language tags understood by the rest of the crate, matching
/// §6's fixed set.
pub const SUPPORTED: &[&str] = &[
    "php",
    "javascript",
    "typescript",
    "tsx",
    "python",
    "go",
    "java",
    "c",
    "cpp",
    "c_sharp",
    "ruby",
    "rust",
];

pub fn grammar(language: &str) -> Option<tree_sitter::Language> {
    match language {
        "php" => Some(tree_sitter_php::language()),
        "javascript" => Some(tree_sitter_javascript::language()),
        "typescript" => Some(tree_sitter_typescript::language_typescript()),
        "tsx" => Some(tree_sitter_typescript::language_tsx()),
        "python" => Some(tree_sitter_python::language()),
        "go" => Some(tree_sitter_go::language()),
        "java" => Some(tree_sitter_java::language()),
        "c" => Some(tree_sitter_c::language()),
        "cpp" => Some(tree_sitter_cpp::language()),
        "c_sharp" => Some(tree_sitter_c_sharp::language()),
        "ruby" => Some(tree_sitter_ruby::language()),
        "rust" => Some(tree_sitter_rust::language()),
        _ => None,
    }
}

/// Detects a language tag from a file name/extension. Returns `None` for
/// anything this crate has no grammar for, which `parse_file` treats as
/// "skip this file" per the `UnsupportedLanguage` error class (§7).
pub fn detect_language(path: &std::path::Path) -> Option<&'static str> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    if name == "rakefile" || name == "gemfile" {
        return Some("ruby");
    }
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    Some(match ext.as_str() {
        "php" | "php5" | "phtml" => "php",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" | "pyi" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "cpp",
        "cs" => "c_sharp",
        "rb" => "ruby",
        "rs" => "rust",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn detects_every_supported_extension() {
        assert_eq!(detect_language(Path::new("a.php")), Some("php"));
        assert_eq!(detect_language(Path::new("a.tsx")), Some("tsx"));
        assert_eq!(detect_language(Path::new("a.py")), Some("python"));
        assert_eq!(detect_language(Path::new("a.cs")), Some("c_sharp"));
        assert_eq!(detect_language(Path::new("Rakefile")), Some("ruby"));
    }

    #[test]
    fn unsupported_extension_is_none() {
        assert_eq!(detect_language(Path::new("a.txt")), None);
        assert_eq!(detect_language(Path::new("a.md")), None);
    }

    #[test]
    fn every_supported_tag_has_a_grammar() {
        for lang in SUPPORTED {
            assert!(grammar(lang).is_some(), "missing grammar for {lang}");
        }
    }
}
