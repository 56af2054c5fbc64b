//! Skip directories and non-parseable filenames (§4.1, last bullet).
//!
//! Catalog data, not loader-hardcoded: `loader::Configuration` reads these
//! as its defaults, and a project's own config can extend (not replace)
//! them.

/// Directory names the walker skips outright, wherever they appear.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "target",
    ".venv",
    "venv",
    "__pycache__",
    "dist",
    "build",
    ".idea",
    ".vscode",
];

/// Filenames that look parseable by extension but never carry user code,
/// so attempting to feed them through a grammar is pointless.
pub const NON_PARSEABLE_FILENAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "Cargo.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
];

pub fn is_skip_dir(name: &str) -> bool {
    DEFAULT_SKIP_DIRS.contains(&name)
}

pub fn is_non_parseable_filename(name: &str) -> bool {
    NON_PARSEABLE_FILENAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_vendor_dirs() {
        assert!(is_skip_dir("node_modules"));
        assert!(is_skip_dir(".git"));
        assert!(!is_skip_dir("src"));
    }

    #[test]
    fn recognizes_lockfiles() {
        assert!(is_non_parseable_filename("Cargo.lock"));
        assert!(!is_non_parseable_filename("main.rs"));
    }
}
