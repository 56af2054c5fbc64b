//! Process-wide regex compilation cache.
//!
//! Catalog lookups are pure functions over string keys, but compiling the
//! same pattern for every file would be wasteful: this memoizes compiled
//! `Regex` values per pattern string for the lifetime of the process,
//! read-mostly after warmup. Entries are never evicted (§5).

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

static CACHE: OnceLock<RwLock<HashMap<String, Arc<Regex>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<String, Arc<Regex>>> {
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

#[derive(Debug, thiserror::Error)]
#[error("invalid regex pattern `{pattern}`: {source}")]
pub struct InvalidRegex {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Returns a compiled regex for `pattern`, compiling and caching it on
/// first use. Surfaces `InvalidRegex` as a catalog-load error per §4.1/§7.
pub fn get_or_compile(pattern: &str) -> Result<Arc<Regex>, InvalidRegex> {
    if let Some(re) = cache().read().expect("regex cache lock poisoned").get(pattern) {
        return Ok(re.clone());
    }
    let compiled = Regex::new(pattern).map_err(|source| InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;
    let arc = Arc::new(compiled);
    cache()
        .write()
        .expect("regex cache lock poisoned")
        .insert(pattern.to_string(), arc.clone());
    Ok(arc)
}

#[cfg(test)]
pub(crate) fn cache_len() -> usize {
    cache().read().expect("regex cache lock poisoned").len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_reuses_cached_entry() {
        let before = cache_len();
        let a = get_or_compile(r"^\$_GET\b").unwrap();
        let after_first = cache_len();
        let b = get_or_compile(r"^\$_GET\b").unwrap();
        assert_eq!(after_first, before + 1);
        assert_eq!(cache_len(), after_first);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalid_pattern_surfaces_as_invalid_regex() {
        let err = get_or_compile(r"(unterminated").unwrap_err();
        assert_eq!(err.pattern, "(unterminated");
    }
}
