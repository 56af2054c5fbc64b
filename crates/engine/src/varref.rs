//! `VarRef`: a small value type carrying a variable's sigil and bare name,
//! replacing duck-typed "variable text" matching (§9 design note) with a
//! single place the boundary rules of §4.3 live.

/// Characters that introduce a sigil-prefixed identifier (PHP `$foo`,
/// Ruby `@foo`) where standard word boundaries do not delimit the sigil
/// itself.
const SIGILS: &[char] = &['$', '@'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub sigil: Option<char>,
    pub name: String,
}

impl VarRef {
    pub fn parse(text: &str) -> Self {
        let mut chars = text.chars();
        match chars.next() {
            Some(c) if SIGILS.contains(&c) => VarRef {
                sigil: Some(c),
                name: chars.as_str().to_string(),
            },
            _ => VarRef {
                sigil: None,
                name: text.to_string(),
            },
        }
    }

    /// The full token text including sigil, e.g. `"$order"`.
    pub fn full(&self) -> String {
        match self.sigil {
            Some(s) => format!("{s}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Boundary-aware regex for this variable: matches the bare name, as
    /// `name.foo`, as `name[...]`, or as a whole token elsewhere in text.
    /// Standard `\b` does not delimit a leading sigil, so a
    /// `(?:^|[^a-zA-Z0-9_$@])` lookalike prefix stands in for it (§4.3).
    pub fn boundary_pattern(&self) -> String {
        let escaped = regex::escape(&self.full());
        format!(r"(?:^|[^a-zA-Z0-9_$@]){escaped}\b")
    }
}

/// The anti-substring containment test (§4.3/§8 invariant 4): does `text`
/// reference `var_name` as a whole token — not as a prefix of a longer
/// identifier like `$order_id` when `var_name` is `$order`?
pub fn expression_contains(text: &str, var_name: &str) -> bool {
    let var = VarRef::parse(var_name);
    let Ok(re) = patterns::regex_cache::get_or_compile(&var.boundary_pattern()) else {
        return false;
    };
    re.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anti_substring_law_holds_for_sigil_prefix() {
        assert!(!expression_contains("$order_id is set", "$order"));
        assert!(!expression_contains("$order is set", "$order_id"));
        assert!(expression_contains("$order is set", "$order"));
    }

    #[test]
    fn boundary_matches_property_and_index_access() {
        assert!(expression_contains("$order->total", "$order"));
        assert!(expression_contains("$order[0]", "$order"));
        assert!(expression_contains("echo $order;", "$order"));
    }

    #[test]
    fn bare_identifiers_use_plain_word_boundaries() {
        assert!(expression_contains("save(data)", "data"));
        assert!(!expression_contains("save(data_extra)", "data"));
        assert!(!expression_contains("save(extra_data)", "data"));
    }

    #[test]
    fn quoted_mention_of_a_different_name_does_not_match() {
        // A literal `"$order list"` textually contains `$order` but never
        // `$order_id`; the propagator only tests containment against
        // names of variables actually known to be tainted, so a tainted
        // `$order_id` never makes this string count as a reference to it.
        assert!(expression_contains("\"$order list\"", "$order"));
        assert!(!expression_contains("\"$order list\"", "$order_id"));
    }
}
