//! Path & condition derivations (C9), condition half: a raw-text,
//! line-by-line scan for guarding conditionals (§4.9). Operates on the
//! file's source text rather than the AST — the same "regex bank over
//! raw lines" approach `patterns::languages` already uses for method
//! calls, kept here because tree-sitter's per-grammar condition-node
//! shapes differ too much to unify cheaply across eleven languages.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Comparison,
    NullCheck,
    TypeCheck,
    LengthCheck,
    Logical,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub line: usize,
    pub expression: String,
    pub kind: ConditionKind,
    pub variables: Vec<String>,
    /// Last line number (1-based) covered by this condition's block, as
    /// estimated by brace-depth tracking.
    pub guarded_until_line: usize,
}

struct Bank {
    if_re: Regex,
    else_if_re: Regex,
    switch_re: Regex,
    case_re: Regex,
    ternary_re: Regex,
}

fn bank() -> &'static Bank {
    static BANK: OnceLock<Bank> = OnceLock::new();
    BANK.get_or_init(|| Bank {
        if_re: Regex::new(r"^\s*\}?\s*if\s*\((.+?)\)\s*\{?\s*$").unwrap(),
        else_if_re: Regex::new(r"^\s*\}?\s*else\s*if\s*\((.+?)\)\s*\{?\s*$").unwrap(),
        switch_re: Regex::new(r"^\s*switch\s*\((.+?)\)").unwrap(),
        case_re: Regex::new(r"^\s*case\s+(.+?):").unwrap(),
        ternary_re: Regex::new(r"^[^?]*?([^=!<>][=!<>]=?\s*[^?]+?|\w[\w.\[\]]*)\s*\?\s*[^:]+:\S").unwrap(),
    })
}

fn var_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$@]?[A-Za-z_][A-Za-z0-9_]*").unwrap())
}

const KEYWORDS: &[&str] = &[
    "null", "None", "nil", "true", "false", "True", "False", "undefined", "NULL",
    "and", "or", "not", "is", "instanceof", "typeof", "isinstance", "len", "count",
];

fn referenced_variables(expr: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for m in var_pattern().find_iter(expr) {
        let tok = m.as_str();
        if KEYWORDS.contains(&tok) {
            continue;
        }
        if seen.insert(tok.to_string()) {
            out.push(tok.to_string());
        }
    }
    out
}

fn classify(expr: &str) -> ConditionKind {
    let e = expr.trim();
    let lower_has = |needles: &[&str]| needles.iter().any(|n| e.contains(n));

    if lower_has(&["== null", "!= null", "=== null", "!== null", "is None", "is not None", "== nil", "!= nil", "== NULL", "!= NULL"]) {
        ConditionKind::NullCheck
    } else if lower_has(&["instanceof", "typeof", "isinstance(", "is_string(", "is_int(", "is_array(", "is_numeric(", "is_bool("]) {
        ConditionKind::TypeCheck
    } else if lower_has(&[".length", ".len()", "len(", "count(", "strlen(", "size()"]) {
        ConditionKind::LengthCheck
    } else if lower_has(&["&&", "||", " and ", " or "]) {
        ConditionKind::Logical
    } else if ["==", "!=", "<=", ">=", "<", ">"].iter().any(|op| e.contains(op)) {
        ConditionKind::Comparison
    } else {
        ConditionKind::Unknown
    }
}

fn estimate_guarded_until(lines: &[&str], start_idx: usize) -> usize {
    let mut depth: i32 = 0;
    let mut opened = false;
    for (offset, line) in lines[start_idx..].iter().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if opened && depth <= 0 {
            return start_idx + offset + 1;
        }
    }
    // No braces found (e.g. a one-line `if (...) stmt;` or Python's
    // colon-block): the guard covers just its own line.
    start_idx + 1
}

/// Scans `source` line by line for conditionals recognized by the regex
/// bank, returning one `Condition` per match in source order.
pub fn extract_conditions(source: &str) -> Vec<Condition> {
    let b = bank();
    let lines: Vec<&str> = source.lines().collect();
    let mut out = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let captured = b
            .if_re
            .captures(line)
            .or_else(|| b.else_if_re.captures(line))
            .or_else(|| b.switch_re.captures(line))
            .or_else(|| b.case_re.captures(line))
            .or_else(|| b.ternary_re.captures(line));

        let Some(caps) = captured else { continue };
        let expression = caps[1].trim().to_string();
        if expression.is_empty() {
            continue;
        }
        let kind = classify(&expression);
        let variables = referenced_variables(&expression);
        let guarded_until_line = estimate_guarded_until(&lines, idx);

        out.push(Condition {
            line: idx + 1,
            expression,
            kind,
            variables,
            guarded_until_line,
        });
    }

    out
}

/// Feasibility check (§4.9): a set of conditions along one candidate path
/// is infeasible if it claims a variable is both null and non-null. Only
/// `NullCheck` conditions participate; everything else is assumed
/// compatible since the engine does not evaluate expressions.
pub fn is_feasible(conditions: &[&Condition]) -> bool {
    let mut claimed_null: HashSet<&str> = HashSet::new();
    let mut claimed_not_null: HashSet<&str> = HashSet::new();

    for c in conditions {
        if c.kind != ConditionKind::NullCheck {
            continue;
        }
        let negated = c.expression.contains("!=") || c.expression.contains("!==") || c.expression.contains("is not None");
        for v in &c.variables {
            if negated {
                if claimed_null.contains(v.as_str()) {
                    return false;
                }
                claimed_not_null.insert(v.as_str());
            } else {
                if claimed_not_null.contains(v.as_str()) {
                    return false;
                }
                claimed_null.insert(v.as_str());
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_an_if_condition_with_its_variable() {
        let src = "function f($id) {\n    if ($id == null) {\n        return;\n    }\n}\n";
        let conds = extract_conditions(src);
        assert_eq!(conds.len(), 1);
        assert_eq!(conds[0].line, 2);
        assert_eq!(conds[0].kind, ConditionKind::NullCheck);
        assert!(conds[0].variables.iter().any(|v| v == "$id"));
    }

    #[test]
    fn classifies_length_and_type_checks() {
        assert_eq!(classify("len(name) > 0"), ConditionKind::LengthCheck);
        assert_eq!(classify("isinstance(x, str)"), ConditionKind::TypeCheck);
        assert_eq!(classify("a && b"), ConditionKind::Logical);
        assert_eq!(classify("x == 5"), ConditionKind::Comparison);
    }

    #[test]
    fn guarded_until_line_tracks_brace_depth() {
        let src = "if (x) {\n    a();\n    b();\n}\nafter();\n";
        let conds = extract_conditions(src);
        assert_eq!(conds.len(), 1);
        assert_eq!(conds[0].guarded_until_line, 4);
    }

    #[test]
    fn contradictory_null_claims_are_infeasible() {
        let a = Condition {
            line: 1,
            expression: "$x == null".into(),
            kind: ConditionKind::NullCheck,
            variables: vec!["$x".into()],
            guarded_until_line: 1,
        };
        let b = Condition {
            line: 2,
            expression: "$x != null".into(),
            kind: ConditionKind::NullCheck,
            variables: vec!["$x".into()],
            guarded_until_line: 2,
        };
        assert!(!is_feasible(&[&a, &b]));
        assert!(is_feasible(&[&a]));
    }

    #[test]
    fn elif_and_switch_case_are_recognized() {
        let src = "if (a) {\n} else if (b) {\n}\nswitch (c) {\n  case 1:\n    break;\n}\n";
        let conds = extract_conditions(src);
        assert!(conds.len() >= 3);
    }
}
