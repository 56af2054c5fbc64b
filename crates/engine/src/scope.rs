//! Lexical scope tree (C4): shadowing, tainted-variable lookup along the
//! scope chain, qualified names for `TaintedVariable::scope`.
//!
//! Each worker owns exactly one `ScopeManager` for the duration of one
//! file (§5: "owned by exactly one worker; not shared"), but §4.4 still
//! specifies it as internally synchronized so that a manager handed
//! across a `clone()` boundary — or read from a debug/introspection path
//! mid-analysis — never observes a half-written scope. An `RwLock` around
//! the single inner struct gives that for free without fine-grained
//! locking.

use ir::{InputSource, Location, ScopeKind};
use std::collections::HashMap;
use std::sync::RwLock;

/// A variable definition recorded by `declare`/`mark_tainted`.
#[derive(Debug, Clone)]
pub struct ScopedVariable {
    pub name: String,
    pub scope_id: usize,
    pub tainted: bool,
    pub source: Option<InputSource>,
    pub depth: usize,
    pub location: Location,
    /// The scope id of a same-named definition this one shadows, if any —
    /// purely informational (§4.4: "linking to any shadowed definition
    /// discoverable in the enclosing chain").
    pub shadows: Option<usize>,
}

struct ScopeRecord {
    id: usize,
    kind: ScopeKind,
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    start_loc: Location,
    /// Definitions declared directly in this scope, most-recent-last so
    /// repeated declaration of the same name shadows within one scope too.
    defs: HashMap<String, Vec<ScopedVariable>>,
}

struct Inner {
    scopes: Vec<ScopeRecord>,
    cursor: usize,
}

pub struct ScopeManager {
    inner: RwLock<Inner>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        let root = ScopeRecord {
            id: 0,
            kind: ScopeKind::Global,
            name: "global".to_string(),
            parent: None,
            children: Vec::new(),
            start_loc: Location::new("", 0, 0),
            defs: HashMap::new(),
        };
        Self {
            inner: RwLock::new(Inner {
                scopes: vec![root],
                cursor: 0,
            }),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> usize {
        self.read().cursor
    }

    /// Appends a new child scope under the current one and moves the
    /// cursor down into it. Returns the new scope's id.
    pub fn enter(&self, kind: ScopeKind, name: &str, location: Location) -> usize {
        let mut inner = self.write();
        let id = inner.scopes.len();
        let parent = inner.cursor;
        inner.scopes.push(ScopeRecord {
            id,
            kind,
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            start_loc: location,
            defs: HashMap::new(),
        });
        inner.scopes[parent].children.push(id);
        inner.cursor = id;
        id
    }

    /// Moves the cursor to the parent scope. No-op at the root.
    pub fn exit(&self) -> usize {
        let mut inner = self.write();
        if let Some(parent) = inner.scopes[inner.cursor].parent {
            inner.cursor = parent;
        }
        inner.cursor
    }

    /// Records a definition in the current scope.
    pub fn declare(
        &self,
        name: &str,
        tainted: bool,
        source: Option<InputSource>,
        depth: usize,
        location: Location,
    ) -> ScopedVariable {
        let mut inner = self.write();
        let cursor = inner.cursor;
        let shadows = Self::lookup_from(&inner, cursor, name).map(|v| v.scope_id);
        let var = ScopedVariable {
            name: name.to_string(),
            scope_id: cursor,
            tainted,
            source,
            depth,
            location,
            shadows,
        };
        inner.scopes[cursor]
            .defs
            .entry(name.to_string())
            .or_default()
            .push(var.clone());
        var
    }

    /// Walks from the current scope up to the root, returning the most
    /// recent definition of `name` in the first scope that has one.
    pub fn lookup(&self, name: &str) -> Option<ScopedVariable> {
        let inner = self.read();
        Self::lookup_from(&inner, inner.cursor, name)
    }

    fn lookup_from(inner: &Inner, from: usize, name: &str) -> Option<ScopedVariable> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let scope = &inner.scopes[id];
            if let Some(defs) = scope.defs.get(name) {
                if let Some(v) = defs.last() {
                    return Some(v.clone());
                }
            }
            cur = scope.parent;
        }
        None
    }

    pub fn is_tainted(&self, name: &str) -> bool {
        self.lookup(name).map(|v| v.tainted).unwrap_or(false)
    }

    pub fn taint_source(&self, name: &str) -> Option<InputSource> {
        self.lookup(name).and_then(|v| v.source)
    }

    /// Marks `name` tainted in the current scope, declaring it if it did
    /// not already exist there.
    pub fn mark_tainted(&self, name: &str, source: InputSource, depth: usize, location: Location) -> ScopedVariable {
        self.declare(name, true, Some(source), depth, location)
    }

    /// Walks the scope chain from the current scope to the root,
    /// collecting one tainted definition per name — the closest
    /// (innermost) scope wins.
    pub fn all_tainted_in_scope(&self) -> Vec<ScopedVariable> {
        let inner = self.read();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        let mut cur = Some(inner.cursor);
        while let Some(id) = cur {
            let scope = &inner.scopes[id];
            for defs in scope.defs.values() {
                if let Some(v) = defs.last() {
                    if seen.insert(v.name.clone()) && v.tainted {
                        out.push(v.clone());
                    }
                }
            }
            cur = scope.parent;
        }
        out
    }

    /// Dot-joined names of every non-global scope from the root down to
    /// the current cursor, e.g. `"Handler.inner"`.
    pub fn qualified_name(&self) -> String {
        let inner = self.read();
        let mut chain = Vec::new();
        let mut cur = Some(inner.cursor);
        while let Some(id) = cur {
            let scope = &inner.scopes[id];
            if !matches!(scope.kind, ScopeKind::Global) {
                chain.push(scope.name.clone());
            }
            cur = scope.parent;
        }
        chain.reverse();
        chain.join(".")
    }

    pub fn scope_kind(&self, id: usize) -> ScopeKind {
        self.read().scopes[id].kind
    }

    /// Materializes the scope tree into `ir::Scope` records for export,
    /// e.g. into a debug dump or a future "scopes" report.
    pub fn to_ir_scopes(&self) -> Vec<ir::Scope> {
        self.read()
            .scopes
            .iter()
            .map(|s| ir::Scope {
                id: s.id,
                kind: s.kind,
                name: s.name.clone(),
                parent: s.parent,
                children: s.children.clone(),
                start_loc: s.start_loc.clone(),
            })
            .collect()
    }

    /// Copies only the tainted definitions into a fresh single-scope
    /// manager, for handing taint context into a parallel sub-analysis
    /// (§4.4) without sharing the live scope tree.
    pub fn clone_tainted(&self) -> ScopeManager {
        let fresh = ScopeManager::new();
        for var in self.all_tainted_in_scope() {
            if let Some(source) = var.source {
                fresh.mark_tainted(&var.name, source, var.depth, var.location);
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir::InputLabel;

    fn src() -> InputSource {
        InputSource::new("$_GET", Some("id".into()), Location::new("a.php", 1, 0), vec![InputLabel::HttpGet], "php")
    }

    #[test]
    fn inner_scope_shadows_outer_until_exit() {
        let mgr = ScopeManager::new();
        mgr.declare("x", false, None, 0, Location::new("a", 1, 0));
        mgr.enter(ScopeKind::Function, "f", Location::new("a", 2, 0));
        mgr.mark_tainted("x", src(), 0, Location::new("a", 3, 0));
        assert!(mgr.is_tainted("x"));
        mgr.exit();
        assert!(!mgr.is_tainted("x"));
    }

    #[test]
    fn qualified_name_excludes_global_scope() {
        let mgr = ScopeManager::new();
        assert_eq!(mgr.qualified_name(), "");
        mgr.enter(ScopeKind::Function, "handler", Location::new("a", 1, 0));
        mgr.enter(ScopeKind::Block, "inner", Location::new("a", 2, 0));
        assert_eq!(mgr.qualified_name(), "handler.inner");
    }

    #[test]
    fn lookup_picks_most_recent_redeclaration_in_same_scope() {
        let mgr = ScopeManager::new();
        mgr.declare("x", false, None, 0, Location::new("a", 1, 0));
        mgr.mark_tainted("x", src(), 0, Location::new("a", 2, 0));
        let found = mgr.lookup("x").unwrap();
        assert!(found.tainted);
    }

    #[test]
    fn all_tainted_in_scope_closest_scope_wins() {
        let mgr = ScopeManager::new();
        mgr.mark_tainted("x", src(), 0, Location::new("a", 1, 0));
        mgr.enter(ScopeKind::Function, "f", Location::new("a", 2, 0));
        mgr.declare("x", false, None, 0, Location::new("a", 3, 0));
        let all = mgr.all_tainted_in_scope();
        assert!(all.is_empty(), "inner untainted redeclaration should win over outer taint");
    }
}
