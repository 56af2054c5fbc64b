//! Analysis state (C7): deduplicated sources/tainted-variables/tainted-
//! functions, propagation paths, and the flow-graph builder.
//!
//! Per §5, each worker owns a private `AnalysisState` slice for one file;
//! a single merger folds those into the shared global state under an
//! exclusive lock (`merge_from`). Nothing here is itself thread-shared —
//! the mutex lives one layer up, in the orchestrator (C8).

use ir::{
    FlowEdge, FlowEdgeKind, FlowGraph, FlowNode, FlowNodeKind, FunctionSummary, InputSource,
    PropagationPath, PropagationStep, TaintedFunction, TaintedVariable,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct AnalysisState {
    sources: HashMap<Uuid, InputSource>,
    sources_order: Vec<Uuid>,

    tainted_vars: HashMap<String, TaintedVariable>,
    tainted_vars_order: Vec<String>,

    tainted_funcs: HashMap<String, TaintedFunction>,
    tainted_funcs_order: Vec<String>,

    /// Keyed by source id, in insertion order of first step per source.
    propagation_paths: HashMap<Uuid, Vec<PropagationPath>>,

    returns_tainted: HashMap<String, InputSource>,

    function_summaries: HashMap<String, FunctionSummary>,

    /// Set on any in-place replace of a dedup entry, cleared once the
    /// caller has observed the ordered slices (§4.7). Purely advisory: it
    /// exists so callers can tell "something changed since I last looked"
    /// without diffing the whole state.
    slices_stale: bool,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- sources -----------------------------------------------------

    /// Inserts `source` if its id is not already present; ignores it
    /// otherwise (invariant 5: source ids are unique, dedup on id).
    pub fn add_source(&mut self, source: InputSource) {
        if !self.sources.contains_key(&source.id) {
            self.sources_order.push(source.id);
            self.sources.insert(source.id, source);
        }
    }

    pub fn sources(&self) -> Vec<&InputSource> {
        self.sources_order.iter().filter_map(|id| self.sources.get(id)).collect()
    }

    pub fn source(&self, id: &Uuid) -> Option<&InputSource> {
        self.sources.get(id)
    }

    // -- tainted variables --------------------------------------------

    /// If the dedup key is absent, inserts. Otherwise replaces the
    /// existing record iff `var.depth` is strictly smaller (shorter-wins,
    /// §4.7), marking `slices_stale`.
    pub fn add_tainted_variable(&mut self, var: TaintedVariable) {
        let key = var.key();
        match self.tainted_vars.get(&key) {
            None => {
                self.tainted_vars_order.push(key.clone());
                self.tainted_vars.insert(key, var);
            }
            Some(existing) => {
                if var.depth < existing.depth {
                    self.tainted_vars.insert(key, var);
                    self.slices_stale = true;
                }
            }
        }
    }

    pub fn tainted_variables(&self) -> Vec<&TaintedVariable> {
        self.tainted_vars_order
            .iter()
            .filter_map(|k| self.tainted_vars.get(k))
            .collect()
    }

    pub fn tainted_variable(&self, name: &str, scope: &str, file_path: &str) -> Option<&TaintedVariable> {
        self.tainted_vars.get(&TaintedVariable::dedup_key(name, scope, file_path))
    }

    // -- tainted functions ----------------------------------------------

    /// If the dedup key is absent, inserts. Otherwise merges
    /// `tainted_params` into the existing record (union keyed by
    /// `(index, name)`).
    pub fn add_tainted_function(&mut self, func: TaintedFunction) {
        let key = func.key();
        match self.tainted_funcs.get_mut(&key) {
            None => {
                self.tainted_funcs_order.push(key.clone());
                self.tainted_funcs.insert(key, func);
            }
            Some(existing) => {
                existing.merge_params(&func.tainted_params);
            }
        }
    }

    pub fn tainted_functions(&self) -> Vec<&TaintedFunction> {
        self.tainted_funcs_order
            .iter()
            .filter_map(|k| self.tainted_funcs.get(k))
            .collect()
    }

    // -- propagation paths ------------------------------------------------

    /// Appends `step` to the current (last) path recorded for `source`,
    /// or starts a new one when none exists yet — the "extend current
    /// path for this source" semantics that §4.7/§9 treat as authoritative
    /// over the competing always-new-path variant.
    pub fn add_propagation_step(&mut self, source: Uuid, step: PropagationStep) {
        let paths = self.propagation_paths.entry(source).or_default();
        if paths.is_empty() {
            paths.push(PropagationPath::new(source));
        }
        paths.last_mut().expect("just ensured non-empty").steps.push(step);
    }

    pub fn paths_for_source(&self, source: &Uuid) -> &[PropagationPath] {
        self.propagation_paths.get(source).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn all_propagation_paths(&self) -> Vec<&PropagationPath> {
        self.sources_order
            .iter()
            .flat_map(|id| self.propagation_paths.get(id))
            .flatten()
            .collect()
    }

    pub fn propagation_path_count(&self) -> usize {
        self.propagation_paths.values().map(|v| v.len()).sum()
    }

    // -- returns_tainted ---------------------------------------------

    pub fn mark_function_returns_tainted(&mut self, function: &str, source: InputSource) {
        self.returns_tainted.entry(function.to_string()).or_insert(source);
    }

    pub fn function_returns_tainted(&self, function: &str) -> Option<&InputSource> {
        self.returns_tainted.get(function)
    }

    // -- function summaries (C6) --------------------------------------

    pub fn function_summary(&self, name: &str) -> Option<&FunctionSummary> {
        self.function_summaries.get(name)
    }

    pub fn function_summary_mut_or_insert(&mut self, name: &str, file_path: &str, language: &str) -> &mut FunctionSummary {
        self.function_summaries
            .entry(name.to_string())
            .or_insert_with(|| FunctionSummary::new(name, file_path, language))
    }

    pub fn function_summaries(&self) -> impl Iterator<Item = &FunctionSummary> {
        self.function_summaries.values()
    }

    pub fn has_function_summary(&self, name: &str) -> bool {
        self.function_summaries.contains_key(name)
    }

    // -- merge --------------------------------------------------------

    /// Folds a per-file slice into `self`, applying the same dedup
    /// semantics element-by-element as a direct `add_*` call would.
    /// Re-merging an empty slice is a no-op (§8 round-trip property).
    pub fn merge_from(&mut self, other: AnalysisState) {
        for id in other.sources_order {
            if let Some(s) = other.sources.get(&id) {
                self.add_source(s.clone());
            }
        }
        for key in other.tainted_vars_order {
            if let Some(v) = other.tainted_vars.get(&key) {
                self.add_tainted_variable(v.clone());
            }
        }
        for key in other.tainted_funcs_order {
            if let Some(f) = other.tainted_funcs.get(&key) {
                self.add_tainted_function(f.clone());
            }
        }
        for (source, paths) in other.propagation_paths {
            for path in paths {
                for step in path.steps {
                    self.add_propagation_step(source, step);
                }
            }
        }
        for (func, source) in other.returns_tainted {
            self.mark_function_returns_tainted(&func, source);
        }
        for (name, summary) in other.function_summaries {
            self.function_summaries.entry(name).or_insert(summary);
        }
    }

    pub fn slices_stale(&self) -> bool {
        self.slices_stale
    }

    pub fn clear_stale(&mut self) {
        self.slices_stale = false;
    }

    /// Rebuilds the flow graph from scratch (§4.7: "not incrementally
    /// updated") using the `"kind:value"` node-id convention (§9).
    pub fn build_flow_graph(&self) -> FlowGraph {
        let mut graph = FlowGraph::default();

        for source in self.sources() {
            graph.nodes.push(FlowNode {
                id: FlowGraph::source_node_id(&source.id),
                kind: FlowNodeKind::Source,
                label: source.key.clone().unwrap_or_else(|| source.source_type.clone()),
            });
        }

        for var in self.tainted_variables() {
            let node_id = FlowGraph::variable_node_id(&var.name, &var.source.location.file_path);
            if !graph.has_node(&node_id) {
                graph.nodes.push(FlowNode {
                    id: node_id.clone(),
                    kind: FlowNodeKind::Variable,
                    label: var.name.clone(),
                });
            }
            let source_id = FlowGraph::source_node_id(&var.source.id);
            if graph.has_node(&source_id) {
                graph.edges.push(FlowEdge {
                    from: source_id,
                    to: node_id,
                    kind: FlowEdgeKind::Taint,
                });
            }
        }

        for func in self.tainted_functions() {
            let node_id = FlowGraph::function_node_id(&func.name, &func.file_path);
            if !graph.has_node(&node_id) {
                graph.nodes.push(FlowNode {
                    id: node_id.clone(),
                    kind: FlowNodeKind::Function,
                    label: func.name.clone(),
                });
            }
            for param in &func.tainted_params {
                let source_id = FlowGraph::source_node_id(&param.source);
                if graph.has_node(&source_id) {
                    graph.edges.push(FlowEdge {
                        from: source_id,
                        to: node_id.clone(),
                        kind: FlowEdgeKind::Call,
                    });
                }
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir::{InputLabel, Location, PropagationStepType, TaintedParam};

    fn source() -> InputSource {
        InputSource::new("$_GET", Some("id".into()), Location::new("a.php", 2, 0), vec![InputLabel::HttpGet], "php")
    }

    #[test]
    fn duplicate_source_id_is_ignored() {
        let mut state = AnalysisState::new();
        let s = source();
        state.add_source(s.clone());
        state.add_source(s);
        assert_eq!(state.sources().len(), 1);
    }

    #[test]
    fn shorter_depth_replaces_existing_tainted_variable() {
        let mut state = AnalysisState::new();
        let s = source();
        let mut v = TaintedVariable {
            id: Uuid::new_v4(),
            name: "$id".into(),
            scope: "".into(),
            source: s.clone(),
            location: Location::new("a.php", 2, 0),
            depth: 2,
            language: "php".into(),
        };
        state.add_tainted_variable(v.clone());
        v.depth = 5;
        v.id = Uuid::new_v4();
        state.add_tainted_variable(v.clone());
        assert_eq!(state.tainted_variables()[0].depth, 2, "larger depth must not replace");
        v.depth = 0;
        state.add_tainted_variable(v);
        assert_eq!(state.tainted_variables()[0].depth, 0, "shorter depth must replace");
    }

    #[test]
    fn add_tainted_function_merges_params_as_a_union() {
        let mut state = AnalysisState::new();
        let s = source();
        let f1 = TaintedFunction {
            id: Uuid::new_v4(),
            name: "query".into(),
            file_path: "a.php".into(),
            line: 3,
            language: "php".into(),
            tainted_params: vec![TaintedParam { index: 0, name: "$id".into(), source: s.id, path: None }],
            receives_through: None,
        };
        let mut f2 = f1.clone();
        f2.tainted_params.push(TaintedParam { index: 1, name: "$extra".into(), source: s.id, path: None });
        state.add_tainted_function(f1);
        state.add_tainted_function(f2);
        assert_eq!(state.tainted_functions()[0].tainted_params.len(), 2);
    }

    #[test]
    fn add_propagation_step_extends_current_path_for_source() {
        let mut state = AnalysisState::new();
        let s = source();
        let step = PropagationStep {
            step_type: PropagationStepType::Assignment,
            variable: "$id".into(),
            function: None,
            location: Location::new("a.php", 2, 0),
        };
        state.add_propagation_step(s.id, step.clone());
        state.add_propagation_step(s.id, step);
        assert_eq!(state.paths_for_source(&s.id).len(), 1);
        assert_eq!(state.paths_for_source(&s.id)[0].steps.len(), 2);
    }

    #[test]
    fn merging_empty_slice_is_a_no_op() {
        let mut state = AnalysisState::new();
        state.add_source(source());
        let before = state.sources().len();
        state.merge_from(AnalysisState::new());
        assert_eq!(state.sources().len(), before);
    }

    #[test]
    fn flow_graph_edges_reference_only_known_nodes() {
        let mut state = AnalysisState::new();
        let s = source();
        state.add_source(s.clone());
        state.add_tainted_variable(TaintedVariable {
            id: Uuid::new_v4(),
            name: "$id".into(),
            scope: "".into(),
            source: s,
            location: Location::new("a.php", 2, 0),
            depth: 0,
            language: "php".into(),
        });
        let graph = state.build_flow_graph();
        for edge in &graph.edges {
            assert!(graph.has_node(&edge.from));
            assert!(graph.has_node(&edge.to));
        }
    }
}
