use crate::path::NodePath;
use crate::statics;
use crate::tree::DisplayNode;
use std::collections::HashSet;

/// Result of a vocabulary search: matching nodes to select, plus the ancestor
/// containers to expand so every match is visible.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchHits {
    pub selected: Vec<NodePath>,
    pub expanded: HashSet<NodePath>,
}

impl SearchHits {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Matches `term` against the projected tree. Terms outside the fixed
/// vocabulary yield no hits and no error; the field is fed by free-typed user
/// input, so an unknown word is a no-op rather than a failure. A node matches
/// on exact, case-insensitive equality with its key label or its displayed
/// value text (no substring matching).
pub fn search(term: &str, tree: &[DisplayNode]) -> SearchHits {
    let term = term.trim();
    let mut hits = SearchHits::default();

    let recognized = statics::SEARCH_VOCABULARY
        .iter()
        .any(|t| t.eq_ignore_ascii_case(term));
    if !recognized {
        return hits;
    }

    for node in tree {
        visit(node, term, &mut hits);
    }
    hits
}

fn visit(node: &DisplayNode, term: &str, hits: &mut SearchHits) {
    if term.eq_ignore_ascii_case(&node.label) || term.eq_ignore_ascii_case(&node.value_text) {
        hits.expanded.extend(node.path.ancestors());
        hits.selected.push(node.path.clone());
    }
    for child in &node.children {
        visit(child, term, hits);
    }
}
