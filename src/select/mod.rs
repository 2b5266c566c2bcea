//! Tri-state selection closure over a hierarchy.
//!
//! A vertex counts as selected iff one of three rules applies:
//! 1. its name was passed by the caller (**explicit**),
//! 2. an ancestor is selected (**propagate down**), or
//! 3. every one of its children is selected (**propagate up**).
//!
//! [expand] computes the simultaneous fixed point of these rules in a
//! single depth-first traversal: the ancestor state is threaded downward as
//! a parameter, the all-children state bubbles upward through return
//! values, and membership tests consult only the caller's original id set.
//! No traversal-global accumulator is read mid-pass, so the result is
//! independent of child order.
//!
//! Selection never fails: identifiers that match no vertex are ignored, and
//! an empty input yields empty output. The returned [Selection] is the
//! notification value the caller forwards to its renderer (highlighting)
//! and host application (effective leaf selection).

use crate::model::{Tree, TreeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

// =#========================================================================#=
// SELECTION
// =#========================================================================#=
/// Result of a selection closure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    /// Names of all selected leaves, de-duplicated, in document traversal
    /// order. This is the effective selection the host application consumes
    /// (e.g. which underlying records are selected).
    pub selected_leaves: Vec<String>,

    /// Every named vertex (leaf or internal) that ends up selected.
    /// Unnamed internal vertices may be selected but contribute no
    /// identifier.
    pub canonical_selected: BTreeSet<String>,

    /// The subset of [canonical_selected](Self::canonical_selected) that was
    /// not named by the caller — vertices selected via closure rather than
    /// direct user action.
    pub newly_inferred: BTreeSet<String>,
}

/// Expands a set of picked identifiers into the closure-complete selection.
///
/// # Arguments
/// * `tree` - The hierarchy to select within
/// * `selected_ids` - Identifiers the user picked (leaf or internal names);
///   unknown identifiers are silently ignored
///
/// # Properties
/// The operation is idempotent (feeding `canonical_selected` back in
/// reproduces the same selection) and monotone (more input ids never shrink
/// the output).
///
/// # Example
/// ```
/// use cladeview::newick::parse_str;
/// use cladeview::select::expand;
///
/// let tree = parse_str("((A:1,B:1):1,C:1);").unwrap();
/// let selection = expand(&tree, ["A", "B"]);
///
/// // A and B make up their parent's full child set, so it is promoted;
/// // C and the root stay unselected.
/// assert_eq!(selection.selected_leaves, vec!["A", "B"]);
/// assert!(!selection.canonical_selected.contains("C"));
/// ```
pub fn expand<I, S>(tree: &Tree, selected_ids: I) -> Selection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let explicit: HashSet<String> = selected_ids
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect();

    let mut selection = Selection::default();
    let mut seen_leaves: HashSet<String> = HashSet::new();

    visit(
        tree,
        tree.root_index(),
        false,
        &explicit,
        &mut selection,
        &mut seen_leaves,
    );

    debug!(
        picked = explicit.len(),
        leaves = selection.selected_leaves.len(),
        inferred = selection.newly_inferred.len(),
        "expanded selection"
    );

    selection
}

/// Resolves the selected state of `index` and its subtree, returning whether
/// the vertex ends up selected.
///
/// `ancestor_selected` carries rule 2 downward; the return value carries
/// rule 3 upward. Rule 1 is checked against the caller's original ids only.
fn visit(
    tree: &Tree,
    index: TreeIndex,
    ancestor_selected: bool,
    explicit: &HashSet<String>,
    selection: &mut Selection,
    seen_leaves: &mut HashSet<String>,
) -> bool {
    let vertex = &tree[index];
    let name = vertex.name();
    let explicitly_named = name.is_some_and(|n| explicit.contains(n));
    let own = ancestor_selected || explicitly_named;

    let selected = match vertex.children() {
        Some(children) => {
            let mut all_children_selected = true;
            for &child in children {
                // No short-circuit: every child must be resolved
                let child_selected = visit(tree, child, own, explicit, selection, seen_leaves);
                all_children_selected &= child_selected;
            }
            own || all_children_selected
        }
        None => {
            if own {
                if let Some(n) = name {
                    if seen_leaves.insert(n.to_string()) {
                        selection.selected_leaves.push(n.to_string());
                    }
                }
            }
            own
        }
    };

    if selected {
        if let Some(n) = name {
            selection.canonical_selected.insert(n.to_string());
            if !explicitly_named {
                selection.newly_inferred.insert(n.to_string());
            }
        }
    }

    selected
}
