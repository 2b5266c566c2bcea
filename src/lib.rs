//! Cladeview is a library that turns Newick-style tree descriptions into
//! render-ready dendrogram geometry and keeps node/leaf selections
//! internally consistent while the tree is browsed.
//!
//! The crate computes, it does not draw: an external charting surface
//! consumes the marker coordinates and edge polylines, and feeds the
//! identifiers of clicked or lasso-selected markers back in.
//! Core functionality provided:
//! - Newick parsing: Parse a nested-parenthesis description (multifurcating,
//!   optional names on internal vertices, optional branch lengths) into a
//!   rooted, ordered hierarchy. Malformed input fails fast with a
//!   positioned [ParseError]; no partial tree is ever returned.
//! - Layout: Derive deterministic 2D coordinates from pure topology —
//!   linear (Cartesian dendrogram) or radial (polar projection) — plus the
//!   stub-and-fan edge polylines for both modes. Branch lengths are parsed
//!   but deliberately ignored by the spacing; see [crate::layout] for the
//!   details.
//! - Selection: Expand an arbitrary set of picked identifiers into the
//!   tri-state closure (selected ancestors propagate down, complete child
//!   sets promote their parent up) and flatten it to the effective leaf
//!   selection. See [crate::select].
//!
//! Everything is synchronous and pure: each pass is a bounded traversal of
//! the in-memory tree, results are recomputed in full per request, and the
//! tree itself is never mutated after parsing.
//!
//! # Usage
//! Parse once, then lay out and select as often as the UI demands:
//! ```
//! use cladeview::{LayoutMode, compute_layout, expand_selection, parse_newick_str};
//!
//! let tree = parse_newick_str("((A:1,B:1):1,C:1);").unwrap();
//!
//! // Geometry for the renderer
//! let layout = compute_layout(&tree, LayoutMode::Radial);
//! assert_eq!(layout.nodes.len(), 5);
//!
//! // The renderer reported a click on "A" and "B"
//! let selection = expand_selection(&tree, ["A", "B"]);
//! assert_eq!(selection.selected_leaves, vec!["A", "B"]);
//!
//! // Re-highlight without recomputing the layout
//! let highlighted = layout.selected_indices(&selection);
//! assert_eq!(highlighted.len(), 2);
//! ```

pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod select;

pub use crate::layout::{LayoutMode, NodeMarker, Polyline, TreeLayout};
pub use crate::model::Tree;
pub use crate::parser::ParseError;
pub use crate::select::Selection;

// ============================================================================
// Quick API
// ============================================================================
/// Parses a single Newick-style description string into a [Tree].
///
/// See [`newick::parse_str`] for full documentation of the accepted format.
pub fn parse_newick_str<S: AsRef<str>>(description: S) -> Result<Tree, ParseError> {
    newick::parse_str(description)
}

/// Computes marker coordinates and edge polylines for a tree in the given
/// mode.
///
/// See [`layout::compute_layout`] for full documentation.
pub fn compute_layout(tree: &Tree, mode: LayoutMode) -> TreeLayout {
    layout::compute_layout(tree, mode)
}

/// Expands picked identifiers into the closure-complete [Selection].
///
/// See [`select::expand`] for full documentation.
pub fn expand_selection<I, S>(tree: &Tree, selected_ids: I) -> Selection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    select::expand(tree, selected_ids)
}
