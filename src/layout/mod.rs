//! Layout passes turning a hierarchy into render-ready geometry.
//!
//! This module derives deterministic 2D coordinates and edge geometry from
//! pure topology; branch lengths are deliberately ignored. Three passes
//! build on each other:
//!
//! 1. **Depth pass** — [subtree_depths]: every vertex is annotated with the
//!    leaf count of its subtree (leaves count 1). This synthetic depth is a
//!    length-independent substitute for "time since root" and is the only
//!    quantity the spacing is derived from.
//! 2. **Linear pass** — Cartesian dendrogram coordinates:
//!    `x = maxDepth − depth`, so `x` grows from the root (0) toward the
//!    leaves, which are additionally pushed outward by [TIP_X_OFFSET] to
//!    leave room for labels. Leaves take consecutive integer `y` in document
//!    order; an internal vertex sits at the midpoint of its children's
//!    extreme `y` values (not their mean).
//! 3. **Radial pass** (radial mode only) — the linear coordinates are
//!    projected onto a circle: radius is the linear `x`, angle is the
//!    linear `y` rescaled to a full turn with a fixed gap so the first and
//!    last leaf don't coincide.
//!
//! Edges are emitted as two polylines — "horizontal" strokes along the
//! depth/radial direction and "vertical" strokes along the height/angular
//! direction — with `None` pen-up sentinels between disjoint strokes, so a
//! renderer can draw each polyline as a single primitive. Connecting elbows
//! use stub-then-fan routing: a stub from the parent to a computed midpoint
//! radius, then one fan segment per child. In radial mode the vertical
//! stroke becomes an arc at constant radius, approximated by sampled
//! angles.
//!
//! All passes are pure functions of the tree; nothing is cached or mutated,
//! and repeated calls yield identical results.

mod linear;
mod radial;

use crate::model::{Tree, TreeIndex};
use crate::select::Selection;
use serde::Serialize;
use tracing::debug;

/// Fixed outward offset applied to leaf `x` (and thus radial `r`) so tips
/// clear their connecting edges and leave room for labels.
pub const TIP_X_OFFSET: f64 = 30.0;

/// Angular gap (in `y` units) keeping the first and last leaf apart when
/// the circle closes in radial mode.
pub(crate) const RADIAL_ANGLE_GAP: f64 = 1.0;

/// Number of evenly spaced sample angles used to approximate a connecting
/// arc as a polyline.
pub(crate) const ARC_SAMPLE_COUNT: usize = 25;

// =#========================================================================#=
// LAYOUT TYPES
// =#========================================================================#=
/// Layout variant to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Cartesian dendrogram: depth on the x axis, leaf order on the y axis.
    Linear,
    /// Polar projection: depth as radius, leaf order as angle.
    Radial,
}

/// Marker position for a single vertex, as consumed by the renderer.
///
/// In linear mode `x`/`y` are the Cartesian dendrogram coordinates and
/// `r`/`theta` are absent. In radial mode `r`/`theta` are the polar
/// coordinates and `x`/`y` are their Cartesian equivalents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMarker {
    /// Arena index of the vertex this marker belongs to
    pub index: TreeIndex,
    /// Display name, if the vertex has one
    pub name: Option<String>,
    /// Horizontal plot coordinate
    pub x: f64,
    /// Vertical plot coordinate
    pub y: f64,
    /// Radius (radial mode only)
    pub r: Option<f64>,
    /// Angle in radians (radial mode only)
    pub theta: Option<f64>,
    /// Subtree leaf count of the vertex
    pub depth: usize,
    /// Whether the vertex is a tip (renderers size/color tips differently)
    pub is_leaf: bool,
}

/// A polyline made of disjoint strokes, separated by `None` pen-up markers.
///
/// Renderers that draw many disconnected segments with a single line
/// primitive consume exactly this shape; serialization turns the pen-up
/// markers into `null` entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Option<(f64, f64)>>,
}

impl Polyline {
    /// Creates an empty polyline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the current stroke.
    pub fn push_point(&mut self, x: f64, y: f64) {
        self.points.push(Some((x, y)));
    }

    /// Ends the current stroke; the next point starts a new one.
    pub fn break_stroke(&mut self) {
        self.points.push(None);
    }

    /// Returns the flat point sequence, pen-up markers included.
    pub fn points(&self) -> &[Option<(f64, f64)>] {
        &self.points
    }

    /// Returns `true` if no points have been emitted.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Complete render-ready geometry for one layout request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    /// The layout variant this geometry was computed for
    pub mode: LayoutMode,
    /// Marker per vertex, in draw order (pre-order, children by ascending depth)
    pub nodes: Vec<NodeMarker>,
    /// Depth/radial-direction strokes (stubs and fans)
    pub horizontal: Polyline,
    /// Height/angular-direction strokes (elbow connectors, arcs in radial mode)
    pub vertical: Polyline,
}

impl TreeLayout {
    /// Returns the positions within [nodes](Self::nodes) of every marker
    /// whose vertex is part of the given selection.
    ///
    /// This lets a renderer re-highlight markers after a selection change
    /// without recomputing the layout.
    pub fn selected_indices(&self, selection: &Selection) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, marker)| {
                marker
                    .name
                    .as_deref()
                    .is_some_and(|name| selection.canonical_selected.contains(name))
            })
            .map(|(position, _)| position)
            .collect()
    }
}

// =#========================================================================#=
// LAYOUT PASSES
// =#========================================================================#=
/// Computes the synthetic topological depth of every vertex: the number of
/// leaves in its subtree. Leaves have depth 1; an internal vertex's depth is
/// the sum of its children's depths.
///
/// # Returns
/// Depths keyed by [TreeIndex]; the root's entry equals the total leaf count.
pub fn subtree_depths(tree: &Tree) -> Vec<usize> {
    let mut depths = vec![0usize; tree.num_vertices()];

    for vertex in tree.post_order_iter() {
        depths[vertex.index()] = match vertex.children() {
            None => 1,
            Some(children) => children.iter().map(|&child| depths[child]).sum(),
        };
    }

    depths
}

/// Computes the full layout for a tree in the requested mode.
///
/// The result is a pure function of the tree and mode: repeated calls on an
/// unmodified tree produce identical geometry.
///
/// # Example
/// ```
/// use cladeview::layout::{compute_layout, LayoutMode};
/// use cladeview::newick::parse_str;
///
/// let tree = parse_str("(A:1,B:1);").unwrap();
/// let layout = compute_layout(&tree, LayoutMode::Linear);
///
/// assert_eq!(layout.nodes.len(), 3);
/// assert!(!layout.horizontal.is_empty());
/// ```
pub fn compute_layout(tree: &Tree, mode: LayoutMode) -> TreeLayout {
    let depths = subtree_depths(tree);
    let positions = linear::coordinates(tree, &depths);

    let layout = match mode {
        LayoutMode::Linear => {
            let nodes = collect_markers(tree, &depths, &positions, None);
            let (horizontal, vertical) = linear::edges(tree, &depths, &positions);
            TreeLayout {
                mode,
                nodes,
                horizontal,
                vertical,
            }
        }
        LayoutMode::Radial => {
            let polar = radial::to_polar(&positions);
            let cartesian = radial::to_cartesian(&polar);
            let nodes = collect_markers(tree, &depths, &cartesian, Some(&polar));
            let (horizontal, vertical) = radial::edges(tree, &polar);
            TreeLayout {
                mode,
                nodes,
                horizontal,
                vertical,
            }
        }
    };

    debug!(
        ?mode,
        markers = layout.nodes.len(),
        "computed dendrogram layout"
    );

    layout
}

/// Collects markers in draw order: pre-order, visiting children sorted by
/// ascending subtree depth. The ordering affects z-order only; coordinates
/// are fixed by the linear pass in document order.
fn collect_markers(
    tree: &Tree,
    depths: &[usize],
    coordinates: &[(f64, f64)],
    polar: Option<&[(f64, f64)]>,
) -> Vec<NodeMarker> {
    fn visit(
        tree: &Tree,
        index: TreeIndex,
        depths: &[usize],
        coordinates: &[(f64, f64)],
        polar: Option<&[(f64, f64)]>,
        out: &mut Vec<NodeMarker>,
    ) {
        let vertex = &tree[index];
        let (x, y) = coordinates[index];
        out.push(NodeMarker {
            index,
            name: vertex.name().map(str::to_string),
            x,
            y,
            r: polar.map(|p| p[index].0),
            theta: polar.map(|p| p[index].1),
            depth: depths[index],
            is_leaf: vertex.is_leaf(),
        });

        if let Some(children) = vertex.children() {
            let mut order: Vec<TreeIndex> = children.to_vec();
            order.sort_by_key(|&child| depths[child]);
            for child in order {
                visit(tree, child, depths, coordinates, polar, out);
            }
        }
    }

    let mut markers = Vec::with_capacity(tree.num_vertices());
    visit(tree, tree.root_index(), depths, coordinates, polar, &mut markers);
    markers
}
