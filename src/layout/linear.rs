//! Linear (Cartesian) dendrogram coordinates and edge geometry.

use super::{Polyline, TIP_X_OFFSET};
use crate::model::{Tree, TreeIndex};

/// Assigns linear coordinates to every vertex, keyed by [TreeIndex].
///
/// `x = maxDepth − depth`; leaves are pushed outward by [TIP_X_OFFSET] and
/// take consecutive integer `y` in document order, internal vertices sit at
/// the midpoint of their children's extreme `y` values.
pub(super) fn coordinates(tree: &Tree, depths: &[usize]) -> Vec<(f64, f64)> {
    let max_depth = depths[tree.root_index()];
    let mut positions = vec![(0.0, 0.0); tree.num_vertices()];
    let mut next_tip_index = 0usize;

    assign(
        tree,
        tree.root_index(),
        depths,
        max_depth,
        &mut positions,
        &mut next_tip_index,
    );

    positions
}

/// Recursively assigns a position to `index` and its subtree, returning the
/// vertex's `y`. Children are visited in document order so that the tip
/// counter matches the description's leaf order.
fn assign(
    tree: &Tree,
    index: TreeIndex,
    depths: &[usize],
    max_depth: usize,
    positions: &mut [(f64, f64)],
    next_tip_index: &mut usize,
) -> f64 {
    let vertex = &tree[index];
    let mut x = (max_depth - depths[index]) as f64;

    let y = match vertex.children() {
        Some(children) => {
            let mut min_y = f64::INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for &child in children {
                let child_y = assign(tree, child, depths, max_depth, positions, next_tip_index);
                min_y = min_y.min(child_y);
                max_y = max_y.max(child_y);
            }
            // Midpoint of the extremes, not the mean of all children
            (min_y + max_y) / 2.0
        }
        None => {
            let y = *next_tip_index as f64;
            *next_tip_index += 1;
            x += TIP_X_OFFSET;
            y
        }
    };

    positions[index] = (x, y);
    y
}

/// Builds the horizontal and vertical edge polylines for linear mode.
///
/// Per internal vertex: a stub from its own `x` to the midpoint between its
/// `x` and the nearest child `x`, a fan segment from that midpoint to each
/// child, and one vertical segment at the midpoint spanning the children's
/// `y` extremes. Children are emitted in ascending subtree depth (draw
/// order only).
pub(super) fn edges(tree: &Tree, depths: &[usize], positions: &[(f64, f64)]) -> (Polyline, Polyline) {
    let mut horizontal = Polyline::new();
    let mut vertical = Polyline::new();

    emit(
        tree,
        tree.root_index(),
        depths,
        positions,
        &mut horizontal,
        &mut vertical,
    );

    (horizontal, vertical)
}

fn emit(
    tree: &Tree,
    index: TreeIndex,
    depths: &[usize],
    positions: &[(f64, f64)],
    horizontal: &mut Polyline,
    vertical: &mut Polyline,
) {
    let Some(children) = tree[index].children() else {
        return;
    };

    let mut order: Vec<TreeIndex> = children.to_vec();
    order.sort_by_key(|&child| depths[child]);

    // Children's own connectors are drawn underneath the parent's
    for &child in &order {
        emit(tree, child, depths, positions, horizontal, vertical);
    }

    let (x_start, y) = positions[index];
    let x_end = order
        .iter()
        .map(|&child| positions[child].0)
        .fold(f64::INFINITY, f64::min);
    let mid = (x_start + x_end) / 2.0;

    // Stub from the vertex to the elbow
    horizontal.push_point(x_start, y);
    horizontal.push_point(mid, y);
    horizontal.break_stroke();

    // Fan from the elbow to each child
    let mut min_child_y = f64::INFINITY;
    let mut max_child_y = f64::NEG_INFINITY;
    for &child in &order {
        let (child_x, child_y) = positions[child];
        horizontal.push_point(mid, child_y);
        horizontal.push_point(child_x, child_y);
        horizontal.break_stroke();

        min_child_y = min_child_y.min(child_y);
        max_child_y = max_child_y.max(child_y);
    }

    // Elbow connector spanning the children's extremes
    vertical.push_point(mid, min_child_y);
    vertical.push_point(mid, max_child_y);
    vertical.break_stroke();
}
