//! Radial (polar) projection of the linear layout and its edge geometry.

use super::{ARC_SAMPLE_COUNT, Polyline, RADIAL_ANGLE_GAP};
use crate::model::{Tree, TreeIndex};
use std::f64::consts::TAU;

/// Projects linear coordinates onto the circle.
///
/// Radius is the linear `x` (tip offsets included); the angle rescales the
/// linear `y` to a full turn, with [RADIAL_ANGLE_GAP] keeping the first and
/// last leaf from coinciding where the circle closes. The extremes are taken
/// over all vertices, so the result is a pure function of the linear pass.
pub(super) fn to_polar(positions: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let y_min = positions.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = positions
        .iter()
        .map(|p| p.1)
        .fold(f64::NEG_INFINITY, f64::max);

    positions
        .iter()
        .map(|&(x, y)| {
            let r = x;
            let theta = TAU * (y - y_min + RADIAL_ANGLE_GAP) / (y_max - y_min + RADIAL_ANGLE_GAP);
            (r, theta)
        })
        .collect()
}

/// Converts polar coordinates to their Cartesian plot positions.
pub(super) fn to_cartesian(polar: &[(f64, f64)]) -> Vec<(f64, f64)> {
    polar.iter().map(|&(r, theta)| point(r, theta)).collect()
}

fn point(r: f64, theta: f64) -> (f64, f64) {
    (theta.cos() * r, theta.sin() * r)
}

/// Builds the horizontal and vertical edge polylines for radial mode.
///
/// The stub-and-fan routing mirrors linear mode in polar terms, with each
/// endpoint converted to Cartesian. The elbow connector becomes an arc at
/// the midpoint radius: [ARC_SAMPLE_COUNT] evenly spaced angles across the
/// children's angular extremes, unioned with the children's exact angles and
/// the parent's angle, sorted ascending, one polyline point each. Children
/// are emitted in ascending angle (draw order only).
pub(super) fn edges(tree: &Tree, polar: &[(f64, f64)]) -> (Polyline, Polyline) {
    let mut horizontal = Polyline::new();
    let mut vertical = Polyline::new();

    emit(tree, tree.root_index(), polar, &mut horizontal, &mut vertical);

    (horizontal, vertical)
}

fn emit(
    tree: &Tree,
    index: TreeIndex,
    polar: &[(f64, f64)],
    horizontal: &mut Polyline,
    vertical: &mut Polyline,
) {
    let Some(children) = tree[index].children() else {
        return;
    };

    let mut order: Vec<TreeIndex> = children.to_vec();
    order.sort_by(|&a, &b| polar[a].1.total_cmp(&polar[b].1));

    for &child in &order {
        emit(tree, child, polar, horizontal, vertical);
    }

    let (r_start, theta) = polar[index];
    let r_end = order
        .iter()
        .map(|&child| polar[child].0)
        .fold(f64::INFINITY, f64::min);
    let mid = (r_start + r_end) / 2.0;

    // Stub from the vertex to the elbow radius, along its own angle
    let (x, y) = point(r_start, theta);
    horizontal.push_point(x, y);
    let (x, y) = point(mid, theta);
    horizontal.push_point(x, y);
    horizontal.break_stroke();

    // Fan from the elbow radius outward to each child
    let mut min_theta = f64::INFINITY;
    let mut max_theta = f64::NEG_INFINITY;
    for &child in &order {
        let (child_r, child_theta) = polar[child];
        let (x, y) = point(mid, child_theta);
        horizontal.push_point(x, y);
        let (x, y) = point(child_r, child_theta);
        horizontal.push_point(x, y);
        horizontal.break_stroke();

        min_theta = min_theta.min(child_theta);
        max_theta = max_theta.max(child_theta);
    }

    // Arc at the elbow radius; sampled so it renders as a smooth curve
    let mut angles: Vec<f64> = order.iter().map(|&child| polar[child].1).collect();
    angles.push(theta);
    let span = max_theta - min_theta;
    if span > 0.0 {
        let step = span / ARC_SAMPLE_COUNT as f64;
        for k in 0..ARC_SAMPLE_COUNT {
            angles.push(min_theta + k as f64 * step);
        }
    }
    angles.sort_by(f64::total_cmp);

    for angle in angles {
        let (x, y) = point(mid, angle);
        vertical.push_point(x, y);
    }
    vertical.break_stroke();
}
