use cladeview::layout::{LayoutMode, TIP_X_OFFSET, compute_layout, subtree_depths};
use cladeview::newick::parse_str;
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

const EPSILON: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Marker coordinates keyed by arena index.
fn positions_by_index(layout: &cladeview::TreeLayout) -> HashMap<usize, (f64, f64)> {
    layout
        .nodes
        .iter()
        .map(|marker| (marker.index, (marker.x, marker.y)))
        .collect()
}

// --- DEPTH PASS ---

#[test]
fn test_depths_are_subtree_leaf_counts() {
    let tree = parse_str("((A,B),(C,(D,E)),F);").unwrap();
    let depths = subtree_depths(&tree);

    // Root depth equals the number of leaves
    assert_eq!(depths[tree.root_index()], tree.num_leaves());
    assert_eq!(depths[tree.root_index()], 6);

    // Leaves have depth 1; every internal vertex sums its children
    for vertex in tree.post_order_iter() {
        match vertex.children() {
            None => assert_eq!(depths[vertex.index()], 1),
            Some(children) => {
                let sum: usize = children.iter().map(|&c| depths[c]).sum();
                assert_eq!(depths[vertex.index()], sum);
            }
        }
    }
}

// --- LINEAR COORDINATES ---

#[test]
fn test_two_leaf_tree_linear() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let depths = subtree_depths(&tree);
    assert_eq!(depths[tree.root_index()], 2);

    let layout = compute_layout(&tree, LayoutMode::Linear);
    assert_eq!(layout.nodes.len(), 3);

    // Pre-order draw order: root first, then the leaves in document order
    let root = &layout.nodes[0];
    assert!(!root.is_leaf);
    assert!(close(root.x, 0.0));
    assert!(close(root.y, 0.5));

    let a = &layout.nodes[1];
    let b = &layout.nodes[2];
    assert_eq!(a.name.as_deref(), Some("A"));
    assert_eq!(b.name.as_deref(), Some("B"));
    // maxDepth - depth = 1, plus the fixed tip offset
    assert!(close(a.x, 1.0 + TIP_X_OFFSET));
    assert!(close(b.x, 1.0 + TIP_X_OFFSET));
    assert!(close(a.y, 0.0));
    assert!(close(b.y, 1.0));

    // Linear mode carries no polar coordinates
    assert!(a.r.is_none());
    assert!(a.theta.is_none());
}

#[test]
fn test_leaf_rows_are_a_permutation() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);

    let mut leaf_ys: Vec<f64> = layout
        .nodes
        .iter()
        .filter(|m| m.is_leaf)
        .map(|m| m.y)
        .collect();
    leaf_ys.sort_by(f64::total_cmp);

    let expected: Vec<f64> = (0..6).map(|i| i as f64).collect();
    assert_eq!(leaf_ys, expected);
}

#[test]
fn test_leaf_rows_follow_document_order() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);

    let row_of = |name: &str| {
        layout
            .nodes
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
            .map(|m| m.y)
            .unwrap()
    };

    for (row, name) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        assert!(close(row_of(name), row as f64));
    }
}

#[test]
fn test_internal_row_is_midpoint_of_extremes() {
    // Root children sit at rows 0.5, 2.0, and 3.75; the midpoint of the
    // extremes (2.125) differs from the mean of all three (~2.083)
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);
    let positions = positions_by_index(&layout);

    let (_, root_y) = positions[&tree.root_index()];
    assert!(close(root_y, 2.125));

    // And every internal row lies within its children's extremes
    for vertex in tree.post_order_iter() {
        if let Some(children) = vertex.children() {
            let ys: Vec<f64> = children.iter().map(|&c| positions[&c].1).collect();
            let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let own = positions[&vertex.index()].1;
            assert!(own >= min && own <= max);
            assert!(close(own, (min + max) / 2.0));
        }
    }
}

#[test]
fn test_x_grows_from_root_to_leaves() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);
    let positions = positions_by_index(&layout);

    assert!(close(positions[&tree.root_index()].0, 0.0));

    for vertex in tree.pre_order_iter() {
        if let Some(children) = vertex.children() {
            let own_x = positions[&vertex.index()].0;
            for &child in children {
                assert!(positions[&child].0 >= own_x);
            }
        }
    }

    // Leaves occupy the outermost band
    let max_internal_x = layout
        .nodes
        .iter()
        .filter(|m| !m.is_leaf)
        .map(|m| m.x)
        .fold(f64::NEG_INFINITY, f64::max);
    for marker in layout.nodes.iter().filter(|m| m.is_leaf) {
        assert!(marker.x > max_internal_x);
    }
}

// --- LINEAR EDGES ---

#[test]
fn test_two_leaf_tree_linear_edges() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);

    // Root x = 0, nearest child x = 31, so the elbow sits at 15.5
    let mid = (1.0 + TIP_X_OFFSET) / 2.0;

    let expected_horizontal = vec![
        Some((0.0, 0.5)), // stub start
        Some((mid, 0.5)), // stub end
        None,
        Some((mid, 0.0)), // fan to A
        Some((1.0 + TIP_X_OFFSET, 0.0)),
        None,
        Some((mid, 1.0)), // fan to B
        Some((1.0 + TIP_X_OFFSET, 1.0)),
        None,
    ];
    assert_eq!(layout.horizontal.points(), expected_horizontal.as_slice());

    let expected_vertical = vec![Some((mid, 0.0)), Some((mid, 1.0)), None];
    assert_eq!(layout.vertical.points(), expected_vertical.as_slice());
}

#[test]
fn test_one_stroke_group_per_internal_vertex() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);

    // Each internal vertex emits one vertical stroke: 2 points + 1 pen-up
    let internal_count = layout.nodes.iter().filter(|m| !m.is_leaf).count();
    assert_eq!(layout.vertical.points().len(), internal_count * 3);

    // Horizontal: per internal vertex a stub (3 entries) plus one fan
    // stroke (3 entries) per child
    let child_count: usize = tree
        .pre_order_iter()
        .filter_map(|v| v.children().map(|c| c.len()))
        .sum();
    assert_eq!(
        layout.horizontal.points().len(),
        internal_count * 3 + child_count * 3
    );
}

// --- RADIAL MODE ---

#[test]
fn test_two_leaf_tree_radial() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Radial);

    // yMin = 0, yMax = 1, gap = 1: A maps to pi, B to 2*pi, root to 1.5*pi
    let a = layout
        .nodes
        .iter()
        .find(|m| m.name.as_deref() == Some("A"))
        .unwrap();
    let b = layout
        .nodes
        .iter()
        .find(|m| m.name.as_deref() == Some("B"))
        .unwrap();
    let root = &layout.nodes[0];

    assert!(close(a.theta.unwrap(), PI));
    assert!(close(b.theta.unwrap(), TAU));
    assert!(close(root.theta.unwrap(), 1.5 * PI));

    // Radius equals the linear x
    assert!(close(a.r.unwrap(), 1.0 + TIP_X_OFFSET));
    assert!(close(root.r.unwrap(), 0.0));

    // Markers carry the Cartesian projection of (r, theta)
    assert!(close(a.x, -(1.0 + TIP_X_OFFSET)));
    assert!(close(a.y, 0.0));
    assert!(close(b.x, 1.0 + TIP_X_OFFSET));
    assert!(close(b.y, 0.0));
}

#[test]
fn test_radial_angles_within_full_turn() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Radial);

    for marker in &layout.nodes {
        let theta = marker.theta.unwrap();
        assert!(theta > 0.0 && theta <= TAU);
    }
}

#[test]
fn test_radial_matches_linear_topology() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();
    let linear = compute_layout(&tree, LayoutMode::Linear);
    let radial = compute_layout(&tree, LayoutMode::Radial);

    let linear_positions = positions_by_index(&linear);

    for marker in &radial.nodes {
        // r is the linear x for the same vertex
        let (linear_x, _) = linear_positions[&marker.index];
        assert!(close(marker.r.unwrap(), linear_x));

        // Cartesian markers are consistent with their polar pair
        let (r, theta) = (marker.r.unwrap(), marker.theta.unwrap());
        assert!(close(marker.x, theta.cos() * r));
        assert!(close(marker.y, theta.sin() * r));
    }

    // Leaves keep their angular order from the linear rows
    let leaf_thetas: Vec<(f64, f64)> = radial
        .nodes
        .iter()
        .filter(|m| m.is_leaf)
        .map(|m| (linear_positions[&m.index].1, m.theta.unwrap()))
        .collect();
    for pair in leaf_thetas.windows(2) {
        assert_eq!(
            pair[0].0 < pair[1].0,
            pair[0].1 < pair[1].1,
            "angular order must match linear row order"
        );
    }
}

#[test]
fn test_radial_arc_sampling() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Radial);

    // One arc for the root: 25 samples + 2 child angles + the parent angle,
    // then a pen-up marker
    let points = layout.vertical.points();
    assert_eq!(points.len(), 29);
    assert!(points[28].is_none());

    // The whole arc sits at the elbow radius
    let mid = (0.0 + (1.0 + TIP_X_OFFSET)) / 2.0;
    for point in &points[..28] {
        let (x, y) = point.unwrap();
        assert!(close((x * x + y * y).sqrt(), mid));
    }

    // Angles are emitted in ascending order
    let mut previous = f64::NEG_INFINITY;
    for point in &points[..28] {
        let (x, y) = point.unwrap();
        let mut angle = y.atan2(x);
        if angle <= 0.0 {
            angle += TAU;
        }
        assert!(angle >= previous - EPSILON);
        previous = angle;
    }
}

// --- DETERMINISM AND WIRE SHAPE ---

#[test]
fn test_layout_is_deterministic() {
    let tree = parse_str("((A,B),C,(D,(E,F)));").unwrap();

    let first = compute_layout(&tree, LayoutMode::Radial);
    let second = compute_layout(&tree, LayoutMode::Radial);
    assert_eq!(first, second);

    let first = compute_layout(&tree, LayoutMode::Linear);
    let second = compute_layout(&tree, LayoutMode::Linear);
    assert_eq!(first, second);
}

#[test]
fn test_polyline_wire_shape() {
    let tree = parse_str("(A:1,B:1);").unwrap();
    let layout = compute_layout(&tree, LayoutMode::Linear);

    // Pen-up sentinels serialize as nulls, points as [x, y] pairs
    let json = serde_json::to_value(&layout.vertical).unwrap();
    assert_eq!(
        json,
        serde_json::json!([[15.5, 0.0], [15.5, 1.0], null])
    );
}

#[test]
fn test_mode_serializes_lowercase() {
    assert_eq!(
        serde_json::to_value(LayoutMode::Linear).unwrap(),
        serde_json::json!("linear")
    );
    assert_eq!(
        serde_json::to_value(LayoutMode::Radial).unwrap(),
        serde_json::json!("radial")
    );
}
