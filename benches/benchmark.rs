use cladeview::layout::{LayoutMode, compute_layout};
use cladeview::newick::parse_str;
use cladeview::select::expand;
use criterion::{Criterion, criterion_group, criterion_main};

/// Builds a balanced binary description with `2^depth` leaves.
fn balanced_description(depth: u32) -> String {
    fn write_subtree(out: &mut String, depth: u32, counter: &mut usize) {
        if depth == 0 {
            out.push('L');
            out.push_str(&counter.to_string());
            *counter += 1;
            out.push_str(":1.0");
        } else {
            out.push('(');
            write_subtree(out, depth - 1, counter);
            out.push(',');
            write_subtree(out, depth - 1, counter);
            out.push_str("):1.0");
        }
    }

    let mut description = String::new();
    let mut counter = 0;
    write_subtree(&mut description, depth, &mut counter);
    description.push(';');
    description
}

fn parsing(c: &mut Criterion) {
    let description = balanced_description(10); // 1024 leaves

    c.bench_function("parse_1k_leaves", |b| {
        b.iter(|| parse_str(&description).unwrap());
    });
}

fn layouting(c: &mut Criterion) {
    let description = balanced_description(10);
    let tree = parse_str(&description).unwrap();

    c.bench_function("layout_linear_1k_leaves", |b| {
        b.iter(|| compute_layout(&tree, LayoutMode::Linear));
    });
    c.bench_function("layout_radial_1k_leaves", |b| {
        b.iter(|| compute_layout(&tree, LayoutMode::Radial));
    });
}

fn selecting(c: &mut Criterion) {
    let description = balanced_description(10);
    let tree = parse_str(&description).unwrap();

    // Pick every third leaf, a mix that exercises both propagation rules
    let picked: Vec<String> = (0..1024).step_by(3).map(|i| format!("L{i}")).collect();

    c.bench_function("expand_selection_1k_leaves", |b| {
        b.iter(|| expand(&tree, &picked));
    });
}

criterion_group!(passes, parsing, layouting, selecting);
criterion_main!(passes);
