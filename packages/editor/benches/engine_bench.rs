use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mindplan_editor::engine;
use mindplan_editor::NodePatch;
use mindplan_model::Node;

// Root with `width` branches, each `depth` levels deep
fn wide_tree(width: usize, depth: usize) -> Arc<Node> {
    let mut root = Node::new("root", "Root");
    for b in 0..width {
        let mut branch = Node::new(format!("b{}-{}", b, depth), "leaf");
        for d in (0..depth).rev() {
            branch = Node::new(format!("b{}-{}", b, d), format!("level {}", d)).with_child(branch);
        }
        root = root.with_child(branch);
    }
    Arc::new(root)
}

fn patch_deep_leaf(c: &mut Criterion) {
    let tree = wide_tree(200, 8);

    c.bench_function("patch_deep_leaf", |b| {
        b.iter(|| engine::patch(black_box(&tree), black_box("b150-8"), &NodePatch::label("edited")))
    });
}

fn reparent_across_branches(c: &mut Criterion) {
    let tree = wide_tree(200, 8);

    c.bench_function("reparent_across_branches", |b| {
        b.iter(|| engine::reparent(black_box(&tree), black_box("b10-3"), black_box("b190-7")))
    });
}

fn locate_missing(c: &mut Criterion) {
    let tree = wide_tree(200, 8);

    c.bench_function("locate_missing", |b| {
        b.iter(|| engine::locate(black_box(&tree), black_box("nope")))
    });
}

criterion_group!(benches, patch_deep_leaf, reparent_across_branches, locate_missing);
criterion_main!(benches);
