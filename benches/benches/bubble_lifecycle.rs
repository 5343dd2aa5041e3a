// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_element_tree::{ElementId, LocalElement, Role, Tree};
use understory_speech_bubble::placement::place;
use understory_speech_bubble::route::route_press;
use understory_speech_bubble::{BubbleConfig, SpeechBubbles};

/// A frame holding an `n` x `n` grid of cells, each nested `depth` levels deep.
///
/// Deterministic: building twice yields the same ids.
fn build_grid(n: usize, depth: usize) -> (Tree, Vec<ElementId>) {
    let mut tree = Tree::new();
    let side = n as f64 * 40.0;
    let root = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, side, side)));
    let frame = tree.insert(
        Some(root),
        LocalElement::new(Rect::new(0.0, 0.0, side, side)).with_role(Role::FRAME),
    );
    let mut leaves = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * 40.0;
            let y0 = y as f64 * 40.0;
            let mut cell = tree.insert(
                Some(frame),
                LocalElement::new(Rect::new(x0, y0, x0 + 40.0, y0 + 40.0)),
            );
            for _ in 1..depth {
                cell = tree.insert(
                    Some(cell),
                    LocalElement::new(Rect::new(0.0, 0.0, 40.0, 40.0)),
                );
            }
            leaves.push(cell);
        }
    }
    (tree, leaves)
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_tree_hit_test");
    group.throughput(Throughput::Elements(1));
    for &n in &[8_usize, 32] {
        let (tree, _) = build_grid(n, 4);
        let pt = Point::new(n as f64 * 20.0 + 5.0, n as f64 * 20.0 + 5.0);
        group.bench_function(format!("grid_{n}x{n}_depth4"), |b| {
            b.iter(|| black_box(tree.hit_test_point(black_box(pt))));
        });
    }
    group.finish();
}

fn bench_route(c: &mut Criterion) {
    let (tree, leaves) = build_grid(16, 8);
    let target = leaves[leaves.len() / 2];
    c.bench_function("route_press_depth8", |b| {
        b.iter(|| black_box(route_press(&tree, black_box(target))));
    });
}

fn bench_place(c: &mut Criterion) {
    let config = BubbleConfig::default();
    let container = Rect::new(0.0, 0.0, 800.0, 600.0);
    c.bench_function("place", |b| {
        b.iter(|| {
            black_box(place(
                black_box(Rect::new(500.0, 40.0, 540.0, 70.0)),
                container,
                400.0,
                &config,
            ))
        });
    });
}

fn bench_show_dismiss_cycle(c: &mut Criterion) {
    let (_, leaves) = build_grid(16, 4);
    c.bench_function("show_dismiss_cycle_16", |b| {
        b.iter_batched(
            || (build_grid(16, 4).0, SpeechBubbles::default()),
            |(mut tree, mut bubbles)| {
                let mut now = Duration::ZERO;
                for &anchor in leaves.iter().take(16) {
                    let _ = bubbles.show(&mut tree, anchor, "Tip", None, now);
                    let _ = bubbles.frame();
                    now += Duration::from_millis(100);
                    let _ = bubbles.advance(&mut tree, now);
                }
                let _ = bubbles.remove(now);
                black_box(bubbles.advance(&mut tree, now + Duration::from_secs(1)))
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_hit_test,
    bench_route,
    bench_place,
    bench_show_dismiss_cycle
);
criterion_main!(benches);
