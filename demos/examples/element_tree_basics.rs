// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree basics.
//!
//! Build a small document, query geometry and ancestry, hide a region, and commit.
//!
//! Run:
//! - `cargo run -p understory_demos --example element_tree_basics`

use kurbo::{Point, Rect};
use understory_element_tree::{LocalElement, Role, Tree};

fn main() {
    let mut tree = Tree::new();
    let body = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, 1024.0, 768.0)));
    let container = tree.insert(
        Some(body),
        LocalElement::new(Rect::new(0.0, 0.0, 1024.0, 768.0)).with_role(Role::CONTAINER),
    );
    let frame = tree.insert(
        Some(container),
        LocalElement::new(Rect::new(112.0, 64.0, 912.0, 664.0)).with_role(Role::FRAME),
    );
    let accordion = tree.insert(
        Some(frame),
        LocalElement::new(Rect::new(0.0, 100.0, 800.0, 300.0)),
    );
    let help = tree.insert(
        Some(accordion),
        LocalElement::new(Rect::new(760.0, 10.0, 790.0, 40.0)),
    );
    let _ = tree.commit();

    println!("help world bounds: {:?}", tree.world_bounds(help));
    println!("closest frame of help: {:?}", tree.closest_frame(help));
    assert_eq!(tree.closest_frame(help), Some(frame));

    let hit = tree.hit_test_point(Point::new(880.0, 180.0)).unwrap();
    println!("hit path: {:?}", hit.path);
    assert_eq!(hit.element, help);

    // Collapse the accordion; the commit reports it as hidden.
    tree.set_visible(accordion, false);
    let changes = tree.commit();
    println!("hidden: {:?}", changes.hidden);
    assert!(changes.hidden.iter().any(|&r| tree.contains(r, help)));
    assert!(!tree.is_effectively_visible(help));
}
