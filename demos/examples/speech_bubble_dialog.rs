// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Speech bubbles inside a modal dialog, and hidden-region dismissal.
//!
//! A modal dialog stops presses from bubbling to the document, so the bubble
//! also listens on the dialog itself. Hiding the dialog dismisses the bubble
//! through the tree's commit.
//!
//! Run:
//! - `cargo run -p understory_demos --example speech_bubble_dialog`

use core::time::Duration;

use kurbo::Rect;
use understory_element_tree::{ElementFlags, LocalElement, Role, Tree};
use understory_speech_bubble::{DismissReason, SpeechBubbles};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut tree = Tree::new();
    let body = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, 1000.0, 800.0)));
    let frame = tree.insert(
        Some(body),
        LocalElement::new(Rect::new(0.0, 0.0, 800.0, 600.0)).with_role(Role::FRAME),
    );
    let dialog = tree.insert(
        Some(frame),
        LocalElement::new(Rect::new(100.0, 100.0, 700.0, 500.0))
            .with_role(Role::DIALOG)
            .with_flags(ElementFlags::default() | ElementFlags::MODAL),
    );
    let field = tree.insert(
        Some(dialog),
        LocalElement::new(Rect::new(400.0, 50.0, 560.0, 80.0)),
    );
    let close = tree.insert(
        Some(dialog),
        LocalElement::new(Rect::new(560.0, 10.0, 590.0, 40.0)),
    );
    let _ = tree.commit();

    let mut bubbles = SpeechBubbles::default();
    let mut now = Duration::ZERO;

    let _ = bubbles.show(&mut tree, field, "Enter a number", None, now);
    bubbles.frame();
    println!("scopes: {:?}", bubbles.dismiss_scopes());

    now += Duration::from_millis(300);
    let dismissed = bubbles.on_press(&tree, close, now);
    println!("press inside dialog dismissed: {dismissed}");
    assert_eq!(bubbles.last_dismissal(), Some(DismissReason::OutsidePress));

    now += Duration::from_millis(300);
    let _ = bubbles.show(&mut tree, field, "Still waiting for a number", None, now);
    bubbles.frame();

    tree.set_visible(dialog, false);
    let changes = tree.commit();
    let dismissed = bubbles.observe(&tree, &changes, now);
    println!("hiding the dialog dismissed: {dismissed}");
    assert_eq!(bubbles.last_dismissal(), Some(DismissReason::RegionHidden));

    let detached = bubbles.advance(&mut tree, now + bubbles.config().fade_out);
    println!("detached {detached} bubble(s)");
}
