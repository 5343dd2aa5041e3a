// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Speech bubble basics.
//!
//! Show a bubble, run the two-phase enter, supersede it, dismiss it with an
//! outside press, and let the fade-out deadlines detach everything.
//!
//! Run:
//! - `cargo run -p understory_demos --example speech_bubble_basics`

use core::time::Duration;

use kurbo::{Point, Rect};
use understory_element_tree::{LocalElement, Role, Tree};
use understory_speech_bubble::{BubbleConfig, Platform, SpeechBubbles};

fn print_bubbles(label: &str, bubbles: &SpeechBubbles) {
    println!("== {label} ==");
    for view in bubbles.bubbles() {
        let classes: Vec<_> = view.classes.class_names().collect();
        println!(
            "  {:?} {:?} text={:?} classes={:?} placement={:?}",
            view.element, view.phase, view.text, classes, view.placement
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut tree = Tree::new();
    let body = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, 1000.0, 800.0)));
    let frame = tree.insert(
        Some(body),
        LocalElement::new(Rect::new(100.0, 50.0, 600.0, 450.0)).with_role(Role::FRAME),
    );
    let check = tree.insert(
        Some(frame),
        LocalElement::new(Rect::new(300.0, 30.0, 340.0, 60.0)),
    );
    let hint = tree.insert(
        Some(frame),
        LocalElement::new(Rect::new(50.0, 30.0, 90.0, 60.0)),
    );

    let platform = Platform::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)");
    let mut bubbles = SpeechBubbles::new(BubbleConfig::for_platform(platform));
    let mut now = Duration::ZERO;

    let first = bubbles.show(&mut tree, check, "Correct answer!", None, now);
    print_bubbles("inserted", &bubbles);
    bubbles.frame();
    print_bubbles("after frame", &bubbles);

    now += Duration::from_millis(250);
    let second = bubbles.show(&mut tree, hint, "Think about the units.", Some(240.0), now);
    bubbles.frame();
    print_bubbles("superseded", &bubbles);
    assert!(!first.is_live(&bubbles));
    assert!(second.is_current(&bubbles, hint));

    now += Duration::from_millis(100);
    let dismissed = bubbles.on_press_at(&tree, Point::new(900.0, 700.0), now);
    println!("outside press dismissed: {dismissed}");
    print_bubbles("fading", &bubbles);

    while let Some(deadline) = bubbles.next_deadline() {
        let detached = bubbles.advance(&mut tree, deadline);
        println!("detached {detached} bubble(s) at {deadline:?}");
    }
    assert_eq!(bubbles.bubbles().count(), 0);
}
