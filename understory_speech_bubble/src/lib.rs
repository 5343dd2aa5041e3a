// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_speech_bubble --heading-base-level=0

//! Understory Speech Bubble: transient tooltips anchored to elements of an
//! [`understory_element_tree::Tree`].
//!
//! ## Overview
//!
//! A speech bubble is a short text shown directly below an anchor element,
//! inside the anchor's closest frame (or container). [`SpeechBubbles`] owns the
//! overlay and enforces that at most one bubble is live at a time.
//!
//! - [`placement`] picks the side with more free space and clamps the width.
//! - [`route`] walks presses through the tree; modal dialogs stop propagation.
//! - [`BubbleConfig`] holds the constants (max width, fade delay, tail offset,
//!   font size) and the touch cursor switch.
//!
//! ## Lifecycle
//!
//! 1) [`SpeechBubbles::show`] fades out any live bubble, inserts the new one in
//!    the [`Entering`](BubblePhase::Entering) phase and returns a [`BubbleHandle`].
//! 2) [`SpeechBubbles::frame`], called after the host presents a frame, adds the
//!    `show` class so the stylesheet transition runs.
//! 3) Presses ([`SpeechBubbles::on_press`]), resizes ([`SpeechBubbles::on_resize`]),
//!    hidden regions ([`SpeechBubbles::observe`]) and explicit removal dismiss the
//!    bubble: it loses `show` and is scheduled for detachment after the fade.
//! 4) [`SpeechBubbles::advance`] detaches faded bubbles whose deadline has passed.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_element_tree::{LocalElement, Role, Tree};
//! use understory_speech_bubble::{BubbleClasses, SpeechBubbles};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, 1000.0, 800.0)));
//! let frame = tree.insert(
//!     Some(root),
//!     LocalElement::new(Rect::new(100.0, 50.0, 600.0, 450.0)).with_role(Role::FRAME),
//! );
//! let button = tree.insert(Some(frame), LocalElement::new(Rect::new(300.0, 30.0, 340.0, 60.0)));
//!
//! let mut bubbles = SpeechBubbles::default();
//! let handle = bubbles.show(&mut tree, button, "Try again", None, Duration::ZERO);
//! assert!(handle.is_current(&bubbles, button));
//!
//! // The renderer draws the entering bubble, then the host reports the frame.
//! bubbles.frame();
//! let view = bubbles.bubbles().next().unwrap();
//! assert!(view.classes.contains(BubbleClasses::SHOW));
//!
//! // A press elsewhere dismisses it; it is detached once the fade is over.
//! let now = Duration::from_millis(200);
//! assert!(bubbles.on_press_at(&tree, Point::new(900.0, 700.0), now));
//! assert_eq!(bubbles.next_deadline(), Some(now + Duration::from_millis(500)));
//! assert_eq!(bubbles.advance(&mut tree, Duration::from_millis(700)), 1);
//! assert_eq!(bubbles.bubbles().count(), 0);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit lifecycle events with `tracing::debug!`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bubble;
mod config;
mod manager;
pub mod placement;
pub mod route;

pub use bubble::{BubbleClasses, BubblePhase, BubbleView, INNER_CLASS, TEXT_CLASS};
pub use config::{BubbleConfig, Platform};
pub use manager::{BubbleHandle, CursorHint, DismissReason, DismissScopes, SpeechBubbles};
