// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element_tree --heading-base-level=0

//! Understory Element Tree: a Kurbo-native retained element tree.
//!
//! This crate models the part of a UI document that overlays care about:
//!
//! - A hierarchy of elements with parent-relative bounds.
//! - Structural [`Role`]s (frame, container, dialog) for ancestor searches.
//! - [`ElementFlags`] for visibility, picking, and modal event scopes.
//! - Root-space geometry via [`Tree::world_bounds`].
//! - Hit testing via [`Tree::hit_test_point`].
//! - Batched change reporting via [`Tree::commit`], so observers learn which
//!   regions were hidden, shown, or removed.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! Upstream code computes positions and sizes and writes them into the tree.
//!
//! ## API overview
//!
//! - [`Tree`]: owns the elements.
//! - [`LocalElement`]: per-element bounds, roles, and flags.
//! - [`ElementId`]: generational handle of an element.
//! - [`Changes`]: result of [`Tree::commit`].
//!
//! ### Minimal usage
//!
//! ```
//! use understory_element_tree::{LocalElement, Role, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalElement::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
//! let frame = tree.insert(
//!     Some(root),
//!     LocalElement::new(Rect::new(100.0, 100.0, 600.0, 500.0)).with_role(Role::FRAME),
//! );
//! let button = tree.insert(
//!     Some(frame),
//!     LocalElement::new(Rect::new(300.0, 20.0, 340.0, 60.0)),
//! );
//!
//! assert_eq!(tree.closest_frame(button), Some(frame));
//! assert_eq!(tree.world_bounds(button), Some(Rect::new(400.0, 120.0, 440.0, 160.0)));
//!
//! let hit = tree.hit_test_point(Point::new(410.0, 130.0)).unwrap();
//! assert_eq!(hit.element, button);
//!
//! tree.set_visible(frame, false);
//! let changes = tree.commit();
//! assert_eq!(changes.hidden, vec![frame]);
//! assert!(tree.contains(frame, button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Changes, Hit, Tree};
pub use types::{ElementFlags, ElementId, LocalElement, Role};
