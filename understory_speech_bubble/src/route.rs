// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press routing over an element tree.
//!
//! ## Overview
//!
//! [`route_press`] emits a capture → target → bubble sequence for a pressed element:
//!
//! - Capture: root → target.
//! - Target: the pressed element.
//! - Bubble: target → root, stopping after the first element flagged
//!   [`ElementFlags::MODAL`]. Ancestors of a modal element never see the
//!   bubble phase of presses made inside it.
//!
//! Dismiss scopes listen to the target and bubble phases only; see
//! [`receives`].

use alloc::vec::Vec;

use understory_element_tree::{ElementFlags, ElementId, Tree};

/// Phases of press propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target element.
    Target,
    /// Target-to-root traversal.
    Bubble,
}

/// A single dispatch item.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Element associated with this step.
    pub element: ElementId,
}

/// Build the propagation sequence for a press on `target`.
///
/// Returns an empty sequence for stale targets.
pub fn route_press(tree: &Tree, target: ElementId) -> Vec<Dispatch> {
    let path = tree.path_to_root(target);
    let mut out = Vec::with_capacity(path.len() * 2 + 1);
    if path.is_empty() {
        return out;
    }
    for &element in &path {
        out.push(Dispatch {
            phase: Phase::Capture,
            element,
        });
    }
    out.push(Dispatch {
        phase: Phase::Target,
        element: target,
    });
    for &element in path.iter().rev() {
        out.push(Dispatch {
            phase: Phase::Bubble,
            element,
        });
        let modal = tree
            .local(element)
            .is_some_and(|l| l.flags.contains(ElementFlags::MODAL));
        if modal {
            break;
        }
    }
    out
}

/// Returns true if a listener on `scope` would receive the press.
///
/// Listeners run in the target and bubble phases.
pub fn receives(seq: &[Dispatch], scope: ElementId) -> bool {
    seq.iter()
        .any(|d| d.element == scope && matches!(d.phase, Phase::Target | Phase::Bubble))
}
