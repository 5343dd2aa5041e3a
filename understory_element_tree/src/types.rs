// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, roles, flags, and local geometry.

use kurbo::Rect;

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// ### Newer
///
/// An `ElementId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This order is only used to break ties in [hit testing](crate::Tree::hit_test_point).
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether an `ElementId` still refers to a live element.
/// Stale `ElementId`s never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    #[inline]
    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Structural roles used by ancestor searches.
    ///
    /// An element may carry several roles; [`Tree::closest`](crate::Tree::closest)
    /// matches any element whose roles contain the requested ones.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Role: u8 {
        /// An embedding frame; preferred attachment point for overlays.
        const FRAME     = 0b0000_0001;
        /// A content container; fallback attachment point when no frame encloses an element.
        const CONTAINER = 0b0000_0010;
        /// A dialog region.
        const DIALOG    = 0b0000_0100;
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking, and event propagation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible. Hiding an element hides its whole subtree.
        const VISIBLE  = 0b0000_0001;
        /// Element is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
        /// Element is modal: presses inside it do not bubble past it.
        const MODAL    = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local data for an element.
#[derive(Clone, Debug, Default)]
pub struct LocalElement {
    /// Bounds in the parent's coordinate space, relative to the parent's origin.
    pub bounds: Rect,
    /// Structural roles.
    pub role: Role,
    /// Visibility, picking, and modality flags.
    ///
    /// See [`ElementFlags`] for available bits.
    pub flags: ElementFlags,
}

impl LocalElement {
    /// Create a plain element with the given parent-relative bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    /// Set the roles of this element.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the flags of this element.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }
}
