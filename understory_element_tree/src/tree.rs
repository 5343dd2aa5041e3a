// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries, and change reporting.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::types::{ElementFlags, ElementId, LocalElement, Role};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level element tree.
pub struct Tree {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
    visibility_dirty: Vec<ElementId>,
    removed: Vec<ElementId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

/// Changes accumulated since the previous [`Tree::commit`].
///
/// Visibility entries report the element whose own [`ElementFlags::VISIBLE`]
/// bit changed; descendants are implied. Flipping an element back and forth
/// between commits reports nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Elements that became hidden.
    pub hidden: Vec<ElementId>,
    /// Elements that became visible.
    pub shown: Vec<ElementId>,
    /// Elements removed from the tree, including removed descendants.
    pub removed: Vec<ElementId>,
}

impl Changes {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty() && self.removed.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    local: LocalElement,
    committed_visible: bool,
    queued: bool,
}

impl Element {
    fn new(generation: u32, local: LocalElement) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            committed_visible: local.flags.contains(ElementFlags::VISIBLE),
            local,
            queued: false,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            visibility_dirty: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element (and its subtree) from the tree.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
        self.removed.push(id);
    }

    /// Reparent `id` under `new_parent`.
    ///
    /// Reparenting under one of its own descendants is ignored.
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.contains(id, p))
        {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update parent-relative bounds.
    pub fn set_local_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.bounds = bounds;
        }
    }

    /// Update roles.
    pub fn set_role(&mut self, id: ElementId, role: Role) {
        if let Some(n) = self.element_opt_mut(id) {
            n.local.role = role;
        }
    }

    /// Update element flags.
    ///
    /// Visibility transitions are reported by the next [`Tree::commit`].
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        let Some(n) = self.element_opt_mut(id) else {
            return;
        };
        n.local.flags = flags;
        if !n.queued {
            n.queued = true;
            self.visibility_dirty.push(id);
        }
    }

    /// Show or hide an element, keeping its other flags.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        let Some(mut flags) = self.local(id).map(|l| l.flags) else {
            return;
        };
        flags.set(ElementFlags::VISIBLE, visible);
        self.set_flags(id, flags);
    }

    /// Drain the changes accumulated since the previous commit.
    pub fn commit(&mut self) -> Changes {
        self.epoch += 1;
        let mut changes = Changes {
            removed: core::mem::take(&mut self.removed),
            ..Default::default()
        };
        for id in core::mem::take(&mut self.visibility_dirty) {
            let Some(n) = self.element_opt_mut(id) else {
                continue;
            };
            n.queued = false;
            let visible = n.local.flags.contains(ElementFlags::VISIBLE);
            if visible != n.committed_visible {
                n.committed_visible = visible;
                if visible {
                    changes.shown.push(id);
                } else {
                    changes.hidden.push(id);
                }
            }
        }
        changes
    }

    /// Number of commits performed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// An `ElementId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`ElementId`] docs for the generational semantics.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.generation())
    }

    /// Local data of a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.element_opt(id).map(|n| &n.local)
    }

    /// Parent of a live element.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live element, in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: ElementId) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut cur = id;
        while let Some(p) = self.element(cur).parent {
            cur = p;
        }
        Some(cur)
    }

    /// Bounds of `id` in root space.
    ///
    /// Each element's bounds are offset by the origins of all of its ancestors.
    pub fn world_bounds(&self, id: ElementId) -> Option<Rect> {
        let n = self.element_opt(id)?;
        let mut offset = Vec2::ZERO;
        let mut cur = n.parent;
        while let Some(p) = cur {
            let pn = self.element(p);
            offset += pn.local.bounds.origin().to_vec2();
            cur = pn.parent;
        }
        Some(n.local.bounds + offset)
    }

    /// First element with `role`, starting at `id` itself and walking up.
    pub fn closest(&self, id: ElementId, role: Role) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut cur = Some(id);
        while let Some(c) = cur {
            let n = self.element(c);
            if n.local.role.contains(role) {
                return Some(c);
            }
            cur = n.parent;
        }
        None
    }

    /// Closest [`Role::FRAME`], falling back to the closest [`Role::CONTAINER`].
    pub fn closest_frame(&self, id: ElementId) -> Option<ElementId> {
        self.closest(id, Role::FRAME)
            .or_else(|| self.closest(id, Role::CONTAINER))
    }

    /// Closest strict ancestor of `id` carrying [`Role::DIALOG`] and
    /// [`ElementFlags::MODAL`]. Non-modal dialogs are skipped.
    pub fn enclosing_modal_dialog(&self, id: ElementId) -> Option<ElementId> {
        let mut cur = self.parent_of(id);
        while let Some(c) = cur {
            let n = self.element(c);
            if n.local.role.contains(Role::DIALOG)
                && n.local.flags.contains(ElementFlags::MODAL)
            {
                return Some(c);
            }
            cur = n.parent;
        }
        None
    }

    /// Returns true if `descendant` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(descendant) {
            return false;
        }
        let mut cur = Some(descendant);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.element(c).parent;
        }
        false
    }

    /// Returns true if `id` and every one of its ancestors is visible.
    pub fn is_effectively_visible(&self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(c) = cur {
            let n = self.element(c);
            if !n.local.flags.contains(ElementFlags::VISIBLE) {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// Path from the root down to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = Some(id);
        while let Some(c) = cur {
            out.push(c);
            cur = self.element(c).parent;
        }
        out.reverse();
        out
    }

    /// Hit test a root-space point. Returns the deepest matching element.
    ///
    /// Only effectively visible, pickable elements are considered. Among
    /// elements at the same depth the newer [`ElementId`] wins.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best: Option<(ElementId, usize)> = None;
        for (i, slot) in self.elements.iter().enumerate() {
            let Some(n) = slot.as_ref() else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            let id = ElementId::new(i as u32, n.generation);
            if !n.local.flags.contains(ElementFlags::PICKABLE) || !self.is_effectively_visible(id)
            {
                continue;
            }
            let Some(bounds) = self.world_bounds(id) else {
                continue;
            };
            if !bounds.contains(pt) {
                continue;
            }
            let depth = self.depth(id);
            match best {
                None => best = Some((id, depth)),
                Some((best_id, best_depth)) => {
                    if depth > best_depth || (depth == best_depth && id.is_newer_than(best_id)) {
                        best = Some((id, depth));
                    }
                }
            }
        }
        best.map(|(element, _)| Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    // --- internals ---

    fn depth(&self, id: ElementId) -> usize {
        let mut depth = 0;
        let mut cur = self.element(id).parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.element(p).parent;
        }
        depth
    }

    /// Access a live element; panics if `id` is stale.
    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let n = self.elements.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let n = self.elements.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.push(id);
        self.element_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.retain(|c| *c != id);
        self.element_mut(id).parent = None;
    }
}
