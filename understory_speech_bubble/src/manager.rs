// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bubble owner: single-live lifecycle, dismissal, and detachment timing.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect};
use understory_element_tree::{Changes, ElementFlags, ElementId, LocalElement, Tree};

use crate::bubble::{BubbleClasses, BubblePhase, BubbleRecord, BubbleView};
use crate::config::BubbleConfig;
use crate::placement;
use crate::route;

/// Cursor hint requested while a bubble is live.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CursorHint {
    /// Force a pointer cursor so touch platforms deliver presses everywhere.
    Pointer,
}

/// Why the live bubble was dismissed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DismissReason {
    /// A press reached a dismiss scope.
    OutsidePress,
    /// The window was resized.
    Resize,
    /// A new bubble was shown.
    Superseded,
    /// A region containing the anchor was hidden.
    RegionHidden,
    /// The anchor was removed from the tree.
    AnchorRemoved,
    /// [`SpeechBubbles::remove`] or [`BubbleHandle::remove`].
    Explicit,
}

/// Elements whose presses dismiss the live bubble.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DismissScopes {
    /// Root of the anchor's tree.
    pub document: Option<ElementId>,
    /// The anchor's closest modal dialog ancestor, which keeps presses from reaching `document`.
    pub dialog: Option<ElementId>,
}

impl DismissScopes {
    /// Returns true if no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.document.is_none() && self.dialog.is_none()
    }

    fn iter(&self) -> impl Iterator<Item = ElementId> {
        self.document.into_iter().chain(self.dialog)
    }
}

/// Handle returned by [`SpeechBubbles::show`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BubbleHandle {
    serial: u64,
    anchor: ElementId,
}

impl BubbleHandle {
    /// Anchor this handle's bubble was shown for.
    pub fn anchor(&self) -> ElementId {
        self.anchor
    }

    /// Returns true if `anchor` is the anchor of the live bubble.
    ///
    /// Compares against the live anchor whichever handle it is called on, so a
    /// stale handle still answers for the current bubble.
    pub fn is_current(&self, bubbles: &SpeechBubbles, anchor: ElementId) -> bool {
        bubbles.is_current(anchor)
    }

    /// Returns true while this handle's bubble is the live one.
    pub fn is_live(&self, bubbles: &SpeechBubbles) -> bool {
        bubbles.live.as_ref().is_some_and(|b| b.serial == self.serial)
    }

    /// Dismiss this handle's bubble.
    ///
    /// A no-op once the bubble is no longer live, so a stale handle never
    /// dismisses a newer bubble.
    pub fn remove(&self, bubbles: &mut SpeechBubbles, now: Duration) -> bool {
        if self.is_live(bubbles) {
            bubbles.dismiss(DismissReason::Explicit, now)
        } else {
            false
        }
    }
}

/// Owner of the speech bubble overlay.
///
/// At most one bubble is live. Dismissed bubbles lose their `show` class and
/// stay attached to the tree while they fade. Each one is scheduled for
/// detachment once, `fade_out` after its dismissal; dismissing again while
/// nothing is live schedules nothing. [`Self::advance`] detaches the bubbles
/// whose deadline has passed.
///
/// The host drives it:
///
/// - [`Self::show`] on request,
/// - [`Self::frame`] after presenting each frame,
/// - [`Self::advance`] when [`Self::next_deadline`] is reached,
/// - [`Self::on_press`] / [`Self::on_press_at`], [`Self::on_resize`],
///   [`Self::on_region_hidden`] / [`Self::observe`] as input arrives.
///
/// Dismissal clears the live bubble and anchor right away, whatever the cause.
#[derive(Debug, Default)]
pub struct SpeechBubbles {
    config: BubbleConfig,
    live: Option<BubbleRecord>,
    fading: Vec<BubbleRecord>,
    scopes: DismissScopes,
    cursor_hint: Option<CursorHint>,
    last_serial: u64,
    last_dismissal: Option<DismissReason>,
}

impl SpeechBubbles {
    /// Create a manager with the given configuration.
    pub fn new(config: BubbleConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Show `text` below `anchor`, replacing any live bubble.
    ///
    /// The bubble is attached to the anchor's closest frame, falling back to
    /// its closest container and then to the root of its tree. It is inserted
    /// in [`BubblePhase::Entering`] and becomes visible on the next
    /// [`Self::frame`]. `max_width` defaults to
    /// [`BubbleConfig::default_max_width`].
    ///
    /// A stale `anchor` still dismisses the previous bubble but shows nothing;
    /// the returned handle is never current.
    pub fn show(
        &mut self,
        tree: &mut Tree,
        anchor: ElementId,
        text: impl Into<String>,
        max_width: Option<f64>,
        now: Duration,
    ) -> BubbleHandle {
        self.dismiss(DismissReason::Superseded, now);
        self.last_serial += 1;
        let handle = BubbleHandle {
            serial: self.last_serial,
            anchor,
        };

        let Some(container) = tree
            .closest_frame(anchor)
            .or_else(|| tree.root_of(anchor))
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!(anchor = ?anchor, "speech bubble anchor is stale");
            return handle;
        };
        let (Some(anchor_bounds), Some(container_bounds)) =
            (tree.world_bounds(anchor), tree.world_bounds(container))
        else {
            return handle;
        };

        let max_width = max_width.unwrap_or(self.config.default_max_width);
        let placement = placement::place(anchor_bounds, container_bounds, max_width, &self.config);

        let content = Rect::new(0.0, 0.0, placement.width, 0.0);
        let element = tree.insert(
            Some(container),
            LocalElement::new(placement.bounds_in(container_bounds.width()))
                .with_flags(ElementFlags::VISIBLE),
        );
        let inner = tree.insert(
            Some(element),
            LocalElement::new(content).with_flags(ElementFlags::VISIBLE),
        );
        let text_element = tree.insert(
            Some(inner),
            LocalElement::new(content).with_flags(ElementFlags::VISIBLE),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            anchor = ?anchor,
            direction = ?placement.direction,
            width = placement.width,
            top = placement.top,
            "speech bubble shown"
        );

        self.live = Some(BubbleRecord {
            serial: handle.serial,
            anchor,
            element,
            inner,
            text_element,
            text: text.into(),
            classes: BubbleClasses::entering(placement.direction),
            placement,
            phase: BubblePhase::Entering,
            detach_at: None,
        });
        self.scopes = DismissScopes {
            document: tree.root_of(anchor),
            dialog: tree.enclosing_modal_dialog(anchor),
        };
        if self.config.touch_primary {
            self.cursor_hint = Some(CursorHint::Pointer);
        }
        handle
    }

    /// Second phase of the enter transition: add `show` to an entering bubble.
    ///
    /// Call after presenting a frame, so the renderer has already seen the
    /// bubble without `show`. Returns true if a bubble was revealed.
    pub fn frame(&mut self) -> bool {
        match self.live.as_mut() {
            Some(bubble) if bubble.phase == BubblePhase::Entering => {
                bubble.reveal();
                true
            }
            _ => false,
        }
    }

    /// Detach faded bubbles whose deadline has passed.
    ///
    /// Returns the number of bubbles detached.
    pub fn advance(&mut self, tree: &mut Tree, now: Duration) -> usize {
        let before = self.fading.len();
        self.fading.retain(|bubble| {
            if bubble.is_due(now) {
                tree.remove(bubble.element);
                false
            } else {
                true
            }
        });
        let detached = before - self.fading.len();
        if detached > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(detached, "speech bubbles detached");
        }
        detached
    }

    /// Earliest pending detachment deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.fading.iter().filter_map(|b| b.detach_at).min()
    }

    /// Dismiss the live bubble. Returns false if none was live.
    pub fn remove(&mut self, now: Duration) -> bool {
        self.dismiss(DismissReason::Explicit, now)
    }

    /// Returns true if `anchor` is the anchor of the live bubble.
    pub fn is_current(&self, anchor: ElementId) -> bool {
        self.current_anchor() == Some(anchor)
    }

    /// Anchor of the live bubble.
    pub fn current_anchor(&self) -> Option<ElementId> {
        self.live.as_ref().map(|b| b.anchor)
    }

    /// Handle a press on `target`.
    ///
    /// Dismisses the live bubble if the press reaches one of the
    /// [`DismissScopes`]. The press itself is never consumed.
    pub fn on_press(&mut self, tree: &Tree, target: ElementId, now: Duration) -> bool {
        if self.live.is_none() {
            return false;
        }
        let seq = route::route_press(tree, target);
        if self.scopes.iter().any(|scope| route::receives(&seq, scope)) {
            self.dismiss(DismissReason::OutsidePress, now)
        } else {
            false
        }
    }

    /// Handle a press at a root-space point.
    ///
    /// A press that hits no element counts as a press on the document.
    pub fn on_press_at(&mut self, tree: &Tree, pt: Point, now: Duration) -> bool {
        match tree.hit_test_point(pt) {
            Some(hit) => self.on_press(tree, hit.element, now),
            None if self.scopes.document.is_some() => {
                self.dismiss(DismissReason::OutsidePress, now)
            }
            None => false,
        }
    }

    /// Handle a window resize. The bubble is dismissed, never repositioned.
    pub fn on_resize(&mut self, now: Duration) -> bool {
        self.dismiss(DismissReason::Resize, now)
    }

    /// Handle `region` being hidden: dismiss if it contains the anchor.
    pub fn on_region_hidden(&mut self, tree: &Tree, region: ElementId, now: Duration) -> bool {
        match self.current_anchor() {
            Some(anchor) if tree.contains(region, anchor) => {
                self.dismiss(DismissReason::RegionHidden, now)
            }
            _ => false,
        }
    }

    /// Feed the result of [`Tree::commit`].
    ///
    /// Hidden regions go through [`Self::on_region_hidden`]; a removed anchor
    /// dismisses the bubble.
    pub fn observe(&mut self, tree: &Tree, changes: &Changes, now: Duration) -> bool {
        let Some(anchor) = self.current_anchor() else {
            return false;
        };
        if !tree.is_alive(anchor) {
            return self.dismiss(DismissReason::AnchorRemoved, now);
        }
        changes
            .hidden
            .iter()
            .any(|&region| self.on_region_hidden(tree, region, now))
    }

    /// Live and fading bubbles, oldest first.
    pub fn bubbles(&self) -> impl Iterator<Item = BubbleView<'_>> {
        self.fading
            .iter()
            .chain(self.live.as_ref())
            .map(BubbleRecord::view)
    }

    /// Registered dismiss scopes; empty when no bubble is live.
    pub fn dismiss_scopes(&self) -> DismissScopes {
        self.scopes
    }

    /// Cursor hint the host should apply.
    pub fn cursor_hint(&self) -> Option<CursorHint> {
        self.cursor_hint
    }

    /// Reason for the most recent dismissal.
    pub fn last_dismissal(&self) -> Option<DismissReason> {
        self.last_dismissal
    }

    fn dismiss(&mut self, reason: DismissReason, now: Duration) -> bool {
        self.scopes = DismissScopes::default();
        self.cursor_hint = None;
        let Some(mut bubble) = self.live.take() else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(reason = ?reason, anchor = ?bubble.anchor, "speech bubble dismissed");
        bubble.fade(now.saturating_add(self.config.fade_out));
        self.fading.push(bubble);
        self.last_dismissal = Some(reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::placement::{Direction, HorizontalAnchor};
    use understory_element_tree::Role;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn el(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalElement {
        LocalElement::new(Rect::new(x0, y0, x1, y1))
    }

    struct Fixture {
        tree: Tree,
        root: ElementId,
        frame: ElementId,
        tab: ElementId,
        // 300px from the frame's left edge; opens leftward.
        right_button: ElementId,
        // 50px from the frame's left edge; opens rightward.
        left_button: ElementId,
        sidebar: ElementId,
    }

    fn fixture() -> Fixture {
        let mut tree = Tree::new();
        let root = tree.insert(None, el(0.0, 0.0, 1000.0, 800.0));
        let frame = tree.insert(
            Some(root),
            el(100.0, 50.0, 600.0, 450.0).with_role(Role::FRAME),
        );
        let tab = tree.insert(Some(frame), el(0.0, 0.0, 500.0, 400.0));
        let right_button = tree.insert(Some(tab), el(300.0, 30.0, 340.0, 60.0));
        let left_button = tree.insert(Some(tab), el(50.0, 30.0, 90.0, 60.0));
        let sidebar = tree.insert(Some(root), el(700.0, 0.0, 1000.0, 800.0));
        let _ = tree.commit();
        Fixture {
            tree,
            root,
            frame,
            tab,
            right_button,
            left_button,
            sidebar,
        }
    }

    fn visible_count(bubbles: &SpeechBubbles) -> usize {
        bubbles
            .bubbles()
            .filter(|b| b.classes.contains(BubbleClasses::SHOW))
            .count()
    }

    #[test]
    fn show_places_below_anchor_inside_frame() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let handle = bubbles.show(&mut f.tree, f.right_button, "Correct!", None, ms(0));

        assert!(handle.is_current(&bubbles, f.right_button));
        assert!(!handle.is_current(&bubbles, f.left_button));
        assert_eq!(handle.anchor(), f.right_button);

        let view = bubbles.bubbles().next().unwrap();
        assert_eq!(view.text, "Correct!");
        assert_eq!(view.phase, BubblePhase::Entering);
        assert_eq!(view.placement.direction, Direction::Left);
        assert_eq!(view.placement.width, 300.0);
        assert_eq!(view.placement.anchor, HorizontalAnchor::Right(162.0));
        assert_eq!(view.placement.top, 60.0);
        assert_eq!(view.placement.font_size, 16.0);
        assert!(!view.classes.contains(BubbleClasses::SHOW));
        assert!(view.classes.contains(BubbleClasses::DIRECTION_LEFT));

        assert_eq!(f.tree.parent_of(view.element), Some(f.frame));
        assert_eq!(f.tree.parent_of(view.inner), Some(view.element));
        assert_eq!(f.tree.parent_of(view.text_element), Some(view.inner));
        assert_eq!(
            f.tree.world_bounds(view.element),
            Some(Rect::new(138.0, 110.0, 438.0, 110.0))
        );
        assert_eq!(
            bubbles.dismiss_scopes(),
            DismissScopes {
                document: Some(f.root),
                dialog: None,
            }
        );
    }

    #[test]
    fn enter_flips_on_next_frame_only() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.left_button, "Hint", Some(120.0), ms(0));
        assert_eq!(visible_count(&bubbles), 0, "not visible in the inserting pass");
        assert!(bubbles.frame());
        assert_eq!(visible_count(&bubbles), 1);
        assert!(!bubbles.frame(), "already visible");

        let view = bubbles.bubbles().next().unwrap();
        assert_eq!(view.phase, BubblePhase::Visible);
        assert_eq!(view.placement.direction, Direction::Right);
        assert_eq!(view.placement.width, 120.0, "explicit max width");
    }

    #[test]
    fn frame_after_dismissal_does_not_reveal() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.left_button, "Hint", None, ms(0));
        assert!(bubbles.remove(ms(1)));
        assert!(!bubbles.frame());
        assert_eq!(visible_count(&bubbles), 0);
        assert_eq!(
            bubbles.bubbles().next().map(|b| b.phase),
            Some(BubblePhase::Leaving)
        );
    }

    #[test]
    fn only_one_bubble_is_ever_visible() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let anchors = [f.right_button, f.left_button, f.right_button, f.tab];
        for (i, &anchor) in anchors.iter().enumerate() {
            let now = ms(100 * i as u64);
            let handle = bubbles.show(&mut f.tree, anchor, "Tip", None, now);
            assert!(visible_count(&bubbles) <= 1);
            assert!(bubbles.frame());
            assert_eq!(visible_count(&bubbles), 1);
            assert!(handle.is_live(&bubbles));
            let _ = bubbles.advance(&mut f.tree, now);
        }

        // Fade-out of the last superseded bubble completes.
        let _ = bubbles.advance(&mut f.tree, ms(300) + BubbleConfig::FADE_OUT);
        assert_eq!(bubbles.bubbles().count(), 1);
        let attached = f.tree.children(f.frame).len();
        assert_eq!(attached, 2, "the tab and exactly one bubble");
        assert!(bubbles.is_current(f.tab));
    }

    #[test]
    fn superseded_bubble_is_detached_after_fade() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let first = bubbles.show(&mut f.tree, f.right_button, "One", None, ms(0));
        let old = bubbles.bubbles().next().unwrap().element;
        let _ = bubbles.frame();
        let _second = bubbles.show(&mut f.tree, f.left_button, "Two", None, ms(50));

        assert!(!first.is_live(&bubbles));
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::Superseded));
        assert_eq!(bubbles.bubbles().count(), 2, "old and new coexist while fading");
        assert!(f.tree.is_alive(old));

        assert_eq!(bubbles.advance(&mut f.tree, ms(549)), 0);
        assert_eq!(bubbles.advance(&mut f.tree, ms(550)), 1);
        assert!(!f.tree.is_alive(old));
        assert!(bubbles.is_current(f.left_button));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let handle = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        let _ = bubbles.frame();

        assert!(handle.remove(&mut bubbles, ms(10)));
        assert!(!handle.remove(&mut bubbles, ms(20)));
        assert!(!bubbles.remove(ms(30)));
        assert_eq!(bubbles.next_deadline(), Some(ms(510)), "single scheduled detachment");
        assert!(!handle.is_current(&bubbles, f.right_button));

        assert_eq!(bubbles.advance(&mut f.tree, ms(510)), 1);
        assert_eq!(bubbles.advance(&mut f.tree, ms(2000)), 0);
        assert_eq!(bubbles.next_deadline(), None);
        assert_eq!(bubbles.bubbles().count(), 0);
    }

    #[test]
    fn each_fading_bubble_keeps_its_own_deadline() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "One", None, ms(0));
        assert!(bubbles.remove(ms(0)));
        assert_eq!(bubbles.next_deadline(), Some(ms(500)));

        let _ = bubbles.show(&mut f.tree, f.left_button, "Two", None, ms(100));
        assert!(bubbles.remove(ms(200)));
        assert_eq!(bubbles.next_deadline(), Some(ms(500)), "earliest deadline first");

        assert_eq!(bubbles.advance(&mut f.tree, ms(499)), 0);
        assert_eq!(bubbles.advance(&mut f.tree, ms(600)), 1);
        assert_eq!(bubbles.next_deadline(), Some(ms(700)));
        assert_eq!(bubbles.advance(&mut f.tree, ms(700)), 1);
        assert_eq!(bubbles.next_deadline(), None);
    }

    #[test]
    fn rapid_replacement_still_detaches_old_bubbles() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let mut now = ms(0);
        for _ in 0..20 {
            let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, now);
            let _ = bubbles.frame();
            let _ = bubbles.advance(&mut f.tree, now);
            // Live bubble plus the two predecessors still inside their fade.
            assert!(bubbles.bubbles().count() <= 3);
            assert!(f.tree.children(f.frame).len() <= 4);
            now += ms(400);
        }

        let _ = bubbles.advance(&mut f.tree, now + BubbleConfig::FADE_OUT);
        assert_eq!(bubbles.bubbles().count(), 1);
        assert_eq!(f.tree.children(f.frame).len(), 2, "the tab and the live bubble");
        assert_eq!(bubbles.next_deadline(), None);
    }

    #[test]
    fn stale_handle_does_not_remove_newer_bubble() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let first = bubbles.show(&mut f.tree, f.right_button, "One", None, ms(0));
        let second = bubbles.show(&mut f.tree, f.left_button, "Two", None, ms(10));
        assert!(!first.remove(&mut bubbles, ms(20)));
        assert!(second.is_live(&bubbles));
        assert!(first.is_current(&bubbles, f.left_button));
    }

    #[test]
    fn resize_dismisses_without_repositioning() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        let _ = bubbles.frame();
        let before = bubbles.bubbles().next().unwrap().placement;

        f.tree.set_local_bounds(f.frame, Rect::new(0.0, 0.0, 300.0, 300.0));
        assert!(bubbles.on_resize(ms(40)));

        let view = bubbles.bubbles().next().unwrap();
        assert_eq!(view.placement, before);
        assert!(!view.classes.contains(BubbleClasses::SHOW));
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::Resize));
        assert!(!bubbles.on_resize(ms(50)), "nothing live to dismiss");
    }

    #[test]
    fn outside_press_dismisses_and_clears_anchor() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        let _ = bubbles.frame();

        assert!(bubbles.on_press_at(&f.tree, Point::new(900.0, 700.0), ms(10)));
        assert_eq!(bubbles.current_anchor(), None);
        assert!(bubbles.dismiss_scopes().is_empty());
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::OutsidePress));
        assert!(!bubbles.on_press(&f.tree, f.left_button, ms(20)));
    }

    #[test]
    fn press_on_anchor_also_dismisses() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        assert!(bubbles.on_press(&f.tree, f.right_button, ms(10)));
    }

    #[test]
    fn press_on_empty_space_counts_as_document() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        assert!(bubbles.on_press_at(&f.tree, Point::new(5000.0, 5000.0), ms(10)));
    }

    #[test]
    fn modal_dialog_scope() {
        let mut tree = Tree::new();
        let modal = ElementFlags::default() | ElementFlags::MODAL;
        let root = tree.insert(None, el(0.0, 0.0, 1000.0, 800.0));
        let frame = tree.insert(
            Some(root),
            el(0.0, 0.0, 600.0, 800.0).with_role(Role::FRAME),
        );
        let dialog = tree.insert(
            Some(frame),
            el(50.0, 50.0, 550.0, 450.0)
                .with_role(Role::DIALOG)
                .with_flags(modal),
        );
        let anchor = tree.insert(Some(dialog), el(300.0, 30.0, 340.0, 60.0));
        let dialog_button = tree.insert(Some(dialog), el(10.0, 10.0, 50.0, 40.0));
        let other_dialog = tree.insert(
            Some(root),
            el(650.0, 50.0, 950.0, 450.0)
                .with_role(Role::DIALOG)
                .with_flags(modal),
        );
        let other_button = tree.insert(Some(other_dialog), el(10.0, 10.0, 50.0, 40.0));

        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut tree, anchor, "Inside a dialog", None, ms(0));
        assert_eq!(bubbles.dismiss_scopes().dialog, Some(dialog));

        assert!(
            !bubbles.on_press(&tree, other_button, ms(10)),
            "another modal swallows the press"
        );
        assert!(bubbles.is_current(anchor));

        assert!(
            bubbles.on_press(&tree, dialog_button, ms(20)),
            "the dialog scope sees presses the document cannot"
        );

        let _ = bubbles.show(&mut tree, anchor, "Again", None, ms(30));
        assert!(bubbles.on_press(&tree, root, ms(40)));
    }

    #[test]
    fn plain_dialog_inside_modal_scopes_to_the_modal() {
        let mut tree = Tree::new();
        let modal = ElementFlags::default() | ElementFlags::MODAL;
        let root = tree.insert(None, el(0.0, 0.0, 1000.0, 800.0));
        let frame = tree.insert(
            Some(root),
            el(0.0, 0.0, 800.0, 800.0).with_role(Role::FRAME),
        );
        let outer = tree.insert(
            Some(frame),
            el(50.0, 50.0, 750.0, 650.0)
                .with_role(Role::DIALOG)
                .with_flags(modal),
        );
        let inner = tree.insert(
            Some(outer),
            el(100.0, 100.0, 500.0, 400.0).with_role(Role::DIALOG),
        );
        let anchor = tree.insert(Some(inner), el(200.0, 30.0, 240.0, 60.0));
        let outer_button = tree.insert(Some(outer), el(10.0, 10.0, 50.0, 40.0));

        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut tree, anchor, "Nested", None, ms(0));
        assert_eq!(bubbles.dismiss_scopes().dialog, Some(outer));
        assert!(
            bubbles.on_press(&tree, outer_button, ms(10)),
            "a press in the modal outside the plain dialog dismisses"
        );
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::OutsidePress));
    }

    #[test]
    fn hidden_region_containing_anchor_dismisses() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        let _ = bubbles.frame();

        assert!(!bubbles.on_region_hidden(&f.tree, f.sidebar, ms(10)));
        assert!(bubbles.is_current(f.right_button));

        assert!(bubbles.on_region_hidden(&f.tree, f.tab, ms(20)));
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::RegionHidden));
    }

    #[test]
    fn observe_commit_changes() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));

        f.tree.set_visible(f.sidebar, false);
        let changes = f.tree.commit();
        assert!(!bubbles.observe(&f.tree, &changes, ms(10)));

        f.tree.set_visible(f.tab, false);
        let changes = f.tree.commit();
        assert!(bubbles.observe(&f.tree, &changes, ms(20)));
        assert_eq!(bubbles.current_anchor(), None);
    }

    #[test]
    fn removed_anchor_dismisses() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.left_button, "Tip", None, ms(0));
        f.tree.remove(f.left_button);
        let changes = f.tree.commit();
        assert!(bubbles.observe(&f.tree, &changes, ms(10)));
        assert_eq!(bubbles.last_dismissal(), Some(DismissReason::AnchorRemoved));
    }

    #[test]
    fn touch_platform_sets_cursor_hint() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::new(BubbleConfig::for_platform(Platform::Touch));
        assert_eq!(bubbles.cursor_hint(), None);
        let _ = bubbles.show(&mut f.tree, f.left_button, "Tip", None, ms(0));
        assert_eq!(bubbles.cursor_hint(), Some(CursorHint::Pointer));
        let _ = bubbles.remove(ms(10));
        assert_eq!(bubbles.cursor_hint(), None);

        let mut desktop = SpeechBubbles::default();
        let _ = desktop.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        assert_eq!(desktop.cursor_hint(), None);
    }

    #[test]
    fn attaches_to_container_then_root_without_frame() {
        let mut tree = Tree::new();
        let root = tree.insert(None, el(0.0, 0.0, 1000.0, 800.0));
        let container = tree.insert(
            Some(root),
            el(0.0, 0.0, 500.0, 500.0).with_role(Role::CONTAINER),
        );
        let in_container = tree.insert(Some(container), el(10.0, 10.0, 50.0, 40.0));
        let loose = tree.insert(Some(root), el(600.0, 10.0, 640.0, 40.0));

        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut tree, in_container, "Tip", None, ms(0));
        let element = bubbles.bubbles().last().unwrap().element;
        assert_eq!(tree.parent_of(element), Some(container));

        let _ = bubbles.show(&mut tree, loose, "Tip", None, ms(10));
        let element = bubbles.bubbles().last().unwrap().element;
        assert_eq!(tree.parent_of(element), Some(root));
    }

    #[test]
    fn stale_anchor_shows_nothing() {
        let mut f = fixture();
        let mut bubbles = SpeechBubbles::default();
        let _ = bubbles.show(&mut f.tree, f.right_button, "Tip", None, ms(0));
        f.tree.remove(f.left_button);
        let handle = bubbles.show(&mut f.tree, f.left_button, "Gone", None, ms(10));
        assert!(!handle.is_live(&bubbles));
        assert!(!handle.is_current(&bubbles, f.left_button));
        assert_eq!(bubbles.current_anchor(), None);
        assert!(bubbles.dismiss_scopes().is_empty());
        assert_eq!(bubbles.bubbles().count(), 1, "only the fading predecessor");
    }
}
