// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble records and the styling contract exposed to renderers.

use alloc::string::String;
use core::time::Duration;

use understory_element_tree::ElementId;

use crate::placement::{Direction, Placement};

/// Class of a bubble's inner wrapper element.
pub const INNER_CLASS: &str = "joubel-speech-bubble-inner";
/// Class of a bubble's text element.
pub const TEXT_CLASS: &str = "joubel-speech-bubble-text";

bitflags::bitflags! {
    /// Style classes on a bubble's outer element.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BubbleClasses: u8 {
        /// Base class, always present.
        const SPEECH_BUBBLE   = 0b0000_0001;
        /// Visible state; its transition drives the fade in and out.
        const SHOW            = 0b0000_0010;
        /// Tail for a bubble growing leftward.
        const DIRECTION_LEFT  = 0b0000_0100;
        /// Tail for a bubble growing rightward.
        const DIRECTION_RIGHT = 0b0000_1000;
    }
}

impl BubbleClasses {
    /// Base classes for a freshly inserted bubble.
    pub fn entering(direction: Direction) -> Self {
        Self::SPEECH_BUBBLE
            | match direction {
                Direction::Left => Self::DIRECTION_LEFT,
                Direction::Right => Self::DIRECTION_RIGHT,
            }
    }

    /// Stylesheet class names, in a stable order.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::SPEECH_BUBBLE, "joubel-speech-bubble"),
            (Self::SHOW, "show"),
            (Self::DIRECTION_LEFT, Direction::Left.class_name()),
            (Self::DIRECTION_RIGHT, Direction::Right.class_name()),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

/// Lifecycle phase of a bubble.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BubblePhase {
    /// Inserted, waiting for the next frame before turning visible.
    Entering,
    /// Carrying the `show` class.
    Visible,
    /// Fading out, waiting for detachment.
    Leaving,
}

/// Renderer-facing view of a bubble.
#[derive(Copy, Clone, Debug)]
pub struct BubbleView<'a> {
    /// Outer element, attached to the container.
    pub element: ElementId,
    /// Inner wrapper element (see [`INNER_CLASS`]).
    pub inner: ElementId,
    /// Text element (see [`TEXT_CLASS`]).
    pub text_element: ElementId,
    /// Element the bubble points at.
    pub anchor: ElementId,
    /// Text, displayed verbatim.
    pub text: &'a str,
    /// Classes on the outer element.
    pub classes: BubbleClasses,
    /// Geometry relative to the container.
    pub placement: Placement,
    /// Lifecycle phase.
    pub phase: BubblePhase,
}

#[derive(Clone, Debug)]
pub(crate) struct BubbleRecord {
    pub(crate) serial: u64,
    pub(crate) anchor: ElementId,
    pub(crate) element: ElementId,
    pub(crate) inner: ElementId,
    pub(crate) text_element: ElementId,
    pub(crate) text: String,
    pub(crate) classes: BubbleClasses,
    pub(crate) placement: Placement,
    pub(crate) phase: BubblePhase,
    /// Set once the bubble starts fading.
    pub(crate) detach_at: Option<Duration>,
}

impl BubbleRecord {
    pub(crate) fn view(&self) -> BubbleView<'_> {
        BubbleView {
            element: self.element,
            inner: self.inner,
            text_element: self.text_element,
            anchor: self.anchor,
            text: &self.text,
            classes: self.classes,
            placement: self.placement,
            phase: self.phase,
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.classes.insert(BubbleClasses::SHOW);
        self.phase = BubblePhase::Visible;
    }

    pub(crate) fn fade(&mut self, detach_at: Duration) {
        self.classes.remove(BubbleClasses::SHOW);
        self.phase = BubblePhase::Leaving;
        self.detach_at = Some(detach_at);
    }

    pub(crate) fn is_due(&self, now: Duration) -> bool {
        self.detach_at.is_some_and(|deadline| now >= deadline)
    }
}
