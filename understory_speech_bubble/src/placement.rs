// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of a bubble below its anchor, inside its container.
//!
//! The bubble opens towards the side of the container with more free space:
//!
//! - `offset_left` is the distance from the container's left edge to the anchor's left edge.
//! - `offset_right` is the distance from the anchor's right edge to the container's right edge.
//! - If `offset_left > offset_right`, the bubble is pinned by its right edge and grows
//!   leftward ([`Direction::Left`]); otherwise it is pinned by its left edge and grows
//!   rightward ([`Direction::Right`]).
//!
//! The width is the smaller of the requested max width, the container width and the
//! offset on the chosen side. The pinned edge is then moved towards the anchor's
//! center by half the anchor's width minus the tail offset, so that the tail points
//! at the anchor.
//!
//! Degenerate inputs (zero-sized containers, anchors outside their container) produce
//! zero or negative sizes rather than failing.

use kurbo::Rect;

use crate::config::BubbleConfig;

/// Direction the bubble grows from its pinned edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Pinned at the right, grows leftward.
    Left,
    /// Pinned at the left, grows rightward.
    Right,
}

impl Direction {
    /// Style class for the tail.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "direction-left",
            Self::Right => "direction-right",
        }
    }
}

/// The pinned horizontal edge, measured inward from the matching container edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HorizontalAnchor {
    /// Distance from the container's left edge to the bubble's left edge.
    Left(f64),
    /// Distance from the container's right edge to the bubble's right edge.
    Right(f64),
}

/// Computed bubble geometry, in the container's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Growth direction.
    pub direction: Direction,
    /// Pinned edge.
    pub anchor: HorizontalAnchor,
    /// Bubble width.
    pub width: f64,
    /// Distance from the container's top edge to the bubble's top edge.
    pub top: f64,
    /// Font size to render the text with.
    pub font_size: f64,
}

impl Placement {
    /// Bubble rectangle relative to a container of `container_width`.
    ///
    /// The height is left at zero; measuring text is up to the renderer.
    pub fn bounds_in(&self, container_width: f64) -> Rect {
        let x0 = match self.anchor {
            HorizontalAnchor::Left(left) => left,
            HorizontalAnchor::Right(right) => container_width - right - self.width,
        };
        Rect::new(x0, self.top, x0 + self.width, self.top)
    }
}

/// Place a bubble for `anchor` inside `container`; both in the same coordinate space.
pub fn place(anchor: Rect, container: Rect, max_width: f64, config: &BubbleConfig) -> Placement {
    let container_width = container.width();
    let mut width = max_width.min(container_width);

    let offset_left = anchor.x0 - container.x0;
    let offset_right = container_width - (anchor.x0 + anchor.width() - container.x0);
    let nudge = anchor.width() / 2.0 - config.tail_offset;

    let (direction, pinned) = if offset_left > offset_right {
        width = width.min(offset_left);
        (Direction::Left, HorizontalAnchor::Right(offset_right + nudge))
    } else {
        width = width.min(offset_right);
        (Direction::Right, HorizontalAnchor::Left(offset_left + nudge))
    };

    Placement {
        direction,
        anchor: pinned,
        width,
        top: anchor.y1 - container.y0,
        font_size: config.font_size,
    }
}
