// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble configuration and platform detection.

use core::time::Duration;

/// Input platform class, used to decide whether a pointer cursor hint is needed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Platform {
    /// Mouse or trackpad with hover feedback.
    #[default]
    Desktop,
    /// Touch-primary device without hover feedback.
    Touch,
}

impl Platform {
    /// Classify a user agent string.
    ///
    /// iPod, iPhone and iPad agents are touch-primary; everything else is desktop.
    pub fn from_user_agent(user_agent: &str) -> Self {
        const TOUCH_MARKERS: [&str; 3] = ["iPod", "iPhone", "iPad"];
        if TOUCH_MARKERS.iter().any(|m| user_agent.contains(m)) {
            Self::Touch
        } else {
            Self::Desktop
        }
    }

    /// Returns true for touch-primary platforms.
    pub fn is_touch_primary(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Tunables for [`SpeechBubbles`](crate::SpeechBubbles).
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleConfig {
    /// Max width used when [`show`](crate::SpeechBubbles::show) is given no width.
    pub default_max_width: f64,
    /// Delay between clearing the `show` class and detaching the element.
    ///
    /// Should match the stylesheet's fade transition.
    pub fade_out: Duration,
    /// Horizontal distance from the bubble edge to the tip of its tail.
    pub tail_offset: f64,
    /// Font size applied to the bubble.
    pub font_size: f64,
    /// Set a pointer cursor hint while a bubble is live.
    pub touch_primary: bool,
}

impl BubbleConfig {
    /// Default for [`BubbleConfig::default_max_width`].
    pub const DEFAULT_MAX_WIDTH: f64 = 400.0;
    /// Default for [`BubbleConfig::fade_out`].
    pub const FADE_OUT: Duration = Duration::from_millis(500);
    /// Default for [`BubbleConfig::tail_offset`].
    pub const TAIL_OFFSET: f64 = 18.0;
    /// Default for [`BubbleConfig::font_size`].
    pub const FONT_SIZE: f64 = 16.0;

    /// Defaults adjusted for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self::default().with_touch_primary(platform.is_touch_primary())
    }

    /// Set the default max width.
    pub fn with_default_max_width(mut self, width: f64) -> Self {
        self.default_max_width = width;
        self
    }

    /// Set the fade-out delay.
    pub fn with_fade_out(mut self, fade_out: Duration) -> Self {
        self.fade_out = fade_out;
        self
    }

    /// Set the tail offset.
    pub fn with_tail_offset(mut self, offset: f64) -> Self {
        self.tail_offset = offset;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Enable or disable the touch cursor hint.
    pub fn with_touch_primary(mut self, touch_primary: bool) -> Self {
        self.touch_primary = touch_primary;
        self
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            default_max_width: Self::DEFAULT_MAX_WIDTH,
            fade_out: Self::FADE_OUT,
            tail_offset: Self::TAIL_OFFSET,
            font_size: Self::FONT_SIZE,
            touch_primary: false,
        }
    }
}
