// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Add;

/// Opacity of a location that has not been given an explicit value.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// An offset in glyph space, plus the opacity applied to everything drawn at it.
///
/// Locations compose with `+`. `x` and `y` are summed, saturating at the bounds of `i32`.
/// For opacity the later non-default value wins: in `a + b`, `b.opacity` is used unless it
/// is [`DEFAULT_OPACITY`].
///
/// ```
/// use hud_primitives::PixelLocation;
///
/// let popup = PixelLocation::new(10, -4).with_opacity(0.5);
/// let element = PixelLocation::new(3, 2);
/// let combined = popup + element;
/// assert_eq!((combined.x, combined.y), (13, -2));
/// assert_eq!(combined.opacity, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelLocation {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels, used as the glyph ascent.
    pub y: i32,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl PixelLocation {
    /// The origin at default opacity.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        opacity: DEFAULT_OPACITY,
    };

    /// Creates a location at default opacity.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            opacity: DEFAULT_OPACITY,
        }
    }

    /// Returns a copy of this location with the given opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Whether the opacity was overridden.
    pub fn has_opacity(&self) -> bool {
        self.opacity != DEFAULT_OPACITY
    }
}

impl Default for PixelLocation {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for PixelLocation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
            opacity: if rhs.has_opacity() {
                rhs.opacity
            } else {
                self.opacity
            },
        }
    }
}

/// An anchor point on screen, in percent of the screen size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuiLocation {
    /// Horizontal anchor, `0.0` is the left edge and `100.0` the right edge.
    pub x: f64,
    /// Vertical anchor, `0.0` is the top edge and `100.0` the bottom edge.
    pub y: f64,
}

impl GuiLocation {
    /// The top left corner.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates an anchor.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for GuiLocation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
