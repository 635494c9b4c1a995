// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How an animation sequence maps a frame counter onto its entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnimationType {
    /// Restart from the first entry after the last one.
    #[default]
    Loop,
    /// Stop on the last entry.
    PlayOnce,
}

impl AnimationType {
    /// Selects the entry shown at `frame` in a sequence of `len` entries.
    ///
    /// Returns `None` for an empty sequence.
    ///
    /// ```
    /// use hud_primitives::AnimationType;
    ///
    /// assert_eq!(AnimationType::Loop.select(7, 5), Some(2));
    /// assert_eq!(AnimationType::PlayOnce.select(7, 5), Some(4));
    /// assert_eq!(AnimationType::Loop.select(3, 0), None);
    /// ```
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the selected index is always below `len`, which is a usize"
    )]
    pub fn select(self, frame: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let last = len as u64 - 1;
        Some(match self {
            Self::Loop => (frame % len as u64) as usize,
            Self::PlayOnce => frame.min(last) as usize,
        })
    }
}

/// Horizontal alignment of a fragment inside the width reserved for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutAlign {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center in the available width.
    Center,
    /// Align to the right edge.
    Right,
}

impl LayoutAlign {
    /// Shift applied to content of `width` placed in `available` pixels.
    ///
    /// Negative when the content is wider than the available space.
    pub fn shift(self, available: i32, width: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => (available - width) / 2,
            Self::Right => available - width,
        }
    }

    /// Shift applied to content of `width` anchored at a single point.
    pub fn anchor_shift(self, width: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => -width / 2,
            Self::Right => -width,
        }
    }
}

/// Which side of a layout sits on its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutOffset {
    /// The left edge is on the anchor.
    #[default]
    Left,
    /// The middle is on the anchor.
    Center,
    /// The right edge is on the anchor.
    Right,
}

impl LayoutOffset {
    /// Shift applied to a layout of `extent` pixels.
    pub fn shift(self, extent: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => -extent / 2,
            Self::Right => -extent,
        }
    }
}

/// Visual variant of a player head icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeadRenderType {
    /// Face only.
    #[default]
    Standard,
    /// Face plus a slightly larger hat/hair overlay one layer above it.
    Fancy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_wraps() {
        assert_eq!(AnimationType::Loop.select(0, 5), Some(0));
        assert_eq!(AnimationType::Loop.select(5, 5), Some(0));
        assert_eq!(AnimationType::Loop.select(7, 5), Some(2));
    }

    #[test]
    fn play_once_holds_last_frame() {
        for frame in 4..40 {
            assert_eq!(AnimationType::PlayOnce.select(frame, 5), Some(4));
        }
        assert_eq!(AnimationType::PlayOnce.select(2, 5), Some(2));
    }

    #[test]
    fn align_shift() {
        assert_eq!(LayoutAlign::Left.shift(20, 8), 0);
        assert_eq!(LayoutAlign::Center.shift(20, 8), 6);
        assert_eq!(LayoutAlign::Right.shift(20, 8), 12);
        assert_eq!(LayoutAlign::Center.anchor_shift(9), -4);
        assert_eq!(LayoutOffset::Right.shift(30), -30);
    }
}
