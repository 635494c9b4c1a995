// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Private-use codepoint allocation.

use core::ops::RangeInclusive;
use std::sync::Arc;

use crate::Error;

/// Codepoints handed out to popup glyphs (Supplementary Private Use Area-A).
pub const POPUP_GLYPH_RANGE: RangeInclusive<u32> = 0xF_0000..=0xF_FFFD;

/// First codepoint of inline image glyphs inside text fonts (Supplementary Private Use
/// Area-B). Text definitions number their image glyphs from here, the first image taking this
/// codepoint itself; default emoji continue after the highest image glyph.
pub const TEXT_IMAGE_START_CODEPOINT: u32 = 0x10_0000;

/// Last codepoint usable for text font image glyphs.
pub const TEXT_IMAGE_END_CODEPOINT: u32 = 0x10_FFFD;

/// Hands out codepoints from a reserved range in strictly increasing order.
///
/// Codepoints are never reclaimed. Running past the end of the range is an error naming the
/// owner, since a wrapped codepoint would silently overwrite an unrelated glyph.
#[derive(Clone, Debug)]
pub struct CharAllocator {
    owner: Arc<str>,
    next: u32,
    range: RangeInclusive<u32>,
}

impl CharAllocator {
    /// Creates an allocator over [`POPUP_GLYPH_RANGE`].
    pub fn new(owner: impl Into<Arc<str>>) -> Self {
        Self::with_range(owner, POPUP_GLYPH_RANGE)
    }

    /// Creates an allocator over `range`.
    pub fn with_range(owner: impl Into<Arc<str>>, range: RangeInclusive<u32>) -> Self {
        Self {
            owner: owner.into(),
            next: *range.start(),
            range,
        }
    }

    /// Creates an allocator for default emoji in a text font whose inline image glyphs use
    /// `image_codepoints`.
    ///
    /// The first emoji takes the codepoint after the highest image glyph, or
    /// [`TEXT_IMAGE_START_CODEPOINT`] when there are none.
    pub fn for_text_images(
        owner: impl Into<Arc<str>>,
        image_codepoints: impl IntoIterator<Item = u32>,
    ) -> Self {
        let start = image_codepoints
            .into_iter()
            .map(|codepoint| codepoint.saturating_add(1))
            .fold(TEXT_IMAGE_START_CODEPOINT, u32::max);
        Self {
            owner: owner.into(),
            next: start,
            range: TEXT_IMAGE_START_CODEPOINT..=TEXT_IMAGE_END_CODEPOINT,
        }
    }

    /// Returns the next free codepoint.
    pub fn next(&mut self) -> Result<char, Error> {
        let exhausted = || Error::codepoint_exhausted(&self.owner, self.range.clone());
        if !self.range.contains(&self.next) {
            return Err(exhausted());
        }
        let ch = char::from_u32(self.next).ok_or_else(exhausted)?;
        self.next += 1;
        Ok(ch)
    }

    /// Number of codepoints handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next.saturating_sub(*self.range.start())
    }

    /// Number of codepoints still available.
    pub fn remaining(&self) -> u32 {
        (self.range.end() + 1).saturating_sub(self.next)
    }

    /// The popup or font that owns this allocator.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}
