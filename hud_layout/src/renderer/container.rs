// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hud_primitives::{LayoutAlign, LayoutOffset};

use super::Cursor;
use crate::component::{PixelComponent, SpaceFont, WidthComponent};

/// Overlays positioned fragments into one component.
///
/// Every fragment is drawn at its pixel offset plus its alignment shift inside `max`, and the
/// cursor returns to the origin afterwards, so fragments do not push each other. The result
/// advances by the container extent: the larger of `max` and the rightmost fragment edge.
#[derive(Debug)]
pub struct LayoutComponentContainer<'a> {
    offset: LayoutOffset,
    align: LayoutAlign,
    max: i32,
    spaces: &'a SpaceFont,
    items: Vec<PixelComponent>,
}

impl<'a> LayoutComponentContainer<'a> {
    /// Creates an empty container aligning fragments inside `max` pixels.
    pub fn new(offset: LayoutOffset, align: LayoutAlign, max: i32, spaces: &'a SpaceFont) -> Self {
        Self {
            offset,
            align,
            max,
            spaces,
            items: Vec::new(),
        }
    }

    /// Adds fragments. Fragments that draw nothing are skipped.
    #[must_use]
    pub fn append(mut self, items: impl IntoIterator<Item = PixelComponent>) -> Self {
        self.items
            .extend(items.into_iter().filter(|item| !item.is_empty()));
        self
    }

    /// Draws every fragment. Empty when nothing was appended.
    pub fn build(self) -> WidthComponent {
        if self.items.is_empty() {
            return WidthComponent::empty();
        }
        let shift = |item: &PixelComponent| {
            item.pixel + self.align.shift(self.max, item.component.width())
        };
        let extent = self
            .items
            .iter()
            .map(|item| shift(item) + item.component.width())
            .fold(self.max, i32::max);
        let origin = self.offset.shift(extent);

        let mut cursor = Cursor::new(self.spaces);
        for item in &self.items {
            let x = origin + shift(item);
            cursor.advance(x);
            cursor.draw(&item.component);
            cursor.advance(-(x + item.component.width()));
        }
        cursor.advance(extent);
        cursor.finish()
    }
}
