// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiled element renderers.
//!
//! Renderers are built once per pack and hold only immutable, pre-registered glyph
//! components. Rendering reads the viewer and assembles components; it never allocates
//! glyphs and never fails.

mod container;
mod head;
mod image;
mod text;

pub use container::LayoutComponentContainer;
pub use head::{HeadGlyph, HeadRenderer};
pub use image::ImageRenderer;
pub use text::TextRenderer;

pub(crate) use text::{InlineGlyph, parse_pattern};

use crate::component::{SpaceFont, WidthComponent};

/// Accumulates components left to right, coalescing consecutive cursor moves into one run of
/// space characters.
pub(crate) struct Cursor<'a> {
    spaces: &'a SpaceFont,
    out: WidthComponent,
    pending: i32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(spaces: &'a SpaceFont) -> Self {
        Self {
            spaces,
            out: WidthComponent::empty(),
            pending: 0,
        }
    }

    /// Moves the cursor by `width` pixels without drawing.
    pub(crate) fn advance(&mut self, width: i32) {
        self.pending += width;
    }

    pub(crate) fn draw(&mut self, component: &WidthComponent) {
        self.flush();
        self.out.push(component);
    }

    /// Distance from the starting point.
    pub(crate) fn position(&self) -> i32 {
        self.out.width() + self.pending
    }

    pub(crate) fn finish(mut self) -> WidthComponent {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if self.pending != 0 {
            self.out.push(&self.spaces.of(self.pending));
            self.pending = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::FontKey;

    #[test]
    fn moves_coalesce() {
        let spaces = SpaceFont::new(FontKey::new("hud", "space"), 512);
        let glyph = WidthComponent::glyph(&FontKey::new("hud", "image"), 'a', 5);
        let mut cursor = Cursor::new(&spaces);
        cursor.advance(3);
        cursor.advance(-1);
        cursor.draw(&glyph);
        cursor.advance(-5);
        assert_eq!(cursor.position(), 2);
        let out = cursor.finish();
        assert_eq!(out.width(), 2);
        assert_eq!(out, spaces.of(2) + glyph + spaces.of(-5));
    }
}
