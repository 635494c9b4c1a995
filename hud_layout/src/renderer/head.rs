// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hud_primitives::{HeadRenderType, LayoutAlign, Rgb};

use super::Cursor;
use crate::component::{FontKey, PixelComponent, SpaceFont, WidthComponent};
use crate::condition::Condition;
use crate::viewer::{FollowTarget, HeadSkin, Viewer, resolve_viewer};

/// A one-pixel-wide, skin-pixel-tall glyph that draws one head row at a fixed height.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeadGlyph {
    /// Font the glyph was registered in.
    pub font: FontKey,
    /// The glyph.
    pub ch: char,
}

/// A compiled head element.
///
/// The head is drawn column by column: the eight row glyphs of a column are stacked by
/// stepping back `pixel + 1` after each, then the cursor steps back one pixel to start the
/// next column. With [`HeadRenderType::Fancy`] the cursor rewinds to the start and the hair
/// layer is drawn the same way on top.
#[derive(Clone, Debug)]
pub struct HeadRenderer {
    /// `(face, hair)` glyphs, top row first.
    pub(crate) rows: Vec<(HeadGlyph, HeadGlyph)>,
    pub(crate) pixel: i32,
    pub(crate) back_one: WidthComponent,
    pub(crate) rewind: WidthComponent,
    pub(crate) row_back: WidthComponent,
    pub(crate) x: i32,
    pub(crate) align: LayoutAlign,
    pub(crate) kind: HeadRenderType,
    pub(crate) follow: Option<FollowTarget>,
    pub(crate) conditions: Condition,
    pub(crate) spaces: SpaceFont,
}

impl HeadRenderer {
    /// The row glyphs, top row first, as `(face, hair)`.
    pub fn rows(&self) -> &[(HeadGlyph, HeadGlyph)] {
        &self.rows
    }

    /// Width of the drawn head.
    pub fn width(&self) -> i32 {
        self.pixel * 8
    }

    /// Draws the head of `viewer`, or of the followed viewer.
    pub fn render(&self, viewer: &dyn Viewer) -> PixelComponent {
        let Some(viewer) = resolve_viewer(self.follow.as_ref(), viewer) else {
            return PixelComponent::empty();
        };
        if !self.conditions.evaluate(viewer) {
            return PixelComponent::empty();
        }
        let fallback = HeadSkin::default();
        let skin = viewer.head_skin().unwrap_or(&fallback);

        let mut cursor = Cursor::new(&self.spaces);
        match self.kind {
            HeadRenderType::Standard => {
                self.pass(&mut cursor, |x, y| {
                    let color = skin.hair_at(x, y).unwrap_or_else(|| skin.main_at(x, y));
                    Some((&self.rows[y].0, color))
                });
            }
            HeadRenderType::Fancy => {
                self.pass(&mut cursor, |x, y| Some((&self.rows[y].0, skin.main_at(x, y))));
                cursor.draw(&self.rewind);
                self.pass(&mut cursor, |x, y| {
                    skin.hair_at(x, y).map(|color| (&self.rows[y].1, color))
                });
            }
        }
        cursor.draw(&self.back_one);
        cursor
            .finish()
            .at(self.x + self.align.anchor_shift(self.width()))
    }

    /// Draws all 64 pixels; `None` leaves a pixel out. Advances by `8 * pixel + 1`.
    fn pass<'a>(
        &'a self,
        cursor: &mut Cursor<'_>,
        mut pick: impl FnMut(usize, usize) -> Option<(&'a HeadGlyph, Rgb)>,
    ) {
        let rows = self.rows.len();
        for x in 0..8 {
            for y in 0..rows {
                match pick(x, y) {
                    Some((glyph, color)) => cursor.draw(
                        &WidthComponent::glyph(&glyph.font, glyph.ch, self.pixel + 1)
                            .with_color(color),
                    ),
                    None => cursor.advance(self.pixel + 1),
                }
                if y + 1 < rows {
                    cursor.draw(&self.row_back);
                }
            }
            if x < 7 {
                cursor.draw(&self.back_one);
            }
        }
    }
}
