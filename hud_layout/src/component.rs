// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned and sized renderable fragments.

use core::fmt;
use core::ops::{Add, AddAssign};
use std::sync::Arc;

use hud_primitives::Rgb;
use smallvec::SmallVec;

/// Reference to a font file in the pack, as `namespace:path`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontKey(Arc<str>);

impl FontKey {
    /// Creates a key for `assets/<namespace>/font/<path>.json`.
    pub fn new(namespace: &str, path: &str) -> Self {
        Self(format!("{namespace}:{path}").into())
    }

    /// The key as `namespace:path`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or("", |(namespace, _)| namespace)
    }

    /// The path part, relative to `assets/<namespace>/font/`.
    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(&self.0, |(_, path)| path)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A run of characters drawn with one font and one colour.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    /// Font the characters belong to.
    pub font: FontKey,
    /// The characters.
    pub text: String,
    /// Text colour; `None` leaves the client default.
    pub color: Option<Rgb>,
}

/// The atomic renderable unit: some glyph runs and the net horizontal advance they produce.
///
/// `width` is always the cursor movement caused by drawing the runs, so concatenation sums
/// widths. Negative widths move the cursor left.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidthComponent {
    runs: SmallVec<[GlyphRun; 2]>,
    width: i32,
}

impl WidthComponent {
    /// Nothing drawn, no advance.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single glyph with the given advance.
    pub fn glyph(font: &FontKey, ch: char, advance: i32) -> Self {
        Self::text(font, ch.to_string(), advance)
    }

    /// A run of text whose total advance is `width`.
    pub fn text(font: &FontKey, text: impl Into<String>, width: i32) -> Self {
        let text = text.into();
        let mut runs = SmallVec::new();
        if !text.is_empty() {
            runs.push(GlyphRun {
                font: font.clone(),
                text,
                color: None,
            });
        }
        Self { runs, width }
    }

    /// Concatenates components left to right.
    pub fn concat<I: IntoIterator<Item = Self>>(components: I) -> Self {
        let mut out = Self::empty();
        for component in components {
            out += component;
        }
        out
    }

    /// Sets the colour of every run that does not have one yet.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        for run in &mut self.runs {
            run.color.get_or_insert(color);
        }
        self
    }

    /// Appends `other` after this component.
    pub fn push(&mut self, other: &Self) {
        for run in &other.runs {
            match self.runs.last_mut() {
                Some(last) if last.font == run.font && last.color == run.color => {
                    last.text.push_str(&run.text);
                }
                _ => self.runs.push(run.clone()),
            }
        }
        self.width += other.width;
    }

    /// Net horizontal advance.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The glyph runs in drawing order.
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Whether nothing is drawn and the cursor does not move.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() && self.width == 0
    }

    /// All characters of all runs, in drawing order.
    pub fn content(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Binds this component to a horizontal pixel offset.
    pub fn at(self, pixel: i32) -> PixelComponent {
        PixelComponent {
            component: self,
            pixel,
        }
    }
}

impl AddAssign<&Self> for WidthComponent {
    fn add_assign(&mut self, rhs: &Self) {
        self.push(rhs);
    }
}

impl AddAssign for WidthComponent {
    fn add_assign(&mut self, rhs: Self) {
        self.push(&rhs);
    }
}

impl Add for WidthComponent {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.push(&rhs);
        self
    }
}

/// A [`WidthComponent`] bound to a horizontal pixel offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelComponent {
    /// What is drawn.
    pub component: WidthComponent,
    /// Horizontal offset from the layout origin.
    pub pixel: i32,
}

impl PixelComponent {
    /// Nothing drawn at the origin.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the component draws nothing.
    pub fn is_empty(&self) -> bool {
        self.component.is_empty()
    }
}

/// Codepoint of the zero-advance entry in the pack-wide space font.
///
/// Width `w` is drawn as `SPACE_CENTER_CODEPOINT + w`, which stays inside the Basic
/// Multilingual Plane private-use block for `|w| <= MAX_SPACE_LIMIT`.
pub const SPACE_CENTER_CODEPOINT: u32 = 0xEC80;

/// Largest single-character advance the space font can encode.
pub const MAX_SPACE_LIMIT: i32 = 3199;

/// The pack-wide font of fixed-advance space characters, used to move the cursor by any
/// amount at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceFont {
    key: FontKey,
    max: i32,
}

impl SpaceFont {
    /// Creates a space font covering advances in `-max..=max`.
    ///
    /// `max` is clamped to `1..=MAX_SPACE_LIMIT`.
    pub fn new(key: FontKey, max: i32) -> Self {
        Self {
            key,
            max: max.clamp(1, MAX_SPACE_LIMIT),
        }
    }

    /// The font the space characters live in.
    pub fn key(&self) -> &FontKey {
        &self.key
    }

    /// Largest advance of a single character.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// A cursor move of `width` pixels. Wide moves are split over several characters.
    pub fn of(&self, width: i32) -> WidthComponent {
        if width == 0 {
            return WidthComponent::empty();
        }
        let mut text = String::new();
        let mut remaining = width;
        while remaining != 0 {
            let step = remaining.clamp(-self.max, self.max);
            if let Some(ch) = space_char(step) {
                text.push(ch);
            }
            remaining -= step;
        }
        WidthComponent::text(&self.key, text, width)
    }

    /// Every `(character, advance)` pair of the font, from `-max` to `max`.
    pub fn advances(&self) -> impl Iterator<Item = (char, i32)> + '_ {
        (-self.max..=self.max)
            .filter(|width| *width != 0)
            .filter_map(|width| space_char(width).map(|ch| (ch, width)))
    }
}

fn space_char(width: i32) -> Option<char> {
    let codepoint = SPACE_CENTER_CODEPOINT.checked_add_signed(width)?;
    char::from_u32(codepoint)
}
