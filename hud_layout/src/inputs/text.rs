// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use hud_primitives::{LayoutAlign, PixelLocation, Rgb};

use super::RenderStyle;
use crate::condition::Condition;
use crate::viewer::FollowTarget;

/// One texture of a bitmap font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSheet {
    /// Texture path relative to `assets/<namespace>/textures/`, including the extension.
    pub file: String,
    /// Height of one glyph cell in pixels.
    pub height: u32,
    /// One string per row of cells.
    pub chars: Vec<String>,
}

/// An image that text can embed as `:name:`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageCharWidth {
    /// Token name; the texture is `glyph_<name>.png`.
    pub name: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Offset relative to the line. `y` shifts the glyph vertically, `x` adds space in front.
    pub location: PixelLocation,
}

/// A bitmap font.
#[derive(Clone, Debug, Default)]
pub struct HudText {
    /// Name; texts with the same name, shader and scale share fonts.
    pub name: String,
    /// Glyph textures.
    pub sheets: Vec<GlyphSheet>,
    /// Unscaled width of every glyph.
    pub char_widths: BTreeMap<char, u32>,
    /// Embedded images by codepoint.
    pub images: BTreeMap<u32, ImageCharWidth>,
    /// Hides every use of the text when false.
    pub conditions: Condition,
}

/// Linear transform applied to numeric placeholder values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberEquation {
    /// Factor.
    pub multiply: f64,
    /// Summand, applied after the factor.
    pub add: f64,
}

impl NumberEquation {
    /// `value * multiply + add`.
    pub fn apply(&self, value: f64) -> f64 {
        value * self.multiply + self.add
    }
}

/// Largest number of fraction digits a number is written with.
pub const MAX_FRACTION_DIGITS: usize = 16;

/// How numeric placeholder values are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Maximum digits after the decimal point, capped at [`MAX_FRACTION_DIGITS`]. Trailing
    /// zeros are dropped.
    pub fraction_digits: usize,
    /// Separate thousands with `,`.
    pub grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            fraction_digits: 1,
            grouping: true,
        }
    }
}

impl NumberFormat {
    /// Formats `value`, optionally overriding the number of fraction digits.
    ///
    /// The digit count is capped at [`MAX_FRACTION_DIGITS`].
    ///
    /// ```
    /// use hud_layout::NumberFormat;
    ///
    /// let format = NumberFormat::default();
    /// assert_eq!(format.format(12345.67, None), "12,345.7");
    /// assert_eq!(format.format(20.0, None), "20");
    /// assert_eq!(format.format(-0.04, Some(3)), "-0.04");
    /// ```
    pub fn format(&self, value: f64, fraction_digits: Option<usize>) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let digits = fraction_digits
            .unwrap_or(self.fraction_digits)
            .min(MAX_FRACTION_DIGITS);
        let fixed = format!("{:.*}", digits, value.abs());
        let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac = frac.trim_end_matches('0');
        let is_zero = int.bytes().all(|b| b == b'0') && frac.is_empty();

        let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        for (index, digit) in int.chars().enumerate() {
            if self.grouping && index > 0 && (int.len() - index) % 3 == 0 {
                out.push(',');
            }
            out.push(digit);
        }
        if !frac.is_empty() {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// A text placed inside a [`LayoutGroup`](super::LayoutGroup).
///
/// `pattern` is drawn after substituting `[name]` and `[name:digits]` with placeholder values.
#[derive(Clone, Debug)]
pub struct TextLayout {
    /// The font.
    pub text: Arc<HudText>,
    /// Offset inside the group.
    pub location: PixelLocation,
    /// Glyph scale.
    pub scale: f64,
    /// Shader parameters.
    pub style: RenderStyle,
    /// Pattern to draw.
    pub pattern: String,
    /// Default colour.
    pub color: Rgb,
    /// Anchoring of the whole block around the location.
    pub align: LayoutAlign,
    /// Alignment of each line against the widest one.
    pub line_align: LayoutAlign,
    /// Maximum number of lines.
    pub line: u32,
    /// Vertical distance between lines.
    pub line_width: i32,
    /// Lines wider than this wrap at spaces. `0` disables wrapping.
    pub split_width: i32,
    /// Extra advance after every glyph.
    pub space: i32,
    /// Offset of default emoji relative to the line.
    pub emoji_location: PixelLocation,
    /// Scale of default emoji.
    pub emoji_scale: f64,
    /// Transform applied to numbers.
    pub number_equation: Option<NumberEquation>,
    /// Number formatting.
    pub number_format: NumberFormat,
    /// Write numbers exactly as received.
    pub disable_number_format: bool,
    /// Interpret `&x` and `§x` colour codes.
    pub use_legacy_format: bool,
    /// Read placeholders from another viewer.
    pub follow: Option<FollowTarget>,
    /// Hides this element when false.
    pub conditions: Condition,
}

impl TextLayout {
    /// Draws `pattern` with `text` at the group origin, on one line.
    pub fn new(text: Arc<HudText>, pattern: impl Into<String>) -> Self {
        Self {
            text,
            location: PixelLocation::ZERO,
            scale: 1.0,
            style: RenderStyle::default(),
            pattern: pattern.into(),
            color: Rgb::WHITE,
            align: LayoutAlign::Left,
            line_align: LayoutAlign::Left,
            line: 1,
            line_width: 10,
            split_width: 0,
            space: 0,
            emoji_location: PixelLocation::ZERO,
            emoji_scale: 1.0,
            number_equation: None,
            number_format: NumberFormat::default(),
            disable_number_format: false,
            use_legacy_format: true,
            follow: None,
            conditions: Condition::Always,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_format() {
        let format = NumberFormat::default();
        assert_eq!(format.format(0.0, None), "0");
        assert_eq!(format.format(-0.01, None), "0");
        assert_eq!(format.format(999.96, None), "1,000");
        assert_eq!(format.format(1234567.0, Some(0)), "1,234,567");

        let plain = NumberFormat {
            fraction_digits: 2,
            grouping: false,
        };
        assert_eq!(plain.format(1234.5, None), "1234.5");
    }

    #[test]
    fn fraction_digits_are_capped() {
        let format = NumberFormat::default();
        assert_eq!(format.format(0.1, Some(usize::MAX)), "0.1");
        let third = format.format(1.0 / 3.0, Some(1_000));
        assert_eq!(third.len(), 2 + MAX_FRACTION_DIGITS);
    }

    #[test]
    fn equation() {
        let equation = NumberEquation {
            multiply: 0.5,
            add: 1.0,
        };
        assert_eq!(equation.apply(10.0), 6.0);
    }
}
