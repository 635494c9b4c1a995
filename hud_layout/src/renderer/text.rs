// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hashbrown::HashMap;
use hud_primitives::{LayoutAlign, Rgb};

use super::Cursor;
use crate::component::{FontKey, PixelComponent, SpaceFont, WidthComponent};
use crate::condition::Condition;
use crate::inputs::{HudText, MAX_FRACTION_DIGITS, NumberEquation, NumberFormat};
use crate::util::scale_px;
use crate::viewer::{FollowTarget, Value, Viewer, resolve_viewer};

/// Colours selected by the legacy `&0`..`&f` codes.
const LEGACY_COLORS: [u32; 16] = [
    0x00_00_00, 0x00_00_AA, 0x00_AA_00, 0x00_AA_AA, 0xAA_00_00, 0xAA_00_AA, 0xFF_AA_00, 0xAA_AA_AA,
    0x55_55_55, 0x55_55_FF, 0x55_FF_55, 0x55_FF_FF, 0xFF_55_55, 0xFF_55_FF, 0xFF_FF_55, 0xFF_FF_FF,
];

/// Advance of `' '` when the font has no glyph for it, before scaling.
const DEFAULT_SPACE_ADVANCE: u32 = 4;

/// An image glyph embedded in every line font of a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InlineGlyph {
    pub(crate) ch: char,
    /// Advance of the glyph itself.
    pub(crate) advance: i32,
    /// Space drawn in front of the glyph.
    pub(crate) x: i32,
}

/// A piece of a text pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PatternPart {
    Literal(String),
    Placeholder {
        name: String,
        fraction_digits: Option<usize>,
    },
}

/// Splits `pattern` into literals and `[name]` / `[name:digits]` placeholders.
///
/// A `[` without a closing `]` is literal text. Digit counts are capped at
/// [`MAX_FRACTION_DIGITS`].
pub(crate) fn parse_pattern(pattern: &str) -> Vec<PatternPart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|close| open + close) else {
            break;
        };
        literal.push_str(&rest[..open]);
        if !literal.is_empty() {
            parts.push(PatternPart::Literal(core::mem::take(&mut literal)));
        }
        let inner = &rest[open + 1..close];
        let (name, fraction_digits) = match inner.rsplit_once(':') {
            Some((name, digits))
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let digits = digits
                    .parse::<usize>()
                    .map_or(MAX_FRACTION_DIGITS, |digits| digits.min(MAX_FRACTION_DIGITS));
                (name, Some(digits))
            }
            _ => (inner, None),
        };
        parts.push(PatternPart::Placeholder {
            name: name.to_owned(),
            fraction_digits,
        });
        rest = &rest[close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(PatternPart::Literal(literal));
    }
    parts
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Piece {
    Glyph { ch: char, advance: i32, color: Rgb },
    Space { advance: i32 },
    Image(InlineGlyph),
    Break,
}

impl Piece {
    fn width(&self, space: i32) -> i32 {
        match self {
            Self::Glyph { advance, .. } | Self::Space { advance } => advance + space,
            Self::Image(glyph) => glyph.x + glyph.advance + space,
            Self::Break => 0,
        }
    }
}

/// A compiled text element.
///
/// Each line is drawn with its own font, whose glyphs sit `line_width` pixels lower than the
/// previous line's.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    pub(crate) text: Arc<HudText>,
    pub(crate) lines: Vec<FontKey>,
    pub(crate) images: HashMap<String, InlineGlyph>,
    pub(crate) pattern: Vec<PatternPart>,
    pub(crate) color: Rgb,
    pub(crate) align: LayoutAlign,
    pub(crate) line_align: LayoutAlign,
    pub(crate) scale: f64,
    pub(crate) x: i32,
    pub(crate) split_width: i32,
    pub(crate) space: i32,
    pub(crate) number_equation: Option<NumberEquation>,
    pub(crate) number_format: NumberFormat,
    pub(crate) disable_number_format: bool,
    pub(crate) use_legacy_format: bool,
    pub(crate) follow: Option<FollowTarget>,
    pub(crate) conditions: Condition,
    pub(crate) spaces: SpaceFont,
}

impl TextRenderer {
    /// Fonts of the lines, top to bottom.
    pub fn line_fonts(&self) -> &[FontKey] {
        &self.lines
    }

    /// Draws the text for `viewer`.
    pub fn render(&self, viewer: &dyn Viewer) -> PixelComponent {
        let Some(viewer) = resolve_viewer(self.follow.as_ref(), viewer) else {
            return PixelComponent::empty();
        };
        if !self.conditions.evaluate(viewer) {
            return PixelComponent::empty();
        }
        let resolved = self.resolve(viewer);
        self.draw(&resolved)
    }

    /// Draws already resolved text, ignoring conditions.
    pub fn render_str(&self, text: &str) -> PixelComponent {
        self.draw(text)
    }

    fn draw(&self, text: &str) -> PixelComponent {
        let pieces = self.pieces(text);
        let mut lines = self.wrap(&pieces);
        lines.truncate(self.lines.len());

        let drawn: Vec<WidthComponent> = lines
            .iter()
            .zip(&self.lines)
            .map(|(line, font)| self.draw_line(line, font))
            .collect();
        let max = drawn.iter().map(WidthComponent::width).max().unwrap_or(0);
        if drawn.iter().all(WidthComponent::is_empty) {
            return PixelComponent::empty();
        }

        let mut cursor = Cursor::new(&self.spaces);
        for line in &drawn {
            let shift = self.line_align.shift(max, line.width());
            cursor.advance(shift);
            cursor.draw(line);
            cursor.advance(-(shift + line.width()));
        }
        cursor.advance(max);
        cursor.finish().at(self.x + self.align.anchor_shift(max))
    }

    fn resolve(&self, viewer: &dyn Viewer) -> String {
        let mut out = String::new();
        for part in &self.pattern {
            match part {
                PatternPart::Literal(text) => out.push_str(text),
                PatternPart::Placeholder {
                    name,
                    fraction_digits,
                } => match viewer.placeholder(name) {
                    Some(Value::Number(number)) => {
                        let number = self
                            .number_equation
                            .map_or(number, |equation| equation.apply(number));
                        if self.disable_number_format {
                            out.push_str(&Value::Number(number).to_string());
                        } else {
                            out.push_str(&self.number_format.format(number, *fraction_digits));
                        }
                    }
                    Some(value) => out.push_str(&value.to_string()),
                    None => {}
                },
            }
        }
        out
    }

    fn pieces(&self, text: &str) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(text.len());
        let mut color = self.color;
        let mut rest = text;
        while let Some(ch) = rest.chars().next() {
            rest = &rest[ch.len_utf8()..];
            if self.use_legacy_format && (ch == '&' || ch == '§') {
                if let Some(code) = rest.chars().next().and_then(|c| legacy_code(c, self.color)) {
                    rest = &rest[1..];
                    if let Some(code) = code {
                        color = code;
                    }
                    continue;
                }
            }
            if ch == ':' {
                if let Some((name, after)) = rest.split_once(':') {
                    if let Some(glyph) = self.images.get(name) {
                        pieces.push(Piece::Image(*glyph));
                        rest = after;
                        continue;
                    }
                }
            }
            if ch == '\n' {
                pieces.push(Piece::Break);
                continue;
            }
            match self.text.char_widths.get(&ch) {
                Some(width) => pieces.push(Piece::Glyph {
                    ch,
                    advance: scale_px(*width, self.scale) + 1,
                    color,
                }),
                None if ch == ' ' => pieces.push(Piece::Space {
                    advance: scale_px(DEFAULT_SPACE_ADVANCE, self.scale),
                }),
                None => {}
            }
        }
        pieces
    }

    /// Splits pieces into lines at breaks, then wraps greedily at spaces.
    fn wrap(&self, pieces: &[Piece]) -> Vec<Vec<Piece>> {
        let mut lines = Vec::new();
        for paragraph in pieces.split(|piece| *piece == Piece::Break) {
            if self.split_width <= 0 {
                lines.push(paragraph.to_vec());
                continue;
            }
            let mut line: Vec<Piece> = Vec::new();
            let mut width = 0;
            for word in paragraph.split_inclusive(|piece| is_space(piece, self)) {
                let word_width: i32 = word.iter().map(|piece| piece.width(self.space)).sum();
                let trailing = match word.last() {
                    Some(last) if is_space(last, self) => last.width(self.space),
                    _ => 0,
                };
                if !line.is_empty() && width + word_width - trailing > self.split_width {
                    trim_trailing_space(&mut line, self);
                    lines.push(core::mem::take(&mut line));
                    width = 0;
                }
                line.extend_from_slice(word);
                width += word_width;
            }
            trim_trailing_space(&mut line, self);
            lines.push(line);
        }
        lines
    }

    fn draw_line(&self, pieces: &[Piece], font: &FontKey) -> WidthComponent {
        let mut cursor = Cursor::new(&self.spaces);
        for piece in pieces {
            match *piece {
                Piece::Glyph { ch, advance, color } => {
                    cursor.draw(&WidthComponent::glyph(font, ch, advance).with_color(color));
                }
                Piece::Space { advance } => cursor.advance(advance),
                Piece::Image(glyph) => {
                    cursor.advance(glyph.x);
                    cursor.draw(&WidthComponent::glyph(font, glyph.ch, glyph.advance).with_color(Rgb::WHITE));
                }
                Piece::Break => continue,
            }
            cursor.advance(self.space);
        }
        let mut line = cursor.finish();
        if line.runs().is_empty() {
            line = WidthComponent::empty();
        }
        line
    }
}

fn is_space(piece: &Piece, renderer: &TextRenderer) -> bool {
    match piece {
        Piece::Space { .. } => true,
        Piece::Glyph { ch, .. } => *ch == ' ' && renderer.split_width > 0,
        _ => false,
    }
}

fn trim_trailing_space(line: &mut Vec<Piece>, renderer: &TextRenderer) {
    while line.last().is_some_and(|piece| is_space(piece, renderer)) {
        line.pop();
    }
}

/// Maps a legacy format code to its effect: `Some(Some(color))` switches colour,
/// `Some(None)` is a recognized code without a colour, `None` is not a code.
fn legacy_code(code: char, reset: Rgb) -> Option<Option<Rgb>> {
    let code = code.to_ascii_lowercase();
    match code {
        '0'..='9' | 'a'..='f' => {
            let index = code.to_digit(16)? as usize;
            Some(Some(Rgb::from_u32(LEGACY_COLORS[index])))
        }
        'r' => Some(Some(reset)),
        'k'..='o' => Some(None),
        _ => None,
    }
}
