// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An opaque 24-bit colour, as understood by the client's text colour attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(u32);

impl Rgb {
    /// Pure white, the client's default text colour.
    pub const WHITE: Self = Self(0xFF_FF_FF);

    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Creates a colour from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    pub const fn from_u32(value: u32) -> Self {
        Self(value & 0xFF_FF_FF)
    }

    /// Returns the packed `0xRRGGBB` value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Parses `#rrggbb` or `rrggbb`.
    ///
    /// ```
    /// use hud_primitives::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#ff8000"), Some(Rgb::new(255, 128, 0)));
    /// assert_eq!(Rgb::parse("zz0000"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Self)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn channels_pack() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).to_u32(), 0x12_34_56);
        assert_eq!(Rgb::from_u32(0xAB_12_34_56).to_u32(), 0x12_34_56);
    }

    #[test]
    fn parse_accepts_optional_hash() {
        assert_eq!(Rgb::parse("00ff00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::parse(" #0000ff "), Some(Rgb::new(0, 0, 255)));
        assert_eq!(Rgb::parse("#fff"), None);
    }
}
