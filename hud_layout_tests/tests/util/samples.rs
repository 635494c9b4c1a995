// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample assets.

use std::collections::BTreeMap;
use std::sync::Arc;

use hud_layout::{
    GlyphSheet, HudHead, HudImage, HudText, ImageFrame, LayoutGroup, Popup, PopupLayout,
};

/// Characters of the sample font, all 5 pixels wide except `.` and `,`.
pub(crate) const SAMPLE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

pub(crate) fn image(name: &str, frames: Vec<ImageFrame>) -> Arc<HudImage> {
    Arc::new(HudImage {
        name: name.to_owned(),
        frames,
        ..HudImage::default()
    })
}

/// A single-frame `width`×`height` image stored as `<name>.png`.
pub(crate) fn still(name: &str, width: u32, height: u32) -> Arc<HudImage> {
    image(name, vec![ImageFrame::new(format!("{name}.png"), width, height)])
}

/// A sample font: lowercase letters and digits 5 pixels wide, `.` and `,` 1 pixel wide.
pub(crate) fn font(name: &str) -> Arc<HudText> {
    let mut char_widths: BTreeMap<char, u32> = SAMPLE_CHARS.chars().map(|ch| (ch, 5)).collect();
    char_widths.insert('.', 1);
    char_widths.insert(',', 1);
    Arc::new(HudText {
        name: name.to_owned(),
        sheets: vec![GlyphSheet {
            file: format!("{name}/ascii.png"),
            height: 8,
            chars: vec![format!("{SAMPLE_CHARS}.,")],
        }],
        char_widths,
        ..HudText::default()
    })
}

pub(crate) fn head(name: &str, pixel: u32) -> Arc<HudHead> {
    Arc::new(HudHead {
        name: name.to_owned(),
        pixel,
        ..HudHead::default()
    })
}

/// A popup showing `groups` at the origin, at one location.
pub(crate) fn popup(name: &str, groups: &[&Arc<LayoutGroup>]) -> Popup {
    let mut popup = Popup::new(name);
    popup.layouts = groups
        .iter()
        .map(|group| PopupLayout::new(Arc::clone(group)))
        .collect();
    popup
}
