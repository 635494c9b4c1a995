// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative popup hierarchy a pack is built from.
//!
//! These types are read-only during a build. Definitions that many layouts refer to are
//! held in `Arc`s.

mod head;
mod image;
mod text;

pub use head::*;
pub use image::*;
pub use text::*;

use std::sync::Arc;

use hud_primitives::{AnimationType, GuiLocation, LayoutAlign, LayoutOffset, PixelLocation};

use crate::condition::Condition;
use crate::shader::{HudShader, ShaderProperties};

/// Shader parameters every element layout carries.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Scale applied by the client shader.
    pub render_scale: f64,
    /// Z-order.
    pub layer: i32,
    /// Draw an outline.
    pub outline: bool,
    /// Extension data for the client shader.
    pub properties: ShaderProperties,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            render_scale: 1.0,
            layer: 0,
            outline: false,
            properties: ShaderProperties::new(),
        }
    }
}

impl RenderStyle {
    /// The shader for an element drawn at `gui` with `opacity`.
    pub fn shader(&self, gui: GuiLocation, opacity: f64) -> HudShader {
        HudShader {
            gui,
            render_scale: self.render_scale,
            layer: self.layer,
            outline: self.outline,
            opacity,
            properties: self.properties.clone(),
        }
    }
}

/// One position a popup can occupy on screen.
///
/// A popup shown several times at once uses a different group for each instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocationGroup {
    /// Screen anchor.
    pub gui: GuiLocation,
    /// Pixel offset from the anchor.
    pub pixel: PixelLocation,
}

/// Pixel offsets an element cycles through over time.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationLocation {
    /// How frames past the end are handled.
    pub kind: AnimationType,
    /// One offset per animation frame.
    pub locations: Vec<PixelLocation>,
}

impl Default for AnimationLocation {
    fn default() -> Self {
        Self {
            kind: AnimationType::Loop,
            locations: vec![PixelLocation::ZERO],
        }
    }
}

/// A reusable group of images, texts and heads.
#[derive(Clone, Debug, Default)]
pub struct LayoutGroup {
    /// Name, used in diagnostics.
    pub name: String,
    /// Hides the whole group when false.
    pub conditions: Condition,
    /// Per-frame offsets.
    pub animation: AnimationLocation,
    /// Horizontal placement of the group around its origin.
    pub offset: LayoutOffset,
    /// Alignment of each element inside the group.
    pub align: LayoutAlign,
    /// Image elements.
    pub images: Vec<ImageLayout>,
    /// Text elements.
    pub texts: Vec<TextLayout>,
    /// Head elements.
    pub heads: Vec<HeadLayout>,
}

/// A [`LayoutGroup`] placed inside a popup.
#[derive(Clone, Debug)]
pub struct PopupLayout {
    /// The group.
    pub layout: Arc<LayoutGroup>,
    /// Additional screen anchor.
    pub gui: GuiLocation,
    /// Additional pixel offset.
    pub pixel: PixelLocation,
}

impl PopupLayout {
    /// Places `layout` at the popup origin.
    pub fn new(layout: Arc<LayoutGroup>) -> Self {
        Self {
            layout,
            gui: GuiLocation::ZERO,
            pixel: PixelLocation::ZERO,
        }
    }
}

/// A named overlay made of layout groups.
#[derive(Clone, Debug)]
pub struct Popup {
    /// Unique name within the pack.
    pub name: String,
    /// Hides the whole popup when false.
    pub conditions: Condition,
    /// Screen anchor of the popup.
    pub gui: GuiLocation,
    /// Positions the popup can be shown at, selected by index at render time.
    pub move_locations: Vec<LocationGroup>,
    /// Layout groups, drawn in order.
    pub layouts: Vec<PopupLayout>,
}

impl Popup {
    /// Creates a popup with a single location at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conditions: Condition::Always,
            gui: GuiLocation::ZERO,
            move_locations: vec![LocationGroup::default()],
            layouts: Vec::new(),
        }
    }
}
