// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hud_primitives::{PixelLocation, Rgb};

use super::RenderStyle;
use crate::condition::Condition;
use crate::viewer::FollowTarget;

/// One frame of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFrame {
    /// Texture path relative to `assets/<namespace>/textures/`, including the extension.
    pub file: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Horizontal offset of the visible content inside the texture.
    pub x_offset: i32,
}

impl ImageFrame {
    /// A frame without offset.
    pub fn new(file: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file: file.into(),
            width,
            height,
            x_offset: 0,
        }
    }
}

/// Picks the frame from a placeholder instead of the animation counter.
///
/// The value is divided by `max` when given and clamped to `0..=1`; `0` draws nothing and
/// `1` draws the last frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageListener {
    /// Placeholder holding the current value.
    pub value: String,
    /// Placeholder holding the maximum value.
    pub max: Option<String>,
}

/// A possibly animated image.
#[derive(Clone, Debug, Default)]
pub struct HudImage {
    /// Name, used in diagnostics.
    pub name: String,
    /// Frames in animation order.
    pub frames: Vec<ImageFrame>,
    /// Frame selection by value.
    pub listener: Option<ImageListener>,
    /// Hides every use of the image when false.
    pub conditions: Condition,
}

/// An image placed inside a [`LayoutGroup`](super::LayoutGroup).
#[derive(Clone, Debug)]
pub struct ImageLayout {
    /// The image.
    pub image: Arc<HudImage>,
    /// Offset inside the group.
    pub location: PixelLocation,
    /// Bitmap scale.
    pub scale: f64,
    /// Shader parameters.
    pub style: RenderStyle,
    /// Tint.
    pub color: Option<Rgb>,
    /// Gap between stacked copies.
    pub space: i32,
    /// Placeholder holding how many copies to draw side by side.
    pub stack: Option<String>,
    /// Upper bound for [`stack`](Self::stack).
    pub max_stack: u32,
    /// Read placeholders from another viewer.
    pub follow: Option<FollowTarget>,
    /// Hides this element when false.
    pub conditions: Condition,
}

impl ImageLayout {
    /// Places `image` at the group origin with default settings.
    pub fn new(image: Arc<HudImage>) -> Self {
        Self {
            image,
            location: PixelLocation::ZERO,
            scale: 1.0,
            style: RenderStyle::default(),
            color: None,
            space: 1,
            stack: None,
            max_stack: 0,
            follow: None,
            conditions: Condition::Always,
        }
    }
}
