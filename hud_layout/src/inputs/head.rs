// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hud_primitives::{HeadRenderType, LayoutAlign, PixelLocation};

use super::RenderStyle;
use crate::condition::Condition;
use crate::viewer::FollowTarget;

/// A player head icon.
#[derive(Clone, Debug, Default)]
pub struct HudHead {
    /// Name, used in diagnostics.
    pub name: String,
    /// Edge length of one skin pixel on screen.
    pub pixel: u32,
    /// Hides every use of the head when false.
    pub conditions: Condition,
}

/// A head placed inside a [`LayoutGroup`](super::LayoutGroup).
#[derive(Clone, Debug)]
pub struct HeadLayout {
    /// The head.
    pub head: Arc<HudHead>,
    /// Offset inside the group.
    pub location: PixelLocation,
    /// Shader parameters.
    pub style: RenderStyle,
    /// Horizontal anchoring around the location.
    pub align: LayoutAlign,
    /// Whether the hair layer is drawn as a separate, slightly larger pass.
    pub kind: HeadRenderType,
    /// Draw another viewer's head.
    pub follow: Option<FollowTarget>,
    /// Hides this element when false.
    pub conditions: Condition,
}

impl HeadLayout {
    /// Places `head` at the group origin with default settings.
    pub fn new(head: Arc<HudHead>) -> Self {
        Self {
            head,
            location: PixelLocation::ZERO,
            style: RenderStyle::default(),
            align: LayoutAlign::Left,
            kind: HeadRenderType::Standard,
            follow: None,
            conditions: Condition::Always,
        }
    }
}
