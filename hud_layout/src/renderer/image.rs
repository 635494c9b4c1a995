// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hud_primitives::{AnimationType, Rgb};

use crate::component::{PixelComponent, SpaceFont};
use crate::condition::Condition;
use crate::inputs::ImageListener;
use crate::util::round_px;
use crate::viewer::{FollowTarget, Viewer, resolve_viewer};

/// A compiled image element.
#[derive(Clone, Debug)]
pub struct ImageRenderer {
    /// Frames in selection order. With a listener, index 0 is an empty frame.
    pub(crate) frames: Vec<PixelComponent>,
    pub(crate) listener: Option<ImageListener>,
    pub(crate) color: Option<Rgb>,
    pub(crate) space: i32,
    pub(crate) stack: Option<String>,
    pub(crate) max_stack: u32,
    pub(crate) follow: Option<FollowTarget>,
    pub(crate) conditions: Condition,
    pub(crate) spaces: SpaceFont,
}

impl ImageRenderer {
    /// The selectable frames.
    pub fn frames(&self) -> &[PixelComponent] {
        &self.frames
    }

    /// Widest rendering across frames, counting the maximum number of stacked copies.
    pub fn max(&self) -> i32 {
        let copies = match self.stack {
            Some(_) => i32::try_from(self.max_stack.max(1)).unwrap_or(i32::MAX),
            None => 1,
        };
        self.frames
            .iter()
            .map(|frame| {
                frame
                    .component
                    .width()
                    .saturating_mul(copies)
                    .saturating_add(self.space.saturating_mul(copies - 1))
            })
            .max()
            .unwrap_or(0)
    }

    /// Draws the image for `viewer` at animation `frame`.
    pub fn render(&self, viewer: &dyn Viewer, frame: u64) -> PixelComponent {
        let Some(viewer) = resolve_viewer(self.follow.as_ref(), viewer) else {
            return PixelComponent::empty();
        };
        if !self.conditions.evaluate(viewer) {
            return PixelComponent::empty();
        }
        let Some(selected) = self.select(viewer, frame) else {
            return PixelComponent::empty();
        };
        if selected.is_empty() {
            return PixelComponent::empty();
        }

        let copies = match &self.stack {
            Some(name) => self.stack_count(viewer, name),
            None => 1,
        };
        if copies == 0 {
            return PixelComponent::empty();
        }
        let mut component = selected.component.clone();
        for _ in 1..copies {
            component += self.spaces.of(self.space);
            component += &selected.component;
        }
        if let Some(color) = self.color {
            component = component.with_color(color);
        }
        component.at(selected.pixel)
    }

    fn select(&self, viewer: &dyn Viewer, frame: u64) -> Option<&PixelComponent> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }
        let index = match &self.listener {
            Some(listener) => {
                let ratio = listener_ratio(listener, viewer).unwrap_or(0.0);
                let last = u32::try_from(len - 1).unwrap_or(u32::MAX);
                usize::try_from(round_px(ratio * f64::from(last))).unwrap_or(0)
            }
            None => AnimationType::Loop.select(frame, len)?,
        };
        self.frames.get(index)
    }

    fn stack_count(&self, viewer: &dyn Viewer, name: &str) -> u32 {
        let value = viewer
            .placeholder(name)
            .and_then(|value| value.as_number())
            .unwrap_or(0.0);
        let value = value.clamp(0.0, f64::from(self.max_stack));
        u32::try_from(round_px(value.floor())).unwrap_or(0)
    }
}

fn listener_ratio(listener: &ImageListener, viewer: &dyn Viewer) -> Option<f64> {
    let value = viewer.placeholder(&listener.value)?.as_number()?;
    let ratio = match &listener.max {
        Some(max) => {
            let max = viewer.placeholder(max)?.as_number()?;
            if max == 0.0 {
                return Some(0.0);
            }
            value / max
        }
        None => value,
    };
    ratio.is_finite().then(|| ratio.clamp(0.0, 1.0))
}
