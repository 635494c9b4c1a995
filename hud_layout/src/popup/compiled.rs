// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hud_primitives::{AnimationType, LayoutAlign, LayoutOffset};

use crate::component::{SpaceFont, WidthComponent};
use crate::condition::Condition;
use crate::renderer::{Cursor, HeadRenderer, ImageRenderer, LayoutComponentContainer, TextRenderer};
use crate::viewer::Viewer;

/// A popup ready to render.
///
/// Built by [`BuildContext::build_popup`](crate::BuildContext::build_popup). Immutable and
/// shareable across threads.
#[derive(Clone, Debug)]
pub struct CompiledPopup {
    pub(crate) name: String,
    pub(crate) conditions: Condition,
    pub(crate) layouts: Vec<CompiledLayout>,
    pub(crate) glyphs: u32,
    pub(crate) spaces: SpaceFont,
}

impl CompiledPopup {
    /// The popup name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled layout groups, in drawing order.
    pub fn layouts(&self) -> &[CompiledLayout] {
        &self.layouts
    }

    /// Number of private-use codepoints the popup allocated.
    pub fn glyph_count(&self) -> u32 {
        self.glyphs
    }

    /// Draws the popup at move location `index` and animation `frame`.
    ///
    /// Every layout is drawn from the popup origin. The result advances by the widest
    /// layout, and is empty when the popup is hidden or `index` is out of range.
    pub fn render(&self, viewer: &dyn Viewer, index: usize, frame: u64) -> WidthComponent {
        if !self.conditions.evaluate(viewer) {
            return WidthComponent::empty();
        }
        let mut cursor = Cursor::new(&self.spaces);
        let mut max = None;
        for layout in &self.layouts {
            let component = layout.render(viewer, index, frame);
            if component.is_empty() {
                continue;
            }
            cursor.draw(&component);
            cursor.advance(-component.width());
            max = Some(max.map_or(component.width(), |max: i32| max.max(component.width())));
        }
        match max {
            Some(max) => {
                cursor.advance(max);
                cursor.finish()
            }
            None => WidthComponent::empty(),
        }
    }
}

/// One layout group of a popup, compiled for every move location and animation frame.
#[derive(Clone, Debug)]
pub struct CompiledLayout {
    pub(crate) conditions: Condition,
    pub(crate) animation: AnimationType,
    /// Indexed by move location, then by animation frame.
    pub(crate) groups: Vec<Vec<CompiledElement>>,
}

impl CompiledLayout {
    /// Number of move locations.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the popup has no move locations.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The animation frames compiled for move location `index`.
    pub fn frames(&self, index: usize) -> &[CompiledElement] {
        self.groups.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draws this layout at move location `index` and animation `frame`.
    ///
    /// Empty when the layout is hidden or `index` is out of range.
    pub fn render(&self, viewer: &dyn Viewer, index: usize, frame: u64) -> WidthComponent {
        if !self.conditions.evaluate(viewer) {
            return WidthComponent::empty();
        }
        let Some(frames) = self.groups.get(index) else {
            return WidthComponent::empty();
        };
        let Some(selected) = self.animation.select(frame, frames.len()) else {
            return WidthComponent::empty();
        };
        frames[selected].render(viewer, frame)
    }
}

/// The images, texts and heads of one layout at one position.
#[derive(Clone, Debug)]
pub struct CompiledElement {
    pub(crate) images: Vec<ImageRenderer>,
    pub(crate) texts: Vec<TextRenderer>,
    pub(crate) heads: Vec<HeadRenderer>,
    pub(crate) offset: LayoutOffset,
    pub(crate) align: LayoutAlign,
    pub(crate) max: i32,
    pub(crate) spaces: SpaceFont,
}

impl CompiledElement {
    /// Image renderers.
    pub fn images(&self) -> &[ImageRenderer] {
        &self.images
    }

    /// Text renderers.
    pub fn texts(&self) -> &[TextRenderer] {
        &self.texts
    }

    /// Head renderers.
    pub fn heads(&self) -> &[HeadRenderer] {
        &self.heads
    }

    /// Widest image, the width elements are aligned in.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Draws images, then texts, then heads.
    pub fn render(&self, viewer: &dyn Viewer, frame: u64) -> WidthComponent {
        LayoutComponentContainer::new(self.offset, self.align, self.max, &self.spaces)
            .append(self.images.iter().map(|image| image.render(viewer, frame)))
            .append(self.texts.iter().map(|text| text.render(viewer)))
            .append(self.heads.iter().map(|head| head.render(viewer)))
            .build()
    }
}
