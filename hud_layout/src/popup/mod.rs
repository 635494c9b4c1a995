// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiles popups into renderers.
//!
//! Compilation walks popup → layout group → move location → animation frame → element and
//! registers the glyphs of every image, text line and head row on the way. Registrations
//! go through the interning caches of the [`BuildContext`], so identical glyphs requested by
//! different layouts, or different popups, resolve to one character.

mod compiled;

pub use compiled::{CompiledElement, CompiledLayout, CompiledPopup};

use hashbrown::HashMap;
use hud_primitives::{GuiLocation, HeadRenderType, PixelLocation};

use crate::Error;
use crate::cache::InternCache;
use crate::chars::CharAllocator;
use crate::component::{FontKey, WidthComponent};
use crate::config::DefaultEmoji;
use crate::context::BuildContext;
use crate::font::{FontHandle, encode_key};
use crate::inputs::{HeadLayout, ImageLayout, LocationGroup, Popup, PopupLayout, TextLayout};
use crate::renderer::{
    HeadGlyph, HeadRenderer, ImageRenderer, InlineGlyph, TextRenderer, parse_pattern,
};
use crate::shader::{HudShader, ShaderGroup};
use crate::util::{round_px, scale_px};

/// Scale of the hair pass of a fancy head, relative to the face.
const FANCY_HAIR_SCALE: f64 = 1.125;

/// `base + index * step`, failing when it leaves the `i32` range.
fn stepped_ascent(subject: &str, base: i32, index: i32, step: i32) -> Result<i32, Error> {
    index
        .checked_mul(step)
        .and_then(|offset| base.checked_add(offset))
        .ok_or_else(|| Error::ascent_overflow(subject))
}

/// Per-popup build state.
pub(crate) struct PopupBuilder<'a> {
    cx: &'a mut BuildContext,
    popup: &'a Popup,
    chars: CharAllocator,
    /// Font directory of this popup, relative to `assets/<namespace>/font/`.
    dir: String,
    image_font: FontKey,
    image_handle: FontHandle,
    /// Negative-space glyphs in the image font, by advance.
    negative: HashMap<i32, WidthComponent>,
    text_index: usize,
}

impl<'a> PopupBuilder<'a> {
    pub(crate) fn new(cx: &'a mut BuildContext, popup: &'a Popup) -> Self {
        let dir = format!("{}/{}", cx.config.font_directory, encode_key(&popup.name));
        let image_font = FontKey::new(&cx.config.namespace, &format!("{dir}/image"));
        let image_handle = cx.open_font(&image_font);
        Self {
            cx,
            popup,
            chars: CharAllocator::new(popup.name.as_str()),
            dir,
            image_font,
            image_handle,
            negative: HashMap::new(),
            text_index: 0,
        }
    }

    pub(crate) fn build(mut self) -> Result<CompiledPopup, Error> {
        let popup = self.popup;
        let mut layouts = Vec::with_capacity(popup.layouts.len());
        for layout in &popup.layouts {
            layouts.push(self.layout(layout)?);
        }
        Ok(CompiledPopup {
            name: popup.name.clone(),
            conditions: popup.conditions.clone(),
            layouts,
            glyphs: self.chars.allocated(),
            spaces: self.cx.spaces.clone(),
        })
    }

    fn layout(&mut self, def: &PopupLayout) -> Result<CompiledLayout, Error> {
        let layout = &def.layout;
        let mut groups = Vec::with_capacity(self.popup.move_locations.len());
        for pair in &self.popup.move_locations {
            let mut frames = Vec::with_capacity(layout.animation.locations.len());
            for location in &layout.animation.locations {
                frames.push(self.element(def, pair, *location)?);
            }
            groups.push(frames);
        }
        Ok(CompiledLayout {
            conditions: layout.conditions.clone(),
            animation: layout.animation.kind,
            groups,
        })
    }

    fn element(
        &mut self,
        def: &PopupLayout,
        pair: &LocationGroup,
        location: PixelLocation,
    ) -> Result<CompiledElement, Error> {
        let layout = &def.layout;
        let gui = pair.gui + self.popup.gui + def.gui;
        // The move location applies after the animation frame, so its opacity overrides the
        // frame's. The element's own location is added last.
        let pixel = def.pixel + location + pair.pixel;

        let mut images = Vec::with_capacity(layout.images.len());
        for target in &layout.images {
            images.push(self.image(target, gui, pixel)?);
        }
        let max = images.iter().map(ImageRenderer::max).max().unwrap_or(0);
        let mut texts = Vec::with_capacity(layout.texts.len());
        for target in &layout.texts {
            texts.push(self.text(target, gui, pixel)?);
        }
        let mut heads = Vec::with_capacity(layout.heads.len());
        for target in &layout.heads {
            heads.push(self.head(target, gui, pixel)?);
        }
        Ok(CompiledElement {
            images,
            texts,
            heads,
            offset: layout.offset,
            align: layout.align,
            max,
            spaces: self.cx.spaces.clone(),
        })
    }

    fn image(
        &mut self,
        target: &ImageLayout,
        gui: GuiLocation,
        origin: PixelLocation,
    ) -> Result<ImageRenderer, Error> {
        let image = &target.image;
        if image.frames.is_empty() {
            return Err(Error::missing_asset(&image.name, "image has no frames"));
        }
        if image.frames.iter().any(|frame| frame.height == 0) {
            return Err(Error::missing_asset(&image.name, "image frame has no height"));
        }
        let pixel = origin + target.location;
        let shader = target.style.shader(gui, pixel.opacity);
        let ascent = pixel.y;

        let mut frames = Vec::with_capacity(image.frames.len() + 1);
        if image.listener.is_some() {
            frames.push(WidthComponent::empty().at(0));
        }
        if let [frame] = image.frames.as_slice() {
            // A lone frame is never shared: it gets a fresh glyph and no offset correction.
            let file = self.cx.texture(&frame.file);
            let height = scale_px(frame.height, target.scale);
            let width = scale_px(frame.width, target.scale);
            let component = self.image_glyph(&shader, ascent, file, height, width)?;
            frames.push(component.at(pixel.x));
        } else {
            for frame in &image.frames {
                let file = self.cx.texture(&frame.file);
                let height = scale_px(frame.height, target.scale);
                let scale = f64::from(height) / f64::from(frame.height);
                let x_offset = round_px(f64::from(frame.x_offset) * scale);
                let width = scale_px(frame.width, scale);
                let key = ShaderGroup::new(shader.clone(), file.as_str(), target.scale, ascent);
                let component = self.intern(
                    |cx| &mut cx.images,
                    key,
                    |builder| builder.image_glyph(&shader, ascent, file, height, width),
                )?;
                frames.push(component.at(pixel.x + x_offset));
            }
        }

        Ok(ImageRenderer {
            frames,
            listener: image.listener.clone(),
            color: target.color,
            space: target.space,
            stack: target.stack.clone(),
            max_stack: target.max_stack,
            follow: target.follow.clone(),
            conditions: image.conditions.clone().and(target.conditions.clone()),
            spaces: self.cx.spaces.clone(),
        })
    }

    /// Registers one image bitmap. Its advance is `width + 1`, so a one pixel step back
    /// follows it.
    fn image_glyph(
        &mut self,
        shader: &HudShader,
        ascent: i32,
        file: String,
        height: i32,
        width: i32,
    ) -> Result<WidthComponent, Error> {
        let ch = self.next_char()?;
        self.cx.register_bitmap(
            self.image_handle,
            shader,
            ascent,
            file,
            height,
            vec![ch.to_string()],
        );
        let glyph = WidthComponent::glyph(&self.image_font, ch, width.saturating_add(1));
        Ok(glyph + self.cx.spaces.of(-1))
    }

    fn text(
        &mut self,
        target: &TextLayout,
        gui: GuiLocation,
        origin: PixelLocation,
    ) -> Result<TextRenderer, Error> {
        let text = &target.text;
        if text.sheets.is_empty() {
            return Err(Error::missing_asset(&text.name, "text has no glyph sheets"));
        }
        let pixel = origin + target.location;
        let shader = target.style.shader(gui, pixel.opacity);
        self.text_index += 1;
        let index = self.text_index;

        let mut images = HashMap::with_capacity(text.images.len());
        for (codepoint, image) in &text.images {
            let ch = char::from_u32(*codepoint).ok_or_else(|| {
                Error::missing_asset(&image.name, "image glyph has an invalid codepoint")
            })?;
            images.insert(
                image.name.clone(),
                InlineGlyph {
                    ch,
                    advance: scale_px(image.width, target.scale).saturating_add(1),
                    x: image.location.x,
                },
            );
        }
        let mut emoji = Vec::new();
        if self.cx.config.load_default_textures {
            let mut chars =
                CharAllocator::for_text_images(text.name.as_str(), text.images.keys().copied());
            for default in &self.cx.config.default_emoji {
                let ch = chars.next()?;
                images
                    .entry(default.name.clone())
                    .or_insert(InlineGlyph {
                        ch,
                        advance: scale_px(default.width, target.emoji_scale).saturating_add(1),
                        x: target.emoji_location.x,
                    });
                emoji.push((default.clone(), ch));
            }
        }

        let mut lines = Vec::new();
        for line in 0..target.line {
            let line = i32::try_from(line).unwrap_or(i32::MAX);
            let ascent = stepped_ascent(&text.name, pixel.y, line, target.line_width)?;
            let key = ShaderGroup::new(shader.clone(), text.name.as_str(), target.scale, ascent);
            let font = self.intern(
                |cx| &mut cx.texts,
                key,
                |builder| builder.text_font(target, &shader, ascent, index, line, &emoji),
            )?;
            lines.push(font);
        }

        Ok(TextRenderer {
            text: text.clone(),
            lines,
            images,
            pattern: parse_pattern(&target.pattern),
            color: target.color,
            align: target.align,
            line_align: target.line_align,
            scale: target.scale,
            x: pixel.x,
            split_width: target.split_width,
            space: target.space,
            number_equation: target.number_equation,
            number_format: target.number_format,
            disable_number_format: target.disable_number_format,
            use_legacy_format: target.use_legacy_format,
            follow: target.follow.clone(),
            conditions: target.conditions.clone().and(text.conditions.clone()),
            spaces: self.cx.spaces.clone(),
        })
    }

    /// Writes the font of one text line: the glyph sheets, the embedded images and the
    /// default emoji, all at the line's ascent.
    fn text_font(
        &mut self,
        target: &TextLayout,
        shader: &HudShader,
        ascent: i32,
        index: usize,
        line: i32,
        emoji: &[(DefaultEmoji, char)],
    ) -> Result<FontKey, Error> {
        let text = &target.text;
        let name = encode_key(&format!("text_{index}_{line}"));
        let key = FontKey::new(&self.cx.config.namespace, &format!("{}/{name}", self.dir));
        let font = self.cx.open_font(&key);

        for sheet in &text.sheets {
            let file = self.cx.texture(&sheet.file);
            let height = scale_px(sheet.height, target.scale);
            self.cx
                .register_bitmap(font, shader, ascent, file, height, sheet.chars.clone());
        }
        for (codepoint, image) in &text.images {
            let Some(ch) = char::from_u32(*codepoint) else {
                continue;
            };
            let file = self.cx.texture(&format!(
                "{}.png",
                encode_key(&format!("glyph_{}", image.name))
            ));
            let height = scale_px(image.height, target.scale);
            self.cx.register_bitmap(
                font,
                shader,
                ascent.saturating_add(image.location.y),
                file,
                height,
                vec![ch.to_string()],
            );
        }
        for (default, ch) in emoji {
            let file = self.cx.texture(&default.file);
            let height = scale_px(default.height, target.emoji_scale);
            self.cx.register_bitmap(
                font,
                shader,
                ascent.saturating_add(target.emoji_location.y),
                file,
                height,
                vec![ch.to_string()],
            );
        }
        Ok(key)
    }

    fn head(
        &mut self,
        target: &HeadLayout,
        gui: GuiLocation,
        origin: PixelLocation,
    ) -> Result<HeadRenderer, Error> {
        let head = &target.head;
        let pixel_size = i32::try_from(head.pixel)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| Error::missing_asset(&head.name, "head has no pixel size"))?;
        let overflow = || Error::ascent_overflow(&head.name);
        let rewind = pixel_size
            .checked_mul(8)
            .and_then(|width| width.checked_add(1))
            .ok_or_else(overflow)?;
        let row_back = pixel_size.checked_add(1).ok_or_else(overflow)?;
        let pixel = origin + target.location;
        let shader = target.style.shader(gui, pixel.opacity);
        let hair_shader = match target.kind {
            HeadRenderType::Standard => None,
            HeadRenderType::Fancy => Some(HudShader {
                render_scale: shader.render_scale * FANCY_HAIR_SCALE,
                layer: shader.layer.saturating_add(1),
                outline: true,
                ..shader.clone()
            }),
        };
        self.cx.head_pixels.insert(head.pixel);
        let file = self
            .cx
            .texture(&format!("{}.png", encode_key(&format!("pixel_{}", head.pixel))));

        let mut rows = Vec::with_capacity(8);
        for row in 0..8 {
            let ascent = stepped_ascent(&head.name, pixel.y, row, pixel_size)?;
            let main = self.head_glyph(&shader, &file, ascent, pixel_size)?;
            let hair = match &hair_shader {
                // The hair overlay sits one skin pixel higher than the face.
                Some(hair_shader) => {
                    let hair_ascent = ascent.checked_sub(pixel_size).ok_or_else(overflow)?;
                    self.head_glyph(hair_shader, &file, hair_ascent, pixel_size)?
                }
                None => main.clone(),
            };
            rows.push((main, hair));
        }

        Ok(HeadRenderer {
            rows,
            pixel: pixel_size,
            back_one: self.negative_space(-1)?,
            rewind: self.negative_space(-rewind)?,
            row_back: self.negative_space(-row_back)?,
            x: pixel.x,
            align: target.align,
            kind: target.kind,
            follow: target.follow.clone(),
            conditions: target.conditions.clone().and(head.conditions.clone()),
            spaces: self.cx.spaces.clone(),
        })
    }

    fn head_glyph(
        &mut self,
        shader: &HudShader,
        file: &str,
        ascent: i32,
        size: i32,
    ) -> Result<HeadGlyph, Error> {
        let key = ShaderGroup::new(shader.clone(), file, 1.0, ascent);
        self.intern(
            |cx| &mut cx.heads,
            key,
            |builder| {
                let ch = builder.next_char()?;
                builder.cx.register_bitmap(
                    builder.image_handle,
                    shader,
                    ascent,
                    file.to_owned(),
                    size,
                    vec![ch.to_string()],
                );
                Ok(HeadGlyph {
                    font: builder.image_font.clone(),
                    ch,
                })
            },
        )
    }

    /// A glyph in the image font that moves the cursor by `width`, created on first use.
    fn negative_space(&mut self, width: i32) -> Result<WidthComponent, Error> {
        if let Some(component) = self.negative.get(&width) {
            return Ok(component.clone());
        }
        let ch = self.next_char()?;
        self.cx.fonts.push_space(self.image_handle, ch, width);
        let component = WidthComponent::glyph(&self.image_font, ch, width);
        self.negative.insert(width, component.clone());
        Ok(component)
    }

    fn next_char(&mut self) -> Result<char, Error> {
        let ch = self.chars.next()?;
        log::debug!("popup `{}`: allocated U+{:X}", self.popup.name, u32::from(ch));
        Ok(ch)
    }

    /// Looks `key` up in the cache chosen by `select`, running `build` on a miss only.
    fn intern<V: Clone>(
        &mut self,
        select: fn(&mut BuildContext) -> &mut InternCache<V>,
        key: ShaderGroup,
        build: impl FnOnce(&mut Self) -> Result<V, Error>,
    ) -> Result<V, Error> {
        if let Some(value) = select(self.cx).get(&key) {
            return Ok(value);
        }
        log::debug!(
            "{:?} cache miss for `{}` at ascent {}",
            select(self.cx).kind(),
            key.content,
            key.ascent
        );
        let value = build(self)?;
        select(self.cx).insert(key, value.clone());
        Ok(value)
    }
}
