// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build state shared by every popup of one pack.

use std::collections::BTreeSet;

use hashbrown::HashSet;
use serde::Serialize;

use crate::Error;
use crate::cache::{CacheKind, CacheStats, InternCache};
use crate::component::{FontKey, SpaceFont, WidthComponent};
use crate::config::BuildConfig;
use crate::font::{FontAccumulators, FontDefinition, FontHandle, FontProvider, encode_key};
use crate::inputs::Popup;
use crate::pack::{PackPath, PackQueue, pack_path};
use crate::popup::{CompiledPopup, PopupBuilder};
use crate::renderer::HeadGlyph;
use crate::shader::{HudShader, ShaderProperties, ShaderTable};

/// Owns everything a pack build accumulates: the interning caches, the shader table, the
/// font accumulators and the pack queue.
///
/// Build every popup with [`build_popup`](Self::build_popup), then call
/// [`finish`](Self::finish) to flush fonts and obtain the queue of pack files. The compiled
/// popups stay valid after `finish` and are used to render.
#[derive(Debug)]
pub struct BuildContext {
    pub(crate) config: BuildConfig,
    pub(crate) spaces: SpaceFont,
    pub(crate) images: InternCache<WidthComponent>,
    pub(crate) texts: InternCache<FontKey>,
    pub(crate) heads: InternCache<HeadGlyph>,
    pub(crate) shaders: ShaderTable,
    pub(crate) fonts: FontAccumulators,
    pub(crate) head_pixels: BTreeSet<u32>,
    queue: PackQueue,
    popups: HashSet<String>,
}

impl BuildContext {
    /// Creates an empty build after validating `config`.
    pub fn new(config: BuildConfig) -> Result<Self, Error> {
        config.validate()?;
        let spaces = SpaceFont::new(FontKey::new(&config.namespace, "space"), config.max_space);
        Ok(Self {
            config,
            spaces,
            images: InternCache::new(CacheKind::Image),
            texts: InternCache::new(CacheKind::Text),
            heads: InternCache::new(CacheKind::Head),
            shaders: ShaderTable::default(),
            fonts: FontAccumulators::default(),
            head_pixels: BTreeSet::new(),
            queue: PackQueue::new(),
            popups: HashSet::new(),
        })
    }

    /// The configuration this build was created with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// The pack-wide space font.
    pub fn space_font(&self) -> &SpaceFont {
        &self.spaces
    }

    /// Usage statistics of one of the interning caches.
    pub fn cache_stats(&self, kind: CacheKind) -> CacheStats {
        match kind {
            CacheKind::Image => self.images.stats(),
            CacheKind::Text => self.texts.stats(),
            CacheKind::Head => self.heads.stats(),
        }
    }

    /// Number of distinct shaders registered so far.
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Number of font files opened so far.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Whether a font with `key` has been opened.
    pub fn has_font(&self, key: &FontKey) -> bool {
        self.fonts.contains(key)
    }

    /// Compiles `popup`, registering every glyph it needs.
    ///
    /// Popup names are unique within a build.
    pub fn build_popup(&mut self, popup: &Popup) -> Result<CompiledPopup, Error> {
        if !self.popups.insert(popup.name.clone()) {
            return Err(Error::duplicate_popup(&popup.name));
        }
        let compiled = PopupBuilder::new(self, popup).build()?;
        log::debug!(
            "built popup `{}`: {} layouts, {} glyphs",
            popup.name,
            compiled.layouts().len(),
            compiled.glyph_count()
        );
        Ok(compiled)
    }

    /// Queues an extra pack file. See [`PackQueue::add_task`].
    pub fn add_task(
        &mut self,
        path: PackPath,
        producer: impl FnOnce() -> Result<Vec<u8>, Error> + Send + 'static,
    ) -> bool {
        self.queue.add_task(path, producer)
    }

    /// Opens the accumulator for the font file of `key`.
    pub(crate) fn open_font(&mut self, key: &FontKey) -> FontHandle {
        let path = pack_path(&format!(
            "assets/{}/font/{}.json",
            key.namespace(),
            key.path()
        ));
        self.fonts.open(key, path)
    }

    /// Appends a bitmap provider to `font`, to be drawn with `shader` at `ascent`.
    pub(crate) fn register_bitmap(
        &mut self,
        font: FontHandle,
        shader: &HudShader,
        ascent: i32,
        file: String,
        height: i32,
        chars: Vec<String>,
    ) {
        let slot = self.shaders.intern(shader);
        self.fonts.push_bitmap(font, slot, ascent, file, height, chars);
    }

    /// `namespace:name` for a texture.
    pub(crate) fn texture(&self, name: &str) -> String {
        format!("{}:{name}", self.config.namespace)
    }

    /// Resolves every font, writes the shared files and returns the complete queue.
    pub fn finish(mut self) -> Result<PackQueue, Error> {
        let namespace = self.config.namespace.clone();
        let ids = self.shaders.assign_ids();
        let fonts = core::mem::take(&mut self.fonts).flush(&ids, &mut self.queue)?;

        let space = FontDefinition {
            providers: vec![FontProvider::Space {
                advances: self
                    .spaces
                    .advances()
                    .map(|(ch, advance)| (ch.to_string(), advance))
                    .collect(),
            }],
        };
        self.queue.add_json(
            pack_path(&format!("assets/{namespace}/font/{}.json", self.spaces.key().path())),
            space,
        );

        let table: Vec<ShaderEntry> = ids
            .in_order()
            .map(|(id, index)| ShaderEntry::new(id, self.shaders.get(index)))
            .collect();
        let shader_count = table.len();
        self.queue.add_json(
            pack_path(&format!("assets/{namespace}/shaders/hud_shaders.json")),
            ShaderTableFile { shaders: table },
        );

        for size in &self.head_pixels {
            let size = *size;
            let file = format!(
                "assets/{namespace}/textures/{}.png",
                encode_key(&format!("pixel_{size}"))
            );
            let path = pack_path(&file);
            self.queue.add_task(path, move || encode_pixel_png(&file, size));
        }

        for kind in [CacheKind::Image, CacheKind::Text, CacheKind::Head] {
            let stats = self.cache_stats(kind);
            log::debug!(
                "{kind:?} cache: {} entries, {} hits, {} misses",
                stats.entries,
                stats.hits,
                stats.misses
            );
        }
        log::info!(
            "pack build finished: {fonts} font files, {shader_count} shaders, {} files queued",
            self.queue.len()
        );
        Ok(self.queue)
    }
}

#[derive(Serialize)]
struct ShaderTableFile {
    shaders: Vec<ShaderEntry>,
}

#[derive(Serialize)]
struct ShaderEntry {
    id: u32,
    gui: [f64; 2],
    render_scale: f64,
    layer: i32,
    outline: bool,
    opacity: f64,
    properties: ShaderProperties,
}

impl ShaderEntry {
    fn new(id: u32, shader: &HudShader) -> Self {
        Self {
            id,
            gui: [shader.gui.x, shader.gui.y],
            render_scale: shader.render_scale,
            layer: shader.layer,
            outline: shader.outline,
            opacity: shader.opacity,
            properties: shader.properties.clone(),
        }
    }
}

/// A white `size`×`size` texture; head glyphs tint it per skin pixel.
fn encode_pixel_png(file: &str, size: u32) -> Result<Vec<u8>, Error> {
    let side = size as usize;
    let data = vec![0xFF_u8; side * side * 4];
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, size, size);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|err| Error::serialization(file, err))?;
    writer
        .write_image_data(&data)
        .map_err(|err| Error::serialization(file, err))?;
    writer
        .finish()
        .map_err(|err| Error::serialization(file, err))?;
    Ok(bytes)
}
