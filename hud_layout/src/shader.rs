// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical render-parameter keys.
//!
//! Two glyph registrations with equal [`ShaderGroup`]s are visually identical and share one
//! font character. Floating point parameters take part in equality through their bit
//! patterns, so `1.5` and `1.5` collide while `1.5` and `1.500001` do not.

use core::hash::{Hash, Hasher};
use std::sync::Arc;

use hashbrown::HashMap;
use hud_primitives::GuiLocation;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

/// Canonical bit pattern of a float: `-0.0` folds onto `0.0` and every NaN onto one NaN.
#[inline]
pub(crate) fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// Arbitrary shader extension data, kept sorted by key.
///
/// Inserting an existing key replaces its value, so the same set of properties always has the
/// same representation regardless of the order it was written in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShaderProperties(SmallVec<[(Arc<str>, Arc<str>); 2]>);

impl ShaderProperties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn insert(&mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) {
        let key = key.into();
        let value = value.into();
        match self.0.binary_search_by(|(k, _)| k.as_ref().cmp(key.as_ref())) {
            Ok(index) => self.0[index].1 = value,
            Err(index) => self.0.insert(index, (key, value)),
        }
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .binary_search_by(|(k, _)| k.as_ref().cmp(key))
            .ok()
            .map(|index| self.0[index].1.as_ref())
    }

    /// Iterates over the properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<Arc<str>>, V: Into<Arc<str>>> FromIterator<(K, V)> for ShaderProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

impl Serialize for ShaderProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Rendering parameters of one visual primitive.
#[derive(Clone, Debug)]
pub struct HudShader {
    /// Screen anchor the glyph is drawn relative to.
    pub gui: GuiLocation,
    /// Scale applied by the client shader.
    pub render_scale: f64,
    /// Z-order; higher layers draw over lower ones.
    pub layer: i32,
    /// Whether the glyph is drawn with an outline.
    pub outline: bool,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Extension data for the client shader.
    pub properties: ShaderProperties,
}

impl HudShader {
    /// Creates a shader at `gui` with default parameters.
    pub fn new(gui: GuiLocation) -> Self {
        Self {
            gui,
            render_scale: 1.0,
            layer: 0,
            outline: false,
            opacity: 1.0,
            properties: ShaderProperties::new(),
        }
    }
}

impl Hash for HudShader {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        float_bits(self.gui.x).hash(state);
        float_bits(self.gui.y).hash(state);
        float_bits(self.render_scale).hash(state);
        self.layer.hash(state);
        self.outline.hash(state);
        float_bits(self.opacity).hash(state);
        self.properties.hash(state);
    }
}

impl PartialEq for HudShader {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        float_bits(self.gui.x) == float_bits(other.gui.x)
            && float_bits(self.gui.y) == float_bits(other.gui.y)
            && float_bits(self.render_scale) == float_bits(other.render_scale)
            && self.layer == other.layer
            && self.outline == other.outline
            && float_bits(self.opacity) == float_bits(other.opacity)
            && self.properties == other.properties
    }
}

impl Eq for HudShader {}

/// Full identity of one bitmap registration.
///
/// `content` names what is drawn: an image file reference, a text font name or a head pixel
/// file reference.
#[derive(Clone, Debug)]
pub struct ShaderGroup {
    /// Rendering parameters.
    pub shader: HudShader,
    /// What is drawn.
    pub content: Arc<str>,
    /// Scale of the bitmap itself.
    pub scale: f64,
    /// Vertical offset of the glyph.
    pub ascent: i32,
}

impl ShaderGroup {
    /// Creates a key.
    pub fn new(shader: HudShader, content: impl Into<Arc<str>>, scale: f64, ascent: i32) -> Self {
        Self {
            shader,
            content: content.into(),
            scale,
            ascent,
        }
    }
}

impl Hash for ShaderGroup {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shader.hash(state);
        self.content.hash(state);
        float_bits(self.scale).hash(state);
        self.ascent.hash(state);
    }
}

impl PartialEq for ShaderGroup {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.shader == other.shader
            && self.content == other.content
            && float_bits(self.scale) == float_bits(other.scale)
            && self.ascent == other.ascent
    }
}

impl Eq for ShaderGroup {}

/// Index of a shader in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ShaderSlot(u32);

/// Interns every shader that had a bitmap registered against it.
#[derive(Debug, Default)]
pub(crate) struct ShaderTable {
    shaders: Vec<HudShader>,
    slots: HashMap<HudShader, ShaderSlot>,
}

impl ShaderTable {
    pub(crate) fn intern(&mut self, shader: &HudShader) -> ShaderSlot {
        if let Some(slot) = self.slots.get(shader) {
            return *slot;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a pack cannot hold anywhere near u32::MAX shaders"
        )]
        let slot = ShaderSlot(self.shaders.len() as u32);
        self.shaders.push(shader.clone());
        self.slots.insert(shader.clone(), slot);
        slot
    }

    pub(crate) fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Assigns final ids: ordered by layer, then by registration order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bounded by the slot count, which fits in u32"
    )]
    pub(crate) fn assign_ids(&self) -> ShaderIds {
        let mut order: Vec<usize> = (0..self.shaders.len()).collect();
        order.sort_by_key(|&index| (self.shaders[index].layer, index));
        let mut ids = vec![0_u32; self.shaders.len()];
        for (id, index) in order.iter().enumerate() {
            ids[*index] = id as u32;
        }
        ShaderIds { ids, order }
    }

    pub(crate) fn get(&self, index: usize) -> &HudShader {
        &self.shaders[index]
    }
}

/// Final shader ids, fixed once the build is complete.
#[derive(Debug)]
pub(crate) struct ShaderIds {
    ids: Vec<u32>,
    /// Slot indices in id order.
    order: Vec<usize>,
}

impl ShaderIds {
    pub(crate) fn id(&self, slot: ShaderSlot) -> u32 {
        self.ids[slot.0 as usize]
    }

    /// Slot indices in id order.
    pub(crate) fn in_order(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.order.iter().enumerate().map(|(id, index)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "bounded by the slot count, which fits in u32"
            )]
            let id = id as u32;
            (id, *index)
        })
    }
}
