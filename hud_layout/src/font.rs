// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font definition files and the accumulators that build them.
//!
//! Many glyphs share one font file, so bitmap providers are not written as they are
//! registered. They are appended to the accumulator of their font together with the shader
//! they were registered against, and resolved once every shader is known: the shader id is
//! folded into the ascent, which the client-side core shader decodes.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;

use crate::Error;
use crate::component::FontKey;
use crate::pack::{PackPath, PackQueue};
use crate::shader::{ShaderIds, ShaderSlot};

/// Distance between the ascent ranges of consecutive shader ids.
///
/// A glyph registered at ascent `a` against the shader with id `n` is written with ascent
/// `a - (n + 1) * SHADER_ASCENT_STRIDE`. Registered ascents must therefore stay strictly
/// within `±SHADER_ASCENT_STRIDE / 2`.
pub const SHADER_ASCENT_STRIDE: i32 = 1 << 12;

/// One entry of a font definition file, in the client's provider schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FontProvider {
    /// A bitmap drawn for each of `chars`.
    Bitmap {
        /// Texture reference, `namespace:path.png`.
        file: String,
        /// Vertical offset.
        ascent: i32,
        /// Height the bitmap is drawn at.
        height: i32,
        /// One string per bitmap row; each character is one glyph.
        chars: Vec<String>,
    },
    /// Characters that draw nothing and advance by a fixed amount.
    Space {
        /// Advance per character.
        advances: BTreeMap<String, i32>,
    },
}

/// Contents of one font definition file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FontDefinition {
    /// Providers, in registration order.
    pub providers: Vec<FontProvider>,
}

/// Escapes `name` into a valid resource-location path segment.
///
/// ASCII lowercase letters, digits, `_` and `.` pass through; everything else becomes `-`
/// followed by the lowercase hex codepoint and another `-`. The mapping is injective.
///
/// ```
/// use hud_layout::encode_key;
///
/// assert_eq!(encode_key("popup_status"), "popup_status");
/// assert_eq!(encode_key("Boss Bar"), "-42-oss-20--42-ar");
/// ```
pub fn encode_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '.' {
            out.push(ch);
        } else {
            out.push_str(&format!("-{:x}-", u32::from(ch)));
        }
    }
    out
}

/// Handle to a font accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FontHandle(usize);

#[derive(Debug)]
enum PendingProvider {
    Bitmap {
        shader: ShaderSlot,
        ascent: i32,
        file: String,
        height: i32,
        chars: Vec<String>,
    },
    Space {
        advances: Vec<(char, i32)>,
    },
}

#[derive(Debug)]
struct FontAccumulator {
    key: FontKey,
    path: PackPath,
    providers: Vec<PendingProvider>,
}

/// Every font file of a build, in the order they were opened.
#[derive(Debug, Default)]
pub(crate) struct FontAccumulators {
    files: Vec<FontAccumulator>,
    index: HashMap<FontKey, FontHandle>,
}

impl FontAccumulators {
    /// Returns the accumulator for `key`, creating it if needed.
    pub(crate) fn open(&mut self, key: &FontKey, path: PackPath) -> FontHandle {
        if let Some(handle) = self.index.get(key) {
            return *handle;
        }
        let handle = FontHandle(self.files.len());
        self.files.push(FontAccumulator {
            key: key.clone(),
            path,
            providers: Vec::new(),
        });
        self.index.insert(key.clone(), handle);
        handle
    }

    pub(crate) fn contains(&self, key: &FontKey) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn push_bitmap(
        &mut self,
        font: FontHandle,
        shader: ShaderSlot,
        ascent: i32,
        file: String,
        height: i32,
        chars: Vec<String>,
    ) {
        self.files[font.0].providers.push(PendingProvider::Bitmap {
            shader,
            ascent,
            file,
            height,
            chars,
        });
    }

    pub(crate) fn push_space(&mut self, font: FontHandle, ch: char, advance: i32) {
        let providers = &mut self.files[font.0].providers;
        // Consecutive space glyphs share one provider.
        if let Some(PendingProvider::Space { advances }) = providers.last_mut() {
            advances.push((ch, advance));
        } else {
            providers.push(PendingProvider::Space {
                advances: vec![(ch, advance)],
            });
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.files.len()
    }

    /// Resolves every accumulator and queues one file per font.
    pub(crate) fn flush(self, ids: &ShaderIds, queue: &mut PackQueue) -> Result<usize, Error> {
        let mut written = 0;
        for file in self.files {
            if file.providers.is_empty() {
                continue;
            }
            let definition = file.resolve(ids)?;
            if queue.add_json(file.path, definition) {
                written += 1;
            }
        }
        Ok(written)
    }
}

impl FontAccumulator {
    fn resolve(&self, ids: &ShaderIds) -> Result<FontDefinition, Error> {
        let limit = SHADER_ASCENT_STRIDE / 2;
        let mut providers = Vec::with_capacity(self.providers.len());
        for pending in &self.providers {
            providers.push(match pending {
                PendingProvider::Bitmap {
                    shader,
                    ascent,
                    file,
                    height,
                    chars,
                } => {
                    if ascent.abs() >= limit {
                        return Err(Error::ascent_out_of_range(self.key.as_str(), *ascent));
                    }
                    let id = i32::try_from(ids.id(*shader))
                        .ok()
                        .and_then(|id| id.checked_add(1))
                        .and_then(|id| id.checked_mul(SHADER_ASCENT_STRIDE))
                        .ok_or_else(|| Error::ascent_out_of_range(self.key.as_str(), *ascent))?;
                    FontProvider::Bitmap {
                        file: file.clone(),
                        ascent: ascent - id,
                        height: *height,
                        chars: chars.clone(),
                    }
                }
                PendingProvider::Space { advances } => FontProvider::Space {
                    advances: advances
                        .iter()
                        .map(|(ch, advance)| (ch.to_string(), *advance))
                        .collect(),
                },
            });
        }
        Ok(FontDefinition { providers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{HudShader, ShaderTable};
    use hud_primitives::GuiLocation;

    #[test]
    fn bitmap_provider_schema() {
        let definition = FontDefinition {
            providers: vec![FontProvider::Bitmap {
                file: "hud:heart.png".into(),
                ascent: -4092,
                height: 9,
                chars: vec!["\u{F0000}".into()],
            }],
        };
        let json = serde_json::to_string(&definition).unwrap();
        assert_eq!(
            json,
            "{\"providers\":[{\"type\":\"bitmap\",\"file\":\"hud:heart.png\",\"ascent\":-4092,\"height\":9,\"chars\":[\"\u{F0000}\"]}]}"
        );
    }

    #[test]
    fn space_provider_schema() {
        let provider = FontProvider::Space {
            advances: [("\u{E000}".to_string(), -1)].into_iter().collect(),
        };
        let json = serde_json::to_string(&provider).unwrap();
        assert_eq!(json, "{\"type\":\"space\",\"advances\":{\"\u{E000}\":-1}}");
    }

    #[test]
    fn encode_key_is_injective_on_case() {
        assert_ne!(encode_key("Heart"), encode_key("heart"));
        assert_eq!(encode_key("a-b"), "a-2d-b");
        assert_eq!(encode_key("pixel_4"), "pixel_4");
    }

    #[test]
    fn ascent_carries_shader_id() {
        let mut shaders = ShaderTable::default();
        let mut top = HudShader::new(GuiLocation::ZERO);
        top.layer = 2;
        let top_slot = shaders.intern(&top);
        let base_slot = shaders.intern(&HudShader::new(GuiLocation::ZERO));

        let mut fonts = FontAccumulators::default();
        let key = FontKey::new("hud", "popup/status");
        let font = fonts.open(&key, vec!["font.json".into()]);
        assert_eq!(fonts.open(&key, vec!["other.json".into()]), font);
        fonts.push_bitmap(font, top_slot, 3, "hud:a.png".into(), 8, vec!["a".into()]);
        fonts.push_bitmap(font, base_slot, 3, "hud:b.png".into(), 8, vec!["b".into()]);

        let ids = shaders.assign_ids();
        let definition = fonts.files[0].resolve(&ids).unwrap();
        let ascents: Vec<i32> = definition
            .providers
            .iter()
            .map(|provider| match provider {
                FontProvider::Bitmap { ascent, .. } => *ascent,
                FontProvider::Space { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(
            ascents,
            [3 - 2 * SHADER_ASCENT_STRIDE, 3 - SHADER_ASCENT_STRIDE]
        );
    }

    #[test]
    fn oversized_ascent_is_rejected() {
        let mut shaders = ShaderTable::default();
        let slot = shaders.intern(&HudShader::new(GuiLocation::ZERO));
        let mut fonts = FontAccumulators::default();
        let font = fonts.open(&FontKey::new("hud", "x"), vec!["x.json".into()]);
        fonts.push_bitmap(
            font,
            slot,
            SHADER_ASCENT_STRIDE / 2,
            "hud:a.png".into(),
            8,
            vec!["a".into()],
        );
        let err = fonts.files[0].resolve(&shaders.assign_ids()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::AscentOutOfRange);
    }

    #[test]
    fn consecutive_spaces_share_a_provider() {
        let mut fonts = FontAccumulators::default();
        let font = fonts.open(&FontKey::new("hud", "x"), vec!["x.json".into()]);
        fonts.push_space(font, '\u{F0000}', -1);
        fonts.push_space(font, '\u{F0001}', -33);
        let definition = fonts.files[0]
            .resolve(&ShaderTable::default().assign_ids())
            .unwrap();
        assert_eq!(definition.providers.len(), 1);
    }
}
