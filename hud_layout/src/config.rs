// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build configuration.

use hashbrown::HashSet;
use serde::Deserialize;

use crate::Error;
use crate::component::MAX_SPACE_LIMIT;

/// Settings shared by every popup of one pack build.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use hud_layout::BuildConfig;
///
/// let config: BuildConfig = serde_json::from_str(r#"{ "namespace": "overlay" }"#).unwrap();
/// assert_eq!(config.namespace, "overlay");
/// assert_eq!(config.font_directory, "popup");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Resource namespace every generated asset lives in.
    pub namespace: String,
    /// Directory under `assets/<namespace>/font/` that popup fonts are written to.
    pub font_directory: String,
    /// Largest advance of a single character in the space font.
    pub max_space: i32,
    /// Whether text fonts embed [`default_emoji`](Self::default_emoji).
    pub load_default_textures: bool,
    /// Emoji added to every text font when
    /// [`load_default_textures`](Self::load_default_textures) is set.
    pub default_emoji: Vec<DefaultEmoji>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            namespace: "hud".into(),
            font_directory: "popup".into(),
            max_space: 2048,
            load_default_textures: false,
            default_emoji: Vec::new(),
        }
    }
}

/// A texture that text can reference as `:name:`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DefaultEmoji {
    /// Token name.
    pub name: String,
    /// Texture path relative to `assets/<namespace>/textures/`, including the extension.
    pub file: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl BuildConfig {
    /// Checks that every generated path and glyph can be encoded.
    pub fn validate(&self) -> Result<(), Error> {
        if self.namespace.is_empty() || !self.namespace.chars().all(is_resource_char) {
            return Err(Error::invalid_config(
                "namespace",
                "must be non-empty and use only a-z, 0-9, `_`, `-` and `.`",
            ));
        }
        if self
            .font_directory
            .split('/')
            .any(|segment| segment.is_empty() || !segment.chars().all(is_resource_char))
        {
            return Err(Error::invalid_config(
                "font_directory",
                "must be a `/`-separated path of resource segments",
            ));
        }
        if !(1..=MAX_SPACE_LIMIT).contains(&self.max_space) {
            return Err(Error::invalid_config(
                "max_space",
                &format!("must be within 1..={MAX_SPACE_LIMIT}"),
            ));
        }
        let mut names = HashSet::new();
        for emoji in &self.default_emoji {
            if emoji.width == 0 || emoji.height == 0 {
                return Err(Error::invalid_config(
                    "default_emoji",
                    &format!("`{}` has an empty texture", emoji.name),
                ));
            }
            if !names.insert(emoji.name.as_str()) {
                return Err(Error::invalid_config(
                    "default_emoji",
                    &format!("`{}` is declared twice", emoji.name),
                ));
            }
        }
        Ok(())
    }
}

fn is_resource_char(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}
