// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HUD composition with synthetic bitmap-font glyphs.
//!
//! Every visual piece of a HUD popup (an image frame, a line of text, one row of a player
//! head) is registered as a character of a generated bitmap font, placed by its ascent and
//! advance. The crate compiles a declarative [`Popup`] hierarchy into those glyphs, emits the
//! resource-pack font files backing them, and renders the compiled popup per viewer and
//! frame into a [`WidthComponent`]: a run of characters a client draws as the overlay.
//!
//! A build has two phases:
//!
//! - **Build.** A [`BuildContext`] owns the interning caches, the shader table and the font
//!   accumulators. [`BuildContext::build_popup`] compiles each popup; identical glyph
//!   requests share one character. [`BuildContext::finish`] flushes everything into a
//!   [`PackQueue`].
//! - **Render.** [`CompiledPopup::render`] is pure. It reads placeholders through the
//!   [`Viewer`] trait and can be called from any number of threads.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use hud_layout::{
//!     BuildConfig, BuildContext, HudImage, ImageFrame, ImageLayout, LayoutGroup, Popup,
//!     PopupLayout, Value, Viewer,
//! };
//!
//! struct Player;
//!
//! impl Viewer for Player {
//!     fn placeholder(&self, _name: &str) -> Option<Value> {
//!         None
//!     }
//! }
//!
//! let heart = Arc::new(HudImage {
//!     name: "heart".into(),
//!     frames: vec![ImageFrame::new("heart.png", 9, 9)],
//!     ..HudImage::default()
//! });
//! let group = Arc::new(LayoutGroup {
//!     name: "status".into(),
//!     images: vec![ImageLayout::new(heart)],
//!     ..LayoutGroup::default()
//! });
//! let mut popup = Popup::new("status");
//! popup.layouts.push(PopupLayout::new(group));
//!
//! let mut cx = BuildContext::new(BuildConfig::default()).unwrap();
//! let compiled = cx.build_popup(&popup).unwrap();
//! let files = cx.finish().unwrap().materialize().unwrap();
//! assert!(
//!     files
//!         .iter()
//!         .any(|file| file.path_string() == "assets/hud/font/popup/status/image.json")
//! );
//!
//! let drawn = compiled.render(&Player, 0, 0);
//! assert_eq!(drawn.width(), 9);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use hud_primitives;

mod cache;
mod chars;
mod component;
mod condition;
mod config;
mod context;
mod error;
mod font;
mod inputs;
mod pack;
mod popup;
mod renderer;
mod shader;
mod util;
mod viewer;

pub use cache::{CacheKind, CacheStats, InternCache};
pub use chars::{
    CharAllocator, POPUP_GLYPH_RANGE, TEXT_IMAGE_END_CODEPOINT, TEXT_IMAGE_START_CODEPOINT,
};
pub use component::{
    FontKey, GlyphRun, MAX_SPACE_LIMIT, PixelComponent, SPACE_CENTER_CODEPOINT, SpaceFont,
    WidthComponent,
};
pub use condition::{CompareOp, Condition, Operand};
pub use config::{BuildConfig, DefaultEmoji};
pub use context::BuildContext;
pub use error::{Error, ErrorKind};
pub use font::{FontDefinition, FontProvider, SHADER_ASCENT_STRIDE, encode_key};
pub use inputs::*;
pub use pack::{PackFile, PackPath, PackQueue, PackSink, pack_path};
pub use popup::{CompiledElement, CompiledLayout, CompiledPopup};
pub use renderer::{
    HeadGlyph, HeadRenderer, ImageRenderer, LayoutComponentContainer, TextRenderer,
};
pub use shader::{HudShader, ShaderGroup, ShaderProperties};
pub use viewer::{FollowTarget, HeadSkin, Value, Viewer};
