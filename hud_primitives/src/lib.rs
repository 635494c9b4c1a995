// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and layout vocabulary for HUD glyph composition.
//!
//! This crate is intended as a lightweight, `no_std`-friendly vocabulary layer shared by the
//! layout engine and whatever loads its configuration. It holds small value types: pixel and
//! screen-anchor locations, colours, and the alignment/animation enums.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//! - `serde`: Implement `Serialize`/`Deserialize` for every type in this crate.
//!
//! ## Example
//!
//! ```
//! use hud_primitives::{AnimationType, PixelLocation};
//!
//! let element = PixelLocation::new(4, 8) + PixelLocation::new(-1, 2);
//! assert_eq!((element.x, element.y), (3, 10));
//!
//! assert_eq!(AnimationType::Loop.select(7, 5), Some(2));
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
#![no_std]

mod color;
mod layout;
mod location;

pub use color::Rgb;
pub use layout::{AnimationType, HeadRenderType, LayoutAlign, LayoutOffset};
pub use location::{DEFAULT_OPACITY, GuiLocation, PixelLocation};
