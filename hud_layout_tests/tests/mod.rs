// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `hud_layout`.
//!
//! - The `util` module contains shared fixtures: a scriptable viewer, asset builders and a
//!   build environment that collects the emitted pack files.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, which makes the shared fixtures easy to reach.
//! - If you want to add new tests, put them into the module of their topic (animation,
//!   images, texts, heads, pack output), or into `basic.rs` if there is no clear topic.
//! - For test naming, put the topic first: `image_frame_offset` is better than
//!   `frame_offset_of_image`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod head;
mod pack;
mod util;
