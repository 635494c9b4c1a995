// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

/// Rounds to the nearest pixel, halves towards positive infinity.
///
/// Saturates at the bounds of `i32`; NaN rounds to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, which is the wanted behaviour"
)]
pub(crate) fn round_px(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// `size * scale`, rounded to whole pixels.
pub(crate) fn scale_px(size: u32, scale: f64) -> i32 {
    round_px(f64::from(size) * scale)
}
