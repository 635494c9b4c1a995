// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-player state renderers read from.

use core::fmt;

use hud_primitives::Rgb;

/// A placeholder value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A number.
    Number(f64),
    /// Free text.
    Text(String),
    /// A flag.
    Bool(bool),
}

impl Value {
    /// The value as a number, parsing text and mapping flags to `0` and `1`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        }
    }

    /// The value as a flag. Only booleans and the texts `true`/`false` qualify.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Colours of a player's head texture, row-major, 8×8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadSkin {
    /// Face layer.
    pub main: [Rgb; 64],
    /// Hair layer; `None` is transparent.
    pub hair: [Option<Rgb>; 64],
}

impl HeadSkin {
    /// A face of one colour with no hair layer.
    pub fn solid(color: Rgb) -> Self {
        Self {
            main: [color; 64],
            hair: [None; 64],
        }
    }

    /// Face colour at column `x`, row `y`.
    pub fn main_at(&self, x: usize, y: usize) -> Rgb {
        self.main[y * 8 + x]
    }

    /// Hair colour at column `x`, row `y`.
    pub fn hair_at(&self, x: usize, y: usize) -> Option<Rgb> {
        self.hair[y * 8 + x]
    }
}

impl Default for HeadSkin {
    fn default() -> Self {
        Self::solid(Rgb::WHITE)
    }
}

/// The player a popup is rendered for.
///
/// Implemented by the host. Every method is called on the render path and must not block.
pub trait Viewer {
    /// Current value of the placeholder `name`, or `None` if it is unknown.
    fn placeholder(&self, name: &str) -> Option<Value>;

    /// Another viewer an element follows, such as the entity the player is targeting.
    fn follow(&self, target: &str) -> Option<&dyn Viewer> {
        let _ = target;
        None
    }

    /// Head texture, if known. Heads render as plain white without one.
    fn head_skin(&self) -> Option<&HeadSkin> {
        None
    }
}

/// Redirects an element to another viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowTarget {
    /// Name passed to [`Viewer::follow`].
    pub target: String,
    /// Hide the element when the target does not resolve, instead of falling back to the
    /// original viewer.
    pub cancel_if_missing: bool,
}

impl FollowTarget {
    /// Follows `target`, hiding the element when it is missing.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cancel_if_missing: true,
        }
    }
}

/// The viewer an element reads from, or `None` when it must not be drawn.
pub(crate) fn resolve_viewer<'a>(
    follow: Option<&FollowTarget>,
    viewer: &'a dyn Viewer,
) -> Option<&'a dyn Viewer> {
    let Some(follow) = follow else {
        return Some(viewer);
    };
    match viewer.follow(&follow.target) {
        Some(target) => Some(target),
        None if follow.cancel_if_missing => None,
        None => Some(viewer),
    }
}
