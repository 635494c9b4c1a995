// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::RangeInclusive;

/// Error produced while building a pack.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the name of the thing that failed (a popup,
/// an asset, a font file) and, when relevant, extra detail.
///
/// Rendering never fails; every error surfaces from the build phase or from
/// [`PackQueue::materialize`](crate::PackQueue::materialize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    subject: String,
    detail: Option<String>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Name of the popup, asset or file the error is about.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Extra detail, if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn new(kind: ErrorKind, subject: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            detail,
        }
    }

    pub(crate) fn codepoint_exhausted(owner: &str, range: RangeInclusive<u32>) -> Self {
        Self::new(
            ErrorKind::CodepointExhausted,
            owner,
            Some(format!(
                "U+{:X}..=U+{:X}",
                range.start(),
                range.end()
            )),
        )
    }

    pub(crate) fn missing_asset(asset: &str, reason: &str) -> Self {
        Self::new(ErrorKind::MissingAsset, asset, Some(reason.to_string()))
    }

    pub(crate) fn ascent_out_of_range(font: &str, ascent: i32) -> Self {
        Self::new(
            ErrorKind::AscentOutOfRange,
            font,
            Some(format!("ascent {ascent}")),
        )
    }

    pub(crate) fn ascent_overflow(subject: &str) -> Self {
        Self::new(
            ErrorKind::AscentOutOfRange,
            subject,
            Some("glyph offset overflows".to_string()),
        )
    }

    pub(crate) fn duplicate_popup(name: &str) -> Self {
        Self::new(ErrorKind::DuplicatePopup, name, None)
    }

    pub(crate) fn invalid_config(field: &str, reason: &str) -> Self {
        Self::new(ErrorKind::InvalidConfig, field, Some(reason.to_string()))
    }

    pub(crate) fn serialization(file: &str, source: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Serialization, file, Some(source.to_string()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::CodepointExhausted => {
                write!(f, "ran out of glyph codepoints while building `{}`", self.subject)?;
            }
            ErrorKind::MissingAsset => write!(f, "asset `{}` is missing content", self.subject)?,
            ErrorKind::AscentOutOfRange => {
                write!(f, "`{}` has an unencodable ascent", self.subject)?;
            }
            ErrorKind::DuplicatePopup => {
                write!(f, "popup `{}` was built twice in one pack", self.subject)?;
            }
            ErrorKind::InvalidConfig => write!(f, "invalid configuration `{}`", self.subject)?,
            ErrorKind::Serialization => write!(f, "failed to encode `{}`", self.subject)?,
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A codepoint allocator ran past its reserved private-use range.
    CodepointExhausted,

    /// A structurally required asset has no content (an image without frames, a text without
    /// glyph sheets, a head with a zero pixel size).
    MissingAsset,

    /// A glyph ascent does not fit in the range that can carry a shader id.
    AscentOutOfRange,

    /// Two popups with the same name were built into one pack.
    DuplicatePopup,

    /// The build configuration is unusable.
    InvalidConfig,

    /// A pack file could not be encoded.
    Serialization,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_subject() {
        let err = Error::codepoint_exhausted("status_popup", 0xF0000..=0xFFFFD);
        assert_eq!(err.kind(), ErrorKind::CodepointExhausted);
        assert_eq!(
            err.to_string(),
            "ran out of glyph codepoints while building `status_popup`: U+F0000..=U+FFFFD"
        );

        let err = Error::missing_asset("heart", "image has no frames");
        assert_eq!(err.subject(), "heart");
        assert_eq!(err.detail(), Some("image has no frames"));
    }
}
