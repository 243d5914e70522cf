// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for constructing and editing a [`Value`](crate::Value).
///
/// Carries a non-exhaustive [`ErrorKind`] plus the offending range (or lengths, for a formats
/// mismatch) and the character length of the text at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start char index of the caller-provided range.
    start: usize,

    /// The end char index (exclusive) of the caller-provided range.
    end: usize,

    /// The length in chars of the underlying text at the time of failure.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start char index of the range provided by the caller.
    ///
    /// For [`ErrorKind::FormatsLengthMismatch`] this is the number of format sets supplied.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end char index of the range provided by the caller.
    ///
    /// For [`ErrorKind::FormatsLengthMismatch`] this equals [`Error::start`].
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in chars of the text at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            start,
            end,
            len,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
        }
    }

    pub(crate) fn formats_length_mismatch(formats: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::FormatsLengthMismatch,
            start: formats,
            end: formats,
            len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::FormatsLengthMismatch => write!(
                f,
                "{} format sets supplied for text of len {}",
                self.start, self.len
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Provided indices were out of bounds relative to the text length.
    InvalidBounds,

    /// The provided range had `start > end`.
    InvalidRange,

    /// The per-character format table is not exactly as long as the text.
    FormatsLengthMismatch,
}

#[inline]
pub(crate) fn validate_range(range: &core::ops::Range<usize>, len: usize) -> Result<(), Error> {
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    Ok(())
}
