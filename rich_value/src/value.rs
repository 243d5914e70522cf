// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::validate_range;
use crate::runs::{FormatRuns, objects_last, sweep_ranges};
use crate::{Error, Format, Formats, LINE_SEPARATOR};

/// A flat rich text value.
///
/// The text is paired with one [`Formats`] set per character, so that the formats active on
/// character `i` are `formats()[i]`. All indices are **char** indices, not byte offsets.
///
/// A `Value` is treated as immutable input by tree builders; editing helpers produce or mutate
/// values between builds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value {
    text: String,
    formats: Vec<Formats>,
    start: Option<usize>,
    end: Option<usize>,
}

impl Value {
    /// Creates an empty value.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value holding plain, unformatted text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            formats: vec![Formats::new(); len],
            start: None,
            end: None,
        }
    }

    /// Creates a value from text and an optional per-character format table.
    ///
    /// `None` means plain text. Otherwise the table must hold exactly one set per character.
    /// Object formats are moved behind the other formats of their character.
    pub fn from_parts(text: impl Into<String>, formats: Option<Vec<Formats>>) -> Result<Self, Error> {
        let Some(mut formats) = formats else {
            return Ok(Self::from_text(text));
        };
        let text = text.into();
        let len = text.chars().count();
        if formats.len() != len {
            return Err(Error::formats_length_mismatch(formats.len(), len));
        }
        formats.iter_mut().for_each(objects_last);
        Ok(Self {
            text,
            formats,
            start: None,
            end: None,
        })
    }

    /// Creates a value from text and a list of possibly overlapping format spans.
    ///
    /// Where spans overlap, formats are ordered by the position of their span in `ranges`, so
    /// an earlier span encloses a later one. Object formats are the exception: they always come
    /// after every other format of their character.
    pub fn from_ranges<I>(text: impl Into<String>, ranges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (Range<usize>, Format)>,
    {
        let text = text.into();
        let len = text.chars().count();
        let mut spans = Vec::new();
        for (range, format) in ranges {
            validate_range(&range, len)?;
            spans.push((range, Arc::new(format)));
        }
        Ok(Self {
            formats: sweep_ranges(len, &spans),
            text,
            start: None,
            end: None,
        })
    }

    /// Sets the selection offsets, returning the updated value.
    pub fn with_selection(mut self, start: usize, end: usize) -> Result<Self, Error> {
        validate_range(&(start..end), self.char_len())?;
        self.start = Some(start);
        self.end = Some(end);
        Ok(self)
    }

    /// Removes the selection offsets.
    #[inline]
    pub fn clear_selection(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// The text, including any line separators and object replacement characters.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The per-character format table, exactly [`Value::char_len`] entries long.
    #[inline]
    pub fn formats(&self) -> &[Formats] {
        &self.formats
    }

    /// The formats active on the character at `index`, or `None` when out of bounds.
    #[inline]
    pub fn formats_at(&self, index: usize) -> Option<&[Arc<Format>]> {
        self.formats.get(index).map(|formats| formats.as_slice())
    }

    /// The number of characters in the text.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.formats.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The selection start, in chars.
    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// The selection end, in chars.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Applies `format` to every character in `range`.
    ///
    /// A format with the same tag already present on a character is replaced in place, keeping
    /// its nesting position. Otherwise the format is added innermost, though never inside an
    /// object format.
    pub fn apply_format(&mut self, range: Range<usize>, format: Format) -> Result<(), Error> {
        validate_range(&range, self.char_len())?;
        let format = Arc::new(format);
        for formats in &mut self.formats[range] {
            match formats.iter().position(|f| f.tag() == format.tag()) {
                Some(ix) => formats[ix] = format.clone(),
                None => formats.push(format.clone()),
            }
            objects_last(formats);
        }
        Ok(())
    }

    /// Removes every format with the given `tag` from the characters in `range`.
    pub fn remove_format(&mut self, range: Range<usize>, tag: &str) -> Result<(), Error> {
        validate_range(&range, self.char_len())?;
        for formats in &mut self.formats[range] {
            formats.retain(|f| f.tag() != tag);
        }
        Ok(())
    }

    /// Returns the characters in `range` together with their formats.
    ///
    /// The selection is not carried over.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, Error> {
        validate_range(&range, self.char_len())?;
        let bytes = byte_offset(&self.text, range.start)..byte_offset(&self.text, range.end);
        Ok(Self {
            text: String::from(&self.text[bytes]),
            formats: self.formats[range].to_vec(),
            start: None,
            end: None,
        })
    }

    /// Joins several values end to end.
    pub fn concat<'a>(values: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut joined = Self::new();
        for value in values {
            joined.text.push_str(&value.text);
            joined.formats.extend(value.formats.iter().cloned());
        }
        joined
    }

    /// Splits the value at every [`LINE_SEPARATOR`], dropping the separators.
    ///
    /// A value without separators yields a single line.
    pub fn split_lines(&self) -> Vec<Self> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        for (index, ch) in self.text.chars().enumerate() {
            if ch == LINE_SEPARATOR {
                lines.push(self.slice_unchecked(line_start..index));
                line_start = index + 1;
            }
        }
        lines.push(self.slice_unchecked(line_start..self.char_len()));
        lines
    }

    /// Iterates over maximal runs of characters sharing the same format set.
    #[inline]
    pub fn format_runs(&self) -> FormatRuns<'_> {
        FormatRuns::new(&self.formats)
    }

    /// Compares this value with `other` and returns the changed region.
    ///
    /// The result is `(old, new)`: the char range of `self` that was replaced by the char range
    /// `new` of `other`. Characters outside those ranges match in both text and formats.
    /// Returns `None` when the two values have identical content (selection is ignored).
    pub fn changed_range(&self, other: &Self) -> Option<(Range<usize>, Range<usize>)> {
        let old: Vec<_> = self.text.chars().zip(&self.formats).collect();
        let new: Vec<_> = other.text.chars().zip(&other.formats).collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        if prefix == old.len() && prefix == new.len() {
            return None;
        }
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();
        Some((prefix..old.len() - suffix, prefix..new.len() - suffix))
    }

    fn slice_unchecked(&self, range: Range<usize>) -> Self {
        self.slice(range)
            .expect("line boundaries come from the text itself")
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::{ErrorKind, Format, Formats, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER};
    use alloc::format;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    fn tags(value: &Value, index: usize) -> Vec<&str> {
        value
            .formats_at(index)
            .unwrap()
            .iter()
            .map(|f| f.tag())
            .collect()
    }

    #[test]
    fn from_text_has_one_empty_set_per_char() {
        let value = Value::from_text("héllo");
        assert_eq!(value.char_len(), 5);
        assert!(value.formats().iter().all(Formats::is_empty));
    }

    #[test]
    fn from_parts_rejects_length_mismatch() {
        let err = Value::from_parts("abc", Some(vec![Formats::new(); 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatsLengthMismatch);
        assert_eq!(err.len(), 3);
        assert!(format!("{err}").contains("2 format sets"));

        let plain = Value::from_parts("abc", None).unwrap();
        assert_eq!(plain, Value::from_text("abc"));
    }

    #[test]
    fn apply_format_replaces_same_tag_in_place() {
        let mut value = Value::from_text("abcd");
        value.apply_format(0..4, Format::new("a").with_attribute("href", "#1")).unwrap();
        value.apply_format(0..4, Format::new("strong")).unwrap();
        value.apply_format(1..2, Format::new("a").with_attribute("href", "#2")).unwrap();

        assert_eq!(tags(&value, 1), ["a", "strong"]);
        let link = &value.formats_at(1).unwrap()[0];
        assert_eq!(link.attributes().get("href"), Some("#2"));
        let untouched = &value.formats_at(0).unwrap()[0];
        assert_eq!(untouched.attributes().get("href"), Some("#1"));
    }

    #[test]
    fn apply_format_keeps_objects_innermost() {
        let mut value = Value::from_ranges(
            format!("a{OBJECT_REPLACEMENT_CHARACTER}b"),
            [(1..2, Format::object("img").with_attribute("src", "x"))],
        )
        .unwrap();
        value.apply_format(0..3, Format::new("strong")).unwrap();
        assert_eq!(tags(&value, 1), ["strong", "img"]);

        let table = Vec::from([
            Formats::new(),
            [Arc::new(Format::object("img")), Arc::new(Format::new("em"))]
                .into_iter()
                .collect(),
            Formats::new(),
        ]);
        let value = Value::from_parts(format!("a{OBJECT_REPLACEMENT_CHARACTER}b"), Some(table))
            .unwrap();
        assert_eq!(tags(&value, 1), ["em", "img"]);
    }

    #[test]
    fn apply_format_shares_one_allocation() {
        let mut value = Value::from_text("abc");
        value.apply_format(0..3, Format::new("em")).unwrap();
        let formats = value.formats();
        assert!(Arc::ptr_eq(&formats[0][0], &formats[2][0]));
    }

    #[test]
    fn remove_format_only_touches_range() {
        let mut value = Value::from_text("abc");
        value.apply_format(0..3, Format::new("em")).unwrap();
        value.remove_format(1..2, "em").unwrap();
        assert_eq!(tags(&value, 0), ["em"]);
        assert!(tags(&value, 1).is_empty());
        assert_eq!(tags(&value, 2), ["em"]);
    }

    #[test]
    fn out_of_bounds_edits_fail() {
        let mut value = Value::from_text("abc");
        let err = value.apply_format(2..4, Format::new("em")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(
            Value::from_text("abc").with_selection(0, 4).unwrap_err().kind(),
            ErrorKind::InvalidBounds
        );
    }

    #[test]
    fn slice_and_concat_restore_value() {
        let mut value = Value::from_text("héllo wörld");
        value.apply_format(3..8, Format::new("strong")).unwrap();
        let left = value.slice(0..5).unwrap();
        let right = value.slice(5..11).unwrap();
        assert_eq!(left.text(), "héllo");
        assert_eq!(right.text(), " wörld");
        assert_eq!(Value::concat([&left, &right]), value);
    }

    #[test]
    fn split_lines_drops_separators() {
        let text = format!("one{LINE_SEPARATOR}{LINE_SEPARATOR}three");
        let lines = Value::from_text(text).split_lines();
        let texts: Vec<_> = lines.iter().map(Value::text).collect();
        assert_eq!(texts, ["one", "", "three"]);
        assert_eq!(Value::from_text("").split_lines().len(), 1);
    }

    #[test]
    fn changed_range_reports_minimal_region() {
        let old = Value::from_text("hello world");
        let mut new = Value::from_text("hello brave world");
        assert_eq!(old.changed_range(&new), Some((6..6, 6..12)));

        new = old.clone();
        assert_eq!(old.changed_range(&new), None);

        new.apply_format(0..5, Format::new("em")).unwrap();
        assert_eq!(old.changed_range(&new), Some((0..5, 0..5)));
    }
}
