// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading markup back into a [`Value`].
//!
//! The parser understands the markup this crate writes, plus the usual leniencies of hand-written
//! HTML (unquoted attributes, self-closing tags, comments). It is not a general HTML parser:
//! there is no implied closing of elements, and mismatched tags are errors.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use rich_tree::{PADDING_ATTRIBUTE, PLACEHOLDER_ATTRIBUTE, TreeOptions};
use rich_value::{
    Attributes, Format, Formats, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER, Value,
};
use smallvec::SmallVec;

/// Elements that never have content. They are read as objects.
const VOID_TAGS: [&str; 12] = [
    "area", "base", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Configuration for [`parse_html`].
///
/// The multiline settings must match those the markup was built with for a round trip to give
/// back the same value.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    multiline_tag: Option<Arc<str>>,
    multiline_wrapper_tags: HashSet<Arc<str>>,
    void_tags: HashSet<Arc<str>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            multiline_tag: None,
            multiline_wrapper_tags: HashSet::new(),
            void_tags: VOID_TAGS.into_iter().map(Arc::from).collect(),
        }
    }
}

impl ParseOptions {
    /// Creates options for single-line markup with the standard HTML void elements.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads elements with this tag as lines.
    #[must_use]
    pub fn with_multiline_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.multiline_tag = Some(tag.into());
        self
    }

    /// Reads elements with these tags as wrappers of nested lines.
    #[must_use]
    pub fn with_multiline_wrapper_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<str>>,
    {
        self.multiline_wrapper_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Reads elements with these tags as void objects, in addition to the standard ones.
    #[must_use]
    pub fn with_void_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<str>>,
    {
        self.void_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// The tag read as a line, if any.
    #[inline]
    pub fn multiline_tag(&self) -> Option<&str> {
        self.multiline_tag.as_deref()
    }

    /// Returns `true` if elements with `tag` are void.
    #[inline]
    pub fn is_void(&self, tag: &str) -> bool {
        self.void_tags.contains(tag)
    }
}

impl From<&TreeOptions> for ParseOptions {
    fn from(options: &TreeOptions) -> Self {
        let parse = Self::new().with_multiline_wrapper_tags(options.multiline_wrapper_tags());
        match options.multiline_tag() {
            Some(tag) => parse.with_multiline_tag(tag),
            None => parse,
        }
    }
}

/// An error returned by [`parse_html`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
}

impl ParseError {
    /// Returns the kind of error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the byte offset of the offending tag.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// The kind of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A `<` without a matching `>`.
    UnterminatedTag,
    /// A closing tag that does not match the innermost open element.
    UnexpectedClosingTag,
    /// An element still open at the end of the input.
    UnclosedElement,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnterminatedTag => {
                write!(f, "unterminated tag at byte {}", self.offset)
            }
            ParseErrorKind::UnexpectedClosingTag => write!(
                f,
                "closing tag at byte {} does not match the open element",
                self.offset
            ),
            ParseErrorKind::UnclosedElement => {
                write!(f, "element opened at byte {} is never closed", self.offset)
            }
        }
    }
}

impl core::error::Error for ParseError {}

/// Parses markup into a value.
///
/// - `br` becomes a `'\n'` character, unless it is empty-line padding.
/// - Void elements (and self-closing tags) become an object replacement character carrying an
///   object format with the element's attributes.
/// - Placeholder spans are dropped.
/// - With a multiline tag, every line element after the first starts with a line separator. The
///   separator carries the wrapper elements enclosing the new line, outermost first.
/// - Every other element becomes a format on the characters it encloses.
///
/// ```
/// use rich_tree_markup::{ParseOptions, parse_html};
///
/// let value = parse_html("<em>a &amp; <b>b</b></em>", &ParseOptions::new()).unwrap();
/// assert_eq!(value.text(), "a & b");
/// let tags: Vec<_> = value.formats_at(4).unwrap().iter().map(|f| f.tag()).collect();
/// assert_eq!(tags, ["em", "b"]);
/// ```
pub fn parse_html(html: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let mut parser = Parser::new(options);
    let mut pos = 0;
    while pos < html.len() {
        match html[pos..].find('<') {
            Some(0) => pos = parser.markup(html, pos)?,
            Some(len) => {
                parser.text(&html[pos..pos + len]);
                pos += len;
            }
            None => {
                parser.text(&html[pos..]);
                pos = html.len();
            }
        }
    }
    parser.finish()
}

#[derive(Debug)]
enum Role {
    Format(Arc<Format>),
    Line,
    Wrapper(Arc<Format>),
    Skip,
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    role: Role,
    offset: usize,
}

struct Parser<'a> {
    options: &'a ParseOptions,
    text: String,
    formats: Vec<Formats>,
    stack: SmallVec<[OpenElement; 8]>,
    lines: usize,
}

impl<'a> Parser<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            text: String::new(),
            formats: Vec::new(),
            stack: SmallVec::new(),
            lines: 0,
        }
    }

    /// Formats opened inside the innermost line, outermost first.
    fn inline_formats(&self) -> Formats {
        let line_start = self
            .stack
            .iter()
            .rposition(|open| matches!(open.role, Role::Line))
            .map_or(0, |index| index + 1);
        self.stack[line_start..]
            .iter()
            .filter_map(|open| match &open.role {
                Role::Format(format) => Some(format.clone()),
                _ => None,
            })
            .collect()
    }

    fn skipping(&self) -> bool {
        self.stack.iter().any(|open| matches!(open.role, Role::Skip))
    }

    fn push_char(&mut self, ch: char, formats: Formats) {
        self.text.push(ch);
        self.formats.push(formats);
    }

    fn text(&mut self, raw: &str) {
        if self.skipping() {
            return;
        }
        let mut decoded = String::new();
        decode_entities(raw, &mut decoded);
        let formats = self.inline_formats();
        for ch in decoded.chars() {
            self.push_char(ch, formats.clone());
        }
    }

    /// Consumes the tag, comment or declaration starting at `start` and returns the offset
    /// right after it.
    fn markup(&mut self, html: &str, start: usize) -> Result<usize, ParseError> {
        let rest = &html[start..];
        if rest.starts_with("<!--") {
            let end = rest
                .find("-->")
                .ok_or(ParseError::new(ParseErrorKind::UnterminatedTag, start))?;
            return Ok(start + end + 3);
        }
        let end = tag_end(rest).ok_or(ParseError::new(ParseErrorKind::UnterminatedTag, start))?;
        let inner = &rest[1..end];
        let next = start + end + 1;

        if inner.starts_with('!') || inner.starts_with('?') {
            return Ok(next);
        }
        if let Some(name) = inner.strip_prefix('/') {
            self.close(name.trim(), start)?;
            return Ok(next);
        }

        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(inner) => (inner, true),
            None => (inner, false),
        };
        let inner = inner.trim();
        let name_len = inner.find(char::is_whitespace).unwrap_or(inner.len());
        let (name, attributes) = inner.split_at(name_len);
        self.open(name, parse_attributes(attributes), self_closing, start);
        Ok(next)
    }

    fn open(&mut self, tag: &str, attributes: Attributes, self_closing: bool, offset: usize) {
        let void = tag == "br" || self_closing || self.options.is_void(tag);
        if self.skipping() {
            if !void {
                self.push_open(tag, Role::Skip, offset);
            }
            return;
        }

        if tag == "br" {
            if !attributes.contains(PADDING_ATTRIBUTE) {
                let formats = self.inline_formats();
                self.push_char('\n', formats);
            }
            return;
        }
        if void {
            let mut formats = self.inline_formats();
            formats.push(Arc::new(Format::object(tag).with_attributes(attributes)));
            self.push_char(OBJECT_REPLACEMENT_CHARACTER, formats);
            return;
        }
        if attributes.contains(PLACEHOLDER_ATTRIBUTE) {
            self.push_open(tag, Role::Skip, offset);
            return;
        }

        let role = if self.options.multiline_tag() == Some(tag) {
            if self.lines > 0 {
                let wrappers = self
                    .stack
                    .iter()
                    .filter_map(|open| match &open.role {
                        Role::Wrapper(format) => Some(format.clone()),
                        _ => None,
                    })
                    .collect();
                self.push_char(LINE_SEPARATOR, wrappers);
            }
            self.lines += 1;
            Role::Line
        } else if self.options.multiline_tag.is_some()
            && self.options.multiline_wrapper_tags.contains(tag)
        {
            Role::Wrapper(Arc::new(Format::new(tag).with_attributes(attributes)))
        } else {
            Role::Format(Arc::new(Format::new(tag).with_attributes(attributes)))
        };
        self.push_open(tag, role, offset);
    }

    fn push_open(&mut self, tag: &str, role: Role, offset: usize) {
        self.stack.push(OpenElement {
            tag: String::from(tag),
            role,
            offset,
        });
    }

    fn close(&mut self, tag: &str, offset: usize) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(open) if open.tag == tag => {
                self.stack.pop();
                Ok(())
            }
            _ => {
                log::debug!("unexpected </{tag}> at byte {offset}");
                Err(ParseError::new(ParseErrorKind::UnexpectedClosingTag, offset))
            }
        }
    }

    fn finish(self) -> Result<Value, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedElement,
                open.offset,
            ));
        }
        Ok(Value::from_parts(self.text, Some(self.formats))
            .expect("one format set is pushed per character"))
    }
}

/// Returns the index of the `>` closing the tag at the start of `rest`, skipping quoted
/// attribute values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote = None;
    for (index, ch) in rest.char_indices().skip(1) {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            (None, '>') => return Some(index),
            _ => {}
        }
    }
    None
}

fn parse_attributes(mut rest: &str) -> Attributes {
    let mut attributes = Attributes::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return attributes;
        }
        let name_len = rest
            .find(|ch: char| ch.is_whitespace() || ch == '=')
            .unwrap_or(rest.len());
        let (name, after) = rest.split_at(name_len);
        let after = after.trim_start();
        let Some(after) = after.strip_prefix('=') else {
            attributes.insert(name, "");
            rest = after;
            continue;
        };
        let after = after.trim_start();
        let (raw, remaining) = match after.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &after[1..];
                let len = body.find(quote).unwrap_or(body.len());
                (&body[..len], body.get(len + 1..).unwrap_or(""))
            }
            _ => {
                let len = after.find(char::is_whitespace).unwrap_or(after.len());
                after.split_at(len)
            }
        };
        let mut value = String::new();
        decode_entities(raw, &mut value);
        attributes.insert(name, value);
        rest = remaining;
    }
}

/// Appends `raw` to `out` with character references decoded. Unknown references are kept as
/// written.
fn decode_entities(raw: &str, out: &mut String) {
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| Some((decode_entity(&rest[1..semi])?, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{decode_entities, parse_attributes, tag_end};

    fn decode(raw: &str) -> String {
        let mut out = String::new();
        decode_entities(raw, &mut out);
        out
    }

    #[test]
    fn entities() {
        assert_eq!(decode("a &amp; b &lt;&gt; &#39;&#x41;"), "a & b <> 'A");
        assert_eq!(decode("&nbsp;"), "\u{a0}");
        assert_eq!(decode("AT&T; &bogus; &"), "AT&T; &bogus; &");
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        assert_eq!(tag_end("<a title=\"x > y\">"), Some(16));
        assert_eq!(tag_end("<a title='x"), None);
    }

    #[test]
    fn attribute_forms() {
        let attributes = parse_attributes(" href=\"/a?b=&quot;c&quot;\" hidden alt='x y' w=3");
        assert_eq!(attributes.get("href"), Some("/a?b=\"c\""));
        assert_eq!(attributes.get("hidden"), Some(""));
        assert_eq!(attributes.get("alt"), Some("x y"));
        assert_eq!(attributes.get("w"), Some("3"));
    }
}
