// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Value is a flat model of rich text: a string plus one ordered set of formats per
//! character.
//!
//! This is the input to tree builders such as `rich_tree`, which turn the flat model back into
//! properly nested elements.
//!
//! - [`Format`] describes one inline formatting instance (a tag plus [`Attributes`]).
//! - [`Value`] pairs the text with its per-character [`Formats`] and an optional selection.
//! - [`Value::from_ranges`] builds the per-character table from overlapping spans, and
//!   [`Value::format_runs`] groups it back into runs.
//!
//! ## Indices
//!
//! All offsets are **char** indices into the text, not byte offsets.
//!
//! ## Reserved characters
//!
//! [`LINE_SEPARATOR`] separates lines of a multiline value, and
//! [`OBJECT_REPLACEMENT_CHARACTER`] stands in for an inline object carried by an object
//! [`Format`].
//!
//! ## Example
//!
//! ```
//! use rich_value::{Format, Value};
//!
//! let value = Value::from_ranges(
//!     "Hello world",
//!     [
//!         (0..11, Format::new("a").with_attribute("href", "https://example.invalid")),
//!         (6..11, Format::new("strong")),
//!     ],
//! )
//! .unwrap();
//!
//! let tags: Vec<_> = value.formats_at(7).unwrap().iter().map(|f| f.tag()).collect();
//! assert_eq!(tags, ["a", "strong"]);
//! assert_eq!(value.format_runs().count(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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

extern crate alloc;

mod error;
mod format;
mod runs;
mod value;

pub use crate::error::{Error, ErrorKind};
pub use crate::format::{Attributes, AttributesIter, Format, Formats};
pub use crate::runs::FormatRuns;
pub use crate::value::Value;

/// Separates the lines of a multiline value.
pub const LINE_SEPARATOR: char = '\u{2028}';

/// Stands in for an inline object, such as an image, in the text.
pub const OBJECT_REPLACEMENT_CHARACTER: char = '\u{fffc}';
