// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static markup backend for [`rich_tree`].
//!
//! [`MarkupTree`] is an arena of plain records implementing [`rich_tree::TreeAdapter`]. A build
//! is serialized with [`MarkupTree::to_html`], or in one step with [`to_html_string`].
//! [`parse_html`] reads such markup back into a [`rich_value::Value`].
//!
//! ## Scope
//!
//! Static markup is produced once and never patched, so [`MarkupTree`] does not implement
//! [`rich_tree::ReconcileTree`]. Use `rich_tree_dom` for a live tree.
//!
//! ## Example
//!
//! ```
//! use rich_tree::TreeOptions;
//! use rich_tree_markup::{ParseOptions, parse_html, to_html_string};
//! use rich_value::{Format, LINE_SEPARATOR, Value};
//!
//! let value = Value::from_ranges(
//!     format!("one{LINE_SEPARATOR}two"),
//!     [(4..7, Format::new("em"))],
//! )
//! .unwrap();
//! let options = TreeOptions::new().with_multiline_tag("p");
//!
//! let html = to_html_string(&value, &options);
//! assert_eq!(html, "<p>one</p><p><em>two</em></p>");
//! assert_eq!(parse_html(&html, &ParseOptions::from(&options)).unwrap(), value);
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

pub mod parse;

mod serialize;
mod tree;

#[cfg(test)]
mod tests;

pub use parse::{ParseError, ParseErrorKind, ParseOptions, parse_html};
pub use serialize::{
    escape_attribute, escape_text, is_valid_attribute_name, to_html_string, write_end_tag,
    write_placeholder, write_start_tag,
};
pub use tree::{MarkupNode, MarkupTree, NodeId};
