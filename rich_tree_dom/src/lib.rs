// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live editable document backend for [`rich_tree`].
//!
//! [`Document`] is an arena tree standing in for the node tree behind an editable surface. It
//! implements both [`rich_tree::TreeAdapter`] and [`rich_tree::ReconcileTree`], and
//! [`Document::apply`] updates an existing root in place, so nodes that did not change (and any
//! caret or composition state a platform attaches to them) survive an update.
//!
//! [`NodeId`]s are generational. A node that was replaced never compares equal to its
//! replacement, which makes identity a reliable way to see what an update touched.
//!
//! ## Example
//!
//! ```
//! use rich_tree::TreeOptions;
//! use rich_tree_dom::Document;
//! use rich_value::{Format, Value};
//!
//! let options = TreeOptions::new().with_editable(true).with_placeholder("Write");
//! let mut document = Document::new();
//! let root = document.create_root();
//!
//! document.apply(root, &Value::new(), &options);
//! assert_eq!(
//!     document.inner_html(root),
//!     "<span data-rich-text-placeholder=\"Write\" contenteditable=\"false\"></span>"
//! );
//!
//! let value = Value::from_ranges("ok", [(0..2, Format::new("em"))]).unwrap();
//! document.apply(root, &value, &options);
//! assert_eq!(document.inner_html(root), "<em>ok</em>");
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

mod apply;
mod document;


pub use apply::{Applied, DomPoint};
pub use document::{Document, NodeId, NodeKind};
