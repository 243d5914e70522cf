// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds nested trees from flat [`rich_value::Value`]s.
//!
//! - [`to_tree`] is the tree builder. It walks the per-character formats of a value and
//!   produces a minimal, correctly nested tree of elements and text runs.
//! - [`TreeAdapter`] is the small set of primitives the builder drives. Each concrete tree
//!   representation (static markup, a live editable document, UI framework elements) implements
//!   it once, and never contains formatting logic of its own.
//! - [`reconcile`] updates a live tree in place from a freshly built one, for adapters that also
//!   implement [`ReconcileTree`].
//!
//! ## Nesting
//!
//! The order of formats on a character is significant: earlier formats enclose later ones.
//! When a format ends, every element opened after it is closed too and reopened if still
//! active, so the result is always well nested. Identical formats separated by a different run
//! produce separate sibling elements.
//!
//! ## Editable trees
//!
//! With [`TreeOptions::with_editable`], the builder marks line breaks with
//! [`LINE_BREAK_ATTRIBUTE`], pads empty lines and lines ending in a line break with a void `br`
//! carrying [`PADDING_ATTRIBUTE`], and renders the placeholder of an empty value as a
//! [`Child::Placeholder`] node. Adapters that serialize placeholders use
//! [`PLACEHOLDER_ATTRIBUTE`].
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

pub mod reconcile;

mod adapter;
mod build;
mod options;


pub use adapter::{Child, TreeAdapter};
pub use build::{Boundary, BuiltTree, to_tree};
pub use options::TreeOptions;
pub use reconcile::{ReconcileStats, ReconcileTree, reconcile};

/// Marks the void `br` that pads an empty line in an editable tree.
pub const PADDING_ATTRIBUTE: &str = "data-rich-text-padding";

/// Marks a `br` that stands for a line break character in an editable tree.
pub const LINE_BREAK_ATTRIBUTE: &str = "data-rich-text-line-break";

/// Carries the placeholder text when a placeholder is serialized as an element.
pub const PLACEHOLDER_ATTRIBUTE: &str = "data-rich-text-placeholder";
