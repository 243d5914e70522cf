// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative UI element backend for [`rich_tree`].
//!
//! UI frameworks describe their output as immutable element values, which a tree builder
//! cannot append to. This crate splits the work in two:
//!
//! - [`ElementBuilder`] is a mutable scratch arena implementing [`rich_tree::TreeAdapter`].
//! - [`ElementBuilder::finish`] converts a finished build into [`ElementNode`]s in one pass,
//!   assigning every element its sibling index as a key.
//!
//! [`to_element`] does both.
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

mod builder;
mod element;

#[cfg(test)]
mod tests;

pub use builder::{ElementBuilder, ScratchId};
pub use element::{Element, ElementNode, Props, to_element};
