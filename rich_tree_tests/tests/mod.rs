// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_tree` and its backends.
//!
//! - The `util` module holds sample values and helpers shared by different topics.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that shared helpers are defined once.
//! - If you want to add new tests, put them into the module of their "topic" (nesting,
//!   multiline, reconcile, ...), or create a new one. Start test names with the topic, e.g.
//!   `multiline_nested_wrapper` rather than `nested_wrapper_multiline`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod util;
