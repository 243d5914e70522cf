// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use hashbrown::HashSet;

/// Configuration for [`to_tree`](crate::to_tree).
///
/// ```
/// use rich_tree::TreeOptions;
///
/// let options = TreeOptions::new()
///     .with_multiline_tag("li")
///     .with_multiline_wrapper_tags(["ul", "ol"])
///     .with_editable(true)
///     .with_placeholder("Type here");
/// assert_eq!(options.multiline_tag(), Some("li"));
/// assert!(options.is_multiline_wrapper("ol"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeOptions {
    multiline_tag: Option<Arc<str>>,
    multiline_wrapper_tags: HashSet<Arc<str>>,
    editable: bool,
    placeholder: Option<Arc<str>>,
}

impl TreeOptions {
    /// Creates options for a single-line, non-editable tree.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps each line of the value in an element with this tag.
    #[must_use]
    pub fn with_multiline_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.multiline_tag = Some(tag.into());
        self
    }

    /// Sets the tags under which lines may nest, such as `ul` for nested lists.
    #[must_use]
    pub fn with_multiline_wrapper_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<str>>,
    {
        self.multiline_wrapper_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Switches on editable-tree behavior: padding for empty lines, line break markers and the
    /// placeholder.
    #[must_use]
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets the text shown in an empty editable tree.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<Arc<str>>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// The tag each line is wrapped in, if the tree is multiline.
    #[inline]
    pub fn multiline_tag(&self) -> Option<&str> {
        self.multiline_tag.as_deref()
    }

    /// Returns `true` if lines may nest under elements with this tag.
    #[inline]
    pub fn is_multiline_wrapper(&self, tag: &str) -> bool {
        self.multiline_wrapper_tags.contains(tag)
    }

    /// The tags under which lines may nest, in no particular order.
    pub fn multiline_wrapper_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.multiline_wrapper_tags.iter().map(|tag| &**tag)
    }

    /// Returns `true` if the tree is built for an editable surface.
    #[inline]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// The placeholder text, if any.
    #[inline]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}
