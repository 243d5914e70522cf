// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_value::Format;

/// A node to be appended by [`TreeAdapter::append`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Child<'a> {
    /// A raw text value, to be wrapped in a new text node.
    Text(&'a str),
    /// An element described by a format: its tag, attributes and whether it is a void object.
    Element(&'a Format),
    /// Placeholder text for an empty editable tree.
    ///
    /// This is not content: adapters should keep it distinguishable from text nodes so it can be
    /// styled or suppressed.
    Placeholder(&'a str),
}

/// The primitive operations the tree builder needs from a concrete tree representation.
///
/// Implementations are mechanical: they create, link and inspect nodes, and never make
/// formatting decisions of their own. Nodes are handles (typically arena indices), so the
/// parent back-reference is a plain lookup rather than an owning pointer.
pub trait TreeAdapter {
    /// A handle to a node in the tree.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Creates a new container node with no parent.
    fn create_empty(&mut self) -> Self::Node;

    /// Appends `child` as the last child of `parent` and returns the new node.
    fn append(&mut self, parent: Self::Node, child: Child<'_>) -> Self::Node;

    /// Extends the content of the text node `node` by `text`.
    fn append_text(&mut self, node: Self::Node, text: &str);

    /// Returns the most recently appended child of `parent`.
    fn last_child(&self, parent: Self::Node) -> Option<Self::Node>;

    /// Returns the node owning `node`, or `None` for a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns `true` if `node` is a text node.
    ///
    /// Placeholder nodes are not text nodes.
    fn is_text(&self, node: Self::Node) -> bool;

    /// Returns the content of a text node, or `None` for any other node.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Detaches `node` from its parent and returns it, so it can be reused or discarded.
    fn remove(&mut self, node: Self::Node) -> Self::Node;
}
