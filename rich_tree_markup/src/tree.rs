// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rich_tree::{Child, TreeAdapter};
use rich_value::Format;

/// A handle to a node of a [`MarkupTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The content of one node of a [`MarkupTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    /// A container without markup of its own, such as the root of a build.
    Fragment,
    /// A text node.
    Text(String),
    /// An element, void when its format is an object.
    Element(Format),
    /// Placeholder text of an empty editable tree.
    Placeholder(String),
}

#[derive(Clone, Debug)]
struct Record {
    parent: Option<NodeId>,
    node: MarkupNode,
    children: Vec<NodeId>,
}

/// An arena of plain markup records.
///
/// Every node ever created stays in the arena; removed nodes are only detached. This makes the
/// tree cheap to build once and serialize, which is all it is meant for.
#[derive(Clone, Debug, Default)]
pub struct MarkupTree {
    records: Vec<Record>,
}

impl MarkupTree {
    /// Creates an empty arena.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content of `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &MarkupNode {
        &self.records[id.0].node
    }

    /// Returns the children of `id` in order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.records[id.0].children
    }

    /// Counts `id` and all of its descendants.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        1 + self
            .children(id)
            .iter()
            .map(|&child| self.subtree_len(child))
            .sum::<usize>()
    }

    /// Returns `true` if the subtrees under `a` and `b` have equal content and structure.
    pub fn same_subtree(&self, a: NodeId, b: NodeId) -> bool {
        let (left, right) = (self.children(a), self.children(b));
        self.node(a) == self.node(b)
            && left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|(&a, &b)| self.same_subtree(a, b))
    }

    fn push(&mut self, parent: Option<NodeId>, node: MarkupNode) -> NodeId {
        let id = NodeId(self.records.len());
        self.records.push(Record {
            parent,
            node,
            children: Vec::new(),
        });
        id
    }
}

impl TreeAdapter for MarkupTree {
    type Node = NodeId;

    fn create_empty(&mut self) -> NodeId {
        self.push(None, MarkupNode::Fragment)
    }

    fn append(&mut self, parent: NodeId, child: Child<'_>) -> NodeId {
        let node = match child {
            Child::Text(text) => MarkupNode::Text(text.to_string()),
            Child::Element(format) => MarkupNode::Element(format.clone()),
            Child::Placeholder(text) => MarkupNode::Placeholder(text.to_string()),
        };
        let id = self.push(Some(parent), node);
        self.records[parent.0].children.push(id);
        id
    }

    fn append_text(&mut self, node: NodeId, text: &str) {
        match &mut self.records[node.0].node {
            MarkupNode::Text(existing) => existing.push_str(text),
            other => panic!("cannot append text to {other:?}"),
        }
    }

    fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last().copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.records[node.0].parent
    }

    fn is_text(&self, node: NodeId) -> bool {
        matches!(self.node(node), MarkupNode::Text(_))
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match self.node(node) {
            MarkupNode::Text(text) => Some(text),
            _ => None,
        }
    }

    fn remove(&mut self, node: NodeId) -> NodeId {
        if let Some(parent) = self.records[node.0].parent.take() {
            self.records[parent.0].children.retain(|&child| child != node);
        }
        node
    }
}
