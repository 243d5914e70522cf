// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_tree::{
    Boundary, ReconcileStats, ReconcileTree, TreeAdapter, TreeOptions, reconcile, to_tree,
};
use rich_value::Value;
use smallvec::SmallVec;

use crate::{Document, NodeId};

/// A position in a [`Document`], in the style of a DOM range boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomPoint {
    /// The text node or container the position is in.
    pub node: NodeId,
    /// Chars into a text node, or a child index into a container.
    pub offset: usize,
}

/// The outcome of [`Document::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    /// What reconciliation did to the live tree.
    pub stats: ReconcileStats,
    /// Where the value's selection start is in the live tree, if it has one.
    pub start: Option<DomPoint>,
    /// Where the value's selection end is in the live tree, if it has one.
    pub end: Option<DomPoint>,
}

/// A boundary expressed as child indices from the root, so it survives the move from the
/// scratch tree into the live one.
#[derive(Debug)]
struct IndexPath {
    steps: SmallVec<[usize; 8]>,
    offset: usize,
}

impl Document {
    /// Brings the content of `root` in line with `value`, touching as few nodes as possible.
    ///
    /// The value is first built into a scratch subtree of this document, which is then
    /// reconciled into `root` and discarded. Nodes whose shape did not change keep their
    /// [`NodeId`], and text nodes that already hold the right text are not written to.
    ///
    /// # Panics
    ///
    /// Panics if `root` has been discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use rich_tree::TreeOptions;
    /// use rich_tree_dom::Document;
    /// use rich_value::{Format, Value};
    ///
    /// let mut document = Document::new();
    /// let root = document.create_root();
    /// let options = TreeOptions::new().with_editable(true);
    ///
    /// let value = Value::from_ranges("hi there", [(0..2, Format::new("b"))]).unwrap();
    /// document.apply(root, &value, &options);
    /// let bold = document.children(root)[0];
    ///
    /// let value = Value::from_ranges("hi you", [(0..2, Format::new("b"))]).unwrap();
    /// let applied = document.apply(root, &value, &options);
    /// assert_eq!(document.inner_html(root), "<b>hi</b> you");
    /// assert_eq!(document.children(root)[0], bold);
    /// assert_eq!(applied.stats.text_updates, 1);
    /// ```
    pub fn apply(&mut self, root: NodeId, value: &Value, options: &TreeOptions) -> Applied {
        assert!(self.contains(root), "cannot apply a value to a discarded root");
        let built = to_tree(value, options, self);
        let start = built.start.map(|boundary| self.index_path(built.root, boundary));
        let end = built.end.map(|boundary| self.index_path(built.root, boundary));

        let stats = reconcile(self, root, built.root);
        self.discard(built.root);
        log::debug!("applied {} chars, {} live nodes", value.char_len(), self.node_count());

        Applied {
            stats,
            start: start.and_then(|path| self.resolve(root, &path)),
            end: end.and_then(|path| self.resolve(root, &path)),
        }
    }

    fn index_path(&self, root: NodeId, boundary: Boundary<NodeId>) -> IndexPath {
        let (node, offset) = match boundary {
            Boundary::InText { node, offset } => (node, offset),
            Boundary::Start(node) => (node, 0),
            Boundary::After(node) => {
                let parent = self.parent(node).expect("a void element always has a parent");
                (parent, self.index_in_parent(node) + 1)
            }
        };
        let mut steps = SmallVec::new();
        let mut current = node;
        while current != root {
            steps.push(self.index_in_parent(current));
            current = self
                .parent(current)
                .expect("boundary node is a descendant of the built root");
        }
        steps.reverse();
        IndexPath { steps, offset }
    }

    fn index_in_parent(&self, node: NodeId) -> usize {
        let parent = self.parent(node).expect("node has a parent");
        self.children(parent)
            .iter()
            .position(|&child| child == node)
            .expect("node is among its parent's children")
    }

    fn resolve(&self, root: NodeId, path: &IndexPath) -> Option<DomPoint> {
        let mut node = root;
        for &step in &path.steps {
            node = self.child_at(node, step)?;
        }
        Some(DomPoint {
            node,
            offset: path.offset,
        })
    }
}
