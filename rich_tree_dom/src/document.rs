// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rich_tree::{Child, ReconcileTree, TreeAdapter};
use rich_tree_markup::{escape_text, write_end_tag, write_placeholder, write_start_tag};
use rich_value::Format;

/// A handle to a node of a [`Document`].
///
/// Handles are generational: once a node is discarded, its handle never resolves again, even
/// if the slot is reused for a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// The content of one node of a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A container without markup of its own, such as an editable root.
    Fragment,
    /// A text node.
    Text(String),
    /// An element, void when its format is an object.
    Element(Format),
    /// Placeholder text of an empty editable tree.
    Placeholder(String),
}

#[derive(Clone, Debug)]
struct Entry {
    parent: Option<NodeId>,
    kind: NodeKind,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// An in-memory document tree that is edited in place.
///
/// Nodes live in an arena of slots. Discarded slots are recycled, with a bumped generation so
/// that stale handles are detected.
#[derive(Clone, Debug, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Document {
    /// Creates an empty document.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty root for editable content.
    #[inline]
    pub fn create_root(&mut self) -> NodeId {
        self.alloc(None, NodeKind::Fragment)
    }

    /// Returns `true` if `id` refers to a node that has not been discarded.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the content of `id`, or `None` if it has been discarded.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|entry| &entry.kind)
    }

    /// Returns the children of `id` in order. A discarded node has none.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], |entry| &entry.children[..])
    }

    /// Returns the number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Serializes the children of `id` the way `rich_tree_markup` does.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Replaces the content of the text node `id`, as native text input would.
    ///
    /// # Panics
    ///
    /// Panics if `id` has been discarded or is not a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        match &mut self.entry_mut(id).kind {
            NodeKind::Text(existing) => {
                existing.clear();
                existing.push_str(text);
            }
            other => panic!("cannot set text of {other:?}"),
        }
    }

    fn get(&self, id: NodeId) -> Option<&Entry> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry(&self, id: NodeId) -> &Entry {
        self.get(id).expect("node id refers to a discarded node")
    }

    fn entry_mut(&mut self, id: NodeId) -> &mut Entry {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
            .expect("node id refers to a discarded node")
    }

    fn alloc(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let entry = Entry {
            parent,
            kind,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.entry = Some(entry);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.entry(id).kind {
            NodeKind::Fragment => {
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeKind::Text(text) => escape_text(text, out),
            NodeKind::Placeholder(text) => write_placeholder(text, out),
            NodeKind::Element(format) => {
                write_start_tag(format, out);
                if !format.is_object() {
                    for &child in self.children(id) {
                        self.write_node(child, out);
                    }
                }
                write_end_tag(format, out);
            }
        }
    }
}

impl TreeAdapter for Document {
    type Node = NodeId;

    fn create_empty(&mut self) -> NodeId {
        self.create_root()
    }

    fn append(&mut self, parent: NodeId, child: Child<'_>) -> NodeId {
        let kind = match child {
            Child::Text(text) => NodeKind::Text(text.to_string()),
            Child::Element(format) => NodeKind::Element(format.clone()),
            Child::Placeholder(text) => NodeKind::Placeholder(text.to_string()),
        };
        let id = self.alloc(Some(parent), kind);
        self.entry_mut(parent).children.push(id);
        id
    }

    fn append_text(&mut self, node: NodeId, text: &str) {
        match &mut self.entry_mut(node).kind {
            NodeKind::Text(existing) => existing.push_str(text),
            other => panic!("cannot append text to {other:?}"),
        }
    }

    fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last().copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|entry| entry.parent)
    }

    fn is_text(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Text(_)))
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn remove(&mut self, node: NodeId) -> NodeId {
        if let Some(parent) = self.entry_mut(node).parent.take() {
            self.entry_mut(parent).children.retain(|&child| child != node);
        }
        node
    }
}

impl ReconcileTree for Document {
    fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    fn same_shape(&self, a: NodeId, b: NodeId) -> bool {
        match (&self.entry(a).kind, &self.entry(b).kind) {
            (NodeKind::Text(_), NodeKind::Text(_)) => true,
            (NodeKind::Fragment, _) | (_, NodeKind::Fragment) => false,
            (a, b) => a == b,
        }
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, before: Option<NodeId>) {
        debug_assert!(
            self.entry(node).parent.is_none(),
            "only detached nodes can be inserted"
        );
        let children = &mut self.entry_mut(parent).children;
        let index = before
            .and_then(|before| children.iter().position(|&child| child == before))
            .unwrap_or(children.len());
        children.insert(index, node);
        self.entry_mut(node).parent = Some(parent);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        Self::set_text(self, node, text);
    }

    fn discard(&mut self, node: NodeId) {
        debug_assert!(
            self.entry(node).parent.is_none(),
            "only detached nodes can be discarded"
        );
        let mut pending = Vec::from([node]);
        while let Some(id) = pending.pop() {
            let slot = &mut self.slots[id.index];
            if slot.generation != id.generation {
                continue;
            }
            if let Some(entry) = slot.entry.take() {
                pending.extend(entry.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }
}
