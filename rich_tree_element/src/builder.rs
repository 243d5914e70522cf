// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use rich_tree::{Child, PLACEHOLDER_ATTRIBUTE, TreeAdapter};
use rich_value::{Attributes, Format};

use crate::{Element, ElementNode, Props};

/// A handle to a node of an [`ElementBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScratchId(usize);

#[derive(Debug)]
enum Scratch {
    Fragment,
    Text(String),
    Element(Format),
    Placeholder(String),
}

#[derive(Debug)]
struct Record {
    parent: Option<ScratchId>,
    node: Scratch,
    children: Vec<ScratchId>,
}

/// A mutable scratch tree that [`rich_tree::to_tree`] builds into.
///
/// Declarative element trees are immutable, so the build happens here and
/// [`ElementBuilder::finish`] converts the result in one pass.
#[derive(Debug, Default)]
pub struct ElementBuilder {
    records: Vec<Record>,
}

impl ElementBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the children of `root` into declarative elements.
    pub fn finish(&self, root: ScratchId) -> Vec<ElementNode> {
        self.records[root.0]
            .children
            .iter()
            .enumerate()
            .map(|(key, &child)| self.convert(child, key))
            .collect()
    }

    fn convert(&self, id: ScratchId, key: usize) -> ElementNode {
        let record = &self.records[id.0];
        match &record.node {
            Scratch::Text(text) => ElementNode::Text(Arc::from(text.as_str())),
            Scratch::Placeholder(text) => {
                let attributes = Attributes::new()
                    .with(PLACEHOLDER_ATTRIBUTE, text.as_str())
                    .with("contenteditable", "false");
                ElementNode::Element(Element {
                    tag: Arc::from("span"),
                    key,
                    props: Props::new(attributes),
                    children: Vec::new(),
                })
            }
            Scratch::Element(format) => ElementNode::Element(Element {
                tag: Arc::from(format.tag()),
                key,
                props: Props::new(format.attributes().clone()),
                children: if format.is_object() {
                    Vec::new()
                } else {
                    self.finish(id)
                },
            }),
            Scratch::Fragment => unreachable!("fragments are only ever roots"),
        }
    }
}

impl TreeAdapter for ElementBuilder {
    type Node = ScratchId;

    fn create_empty(&mut self) -> ScratchId {
        self.records.push(Record {
            parent: None,
            node: Scratch::Fragment,
            children: Vec::new(),
        });
        ScratchId(self.records.len() - 1)
    }

    fn append(&mut self, parent: ScratchId, child: Child<'_>) -> ScratchId {
        let node = match child {
            Child::Text(text) => Scratch::Text(text.to_string()),
            Child::Element(format) => Scratch::Element(format.clone()),
            Child::Placeholder(text) => Scratch::Placeholder(text.to_string()),
        };
        let id = ScratchId(self.records.len());
        self.records.push(Record {
            parent: Some(parent),
            node,
            children: Vec::new(),
        });
        self.records[parent.0].children.push(id);
        id
    }

    fn append_text(&mut self, node: ScratchId, text: &str) {
        match &mut self.records[node.0].node {
            Scratch::Text(existing) => existing.push_str(text),
            other => panic!("cannot append text to {other:?}"),
        }
    }

    fn last_child(&self, parent: ScratchId) -> Option<ScratchId> {
        self.records[parent.0].children.last().copied()
    }

    fn parent(&self, node: ScratchId) -> Option<ScratchId> {
        self.records[node.0].parent
    }

    fn is_text(&self, node: ScratchId) -> bool {
        matches!(self.records[node.0].node, Scratch::Text(_))
    }

    fn text(&self, node: ScratchId) -> Option<&str> {
        match &self.records[node.0].node {
            Scratch::Text(text) => Some(text),
            _ => None,
        }
    }

    fn remove(&mut self, node: ScratchId) -> ScratchId {
        if let Some(parent) = self.records[node.0].parent.take() {
            self.records[parent.0].children.retain(|&child| child != node);
        }
        node
    }
}
