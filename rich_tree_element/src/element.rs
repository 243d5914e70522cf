// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;

use rich_tree::{TreeOptions, to_tree};
use rich_value::{Attributes, Value};

use crate::ElementBuilder;

/// A node of a declarative element tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementNode {
    /// Text, passed through verbatim. Escaping is up to the renderer.
    Text(Arc<str>),
    /// An element.
    Element(Element),
}

/// A declarative element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// The element type.
    pub tag: Arc<str>,
    /// The position of the element among its siblings, for renderers that diff keyed lists.
    pub key: usize,
    /// Attributes and renderer hints.
    pub props: Props,
    /// Child nodes. Always empty for void objects and placeholders.
    pub children: Vec<ElementNode>,
}

/// Properties of an [`Element`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props {
    /// The element's attributes.
    pub attributes: Attributes,
    /// Set when the element carries `contenteditable`, to silence renderers that warn about
    /// managing children of editable elements.
    pub suppress_content_editable_warning: bool,
}

impl Props {
    /// Creates props for `attributes`, deriving the renderer hints from them.
    pub fn new(attributes: Attributes) -> Self {
        Self {
            suppress_content_editable_warning: attributes.contains("contenteditable"),
            attributes,
        }
    }
}

/// Builds the declarative element tree for `value`.
///
/// ```
/// use rich_tree::TreeOptions;
/// use rich_tree_element::{ElementNode, to_element};
/// use rich_value::{Format, Value};
///
/// let value = Value::from_ranges("a b", [(2..3, Format::new("em"))]).unwrap();
/// let nodes = to_element(&value, &TreeOptions::new());
/// assert_eq!(nodes[0], ElementNode::Text("a ".into()));
/// let ElementNode::Element(em) = &nodes[1] else { panic!("expected an element") };
/// assert_eq!((&*em.tag, em.key), ("em", 1));
/// assert_eq!(em.children, [ElementNode::Text("b".into())]);
/// ```
pub fn to_element(value: &Value, options: &TreeOptions) -> Vec<ElementNode> {
    let mut builder = ElementBuilder::new();
    let built = to_tree(value, options, &mut builder);
    let nodes = builder.finish(built.root);
    log::trace!("built {} top-level elements", nodes.len());
    nodes
}
