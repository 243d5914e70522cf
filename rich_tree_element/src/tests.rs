// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::vec::Vec;

use rich_tree::{PLACEHOLDER_ATTRIBUTE, TreeOptions};
use rich_value::{Format, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER, Value};

use crate::{Element, ElementNode, to_element};

fn element(node: &ElementNode) -> &Element {
    match node {
        ElementNode::Element(element) => element,
        ElementNode::Text(text) => panic!("expected an element, found text {text:?}"),
    }
}

#[test]
fn text_is_verbatim() {
    let nodes = to_element(&Value::from_text("<b> & </b>"), &TreeOptions::new());
    assert_eq!(nodes, [ElementNode::Text("<b> & </b>".into())]);
}

#[test]
fn keys_are_sibling_indices() {
    let options = TreeOptions::new().with_multiline_tag("p");
    let value = Value::from_ranges(
        format!("x{LINE_SEPARATOR}a b"),
        [(2..3, Format::new("em")), (4..5, Format::new("em"))],
    )
    .unwrap();
    let nodes = to_element(&value, &options);
    let keys: Vec<_> = nodes.iter().map(|node| element(node).key).collect();
    assert_eq!(keys, [0, 1]);

    let second = element(&nodes[1]);
    assert_eq!(second.children.len(), 3);
    assert_eq!(element(&second.children[0]).key, 0);
    assert_eq!(second.children[1], ElementNode::Text(" ".into()));
    assert_eq!(element(&second.children[2]).key, 2);
}

#[test]
fn objects_have_no_children() {
    let text = format!("{OBJECT_REPLACEMENT_CHARACTER}");
    let image = Format::object("img").with_attribute("alt", "cat");
    let value = Value::from_ranges(text, [(0..1, image)]).unwrap();
    let nodes = to_element(&value, &TreeOptions::new());
    let img = element(&nodes[0]);
    assert_eq!(&*img.tag, "img");
    assert_eq!(img.props.attributes.get("alt"), Some("cat"));
    assert!(img.children.is_empty());
    assert!(!img.props.suppress_content_editable_warning);
}

#[test]
fn placeholder_suppresses_editable_warning() {
    let options = TreeOptions::new()
        .with_editable(true)
        .with_placeholder("Caption");
    let nodes = to_element(&Value::new(), &options);
    assert_eq!(nodes.len(), 1);
    let span = element(&nodes[0]);
    assert_eq!(&*span.tag, "span");
    assert_eq!(span.props.attributes.get(PLACEHOLDER_ATTRIBUTE), Some("Caption"));
    assert_eq!(span.props.attributes.get("contenteditable"), Some("false"));
    assert!(span.props.suppress_content_editable_warning);
    assert!(span.children.is_empty());

    assert!(to_element(&Value::new(), &TreeOptions::new()).is_empty());
}

#[test]
fn contenteditable_format_sets_hint() {
    let island = Format::new("span").with_attribute("contenteditable", "false");
    let value = Value::from_ranges("x", [(0..1, island)]).unwrap();
    let nodes = to_element(&value, &TreeOptions::new());
    assert!(element(&nodes[0]).props.suppress_content_editable_warning);
}
