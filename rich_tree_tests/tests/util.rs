// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample values and helpers shared across tests.

use rich_tree::{TreeOptions, to_tree};
use rich_tree_markup::{MarkupTree, NodeId};
use rich_value::{Format, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER, Value};

/// A value paired with the options it is meant to be built with.
pub(crate) struct Sample {
    pub(crate) name: &'static str,
    pub(crate) value: Value,
    pub(crate) options: TreeOptions,
}

pub(crate) fn list_options() -> TreeOptions {
    TreeOptions::new()
        .with_multiline_tag("li")
        .with_multiline_wrapper_tags(["ul", "ol"])
}

fn link(href: &str) -> Format {
    Format::new("a").with_attribute("href", href)
}

/// Canonical values: formats in enclosing order, one object per replacement character.
pub(crate) fn samples() -> Vec<Sample> {
    let mut nested_list = Value::from_ranges(
        format!("fruit{LINE_SEPARATOR}apple{LINE_SEPARATOR}pear{LINE_SEPARATOR}veg"),
        [(6..11, Format::new("em"))],
    )
    .unwrap();
    nested_list.apply_format(5..6, Format::new("ul")).unwrap();
    nested_list.apply_format(11..12, Format::new("ul")).unwrap();

    let mut deep_list = Value::from_text(format!("a{LINE_SEPARATOR}b{LINE_SEPARATOR}c"));
    deep_list.apply_format(1..2, Format::new("ol")).unwrap();
    deep_list
        .apply_format(3..4, Format::new("ol").with_attribute("type", "i"))
        .unwrap();

    vec![
        Sample {
            name: "plain",
            value: Value::from_text("just some text"),
            options: TreeOptions::new(),
        },
        Sample {
            name: "overlapping",
            value: Value::from_ranges(
                "read the fine manual",
                [
                    (0..13, Format::new("strong")),
                    (9..20, link("https://example.invalid/?a=1&b=\"2\"")),
                    (14..20, Format::new("em")),
                ],
            )
            .unwrap(),
            options: TreeOptions::new(),
        },
        Sample {
            name: "escaped",
            value: Value::from_ranges("1 < 2 && 3 > 2", [(2..3, Format::new("code"))]).unwrap(),
            options: TreeOptions::new(),
        },
        Sample {
            name: "objects",
            value: Value::from_ranges(
                format!("see {OBJECT_REPLACEMENT_CHARACTER} and\nmore"),
                [
                    (0..9, Format::new("em")),
                    (
                        4..5,
                        Format::object("img")
                            .with_attribute("src", "cat.png")
                            .with_attribute("alt", "a cat"),
                    ),
                ],
            )
            .unwrap(),
            options: TreeOptions::new(),
        },
        Sample {
            name: "object_listed_first",
            value: Value::from_ranges(
                format!("a{OBJECT_REPLACEMENT_CHARACTER}b"),
                [
                    (1..2, Format::object("img").with_attribute("src", "x")),
                    (0..3, Format::new("strong")),
                ],
            )
            .unwrap(),
            options: TreeOptions::new(),
        },
        Sample {
            name: "editable_breaks",
            value: Value::from_ranges("one\n\ntwo\n", [(4..9, Format::new("s"))]).unwrap(),
            options: TreeOptions::new().with_editable(true),
        },
        Sample {
            name: "paragraphs",
            value: Value::from_ranges(
                format!("first{LINE_SEPARATOR}{LINE_SEPARATOR}third"),
                [(3..5, Format::new("b")), (7..10, Format::new("b"))],
            )
            .unwrap(),
            options: TreeOptions::new()
                .with_multiline_tag("p")
                .with_editable(true)
                .with_placeholder("Start writing"),
        },
        Sample {
            name: "nested_list",
            value: nested_list,
            options: list_options(),
        },
        Sample {
            name: "deep_list",
            value: deep_list,
            options: list_options().with_editable(true),
        },
    ]
}

/// Builds `value` into a fresh markup tree.
pub(crate) fn markup(value: &Value, options: &TreeOptions) -> (MarkupTree, NodeId) {
    let mut tree = MarkupTree::new();
    let root = to_tree(value, options, &mut tree).root;
    (tree, root)
}
