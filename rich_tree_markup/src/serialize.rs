// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use rich_tree::{PLACEHOLDER_ATTRIBUTE, TreeOptions, to_tree};
use rich_value::{Format, Value};

use crate::{MarkupNode, MarkupTree, NodeId};

/// Appends `text` to `out`, escaping `&`, `<` and `>`.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Appends `value` to `out` for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => escape_text(ch.encode_utf8(&mut [0; 4]), out),
        }
    }
}

/// Returns `true` if `name` can be written as an attribute name and read back unchanged.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|ch| {
            ch.is_whitespace()
                || ch.is_control()
                || matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Writes the start tag of the element described by `format`, attributes in name order.
///
/// Attributes whose name fails [`is_valid_attribute_name`] are skipped.
pub fn write_start_tag(format: &Format, out: &mut String) {
    out.push('<');
    out.push_str(format.tag());
    for (name, value) in format.attributes() {
        if !is_valid_attribute_name(name) {
            log::debug!("skipping attribute {name:?} on <{}>", format.tag());
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
    out.push('>');
}

/// Writes the end tag for `format`. Object formats are void and have none.
pub fn write_end_tag(format: &Format, out: &mut String) {
    if !format.is_object() {
        out.push_str("</");
        out.push_str(format.tag());
        out.push('>');
    }
}

/// Writes a placeholder as a non-editable span carrying its text in an attribute.
pub fn write_placeholder(text: &str, out: &mut String) {
    out.push_str("<span ");
    out.push_str(PLACEHOLDER_ATTRIBUTE);
    out.push_str("=\"");
    escape_attribute(text, out);
    out.push_str("\" contenteditable=\"false\"></span>");
}

impl MarkupTree {
    /// Serializes the children of `node` to HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            MarkupNode::Fragment => {
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
            }
            MarkupNode::Text(text) => escape_text(text, out),
            MarkupNode::Placeholder(text) => write_placeholder(text, out),
            MarkupNode::Element(format) => {
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

/// Renders `value` to an HTML string in one go.
///
/// ```
/// use rich_tree::TreeOptions;
/// use rich_tree_markup::to_html_string;
/// use rich_value::{Format, Value};
///
/// let value = Value::from_ranges(
///     "a < b",
///     [(0..1, Format::new("a").with_attribute("href", "/x?y=\"z\""))],
/// )
/// .unwrap();
/// assert_eq!(
///     to_html_string(&value, &TreeOptions::new()),
///     "<a href=\"/x?y=&quot;z&quot;\">a</a> &lt; b"
/// );
/// ```
pub fn to_html_string(value: &Value, options: &TreeOptions) -> String {
    let mut tree = MarkupTree::new();
    let built = to_tree(value, options, &mut tree);
    tree.to_html(built.root)
}
