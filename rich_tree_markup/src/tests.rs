// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::ToString;

use rich_tree::{TreeAdapter, TreeOptions, to_tree};
use rich_value::{Format, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER, Value};

use crate::{MarkupNode, MarkupTree, ParseErrorKind, ParseOptions, parse_html, to_html_string};

#[test]
fn escapes_text_and_attributes() {
    let value = Value::from_ranges(
        "<&>",
        [(0..3, Format::new("span").with_attribute("title", "\"x\" & <y>"))],
    )
    .unwrap();
    assert_eq!(
        to_html_string(&value, &TreeOptions::new()),
        "<span title=\"&quot;x&quot; &amp; &lt;y&gt;\">&lt;&amp;&gt;</span>"
    );
}

#[test]
fn attributes_are_written_in_name_order() {
    let link = Format::new("a")
        .with_attribute("target", "_blank")
        .with_attribute("href", "#");
    let value = Value::from_ranges("x", [(0..1, link)]).unwrap();
    assert_eq!(
        to_html_string(&value, &TreeOptions::new()),
        "<a href=\"#\" target=\"_blank\">x</a>"
    );
}

#[test]
fn unwritable_attribute_names_are_skipped() {
    let span = Format::new("span")
        .with_attribute("a b", "1")
        .with_attribute("x\"=y", "2")
        .with_attribute("data-ok", "3");
    let value = Value::from_ranges("x", [(0..1, span)]).unwrap();
    let html = to_html_string(&value, &TreeOptions::new());
    assert_eq!(html, "<span data-ok=\"3\">x</span>");

    let parsed = parse_html(&html, &ParseOptions::new()).unwrap();
    let attributes = parsed.formats_at(0).unwrap()[0].attributes().clone();
    assert_eq!(attributes.iter().count(), 1);
    assert_eq!(attributes.get("data-ok"), Some("3"));
}

#[test]
fn objects_and_breaks_are_void() {
    let text = format!("a{OBJECT_REPLACEMENT_CHARACTER}\nb");
    let image = Format::object("img").with_attribute("src", "a.png");
    let value = Value::from_ranges(text, [(1..2, image)]).unwrap();
    assert_eq!(
        to_html_string(&value, &TreeOptions::new()),
        "a<img src=\"a.png\"><br>b"
    );
}

#[test]
fn placeholder_span() {
    let options = TreeOptions::new()
        .with_editable(true)
        .with_placeholder("Say \"hi\"");
    assert_eq!(
        to_html_string(&Value::new(), &options),
        "<span data-rich-text-placeholder=\"Say &quot;hi&quot;\" contenteditable=\"false\"></span>"
    );
}

#[test]
fn editable_markup_round_trips() {
    let options = TreeOptions::new()
        .with_multiline_tag("p")
        .with_editable(true)
        .with_placeholder("empty");
    let value = Value::from_ranges(
        format!("a\n{LINE_SEPARATOR}{LINE_SEPARATOR}b"),
        [(0..1, Format::new("strong"))],
    )
    .unwrap();
    let html = to_html_string(&value, &options);
    assert_eq!(
        html,
        "<p><strong>a</strong><br data-rich-text-line-break=\"true\">\
         <br data-rich-text-padding=\"true\"></p>\
         <p><br data-rich-text-padding=\"true\"></p><p>b</p>"
    );
    assert_eq!(parse_html(&html, &ParseOptions::from(&options)).unwrap(), value);

    let empty = to_html_string(&Value::new(), &options);
    assert_eq!(
        parse_html(&empty, &ParseOptions::from(&options)).unwrap(),
        Value::new()
    );
}

#[test]
fn nested_lines_round_trip() {
    let options = TreeOptions::new()
        .with_multiline_tag("li")
        .with_multiline_wrapper_tags(["ol"]);
    let mut value = Value::from_text(format!("a{LINE_SEPARATOR}b{LINE_SEPARATOR}c"));
    value
        .apply_format(1..2, Format::new("ol").with_attribute("start", "2"))
        .unwrap();
    let html = to_html_string(&value, &options);
    assert_eq!(html, "<li>a<ol start=\"2\"><li>b</li></ol></li><li>c</li>");
    assert_eq!(parse_html(&html, &ParseOptions::from(&options)).unwrap(), value);
}

#[test]
fn parse_lenient_forms() {
    let options = ParseOptions::new().with_void_tags(["math"]);
    let value = parse_html(
        "<!-- note --><b class=x>1<math alt=\"&lt;\"/>2<hr/></b>",
        &options,
    )
    .unwrap();
    assert_eq!(
        value.text(),
        format!("1{OBJECT_REPLACEMENT_CHARACTER}2{OBJECT_REPLACEMENT_CHARACTER}")
    );
    let formats = value.formats_at(1).unwrap();
    assert_eq!(formats[0].attributes().get("class"), Some("x"));
    assert!(formats[1].is_object());
    assert_eq!(formats[1].attributes().get("alt"), Some("<"));
    assert_eq!(value.formats_at(3).unwrap()[1].tag(), "hr");
}

#[test]
fn parse_errors() {
    let options = ParseOptions::new();
    let unterminated = parse_html("ab<em", &options).unwrap_err();
    assert_eq!(unterminated.kind(), ParseErrorKind::UnterminatedTag);
    assert_eq!(unterminated.offset(), 2);

    let mismatched = parse_html("<em>a</b>", &options).unwrap_err();
    assert_eq!(mismatched.kind(), ParseErrorKind::UnexpectedClosingTag);
    assert_eq!(mismatched.offset(), 5);

    let unclosed = parse_html("x<em><b>a</b>", &options).unwrap_err();
    assert_eq!(unclosed.kind(), ParseErrorKind::UnclosedElement);
    assert_eq!(unclosed.offset(), 1);
    assert_eq!(
        unclosed.to_string(),
        "element opened at byte 1 is never closed"
    );
}

#[test]
fn removed_nodes_are_detached() {
    let value = Value::from_ranges("ab", [(1..2, Format::new("em"))]).unwrap();
    let mut tree = MarkupTree::new();
    let root = to_tree(&value, &TreeOptions::new(), &mut tree).root;
    let em = tree.children(root)[1];
    assert!(matches!(tree.node(em), MarkupNode::Element(_)));

    let removed = tree.remove(em);
    assert_eq!(removed, em);
    assert_eq!(tree.parent(em), None);
    assert_eq!(tree.to_html(root), "a");
    assert_eq!(tree.subtree_len(root), 2);
}
