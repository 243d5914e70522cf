// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use rich_value::{Format, Formats, LINE_SEPARATOR, OBJECT_REPLACEMENT_CHARACTER, Value};
use smallvec::SmallVec;

use crate::{Child, LINE_BREAK_ATTRIBUTE, PADDING_ATTRIBUTE, TreeAdapter, TreeOptions};

/// A position in a built tree, reported for the value's selection offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary<N> {
    /// Inside the text node `node`, `offset` chars from its start.
    InText {
        /// The text node.
        node: N,
        /// Offset in chars.
        offset: usize,
    },
    /// Directly after the void element `node`, within its parent.
    After(N),
    /// At the very start of the container `node`.
    Start(N),
}

/// The result of [`to_tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltTree<N> {
    /// The container holding the built content.
    pub root: N,
    /// Where the value's selection start landed, if it has one.
    pub start: Option<Boundary<N>>,
    /// Where the value's selection end landed, if it has one.
    pub end: Option<Boundary<N>>,
}

/// Builds a tree for `value` through `adapter`.
///
/// Formats are turned into nested elements: at every character the open elements are matched
/// against the character's formats in order, elements past the first mismatch are closed
/// (last opened first) and the remaining formats are opened in the order given. Runs of
/// characters under the same elements share one text node.
///
/// With a multiline tag, every line of the value is wrapped in its own element. Formats on a
/// line separator whose tag is a wrapper tag (for example `ul`) nest the following line inside
/// the previous one.
///
/// # Panics
///
/// Panics if the adapter returns a node whose parent does not resolve to the node it was
/// appended to.
///
/// Every [`Value`] constructor rejects format tables whose length differs from the text, so
/// a mismatched table cannot reach this function; the length is only re-checked in debug
/// builds.
///
/// # Example
///
/// A minimal arena adapter is enough to see the nesting.
///
/// ```
/// use rich_tree::{Child, TreeAdapter, TreeOptions, to_tree};
/// use rich_value::{Format, Value};
///
/// #[derive(Default)]
/// struct Flat {
///     nodes: Vec<(Option<usize>, Option<String>, Vec<usize>)>,
/// }
///
/// impl TreeAdapter for Flat {
///     type Node = usize;
///     fn create_empty(&mut self) -> usize {
///         self.nodes.push((None, None, Vec::new()));
///         self.nodes.len() - 1
///     }
///     fn append(&mut self, parent: usize, child: Child<'_>) -> usize {
///         let text = match child {
///             Child::Text(text) | Child::Placeholder(text) => Some(text.to_string()),
///             Child::Element(_) => None,
///         };
///         self.nodes.push((Some(parent), text, Vec::new()));
///         let id = self.nodes.len() - 1;
///         self.nodes[parent].2.push(id);
///         id
///     }
///     fn append_text(&mut self, node: usize, text: &str) {
///         self.nodes[node].1.as_mut().unwrap().push_str(text);
///     }
///     fn last_child(&self, parent: usize) -> Option<usize> {
///         self.nodes[parent].2.last().copied()
///     }
///     fn parent(&self, node: usize) -> Option<usize> {
///         self.nodes[node].0
///     }
///     fn is_text(&self, node: usize) -> bool {
///         self.nodes[node].1.is_some()
///     }
///     fn text(&self, node: usize) -> Option<&str> {
///         self.nodes[node].1.as_deref()
///     }
///     fn remove(&mut self, node: usize) -> usize {
///         if let Some(parent) = self.nodes[node].0.take() {
///             self.nodes[parent].2.retain(|&child| child != node);
///         }
///         node
///     }
/// }
///
/// let value = Value::from_ranges("bold move", [(0..4, Format::new("strong"))]).unwrap();
/// let mut flat = Flat::default();
/// let tree = to_tree(&value, &TreeOptions::new(), &mut flat);
///
/// let children = &flat.nodes[tree.root].2;
/// assert_eq!(children.len(), 2);
/// assert_eq!(flat.text(children[1]), Some(" move"));
/// let strong = children[0];
/// assert_eq!(flat.text(flat.last_child(strong).unwrap()), Some("bold"));
/// ```
pub fn to_tree<A: TreeAdapter>(
    value: &Value,
    options: &TreeOptions,
    adapter: &mut A,
) -> BuiltTree<A::Node> {
    let formats = value.formats();
    debug_assert_eq!(
        formats.len(),
        value.text().chars().count(),
        "format table must hold exactly one set per character"
    );

    let mut builder = Builder::new(adapter, options);
    let mut selection = Selection::new(value);
    let mut desired: SmallVec<[Arc<Format>; 8]> = SmallVec::new();
    let editable = options.is_editable();
    let multiline = builder.line.is_some();

    if let Some(line) = builder.line.clone() {
        builder.line_formats.push(line);
        desired.extend(builder.line_formats.iter().cloned());
        builder.sync(&desired, None);
    }
    selection.record(0, Boundary::Start(builder.top()));

    let mut last_char = None;
    for (index, (ch, char_formats)) in value.text().chars().zip(formats).enumerate() {
        if multiline && ch == LINE_SEPARATOR {
            if editable && matches!(last_char, None | Some(LINE_SEPARATOR | '\n')) {
                builder.pad();
            }
            builder.open_line(char_formats, &mut desired);
            selection.record(index + 1, Boundary::Start(builder.top()));
        } else {
            desired.clear();
            desired.extend(builder.line_formats.iter().cloned());
            desired.extend(char_formats.iter().filter(|f| !f.is_object()).cloned());
            builder.sync(&desired, None);
            let boundary = builder.push_char(ch, char_formats);
            selection.record(index + 1, boundary);
        }
        last_char = Some(ch);
    }

    if editable {
        if value.is_empty() {
            if let Some(placeholder) = options.placeholder() {
                builder.append(builder.top(), Child::Placeholder(placeholder));
            }
        } else if last_char == Some('\n') || (multiline && last_char == Some(LINE_SEPARATOR)) {
            builder.pad();
        }
    }
    builder.close_all();

    BuiltTree {
        root: builder.root,
        start: selection.start_boundary,
        end: selection.end_boundary,
    }
}

/// An element opened for a format and not yet closed.
#[derive(Debug)]
struct Open<N> {
    format: Arc<Format>,
    node: N,
}

struct Builder<'a, A: TreeAdapter> {
    adapter: &'a mut A,
    options: &'a TreeOptions,
    root: A::Node,
    stack: SmallVec<[Open<A::Node>; 8]>,
    /// Formats enclosing every character of the current line, outermost first.
    line_formats: SmallVec<[Arc<Format>; 4]>,
    line: Option<Arc<Format>>,
    line_break: Arc<Format>,
    padding: Arc<Format>,
    /// Length in chars of the text node most recently appended to.
    text_run: usize,
}

impl<'a, A: TreeAdapter> Builder<'a, A> {
    fn new(adapter: &'a mut A, options: &'a TreeOptions) -> Self {
        let root = adapter.create_empty();
        let line_break = if options.is_editable() {
            Format::object("br").with_attribute(LINE_BREAK_ATTRIBUTE, "true")
        } else {
            Format::object("br")
        };
        let padding = Format::object("br").with_attribute(PADDING_ATTRIBUTE, "true");
        Self {
            adapter,
            options,
            root,
            stack: SmallVec::new(),
            line_formats: SmallVec::new(),
            line: options.multiline_tag().map(|tag| Arc::new(Format::new(tag))),
            line_break: Arc::new(line_break),
            padding: Arc::new(padding),
            text_run: 0,
        }
    }

    fn top(&self) -> A::Node {
        self.stack.last().map_or(self.root, |open| open.node)
    }

    fn append(&mut self, parent: A::Node, child: Child<'_>) -> A::Node {
        let node = self.adapter.append(parent, child);
        assert_eq!(
            self.adapter.parent(node),
            Some(parent),
            "adapter returned a node whose parent does not resolve to where it was appended"
        );
        node
    }

    /// Closes open elements past the longest prefix shared with `desired`, then opens the rest
    /// of `desired`.
    ///
    /// With `force_new_from`, entries from that index on are reopened even when they match.
    fn sync(&mut self, desired: &[Arc<Format>], force_new_from: Option<usize>) {
        let mut common = self
            .stack
            .iter()
            .zip(desired)
            .take_while(|(open, format)| open.format == **format)
            .count();
        if let Some(limit) = force_new_from {
            common = common.min(limit);
        }

        while self.stack.len() > common {
            let closed = self.stack.pop().expect("stack is longer than the shared prefix");
            log::trace!("close <{}>", closed.format.tag());
        }
        for format in &desired[common..] {
            let parent = self.top();
            let node = self.append(parent, Child::Element(format));
            log::trace!("open <{}> at depth {}", format.tag(), self.stack.len());
            self.stack.push(Open {
                format: format.clone(),
                node,
            });
        }
    }

    /// Starts a new line after a separator carrying `separator_formats`.
    fn open_line(
        &mut self,
        separator_formats: &Formats,
        desired: &mut SmallVec<[Arc<Format>; 8]>,
    ) {
        let line = self
            .line
            .clone()
            .expect("lines are only opened in multiline mode");
        self.line_formats.clear();
        self.line_formats.push(line.clone());
        for format in separator_formats {
            if self.options.is_multiline_wrapper(format.tag()) {
                self.line_formats.push(format.clone());
                self.line_formats.push(line.clone());
            }
        }

        desired.clear();
        desired.extend(self.line_formats.iter().cloned());
        // The innermost line element always starts fresh, even if it equals the previous one.
        self.sync(desired, Some(desired.len() - 1));
    }

    /// Appends one character at the top of the stack and reports the position right after it.
    fn push_char(&mut self, ch: char, char_formats: &Formats) -> Boundary<A::Node> {
        let top = self.top();
        if ch == '\n' {
            let line_break = Arc::clone(&self.line_break);
            return Boundary::After(self.append(top, Child::Element(&line_break)));
        }
        if ch == OBJECT_REPLACEMENT_CHARACTER {
            let mut last = None;
            for object in char_formats.iter().filter(|f| f.is_object()) {
                last = Some(self.append(top, Child::Element(object)));
            }
            if let Some(node) = last {
                return Boundary::After(node);
            }
        }

        let mut buf = [0_u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        let node = match self
            .adapter
            .last_child(top)
            .filter(|&child| self.adapter.is_text(child))
        {
            Some(node) => {
                self.adapter.append_text(node, encoded);
                self.text_run += 1;
                node
            }
            None => {
                self.text_run = 1;
                self.append(top, Child::Text(encoded))
            }
        };
        Boundary::InText {
            node,
            offset: self.text_run,
        }
    }

    fn pad(&mut self) {
        let padding = Arc::clone(&self.padding);
        self.append(self.top(), Child::Element(&padding));
    }

    fn close_all(&mut self) {
        while let Some(closed) = self.stack.pop() {
            log::trace!("close <{}>", closed.format.tag());
        }
    }
}

/// Selection offsets of the value and the boundaries found for them so far.
struct Selection<N> {
    start: Option<usize>,
    end: Option<usize>,
    start_boundary: Option<Boundary<N>>,
    end_boundary: Option<Boundary<N>>,
}

impl<N: Copy> Selection<N> {
    fn new(value: &Value) -> Self {
        Self {
            start: value.start(),
            end: value.end(),
            start_boundary: None,
            end_boundary: None,
        }
    }

    /// Records `boundary` as the position of char offset `offset`.
    fn record(&mut self, offset: usize, boundary: Boundary<N>) {
        if self.start == Some(offset) && self.start_boundary.is_none() {
            self.start_boundary = Some(boundary);
        }
        if self.end == Some(offset) && self.end_boundary.is_none() {
            self.end_boundary = Some(boundary);
        }
    }
}
