// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place reconciliation of a live tree against a freshly built one.
//!
//! Rebuilding an editable surface from scratch destroys its native caret, selection and
//! composition state. Instead, the new content is built into a scratch subtree of the same
//! tree and [`reconcile`] moves over only what changed.

use alloc::string::String;

use crate::TreeAdapter;

/// Extra primitives needed to update a tree in place.
///
/// Trees that only support one-shot builds do not implement this.
pub trait ReconcileTree: TreeAdapter {
    /// Returns the child of `parent` at `index`.
    fn child_at(&self, parent: Self::Node, index: usize) -> Option<Self::Node>;

    /// Returns `true` if `a` can stand in for `b`: both are text nodes, or both are elements
    /// with the same tag, attributes and object flag, or both are the same placeholder.
    ///
    /// Children and text content are not compared.
    fn same_shape(&self, a: Self::Node, b: Self::Node) -> bool;

    /// Inserts the detached `node` into `parent` before `before`, or last when `before` is
    /// `None`.
    fn insert_before(&mut self, parent: Self::Node, node: Self::Node, before: Option<Self::Node>);

    /// Replaces the content of the text node `node`.
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Releases a detached `node` and its whole subtree.
    fn discard(&mut self, node: Self::Node);
}

/// Counts of the decisions taken by [`reconcile`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Live nodes kept as they were, possibly with new text.
    pub reused: usize,
    /// Live nodes removed and replaced by a new node at the same position.
    pub replaced: usize,
    /// New nodes added past the end of a live child list.
    pub inserted: usize,
    /// Live nodes removed without replacement.
    pub removed: usize,
    /// Reused text nodes whose content changed.
    pub text_updates: usize,
}

impl ReconcileStats {
    /// Returns `true` if the live tree was not touched at all.
    pub fn is_unchanged(&self) -> bool {
        self.replaced == 0 && self.inserted == 0 && self.removed == 0 && self.text_updates == 0
    }
}

/// Makes the children of `live` match the children of `future`, reusing live nodes wherever
/// their shape matches.
///
/// Both trees are walked in lockstep, depth first. A live node is kept whenever it has the
/// same shape as the new node at that position; text nodes are updated in place, and only if
/// their content actually differs, so text the editing surface already produced is never
/// rewritten. Where shapes diverge, the stale live subtree is removed first and the new node is
/// then moved into its position.
///
/// `future` is consumed: its children are either moved into `live` or discarded, and `future`
/// itself is left empty for the caller to discard.
pub fn reconcile<A: ReconcileTree>(tree: &mut A, live: A::Node, future: A::Node) -> ReconcileStats {
    let mut stats = ReconcileStats::default();
    reconcile_children(tree, live, future, &mut stats);
    log::debug!(
        "reconciled: {} reused, {} replaced, {} inserted, {} removed, {} text updates",
        stats.reused,
        stats.replaced,
        stats.inserted,
        stats.removed,
        stats.text_updates
    );
    stats
}

fn reconcile_children<A: ReconcileTree>(
    tree: &mut A,
    live: A::Node,
    future: A::Node,
    stats: &mut ReconcileStats,
) {
    let mut index = 0;
    while let Some(next) = tree.child_at(future, 0) {
        match tree.child_at(live, index) {
            Some(current) if tree.same_shape(current, next) => {
                stats.reused += 1;
                if tree.is_text(current) {
                    let differs = tree.text(current) != tree.text(next);
                    if differs {
                        let text = String::from(tree.text(next).unwrap_or_default());
                        tree.set_text(current, &text);
                        stats.text_updates += 1;
                    }
                } else {
                    reconcile_children(tree, current, next, stats);
                }
                let consumed = tree.remove(next);
                tree.discard(consumed);
            }
            Some(current) => {
                log::trace!("replacing live child {index}");
                let stale = tree.remove(current);
                tree.discard(stale);
                let next = tree.remove(next);
                let before = tree.child_at(live, index);
                tree.insert_before(live, next, before);
                stats.replaced += 1;
            }
            None => {
                let next = tree.remove(next);
                tree.insert_before(live, next, None);
                stats.inserted += 1;
            }
        }
        index += 1;
    }

    while let Some(extra) = tree.child_at(live, index) {
        let extra = tree.remove(extra);
        tree.discard(extra);
        stats.removed += 1;
    }
}
