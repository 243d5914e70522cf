// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between span-based and per-character formatting.
//!
//! Callers usually describe formatting as overlapping spans, while [`Value`](crate::Value)
//! stores one format set per character. [`sweep_ranges`] goes from the former to the latter
//! and [`FormatRuns`] groups the latter back into maximal runs.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Format, Formats};

/// Builds a per-character format table from overlapping spans.
///
/// Active spans are kept sorted by their index in `spans`, so every character sees its formats
/// in application order, except that object formats always come last (see [`objects_last`]).
/// Zero-length spans are skipped.
pub(crate) fn sweep_ranges(len: usize, spans: &[(Range<usize>, Arc<Format>)]) -> Vec<Formats> {
    let mut boundaries = Vec::with_capacity(2 + spans.len().saturating_mul(2));
    boundaries.push(0);
    boundaries.push(len);
    for (range, _) in spans {
        boundaries.push(range.start);
        boundaries.push(range.end);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let boundary_count = boundaries.len();
    let boundary_index = |offset: usize| {
        boundaries
            .binary_search(&offset)
            .expect("span boundary should be in boundary list")
    };

    // Start/end events keyed by boundary index, in a flat buffer plus an offsets array
    // giving the slice for each boundary.
    let mut start_offsets = vec![0_usize; boundary_count + 1];
    let mut end_offsets = vec![0_usize; boundary_count + 1];
    for (range, _) in spans.iter().filter(|(range, _)| !range.is_empty()) {
        start_offsets[boundary_index(range.start) + 1] += 1;
        end_offsets[boundary_index(range.end) + 1] += 1;
    }
    for i in 0..boundary_count {
        start_offsets[i + 1] += start_offsets[i];
        end_offsets[i + 1] += end_offsets[i];
    }

    let mut start_events = vec![0_usize; start_offsets[boundary_count]];
    let mut end_events = vec![0_usize; end_offsets[boundary_count]];
    let mut start_cursors = start_offsets.clone();
    let mut end_cursors = end_offsets.clone();
    for (id, (range, _)) in spans.iter().enumerate() {
        if range.is_empty() {
            continue;
        }
        let start_boundary = boundary_index(range.start);
        start_events[start_cursors[start_boundary]] = id;
        start_cursors[start_boundary] += 1;

        let end_boundary = boundary_index(range.end);
        end_events[end_cursors[end_boundary]] = id;
        end_cursors[end_boundary] += 1;
    }

    let mut table = Vec::with_capacity(len);
    let mut active: Vec<usize> = Vec::with_capacity(spans.len());
    for (index, pair) in boundaries.windows(2).enumerate() {
        for id in &end_events[end_offsets[index]..end_offsets[index + 1]] {
            if let Ok(ix) = active.binary_search(id) {
                active.remove(ix);
            }
        }
        for &id in &start_events[start_offsets[index]..start_offsets[index + 1]] {
            if let Err(ix) = active.binary_search(&id) {
                active.insert(ix, id);
            }
        }

        let mut formats: Formats = active.iter().map(|&id| spans[id].1.clone()).collect();
        objects_last(&mut formats);
        table.resize(pair[1], formats);
    }
    debug_assert_eq!(table.len(), len, "sweep should cover the whole text");
    table
}

/// Moves object formats behind every other format of a character, keeping relative order.
///
/// An object is a leaf, so it can only ever be the innermost element of a character.
pub(crate) fn objects_last(formats: &mut Formats) {
    formats.sort_by_key(|format| format.is_object());
}

/// Iterator over maximal runs of characters that share a format set.
///
/// Yields the char range of each run together with its formats. Adjacent characters whose
/// format sets compare equal belong to the same run.
#[derive(Clone, Debug)]
pub struct FormatRuns<'a> {
    formats: &'a [Formats],
    index: usize,
}

impl<'a> FormatRuns<'a> {
    pub(crate) fn new(formats: &'a [Formats]) -> Self {
        Self { formats, index: 0 }
    }
}

impl<'a> Iterator for FormatRuns<'a> {
    type Item = (Range<usize>, &'a [Arc<Format>]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let current = self.formats.get(start)?;
        let run_len = self.formats[start..]
            .iter()
            .take_while(|formats| *formats == current)
            .count();
        self.index = start + run_len;
        Some((start..self.index, current.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::sweep_ranges;
    use crate::{Format, Value};
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    fn tags_per_char(table: &[crate::Formats]) -> Vec<Vec<&str>> {
        table
            .iter()
            .map(|formats| formats.iter().map(|f| f.tag()).collect())
            .collect()
    }

    #[test]
    fn empty_text_has_empty_table() {
        assert!(sweep_ranges(0, &[]).is_empty());
    }

    #[test]
    fn overlapping_spans_keep_application_order() {
        let spans = [
            (2..5, Arc::new(Format::new("em"))),
            (1..4, Arc::new(Format::new("strong"))),
        ];
        let table = sweep_ranges(6, &spans);
        assert_eq!(
            tags_per_char(&table),
            [
                Vec::<&str>::new(),
                Vec::from(["strong"]),
                Vec::from(["em", "strong"]),
                Vec::from(["em", "strong"]),
                Vec::from(["em"]),
                Vec::new(),
            ]
        );
    }

    #[test]
    fn objects_sort_after_enclosing_formats() {
        let spans = [
            (1..2, Arc::new(Format::object("img"))),
            (0..3, Arc::new(Format::new("strong"))),
            (1..3, Arc::new(Format::new("em"))),
        ];
        let table = sweep_ranges(3, &spans);
        assert_eq!(
            tags_per_char(&table),
            [
                Vec::from(["strong"]),
                Vec::from(["strong", "em", "img"]),
                Vec::from(["strong", "em"]),
            ]
        );
    }

    #[test]
    fn empty_span_is_skipped() {
        let spans = [(2..2, Arc::new(Format::new("em")))];
        let table = sweep_ranges(4, &spans);
        assert!(table.iter().all(|formats| formats.is_empty()));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn format_runs_merge_equal_neighbours() {
        let value = Value::from_ranges(
            "abcdef",
            [
                (0..2, Format::new("em")),
                (2..4, Format::new("em")),
                (4..5, Format::new("strong")),
            ],
        )
        .unwrap();
        let runs: Vec<_> = value
            .format_runs()
            .map(|(range, formats)| (range, formats.len()))
            .collect();
        assert_eq!(runs, [(0..4, 1), (4..5, 1), (5..6, 0)]);
    }
}
