// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use log::{debug, warn};

use crate::{RenderedDocument, RenderedLine, SourceRange, Style};

/// The rendered lines produced by one `Annotator::render_from` call, and how
/// many source lines they cover.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Annotated {
    pub lines: Vec<RenderedLine>,
    pub consumed: usize,
}

impl Annotated {
    fn single(line: RenderedLine) -> Self {
        Self {
            lines: vec![line],
            consumed: 1,
        }
    }
}

/// Maps coverage ranges onto the lines of one source file.
///
/// Malformed ranges never fail: out-of-bounds columns are clamped to the line,
/// a range starting at column 0 leaves its line unstyled, and a range running
/// past the end of the file stops at the last line.
pub struct Annotator<'a, S> {
    lines: &'a [S],
}

impl<'a, S: AsRef<str>> Annotator<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines }
    }

    /// Number of source lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // 1-based; lines past the end of the file read as empty
    fn line(&self, number: usize) -> &'a str {
        number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(|line| line.as_ref())
            .unwrap_or("")
    }

    /// Render the line `start_line` given the ranges that start on it.
    ///
    /// A range spanning several lines renders every line it touches, so the
    /// result may hold more than one line. The caller must resume at
    /// `start_line + consumed`.
    ///
    /// # Arguments
    ///
    /// * `ranges` - Ranges whose `start_line` is `start_line`. Others are ignored.
    /// * `start_line` - 1-based number of the line to render
    pub fn render_from(&self, ranges: &[SourceRange], start_line: usize) -> Annotated {
        let text = self.line(start_line);
        let mut current = RenderedLine::labeled(start_line);

        let mut sorted: Vec<&SourceRange> = ranges
            .iter()
            .filter(|range| {
                let starts_here = range.start_line == start_line;
                if !starts_here {
                    warn!("ignoring range {range} queried for line {start_line}");
                }
                starts_here
            })
            .collect();

        if sorted.is_empty() {
            current.push(text, Style::Plain);
            return Annotated::single(current);
        }

        // stable, so ranges sharing a start column keep their input order
        sorted.sort_by_key(|range| range.start_column);

        let columns = Columns::new(text);
        let mut cursor = 0;

        for (index, range) in sorted.iter().enumerate() {
            let style = Style::coverage(range.covered);

            // a multi-line range's end column is on another line
            if !range.is_multiline() {
                // shadowed by an earlier range that ends later
                if range.end_column <= cursor + 1 {
                    continue;
                }
            }

            let start = match range.start_column.checked_sub(1) {
                Some(start) => columns.clamp(start).max(cursor),
                None => {
                    warn!("degenerate range {range}, leaving line {start_line} unstyled");
                    let mut raw = RenderedLine::labeled(start_line);
                    raw.push(text, Style::Plain);
                    return Annotated::single(raw);
                }
            };

            current.push(columns.slice(cursor, start), Style::Plain);

            if range.is_multiline() {
                let remaining = sorted.len() - index - 1;
                if remaining > 0 {
                    debug!("dropping {remaining} range(s) inside {range}");
                }

                current.push(columns.slice_from(start), style);
                return self.render_block(range, current, style);
            }

            let end = columns.clamp(range.end_column - 1).max(start);
            current.push(columns.slice(start, end), style);
            cursor = end;
        }

        current.push(columns.slice_from(cursor), Style::Plain);

        Annotated::single(current)
    }

    // Emits the lines after the first one of a multi-line range.
    fn render_block(&self, range: &SourceRange, first: RenderedLine, style: Style) -> Annotated {
        let mut lines = vec![first];

        let truncated = range.end_line > self.len();
        if truncated {
            warn!(
                "range {range} runs past the end of the file ({} lines)",
                self.len()
            );
        }
        let last = range.end_line.min(self.len()).max(range.start_line);

        for number in (range.start_line + 1)..last {
            let columns = Columns::new(self.line(number));
            let indent = columns.indent();

            let mut line = RenderedLine::labeled(number);
            line.push(columns.slice(0, indent), Style::Plain);
            line.push(columns.slice_from(indent), style);
            lines.push(line);
        }

        if last > range.start_line {
            let columns = Columns::new(self.line(last));
            let end = if truncated {
                columns.len()
            } else {
                columns.clamp(range.end_column.saturating_sub(1))
            };
            let indent = columns.indent().min(end);

            let mut line = RenderedLine::labeled(last);
            line.push(columns.slice(0, indent), Style::Plain);
            line.push(columns.slice(indent, end), style);
            line.push(columns.slice_from(end), Style::Plain);
            lines.push(line);
        }

        Annotated {
            lines,
            consumed: last - range.start_line + 1,
        }
    }

    /// Render the whole file, asking `ranges_at` for the ranges that start on
    /// each line it reaches. Lines consumed by a multi-line range are not
    /// queried.
    pub fn render_document<F>(&self, mut ranges_at: F) -> RenderedDocument
    where
        F: FnMut(usize) -> Vec<SourceRange>,
    {
        let mut lines = Vec::with_capacity(self.len());
        let mut number = 1;

        while number <= self.len() {
            let ranges = ranges_at(number);
            let annotated = self.render_from(&ranges, number);

            number += annotated.consumed;
            lines.extend(annotated.lines);
        }

        debug!("rendered {} lines", lines.len());

        RenderedDocument { lines }
    }
}

// Char-indexed view of a line. Columns count chars, so a slice never splits a
// UTF-8 sequence.
struct Columns<'a> {
    text: &'a str,
    // byte offset of every char, followed by `text.len()`
    offsets: Vec<usize>,
}

impl<'a> Columns<'a> {
    fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();

        Self { text, offsets }
    }

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn clamp(&self, column: usize) -> usize {
        column.min(self.len())
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);

        &self.text[self.offsets[start]..self.offsets[end]]
    }

    fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.len())
    }

    // Column of the first char that is neither a space nor a tab, or the line
    // length if the line is blank.
    fn indent(&self) -> usize {
        self.text
            .chars()
            .position(|c| c != ' ' && c != '\t')
            .unwrap_or_else(|| self.len())
    }
}
