// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{self, Write};

use crossterm::style::{style, Color, Stylize};

use crate::pathtree::PathTree;
use crate::treestate::TreeViewState;
use crate::{format_percent, percent, CoverageModel, RenderedDocument, RenderedLine, Style};

/// Write a rendered document as terminal text, one source line per output
/// line. Each line starts with its right-aligned number and a gutter mark:
/// `-` if anything on it is not covered, `+` if something is covered.
pub fn write_document<W: Write>(
    out: &mut W,
    document: &RenderedDocument,
    color: bool,
) -> io::Result<()> {
    let width = document
        .iter()
        .filter_map(RenderedLine::number)
        .max()
        .unwrap_or(0)
        .to_string()
        .len();

    for line in document.iter() {
        write_line(out, line, width, color)?;
    }

    Ok(())
}

fn gutter(line: &RenderedLine) -> char {
    let has = |wanted: Style| line.segments.iter().any(|s| s.style == wanted);

    if has(Style::NotCovered) {
        '-'
    } else if has(Style::Covered) {
        '+'
    } else {
        ' '
    }
}

fn write_line<W: Write>(
    out: &mut W,
    line: &RenderedLine,
    width: usize,
    color: bool,
) -> io::Result<()> {
    for segment in &line.segments {
        let text = segment.text.as_str();

        match (segment.style, color) {
            (Style::LineLabel, _) => {
                let label = format!("{text:>width$} {} ", gutter(line));
                if color {
                    write!(out, "{}", style(label).with(Color::DarkGrey))?;
                } else {
                    write!(out, "{label}")?;
                }
            }
            (Style::Covered, true) => write!(out, "{}", style(text).on(Color::DarkGreen))?,
            (Style::NotCovered, true) => write!(out, "{}", style(text).on(Color::DarkRed))?,
            _ => write!(out, "{text}")?,
        }
    }

    writeln!(out)
}

/// Write the visible part of a path tree, one node per line. Files show their
/// block counts from `model`.
pub fn write_tree<W: Write, M: CoverageModel>(
    out: &mut W,
    tree: &PathTree,
    state: &TreeViewState,
    model: &M,
) -> io::Result<()> {
    for (id, depth) in state.visible(tree) {
        let node = &tree[id];
        let indent = "  ".repeat(depth);

        let marker = if node.children().is_empty() {
            ' '
        } else if state.is_expanded(&node.key) {
            '▾'
        } else {
            '▸'
        };

        write!(out, "{indent}{marker} {}", node.label)?;

        if node.is_leaf {
            let (covered, not_covered) = model.file_block_counts(&node.key);
            let total = covered + not_covered;
            write!(
                out,
                "  {covered}/{total} ({} %)",
                format_percent(percent(covered, total))
            )?;
        }

        writeln!(out)?;
    }

    Ok(())
}
