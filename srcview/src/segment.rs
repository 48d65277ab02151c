// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Plain,
    Covered,
    NotCovered,
    LineLabel,
}

impl Style {
    pub fn coverage(covered: bool) -> Self {
        if covered {
            Style::Covered
        } else {
            Style::NotCovered
        }
    }
}

/// A contiguous run of text and the style it is drawn with.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StyledSegment {
    pub text: String,
    pub style: Style,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        Self { text, style }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }

    pub fn covered(text: impl Into<String>) -> Self {
        Self::new(text, Style::Covered)
    }

    pub fn not_covered(text: impl Into<String>) -> Self {
        Self::new(text, Style::NotCovered)
    }

    /// The label carries the 1-based line number. Padding is left to whoever
    /// draws it.
    pub fn line_label(line: usize) -> Self {
        Self::new(line.to_string(), Style::LineLabel)
    }
}

/// One physical source line, as a sequence of styled segments.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RenderedLine {
    pub segments: Vec<StyledSegment>,
}

impl RenderedLine {
    pub fn labeled(line: usize) -> Self {
        Self {
            segments: vec![StyledSegment::line_label(line)],
        }
    }

    /// Appends a segment. Empty plain text is dropped; empty styled text is
    /// kept out too, since it would draw nothing.
    pub fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }

        self.segments.push(StyledSegment::new(text, style));
    }

    /// The line number from the label segment, if there is one.
    pub fn number(&self) -> Option<usize> {
        self.segments
            .iter()
            .find(|s| s.style == Style::LineLabel)
            .and_then(|s| s.text.parse().ok())
    }

    /// The source text of the line, without its label.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| s.style != Style::LineLabel)
            .map(|s| s.text.as_str())
            .collect()
    }
}

/// The styled rendition of one source file, built in a single pass.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedDocument {
    pub lines: Vec<RenderedLine>,
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedLine> {
        self.lines.iter()
    }
}

impl FromIterator<RenderedLine> for RenderedDocument {
    fn from_iter<I: IntoIterator<Item = RenderedLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
