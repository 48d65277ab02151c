// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A span of source text tagged with its coverage status.
///
/// Lines and columns are 1-based. `end_column` is exclusive: on the line
/// `HelloWorld`, columns `5..9` select `oWo`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub covered: bool,
}

impl SourceRange {
    pub fn new(
        (start_line, start_column): (usize, usize),
        (end_line, end_column): (usize, usize),
        covered: bool,
    ) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
            covered,
        }
    }

    /// A range confined to a single line.
    pub fn single(line: usize, start_column: usize, end_column: usize, covered: bool) -> Self {
        Self::new((line, start_column), (line, end_column), covered)
    }

    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }

    /// Checks the line numbers only. Column problems are left to the
    /// annotator, which tolerates them.
    pub fn validate(&self) -> Result<()> {
        if self.start_line == 0 {
            bail!("source lines must be 1-indexed: {self}");
        }

        if self.end_line < self.start_line {
            bail!("range ends before it starts: {self}");
        }

        Ok(())
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}
