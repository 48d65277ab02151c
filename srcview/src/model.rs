// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::SourceRange;

/// Read access to computed coverage, keyed by source path.
pub trait CoverageModel {
    /// Source paths, in report order.
    fn src_files(&self) -> Vec<&str>;

    /// Ranges of `path` that start on the 1-based line `line`.
    fn ranges_starting_at(&self, path: &str, line: usize) -> Vec<SourceRange>;

    /// `(covered, not_covered)` blocks of `path`.
    fn file_block_counts(&self, path: &str) -> (usize, usize);

    /// `(covered, total)` blocks over every file.
    fn total_block_counts(&self) -> (usize, usize);
}

/// Coverage ranges of a set of source files, as loaded from a JSON document.
///
/// Every range counts as one block.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CoverageReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub files: Vec<FileCoverage>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FileCoverage {
    /// Path to the source file, as recorded by the coverage tool.
    pub path: String,

    #[serde(default)]
    pub ranges: Vec<SourceRange>,
}

impl FileCoverage {
    pub fn block_counts(&self) -> (usize, usize) {
        let covered = self.ranges.iter().filter(|r| r.covered).count();
        (covered, self.ranges.len() - covered)
    }
}

impl CoverageReport {
    /// Parse a report from JSON, rejecting ranges with impossible lines.
    pub fn new(data: &[u8]) -> Result<Self> {
        let report: Self = serde_json::from_slice(data)?;

        for file in &report.files {
            for range in &file.ranges {
                range
                    .validate()
                    .with_context(|| format!("invalid range in {}", file.path))?;
            }
        }

        Ok(report)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("unable to read coverage report: {}", path.display()))?;

        Self::new(&data)
            .with_context(|| format!("unable to parse coverage report: {}", path.display()))
    }

    pub fn file(&self, path: &str) -> Option<&FileCoverage> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Drop every file whose path does not match `include`.
    pub fn retain_matching(&mut self, include: &Regex) {
        self.files.retain(|f| include.is_match(&f.path));
    }
}

impl CoverageModel for CoverageReport {
    fn src_files(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    fn ranges_starting_at(&self, path: &str, line: usize) -> Vec<SourceRange> {
        match self.file(path) {
            Some(file) => file
                .ranges
                .iter()
                .filter(|r| r.start_line == line)
                .copied()
                .collect(),
            None => vec![],
        }
    }

    fn file_block_counts(&self, path: &str) -> (usize, usize) {
        self.file(path)
            .map(FileCoverage::block_counts)
            .unwrap_or_default()
    }

    fn total_block_counts(&self) -> (usize, usize) {
        self.files.iter().fold((0, 0), |(covered, total), file| {
            let (hit, missed) = file.block_counts();
            (covered + hit, total + hit + missed)
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const MAIN_C: &str = "src/bin/main.c";
    const COMMON_C: &str = "src/lib/common.c";

    fn report_json() -> serde_json::Value {
        json!({
            "title": "example",
            "files": [
                {
                    "path": MAIN_C,
                    "ranges": [
                        { "start_line": 4, "start_column": 5, "end_line": 4, "end_column": 9, "covered": true },
                        { "start_line": 4, "start_column": 1, "end_line": 4, "end_column": 3, "covered": false },
                        { "start_line": 9, "start_column": 1, "end_line": 12, "end_column": 2, "covered": true },
                    ],
                },
                {
                    "path": COMMON_C,
                    "ranges": [
                        { "start_line": 5, "start_column": 1, "end_line": 5, "end_column": 8, "covered": false },
                    ],
                },
                {
                    "path": "README",
                },
            ],
        })
    }

    #[test]
    fn test_report_queries() -> Result<()> {
        let text = serde_json::to_vec(&report_json())?;
        let report = CoverageReport::new(&text)?;

        assert_eq!(report.title.as_deref(), Some("example"));
        assert_eq!(report.src_files(), vec![MAIN_C, COMMON_C, "README"]);

        assert_eq!(
            report.ranges_starting_at(MAIN_C, 4),
            vec![
                SourceRange::single(4, 5, 9, true),
                SourceRange::single(4, 1, 3, false),
            ]
        );
        assert_eq!(
            report.ranges_starting_at(MAIN_C, 9),
            vec![SourceRange::new((9, 1), (12, 2), true)]
        );
        assert!(report.ranges_starting_at(MAIN_C, 10).is_empty());
        assert!(report.ranges_starting_at("missing.c", 4).is_empty());

        assert_eq!(report.file_block_counts(MAIN_C), (2, 1));
        assert_eq!(report.file_block_counts(COMMON_C), (0, 1));
        assert_eq!(report.file_block_counts("README"), (0, 0));
        assert_eq!(report.file_block_counts("missing.c"), (0, 0));
        assert_eq!(report.total_block_counts(), (2, 4));

        Ok(())
    }

    #[test]
    fn test_invalid_ranges_are_rejected() -> Result<()> {
        let zero_line = json!({
            "files": [
                {
                    "path": MAIN_C,
                    "ranges": [
                        { "start_line": 0, "start_column": 1, "end_line": 1, "end_column": 2, "covered": true },
                    ],
                },
            ],
        });
        let text = serde_json::to_vec(&zero_line)?;
        assert!(CoverageReport::new(&text).is_err());

        let backwards = json!({
            "files": [
                {
                    "path": MAIN_C,
                    "ranges": [
                        { "start_line": 3, "start_column": 1, "end_line": 2, "end_column": 2, "covered": true },
                    ],
                },
            ],
        });
        let text = serde_json::to_vec(&backwards)?;
        assert!(CoverageReport::new(&text).is_err());

        assert!(CoverageReport::new(b"{}").is_err());

        Ok(())
    }

    #[test]
    fn test_retain_matching() -> Result<()> {
        let text = serde_json::to_vec(&report_json())?;
        let mut report = CoverageReport::new(&text)?;

        report.retain_matching(&Regex::new(r"^src/lib/")?);

        assert_eq!(report.src_files(), vec![COMMON_C]);
        assert_eq!(report.total_block_counts(), (0, 1));

        Ok(())
    }
}
