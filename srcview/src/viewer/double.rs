// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;

use super::*;

#[derive(Clone, Debug, Default)]
pub struct SourceReaderDouble {
    pub files: BTreeMap<String, Vec<String>>,
    pub unreadable: BTreeSet<String>,
}

impl SourceReaderDouble {
    pub fn with_file(mut self, path: &str, text: &str) -> Self {
        let lines = text.lines().map(str::to_owned).collect();
        self.files.insert(path.to_owned(), lines);
        self
    }
}

impl SourceReader for SourceReaderDouble {
    fn read_all_lines(&self, path: &str) -> Result<Vec<String>, SourceError> {
        if self.unreadable.contains(path) {
            return Err(SourceError::Read {
                path: PathBuf::from(path),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            });
        }

        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                path: PathBuf::from(path),
            })
    }
}
