// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source file not found: `{}`", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read source file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source file is not valid UTF-8: `{}`", path.display())]
    Decode { path: PathBuf },
}

/// Reads the text of source files named by a coverage report.
pub trait SourceReader {
    fn read_all_lines(&self, path: &str) -> Result<Vec<String>, SourceError>;
}

/// Reads sources from disk. Relative paths are resolved against `root` when
/// one is set, and against the working directory otherwise.
#[derive(Clone, Debug, Default)]
pub struct FsSourceReader {
    root: Option<PathBuf>,
}

impl FsSourceReader {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl SourceReader for FsSourceReader {
    fn read_all_lines(&self, path: &str) -> Result<Vec<String>, SourceError> {
        let path = self.resolve(path);
        let data = std::fs::read(&path).map_err(|err| read_error(&path, err))?;
        let text = String::from_utf8(data).map_err(|_| SourceError::Decode { path })?;

        Ok(text.lines().map(str::to_owned).collect())
    }
}

fn read_error(path: &Path, err: io::Error) -> SourceError {
    let path = path.to_owned();

    if err.kind() == io::ErrorKind::NotFound {
        SourceError::NotFound { path }
    } else {
        SourceError::Read { path, source: err }
    }
}
