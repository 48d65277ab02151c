// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Overrides the report's own title.
    pub title: Option<String>,

    /// Directory that relative source paths are resolved against.
    pub source_root: Option<PathBuf>,

    /// Only source paths matching this regex are shown. This is mostly useful
    /// to hide dependencies (e.g. the CRT) and should frequently be your
    /// project root.
    pub include: Option<String>,

    /// Separator used to split source paths into tree nodes.
    pub separator: char,

    pub color: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: None,
            source_root: None,
            include: None,
            separator: '/',
            color: true,
        }
    }
}

impl ViewerConfig {
    pub fn new(data: &[u8]) -> Result<Self> {
        let config = serde_json::from_slice(data)?;
        Ok(config)
    }

    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let data = std::fs::read(config_path)
            .with_context(|| format!("unable to read config: {}", config_path.display()))?;

        Self::new(&data)
            .with_context(|| format!("unable to parse config: {}", config_path.display()))
    }

    /// Compiles `include`, if set.
    pub fn include_regex(&self) -> Result<Option<Regex>> {
        let include = self
            .include
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid include regex")?;

        Ok(include)
    }
}
