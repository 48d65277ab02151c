// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use log::{debug, info, warn};
use regex::Regex;

use crate::annotate::Annotator;
use crate::pathtree::{NodeId, PathTree};
use crate::source::{SourceError, SourceReader};
use crate::treestate::TreeViewState;
use crate::{coverage_title, CoverageModel, RenderedDocument, ViewerConfig};

/// A user action.
#[derive(Clone, Debug)]
pub enum Event<M> {
    /// Replace the current report.
    OpenReport { model: M, title: String },

    /// Select the tree node with this key. Selecting a file opens it.
    Select(String),

    Toggle(String),

    /// Expand a subtree, or the whole forest for `None`.
    ExpandAll(Option<String>),

    /// Collapse a subtree, or the whole forest for `None`.
    CollapseAll(Option<String>),
}

/// What a host should redraw after an event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    RefreshTree,
    ShowDocument { path: String },
    SetTitle(String),
}

/// A source file rendered with its coverage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenDocument {
    pub path: String,
    pub rendered: RenderedDocument,
}

/// Everything a coverage viewer shows, updated one event at a time.
///
/// New trees and documents are built completely before they replace the
/// current ones, so a host never sees a partial state.
pub struct Viewer<M, R> {
    reader: R,
    separator: char,
    include: Option<Regex>,
    model: Option<M>,
    tree: PathTree,
    state: TreeViewState,
    document: Option<OpenDocument>,
    title: String,
}

impl<M: CoverageModel, R: SourceReader> Viewer<M, R> {
    /// # Errors
    ///
    /// If the configured include regex cannot be compiled.
    pub fn new(reader: R, config: &ViewerConfig) -> Result<Self> {
        let include = config.include_regex()?;

        Ok(Self {
            reader,
            separator: config.separator,
            include,
            model: None,
            tree: PathTree::with_separator(config.separator),
            state: TreeViewState::new(),
            document: None,
            title: String::new(),
        })
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    pub fn state(&self) -> &TreeViewState {
        &self.state
    }

    pub fn document(&self) -> Option<&OpenDocument> {
        self.document.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn handle(&mut self, event: Event<M>) -> Result<Vec<Intent>> {
        let intents = match event {
            Event::OpenReport { model, title } => self.open_report(model, &title),
            Event::Select(key) => self.select(&key)?,
            Event::Toggle(key) => self.toggle(&key),
            Event::ExpandAll(key) => self.expand_all(key.as_deref()),
            Event::CollapseAll(key) => self.collapse_all(key.as_deref()),
        };

        Ok(intents)
    }

    fn open_report(&mut self, model: M, title: &str) -> Vec<Intent> {
        let paths: Vec<&str> = model
            .src_files()
            .into_iter()
            .filter(|path| match &self.include {
                Some(include) => include.is_match(path),
                None => true,
            })
            .collect();
        let tree = PathTree::from_paths(self.separator, &paths);

        // totals cover only the files the tree shows
        let (covered, total) = match &self.include {
            Some(_) => paths.iter().fold((0, 0), |(covered, total), path| {
                let (hit, missed) = model.file_block_counts(path);
                (covered + hit, total + hit + missed)
            }),
            None => model.total_block_counts(),
        };
        let title = coverage_title(title, covered, total);

        info!("opened report: {title}");

        self.model = Some(model);
        self.tree = tree;
        self.state = TreeViewState::new();
        self.document = None;
        self.title = title.clone();

        vec![Intent::RefreshTree, Intent::SetTitle(title)]
    }

    fn select(&mut self, key: &str) -> Result<Vec<Intent>> {
        let node = match self.tree.find(key) {
            Some(node) => node,
            None => {
                debug!("ignoring selection of unknown node: {key}");
                return Ok(vec![]);
            }
        };

        if !node.is_leaf {
            self.state.select(key);
            return Ok(vec![Intent::RefreshTree]);
        }

        let model = match &self.model {
            Some(model) => model,
            None => return Ok(vec![]),
        };

        let lines = match self.reader.read_all_lines(key) {
            Ok(lines) => lines,
            Err(SourceError::NotFound { path }) => {
                warn!("source file no longer exists: {}", path.display());
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };

        let rendered =
            Annotator::new(&lines).render_document(|line| model.ranges_starting_at(key, line));

        let (covered, not_covered) = model.file_block_counts(key);
        let title = coverage_title(key, covered, covered + not_covered);

        self.state.select(key);
        self.document = Some(OpenDocument {
            path: key.to_owned(),
            rendered,
        });
        self.title = title.clone();

        Ok(vec![
            Intent::RefreshTree,
            Intent::ShowDocument {
                path: key.to_owned(),
            },
            Intent::SetTitle(title),
        ])
    }

    fn toggle(&mut self, key: &str) -> Vec<Intent> {
        if self.tree.get(key).is_none() {
            return vec![];
        }

        self.state.toggle(key);

        vec![Intent::RefreshTree]
    }

    fn targets(&self, key: Option<&str>) -> Vec<NodeId> {
        match key {
            Some(key) => self.tree.get(key).into_iter().collect(),
            None => self.tree.roots().to_vec(),
        }
    }

    fn expand_all(&mut self, key: Option<&str>) -> Vec<Intent> {
        let targets = self.targets(key);

        for id in &targets {
            self.state.expand_all(&self.tree, *id);
        }

        refresh_if(!targets.is_empty())
    }

    fn collapse_all(&mut self, key: Option<&str>) -> Vec<Intent> {
        let targets = self.targets(key);

        for id in &targets {
            self.state.collapse_all(&self.tree, *id);
        }

        refresh_if(!targets.is_empty())
    }
}

fn refresh_if(changed: bool) -> Vec<Intent> {
    if changed {
        vec![Intent::RefreshTree]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod double;
