// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;

use crate::pathtree::{NodeId, PathTree};

/// Expansion and selection state for a `PathTree`, keyed by node key.
///
/// The tree itself carries no presentation state. Keys that no longer name a
/// node are harmless, but the state is normally rebuilt with its tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TreeViewState {
    expanded: BTreeSet<String>,
    selected: Option<String>,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn expand(&mut self, key: &str) {
        self.expanded.insert(key.to_owned());
    }

    pub fn collapse(&mut self, key: &str) {
        self.expanded.remove(key);
    }

    /// Flip the expansion of `key`, returning whether it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_owned());
            true
        }
    }

    /// Expand `id` and every node below it.
    pub fn expand_all(&mut self, tree: &PathTree, id: NodeId) {
        for (node, _) in tree.walk_from(id) {
            self.expanded.insert(tree[node].key.clone());
        }
    }

    /// Collapse `id` and every node below it.
    pub fn collapse_all(&mut self, tree: &PathTree, id: NodeId) {
        for (node, _) in tree.walk_from(id) {
            self.expanded.remove(&tree[node].key);
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, key: impl Into<String>) {
        self.selected = Some(key.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The nodes a tree view shows: every root, and the children of every
    /// shown node that is expanded. Pre-order, with depths.
    pub fn visible(&self, tree: &PathTree) -> Vec<(NodeId, usize)> {
        let mut visible = vec![];
        let mut stack: Vec<(NodeId, usize)> =
            tree.roots().iter().rev().map(|id| (*id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            visible.push((id, depth));

            let node = &tree[id];
            if self.is_expanded(&node.key) {
                for child in node.children().iter().rev() {
                    stack.push((*child, depth + 1));
                }
            }
        }

        visible
    }
}
