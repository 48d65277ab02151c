// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::ops::Index;

use log::debug;

/// Handle to a node of a `PathTree`. Only meaningful for the tree that issued
/// it: a rebuilt tree invalidates every previous handle.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// A directory or file in a `PathTree`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathNode {
    /// Last path segment of this node.
    pub label: String,

    /// Segments from the root down to this node, joined by the separator.
    /// Unique within the tree.
    pub key: String,

    /// Set if some inserted path ends at this node.
    pub is_leaf: bool,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl PathNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A forest of path segments, built from a flat list of file paths.
///
/// Every prefix of an inserted path gets exactly one node, registered under
/// its prefix key, so files sharing directories share ancestor nodes.
///
/// # Example
///
/// ```
/// use srcview::PathTree;
///
/// let mut tree = PathTree::new();
/// tree.insert_path("src/main.c");
/// tree.insert_path("src/util.c");
///
/// let src = tree.get("src").unwrap();
/// assert_eq!(tree[src].children().len(), 2);
/// assert!(tree.find("src/util.c").unwrap().is_leaf);
/// ```
#[derive(Clone, Debug)]
pub struct PathTree {
    separator: char,
    nodes: Vec<PathNode>,
    roots: Vec<NodeId>,
    lookup: BTreeMap<String, NodeId>,
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTree {
    /// Create an empty tree splitting paths on `/`
    pub fn new() -> Self {
        Self::with_separator('/')
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            nodes: vec![],
            roots: vec![],
            lookup: BTreeMap::new(),
        }
    }

    /// Build a tree from `paths`, in order.
    pub fn from_paths<I, P>(separator: char, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut tree = Self::with_separator(separator);

        for path in paths {
            tree.insert_path(path.as_ref());
        }

        tree
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Insert `path`, creating a node for each of its prefixes that has none
    /// yet. Inserting a path twice adds nothing.
    ///
    /// An empty segment, as in `a//b` or a leading `/`, becomes a node with an
    /// empty label.
    pub fn insert_path(&mut self, path: &str) {
        let segments: Vec<&str> = path.split(self.separator).collect();
        let mut key = String::with_capacity(path.len());
        let mut parent = None;

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                key.push(self.separator);
            }
            key.push_str(segment);

            let is_leaf = index + 1 == segments.len();

            let id = match self.lookup.get(&key) {
                Some(&id) => {
                    if is_leaf {
                        self.nodes[id.0].is_leaf = true;
                    }
                    id
                }
                None => self.add_node(parent, segment, &key, is_leaf),
            };

            parent = Some(id);
        }
    }

    fn add_node(&mut self, parent: Option<NodeId>, label: &str, key: &str, is_leaf: bool) -> NodeId {
        debug!("adding path node: {key}");

        let id = NodeId(self.nodes.len());

        self.nodes.push(PathNode {
            label: label.to_owned(),
            key: key.to_owned(),
            is_leaf,
            parent,
            children: vec![],
        });

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }

        self.lookup.insert(key.to_owned(), id);

        id
    }

    /// Top-level nodes, in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node by its prefix key.
    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.lookup.get(key).copied()
    }

    pub fn find(&self, key: &str) -> Option<&PathNode> {
        self.get(key).and_then(|id| self.node(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Walk up from the parent of `id` to its root, returning the first node
    /// that satisfies `predicate`. `id` itself is not tested.
    pub fn find_ancestor<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&PathNode) -> bool,
    {
        let mut current = self.parent(id);

        while let Some(ancestor) = current {
            let node = self.node(ancestor)?;

            if predicate(node) {
                return Some(ancestor);
            }

            current = node.parent;
        }

        None
    }

    /// Depth-first, pre-order walk over every tree of the forest.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self, &self.roots)
    }

    /// Depth-first, pre-order walk over `id` and its descendants. Depths are
    /// relative to `id`.
    pub fn walk_from(&self, id: NodeId) -> Walk<'_> {
        Walk::new(self, &[id])
    }
}

impl Index<NodeId> for PathTree {
    type Output = PathNode;

    fn index(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }
}

/// Pre-order iterator over `(node, depth)` pairs.
pub struct Walk<'a> {
    tree: &'a PathTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Walk<'a> {
    fn new(tree: &'a PathTree, start: &[NodeId]) -> Self {
        // reversed so the first node is popped first
        let stack = start
            .iter()
            .rev()
            .filter(|id| tree.node(**id).is_some())
            .map(|id| (*id, 0))
            .collect();

        Self { tree, stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;

        for child in self.tree[id].children.iter().rev() {
            self.stack.push((*child, depth + 1));
        }

        Some((id, depth))
    }
}

#[cfg(test)]
mod tests;
