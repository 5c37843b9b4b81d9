//! Reconstructed remix chain.
//!
//! A [`LineageTree`] is built once per query and handed to the caller as an
//! immutable value. Traversals use explicit stacks so that very deep chains
//! from untrusted data are walked without native recursion.

use serde::{Deserialize, Serialize};

use super::node::ContentNode;

/// A root ancestor and all of its transitive descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageTree {
    node: ContentNode,
    children: Vec<LineageTree>,
    is_current: bool,
}

impl LineageTree {
    pub(crate) fn new(node: ContentNode, children: Vec<LineageTree>) -> Self {
        Self {
            node,
            children,
            is_current: false,
        }
    }

    /// Node at this position
    pub fn node(&self) -> &ContentNode {
        &self.node
    }

    /// Direct remixes, oldest first
    pub fn children(&self) -> &[LineageTree] {
        &self.children
    }

    /// Whether this is the node the query asked about
    pub fn is_current(&self) -> bool {
        self.is_current
    }

    /// Set `is_current` on the first node with the given id.
    ///
    /// Returns false if the id is not in the tree.
    pub(crate) fn mark_current(&mut self, id: &str) -> bool {
        let mut stack: Vec<&mut LineageTree> = vec![self];

        while let Some(tree) = stack.pop() {
            if tree.node.id == id {
                tree.is_current = true;
                return true;
            }
            stack.extend(tree.children.iter_mut());
        }

        false
    }

    /// Pre-order iterator over all subtrees
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a tree holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of levels (a lone root has depth 1)
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((tree, level)) = stack.pop() {
            max = max.max(level);
            stack.extend(tree.children.iter().map(|c| (c, level + 1)));
        }

        max
    }

    /// Find the subtree rooted at `id`
    pub fn find(&self, id: &str) -> Option<&LineageTree> {
        self.iter().find(|t| t.node.id == id)
    }

    /// Whether `id` appears anywhere in the tree
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Subtree of the queried node, if marked
    pub fn current(&self) -> Option<&LineageTree> {
        self.iter().find(|t| t.is_current)
    }

    /// Ids in pre-order
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|t| t.node.id.as_str()).collect()
    }

    /// Nodes from the root down to `id` inclusive ("remix of" breadcrumb)
    pub fn path_to(&self, id: &str) -> Option<Vec<&ContentNode>> {
        let mut stack: Vec<(&LineageTree, usize)> = vec![(self, 0)];
        let mut path: Vec<&ContentNode> = Vec::new();

        while let Some((tree, level)) = stack.pop() {
            path.truncate(level);
            path.push(&tree.node);

            if tree.node.id == id {
                return Some(path);
            }

            stack.extend(tree.children.iter().rev().map(|c| (c, level + 1)));
        }

        None
    }
}

// Flatten before dropping so long chains do not recurse once per level.
impl Drop for LineageTree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut tree) = pending.pop() {
            pending.append(&mut tree.children);
        }
    }
}

/// Pre-order traversal of a [`LineageTree`]
pub struct Iter<'a> {
    stack: Vec<&'a LineageTree>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LineageTree;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children.iter().rev());
        Some(tree)
    }
}

impl<'a> IntoIterator for &'a LineageTree {
    type Item = &'a LineageTree;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
