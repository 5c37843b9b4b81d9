//! Ancestor walking.
//!
//! Follows parent links from a start id up to the root. Every step either
//! returns or adds a new id to `visited`, so the walk ends after at most
//! `|NodeIndex| + 1` steps whatever the parent links look like.

use std::collections::HashSet;

use super::index::NodeIndex;

/// Outcome of walking parent links to the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSearch {
    /// Id the walk stopped at
    pub root_id: String,

    /// The parent chain looped back on itself
    pub cycle_detected: bool,

    /// Parent id named by the root that does not resolve
    pub orphan_parent: Option<String>,

    /// Ids walked through before reaching the root, start first
    pub path: Vec<String>,
}

/// Find the root ancestor of `start_id`.
///
/// - An unknown start id is its own (unresolved) root.
/// - A node whose parent does not resolve is the root; the dangling id is
///   reported in `orphan_parent`.
/// - When the next parent was already visited, the current node (the last
///   one before the repeat) is the root and `cycle_detected` is set.
pub fn find_root(start_id: &str, index: &NodeIndex) -> RootSearch {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut current = start_id;

    loop {
        let Some(node) = index.get(current) else {
            return RootSearch::done(current, false, None, path);
        };

        let Some(parent) = node.parent() else {
            return RootSearch::done(current, false, None, path);
        };

        if visited.contains(parent) || parent == current {
            return RootSearch::done(current, true, None, path);
        }

        if !index.contains(parent) {
            return RootSearch::done(current, false, Some(parent.to_string()), path);
        }

        visited.insert(current);
        path.push(current.to_string());
        current = parent;
    }
}

impl RootSearch {
    fn done(
        root_id: &str,
        cycle_detected: bool,
        orphan_parent: Option<String>,
        path: Vec<String>,
    ) -> Self {
        Self {
            root_id: root_id.to_string(),
            cycle_detected,
            orphan_parent,
            path,
        }
    }
}
