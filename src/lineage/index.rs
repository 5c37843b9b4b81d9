//! Flat lookup structures built once per query.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::ContentNode;

/// id -> node
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: HashMap<String, ContentNode>,
}

impl NodeIndex {
    /// Look up a node by id
    pub fn get(&self, id: &str) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    /// Whether the id resolves
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of indexed nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// parent id -> child ids, each list in sibling order
#[derive(Debug, Clone, Default)]
pub struct ChildrenIndex {
    by_parent: HashMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl ChildrenIndex {
    /// Children of `parent_id`, oldest first
    pub fn children_of(&self, parent_id: &str) -> &[String] {
        self.by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of nodes that name no parent, in sibling order
    pub fn roots(&self) -> &[String] {
        &self.roots
    }
}

/// Sibling order: creation time ascending, undated last, then id
fn sibling_order(a: &ContentNode, b: &ContentNode) -> Ordering {
    let by_time = match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.id.cmp(&b.id))
}

/// Build both indexes in one pass over the merged snapshot.
///
/// Ids are expected to be unique; a repeated id keeps its first node.
pub fn build_indexes(nodes: Vec<ContentNode>) -> (NodeIndex, ChildrenIndex) {
    let mut index: HashMap<String, ContentNode> = HashMap::with_capacity(nodes.len());
    let mut by_parent: HashMap<String, Vec<String>> = HashMap::new();
    let mut roots = Vec::new();

    for node in nodes {
        if index.contains_key(&node.id) {
            continue;
        }
        match node.parent() {
            Some(parent) => by_parent
                .entry(parent.to_string())
                .or_default()
                .push(node.id.clone()),
            None => roots.push(node.id.clone()),
        }
        index.insert(node.id.clone(), node);
    }

    let sort = |ids: &mut Vec<String>| {
        ids.sort_by(|a, b| match (index.get(a), index.get(b)) {
            (Some(x), Some(y)) => sibling_order(x, y),
            _ => a.cmp(b),
        });
    };
    for children in by_parent.values_mut() {
        sort(children);
    }
    sort(&mut roots);

    (NodeIndex { nodes: index }, ChildrenIndex { by_parent, roots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_children_sorted_by_created_at() {
        let nodes = vec![
            ContentNode::new("root", "r", "a", "image"),
            ContentNode::new("late", "l", "a", "image")
                .with_parent("root")
                .with_created_at(at(300)),
            ContentNode::new("early", "e", "a", "image")
                .with_parent("root")
                .with_created_at(at(100)),
            ContentNode::new("mid", "m", "a", "image")
                .with_parent("root")
                .with_created_at(at(200)),
        ];

        let (index, children) = build_indexes(nodes);
        assert_eq!(index.len(), 4);
        assert_eq!(children.children_of("root"), ["early", "mid", "late"]);
        assert_eq!(children.roots(), ["root"]);
    }

    #[test]
    fn test_ties_and_missing_times_fall_back_to_id() {
        let nodes = vec![
            ContentNode::new("p", "p", "a", "image"),
            ContentNode::new("z", "z", "a", "image").with_parent("p"),
            ContentNode::new("c", "c", "a", "image")
                .with_parent("p")
                .with_created_at(at(50)),
            ContentNode::new("b", "b", "a", "image")
                .with_parent("p")
                .with_created_at(at(50)),
            ContentNode::new("a", "a", "a", "image").with_parent("p"),
        ];

        let (_, children) = build_indexes(nodes);
        assert_eq!(children.children_of("p"), ["b", "c", "a", "z"]);
    }

    #[test]
    fn test_dangling_parent_gets_own_bucket() {
        let nodes = vec![ContentNode::new("c", "c", "a", "image").with_parent("ghost")];

        let (index, children) = build_indexes(nodes);
        assert!(!index.contains("ghost"));
        assert_eq!(children.children_of("ghost"), ["c"]);
        assert!(children.roots().is_empty());
        assert!(children.children_of("c").is_empty());
    }
}
