//! Source aggregation.
//!
//! Merges the dynamic record set and the static catalog into one node
//! sequence with a single identity space. Dynamic records win id
//! collisions against the catalog; within the dynamic set the first
//! occurrence of an id wins.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::domain::{ContentNode, NodeOrigin, RemixRecord};
use crate::sources::StaticCatalog;

use super::error::Diagnostic;

/// Merged snapshot plus any collisions dropped while merging
#[derive(Debug, Clone)]
pub struct Aggregate {
    /// Dynamic nodes in fetched order, then static nodes in catalog order
    pub nodes: Vec<ContentNode>,

    /// One `IdCollision` per dropped duplicate
    pub collisions: Vec<Diagnostic>,
}

/// Normalize and merge both sources
pub fn aggregate(records: Vec<RemixRecord>, catalog: &StaticCatalog) -> Aggregate {
    let mut kept: HashMap<String, NodeOrigin> =
        HashMap::with_capacity(records.len() + catalog.len());
    let mut nodes = Vec::with_capacity(records.len() + catalog.len());
    let mut collisions = Vec::new();

    let dynamic = records.into_iter().map(ContentNode::from);
    for node in dynamic.chain(catalog.nodes()) {
        if let Some(&origin) = kept.get(&node.id) {
            collisions.push(Diagnostic::IdCollision {
                id: node.id,
                kept: origin,
                dropped: node.origin,
            });
            continue;
        }
        kept.insert(node.id.clone(), node.origin);
        nodes.push(node);
    }

    Aggregate { nodes, collisions }
}

/// Fingerprint of a snapshot's identities and parent links (16 hex chars).
///
/// Independent of input order, so two fetches of the same data agree.
pub fn snapshot_digest(nodes: &[ContentNode]) -> String {
    let mut links: Vec<(&str, &str)> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent().unwrap_or("")))
        .collect();
    links.sort_unstable();

    let mut hasher = Sha256::new();
    for (id, parent) in links {
        hasher.update(id.as_bytes());
        hasher.update([0u8]);
        hasher.update(parent.as_bytes());
        hasher.update([b'\n']);
    }
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::CatalogEntry;

    #[test]
    fn test_dynamic_then_static_order() {
        let records = vec![
            RemixRecord::new("b", "B", "bob", "image").remix_of("s1"),
            RemixRecord::new("a", "A", "ann", "image"),
        ];
        let catalog = StaticCatalog::from_entries([CatalogEntry::new("s1", "Loop", "Band", "audio")]);

        let merged = aggregate(records, &catalog);
        let ids: Vec<&str> = merged.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "s1"]);
        assert!(merged.collisions.is_empty());
        assert_eq!(merged.nodes[2].origin, NodeOrigin::Static);
    }

    #[test]
    fn test_dynamic_wins_collision_with_static() {
        let records = vec![RemixRecord::new("x", "Dynamic X", "ann", "image").remix_of("a")];
        let catalog =
            StaticCatalog::from_entries([CatalogEntry::new("x", "Static X", "Band", "audio")]);

        let merged = aggregate(records, &catalog);
        assert_eq!(merged.nodes.len(), 1);
        assert_eq!(merged.nodes[0].title, "Dynamic X");
        assert_eq!(merged.nodes[0].parent(), Some("a"));
        assert_eq!(
            merged.collisions,
            vec![Diagnostic::IdCollision {
                id: "x".into(),
                kept: NodeOrigin::Dynamic,
                dropped: NodeOrigin::Static,
            }]
        );
    }

    #[test]
    fn test_first_dynamic_duplicate_wins() {
        let records = vec![
            RemixRecord::new("x", "first", "ann", "image"),
            RemixRecord::new("x", "second", "ann", "image"),
        ];

        let merged = aggregate(records, &StaticCatalog::new());
        assert_eq!(merged.nodes.len(), 1);
        assert_eq!(merged.nodes[0].title, "first");
        assert_eq!(merged.collisions.len(), 1);
    }

    #[test]
    fn test_digest_ignores_order_but_tracks_links() {
        let a = ContentNode::new("a", "A", "ann", "image");
        let b = ContentNode::new("b", "B", "bob", "image").with_parent("a");

        let d1 = snapshot_digest(&[a.clone(), b.clone()]);
        let d2 = snapshot_digest(&[b.clone(), a.clone()]);
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 16);

        let relinked = ContentNode::new("b", "B", "bob", "image");
        assert_ne!(d1, snapshot_digest(&[a, relinked]));
    }
}
