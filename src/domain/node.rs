//! Canonical content node shared by every lineage component.
//!
//! Dynamic records and static catalog entries arrive in different shapes;
//! both are normalized into [`ContentNode`] before any graph work happens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque content kind tag (image, audio, video, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentKind(String);

impl ContentKind {
    /// Create a kind tag from any string
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Which source a node was normalized from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOrigin {
    /// Mutable, externally fetched record set
    Dynamic,

    /// Fixed in-process catalog
    Static,
}

impl std::fmt::Display for NodeOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeOrigin::Dynamic => write!(f, "dynamic"),
            NodeOrigin::Static => write!(f, "static"),
        }
    }
}

/// One piece of content with optional single-parent provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Identifier, unique within a snapshot
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Display name of the author
    pub author_name: String,

    /// Kind tag, opaque to lineage reconstruction
    pub kind: ContentKind,

    /// Id of the node this one was remixed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Creation time, used to order siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Source the node came from
    pub origin: NodeOrigin,
}

impl ContentNode {
    /// Create a parentless dynamic node
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author_name: impl Into<String>,
        kind: impl Into<ContentKind>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author_name: author_name.into(),
            kind: kind.into(),
            parent_id: None,
            created_at: None,
            origin: NodeOrigin::Dynamic,
        }
    }

    /// Minimal stand-in for an id that does not resolve in the snapshot
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::new(id, "", "", ContentKind::default())
    }

    /// Set the parent id
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Parent id, if the node names a non-blank one
    pub fn parent(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    /// Whether the node names no parent at all
    pub fn is_original(&self) -> bool {
        self.parent().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_parent_is_no_parent() {
        let node = ContentNode::new("a", "A", "ann", "image").with_parent("  ");
        assert!(node.parent().is_none());
        assert!(node.is_original());

        let remix = ContentNode::new("b", "B", "bob", "image").with_parent("a");
        assert_eq!(remix.parent(), Some("a"));
    }

    #[test]
    fn test_parent_id_is_matched_verbatim() {
        let node = ContentNode::new("b", "B", "bob", "image").with_parent("a ");
        assert_eq!(node.parent(), Some("a "));
    }

    #[test]
    fn test_placeholder_carries_only_id() {
        let node = ContentNode::placeholder("gone");
        assert_eq!(node.id, "gone");
        assert!(node.title.is_empty());
        assert!(node.parent_id.is_none());
    }

    #[test]
    fn test_node_serialization_skips_empty_fields() {
        let node = ContentNode::new("a", "A", "ann", "audio");
        let json = serde_json::to_string(&node).unwrap();

        assert!(!json.contains("parent_id"));
        assert!(json.contains("\"kind\":\"audio\""));
        assert!(json.contains("\"origin\":\"dynamic\""));
    }
}
