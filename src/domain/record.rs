//! Dynamic record shape as returned by content providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::{ContentKind, ContentNode, NodeOrigin};

/// A user-created content record from the external store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemixRecord {
    /// Record identifier
    pub id: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// Display name of the author
    #[serde(default, alias = "author")]
    pub author_name: String,

    /// Kind tag (image, audio, video, ...)
    #[serde(default)]
    pub kind: ContentKind,

    /// Id of the record this one remixes
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub remix_of: Option<String>,

    /// When the record was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RemixRecord {
    /// Create an original (non-remix) record
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
            remix_of: None,
            created_at: None,
        }
    }

    /// Mark the record as a remix of another
    pub fn remix_of(mut self, parent_id: impl Into<String>) -> Self {
        self.remix_of = Some(parent_id.into());
        self
    }

    /// Set the creation time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

impl From<RemixRecord> for ContentNode {
    fn from(record: RemixRecord) -> Self {
        let parent_id = record.remix_of.filter(|p| !p.trim().is_empty());

        ContentNode {
            id: record.id,
            title: record.title,
            author_name: record.author_name,
            kind: record.kind,
            parent_id,
            created_at: record.created_at,
            origin: NodeOrigin::Dynamic,
        }
    }
}
