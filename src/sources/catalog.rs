//! Static catalog of built-in content.
//!
//! Catalog entries are known ahead of time and never carry provenance, so
//! they always normalize into parentless nodes.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::{ContentKind, ContentNode, NodeOrigin};

/// Fixed catalog of content that sits alongside the dynamic record set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticCatalog {
    /// Catalog format version
    pub version: u32,

    /// All catalog entries, in catalog order
    pub entries: Vec<CatalogEntry>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: 1,
            entries: Vec::new(),
        }
    }

    /// Create a catalog from a list of entries
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            version: 1,
            entries: entries.into_iter().collect(),
        }
    }

    /// Load the catalog from disk. A missing file is an empty catalog.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog JSON: {}", path.display()))
    }

    /// Save the catalog to disk
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }

    /// Add an entry, replacing any existing entry with the same id
    pub fn add(&mut self, entry: CatalogEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    /// Get an entry by id
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Normalized nodes in catalog order
    pub fn nodes(&self) -> impl Iterator<Item = ContentNode> + '_ {
        self.entries.iter().cloned().map(ContentNode::from)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single built-in catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Credited author or artist
    #[serde(default)]
    pub artist: String,

    /// Kind tag
    #[serde(default)]
    pub kind: ContentKind,

    /// Publication time, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Create a new catalog entry
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        kind: impl Into<ContentKind>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            kind: kind.into(),
            published_at: None,
        }
    }
}

impl From<CatalogEntry> for ContentNode {
    fn from(entry: CatalogEntry) -> Self {
        ContentNode {
            id: entry.id,
            title: entry.title,
            author_name: entry.artist,
            kind: entry.kind,
            parent_id: None,
            created_at: entry.published_at,
            origin: NodeOrigin::Static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_add_replaces_same_id() {
        let mut catalog = StaticCatalog::new();
        catalog.add(CatalogEntry::new("s1", "Old Title", "Band", "audio"));
        catalog.add(CatalogEntry::new("s1", "New Title", "Band", "audio"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("s1").unwrap().title, "New Title");
    }

    #[test]
    fn test_catalog_nodes_are_static_and_parentless() {
        let catalog = StaticCatalog::from_entries([
            CatalogEntry::new("s1", "Loop", "Band", "audio"),
            CatalogEntry::new("s2", "Sketch", "Painter", "image"),
        ]);

        let nodes: Vec<ContentNode> = catalog.nodes().collect();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.origin == NodeOrigin::Static));
        assert!(nodes.iter().all(|n| n.parent_id.is_none()));
        assert_eq!(nodes[1].author_name, "Painter");
    }

    #[tokio::test]
    async fn test_catalog_load_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let catalog = StaticCatalog::load(&temp.path().join("catalog.json"))
            .await
            .unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("catalog.json");

        let catalog =
            StaticCatalog::from_entries([CatalogEntry::new("s1", "Loop", "Band", "audio")]);
        catalog.save(&path).await.unwrap();

        let loaded = StaticCatalog::load(&path).await.unwrap();
        assert_eq!(loaded.entries, catalog.entries);
    }

    #[tokio::test]
    async fn test_catalog_load_malformed_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(StaticCatalog::load(&path).await.is_err());
    }
}
