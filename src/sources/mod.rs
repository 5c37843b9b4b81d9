//! Record sources feeding lineage reconstruction.
//!
//! Two kinds of source exist:
//! - Dynamic records, fetched through a [`ContentProvider`] on every query
//! - The [`StaticCatalog`], a fixed list of built-in parentless content

pub mod catalog;
pub mod http;
pub mod records;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::RemixRecord;

pub use catalog::{CatalogEntry, StaticCatalog};
pub use http::HttpProvider;
pub use records::RecordStore;

/// Trait for dynamic record sources
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Fetch one snapshot of every record.
    ///
    /// Implementations must return an error rather than an empty list when
    /// the snapshot could not be read.
    async fn fetch_all(&self) -> Result<Vec<RemixRecord>>;
}

#[async_trait]
impl<T: ContentProvider + ?Sized> ContentProvider for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_all(&self) -> Result<Vec<RemixRecord>> {
        (**self).fetch_all().await
    }
}

/// Provider over a fixed in-memory record list
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Vec<RemixRecord>,
}

impl MemoryProvider {
    /// Create a provider serving the given records
    pub fn new(records: impl IntoIterator<Item = RemixRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<RemixRecord>> {
        Ok(self.records.clone())
    }
}
