//! remix-lineage - Remix-provenance lineage reconstruction
//!
//! Given a flat set of content records where each record may name one
//! other record as its creative origin, rebuilds the root ancestor of any
//! record and the full tree of everything remixed from that root.
//!
//! # Architecture
//!
//! Every query works on a fresh snapshot:
//! - Dynamic records are fetched through an injected `ContentProvider`
//! - They are merged with a fixed static catalog into one node set
//! - Flat indexes are built once, then the root and its descendants are
//!   resolved with O(1) lookups
//! - Cycles, dangling parents and id collisions are absorbed and reported
//!   as diagnostics; only fetch failures and unknown ids fail a query
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentNode, RemixRecord, LineageTree)
//! - `sources`: Record sources (ContentProvider, RecordStore, HttpProvider, StaticCatalog)
//! - `lineage`: Reconstruction pipeline and the `LineageService` query surface
//! - `config`: Path and source configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Print the remix chain containing an item
//! remix-lineage tree <content-id>
//!
//! # Print the "remix of" breadcrumb
//! remix-lineage breadcrumb <content-id>
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod lineage;
pub mod sources;

// Re-export main types at crate root for convenience
pub use domain::{ContentKind, ContentNode, LineageTree, NodeOrigin, RemixRecord};
pub use lineage::{assemble, Diagnostic, LineageError, LineageReport, LineageService};
pub use sources::{
    CatalogEntry, ContentProvider, HttpProvider, MemoryProvider, RecordStore, StaticCatalog,
};
