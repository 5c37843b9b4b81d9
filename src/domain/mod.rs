//! Domain types for lineage reconstruction.
//!
//! This module contains the core data structures:
//! - ContentNode: Canonical node both record sources normalize into
//! - RemixRecord: Dynamic record shape returned by providers
//! - LineageTree: Reconstructed remix chain

pub mod node;
pub mod record;
pub mod tree;

// Re-export commonly used types
pub use node::{ContentKind, ContentNode, NodeOrigin};
pub use record::RemixRecord;
pub use tree::LineageTree;
