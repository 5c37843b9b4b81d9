//! Remix lineage reconstruction.
//!
//! Data flows one way through the pipeline:
//! - aggregate: Merge dynamic records and the static catalog
//! - index: Build id -> node and parent -> children lookups
//! - ancestry: Walk parent links to the root
//! - descendants: Build the tree below the root
//! - assembler: Orchestrate one query and mark the current node
//!
//! Corrupted provenance (cycles, dangling parents, id collisions) never
//! fails a query. It is absorbed and reported as [`Diagnostic`] values.
//!
//! Only the assembler's query surface is public; the stages are internal.

mod aggregate;
mod ancestry;
mod assembler;
mod descendants;
mod error;
mod index;

pub use aggregate::snapshot_digest;
pub use assembler::{assemble, LineageReport, LineageService};
pub use error::{Diagnostic, LineageError};
