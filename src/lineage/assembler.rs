//! Lineage assembly: the public query surface.
//!
//! One query fetches a snapshot from the injected provider, then runs
//! aggregation, indexing, the ancestor walk and the descendant build in
//! memory. Nothing is cached between queries.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::{ContentNode, LineageTree, RemixRecord};
use crate::sources::{ContentProvider, StaticCatalog};

use super::aggregate::{aggregate, snapshot_digest};
use super::ancestry::find_root;
use super::descendants::build_tree;
use super::error::{Diagnostic, LineageError};
use super::index::build_indexes;

/// A lineage tree together with what was absorbed while building it
#[derive(Debug, Clone, Serialize)]
pub struct LineageReport {
    /// Id of the tree's root
    pub root_id: String,

    /// Reconstructed tree, with the queried node marked current
    pub tree: LineageTree,

    /// Non-fatal provenance problems found along the way
    pub diagnostics: Vec<Diagnostic>,

    /// Fingerprint of the snapshot the tree was built from
    pub snapshot_digest: String,
}

impl LineageReport {
    /// Whether any cycle was detected or truncated
    pub fn has_cycle(&self) -> bool {
        self.diagnostics.iter().any(|d| {
            matches!(
                d,
                Diagnostic::CycleDetected { .. } | Diagnostic::CycleTruncated { .. }
            )
        })
    }
}

/// Build the lineage of `content_id` from an already-fetched snapshot
pub fn assemble(
    records: Vec<RemixRecord>,
    catalog: &StaticCatalog,
    content_id: &str,
) -> Result<LineageReport, LineageError> {
    let merged = aggregate(records, catalog);
    let digest = snapshot_digest(&merged.nodes);
    let mut diagnostics = merged.collisions;

    let (nodes, children) = build_indexes(merged.nodes);
    if !nodes.contains(content_id) {
        return Err(LineageError::NotFound {
            id: content_id.to_string(),
        });
    }

    let found = find_root(content_id, &nodes);
    if found.cycle_detected {
        diagnostics.push(Diagnostic::CycleDetected {
            root_id: found.root_id.clone(),
        });
    }
    if let Some(parent_id) = found.orphan_parent {
        diagnostics.push(Diagnostic::OrphanReference {
            node_id: found.root_id.clone(),
            parent_id,
        });
    }

    let mut seen = HashSet::new();
    let mut tree = build_tree(&found.root_id, &nodes, &children, &mut seen, &mut diagnostics);
    tree.mark_current(content_id);

    debug!(
        root = %found.root_id,
        hops = found.path.len(),
        tree_size = seen.len(),
        snapshot_size = nodes.len(),
        originals = children.roots().len(),
        "Lineage assembled"
    );

    Ok(LineageReport {
        root_id: found.root_id,
        tree,
        diagnostics,
        snapshot_digest: digest,
    })
}

/// Lineage query service over an injected content provider
pub struct LineageService<P> {
    provider: P,
    catalog: StaticCatalog,
}

impl<P: ContentProvider> LineageService<P> {
    /// Create a service from a provider and the static catalog
    pub fn new(provider: P, catalog: StaticCatalog) -> Self {
        Self { provider, catalog }
    }

    /// Lineage tree of `content_id`
    pub async fn get_lineage(&self, content_id: &str) -> Result<LineageTree, LineageError> {
        Ok(self.trace(content_id).await?.tree)
    }

    /// Lineage tree of `content_id` with diagnostics
    #[instrument(skip(self), fields(provider = %self.provider.name()))]
    pub async fn trace(&self, content_id: &str) -> Result<LineageReport, LineageError> {
        let records = self.fetch().await?;
        let report = assemble(records, &self.catalog, content_id)?;

        for diagnostic in &report.diagnostics {
            warn!(%diagnostic, "Provenance problem absorbed");
        }
        info!(
            root = %report.root_id,
            nodes = report.tree.len(),
            digest = %report.snapshot_digest,
            "Lineage resolved"
        );

        Ok(report)
    }

    /// Merged snapshot as the queries see it
    pub async fn snapshot(&self) -> Result<Vec<ContentNode>, LineageError> {
        let records = self.fetch().await?;
        Ok(aggregate(records, &self.catalog).nodes)
    }

    async fn fetch(&self) -> Result<Vec<RemixRecord>, LineageError> {
        self.provider.fetch_all().await.map_err(|e| {
            warn!(error = %format!("{:#}", e), "Record fetch failed");
            LineageError::FetchFailure(e)
        })
    }
}
