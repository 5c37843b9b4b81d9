//! Query failures and non-fatal diagnostics.

use serde::Serialize;
use thiserror::Error;

use crate::domain::NodeOrigin;

/// Failures surfaced to callers of a lineage query
#[derive(Debug, Error)]
pub enum LineageError {
    /// The requested id is absent from the merged snapshot
    #[error("Content not found: {id}")]
    NotFound { id: String },

    /// The content provider could not return a snapshot
    #[error("Failed to fetch content records")]
    FetchFailure(#[source] anyhow::Error),
}

impl LineageError {
    /// Message suitable for end users
    pub fn user_message(&self) -> &'static str {
        match self {
            LineageError::NotFound { .. } => "this content has no lineage information",
            LineageError::FetchFailure(_) => "could not load lineage",
        }
    }
}

/// Corrupted provenance absorbed while building a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The parent chain looped; `root_id` is the node chosen as root
    CycleDetected { root_id: String },

    /// `node_id` names a parent that is not in the snapshot
    OrphanReference { node_id: String, parent_id: String },

    /// Two records shared an id; only the `kept` one is used
    IdCollision {
        id: String,
        kept: NodeOrigin,
        dropped: NodeOrigin,
    },

    /// A child edge was skipped because the child already appears above it
    CycleTruncated { parent_id: String, child_id: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::CycleDetected { root_id } => {
                write!(f, "cycle in parent chain, treating {} as root", root_id)
            }
            Diagnostic::OrphanReference { node_id, parent_id } => {
                write!(f, "{} names missing parent {}", node_id, parent_id)
            }
            Diagnostic::IdCollision { id, kept, dropped } => {
                write!(f, "id {} collides: kept {}, dropped {}", id, kept, dropped)
            }
            Diagnostic::CycleTruncated {
                parent_id,
                child_id,
            } => {
                write!(f, "skipped repeated child {} under {}", child_id, parent_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let not_found = LineageError::NotFound { id: "x".into() };
        assert_eq!(
            not_found.user_message(),
            "this content has no lineage information"
        );
        assert_eq!(not_found.to_string(), "Content not found: x");

        let fetch = LineageError::FetchFailure(anyhow::anyhow!("timeout"));
        assert_eq!(fetch.user_message(), "could not load lineage");
    }

    #[test]
    fn test_diagnostic_serializes_tagged() {
        let diag = Diagnostic::OrphanReference {
            node_id: "c".into(),
            parent_id: "ghost".into(),
        };
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"type\":\"orphan_reference\""));
        assert!(json.contains("\"parent_id\":\"ghost\""));
    }
}
