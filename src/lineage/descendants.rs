//! Descendant tree construction.
//!
//! Builds the tree below a root from the flat indexes. Nodes are visited
//! depth-first with an explicit stack and collected into an arena, then the
//! nested [`LineageTree`] is assembled bottom-up. A child already in `seen`
//! is never emitted a second time.

use std::collections::HashSet;

use crate::domain::{ContentNode, LineageTree};

use super::error::Diagnostic;
use super::index::{ChildrenIndex, NodeIndex};

/// Arena slot for one visited node
struct Slot {
    node: ContentNode,
    children: Vec<usize>,
}

/// Build the descendant tree of `root_id`.
///
/// `seen` is threaded through the whole build; every emitted id is added to
/// it. Skipped children are reported to `diagnostics` as `CycleTruncated`.
/// An unresolved root becomes a placeholder node carrying only its id.
pub fn build_tree(
    root_id: &str,
    nodes: &NodeIndex,
    children: &ChildrenIndex,
    seen: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> LineageTree {
    let root = nodes
        .get(root_id)
        .cloned()
        .unwrap_or_else(|| ContentNode::placeholder(root_id));
    seen.insert(root_id.to_string());

    let mut arena: Vec<Slot> = Vec::new();
    let mut root_children: Vec<usize> = Vec::new();

    // (id, arena index of parent; None for the root)
    let mut stack: Vec<(&str, Option<usize>)> = children
        .children_of(root_id)
        .iter()
        .rev()
        .map(|c| (c.as_str(), None))
        .collect();

    while let Some((id, parent_slot)) = stack.pop() {
        if seen.contains(id) {
            let parent_id = match parent_slot {
                Some(p) => arena[p].node.id.clone(),
                None => root_id.to_string(),
            };
            diagnostics.push(Diagnostic::CycleTruncated {
                parent_id,
                child_id: id.to_string(),
            });
            continue;
        }
        let Some(node) = nodes.get(id).cloned() else {
            continue;
        };
        seen.insert(id.to_string());

        let slot = arena.len();
        arena.push(Slot {
            node,
            children: Vec::new(),
        });
        match parent_slot {
            Some(p) => arena[p].children.push(slot),
            None => root_children.push(slot),
        }

        // Reverse so the oldest child is popped first
        for child in children.children_of(id).iter().rev() {
            stack.push((child.as_str(), Some(slot)));
        }
    }

    assemble(root, root_children, arena)
}

/// Fold the arena into nested trees. Children always sit at higher arena
/// indexes than their parent, so a reverse sweep finishes every subtree
/// before its parent takes it.
fn assemble(root: ContentNode, root_children: Vec<usize>, arena: Vec<Slot>) -> LineageTree {
    let mut built: Vec<Option<LineageTree>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (i, slot) in arena.into_iter().enumerate().rev() {
        let children = slot
            .children
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        built[i] = Some(LineageTree::new(slot.node, children));
    }

    let children = root_children
        .iter()
        .filter_map(|&c| built[c].take())
        .collect();
    LineageTree::new(root, children)
}
