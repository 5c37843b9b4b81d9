//! Plain-text rendering of lineage trees.

use std::fmt::Write;

use crate::domain::{ContentNode, LineageTree};

/// One-line label for a node
pub fn label(node: &ContentNode) -> String {
    let title = if node.title.is_empty() {
        "(unknown)"
    } else {
        node.title.as_str()
    };

    let mut label = format!("{} [{}]", title, node.id);
    if !node.author_name.is_empty() {
        let _ = write!(label, " by {}", node.author_name);
    }
    label
}

/// Render the tree with box-drawing connectors, marking the current node
pub fn render_tree(tree: &LineageTree) -> String {
    let mut out = String::new();
    // (subtree, indentation before its connector, connector)
    let mut stack: Vec<(&LineageTree, String, &str)> = vec![(tree, String::new(), "")];

    while let Some((subtree, prefix, connector)) = stack.pop() {
        let marker = if subtree.is_current() { "  <- current" } else { "" };
        let _ = writeln!(
            out,
            "{}{}{}{}",
            prefix,
            connector,
            label(subtree.node()),
            marker
        );

        let child_prefix = format!("{}{}", prefix, continuation(connector));
        let count = subtree.children().len();
        for (i, child) in subtree.children().iter().enumerate().rev() {
            let connector = if i + 1 == count { "└── " } else { "├── " };
            stack.push((child, child_prefix.clone(), connector));
        }
    }

    out
}

fn continuation(connector: &str) -> &'static str {
    match connector {
        "├── " => "│   ",
        "└── " => "    ",
        _ => "",
    }
}

/// Render a root-to-node breadcrumb ("A > B > C")
pub fn render_breadcrumb(path: &[&ContentNode]) -> String {
    path.iter()
        .map(|node| label(node))
        .collect::<Vec<_>>()
        .join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LineageTree {
        let b = LineageTree::new(
            ContentNode::new("b", "B", "bob", "image"),
            vec![LineageTree::new(ContentNode::new("c", "C", "cy", "image"), Vec::new())],
        );
        let d = LineageTree::new(ContentNode::new("d", "D", "dee", "image"), Vec::new());
        let mut tree = LineageTree::new(ContentNode::new("a", "A", "ann", "image"), vec![b, d]);
        tree.mark_current("c");
        tree
    }

    #[test]
    fn test_render_tree_layout() {
        let rendered = render_tree(&sample());
        let expected = "\
A [a] by ann
├── B [b] by bob
│   └── C [c] by cy  <- current
└── D [d] by dee
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_label_for_placeholder() {
        assert_eq!(label(&ContentNode::placeholder("gone")), "(unknown) [gone]");
    }

    #[test]
    fn test_render_breadcrumb() {
        let tree = sample();
        let path = tree.path_to("c").unwrap();
        assert_eq!(
            render_breadcrumb(&path),
            "A [a] by ann > B [b] by bob > C [c] by cy"
        );
    }
}
