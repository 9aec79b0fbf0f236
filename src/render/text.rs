use std::collections::HashMap;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{BinaryTree, NodeId};

fn node_label(tree: &BinaryTree, id: NodeId) -> String {
    match tree.position(id) {
        Some(at) => format!("{id} {at}"),
        None => id.to_string(),
    }
}

/// Converts the tree into a `termtree` for terminal display, one `id (x, y)` per line.
///
/// Built bottom-up from the post-order iterator, so deep trees do not recurse.
#[instrument(level = "debug", skip_all)]
pub fn to_text_tree(tree: &BinaryTree) -> Tree<String> {
    let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();

    for id in tree.arena().iter_postorder() {
        let mut node = Tree::new(node_label(tree, id));
        if let Some((left, right)) = tree.children(id) {
            node.leaves.extend(built.remove(&left));
            node.leaves.extend(built.remove(&right));
        }
        built.insert(id, node);
    }

    built
        .remove(&tree.root())
        .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
}
