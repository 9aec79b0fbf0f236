//! Binary tree with an always-current layout.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::domain::arena::{NodeId, Side, TreeArena};
use crate::domain::builder::grow;
use crate::domain::error::TreeResult;
use crate::domain::layout::{Layout, Position};

/// Full binary tree together with the coordinates of its nodes.
///
/// Every structural change goes through this type and is followed by a fresh
/// [`Layout::compute`], so positions never go stale.
#[derive(Debug)]
pub struct BinaryTree {
    arena: TreeArena,
    layout: Layout,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    /// The lone root `0` at (0, 0).
    pub fn new() -> Self {
        let arena = TreeArena::new();
        let layout = Layout::compute(&arena);
        Self { arena, layout }
    }

    /// Grows a fresh tree by `nodes` nodes.
    pub fn with_nodes(nodes: usize) -> TreeResult<Self> {
        let mut tree = Self::new();
        tree.add_nodes(nodes)?;
        Ok(tree)
    }

    /// Grows the tree by up to `nodes` nodes and refreshes the layout.
    #[instrument(level = "debug", skip(self))]
    pub fn add_nodes(&mut self, nodes: usize) -> TreeResult<usize> {
        let added = grow(&mut self.arena, nodes)?;
        self.relayout();
        info!(added, total = self.arena.len(), "tree grown");
        Ok(added)
    }

    /// Promotes one leaf and refreshes the layout.
    pub fn add_trio(&mut self, parent: NodeId, left: NodeId, right: NodeId) -> TreeResult<()> {
        self.arena.add_trio(parent, left, right)?;
        self.relayout();
        Ok(())
    }

    /// Recomputes every coordinate from scratch.
    pub fn relayout(&mut self) -> &Layout {
        self.layout = Layout::compute(&self.arena);
        &self.layout
    }

    pub fn arena(&self) -> &TreeArena {
        &self.arena
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.arena.nodes()
    }

    pub fn leaves(&self) -> BTreeSet<NodeId> {
        self.arena.leaves()
    }

    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.arena.roots()
    }

    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.arena.children(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.parent(id)
    }

    pub fn side(&self, id: NodeId) -> TreeResult<Side> {
        self.arena.side(id)
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.layout.position(id)
    }

    /// Node ids in depth-first (post-order) visiting order.
    pub fn dfs_order(&self) -> &[NodeId] {
        self.layout.order()
    }
}
