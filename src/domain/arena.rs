//! Arena-based storage for full binary trees.

use std::collections::{BTreeMap, BTreeSet};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{TreeError, TreeResult};

/// Public identifier of a node. Assigned sequentially, never reused.
pub type NodeId = usize;

/// Position of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Root,
    Left,
    Right,
}

/// Tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    /// Public id of this node
    pub id: NodeId,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Left and right child; a node has both or neither
    pub children: Option<(Index, Index)>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena-based full binary tree.
///
/// Nodes live in a generational arena and are addressed from the outside by
/// their [`NodeId`]. The only structural mutation is [`TreeArena::add_trio`],
/// which turns a leaf into an internal node with two fresh children, so every
/// node has zero or two children and exactly one node has no parent.
///
/// A fresh arena already holds the root `0`.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Public id to arena slot
    ids: BTreeMap<NodeId, Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: 0,
            parent: None,
            children: None,
        });
        Self {
            arena,
            ids: BTreeMap::from([(0, root)]),
        }
    }

    /// Promotes leaf `parent` to an internal node with children `left` and `right`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_trio(&mut self, parent: NodeId, left: NodeId, right: NodeId) -> TreeResult<()> {
        let parent_idx = self.index_of(parent)?;
        if !self.arena[parent_idx].is_leaf() {
            return Err(TreeError::NotALeaf(parent));
        }
        for child in [left, right] {
            if self.ids.contains_key(&child) {
                return Err(TreeError::DuplicateNode(child));
            }
        }
        if left == right {
            return Err(TreeError::DuplicateNode(right));
        }

        let left_idx = self.insert_leaf(left, parent_idx);
        let right_idx = self.insert_leaf(right, parent_idx);
        self.arena[parent_idx].children = Some((left_idx, right_idx));
        Ok(())
    }

    fn insert_leaf(&mut self, id: NodeId, parent: Index) -> Index {
        let idx = self.arena.insert(TreeNode {
            id,
            parent: Some(parent),
            children: None,
        });
        self.ids.insert(id, idx);
        idx
    }

    fn index_of(&self, id: NodeId) -> TreeResult<Index> {
        self.ids.get(&id).copied().ok_or(TreeError::NodeNotFound(id))
    }

    fn id_at(&self, idx: Index) -> NodeId {
        self.arena[idx].id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.ids.get(&id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Never true: the root always exists.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn max_id(&self) -> NodeId {
        self.ids.keys().next_back().copied().unwrap_or(0)
    }

    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.ids.keys().copied().collect()
    }

    /// Nodes without children.
    #[instrument(level = "trace", skip(self))]
    pub fn leaves(&self) -> BTreeSet<NodeId> {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.id)
            .collect()
    }

    /// Nodes with children.
    pub fn internal_nodes(&self) -> BTreeSet<NodeId> {
        self.arena
            .iter()
            .filter(|(_, node)| !node.is_leaf())
            .map(|(_, node)| node.id)
            .collect()
    }

    /// Parentless nodes in ascending id order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.ids
            .iter()
            .filter(|&(_, &idx)| self.arena[idx].parent.is_none())
            .map(|(&id, _)| id)
            .collect()
    }

    /// The lowest-id parentless node.
    pub fn root(&self) -> NodeId {
        self.roots().first().copied().unwrap_or(0)
    }

    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        let node = self.get_node(id)?;
        node.children
            .map(|(left, right)| (self.id_at(left), self.id_at(right)))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.parent.map(|idx| self.id_at(idx))
    }

    /// Which side of its parent `id` hangs on.
    pub fn side(&self, id: NodeId) -> TreeResult<Side> {
        let idx = self.index_of(id)?;
        let Some(parent) = self.arena[idx].parent else {
            return Ok(Side::Root);
        };
        match self.arena[parent].children {
            Some((left, _)) if left == idx => Ok(Side::Left),
            _ => Ok(Side::Right),
        }
    }

    /// Number of levels below and including the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.roots().into_iter().map(|r| (r, 1)).collect();
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some((left, right)) = self.children(id) {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        max_depth
    }

    /// Pre-order, left before right, over every root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Post-order, left before right, over every root.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = arena.roots();
        stack.reverse();
        Self { arena, stack }
    }
}

impl Iterator for TreeIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push right first so left is visited first
        if let Some((left, right)) = self.arena.children(current) {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(current)
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let stack = arena.roots().into_iter().rev().map(|r| (r, false)).collect();
        Self { arena, stack }
    }
}

impl Iterator for PostOrderIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            match self.arena.children(current) {
                Some((left, right)) if !visited => {
                    self.stack.push((current, true));
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
                _ => return Some(current),
            }
        }
        None
    }
}
