//! Depth-first coordinate layout.
//!
//! Leaves are placed on consecutive integer x positions in left-to-right
//! order, every internal node sits midway between its two children, and y is
//! the depth below the root.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, TreeArena};

/// Planar position of a node. `y` grows downward with depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coordinates of every node plus the order in which the traversal finished them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: BTreeMap<NodeId, Position>,
    order: Vec<NodeId>,
    leaf_count: usize,
    max_depth: usize,
}

impl Layout {
    /// Lays out every tree in the arena, roots in ascending id order.
    ///
    /// The leaf counter starts at 0 and keeps running across roots, so the
    /// trees of a forest never overlap. Uses an explicit stack; the depth of
    /// the tree is not limited by the call stack.
    #[instrument(level = "debug", skip(arena), fields(nodes = arena.len()))]
    pub fn compute(arena: &TreeArena) -> Self {
        let mut layout = Self::default();
        for root in arena.roots() {
            layout.visit(arena, root);
        }
        debug!(
            leaves = layout.leaf_count,
            max_depth = layout.max_depth,
            "layout complete"
        );
        layout
    }

    fn visit(&mut self, arena: &TreeArena, root: NodeId) {
        // (node, depth, children already laid out)
        let mut stack = vec![(root, 0usize, false)];

        while let Some((id, depth, expanded)) = stack.pop() {
            match arena.children(id) {
                Some((left, right)) if !expanded => {
                    stack.push((id, depth, true));
                    stack.push((right, depth + 1, false));
                    stack.push((left, depth + 1, false));
                }
                Some((left, right)) => {
                    let x = (self.positions[&left].x + self.positions[&right].x) / 2.0;
                    self.place(id, x, depth);
                }
                None => {
                    let x = self.leaf_count as f64;
                    self.leaf_count += 1;
                    self.place(id, x, depth);
                }
            }
        }
    }

    fn place(&mut self, id: NodeId, x: f64, depth: usize) {
        self.positions.insert(id, Position::new(x, depth as f64));
        self.max_depth = self.max_depth.max(depth);
        self.order.push(id);
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    pub fn positions(&self) -> &BTreeMap<NodeId, Position> {
        &self.positions
    }

    /// Nodes in the order the traversal finished them (post-order).
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Deepest y value; 0 for a lone root.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Largest x value, i.e. the position of the rightmost leaf.
    pub fn max_x(&self) -> f64 {
        self.leaf_count.saturating_sub(1) as f64
    }
}
