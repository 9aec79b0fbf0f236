//! Tree growth: promote leaves until the requested number of nodes exists.

use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::tree::BinaryTree;

/// Smallest node count produced by [`node_count_from_seed`].
pub const SEED_BASE_NODES: usize = 17;
/// Number of distinct counts [`node_count_from_seed`] can produce.
pub const SEED_SPREAD: usize = 15;
/// Largest tree [`grow`] will build.
pub const MAX_NODES: usize = 1 << 24;

/// Derives a node count in `17..=31` from a seed string, typically an email address.
///
/// Sums the code points of the seed's characters and maps the sum into the range.
pub fn node_count_from_seed(seed: &str) -> usize {
    let hash: usize = seed.chars().map(|c| c as usize).sum();
    SEED_BASE_NODES + hash % SEED_SPREAD
}

/// Adds up to `additional` nodes to `arena` and returns how many were added.
///
/// Each pass snapshots the current leaves in ascending id order and promotes
/// them one by one, giving each a fresh pair of children `max_id + 1` and
/// `max_id + 2`. Growth stops as soon as another pair would exceed the
/// target, so an odd request leaves one node unfilled.
///
/// Fails with [`TreeError::TooLarge`] before touching the arena when the
/// target would exceed [`MAX_NODES`].
#[instrument(level = "debug", skip(arena), fields(start = arena.len()))]
pub fn grow(arena: &mut TreeArena, additional: usize) -> TreeResult<usize> {
    let start = arena.len();
    let target = start
        .checked_add(additional)
        .filter(|&target| target <= MAX_NODES)
        .ok_or(TreeError::TooLarge {
            existing: start,
            requested: additional,
            limit: MAX_NODES,
        })?;

    while arena.len() + 2 <= target {
        debug!(nodes = arena.len(), "growth pass");
        for leaf in arena.leaves() {
            if arena.len() + 2 > target {
                break;
            }
            let max_id = arena.max_id();
            arena.add_trio(leaf, max_id + 1, max_id + 2)?;
        }
    }

    Ok(arena.len() - start)
}

/// Builds a [`BinaryTree`] from a node count or a seed.
#[derive(Debug, Default, Clone)]
pub struct TreeBuilder {
    nodes: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes to add on top of the implicit root.
    pub fn nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Takes the node count from [`node_count_from_seed`].
    pub fn seed(self, seed: &str) -> Self {
        self.nodes(node_count_from_seed(seed))
    }

    pub fn requested(&self) -> usize {
        self.nodes
    }

    pub fn build(&self) -> TreeResult<BinaryTree> {
        BinaryTree::with_nodes(self.nodes)
    }
}
