//! Domain layer: tree structure, growth and layout
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod layout;
pub mod tree;

pub use arena::{NodeId, Side, TreeArena, TreeNode};
pub use builder::{grow, node_count_from_seed, TreeBuilder, MAX_NODES};
pub use error::{TreeError, TreeResult};
pub use layout::{Layout, Position};
pub use tree::BinaryTree;
