//! Grow full binary trees, lay them out depth-first and render them.
//!
//! A [`domain::BinaryTree`] starts as the lone root `0` and grows by turning
//! leaves into internal nodes with two fresh children. After every change
//! each node gets a position: leaves sit on consecutive x values from left to
//! right, internal nodes midway between their children, y is the depth.
//!
//! ```
//! use bintree::domain::{BinaryTree, Position};
//!
//! let tree = BinaryTree::with_nodes(2).unwrap();
//! assert_eq!(tree.children(0), Some((1, 2)));
//! assert_eq!(tree.position(0), Some(Position::new(0.5, 0.0)));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod render;
pub mod util;
