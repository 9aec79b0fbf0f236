//! Drawing a laid-out tree onto a surface.
//!
//! [`render_tree`] only reads positions and structure from the tree; the
//! surface decides what a line or a label looks like.

pub mod svg;
pub mod text;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, trace};

use crate::domain::{BinaryTree, Position, Side};

pub use svg::{to_svg, write_svg, SvgCanvas};
pub use text::to_text_tree;

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// Left children are labelled to the left of their edge, right children to the right.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Root => Anchor::Middle,
            Side::Left => Anchor::End,
            Side::Right => Anchor::Start,
        }
    }
}

/// A drawing surface in tree coordinates.
pub trait Canvas {
    fn line(&mut self, from: Position, to: Position);
    fn label(&mut self, at: Position, text: &str, anchor: Anchor);
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("{0}")]
    Tree(#[from] crate::domain::TreeError),
}

impl RenderError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Visual settings for rendered trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderStyle {
    /// Pixels per layout unit
    pub unit: f64,
    /// Blank border around the drawing, in pixels
    pub margin: f64,
    /// Stroke colour for edges
    pub stroke: String,
    /// Label font size in pixels
    pub font_size: u32,
    /// Spacing of x axis ticks, in layout units
    pub x_tick_step: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            unit: 40.0,
            margin: 60.0,
            stroke: "blue".into(),
            font_size: 12,
            x_tick_step: 0.5,
        }
    }
}

/// Draws every node of `tree` onto `canvas`.
///
/// Per node: a vertical stub from its position one level down, its id as a
/// label aligned by [`Anchor::for_side`], and for internal nodes a horizontal
/// bar joining the two children.
#[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
pub fn render_tree(tree: &BinaryTree, canvas: &mut impl Canvas) -> RenderResult<()> {
    for id in tree.arena().iter() {
        let Some(at) = tree.position(id) else {
            continue;
        };
        trace!(id, %at, "render node");

        canvas.line(at, Position::new(at.x, at.y + 1.0));
        canvas.label(at, &id.to_string(), Anchor::for_side(tree.side(id)?));

        if let Some((left, right)) = tree.children(id) {
            if let (Some(l), Some(r)) = (tree.position(left), tree.position(right)) {
                canvas.line(l, r);
            }
        }
    }
    Ok(())
}
