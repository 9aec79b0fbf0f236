//! SVG drawing surface.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::{BinaryTree, Position};
use crate::render::{render_tree, Anchor, Canvas, RenderError, RenderResult, RenderStyle};

/// Collects drawing primitives and turns them into a standalone SVG document.
///
/// Tree coordinates are scaled by [`RenderStyle::unit`] and offset by
/// [`RenderStyle::margin`]; depth grows downward, matching SVG's y axis.
#[derive(Debug)]
pub struct SvgCanvas {
    style: RenderStyle,
    elements: Vec<String>,
    max_x: f64,
    max_y: f64,
}

impl SvgCanvas {
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            elements: Vec::new(),
            max_x: 0.0,
            max_y: 0.0,
        }
    }

    fn px(&self, v: f64) -> f64 {
        self.style.margin + v * self.style.unit
    }

    fn track(&mut self, p: Position) {
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Number of primitives drawn so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Renders the document: title on top, `generation` axis on the left,
    /// x ticks every [`RenderStyle::x_tick_step`] along the bottom.
    pub fn finish(self, title: &str) -> RenderResult<String> {
        let style = &self.style;
        let width = self.px(self.max_x) + style.margin;
        let height = self.px(self.max_y) + style.margin;
        let font = style.font_size;

        let mut doc = String::new();
        writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            doc,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"#,
            width / 2.0,
            style.margin / 2.0,
            font + 2,
            escape(title)
        )?;
        writeln!(
            doc,
            r#"<text x="{x}" y="{y}" font-size="{font}" text-anchor="middle" transform="rotate(-90 {x} {y})">generation</text>"#,
            x = style.margin / 3.0,
            y = height / 2.0,
        )?;

        let axis_y = height - style.margin / 2.0;
        let ticks = x_ticks(self.max_x, style.x_tick_step);
        for tick in &ticks {
            let x = self.px(*tick);
            writeln!(
                doc,
                r#"<line x1="{x}" y1="{axis_y}" x2="{x}" y2="{}" stroke="black"/>"#,
                axis_y + 4.0
            )?;
            writeln!(
                doc,
                r#"<text x="{x}" y="{}" font-size="{}" text-anchor="middle">{tick}</text>"#,
                axis_y + 4.0 + f64::from(font),
                font.saturating_sub(2).max(1)
            )?;
        }

        doc.push_str(&self.elements.iter().join("\n"));
        doc.push_str("\n</svg>\n");
        Ok(doc)
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: Position, to: Position) {
        self.track(from);
        self.track(to);
        let element = format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            self.px(from.x),
            self.px(from.y),
            self.px(to.x),
            self.px(to.y),
            escape(&self.style.stroke)
        );
        self.elements.push(element);
    }

    fn label(&mut self, at: Position, text: &str, anchor: Anchor) {
        self.track(at);
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let element = format!(
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}">{}</text>"#,
            self.px(at.x),
            self.px(at.y),
            self.style.font_size,
            escape(text)
        );
        self.elements.push(element);
    }
}

/// Upper bound on tick intervals drawn along the x axis.
const MAX_X_TICKS: usize = 200;

/// Tick positions `0, step, 2*step, ..` up to and including `max`.
///
/// A step too fine for the extent is widened so at most [`MAX_X_TICKS`]
/// intervals are drawn.
fn x_ticks(max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || max <= 0.0 || !max.is_finite() {
        return vec![0.0];
    }
    let step = step.max(max / MAX_X_TICKS as f64);
    let count = ((max / step).floor() as usize).min(MAX_X_TICKS);
    (0..=count).map(|i| i as f64 * step).collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders `tree` into an SVG document string.
pub fn to_svg(tree: &BinaryTree, style: &RenderStyle) -> RenderResult<String> {
    let mut canvas = SvgCanvas::new(style.clone());
    render_tree(tree, &mut canvas)?;
    canvas.finish(&format!("binary tree with {} nodes", tree.len()))
}

/// Renders `tree` and writes the document to `path`.
///
/// The file is created, written and flushed within this call.
#[instrument(level = "debug", skip(tree, style))]
pub fn write_svg(tree: &BinaryTree, path: &Path, style: &RenderStyle) -> RenderResult<()> {
    let doc = to_svg(tree, style)?;

    let file = File::create(path)
        .map_err(|e| RenderError::io(format!("create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(doc.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| RenderError::io(format!("write {}", path.display()), e))?;

    debug!(bytes = doc.len(), "svg written");
    Ok(())
}
