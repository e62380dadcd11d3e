//! Mind-map rendering engine: a left-to-right tree on a 900×700 canvas.
//!
//! Layout is resolved up front into a flat table of placed nodes (one
//! bottom-up leaf-count pass, one top-down position pass), so the two drawing
//! passes — connectors first, then node pills on top — are plain iterations
//! with no counter state threaded through recursion.

use kurbo::{Point, Rect};

use crate::foundation::color::Rgba8;
use crate::foundation::error::SangkienResult;
use crate::model::document::{ImageBlock, sanitize_text};
use crate::model::mindmap::{MindmapNode, MindmapSpec};
use crate::render::canvas::{Canvas, HAlign, VAlign};
use crate::render::text::FontSpec;
use crate::render::theme::MindmapTheme;

pub const MINDMAP_CANVAS_WIDTH: u32 = 900;
pub const MINDMAP_CANVAS_HEIGHT: u32 = 700;

/// Placement hints for the exported document, in points.
const MINDMAP_EXPORT_WIDTH: u32 = 600;
const MINDMAP_EXPORT_HEIGHT: u32 = 400;

const ROOT_X: f64 = 100.0;
const LEVEL_WIDTH: f64 = 250.0;
const NODE_PADDING_X: f64 = 20.0;
const NODE_PADDING_Y: f64 = 12.0;

/// One node with its resolved canvas position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    pub name: String,
    pub depth: usize,
    /// Index of the root child whose branch this node belongs to. The root
    /// itself carries 0; it is never colored by branch.
    pub branch: usize,
    pub pos: Point,
    pub parent: Option<usize>,
}

/// Resolve positions for the whole tree. The root sits at a fixed left
/// anchor, vertically centered; every subtree gets a vertical band
/// proportional to its leaf count, and each child is centered in its band.
pub fn layout_nodes(root: &MindmapNode, canvas_height: f64) -> Vec<PlacedNode> {
    let total_leaves = root.leaf_count().max(1);
    let per_leaf = canvas_height / total_leaves as f64;

    let mut out = Vec::new();
    out.push(PlacedNode {
        name: root.name.clone(),
        depth: 0,
        branch: 0,
        pos: Point::new(ROOT_X, canvas_height / 2.0),
        parent: None,
    });
    place_children(root, 0, 0, true, 0, per_leaf, &mut out);
    out
}

/// Place `node`'s children, starting at leaf band offset `leaf_offset`.
/// Offsets advance by each child's own leaf count, so sibling bands tile the
/// canvas without overlap.
fn place_children(
    node: &MindmapNode,
    node_index: usize,
    branch: usize,
    at_root: bool,
    leaf_offset: usize,
    per_leaf: f64,
    out: &mut Vec<PlacedNode>,
) {
    let mut offset = leaf_offset;
    let child_x = out[node_index].pos.x + LEVEL_WIDTH;
    let depth = out[node_index].depth + 1;
    for (idx, child) in node.children.iter().enumerate() {
        let child_leaves = child.leaf_count();
        let child_y = offset as f64 * per_leaf + per_leaf * child_leaves as f64 / 2.0;
        let child_branch = if at_root { idx } else { branch };
        let child_index = out.len();
        out.push(PlacedNode {
            name: child.name.clone(),
            depth,
            branch: child_branch,
            pos: Point::new(child_x, child_y),
            parent: Some(node_index),
        });
        place_children(child, child_index, child_branch, false, offset, per_leaf, out);
        offset += child_leaves;
    }
}

/// Render `spec` to a PNG image block.
#[tracing::instrument(skip(spec), fields(root = %spec.root))]
pub fn render_mindmap(spec: &MindmapSpec, theme: MindmapTheme) -> SangkienResult<ImageBlock> {
    let mut canvas = Canvas::new(MINDMAP_CANVAS_WIDTH, MINDMAP_CANVAS_HEIGHT)?;
    draw_mindmap(&mut canvas, spec, theme)?;
    let (png, width, height) = canvas.into_png()?;
    Ok(ImageBlock {
        png,
        width,
        height,
        width_hint: MINDMAP_EXPORT_WIDTH,
        height_hint: MINDMAP_EXPORT_HEIGHT,
        caption: format!("Sơ đồ tư duy: {}", sanitize_text(&spec.root)),
    })
}

/// Draw `spec` onto an existing canvas.
pub fn draw_mindmap(
    canvas: &mut Canvas,
    spec: &MindmapSpec,
    theme: MindmapTheme,
) -> SangkienResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(Rect::new(0.0, 0.0, w, h), theme.background());

    let placed = layout_nodes(&spec.virtual_root(), h);

    // Pass 1: connector curves, beneath everything.
    for node in &placed {
        let Some(parent_idx) = node.parent else { continue };
        let parent = &placed[parent_idx];
        let branch_color = theme.branch_color(node.branch);
        draw_connector(canvas, parent, node, branch_color, theme);
    }

    // Pass 2: node pills and labels on top.
    for node in &placed {
        draw_node(canvas, node, theme)?;
    }

    // Watermark near the bottom edge.
    canvas.fill_text(
        "MINDMAP",
        w / 2.0,
        h - 50.0,
        FontSpec::bold(60.0),
        Rgba8::BLACK.with_alpha(8),
        HAlign::Center,
        VAlign::Baseline,
    )?;
    Ok(())
}

/// Cubic S-curve from the parent's right anchor to the child's center:
/// control points sit at the horizontal midpoint, keeping each endpoint's y.
fn draw_connector(
    canvas: &mut Canvas,
    parent: &PlacedNode,
    child: &PlacedNode,
    branch_color: Rgba8,
    theme: MindmapTheme,
) {
    let from_root = parent.depth == 0;
    let start = Point::new(parent.pos.x + if from_root { 80.0 } else { 60.0 }, parent.pos.y);
    let end = child.pos;
    let mid_x = parent.pos.x + (end.x - parent.pos.x) * 0.5;

    let mut curve = kurbo::BezPath::new();
    curve.move_to(start);
    curve.curve_to(
        Point::new(mid_x, start.y),
        Point::new(mid_x, end.y),
        end,
    );

    let color = theme.connector_color(branch_color);
    let width = if from_root { 3.0 } else { 2.0 };
    let dashes: &[f64] = if theme.dashed_connectors() { &[5.0, 5.0] } else { &[] };
    canvas.stroke_path(&curve, width, color, dashes);
}

fn draw_node(canvas: &mut Canvas, node: &PlacedNode, theme: MindmapTheme) -> SangkienResult<()> {
    let is_root = node.depth == 0;
    let branch_color = if is_root {
        Rgba8::hex(0x3b82f6)
    } else {
        theme.branch_color(node.branch)
    };

    let font = if is_root { FontSpec::bold(18.0) } else { FontSpec::regular(14.0) };
    let max_text_width = if is_root { 160.0 } else { 130.0 };
    let line_height = if is_root { 24.0 } else { 18.0 };

    let lines = canvas.wrap_text(&node.name, font, max_text_width)?;
    let mut max_line_width = 0.0f64;
    for line in &lines {
        max_line_width = max_line_width.max(f64::from(canvas.measure_text(line, font)?));
    }
    let box_w = max_line_width + NODE_PADDING_X * 2.0;
    let box_h = lines.len() as f64 * line_height + NODE_PADDING_Y * 2.0;
    let rect = Rect::new(
        node.pos.x - box_w / 2.0,
        node.pos.y - box_h / 2.0,
        node.pos.x + box_w / 2.0,
        node.pos.y + box_h / 2.0,
    );

    let radius = match theme {
        MindmapTheme::Professional => 4.0,
        MindmapTheme::Organic => 20.0,
        MindmapTheme::Colorful => 10.0,
    };

    // Offset shadow beneath the pill.
    canvas.fill_rounded_rect(
        rect + kurbo::Vec2::new(3.0, 3.0),
        radius,
        Rgba8::BLACK.with_alpha(38),
    );

    let text_color;
    match theme {
        MindmapTheme::Professional => {
            let fill = if is_root { Rgba8::hex(0x1e3a8a) } else { Rgba8::WHITE };
            let border = if is_root { Rgba8::hex(0x1e3a8a) } else { branch_color };
            canvas.fill_rounded_rect(rect, radius, fill);
            canvas.stroke_rounded_rect(rect, radius, 2.0, border);
            text_color = if is_root { Rgba8::WHITE } else { Rgba8::hex(0x1e293b) };
        }
        MindmapTheme::Colorful => {
            if is_root {
                canvas.fill_rounded_rect_vgradient(rect, radius, Rgba8::WHITE, Rgba8::hex(0xf3f4f6));
            } else {
                canvas.fill_rounded_rect(rect, radius, branch_color);
            }
            text_color = if is_root { Rgba8::hex(0x1e3a8a) } else { Rgba8::WHITE };
        }
        MindmapTheme::Organic => {
            if is_root {
                canvas.fill_rounded_rect_vgradient(rect, radius, Rgba8::WHITE, Rgba8::hex(0xf3f4f6));
            } else {
                canvas.fill_rounded_rect(rect, radius, Rgba8::WHITE);
            }
            canvas.stroke_rounded_rect(rect, radius, 2.0, branch_color);
            text_color = Rgba8::hex(0x0f172a);
        }
    }

    // Lines stack symmetrically around the node's vertical center.
    let mut text_y = node.pos.y - (lines.len() as f64 - 1.0) * line_height / 2.0;
    for line in &lines {
        canvas.fill_text(
            line,
            node.pos.x,
            text_y,
            font,
            text_color,
            HAlign::Center,
            VAlign::Middle,
        )?;
        text_y += line_height;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/mindmap.rs"]
mod tests;
