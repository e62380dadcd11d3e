//! Raster canvas over `vello_cpu`.
//!
//! The drawing surface only ever fills: strokes are expanded to fill outlines
//! with `kurbo::stroke`, and linear gradients are rasterized into image
//! paints. Geometry is authored in `kurbo` 0.13 and converted to the
//! renderer's own `kurbo` types at the boundary.

use std::collections::HashMap;

use kurbo::Shape as _;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{SangkienError, SangkienResult};
use crate::render::text::{FontSpec, TextBrush, TextEngine, wrap_text};

/// Horizontal anchor for [`Canvas::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor for [`Canvas::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// `y` is the text baseline, canvas-style.
    Baseline,
    /// `y` is the vertical center of the line box.
    Middle,
}

pub struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    text: TextEngine,
    font_cache: HashMap<bool, vello_cpu::peniko::FontData>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> SangkienResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SangkienError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SangkienError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SangkienError::render("canvas dimensions must be > 0"));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            text: TextEngine::new()?,
            font_cache: HashMap::new(),
        })
    }

    pub fn width(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.height)
    }

    /// Word-wrap helper against this canvas's font engine.
    pub fn wrap_text(
        &mut self,
        text: &str,
        font: FontSpec,
        max_width: f32,
    ) -> SangkienResult<Vec<String>> {
        wrap_text(&mut self.text, text, font, max_width)
    }

    /// Advance width of `text` at `font`.
    pub fn measure_text(&mut self, text: &str, font: FontSpec) -> SangkienResult<f32> {
        self.text.measure(text, font)
    }

    fn set_solid_paint(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    fn reset_transform(&mut self) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    pub fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        self.reset_transform();
        self.set_solid_paint(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_path(&mut self, path: &kurbo::BezPath, color: Rgba8) {
        self.reset_transform();
        self.set_solid_paint(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Stroke by expanding the path to a fill outline. `dashes` applies a
    /// repeating dash pattern before expansion.
    pub fn stroke_path(
        &mut self,
        path: &kurbo::BezPath,
        line_width: f64,
        color: Rgba8,
        dashes: &[f64],
    ) {
        let mut style = kurbo::Stroke::new(line_width);
        if !dashes.is_empty() {
            style = style.with_dashes(0.0, dashes.iter().copied());
        }
        let outline = kurbo::stroke(
            path.iter(),
            &style,
            &kurbo::StrokeOpts::default(),
            0.25,
        );
        self.fill_path(&outline, color);
    }

    pub fn stroke_rect(&mut self, rect: kurbo::Rect, line_width: f64, color: Rgba8) {
        self.stroke_path(&rect.to_path(0.1), line_width, color, &[]);
    }

    pub fn stroke_line(
        &mut self,
        from: kurbo::Point,
        to: kurbo::Point,
        line_width: f64,
        color: Rgba8,
    ) {
        let mut p = kurbo::BezPath::new();
        p.move_to(from);
        p.line_to(to);
        self.stroke_path(&p, line_width, color, &[]);
    }

    pub fn fill_circle(&mut self, center: kurbo::Point, radius: f64, color: Rgba8) {
        self.fill_path(&kurbo::Circle::new(center, radius).to_path(0.1), color);
    }

    pub fn stroke_circle(
        &mut self,
        center: kurbo::Point,
        radius: f64,
        line_width: f64,
        color: Rgba8,
    ) {
        self.stroke_path(
            &kurbo::Circle::new(center, radius).to_path(0.1),
            line_width,
            color,
            &[],
        );
    }

    pub fn fill_rounded_rect(&mut self, rect: kurbo::Rect, radius: f64, color: Rgba8) {
        self.fill_path(
            &kurbo::RoundedRect::from_rect(rect, radius).to_path(0.1),
            color,
        );
    }

    pub fn stroke_rounded_rect(
        &mut self,
        rect: kurbo::Rect,
        radius: f64,
        line_width: f64,
        color: Rgba8,
    ) {
        self.stroke_path(
            &kurbo::RoundedRect::from_rect(rect, radius).to_path(0.1),
            line_width,
            color,
            &[],
        );
    }

    /// Closed pie slice from `start_angle` sweeping `sweep` radians
    /// (angles measured canvas-style: radians from +x, clockwise on screen).
    pub fn pie_slice_path(
        center: kurbo::Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> kurbo::BezPath {
        let arc = kurbo::Arc::new(
            center,
            kurbo::Vec2::new(radius, radius),
            start_angle,
            sweep,
            0.0,
        );
        let start_pt = center
            + kurbo::Vec2::new(radius * start_angle.cos(), radius * start_angle.sin());
        let mut p = kurbo::BezPath::new();
        p.move_to(center);
        p.line_to(start_pt);
        p.extend(arc.append_iter(0.1));
        p.close_path();
        p
    }

    /// Axis-aligned rect filled with a vertical top-to-bottom gradient,
    /// rasterized row-by-row into an image paint.
    pub fn fill_rect_vgradient(&mut self, rect: kurbo::Rect, top: Rgba8, bottom: Rgba8) {
        let w = rect.width().max(1.0).round() as u32;
        let h = rect.height().max(1.0).round() as u32;
        let Ok(img) = gradient_image(top, bottom, w, h) else {
            // Degenerate sizes fall back to the flat top color.
            self.fill_rect(rect, top);
            return;
        };
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(img);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            rect.width(),
            rect.height(),
        ));
        self.reset_transform();
    }

    /// Rounded rect filled with a vertical gradient: the rasterized gradient
    /// becomes the paint and the rounded outline is filled with it.
    pub fn fill_rounded_rect_vgradient(
        &mut self,
        rect: kurbo::Rect,
        radius: f64,
        top: Rgba8,
        bottom: Rgba8,
    ) {
        let w = rect.width().max(1.0).round() as u32;
        let h = rect.height().max(1.0).round() as u32;
        let Ok(img) = gradient_image(top, bottom, w, h) else {
            self.fill_rounded_rect(rect, radius, top);
            return;
        };
        // Path authored at the origin so the image paint lines up with it.
        let local = kurbo::Rect::new(0.0, 0.0, rect.width(), rect.height());
        let outline = kurbo::RoundedRect::from_rect(local, radius).to_path(0.1);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(img);
        self.ctx.fill_path(&bezpath_to_cpu(&outline));
        self.reset_transform();
    }

    fn font_data_for(&mut self, bold: bool) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(bold)
            .or_insert_with(|| {
                let bytes = FontSpec { px: 12.0, bold }.font_bytes().to_vec();
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0)
            })
            .clone()
    }

    /// Draw a single run of text anchored at `(x, y)`.
    pub fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: FontSpec,
        color: Rgba8,
        halign: HAlign,
        valign: VAlign,
    ) -> SangkienResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.text.layout(text, font, TextBrush::from(color), None)?;

        let width = f64::from(layout.full_width());
        let origin_x = match halign {
            HAlign::Left => x,
            HAlign::Center => x - width / 2.0,
            HAlign::Right => x - width,
        };
        let first_line = layout
            .lines()
            .next()
            .ok_or_else(|| SangkienError::render("text layout has no lines"))?;
        let metrics = first_line.metrics().clone();
        let origin_y = match valign {
            VAlign::Baseline => y - f64::from(metrics.baseline),
            VAlign::Middle => y - f64::from(layout.height()) / 2.0,
        };

        let font_data = self.font_data_for(font.bold);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.reset_transform();
        Ok(())
    }

    /// Render and encode the canvas as PNG, returning bytes and dimensions.
    pub fn into_png(mut self) -> SangkienResult<(Vec<u8>, u32, u32)> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        use image::ImageEncoder as _;
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(
                pixmap.data_as_u8_slice(),
                u32::from(self.width),
                u32::from(self.height),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| SangkienError::render(format!("png encode failed: {e}")))?;
        Ok((png, u32::from(self.width), u32::from(self.height)))
    }
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn gradient_image(
    top: Rgba8,
    bottom: Rgba8,
    w: u32,
    h: u32,
) -> SangkienResult<vello_cpu::Image> {
    let w_u16: u16 = w
        .try_into()
        .map_err(|_| SangkienError::render("gradient width exceeds u16"))?;
    let h_u16: u16 = h
        .try_into()
        .map_err(|_| SangkienError::render("gradient height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(SangkienError::render("gradient dimensions must be > 0"));
    }

    let h1 = (h - 1).max(1) as f32;
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        let t = if h == 1 { 0.0 } else { (y as f32) / h1 };
        let c = top.lerp(bottom, t);
        let [r, g, b, a] = c.premul_bytes();
        may_have_opacities |= a != 255;
        for _ in 0..w {
            pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
        }
    }
    let pixmap =
        vello_cpu::Pixmap::from_parts_with_opacity(pixels, w_u16, h_u16, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
