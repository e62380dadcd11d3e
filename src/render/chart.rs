//! Chart rendering engine: bar, line, pie and doughnut onto an 800×500
//! canvas under one of three visual styles.
//!
//! Bad data never errors here. A spec with no plottable series degrades to a
//! localized "no data" placeholder; `Err` is reserved for canvas-level faults
//! (allocation, encoding), which callers may log and drop.

use kurbo::{Point, Rect};

use crate::foundation::color::Rgba8;
use crate::foundation::error::SangkienResult;
use crate::model::chart::{ChartKind, ChartSpec};
use crate::model::document::{ImageBlock, sanitize_text};
use crate::render::canvas::{Canvas, HAlign, VAlign};
use crate::render::text::FontSpec;
use crate::render::theme::ChartStyle;

pub const CHART_CANVAS_WIDTH: u32 = 800;
pub const CHART_CANVAS_HEIGHT: u32 = 500;

/// Placement hints for the exported document, in points.
const CHART_EXPORT_WIDTH: u32 = 500;
const CHART_EXPORT_HEIGHT: u32 = 320;

const PAD_TOP: f64 = 80.0;
const PAD_RIGHT: f64 = 60.0;
const PAD_BOTTOM: f64 = 100.0;
const PAD_LEFT: f64 = 80.0;

/// Render `spec` to a PNG image block.
#[tracing::instrument(skip(spec), fields(kind = ?spec.kind, title = %spec.title))]
pub fn render_chart(spec: &ChartSpec, style: ChartStyle) -> SangkienResult<ImageBlock> {
    let mut canvas = Canvas::new(CHART_CANVAS_WIDTH, CHART_CANVAS_HEIGHT)?;
    draw_chart(&mut canvas, spec, style)?;
    let (png, width, height) = canvas.into_png()?;
    Ok(ImageBlock {
        png,
        width,
        height,
        width_hint: CHART_EXPORT_WIDTH,
        height_hint: CHART_EXPORT_HEIGHT,
        caption: format!("Hình: {}", sanitize_text(&spec.title)),
    })
}

/// Draw `spec` onto an existing canvas.
pub fn draw_chart(canvas: &mut Canvas, spec: &ChartSpec, style: ChartStyle) -> SangkienResult<()> {
    let Some(series) = spec.plottable() else {
        draw_placeholder(canvas)?;
        return Ok(());
    };
    let data = series.data.clone();

    let width = canvas.width();
    let height = canvas.height();
    canvas.fill_rect(Rect::new(0.0, 0.0, width, height), style.background());
    draw_title(canvas, &spec.display_title(), style)?;

    match spec.kind {
        ChartKind::Bar | ChartKind::HorizontalBar => {
            draw_bars(canvas, spec, &data, style)?;
        }
        ChartKind::Line => draw_line(canvas, spec, &data, style)?,
        ChartKind::Pie | ChartKind::Doughnut => {
            draw_pie(canvas, spec, &data, style, spec.kind == ChartKind::Doughnut)?;
        }
    }
    Ok(())
}

/// Y-axis maximum: 10% headroom over the series peak, rounded up; a flat or
/// non-positive series falls back to 10 so the axis stays drawable.
pub fn y_axis_max(data: &[f64]) -> f64 {
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // 11/10 rather than a 1.1 literal: keeps round values like 20 -> 22 exact.
    let m = (max * 11.0 / 10.0).ceil();
    if m.is_finite() && m > 0.0 { m } else { 10.0 }
}

fn chart_area(canvas: &Canvas) -> (f64, f64) {
    (
        canvas.width() - PAD_LEFT - PAD_RIGHT,
        canvas.height() - PAD_TOP - PAD_BOTTOM,
    )
}

/// Integer-ish display form: whole numbers print without a decimal point.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn draw_placeholder(canvas: &mut Canvas) -> SangkienResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(Rect::new(0.0, 0.0, w, h), Rgba8::hex(0xf3f4f6));
    canvas.fill_text(
        "Không có dữ liệu biểu đồ",
        w / 2.0,
        h / 2.0,
        FontSpec::regular(16.0),
        Rgba8::hex(0x9ca3af),
        HAlign::Center,
        VAlign::Baseline,
    )
}

/// Centered uppercased title; titles past 55 characters split in half onto
/// two lines with a hyphen at the break.
fn draw_title(canvas: &mut Canvas, title: &str, style: ChartStyle) -> SangkienResult<()> {
    let font = FontSpec::bold(26.0);
    let color = style.title_color();
    let cx = canvas.width() / 2.0;
    let chars: Vec<char> = title.chars().collect();
    if chars.len() > 55 {
        let mid = chars.len() / 2;
        let first: String = chars[..mid].iter().collect();
        let second: String = chars[mid..].iter().collect();
        canvas.fill_text(
            &format!("{first}-"),
            cx,
            40.0,
            font,
            color,
            HAlign::Center,
            VAlign::Baseline,
        )?;
        canvas.fill_text(&second, cx, 70.0, font, color, HAlign::Center, VAlign::Baseline)?;
    } else {
        canvas.fill_text(title, cx, 50.0, font, color, HAlign::Center, VAlign::Baseline)?;
    }
    Ok(())
}

/// Left + bottom axis lines and 5 labeled horizontal gridlines.
fn draw_axes_and_grid(
    canvas: &mut Canvas,
    style: ChartStyle,
    y_max: f64,
    axis_color: Rgba8,
) -> SangkienResult<()> {
    let (_, chart_h) = chart_area(canvas);
    let height = canvas.height();

    let mut axis = kurbo::BezPath::new();
    axis.move_to(Point::new(PAD_LEFT, PAD_TOP));
    axis.line_to(Point::new(PAD_LEFT, height - PAD_BOTTOM));
    axis.line_to(Point::new(canvas.width() - PAD_RIGHT, height - PAD_BOTTOM));
    canvas.stroke_path(&axis, 2.0, axis_color, &[]);

    let steps = 5;
    for i in 0..=steps {
        let y_val = y_max / f64::from(steps) * f64::from(i);
        let y_pos = height - PAD_BOTTOM - (y_val / y_max) * chart_h;
        canvas.fill_text(
            &fmt_num(y_val.round()),
            PAD_LEFT - 10.0,
            y_pos + 5.0,
            FontSpec::regular(14.0),
            style.text_color(),
            HAlign::Right,
            VAlign::Baseline,
        )?;
        canvas.stroke_line(
            Point::new(PAD_LEFT, y_pos),
            Point::new(canvas.width() - PAD_RIGHT, y_pos),
            1.0,
            style.grid_color(),
        );
    }
    Ok(())
}

fn draw_bars(
    canvas: &mut Canvas,
    spec: &ChartSpec,
    data: &[f64],
    style: ChartStyle,
) -> SangkienResult<()> {
    let (chart_w, chart_h) = chart_area(canvas);
    let height = canvas.height();
    let y_max = y_axis_max(data);
    draw_axes_and_grid(canvas, style, y_max, style.axis_color())?;

    let n = data.len() as f64;
    let bar_width = (chart_w / n * 0.6).min(100.0);
    let spacing = (chart_w - bar_width * n) / (n + 1.0);

    for (i, &value) in data.iter().enumerate() {
        // Negative values plot as zero-height bars; the value label below
        // still prints the raw number.
        let bar_height = (value.max(0.0) / y_max) * chart_h;
        let x = PAD_LEFT + spacing + i as f64 * (bar_width + spacing);
        let y = height - PAD_BOTTOM - bar_height;
        let base = style.series_color(i);
        let bar = Rect::new(x, y, x + bar_width, y + bar_height);

        if style == ChartStyle::Standard {
            // Offset shadow behind, color-to-white gradient on top, colored outline.
            canvas.fill_rect(
                Rect::new(x + 5.0, y + 5.0, x + 5.0 + bar_width, y + 5.0 + bar_height),
                Rgba8::BLACK.with_alpha(26),
            );
            canvas.fill_rect_vgradient(bar, base, Rgba8::WHITE);
            canvas.stroke_rect(bar, 1.0, base);
        } else {
            canvas.fill_rect(bar, base);
        }

        canvas.fill_text(
            &fmt_num(value),
            x + bar_width / 2.0,
            y - 8.0,
            FontSpec::bold(15.0),
            style.text_color(),
            HAlign::Center,
            VAlign::Baseline,
        )?;

        let label = spec.labels.get(i).map(String::as_str).unwrap_or("");
        let lines = canvas.wrap_text(label, FontSpec::regular(14.0), bar_width as f32 + 30.0)?;
        let mut line_y = height - PAD_BOTTOM + 20.0;
        for line in lines {
            canvas.fill_text(
                &line,
                x + bar_width / 2.0,
                line_y,
                FontSpec::regular(14.0),
                style.text_color(),
                HAlign::Center,
                VAlign::Baseline,
            )?;
            line_y += 16.0;
        }
    }
    Ok(())
}

fn draw_line(
    canvas: &mut Canvas,
    spec: &ChartSpec,
    data: &[f64],
    style: ChartStyle,
) -> SangkienResult<()> {
    let (chart_w, chart_h) = chart_area(canvas);
    let height = canvas.height();
    let y_max = y_axis_max(data);
    draw_axes_and_grid(canvas, style, y_max, style.grid_color())?;

    let step_x = chart_w / ((data.len().saturating_sub(1)).max(1) as f64);
    let point_at = |i: usize, value: f64| {
        Point::new(
            PAD_LEFT + i as f64 * step_x,
            height - PAD_BOTTOM - (value / y_max) * chart_h,
        )
    };

    let mut polyline = kurbo::BezPath::new();
    for (i, &value) in data.iter().enumerate() {
        let p = point_at(i, value);
        if i == 0 {
            polyline.move_to(p);
        } else {
            polyline.line_to(p);
        }
    }
    canvas.stroke_path(&polyline, 3.0, style.line_color(), &[]);

    for (i, &value) in data.iter().enumerate() {
        let p = point_at(i, value);
        canvas.fill_circle(p, 6.0, style.background());
        canvas.stroke_circle(p, 6.0, 3.0, style.line_color());

        let label = spec.labels.get(i).map(String::as_str).unwrap_or("");
        canvas.fill_text(
            label,
            p.x,
            height - PAD_BOTTOM + 25.0,
            FontSpec::regular(14.0),
            style.text_color(),
            HAlign::Center,
            VAlign::Baseline,
        )?;
        canvas.fill_text(
            &fmt_num(value),
            p.x,
            p.y - 15.0,
            FontSpec::bold(12.0),
            style.text_color(),
            HAlign::Center,
            VAlign::Baseline,
        )?;
    }
    Ok(())
}

/// Slice sweep in radians for one value of a series.
pub fn slice_angle(value: f64, total: f64) -> f64 {
    value / total * std::f64::consts::TAU
}

fn draw_pie(
    canvas: &mut Canvas,
    spec: &ChartSpec,
    data: &[f64],
    style: ChartStyle,
    doughnut: bool,
) -> SangkienResult<()> {
    let (chart_w, chart_h) = chart_area(canvas);
    let height = canvas.height();
    let total = {
        let sum: f64 = data.iter().sum();
        if sum == 0.0 { 1.0 } else { sum }
    };
    let center = Point::new(PAD_LEFT + chart_w / 2.0, height / 2.0 + 10.0);
    let radius = chart_w.min(chart_h) / 2.2;

    // Slices start at 12 o'clock and proceed clockwise.
    let mut start_angle = -std::f64::consts::FRAC_PI_2;
    for (i, &value) in data.iter().enumerate() {
        let sweep = slice_angle(value, total);
        let slice = Canvas::pie_slice_path(center, radius, start_angle, sweep);
        canvas.fill_path(&slice, style.series_color(i));
        canvas.stroke_path(&slice, 2.0, style.background(), &[]);

        let share = value / total;
        if share > 0.05 {
            let mid = start_angle + sweep / 2.0;
            let lx = center.x + mid.cos() * radius * 0.7;
            let ly = center.y + mid.sin() * radius * 0.7;
            let label = format!("{:.1}%", share * 100.0);
            // Offset dark copy stands in for the original's blurred shadow.
            canvas.fill_text(
                &label,
                lx + 1.0,
                ly + 1.0,
                FontSpec::bold(16.0),
                Rgba8::BLACK.with_alpha(128),
                HAlign::Center,
                VAlign::Baseline,
            )?;
            canvas.fill_text(
                &label,
                lx,
                ly,
                FontSpec::bold(16.0),
                Rgba8::WHITE,
                HAlign::Center,
                VAlign::Baseline,
            )?;
        }
        start_angle += sweep;
    }

    if doughnut {
        canvas.fill_circle(center, radius * 0.4, style.background());
    }

    // Swatch legend to the right of the chart.
    let legend_x = canvas.width() - PAD_RIGHT + 20.0;
    let mut legend_y = PAD_TOP + 20.0;
    for (i, label) in spec.labels.iter().enumerate() {
        let swatch = Rect::new(legend_x, legend_y, legend_x + 20.0, legend_y + 20.0);
        canvas.fill_rect(swatch, style.series_color(i));
        canvas.stroke_rect(swatch, 1.0, style.text_color());
        canvas.fill_text(
            label,
            legend_x + 30.0,
            legend_y + 15.0,
            FontSpec::regular(14.0),
            style.text_color(),
            HAlign::Left,
            VAlign::Baseline,
        )?;
        legend_y += 30.0;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/chart.rs"]
mod tests;
