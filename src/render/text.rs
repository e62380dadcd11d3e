//! Text shaping and measurement on top of Parley.
//!
//! Fonts are bundled (DejaVu Serif regular + bold) so measurement is
//! deterministic across machines; nothing here touches system font lookup.

use crate::foundation::error::{SangkienError, SangkienResult};

/// Embedded font bytes for the regular weight.
pub const FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");
/// Embedded font bytes for the bold weight.
pub const FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf");

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<crate::foundation::color::Rgba8> for TextBrush {
    fn from(c: crate::foundation::color::Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Size and weight for one draw or measurement call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub px: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(px: f32) -> Self {
        Self { px, bold: false }
    }

    pub fn bold(px: f32) -> Self {
        Self { px, bold: true }
    }

    /// Raw bytes of the font file this spec resolves to.
    pub fn font_bytes(self) -> &'static [u8] {
        if self.bold { FONT_BOLD } else { FONT_REGULAR }
    }
}

/// Stateful helper for building Parley text layouts over the bundled fonts.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
}

impl TextEngine {
    pub fn new() -> SangkienResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut family_name = None;
        for bytes in [FONT_REGULAR, FONT_BOLD] {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                SangkienError::validation("no font families registered from bundled font bytes")
            })?;
            let name = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| SangkienError::validation("bundled font family has no name"))?
                .to_string();
            family_name.get_or_insert(name);
        }
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name: family_name
                .ok_or_else(|| SangkienError::validation("no bundled fonts registered"))?,
        })
    }

    /// Shape and lay out one piece of text. `max_width_px` enables Parley's
    /// own line breaking; measurement passes `None`.
    pub fn layout(
        &mut self,
        text: &str,
        font: FontSpec,
        brush: TextBrush,
        max_width_px: Option<f32>,
    ) -> SangkienResult<parley::Layout<TextBrush>> {
        if !font.px.is_finite() || font.px <= 0.0 {
            return Err(SangkienError::validation("font px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.px));
        builder.push_default(parley::style::StyleProperty::FontWeight(if font.bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }
        Ok(layout)
    }

    /// Advance width of `text` at `font`, in pixels.
    pub fn measure(&mut self, text: &str, font: FontSpec) -> SangkienResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout(text, font, TextBrush::default(), None)?;
        Ok(layout.full_width())
    }
}

/// Greedy single-space word wrap against measured widths.
///
/// The first word always opens a line, so a single word wider than
/// `max_width` is placed alone rather than split. Returns at least one line,
/// even for empty input.
pub fn wrap_text(
    engine: &mut TextEngine,
    text: &str,
    font: FontSpec,
    max_width: f32,
) -> SangkienResult<Vec<String>> {
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or("").to_string();
    let mut lines = Vec::new();
    for word in words {
        let candidate = format!("{current} {word}");
        if engine.measure(&candidate, font)? < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    lines.push(current);
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
