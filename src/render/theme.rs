//! Visual styles for the two engines: three chart styles, three mind-map
//! themes, and their fixed color palettes.

use crate::foundation::color::Rgba8;

const PALETTE_VIVID: [Rgba8; 8] = [
    Rgba8::hex(0x2563eb),
    Rgba8::hex(0xdc2626),
    Rgba8::hex(0x16a34a),
    Rgba8::hex(0xd97706),
    Rgba8::hex(0x9333ea),
    Rgba8::hex(0x0891b2),
    Rgba8::hex(0x475569),
    Rgba8::hex(0xdb2777),
];

const PALETTE_PASTEL: [Rgba8; 8] = [
    Rgba8::hex(0x60a5fa),
    Rgba8::hex(0xf87171),
    Rgba8::hex(0x4ade80),
    Rgba8::hex(0xfbbf24),
    Rgba8::hex(0xc084fc),
    Rgba8::hex(0x22d3ee),
    Rgba8::hex(0x94a3b8),
    Rgba8::hex(0xf472b6),
];

const PALETTE_NEON: [Rgba8; 6] = [
    Rgba8::hex(0x3b82f6),
    Rgba8::hex(0xf43f5e),
    Rgba8::hex(0x10b981),
    Rgba8::hex(0xf59e0b),
    Rgba8::hex(0xa855f7),
    Rgba8::hex(0x06b6d4),
];

const BRANCHES_DEFAULT: [Rgba8; 6] = [
    Rgba8::hex(0xef4444),
    Rgba8::hex(0x3b82f6),
    Rgba8::hex(0x10b981),
    Rgba8::hex(0xf59e0b),
    Rgba8::hex(0x8b5cf6),
    Rgba8::hex(0xec4899),
];

const BRANCHES_ORGANIC: [Rgba8; 5] = [
    Rgba8::hex(0x65a30d),
    Rgba8::hex(0x0891b2),
    Rgba8::hex(0xd97706),
    Rgba8::hex(0xbe185d),
    Rgba8::hex(0x7c3aed),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChartStyle {
    /// Gradient bars, drop shadows.
    #[default]
    #[serde(rename = "standard")]
    Standard,
    /// Solid pastel fills on a light background.
    #[serde(rename = "flat")]
    Flat,
    /// Neon palette on slate.
    #[serde(rename = "dark")]
    Dark,
}

impl ChartStyle {
    pub fn background(self) -> Rgba8 {
        match self {
            Self::Standard => Rgba8::WHITE,
            Self::Flat => Rgba8::hex(0xf8fafc),
            Self::Dark => Rgba8::hex(0x1e293b),
        }
    }

    pub fn text_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::WHITE,
            _ => Rgba8::BLACK,
        }
    }

    pub fn grid_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::hex(0x334155),
            _ => Rgba8::hex(0xe2e8f0),
        }
    }

    pub fn axis_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::hex(0x94a3b8),
            _ => Rgba8::hex(0x475569),
        }
    }

    pub fn title_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::hex(0x60a5fa),
            _ => Rgba8::hex(0x1e3a8a),
        }
    }

    /// Accent color for the line chart's polyline and point rings.
    pub fn line_color(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::hex(0x60a5fa),
            _ => Rgba8::hex(0x2563eb),
        }
    }

    pub fn palette(self) -> &'static [Rgba8] {
        match self {
            Self::Standard => &PALETTE_VIVID,
            Self::Flat => &PALETTE_PASTEL,
            Self::Dark => &PALETTE_NEON,
        }
    }

    /// Series color for index `i`, cycling through the palette.
    pub fn series_color(self, i: usize) -> Rgba8 {
        let p = self.palette();
        p[i % p.len()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MindmapTheme {
    /// Branch-colored gradient pills. Also the fixed export theme.
    #[default]
    #[serde(rename = "colorful")]
    Colorful,
    /// Boxy nodes with muted connectors.
    #[serde(rename = "professional")]
    Professional,
    /// Dashed connectors, heavy rounding, earthy palette.
    #[serde(rename = "organic")]
    Organic,
}

impl MindmapTheme {
    pub fn background(self) -> Rgba8 {
        match self {
            Self::Professional => Rgba8::hex(0xf1f5f9),
            _ => Rgba8::WHITE,
        }
    }

    pub fn branch_palette(self) -> &'static [Rgba8] {
        match self {
            Self::Organic => &BRANCHES_ORGANIC,
            _ => &BRANCHES_DEFAULT,
        }
    }

    /// Color of the branch rooted at the root's `i`-th child; descendants
    /// inherit it.
    pub fn branch_color(self, i: usize) -> Rgba8 {
        let p = self.branch_palette();
        p[i % p.len()]
    }

    pub fn connector_color(self, branch: Rgba8) -> Rgba8 {
        match self {
            Self::Professional => Rgba8::hex(0x94a3b8),
            _ => branch,
        }
    }

    pub fn dashed_connectors(self) -> bool {
        matches!(self, Self::Organic)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;
