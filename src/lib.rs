//! Sangkien generates Vietnamese academic documents (sáng kiến kinh nghiệm
//! and theses) from a topic: outline first, then streamed section prose,
//! then assembly of the markdown into document blocks with charts and
//! mindmaps rendered to PNG on a CPU raster pipeline.
//!
//! # Pipeline overview
//!
//! 1. **Outline**: `LanguageModel + GenerationInput -> Outline` (word counts
//!    reconciled to the requested total, exactly)
//! 2. **Generate**: selected sections streamed one at a time into a growing
//!    markdown buffer
//! 3. **Assemble**: `markdown -> Vec<DocumentBlock>`, with `json:chart` and
//!    `json:mindmap` fences rendered inline to PNG image blocks
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic rendering**: fonts are bundled; the same spec renders
//!   the same pixels on every machine.
//! - **Lossy-never-fatal assembly**: malformed fences and ragged tables are
//!   repaired or dropped with a warning, never an error.
#![forbid(unsafe_code)]

mod assemble;
mod foundation;
mod generate;
mod model;
mod outline;
mod render;

pub use assemble::assembler::{assemble, assemble_with};
pub use assemble::classify::FenceKind;
pub use assemble::inline::parse_inline;
pub use assemble::table::parse_table;
pub use foundation::color::Rgba8;
pub use foundation::error::{SangkienError, SangkienResult};
pub use generate::client::{GenerationInput, LanguageModel, TextStream, TopicKind};
pub use generate::pipeline::{build_outline, generate_document};
pub use model::chart::{ChartKind, ChartSpec, Dataset};
pub use model::document::{
    DocumentBlock, FrontMatter, HeadingLevel, ImageBlock, InlineRun, TableBlock, clean_province,
    sanitize_text,
};
pub use model::mindmap::{MindmapNode, MindmapSpec};
pub use model::outline::{Outline, OutlinePoint, OutlineSection};
pub use outline::reconcile::{RawOutline, RawSection, normalize_point, reconcile, reconcile_outline};
pub use render::chart::{render_chart, y_axis_max};
pub use render::mindmap::{PlacedNode, layout_nodes, render_mindmap};
pub use render::theme::{ChartStyle, MindmapTheme};
