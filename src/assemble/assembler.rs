//! Markdown stream to document blocks.
//!
//! The generated prose is markdown with two extensions: ```json:chart and
//! ```json:mindmap fences carrying render specs. Assembly walks the text
//! line by line through a small state machine, renders the fences to PNG
//! image blocks inline, and drops everything the document writer cannot
//! use (echoed header metadata, stray captions, unknown fences). Malformed
//! fence bodies are logged and skipped, never fatal: a bad chart must not
//! cost the user the surrounding prose.

use serde::de::DeserializeOwned;

use crate::assemble::classify::{self, FenceKind};
use crate::assemble::inline::parse_inline;
use crate::assemble::table::parse_table;
use crate::foundation::error::{SangkienError, SangkienResult};
use crate::model::chart::ChartSpec;
use crate::model::document::{DocumentBlock, ImageBlock, sanitize_text};
use crate::model::mindmap::MindmapSpec;
use crate::render::chart::render_chart;
use crate::render::mindmap::render_mindmap;
use crate::render::theme::{ChartStyle, MindmapTheme};

enum State {
    Normal,
    /// Consecutive `|` lines, flushed as one table at the first other line.
    BufferingTable(Vec<String>),
    InFence { kind: FenceKind, body: Vec<String> },
}

/// Assemble generated markdown into document blocks, rendering charts with
/// the given style. Mindmaps always export in the colorful theme.
pub fn assemble(markdown: &str, topic: &str, style: ChartStyle) -> Vec<DocumentBlock> {
    assemble_with(
        markdown,
        topic,
        |spec| render_chart(spec, style),
        |spec| render_mindmap(spec, MindmapTheme::Colorful),
    )
}

/// [`assemble`] with injectable renderers.
pub fn assemble_with<C, M>(markdown: &str, topic: &str, chart: C, mindmap: M) -> Vec<DocumentBlock>
where
    C: Fn(&ChartSpec) -> SangkienResult<ImageBlock>,
    M: Fn(&MindmapSpec) -> SangkienResult<ImageBlock>,
{
    let all: Vec<&str> = markdown.lines().collect();
    let lines = &all[classify::metadata_skip(&all, topic)..];

    let mut blocks = Vec::new();
    let mut state = State::Normal;

    for raw in lines {
        let line = raw.trim();

        if let State::BufferingTable(buf) = &mut state {
            if classify::is_table_row(line) {
                buf.push(line.to_string());
                continue;
            }
            let buf = std::mem::take(buf);
            state = State::Normal;
            flush_table(&buf, &mut blocks);
            // fall through, the current line still needs handling
        }

        if let State::InFence { kind, body } = &mut state {
            if line.starts_with("```") {
                let kind = *kind;
                let body = std::mem::take(body);
                state = State::Normal;
                close_fence(kind, &body, &chart, &mindmap, &mut blocks);
            } else {
                body.push((*raw).to_string());
            }
            continue;
        }

        if classify::is_table_row(line) {
            state = State::BufferingTable(vec![line.to_string()]);
            continue;
        }
        if let Some(kind) = classify::fence_open(line) {
            state = State::InFence { kind, body: Vec::new() };
            continue;
        }
        if line.is_empty() || classify::is_caption(line) {
            continue;
        }
        if let Some((level, text)) = classify::heading(line) {
            blocks.push(DocumentBlock::Heading {
                level,
                text: sanitize_text(text),
            });
            continue;
        }
        let runs = parse_inline(line);
        if !runs.is_empty() {
            blocks.push(DocumentBlock::Paragraph(runs));
        }
    }

    match state {
        State::Normal => {}
        State::BufferingTable(buf) => flush_table(&buf, &mut blocks),
        State::InFence { kind, .. } => {
            tracing::warn!(?kind, "unterminated code fence at end of content, dropped");
        }
    }

    blocks
}

fn flush_table(buffer: &[String], blocks: &mut Vec<DocumentBlock>) {
    if let Some(table) = parse_table(buffer) {
        blocks.push(DocumentBlock::Table(table));
        // spacer so the writer does not glue the table to the next block
        blocks.push(DocumentBlock::Paragraph(Vec::new()));
    }
}

fn close_fence<C, M>(
    kind: FenceKind,
    body: &[String],
    chart: &C,
    mindmap: &M,
    blocks: &mut Vec<DocumentBlock>,
) where
    C: Fn(&ChartSpec) -> SangkienResult<ImageBlock>,
    M: Fn(&MindmapSpec) -> SangkienResult<ImageBlock>,
{
    match kind {
        FenceKind::Other => {}
        FenceKind::Chart => match parse_fence_json::<ChartSpec>(body) {
            Ok(spec) => match chart(&spec) {
                Ok(img) => blocks.push(DocumentBlock::Image(img)),
                Err(err) => tracing::warn!(%err, "chart render failed, block dropped"),
            },
            Err(err) => tracing::warn!(%err, "malformed chart JSON, block dropped"),
        },
        FenceKind::Mindmap => match parse_fence_json::<MindmapSpec>(body) {
            Ok(spec) => match mindmap(&spec) {
                Ok(img) => blocks.push(DocumentBlock::Image(img)),
                Err(err) => tracing::warn!(%err, "mindmap render failed, block dropped"),
            },
            Err(err) => tracing::warn!(%err, "malformed mindmap JSON, block dropped"),
        },
    }
}

/// Parse a fence body as JSON after stripping `//` line comments, which the
/// model likes to annotate its data with.
fn parse_fence_json<T: DeserializeOwned>(body: &[String]) -> SangkienResult<T> {
    let cleaned: Vec<&str> = body
        .iter()
        .map(|l| match l.find("//") {
            Some(i) => &l[..i],
            None => l.as_str(),
        })
        .collect();
    serde_json::from_str(cleaned.join("\n").trim())
        .map_err(|e| SangkienError::serde(format!("fence body parse failed: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/assembler.rs"]
mod tests;
