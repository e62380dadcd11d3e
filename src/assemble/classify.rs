//! Line classification for the markdown assembler.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::model::document::HeadingLevel;

/// Standalone figure captions the model emits below charts, e.g.
/// "*Hình 1: Kết quả khảo sát*". Rendered images carry their own caption,
/// so these lines are dropped wherever they appear. Matched against the
/// lowercased line; regex-lite's `(?i)` folds ASCII only, which would miss
/// "HÌNH".
static CAPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*?hình\s*\d*.*:").expect("caption pattern compiles")
});

/// Header lines the model repeats back from the prompt despite being told
/// not to. Compared against cleaned, uppercased lines.
const METADATA_KEYWORDS: [&str; 5] = [
    "TÁC GIẢ",
    "ĐƠN VỊ",
    "TỈNH/THÀNH PHỐ",
    "NĂM HỌC",
    "SÁNG KIẾN KINH NGHIỆM",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FenceKind {
    Chart,
    Mindmap,
    /// Any other ```-fenced block. Its body is discarded.
    Other,
}

pub fn is_caption(line: &str) -> bool {
    CAPTION_RE.is_match(&line.to_lowercase())
}

pub fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

/// `Some(kind)` when the trimmed line opens (or closes) a code fence.
pub fn fence_open(line: &str) -> Option<FenceKind> {
    let tag = line.strip_prefix("```")?;
    if tag.starts_with("json:chart") {
        Some(FenceKind::Chart)
    } else if tag.starts_with("json:mindmap") {
        Some(FenceKind::Mindmap)
    } else {
        Some(FenceKind::Other)
    }
}

/// ATX headings, three levels deep. Deeper headings fall through to
/// paragraph handling.
pub fn heading(line: &str) -> Option<(HeadingLevel, &str)> {
    if let Some(rest) = line.strip_prefix("### ") {
        Some((HeadingLevel::H3, rest))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Some((HeadingLevel::H2, rest))
    } else if let Some(rest) = line.strip_prefix("# ") {
        Some((HeadingLevel::H1, rest))
    } else {
        None
    }
}

/// How many leading lines to drop as echoed header metadata.
///
/// Scans at most the first 25 lines. A line counts as metadata when, with
/// markdown decoration characters removed, its uppercased form contains a
/// known header keyword or the topic name. Blank lines and `---` rules
/// inside the metadata block are tolerated; the first real content line
/// stops the scan.
pub fn metadata_skip(lines: &[&str], topic: &str) -> usize {
    let topic_upper = topic.trim().to_uppercase();
    let mut start = 0;
    for (i, raw) in lines.iter().take(25).enumerate() {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '*' | '#' | '-' | '_'))
            .collect();
        let cleaned = cleaned.trim().to_uppercase();
        if cleaned.is_empty() {
            continue;
        }
        let matched = METADATA_KEYWORDS.iter().any(|kw| cleaned.contains(kw))
            || (!topic_upper.is_empty() && cleaned.contains(&topic_upper));
        if matched {
            start = i + 1;
        } else if !raw.trim().starts_with("---") {
            break;
        }
    }
    start
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/classify.rs"]
mod tests;
