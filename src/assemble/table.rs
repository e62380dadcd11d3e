//! Markdown table normalization.

use crate::model::document::{TableBlock, sanitize_text};

/// Build a table from buffered `|`-prefixed lines.
///
/// Model tables are frequently ragged: rows with missing trailing cells,
/// stray alignment rows in the middle. All `---` separator rows are skipped
/// and every remaining row is padded to the widest row's column count. The
/// first buffered row is the header. Returns `None` when nothing usable
/// remains.
pub fn parse_table(buffer: &[String]) -> Option<TableBlock> {
    let max_cols = buffer
        .iter()
        .filter(|l| l.trim().starts_with('|') && !l.contains("---"))
        .map(|l| l.split('|').count().saturating_sub(2))
        .max()?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in buffer {
        let line = line.trim();
        if !line.starts_with('|') || line.contains("---") {
            continue;
        }
        let mut cells: Vec<String> = line
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(sanitize_text)
            .collect();
        while cells.len() < max_cols {
            cells.push(String::new());
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        None
    } else {
        Some(TableBlock {
            rows,
            has_header: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/table.rs"]
mod tests;
