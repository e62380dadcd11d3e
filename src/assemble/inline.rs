//! Inline markdown emphasis, the only span styling the generated prose uses.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::model::document::{InlineRun, sanitize_text};

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*|_.*?_").expect("emphasis pattern compiles"));

/// Split a paragraph line into styled runs on `**bold**` and `_italic_`
/// markers. Nested emphasis is not a thing in this prose; markers never
/// overlap. Empty runs are dropped.
pub fn parse_inline(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut push = |text: &str, bold: bool, italic: bool| {
        let text = sanitize_text(text);
        if !text.is_empty() {
            runs.push(InlineRun { text, bold, italic });
        }
    };

    let mut last = 0;
    for m in EMPHASIS_RE.find_iter(text) {
        push(&text[last..m.start()], false, false);
        let s = m.as_str();
        if let Some(inner) = s.strip_prefix("**").and_then(|s| s.strip_suffix("**")) {
            push(inner, true, false);
        } else {
            push(&s[1..s.len() - 1], false, true);
        }
        last = m.end();
    }
    push(&text[last..], false, false);
    runs
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/inline.rs"]
mod tests;
