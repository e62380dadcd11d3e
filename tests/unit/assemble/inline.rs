use super::*;

fn flags(runs: &[InlineRun]) -> Vec<(&str, bool, bool)> {
    runs.iter()
        .map(|r| (r.text.as_str(), r.bold, r.italic))
        .collect()
}

#[test]
fn plain_text_is_one_run() {
    let runs = parse_inline("một đoạn văn thường");
    assert_eq!(flags(&runs), vec![("một đoạn văn thường", false, false)]);
}

#[test]
fn bold_markers_split_out_a_bold_run() {
    let runs = parse_inline("trước **đậm** sau");
    assert_eq!(
        flags(&runs),
        vec![("trước ", false, false), ("đậm", true, false), (" sau", false, false)]
    );
}

#[test]
fn underscores_mark_italics() {
    let runs = parse_inline("_nghiêng_ rồi thường");
    assert_eq!(
        flags(&runs),
        vec![("nghiêng", false, true), (" rồi thường", false, false)]
    );
}

#[test]
fn mixed_emphasis_keeps_document_order() {
    let runs = parse_inline("**a** giữa _b_");
    assert_eq!(
        flags(&runs),
        vec![("a", true, false), (" giữa ", false, false), ("b", false, true)]
    );
}

#[test]
fn empty_runs_are_dropped() {
    assert!(parse_inline("").is_empty());
    assert_eq!(flags(&parse_inline("**chỉ đậm**")), vec![("chỉ đậm", true, false)]);
    // Empty emphasis bodies vanish entirely.
    assert!(parse_inline("****").is_empty());
}

#[test]
fn unbalanced_markers_stay_literal() {
    let runs = parse_inline("chưa **đóng");
    assert_eq!(flags(&runs), vec![("chưa **đóng", false, false)]);
}

#[test]
fn control_characters_are_scrubbed() {
    let runs = parse_inline("a\u{00}b **c\u{0b}d**");
    assert_eq!(flags(&runs), vec![("ab ", false, false), ("cd", true, false)]);
}
