use super::*;

#[test]
fn captions_match_with_and_without_numbers() {
    assert!(is_caption("Hình 1: Kết quả khảo sát"));
    assert!(is_caption("*Hình 2: Biểu đồ*"));
    assert!(is_caption("Hình: tổng quan"));
    assert!(is_caption("hình 3 minh họa: chi tiết"));
}

#[test]
fn captions_match_regardless_of_case() {
    // Folding must cover the non-ASCII 'Ì', not just ASCII letters.
    assert!(is_caption("HÌNH 1: KẾT QUẢ KHẢO SÁT"));
    assert!(is_caption("*HÌNH: TỔNG QUAN*"));
}

#[test]
fn ordinary_prose_is_not_a_caption() {
    assert!(!is_caption("Trong hình trên ta thấy:"));
    assert!(!is_caption("Hình thức tổ chức"));
    assert!(!is_caption("# Hình học"));
}

#[test]
fn fences_are_tagged_by_kind() {
    assert_eq!(fence_open("```json:chart"), Some(FenceKind::Chart));
    assert_eq!(fence_open("```json:mindmap"), Some(FenceKind::Mindmap));
    assert_eq!(fence_open("```python"), Some(FenceKind::Other));
    assert_eq!(fence_open("```"), Some(FenceKind::Other));
    assert_eq!(fence_open("| a | b |"), None);
}

#[test]
fn headings_stop_at_three_levels() {
    assert_eq!(heading("# Mở đầu"), Some((HeadingLevel::H1, "Mở đầu")));
    assert_eq!(heading("## Cơ sở lý luận"), Some((HeadingLevel::H2, "Cơ sở lý luận")));
    assert_eq!(heading("### Chi tiết"), Some((HeadingLevel::H3, "Chi tiết")));
    assert_eq!(heading("#### Sâu quá"), None);
    assert_eq!(heading("#không có cách"), None);
    assert_eq!(heading("văn bản thường"), None);
}

#[test]
fn table_rows_start_with_a_pipe() {
    assert!(is_table_row("| a | b |"));
    assert!(!is_table_row("a | b"));
}

#[test]
fn metadata_block_is_skipped_up_to_the_first_content_line() {
    let lines = vec![
        "**TÁC GIẢ:** Nguyễn Văn A",
        "**ĐƠN VỊ:** Trường THPT X",
        "",
        "# Mở đầu",
        "Nội dung thật.",
    ];
    assert_eq!(metadata_skip(&lines, "Đề tài"), 2);
}

#[test]
fn topic_name_counts_as_metadata() {
    let lines = vec!["# NÂNG CAO CHẤT LƯỢNG DẠY HỌC", "Đoạn mở đầu."];
    assert_eq!(metadata_skip(&lines, "Nâng cao chất lượng dạy học"), 1);
}

#[test]
fn separators_inside_the_header_are_tolerated() {
    let lines = vec!["TÁC GIẢ: A", "--- hết phần đầu", "NĂM HỌC: 2025-2026", "Nội dung."];
    assert_eq!(metadata_skip(&lines, ""), 3);
}

#[test]
fn content_without_metadata_is_untouched() {
    let lines = vec!["# Mở đầu", "TÁC GIẢ xuất hiện muộn thì giữ nguyên."];
    assert_eq!(metadata_skip(&lines, ""), 0);
}

#[test]
fn scan_stops_after_twenty_five_lines() {
    let mut lines = vec![""; 30];
    lines[28] = "TÁC GIẢ: quá muộn";
    assert_eq!(metadata_skip(&lines, ""), 0);
}
