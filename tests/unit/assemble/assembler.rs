use super::*;
use crate::model::document::HeadingLevel;

fn dummy_img(caption: &str) -> ImageBlock {
    ImageBlock {
        png: vec![1, 2, 3],
        width: 1,
        height: 1,
        width_hint: 1,
        height_hint: 1,
        caption: caption.to_string(),
    }
}

fn run(markdown: &str, topic: &str) -> Vec<DocumentBlock> {
    assemble_with(
        markdown,
        topic,
        |spec: &ChartSpec| Ok(dummy_img(&spec.title)),
        |spec: &MindmapSpec| Ok(dummy_img(&spec.root)),
    )
}

#[test]
fn headings_and_paragraphs_keep_document_order() {
    let blocks = run("# Mở đầu\n\nĐoạn một.\n\n## Chi tiết\nĐoạn hai.", "");
    assert_eq!(blocks.len(), 4);
    assert!(matches!(
        &blocks[0],
        DocumentBlock::Heading { level: HeadingLevel::H1, text } if text == "Mở đầu"
    ));
    assert!(matches!(&blocks[1], DocumentBlock::Paragraph(_)));
    assert!(matches!(
        &blocks[2],
        DocumentBlock::Heading { level: HeadingLevel::H2, .. }
    ));
}

#[test]
fn echoed_metadata_never_reaches_the_blocks() {
    let markdown = "\
**SÁNG KIẾN KINH NGHIỆM**\n\
**TÁC GIẢ:** Nguyễn Văn A\n\
\n\
# Phần I: Mở đầu\n\
Nội dung.";
    let blocks = run(markdown, "");
    assert!(matches!(&blocks[0], DocumentBlock::Heading { .. }));
}

#[test]
fn chart_fences_become_image_blocks() {
    let markdown = "\
Trước biểu đồ.\n\
```json:chart\n\
{\n\
  \"type\": \"bar\", // cột đứng\n\
  \"title\": \"Khảo sát\",\n\
  \"labels\": [\"A\"],\n\
  \"datasets\": [{ \"label\": \"n\", \"data\": [1] }]\n\
}\n\
```\n\
Hình 1: Khảo sát\n\
Sau biểu đồ.";
    let blocks = run(markdown, "");
    assert_eq!(blocks.len(), 3);
    assert!(matches!(&blocks[0], DocumentBlock::Paragraph(_)));
    assert!(matches!(&blocks[1], DocumentBlock::Image(img) if img.caption == "Khảo sát"));
    // The echoed caption line is gone; the prose after it survives.
    assert!(matches!(
        &blocks[2],
        DocumentBlock::Paragraph(runs) if runs[0].text == "Sau biểu đồ."
    ));
}

#[test]
fn mindmap_fences_become_image_blocks() {
    let markdown = "```json:mindmap\n{ \"root\": \"Chủ đề\", \"children\": [{ \"name\": \"Ý 1\" }] }\n```";
    let blocks = run(markdown, "");
    assert_eq!(blocks.len(), 1);
    assert!(matches!(&blocks[0], DocumentBlock::Image(img) if img.caption == "Chủ đề"));
}

#[test]
fn malformed_fence_json_is_dropped_without_losing_prose() {
    let markdown = "Trước.\n```json:chart\n{ hỏng json\n```\nSau.";
    let blocks = run(markdown, "");
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| matches!(b, DocumentBlock::Paragraph(_))));
}

#[test]
fn render_failures_are_dropped_without_losing_prose() {
    let markdown = "Trước.\n```json:chart\n{ \"type\": \"bar\" }\n```\nSau.";
    let blocks = assemble_with(
        markdown,
        "",
        |_: &ChartSpec| Err(crate::foundation::error::SangkienError::render("hỏng")),
        |spec: &MindmapSpec| Ok(dummy_img(&spec.root)),
    );
    assert_eq!(blocks.len(), 2);
}

#[test]
fn unknown_fence_bodies_are_discarded() {
    let blocks = run("```python\nprint('bỏ qua')\n```\nGiữ lại.", "");
    assert_eq!(blocks.len(), 1);
    assert!(matches!(
        &blocks[0],
        DocumentBlock::Paragraph(runs) if runs[0].text == "Giữ lại."
    ));
}

#[test]
fn tables_flush_with_a_spacer_paragraph() {
    let markdown = "| A | B |\n|---|---|\n| 1 | 2 |\n\nSau bảng.";
    let blocks = run(markdown, "");
    assert_eq!(blocks.len(), 3);
    assert!(matches!(&blocks[0], DocumentBlock::Table(t) if t.rows.len() == 2));
    assert!(matches!(&blocks[1], DocumentBlock::Paragraph(runs) if runs.is_empty()));
    assert!(matches!(&blocks[2], DocumentBlock::Paragraph(_)));
}

#[test]
fn a_table_at_end_of_input_still_flushes() {
    let blocks = run("| A |\n| 1 |", "");
    assert!(matches!(&blocks[0], DocumentBlock::Table(t) if t.rows.len() == 2));
}

#[test]
fn unterminated_fences_are_dropped() {
    let blocks = run("Đoạn.\n```json:chart\n{ \"type\": \"bar\"", "");
    assert_eq!(blocks.len(), 1);
}

#[test]
fn stray_caption_lines_are_skipped() {
    let blocks = run("Hình 2: chú thích lạc\nVăn bản thật.", "");
    assert_eq!(blocks.len(), 1);
}

#[test]
fn all_caps_caption_lines_are_skipped_too() {
    let blocks = run("Văn bản.\nHÌNH 1: KẾT QUẢ KHẢO SÁT\nTiếp.", "");
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| matches!(b, DocumentBlock::Paragraph(_))));
}
