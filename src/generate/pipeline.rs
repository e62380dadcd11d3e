//! Sequential generation pipeline: outline first, then section prose.

use crate::foundation::error::{SangkienError, SangkienResult};
use crate::generate::client::{GenerationInput, LanguageModel};
use crate::model::document::clean_province;
use crate::model::outline::{Outline, OutlineSection};
use crate::outline::reconcile::{RawOutline, reconcile_outline};

/// Ask the model for an outline and reconcile its word counts against the
/// requested total.
#[tracing::instrument(skip(model, input), fields(topic = %input.topic_name))]
pub fn build_outline(model: &dyn LanguageModel, input: &GenerationInput) -> SangkienResult<Outline> {
    input.validate()?;
    let text = model.complete(&outline_prompt(input))?;
    let raw = RawOutline::from_json(&text)?;
    Ok(reconcile_outline(&raw, input.word_count))
}

/// Generate the full document body, one selected section at a time, in
/// outline order. `on_progress` receives the whole accumulated text after
/// every chunk so callers can republish a live preview.
///
/// A section whose stream fails leaves an inline error marker and the
/// pipeline moves on; one bad section must not cost the rest of the
/// document.
#[tracing::instrument(skip_all, fields(topic = %input.topic_name))]
pub fn generate_document(
    model: &dyn LanguageModel,
    input: &GenerationInput,
    outline: &Outline,
    mut on_progress: impl FnMut(&str),
) -> SangkienResult<String> {
    input.validate()?;
    let sections = outline.selected_sections();
    if sections.is_empty() {
        return Err(SangkienError::validation(
            "at least one outline section must be selected",
        ));
    }

    let system = system_prompt(input);
    let mut full = String::new();
    for (i, section) in sections.iter().enumerate() {
        tracing::info!(
            section = %section.title,
            words = section.estimated_words,
            "writing section {}/{}",
            i + 1,
            sections.len(),
        );
        match stream_section(model, &system, section, &mut full, &mut on_progress) {
            Ok(()) => full.push_str("\n\n"),
            Err(err) => {
                tracing::warn!(%err, section = %section.title, "section generation failed");
                full.push_str(&format!("\n\n[Lỗi khi viết mục: {}.]\n\n", section.title));
            }
        }
    }
    Ok(full)
}

fn stream_section(
    model: &dyn LanguageModel,
    system: &str,
    section: &OutlineSection,
    full: &mut String,
    on_progress: &mut impl FnMut(&str),
) -> SangkienResult<()> {
    let stream = model.stream(system, &section_prompt(section))?;
    for chunk in stream {
        full.push_str(&chunk?);
        on_progress(full);
    }
    Ok(())
}

fn outline_prompt(input: &GenerationInput) -> String {
    format!(
        "Bạn là chuyên gia tư vấn giáo dục. Hãy lập GIÀN Ý CHI TIẾT cho một {} với đề tài: \"{}\".\n\
         \n\
         Yêu cầu CỰC KỲ QUAN TRỌNG:\n\
         - Tổng số từ mục tiêu BẮT BUỘC LÀ: {words} từ.\n\
         - Bạn phải chia nhỏ đề tài thành các mục.\n\
         - Tổng cộng số từ ước lượng của tất cả các mục PHẢI BẰNG {words}.\n\
         \n\
         Output format (JSON only):\n\
         {{\n\
           \"sections\": [\n\
             {{ \"title\": \"Phần I: ...\", \"points\": [\"Ý chính 1\", \"Ý chính 2\"], \"estimatedWords\": 500 }},\n\
             ...\n\
           ],\n\
           \"totalWords\": {words}\n\
         }}",
        input.topic_kind.label(),
        input.topic_name,
        words = input.word_count,
    )
}

fn system_prompt(input: &GenerationInput) -> String {
    let location = {
        let l = clean_province(&input.department);
        if l.is_empty() { "Vietnam".to_string() } else { l }
    };
    format!(
        "Bạn là một chuyên gia viết Sáng kiến kinh nghiệm (SKKN) và Luận văn chuẩn mực tại Việt Nam.\n\
         \n\
         NHIỆM VỤ:\n\
         Viết nội dung chi tiết cho đề tài: \"{}\".\n\
         \n\
         THÔNG TIN:\n\
         - Tác giả: {}\n\
         - Đơn vị: {}\n\
         - Tỉnh/TP: {}\n\
         \n\
         QUY ĐỊNH TRÌNH BÀY:\n\
         1. ĐỊNH DẠNG:\n\
            - BẮT ĐẦU NGAY VÀO NỘI DUNG. KHÔNG VIẾT LẠI TIÊU ĐỀ. KHÔNG VIẾT LẠI THÔNG TIN TÁC GIẢ/ĐƠN VỊ.\n\
            - Markdown chuẩn. Tiêu đề #, ##, ###.\n\
            - Văn phong học thuật, trang trọng, mở rộng vấn đề.\n\
         \n\
         2. BIỂU ĐỒ & SỐ LIỆU:\n\
            - Trình bày bảng biểu dạng Markdown Table.\n\
            - Khi có số liệu, BẮT BUỘC vẽ biểu đồ minh hoạ bằng JSON Block.\n\
            - Đa dạng các loại biểu đồ:\n\
              + So sánh cột đứng: \"type\": \"bar\" (ƯU TIÊN VẼ BIỂU ĐỒ CỘT DỌC CÓ GRADIENT)\n\
              + Tỷ lệ phần trăm: \"type\": \"doughnut\" hoặc \"pie\"\n\
              + Xu hướng theo năm/tháng: \"type\": \"line\"\n\
            - KHÔNG vẽ biểu đồ cột ngang (horizontalBar).\n\
            - Format JSON:\n\
              ```json:chart\n\
              {{\n\
                \"type\": \"bar\",\n\
                \"title\": \"Kết quả khảo sát\",\n\
                \"labels\": [\"Rất tốt\", \"Tốt\", \"Khá\"],\n\
                \"datasets\": [{{ \"label\": \"Số lượng\", \"data\": [15, 20, 5] }}]\n\
              }}\n\
              ```\n\
         \n\
         3. SƠ ĐỒ TƯ DUY (MINDMAP):\n\
            - Dùng cho phần Tóm tắt chương hoặc Giải pháp.\n\
            - Format JSON:\n\
              ```json:mindmap\n\
              {{\n\
                \"root\": \"Chủ đề\",\n\
                \"children\": [ {{ \"name\": \"Ý 1\" }}, {{ \"name\": \"Ý 2\" }} ]\n\
              }}\n\
              ```\n\
         \n\
         4. HÌNH ẢNH:\n\
            - BẠN KHÔNG ĐƯỢC PHÉP TỰ TẠO HÌNH ẢNH.\n\
            - KHÔNG chèn cú pháp image markdown.\n\
            - KHÔNG viết dòng chú thích riêng lẻ bên dưới hình ảnh.\n\
         \n\
         5. TOÁN HỌC:\n\
            - Công thức toán: $P = \\frac{{F}}{{S}}$ (\\widehat{{ABC}} thay cho \\angle).",
        input.topic_name, input.author, input.school, location,
    )
}

fn section_prompt(section: &OutlineSection) -> String {
    let points = section.selected_point_texts().join(", ");
    // Models run short of strict word targets; ask for 20% extra.
    let buffered = (f64::from(section.estimated_words) * 1.2).round() as u32;
    format!(
        "Viết chi tiết mục: {}\n\
         Ý chính: {}\n\
         \n\
         YÊU CẦU QUAN TRỌNG VỀ ĐỘ DÀI (BẮT BUỘC):\n\
         - Mục tiêu: {} từ.\n\
         - Để đảm bảo không bị thiếu, bạn hãy viết khoảng {} từ.\n\
         - Triển khai ý thật chi tiết, đưa ra nhiều dẫn chứng, số liệu giả định, ví dụ thực tế và lập luận sâu sắc.\n\
         - TUYỆT ĐỐI KHÔNG VIẾT QUÁ NGẮN.\n\
         \n\
         Lưu ý:\n\
         - Tự động tạo biểu đồ (bar/line/pie/doughnut) nếu có số liệu.\n\
         - Tự động tạo mindmap nếu cần tóm tắt.",
        section.title, points, section.estimated_words, buffered,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pipeline.rs"]
mod tests;
