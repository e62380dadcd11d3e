//! Assembled document tree, the contract with the external document writer.

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

/// One styled span of paragraph text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableBlock {
    /// Rows of cell text, all padded to the same column count.
    pub rows: Vec<Vec<String>>,
    /// The first row is a header row (bold, shaded by the writer).
    pub has_header: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageBlock {
    /// PNG-encoded raster bytes.
    #[serde(with = "serde_bytes_base64")]
    pub png: Vec<u8>,
    /// Pixel dimensions of the encoded image.
    pub width: u32,
    pub height: u32,
    /// Suggested placement size in the exported document, in points.
    pub width_hint: u32,
    pub height_hint: u32,
    pub caption: String,
}

/// One block of the assembled document, in reading order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DocumentBlock {
    Heading { level: HeadingLevel, text: String },
    Paragraph(Vec<InlineRun>),
    Table(TableBlock),
    Image(ImageBlock),
}

/// Front matter the document writer renders before the assembled blocks:
/// title block, department/school header table, and the localized date line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrontMatter {
    pub topic_name: String,
    pub author: String,
    pub school: String,
    pub department: String,
    pub school_year: String,
    /// e.g. "Hà Nội, ngày 29 tháng 8 năm 2026"
    pub date_line: String,
}

impl FrontMatter {
    pub fn new(
        topic_name: impl Into<String>,
        author: impl Into<String>,
        school: impl Into<String>,
        department: impl Into<String>,
        school_year: impl Into<String>,
    ) -> Self {
        let department = department.into();
        let location = clean_province(&department);
        let today = chrono::Local::now().date_naive();
        let date_line = format!(
            "{}, ngày {} tháng {} năm {}",
            if location.is_empty() { "......." } else { &location },
            chrono::Datelike::day(&today),
            chrono::Datelike::month(&today),
            chrono::Datelike::year(&today),
        );
        Self {
            topic_name: topic_name.into(),
            author: author.into(),
            school: school.into(),
            department,
            school_year: school_year.into(),
            date_line,
        }
    }
}

/// Strip the administrative-office prefixes off a department name, leaving
/// the bare province/city for the date line.
pub fn clean_province(department: &str) -> String {
    let mut s = department.trim();
    for prefix in [
        "Sở GD&ĐT",
        "Phòng GD&ĐT",
        "SỞ GIÁO DỤC VÀ ĐÀO TẠO",
    ] {
        if let Some(rest) = strip_prefix_ignore_case(s, prefix) {
            s = rest.trim_start();
            break;
        }
    }
    s.trim().to_string()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut it = s.char_indices();
    for pc in prefix.chars() {
        let (_, sc) = it.next()?;
        if !sc.to_lowercase().eq(pc.to_lowercase()) {
            return None;
        }
    }
    match it.next() {
        Some((i, _)) => Some(&s[i..]),
        None => Some(""),
    }
}

/// Remove characters invalid in XML 1.0, which choke word-processor writers.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            !matches!(c, '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}')
        })
        .collect()
}

mod serde_bytes_base64 {
    //! PNG bytes as base64 strings, so block dumps stay valid JSON without a
    //! binary sidecar.

    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
