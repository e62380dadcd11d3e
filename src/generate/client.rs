//! Language-model boundary.
//!
//! The pipeline is transport-agnostic: anything that can complete a prompt
//! and stream prose implements [`LanguageModel`]. Tests plug in scripted
//! models; a real backend adapts its SDK behind this trait.

use crate::foundation::error::{SangkienError, SangkienResult};

/// Streamed completion chunks, in arrival order. A chunk error means the
/// stream died mid-section; earlier chunks remain valid.
pub type TextStream = Box<dyn Iterator<Item = SangkienResult<String>>>;

pub trait LanguageModel {
    /// One-shot completion, used for outline JSON.
    fn complete(&self, prompt: &str) -> SangkienResult<String>;

    /// Streamed completion under a system instruction, used for section
    /// prose.
    fn stream(&self, system: &str, prompt: &str) -> SangkienResult<TextStream>;
}

/// Document family, which only changes how prompts address the work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TopicKind {
    #[serde(rename = "THESIS")]
    Thesis,
    #[serde(rename = "INITIATIVE")]
    Initiative,
}

impl TopicKind {
    /// Vietnamese document-family label used inside prompts.
    pub fn label(self) -> &'static str {
        match self {
            TopicKind::Thesis => "Luận văn",
            TopicKind::Initiative => "Sáng kiến kinh nghiệm",
        }
    }
}

/// Everything the user supplies up front.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GenerationInput {
    pub topic_kind: TopicKind,
    pub topic_name: String,
    pub word_count: u32,
    pub author: String,
    pub school: String,
    pub department: String,
    pub school_year: String,
}

impl GenerationInput {
    pub fn validate(&self) -> SangkienResult<()> {
        if self.topic_name.trim().is_empty() {
            return Err(SangkienError::validation("topic name must not be empty"));
        }
        if self.word_count == 0 {
            return Err(SangkienError::validation("target word count must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/client.rs"]
mod tests;
