//! User-editable outline: sections and bullet points with word budgets.
//!
//! The outline is produced in bulk by [`crate::outline::reconcile`] from a
//! model response, then mutated only by toggling `selected` flags. Sections
//! are never deleted individually; a rejected outline is regenerated whole.

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutlinePoint {
    pub id: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlineSection {
    pub id: String,
    pub title: String,
    pub points: Vec<OutlinePoint>,
    #[serde(rename = "estimatedWords")]
    pub estimated_words: u32,
    #[serde(default = "default_true")]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outline {
    pub sections: Vec<OutlineSection>,
    #[serde(rename = "totalWords")]
    pub total_words: u32,
}

impl OutlineSection {
    /// Texts of the points the user kept, in order.
    pub fn selected_point_texts(&self) -> Vec<&str> {
        self.points
            .iter()
            .filter(|p| p.selected)
            .map(|p| p.text.as_str())
            .collect()
    }
}

impl Outline {
    /// Sections the generation step will write, in document order.
    pub fn selected_sections(&self) -> Vec<&OutlineSection> {
        self.sections.iter().filter(|s| s.selected).collect()
    }

    /// Flip one section's `selected` flag in place. Unknown ids are ignored.
    pub fn toggle_section(&mut self, section_id: &str) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == section_id) {
            s.selected = !s.selected;
        }
    }

    /// Flip one point's `selected` flag in place. Unknown ids are ignored.
    pub fn toggle_point(&mut self, section_id: &str, point_id: &str) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == section_id)
            && let Some(p) = s.points.iter_mut().find(|p| p.id == point_id)
        {
            p.selected = !p.selected;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/outline.rs"]
mod tests;
