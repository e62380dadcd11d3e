//! Chart specification as it arrives inside `json:chart` fenced blocks.

/// Chart family. Wire names follow the generated-JSON mini-language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChartKind {
    #[serde(rename = "bar")]
    Bar,
    /// Accepted on the wire but rendered through the vertical-bar path.
    #[serde(rename = "horizontalBar")]
    HorizontalBar,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "pie")]
    Pie,
    #[serde(rename = "doughnut")]
    Doughnut,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    /// The series that actually gets drawn: the first dataset, iff it exists,
    /// has data, and its length matches `labels`. `None` means the renderer
    /// falls back to the "no data" placeholder rather than erroring.
    pub fn plottable(&self) -> Option<&Dataset> {
        let first = self.datasets.first()?;
        if first.data.is_empty() || first.data.len() != self.labels.len() {
            return None;
        }
        Some(first)
    }

    /// Title with the localized fallback applied, uppercased for display.
    pub fn display_title(&self) -> String {
        let t = if self.title.trim().is_empty() {
            "Biểu đồ số liệu"
        } else {
            self.title.as_str()
        };
        t.to_uppercase()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/chart.rs"]
mod tests;
