//! Word-count reconciliation.
//!
//! Generative models are unreliable at arithmetic: section estimates rarely
//! sum to the requested total. Downstream prose prompting budgets each
//! section by word count, so the estimates are rescaled locally until the
//! sum matches the caller's target exactly, rather than trusting the model.

use crate::foundation::error::{SangkienError, SangkienResult};
use crate::model::outline::{Outline, OutlinePoint, OutlineSection};

/// Outline JSON as the language model returns it, before normalization.
/// Fields are deliberately loose; shape drift is handled here, not upstream.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawOutline {
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(rename = "totalWords", default)]
    pub total_words: Option<f64>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub title: Option<String>,
    /// Points ought to be strings but arrive in assorted shapes; see
    /// [`normalize_point`].
    #[serde(default)]
    pub points: Vec<serde_json::Value>,
    #[serde(rename = "estimatedWords", default)]
    pub estimated_words: Option<f64>,
}

impl RawOutline {
    pub fn from_json(text: &str) -> SangkienResult<Self> {
        // Models sometimes wrap schema-constrained output in a fence anyway.
        let cleaned = text.replace("```json", "").replace("```", "");
        serde_json::from_str(cleaned.trim())
            .map_err(|e| SangkienError::serde(format!("outline JSON parse failed: {e}")))
    }
}

/// Missing or non-numeric estimates count as 500 words.
fn raw_estimate(section: &RawSection) -> f64 {
    match section.estimated_words {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 500.0,
    }
}

/// Displayed text of one outline point, whatever shape it arrived in:
/// a bare string, an object exposing `text`/`content`/`point` (checked in
/// that order), or anything else in its serialized form.
pub fn normalize_point(value: &serde_json::Value) -> String {
    if let Some(s) = value.as_str() {
        return s.to_string();
    }
    if let Some(obj) = value.as_object() {
        for key in ["text", "content", "point"] {
            if let Some(s) = obj.get(key).and_then(serde_json::Value::as_str) {
                return s.to_string();
            }
        }
    }
    value.to_string()
}

/// Rescale raw estimates so they sum to `target_total` exactly.
///
/// Every section but the last is scaled and rounded to the nearest 10; the
/// last takes the remainder. When the remainder is not positive (a target too
/// small for the section count) it is clamped to a floor of 100, which is the
/// one documented case where the exact-sum guarantee yields to a usable
/// minimum budget.
pub fn reconcile(raw_sections: &[RawSection], target_total: u32) -> Vec<OutlineSection> {
    let ai_total: f64 = raw_sections.iter().map(raw_estimate).sum();
    let scale = if ai_total > 0.0 {
        f64::from(target_total) / ai_total
    } else {
        1.0
    };

    let mut running_total: i64 = 0;
    let last = raw_sections.len().saturating_sub(1);
    raw_sections
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let adjusted: u32 = if idx == last {
                let diff = i64::from(target_total) - running_total;
                if diff <= 0 { 100 } else { diff as u32 }
            } else {
                let rounded = ((raw_estimate(raw) * scale / 10.0).round() * 10.0).max(0.0) as u32;
                running_total += i64::from(rounded);
                rounded
            };

            let section_id = format!("sec_{}_{}", idx, uuid::Uuid::new_v4().simple());
            let points = raw
                .points
                .iter()
                .enumerate()
                .map(|(p_idx, p)| OutlinePoint {
                    id: format!("{section_id}_pt_{p_idx}"),
                    text: normalize_point(p),
                    selected: true,
                })
                .collect();

            OutlineSection {
                id: section_id,
                title: raw
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Mục {}", idx + 1)),
                points,
                estimated_words: adjusted,
                selected: true,
            }
        })
        .collect()
}

/// Full outline from a raw model response: reconciled sections, and the
/// caller's target as the authoritative total regardless of what the model
/// proposed.
pub fn reconcile_outline(raw: &RawOutline, target_total: u32) -> Outline {
    Outline {
        sections: reconcile(&raw.sections, target_total),
        total_words: target_total,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/reconcile.rs"]
mod tests;
