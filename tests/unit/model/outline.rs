use super::*;

fn outline() -> Outline {
    Outline {
        sections: vec![
            OutlineSection {
                id: "s0".to_string(),
                title: "Phần I".to_string(),
                points: vec![
                    OutlinePoint {
                        id: "s0_p0".to_string(),
                        text: "Ý 1".to_string(),
                        selected: true,
                    },
                    OutlinePoint {
                        id: "s0_p1".to_string(),
                        text: "Ý 2".to_string(),
                        selected: false,
                    },
                ],
                estimated_words: 300,
                selected: true,
            },
            OutlineSection {
                id: "s1".to_string(),
                title: "Phần II".to_string(),
                points: vec![],
                estimated_words: 700,
                selected: false,
            },
        ],
        total_words: 1000,
    }
}

#[test]
fn selected_sections_filters_in_order() {
    let o = outline();
    let picked = o.selected_sections();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].id, "s0");
}

#[test]
fn selected_point_texts_filters() {
    let o = outline();
    assert_eq!(o.sections[0].selected_point_texts(), vec!["Ý 1"]);
}

#[test]
fn toggle_section_twice_restores_state() {
    let mut o = outline();
    o.toggle_section("s1");
    assert!(o.sections[1].selected);
    o.toggle_section("s1");
    assert!(!o.sections[1].selected);
}

#[test]
fn toggle_point_twice_restores_state() {
    let mut o = outline();
    o.toggle_point("s0", "s0_p1");
    assert!(o.sections[0].points[1].selected);
    o.toggle_point("s0", "s0_p1");
    assert!(!o.sections[0].points[1].selected);
}

#[test]
fn toggles_ignore_unknown_ids() {
    let mut o = outline();
    let before = o.clone();
    o.toggle_section("missing");
    o.toggle_point("s0", "missing");
    o.toggle_point("missing", "s0_p0");
    assert_eq!(o, before);
}

#[test]
fn serde_uses_camel_case_word_fields() {
    let json = serde_json::to_string(&outline()).unwrap();
    assert!(json.contains("\"estimatedWords\":300"));
    assert!(json.contains("\"totalWords\":1000"));

    let back: Outline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outline());
}

#[test]
fn section_selected_defaults_true_on_the_wire() {
    let json = r#"{"id": "x", "title": "T", "points": [], "estimatedWords": 100}"#;
    let s: OutlineSection = serde_json::from_str(json).unwrap();
    assert!(s.selected);
}
