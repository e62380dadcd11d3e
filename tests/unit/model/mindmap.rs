use super::*;

#[test]
fn leaf_count_is_one_for_a_leaf() {
    assert_eq!(MindmapNode::leaf("x").leaf_count(), 1);
}

#[test]
fn leaf_count_sums_over_children() {
    let node = MindmapNode {
        name: "root".to_string(),
        children: vec![
            MindmapNode {
                name: "a".to_string(),
                children: vec![MindmapNode::leaf("a1"), MindmapNode::leaf("a2")],
            },
            MindmapNode::leaf("b"),
        ],
    };
    // a contributes 2 leaves, b contributes 1.
    assert_eq!(node.leaf_count(), 3);
}

#[test]
fn virtual_root_folds_spec_into_one_tree() {
    let spec = MindmapSpec {
        root: "Chủ đề".to_string(),
        children: vec![MindmapNode::leaf("Ý 1"), MindmapNode::leaf("Ý 2")],
    };
    let root = spec.virtual_root();
    assert_eq!(root.name, "Chủ đề");
    assert_eq!(root.children.len(), 2);
}

#[test]
fn parses_the_wire_format() {
    let json = r#"{
        "root": "Chủ đề",
        "children": [ { "name": "Ý 1" }, { "name": "Ý 2", "children": [{ "name": "Ý 2.1" }] } ]
    }"#;
    let spec: MindmapSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec.children[1].children[0].name, "Ý 2.1");
    assert!(spec.children[0].children.is_empty());
}

#[test]
fn children_default_to_empty() {
    let spec: MindmapSpec = serde_json::from_str(r#"{"root": "X"}"#).unwrap();
    assert!(spec.children.is_empty());
    assert_eq!(spec.virtual_root().leaf_count(), 1);
}
