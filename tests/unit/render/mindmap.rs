use super::*;
use crate::model::mindmap::MindmapNode;

fn node(name: &str, children: Vec<MindmapNode>) -> MindmapNode {
    MindmapNode {
        name: name.to_string(),
        children,
    }
}

fn sample_root() -> MindmapNode {
    node(
        "Chủ đề",
        vec![
            node(
                "Giải pháp 1",
                vec![MindmapNode::leaf("Bước 1"), MindmapNode::leaf("Bước 2")],
            ),
            MindmapNode::leaf("Giải pháp 2"),
        ],
    )
}

fn count_nodes(n: &MindmapNode) -> usize {
    1 + n.children.iter().map(count_nodes).sum::<usize>()
}

#[test]
fn root_is_pinned_to_the_left_middle() {
    let placed = layout_nodes(&sample_root(), 700.0);
    assert_eq!(placed[0].pos, kurbo::Point::new(100.0, 350.0));
    assert_eq!(placed[0].depth, 0);
    assert!(placed[0].parent.is_none());
}

#[test]
fn every_tree_node_gets_placed_exactly_once() {
    let root = sample_root();
    let placed = layout_nodes(&root, 700.0);
    assert_eq!(placed.len(), count_nodes(&root));
}

#[test]
fn depth_steps_right_by_a_fixed_column() {
    let placed = layout_nodes(&sample_root(), 700.0);
    for p in &placed {
        assert_eq!(p.pos.x, 100.0 + 250.0 * p.depth as f64);
    }
}

#[test]
fn siblings_never_share_a_vertical_band() {
    let placed = layout_nodes(&sample_root(), 700.0);
    // Children of the root: 2 leaves under the first, 1 under the second,
    // so bands are [0, 2) and [2, 3) leaf slots.
    let children: Vec<&PlacedNode> = placed.iter().filter(|p| p.depth == 1).collect();
    assert_eq!(children.len(), 2);
    assert!(children[0].pos.y < children[1].pos.y);

    let per_leaf = 700.0 / 3.0;
    assert!((children[0].pos.y - per_leaf).abs() < 1e-9);
    assert!((children[1].pos.y - per_leaf * 2.5).abs() < 1e-9);
}

#[test]
fn branch_index_is_inherited_from_the_root_child() {
    let placed = layout_nodes(&sample_root(), 700.0);
    for p in placed.iter().filter(|p| p.depth >= 1) {
        let mut cur = p;
        while let Some(parent) = cur.parent {
            let parent = &placed[parent];
            if parent.depth == 0 {
                break;
            }
            assert_eq!(cur.branch, parent.branch);
            cur = parent;
        }
    }
    let grandchildren: Vec<&PlacedNode> = placed.iter().filter(|p| p.depth == 2).collect();
    assert!(grandchildren.iter().all(|p| p.branch == 0));
}

#[test]
fn parent_links_point_upward() {
    let placed = layout_nodes(&sample_root(), 700.0);
    for p in placed.iter().filter(|p| p.parent.is_some()) {
        let parent = &placed[p.parent.unwrap()];
        assert_eq!(parent.depth + 1, p.depth);
        assert!(parent.pos.x < p.pos.x);
    }
}

#[test]
fn renders_to_a_png_block() {
    let spec = MindmapSpec {
        root: "Chủ đề".to_string(),
        children: vec![MindmapNode::leaf("Ý 1"), MindmapNode::leaf("Ý 2")],
    };
    let img = render_mindmap(&spec, MindmapTheme::Colorful).unwrap();
    assert_eq!((img.width, img.height), (900, 700));
    assert_eq!((img.width_hint, img.height_hint), (600, 400));
    assert_eq!(&img.png[..4], &[0x89, b'P', b'N', b'G']);
    assert_eq!(img.caption, "Sơ đồ tư duy: Chủ đề");
}

#[test]
fn renders_every_theme_on_a_deep_tree() {
    let spec = MindmapSpec {
        root: "Gốc".to_string(),
        children: sample_root().children,
    };
    for theme in [
        MindmapTheme::Colorful,
        MindmapTheme::Professional,
        MindmapTheme::Organic,
    ] {
        assert!(render_mindmap(&spec, theme).is_ok(), "theme {theme:?}");
    }
}

#[test]
fn childless_spec_still_renders() {
    let spec = MindmapSpec {
        root: "Một mình".to_string(),
        children: vec![],
    };
    assert!(render_mindmap(&spec, MindmapTheme::Professional).is_ok());
}
