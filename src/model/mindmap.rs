//! Mind-map tree as it arrives inside `json:mindmap` fenced blocks.

/// One node of the map. Each node exclusively owns its children; the whole
/// tree is a rooted, finite, acyclic structure by construction.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MindmapNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Number of leaves under (and including) this node. A leaf counts as 1;
    /// an internal node is the sum over its children. Drives proportional
    /// vertical slot allocation, which is what guarantees siblings never
    /// overlap regardless of tree shape.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            return 1;
        }
        self.children.iter().map(MindmapNode::leaf_count).sum()
    }
}

/// Wire shape: a named root plus its first-level children. `virtual_root`
/// folds it into a single tree for layout.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MindmapSpec {
    pub root: String,
    #[serde(default)]
    pub children: Vec<MindmapNode>,
}

impl MindmapSpec {
    pub fn virtual_root(&self) -> MindmapNode {
        MindmapNode {
            name: self.root.clone(),
            children: self.children.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/mindmap.rs"]
mod tests;
