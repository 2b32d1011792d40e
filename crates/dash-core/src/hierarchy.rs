// File: crates/dash-core/src/hierarchy.rs
// Summary: Immutable arena tree for the drug-treatment hierarchy.
// Notes:
// - Nodes own their children exclusively through the arena; `NodeId` is a plain
//   index, so a focus or a parent link never controls lifetime.
// - Every leaf carries a `size` series indexed by year offset; all leaves share
//   one length.

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }
}

/// Nested record as it appears in the hierarchy file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TreeRecord {
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeRecord>,
    #[serde(default)]
    pub size: Vec<f64>,
    /// First and last year covered by the `size` series (root only).
    #[serde(default)]
    pub years: Option<[i32; 2]>,
}

impl TreeRecord {
    pub fn leaf(name: impl Into<String>, size: Vec<f64>) -> Self {
        Self { name: name.into(), size, ..Self::default() }
    }

    pub fn group(name: impl Into<String>, children: Vec<TreeRecord>) -> Self {
        Self { name: name.into(), children, ..Self::default() }
    }

    pub fn with_years(mut self, first: i32, last: i32) -> Self {
        self.years = Some([first, last]);
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum HierarchyError {
    #[error("leaf '{name}' has {len} yearly sizes, expected {expected}")]
    RaggedSizes { name: String, len: usize, expected: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub size: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    years: Option<[i32; 2]>,
    series_len: usize,
}

impl Hierarchy {
    pub fn from_record(record: TreeRecord) -> Result<Self, HierarchyError> {
        let years = record.years;
        let mut nodes = Vec::new();
        push_node(&mut nodes, record, None);

        let mut series_len = None;
        for node in nodes.iter().filter(|n| n.children.is_empty()) {
            match series_len {
                None => series_len = Some(node.size.len()),
                Some(expected) if expected != node.size.len() => {
                    return Err(HierarchyError::RaggedSizes {
                        name: node.name.clone(),
                        len: node.size.len(),
                        expected,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self { nodes, years, series_len: series_len.unwrap_or(0) })
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId).filter(|id| self.is_leaf(*id))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// `[first, last]` years of the size series, when the file declares them.
    pub fn years(&self) -> Option<[i32; 2]> {
        self.years
    }

    /// Length shared by every leaf's `size` series.
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// A leaf's magnitude for `year_index`; missing entries count as zero.
    pub fn leaf_size(&self, id: NodeId, year_index: usize) -> f64 {
        self.node(id).size.get(year_index).copied().unwrap_or(0.0)
    }

    /// Names of the root's children (the top-level categories).
    pub fn category_names(&self) -> Vec<String> {
        self.children(self.root()).iter().map(|c| self.node(*c).name.clone()).collect()
    }

    /// Find a node by name, depth-first.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Slash-joined names from the root's child down to `id`; unique per node
    /// as long as sibling names are unique.
    pub fn path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c != self.root() {
                parts.push(self.node(c).name.as_str());
            }
            cur = self.parent(c);
        }
        parts.reverse();
        parts.join("/")
    }
}

// Pre-order insertion keeps the root at index 0 and leaves in depth-first order.
fn push_node(nodes: &mut Vec<Node>, record: TreeRecord, parent: Option<NodeId>) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node { name: record.name, parent, children: Vec::new(), size: record.size });
    for child in record.children {
        let child_id = push_node(nodes, child, Some(id));
        nodes[id.0].children.push(child_id);
    }
    id
}
