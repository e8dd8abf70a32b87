mod artifact;
mod builder;
mod parallel_builder;

pub use artifact::{load_graph, save_graph, ArtifactFormat};
pub use builder::{BatchSummary, GraphBuilder};
pub use parallel_builder::ParallelGraphBuilder;

use crate::parser::UiKind;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// What a graph node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A named UI element
    Element(UiKind),
    /// A bare method target
    Method,
}

impl NodeKind {
    /// Value of the exported `type` attribute
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Element(kind) => kind.display_name(),
            NodeKind::Method => "Method",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("Method") {
            return Some(NodeKind::Method);
        }
        UiKind::from_name(name).map(NodeKind::Element)
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element(_))
    }
}

/// Node weight: the node key plus its optional type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub key: String,
    pub kind: Option<NodeKind>,
}

/// Directed "invokes" graph over UI elements and method targets
///
/// Parallel edges collapse to one; self-loops are kept.
#[derive(Debug, Clone, Default)]
pub struct NavigationGraph {
    inner: DiGraph<GraphNode, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or refine the kind of an existing one
    ///
    /// An element kind wins over `Method`, and any kind wins over none.
    pub fn add_node(&mut self, key: &str, kind: Option<NodeKind>) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(key) {
            let node = &mut self.inner[idx];
            let upgrade = match (node.kind, kind) {
                (None, Some(_)) => true,
                (Some(NodeKind::Method), Some(NodeKind::Element(_))) => true,
                _ => false,
            };
            if upgrade {
                node.kind = kind;
            }
            return idx;
        }

        let idx = self.inner.add_node(GraphNode {
            key: key.to_string(),
            kind,
        });
        self.node_map.insert(key.to_string(), idx);
        idx
    }

    pub fn add_element(&mut self, key: &str, kind: UiKind) -> NodeIndex {
        self.add_node(key, Some(NodeKind::Element(kind)))
    }

    pub fn add_method(&mut self, key: &str) -> NodeIndex {
        self.add_node(key, Some(NodeKind::Method))
    }

    /// Add an edge between existing nodes; returns false if either is missing
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&from_idx), Some(&to_idx)) => {
                self.inner.update_edge(from_idx, to_idx, ());
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.node_map.contains_key(key)
    }

    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.node_map.get(key).copied()
    }

    pub fn kind(&self, key: &str) -> Option<NodeKind> {
        self.node_index(key).and_then(|idx| self.inner[idx].kind)
    }

    /// Node keys in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.inner.node_weights().map(|n| n.key.as_str())
    }

    /// All node weights in insertion order
    pub fn graph_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner.node_weights()
    }

    /// Edges as (source key, target key) in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.edge_references().map(|edge| {
            (
                self.inner[edge.source()].key.as_str(),
                self.inner[edge.target()].key.as_str(),
            )
        })
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.inner.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Direct successors of a node
    pub fn successors(&self, key: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(key) else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.inner[n].key.as_str())
            .collect()
    }

    pub fn in_degree(&self, key: &str) -> usize {
        self.node_index(key)
            .map(|idx| self.inner.edges_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    /// Nodes with no incoming edges
    pub fn zero_in_degree_nodes(&self) -> Vec<&str> {
        self.inner
            .node_indices()
            .filter(|&idx| {
                self.inner
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.inner[idx].key.as_str())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Get the underlying petgraph for traversal
    pub fn inner(&self) -> &DiGraph<GraphNode, ()> {
        &self.inner
    }
}
