use crate::graph::NavigationGraph;
use petgraph::visit::Dfs;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Status of a node in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Reachable,
    Dead,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Reachable => "reachable",
            NodeStatus::Dead => "dead",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partition of all graph nodes into reachable and dead
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReachabilitySets {
    pub reachable: BTreeSet<String>,
    pub dead: BTreeSet<String>,
}

impl ReachabilitySets {
    pub fn status(&self, key: &str) -> Option<NodeStatus> {
        if self.reachable.contains(key) {
            Some(NodeStatus::Reachable)
        } else if self.dead.contains(key) {
            Some(NodeStatus::Dead)
        } else {
            None
        }
    }

    /// Report rows: reachable keys sorted, then dead keys sorted
    pub fn rows(&self) -> impl Iterator<Item = (&str, NodeStatus)> {
        self.reachable
            .iter()
            .map(|k| (k.as_str(), NodeStatus::Reachable))
            .chain(self.dead.iter().map(|k| (k.as_str(), NodeStatus::Dead)))
    }

    pub fn total(&self) -> usize {
        self.reachable.len() + self.dead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Forward reachability over the navigation graph
///
/// Stateless: the result depends only on the graph and the entry set.
pub struct ReachabilityAnalyzer;

impl ReachabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Partition the graph's nodes into reachable and dead
    ///
    /// A single DFS visit map is shared across all entries, so nodes reached
    /// from one entry are not walked again from the next. Entry keys that are
    /// not graph nodes contribute nothing.
    pub fn analyze(&self, graph: &NavigationGraph, entries: &BTreeSet<String>) -> ReachabilitySets {
        if graph.is_empty() {
            warn!("Reachability requested on an empty graph");
            return ReachabilitySets::default();
        }

        let inner = graph.inner();
        let mut dfs = Dfs::empty(inner);
        let mut reachable = BTreeSet::new();

        for entry in entries {
            let Some(start) = graph.node_index(entry) else {
                debug!("Ignoring unknown entry '{}'", entry);
                continue;
            };

            dfs.move_to(start);
            while let Some(idx) = dfs.next(inner) {
                reachable.insert(inner[idx].key.clone());
            }
        }

        let dead: BTreeSet<String> = graph
            .nodes()
            .filter(|key| !reachable.contains(*key))
            .map(str::to_string)
            .collect();

        debug!("{} reachable, {} dead", reachable.len(), dead.len());

        ReachabilitySets { reachable, dead }
    }
}

impl Default for ReachabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        for node in nodes {
            graph.add_node(node, None);
        }
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    fn entries(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn set(keys: &[&str]) -> BTreeSet<String> {
        entries(keys)
    }

    #[test]
    fn test_simple_chain() {
        let g = graph(&["A", "B", "C"], &[("A", "B")]);
        let sets = ReachabilityAnalyzer::new().analyze(&g, &entries(&["A"]));

        assert_eq!(sets.reachable, set(&["A", "B"]));
        assert_eq!(sets.dead, set(&["C"]));
    }

    #[test]
    fn test_partition_covers_all_nodes() {
        let g = graph(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("C", "D"), ("D", "C"), ("E", "E")],
        );
        let sets = ReachabilityAnalyzer::new().analyze(&g, &entries(&["A", "D"]));

        let all: BTreeSet<String> = g.nodes().map(str::to_string).collect();
        let union: BTreeSet<String> = sets.reachable.union(&sets.dead).cloned().collect();
        assert_eq!(union, all);
        assert!(sets.reachable.is_disjoint(&sets.dead));
        assert_eq!(sets.total(), g.node_count());
    }

    #[test]
    fn test_isolated_entry_is_reachable() {
        let g = graph(&["Lonely", "Other"], &[]);
        let sets = ReachabilityAnalyzer::new().analyze(&g, &entries(&["Lonely"]));
        assert!(sets.reachable.contains("Lonely"));
        assert_eq!(sets.status("Other"), Some(NodeStatus::Dead));
    }

    #[test]
    fn test_cycles_terminate() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let sets = ReachabilityAnalyzer::new().analyze(&g, &entries(&["B"]));
        assert_eq!(sets.reachable, set(&["A", "B", "C"]));
        assert!(sets.dead.is_empty());
    }

    #[test]
    fn test_unknown_entry_is_noop() {
        let g = graph(&["A", "B"], &[("A", "B")]);
        let analyzer = ReachabilityAnalyzer::new();
        let with_stale = analyzer.analyze(&g, &entries(&["A", "Renamed"]));
        let without = analyzer.analyze(&g, &entries(&["A"]));
        assert_eq!(with_stale, without);
    }

    #[test]
    fn test_idempotent() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let analyzer = ReachabilityAnalyzer::new();
        let e = entries(&["B"]);
        assert_eq!(analyzer.analyze(&g, &e), analyzer.analyze(&g, &e));
    }

    #[test]
    fn test_edge_from_dead_to_reachable_moves_nothing_back() {
        let mut g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        let analyzer = ReachabilityAnalyzer::new();
        let e = entries(&["A"]);
        let before = analyzer.analyze(&g, &e);

        g.add_edge("C", "B");
        let after = analyzer.analyze(&g, &e);

        assert!(before.reachable.is_subset(&after.reachable));
        assert!(after.dead.is_subset(&before.dead));
    }

    #[test]
    fn test_empty_graph_gives_empty_sets() {
        let sets = ReachabilityAnalyzer::new().analyze(&NavigationGraph::new(), &entries(&["A"]));
        assert!(sets.reachable.is_empty());
        assert!(sets.dead.is_empty());
    }

    #[test]
    fn test_rows_order() {
        let g = graph(&["b", "a", "d", "c"], &[("b", "a")]);
        let sets = ReachabilityAnalyzer::new().analyze(&g, &entries(&["b"]));
        let rows: Vec<_> = sets.rows().collect();
        assert_eq!(
            rows,
            vec![
                ("a", NodeStatus::Reachable),
                ("b", NodeStatus::Reachable),
                ("c", NodeStatus::Dead),
                ("d", NodeStatus::Dead),
            ]
        );
    }
}
