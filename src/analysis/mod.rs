//! Entry selection and reachability over the navigation graph

mod entry_points;
mod reachability;

pub use entry_points::{EntryPointDetector, EntrySelection};
pub use reachability::{NodeStatus, ReachabilityAnalyzer, ReachabilitySets};

use crate::graph::NavigationGraph;

/// Detect entries and partition the graph in one call
pub fn analyze(graph: &NavigationGraph, detector: &EntryPointDetector) -> ReachabilitySets {
    let entries = detector.detect(graph);
    ReachabilityAnalyzer::new().analyze(graph, &entries)
}
