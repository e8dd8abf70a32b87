use super::emit;
use crate::analysis::{NodeStatus, ReachabilitySets};
use crate::graph::BatchSummary;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, sets: &ReachabilitySets, summary: Option<&BatchSummary>) -> Result<()> {
        let report = JsonReport::from_sets(sets, summary);
        let mut json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        json.push('\n');
        emit(self.output_path.as_deref(), &json)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_nodes: usize,
    reachable_count: usize,
    dead_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<&'a BatchSummary>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    element: &'a str,
    status: NodeStatus,
}

impl<'a> JsonReport<'a> {
    fn from_sets(sets: &'a ReachabilitySets, summary: Option<&'a BatchSummary>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_nodes: sets.total(),
            reachable_count: sets.reachable.len(),
            dead_count: sets.dead.len(),
            batch: summary,
            rows: sets
                .rows()
                .map(|(element, status)| JsonRow { element, status })
                .collect(),
        }
    }
}
