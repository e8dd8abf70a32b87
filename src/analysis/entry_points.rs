use crate::config::{Config, EntryConfig, EntryFallback};
use crate::graph::NavigationGraph;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// How entry nodes are chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySelection {
    /// Keyword substring match with a fallback policy
    Keywords(EntryConfig),
    /// Exact node keys supplied by the caller
    Explicit(Vec<String>),
}

/// Selects the reachability sources of a fully assembled graph
#[derive(Debug, Clone)]
pub struct EntryPointDetector {
    selection: EntrySelection,
}

impl EntryPointDetector {
    pub fn new(selection: EntrySelection) -> Self {
        Self { selection }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(EntrySelection::Keywords(config.entry.clone()))
    }

    pub fn explicit<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EntrySelection::Explicit(
            keys.into_iter().map(Into::into).collect(),
        ))
    }

    /// Detect entry nodes
    ///
    /// Explicit keys are returned as given, including keys absent from the
    /// graph; traversal treats those as no-ops.
    pub fn detect(&self, graph: &NavigationGraph) -> BTreeSet<String> {
        let entries = match &self.selection {
            EntrySelection::Explicit(keys) => {
                for key in keys.iter().filter(|k| !graph.contains(k)) {
                    debug!("Entry '{}' is not a graph node", key);
                }
                keys.iter().cloned().collect()
            }
            EntrySelection::Keywords(config) => self.detect_by_keywords(graph, config),
        };

        info!("Selected {} entry nodes", entries.len());
        entries
    }

    fn detect_by_keywords(&self, graph: &NavigationGraph, config: &EntryConfig) -> BTreeSet<String> {
        let matches: BTreeSet<String> = graph
            .nodes()
            .filter(|key| self.matches_keyword(key, config))
            .map(str::to_string)
            .collect();

        if !matches.is_empty() {
            for key in &matches {
                debug!("Keyword entry: {}", key);
            }
            return matches;
        }

        match config.fallback {
            EntryFallback::ZeroInDegree => {
                let roots: BTreeSet<String> = graph
                    .zero_in_degree_nodes()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                debug!(
                    "No keyword matched; falling back to {} zero in-degree nodes",
                    roots.len()
                );
                roots
            }
            EntryFallback::None => {
                debug!("No keyword matched and fallback is disabled");
                BTreeSet::new()
            }
        }
    }

    fn matches_keyword(&self, key: &str, config: &EntryConfig) -> bool {
        if config.case_sensitive {
            config.keywords.iter().any(|kw| key.contains(kw.as_str()))
        } else {
            let key = key.to_lowercase();
            config
                .keywords
                .iter()
                .any(|kw| key.contains(&kw.to_lowercase()))
        }
    }
}

impl Default for EntryPointDetector {
    fn default() -> Self {
        Self::new(EntrySelection::Keywords(EntryConfig::default()))
    }
}
