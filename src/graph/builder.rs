use super::NavigationGraph;
use crate::config::{Config, NamingConfig};
use crate::discovery::AssetFile;
use crate::error::AnalysisResult;
use crate::parser::{AssetRecords, ObjectExtractor};
use crate::resolve::{IdentifierResolver, ResolvedElement};
use serde::Serialize;
use tracing::{debug, warn};

/// Counts aggregated over a batch; per-asset and per-chunk failures land here
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub assets_scanned: usize,
    /// Assets that could not be read
    pub assets_skipped: usize,
    /// Records dropped after a failed structured decode
    pub chunks_skipped: usize,
    pub game_objects: usize,
    pub components: usize,
    /// Components whose owner fell back to a placeholder name
    pub unresolved_owners: usize,
    pub identifier_collisions: usize,
}

/// Builder folding assets into one navigation graph
///
/// Assets are folded in the order they are processed; feed them sorted by
/// path to keep collision logging reproducible.
pub struct GraphBuilder {
    graph: NavigationGraph,
    extractor: ObjectExtractor,
    naming: NamingConfig,
    summary: BatchSummary,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: NavigationGraph::new(),
            extractor: ObjectExtractor::new(),
            naming: NamingConfig::default(),
            summary: BatchSummary::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_extractor(ObjectExtractor::from_config(&config.extraction))
            .with_naming(config.naming.clone())
    }

    pub fn with_extractor(mut self, extractor: ObjectExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    pub fn extractor(&self) -> &ObjectExtractor {
        &self.extractor
    }

    /// Read, extract, resolve and fold one asset; read failures are counted
    pub fn process_file(&mut self, asset: &AssetFile) {
        let result = self.extractor.extract_asset(asset);
        self.fold_asset(asset, result);
    }

    /// Fold the outcome of extracting one asset
    pub fn fold_asset(&mut self, asset: &AssetFile, result: AnalysisResult<AssetRecords>) {
        self.summary.assets_scanned += 1;
        match result {
            Ok(records) => self.add_asset_records(asset, &records),
            Err(e) => {
                warn!("Skipping asset: {}", e);
                self.summary.assets_skipped += 1;
            }
        }
    }

    /// Resolve one asset's records and add the resulting elements
    pub fn add_asset_records(&mut self, asset: &AssetFile, records: &AssetRecords) {
        self.summary.chunks_skipped += records.chunks_skipped;
        self.summary.game_objects += records.game_objects.len();
        self.summary.components += records.components.len();

        let resolved = IdentifierResolver::for_asset(asset).resolve_all(records);
        self.summary.unresolved_owners += resolved.unresolved;
        self.summary.identifier_collisions += resolved.collisions;

        self.add_elements(&resolved.elements);
    }

    /// Add each element's node, then an edge to each of its targets
    pub fn add_elements(&mut self, elements: &[ResolvedElement]) {
        for element in elements {
            let key = element.node_key(&self.naming);
            self.graph.add_element(&key, element.kind);

            for target in &element.targets {
                self.graph.add_method(target);
                self.graph.add_edge(&key, target);
            }

            debug!("{} '{}' -> {:?}", element.kind, key, element.targets);
        }
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Finish the batch
    pub fn build(self) -> (NavigationGraph, BatchSummary) {
        if self.graph.is_empty() {
            warn!("No asset contributed a UI component; the graph is empty");
        }
        (self.graph, self.summary)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
