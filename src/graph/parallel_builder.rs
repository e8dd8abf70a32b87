// Parallel graph builder using rayon

use super::{BatchSummary, GraphBuilder, NavigationGraph};
use crate::config::Config;
use crate::discovery::AssetFile;
use crate::error::AnalysisResult;
use crate::parser::AssetRecords;
use rayon::prelude::*;
use tracing::info;

/// Extracts assets in parallel, then folds them in path order
///
/// Extraction of one asset never touches another's state, so only the fold
/// needs to be sequential. Sorting by path before folding keeps node/edge
/// insertion order and collision handling identical to a sequential run.
pub struct ParallelGraphBuilder {
    builder: GraphBuilder,
}

impl ParallelGraphBuilder {
    pub fn new() -> Self {
        Self {
            builder: GraphBuilder::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            builder: GraphBuilder::from_config(config),
        }
    }

    /// Build graph from assets using parallel extraction
    pub fn build_from_files(self, files: &[AssetFile]) -> (NavigationGraph, BatchSummary) {
        info!("Extracting {} assets in parallel...", files.len());

        let extractor = self.builder.extractor().clone();
        let mut results: Vec<(&AssetFile, AnalysisResult<AssetRecords>)> = files
            .par_iter()
            .map(|asset| (asset, extractor.extract_asset(asset)))
            .collect();

        results.sort_by(|(a, _), (b, _)| a.path.cmp(&b.path));

        let mut builder = self.builder;
        for (asset, result) in results {
            builder.fold_asset(asset, result);
        }

        builder.build()
    }
}

impl Default for ParallelGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
