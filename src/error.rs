//! Error taxonomy for the extraction and analysis pipeline
//!
//! Per-asset and per-chunk failures are recoverable: callers log them and fold
//! them into a [`BatchSummary`](crate::graph::BatchSummary). Missing input and
//! missing or unreadable graph artifacts are fatal to a run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while extracting assets or loading graph artifacts
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An asset could not be opened or read
    #[error("Failed to read asset {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single serialized record failed structured decoding
    #[error("Failed to decode chunk #{index} in {}: {message}", path.display())]
    ChunkDecode {
        path: PathBuf,
        index: usize,
        message: String,
    },

    /// A requested pre-built graph file does not exist
    #[error("Graph artifact not found: {}", .0.display())]
    MissingGraphArtifact(PathBuf),

    /// A graph file exists but could not be read
    #[error("Failed to read graph artifact {}: {source}", path.display())]
    GraphArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A graph file was read but is not a valid node-link or GEXF document
    #[error("Invalid graph artifact {}: {message}", path.display())]
    GraphArtifactInvalid { path: PathBuf, message: String },

    /// Neither a project root nor a cached graph was supplied
    #[error("Nothing to analyze: provide a project directory or a cached graph (--graph)")]
    NoInput,
}

impl AnalysisError {
    /// Whether this error is recovered locally during a batch
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::SourceUnreadable { .. } | AnalysisError::ChunkDecode { .. }
        )
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
