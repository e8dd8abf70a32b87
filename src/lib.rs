//! deadui - Dead UI detection for Unity scenes and prefabs
//!
//! This library finds UI elements that can never be reached from the
//! always-visible roots of a Unity project's interface.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Asset Discovery** - Find all `.unity` scenes and `.prefab` prefabs
//! 2. **Object Extraction** - Split each asset into records and project out
//!    GameObjects and UI components (Button, Toggle, Dropdown, Slider, EventTrigger)
//! 3. **Identifier Resolution** - Map each component's owner to a display name,
//!    per asset
//! 4. **Graph Building** - Fold every asset into one directed "invokes" graph
//! 5. **Entry Selection** - Pick keyword-matched or zero in-degree roots
//! 6. **Reachability Analysis** - Partition nodes into reachable and dead
//! 7. **Reporting** - Output results as a table, JSON or colored summary

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod parser;
pub mod platform;
pub mod report;
pub mod resolve;

pub use analysis::{EntryPointDetector, EntrySelection, NodeStatus, ReachabilityAnalyzer, ReachabilitySets};
pub use config::{Config, EntryConfig, EntryFallback};
pub use discovery::{AssetFile, AssetKind, FileFinder};
pub use error::{AnalysisError, AnalysisResult};
pub use graph::{
    load_graph, save_graph, ArtifactFormat, BatchSummary, GraphBuilder, NavigationGraph, NodeKind,
    ParallelGraphBuilder,
};
pub use parser::{ObjectExtractor, UiKind};
pub use platform::{AndroidProbe, PlatformProbe};
pub use report::{ReportFormat, Reporter};
pub use resolve::IdentifierResolver;
