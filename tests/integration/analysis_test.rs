//! Integration tests for the dead UI analysis pipeline
//!
//! These tests build the navigation graph from the fixture project and check
//! entry selection, reachability and graph artifacts end to end.

use deadui::analysis::{analyze, EntryPointDetector, NodeStatus, ReachabilityAnalyzer};
use deadui::config::{Config, EntryConfig, EntryFallback, NamingConfig};
use deadui::discovery::{AssetFile, FileFinder};
use deadui::graph::{
    load_graph, save_graph, BatchSummary, GraphBuilder, NavigationGraph, NodeKind,
    ParallelGraphBuilder,
};
use deadui::parser::UiKind;
use deadui::report::CsvReporter;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Get the path to the fixture project
fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/unity_project")
}

fn fixture_files(config: &Config) -> Vec<AssetFile> {
    FileFinder::new(config).find_files(&project_path()).unwrap()
}

fn build(config: &Config) -> (NavigationGraph, BatchSummary) {
    let mut builder = GraphBuilder::from_config(config);
    for file in fixture_files(config) {
        builder.process_file(&file);
    }
    builder.build()
}

fn set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

const PLAY: &str = "Assets/Scenes/MainMenu.unity::PlayButton";
const SETTINGS: &str = "Assets/Scenes/MainMenu.unity::SettingsButton";
const BUY: &str = "Assets/Prefabs/UI/ShopPanel.prefab::BuyButton";
const MUSIC: &str = "Assets/Prefabs/UI/ShopPanel.prefab::MusicToggle";
const SLIDER: &str = "Assets/Prefabs/UI/ShopPanel.prefab::UnknownButton(999)";
const QUALITY: &str = "Assets/Prefabs/UI/Broken.prefab::QualityDropdown";

#[test]
fn test_fixture_graph_shape() {
    let (graph, summary) = build(&Config::default());

    assert_eq!(graph.node_count(), 12);
    assert_eq!(graph.edge_count(), 6);
    assert!(graph.has_edge(PLAY, "OnPlay"));
    assert!(graph.has_edge(PLAY, "OnQuit"));
    assert!(graph.has_edge(SETTINGS, "OpenSettings"));
    assert!(graph.has_edge(MUSIC, "SetMusic"));
    assert!(graph.contains(SLIDER));
    assert_eq!(graph.successors(SLIDER).len(), 0);
    assert_eq!(graph.kind(QUALITY), Some(NodeKind::Element(UiKind::Dropdown)));

    assert_eq!(summary.assets_scanned, 3);
    assert_eq!(summary.assets_skipped, 0);
    assert_eq!(summary.chunks_skipped, 1);
    assert_eq!(summary.game_objects, 5);
    assert_eq!(summary.components, 6);
    assert_eq!(summary.unresolved_owners, 1);
}

#[test]
fn test_default_keywords_select_main_menu() {
    let (graph, _) = build(&Config::default());
    let sets = analyze(&graph, &EntryPointDetector::from_config(&Config::default()));

    assert_eq!(
        sets.reachable,
        set(&[PLAY, SETTINGS, "OnPlay", "OnQuit", "OpenSettings"])
    );
    assert_eq!(
        sets.dead,
        set(&[BUY, MUSIC, SLIDER, QUALITY, "Purchase", "SetMusic", "SetQuality"])
    );
}

#[test]
fn test_unmatched_keyword_falls_back_to_roots() {
    let (graph, _) = build(&Config::default());
    let detector = EntryPointDetector::new(deadui::analysis::EntrySelection::Keywords(EntryConfig {
        keywords: vec!["Nowhere".to_string()],
        case_sensitive: false,
        fallback: EntryFallback::ZeroInDegree,
    }));

    let entries = detector.detect(&graph);
    // Every element is a root; no method target is
    assert_eq!(entries, set(&[PLAY, SETTINGS, BUY, MUSIC, SLIDER, QUALITY]));

    let sets = ReachabilityAnalyzer::new().analyze(&graph, &entries);
    assert!(sets.dead.is_empty());
}

#[test]
fn test_explicit_entries() {
    let (graph, _) = build(&Config::default());
    let sets = analyze(&graph, &EntryPointDetector::explicit([BUY, "Gone::Renamed"]));

    assert_eq!(sets.reachable, set(&[BUY, "Purchase"]));
    assert_eq!(sets.status(PLAY), Some(NodeStatus::Dead));
    assert_eq!(sets.total(), graph.node_count());
}

#[test]
fn test_parallel_build_matches_sequential() {
    let config = Config::default();
    let (sequential, sequential_summary) = build(&config);
    let (parallel, parallel_summary) =
        ParallelGraphBuilder::from_config(&config).build_from_files(&fixture_files(&config));

    assert_eq!(
        sequential.nodes().collect::<BTreeSet<_>>(),
        parallel.nodes().collect::<BTreeSet<_>>()
    );
    assert_eq!(
        sequential.edges().collect::<BTreeSet<_>>(),
        parallel.edges().collect::<BTreeSet<_>>()
    );
    assert_eq!(sequential_summary, parallel_summary);
}

#[test]
fn test_unreadable_asset_does_not_abort_batch() {
    let config = Config::default();
    let mut files = fixture_files(&config);
    files.push(
        AssetFile::from_path(project_path().join("Assets/Scenes/Vanished.unity")).unwrap(),
    );

    let mut builder = GraphBuilder::from_config(&config);
    for file in &files {
        builder.process_file(file);
    }
    let (graph, summary) = builder.build();

    assert_eq!(summary.assets_skipped, 1);
    assert_eq!(summary.assets_scanned, 4);

    let sets = analyze(&graph, &EntryPointDetector::default());
    let csv = CsvReporter::render(&sets);
    assert!(csv.contains(&format!("{},reachable", PLAY)));
    assert!(csv.contains(&format!("{},dead", BUY)));
    assert_eq!(csv.lines().count(), 1 + graph.node_count());
}

#[test]
fn test_unqualified_names() {
    let config = Config {
        naming: NamingConfig {
            qualify_with_asset: false,
        },
        ..Config::default()
    };
    let (graph, _) = build(&config);

    assert!(graph.contains("PlayButton"));
    assert!(graph.contains("UnknownButton(999)"));

    // Without the asset label no key mentions MainMenu, so roots are used
    let sets = analyze(&graph, &EntryPointDetector::from_config(&config));
    assert!(sets.dead.is_empty());
}

#[test]
fn test_cached_graph_gives_same_result() {
    let (graph, _) = build(&Config::default());
    let detector = EntryPointDetector::from_config(&Config::default());
    let expected = analyze(&graph, &detector);

    let dir = tempfile::tempdir().unwrap();
    for name in ["graph.json", "graph.gexf"] {
        let path = dir.path().join(name);
        save_graph(&graph, &path).unwrap();

        let cached = load_graph(&path).unwrap();
        assert_eq!(cached.kind(PLAY), Some(NodeKind::Element(UiKind::Button)));
        assert_eq!(cached.kind("OnPlay"), Some(NodeKind::Method));
        assert_eq!(analyze(&cached, &detector), expected);
    }
}

#[test]
fn test_empty_project() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
    assert!(files.is_empty());

    let (graph, summary) = GraphBuilder::from_config(&config).build();
    assert_eq!(summary, BatchSummary::default());

    let sets = analyze(&graph, &EntryPointDetector::default());
    assert!(sets.reachable.is_empty());
    assert!(sets.dead.is_empty());
}
