//! Integration tests for asset discovery and object extraction
//!
//! These tests run the extractor and resolver against the miniature Unity
//! project under `tests/fixtures/unity_project`.

use deadui::config::Config;
use deadui::discovery::{AssetFile, AssetKind, AssetStats, FileFinder};
use deadui::parser::{GameObjectRecord, ObjectExtractor, ObjectIdentifier, UiKind};
use deadui::resolve::IdentifierResolver;
use std::path::PathBuf;

/// Get the path to the fixture project
fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/unity_project")
}

fn asset(relative: &str) -> AssetFile {
    let root = project_path();
    let path = root.join(relative);
    let kind = AssetKind::from_path(&path).expect("fixture is a scene or prefab");
    AssetFile::under_root(path, &root, kind)
}

#[test]
fn test_discovery_finds_scenes_and_prefabs() {
    let config = Config::default();
    let files = FileFinder::new(&config).find_files(&project_path()).unwrap();

    let labels: Vec<_> = files.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Assets/Prefabs/UI/Broken.prefab",
            "Assets/Prefabs/UI/ShopPanel.prefab",
            "Assets/Scenes/MainMenu.unity",
        ]
    );

    let stats = AssetStats::from_files(&files);
    assert_eq!(stats.scenes, 1);
    assert_eq!(stats.prefabs, 2);
}

#[test]
fn test_library_is_excluded_by_default() {
    let config = Config::default();
    let files = FileFinder::new(&config).find_files(&project_path()).unwrap();
    assert!(files.iter().all(|f| !f.label.starts_with("Library/")));

    let unfiltered = Config {
        exclude: vec![],
        ..Config::default()
    };
    let files = FileFinder::new(&unfiltered).find_files(&project_path()).unwrap();
    assert!(files.iter().any(|f| f.label == "Library/Cached.prefab"));
}

#[test]
fn test_target_restricts_discovery() {
    let config = Config {
        targets: vec![PathBuf::from("Assets/Scenes")],
        ..Config::default()
    };
    let files = FileFinder::new(&config).find_files(&project_path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].label, "Assets/Scenes/MainMenu.unity");
}

#[test]
fn test_scene_extraction() {
    let records = ObjectExtractor::new()
        .extract_asset(&asset("Assets/Scenes/MainMenu.unity"))
        .unwrap();

    assert_eq!(
        records.game_objects,
        vec![
            GameObjectRecord::new("100", "PlayButton"),
            GameObjectRecord::new("200", "SettingsButton"),
        ]
    );

    assert_eq!(records.components.len(), 2);
    let play = &records.components[0];
    assert_eq!(play.kind, UiKind::Button);
    assert_eq!(play.owner, Some(ObjectIdentifier::new("100")));
    assert_eq!(play.targets, vec!["OnPlay", "OnQuit"]);

    let settings = &records.components[1];
    assert_eq!(settings.owner, Some(ObjectIdentifier::new("200")));
    assert_eq!(settings.targets, vec!["OpenSettings"]);
    assert_eq!(records.chunks_skipped, 0);
}

#[test]
fn test_prefab_extraction_mixes_kinds() {
    let records = ObjectExtractor::new()
        .extract_asset(&asset("Assets/Prefabs/UI/ShopPanel.prefab"))
        .unwrap();

    let kinds: Vec<_> = records.components.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![UiKind::Button, UiKind::Toggle, UiKind::Slider]);
    assert_eq!(records.components[1].targets, vec!["SetMusic"]);
    assert!(records.components[2].targets.is_empty());
}

#[test]
fn test_malformed_chunk_is_skipped() {
    let records = ObjectExtractor::new()
        .extract_asset(&asset("Assets/Prefabs/UI/Broken.prefab"))
        .unwrap();

    assert_eq!(records.chunks_skipped, 1);
    assert_eq!(records.components.len(), 1);
    assert_eq!(records.components[0].kind, UiKind::Dropdown);
    assert_eq!(records.components[0].targets, vec!["SetQuality"]);
}

#[test]
fn test_resolution_within_asset() {
    let shop = asset("Assets/Prefabs/UI/ShopPanel.prefab");
    let records = ObjectExtractor::new().extract_asset(&shop).unwrap();
    let resolved = IdentifierResolver::for_asset(&shop).resolve_all(&records);

    let names: Vec<_> = resolved
        .elements
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["BuyButton", "MusicToggle", "UnknownButton(999)"]);
    assert_eq!(resolved.unresolved, 1);
}

#[test]
fn test_missing_asset_is_unreadable() {
    let missing = asset("Assets/Scenes/Deleted.unity");
    let err = ObjectExtractor::new().extract_asset(&missing).unwrap_err();
    assert!(err.is_recoverable());
}
