use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a dead UI analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sub-directories of the project root to scan (empty = whole root)
    pub targets: Vec<PathBuf>,

    /// Path patterns to exclude from discovery
    pub exclude: Vec<String>,

    /// Entry node selection
    pub entry: EntryConfig,

    /// How graph node keys are composed
    pub naming: NamingConfig,

    /// Object extraction switches
    pub extraction: ExtractionConfig,

    /// Report configuration
    pub report: ReportConfig,
}

/// Keyword-driven entry node selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Substrings that mark a node as an always-accessible UI root
    pub keywords: Vec<String>,

    /// Match keywords case-sensitively
    pub case_sensitive: bool,

    /// What to do when no keyword matches any node
    pub fallback: EntryFallback,
}

/// Policy applied when keyword matching selects nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFallback {
    /// Use every node without incoming edges
    #[default]
    ZeroInDegree,
    /// Leave the entry set empty
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Prefix node keys with the asset label (`Scenes/Menu.unity::PlayButton`)
    pub qualify_with_asset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Classify `MonoBehaviour` chunks by their event fields (`m_OnClick`,
    /// `m_Delegates`) when no component-kind marker is present
    pub infer_from_event_fields: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, csv, json
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: vec![],
            exclude: vec![
                "**/Library/**".to_string(),
                "**/Temp/**".to_string(),
                "**/Logs/**".to_string(),
                "**/obj/**".to_string(),
            ],
            entry: EntryConfig::default(),
            naming: NamingConfig::default(),
            extraction: ExtractionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "MainMenu".to_string(),
                "Canvas".to_string(),
                "Persistent".to_string(),
                "Home".to_string(),
            ],
            case_sensitive: false,
            fallback: EntryFallback::ZeroInDegree,
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            qualify_with_asset: true,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            infer_from_event_fields: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".deadui.yml",
            ".deadui.yaml",
            ".deadui.toml",
            "deadui.yml",
            "deadui.yaml",
            "deadui.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a path matches any exclusion pattern
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Minimal glob matching for patterns like `**/Library/**`, `*Test.prefab` or `Assets/Old*`
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        // Whole directory component anywhere in the path: `/Library/` but not `/LibraryOld/`
        let dir_name = pattern.trim_start_matches("**/").trim_end_matches("/**");
        let dir_pattern = format!("/{}/", dir_name);
        return text.contains(&dir_pattern) || text.starts_with(&dir_pattern[1..]);
    }

    if let Some(suffix) = pattern.strip_prefix("**/") {
        return text.ends_with(&format!("/{}", suffix)) || text == suffix;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('*') {
            return text.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        if !prefix.contains('*') {
            return text.starts_with(prefix) || text.contains(&format!("/{}", prefix));
        }
    }

    text == pattern
}
