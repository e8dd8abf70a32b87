use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use ignore::WalkBuilder;
use miette::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Kind of serialized asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    /// Standalone interactive scene (`.unity`)
    Scene,
    /// Reusable prefab fragment (`.prefab`)
    Prefab,
}

impl AssetKind {
    /// Determine asset kind from path
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "unity" => Some(AssetKind::Scene),
            "prefab" => Some(AssetKind::Prefab),
            _ => None,
        }
    }
}

/// A discovered scene or prefab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Path to the file
    pub path: PathBuf,

    /// Display label used to qualify node keys (path relative to the scan root)
    pub label: String,

    pub kind: AssetKind,
}

impl AssetFile {
    pub fn new(path: PathBuf, label: String, kind: AssetKind) -> Self {
        Self { path, label, kind }
    }

    /// Build an asset whose label is its path relative to `root`
    pub fn under_root(path: PathBuf, root: &Path, kind: AssetKind) -> Self {
        let label = path
            .strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .or_else(|| path.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self::new(path, label, kind)
    }

    /// Build an asset labelled by its file name alone
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let kind = AssetKind::from_path(&path)?;
        let label = path.file_name()?.to_string_lossy().to_string();
        Some(Self::new(path, label, kind))
    }

    /// Read the raw asset text
    ///
    /// Assets occasionally carry stray non-UTF-8 bytes in string fields; those
    /// are replaced rather than failing the whole asset.
    pub fn read_contents(&self) -> AnalysisResult<String> {
        std::fs::read(&self.path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|source| AnalysisError::SourceUnreadable {
                path: self.path.clone(),
                source,
            })
    }
}

/// File finder for discovering scenes and prefabs in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all assets under the given root, sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<AssetFile>> {
        debug!("Scanning for assets in: {}", root.display());

        let targets = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut files: Vec<AssetFile> = targets
            .par_iter()
            .flat_map(|target| self.scan_directory(target, root))
            .collect();

        // Deterministic processing order regardless of walk order
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|a, b| a.path == b.path);

        debug!("Found {} assets", files.len());
        Ok(files)
    }

    fn scan_directory(&self, dir: &Path, root: &Path) -> Vec<AssetFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                // Patterns apply to the project-relative path, not wherever the project lives
                let relative = path.strip_prefix(root).unwrap_or(path);
                if self.config.should_exclude(relative) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let kind = AssetKind::from_path(path)?;

                trace!("Found {:?}: {}", kind, path.display());
                Some(AssetFile::under_root(path.to_path_buf(), root, kind))
            })
            .collect()
    }
}

/// Counts of discovered assets by kind
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub scenes: usize,
    pub prefabs: usize,
}

impl AssetStats {
    pub fn from_files(files: &[AssetFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            match file.kind {
                AssetKind::Scene => stats.scenes += 1,
                AssetKind::Prefab => stats.prefabs += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.scenes + self.prefabs
    }
}
