use super::chunk::{parse_file_id, split_records, SerializedRecord};
use super::records::{AssetRecords, GameObjectRecord, ObjectIdentifier, UiComponentRecord, UiKind};
use super::tree::{self, Node};
use crate::config::ExtractionConfig;
use crate::discovery::AssetFile;
use crate::error::{AnalysisError, AnalysisResult};
use std::path::Path;
use tracing::{debug, warn};

/// What a serialized record represents for the navigation model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkClass {
    GameObject,
    Component(UiKind),
    Other,
}

/// Extracts GameObject and UI component records from one asset
#[derive(Debug, Clone)]
pub struct ObjectExtractor {
    infer_from_event_fields: bool,
}

impl ObjectExtractor {
    pub fn new() -> Self {
        Self {
            infer_from_event_fields: true,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_event_field_inference(config.infer_from_event_fields)
    }

    /// Classify `MonoBehaviour` records by `m_OnClick` / `m_Delegates` when no
    /// component-kind marker is present
    pub fn with_event_field_inference(mut self, enabled: bool) -> Self {
        self.infer_from_event_fields = enabled;
        self
    }

    /// Read and extract one asset
    pub fn extract_asset(&self, asset: &AssetFile) -> AnalysisResult<AssetRecords> {
        let contents = asset.read_contents()?;
        Ok(self.extract(&asset.path, &contents))
    }

    /// Extract records from raw asset text
    ///
    /// Records that fail structured decoding are logged, counted in
    /// `chunks_skipped` and omitted; sibling records are unaffected.
    pub fn extract(&self, path: &Path, contents: &str) -> AssetRecords {
        let mut records = AssetRecords::default();

        for record in split_records(contents) {
            match self.classify(&record) {
                ChunkClass::GameObject => {
                    if let Some(game_object) = self.extract_game_object(&record) {
                        records.game_objects.push(game_object);
                    }
                }
                ChunkClass::Component(kind) => match self.extract_component(path, &record, kind) {
                    Ok(component) => records.components.push(component),
                    Err(e) => {
                        warn!("{}", e);
                        records.chunks_skipped += 1;
                    }
                },
                ChunkClass::Other => {}
            }
        }

        debug!(
            "Extracted {} GameObjects, {} UI components from {}",
            records.game_objects.len(),
            records.components.len(),
            path.display()
        );

        records
    }

    /// Classify a record
    ///
    /// Component kinds are matched by substring in a fixed priority order, so a
    /// record that incidentally mentions two markers gets the higher-priority
    /// kind. This is an approximation, not a guaranteed classification.
    pub fn classify(&self, record: &SerializedRecord<'_>) -> ChunkClass {
        let root = record.root_key();

        // Components carry an indented `m_GameObject:`; only the root key counts
        if root == Some("GameObject") {
            return ChunkClass::GameObject;
        }

        if let Some(kind) = UiKind::PRIORITY
            .into_iter()
            .find(|kind| record.contains(kind.marker()))
        {
            return ChunkClass::Component(kind);
        }

        if self.infer_from_event_fields && root == Some("MonoBehaviour") {
            if record.contains("m_OnClick:") {
                return ChunkClass::Component(UiKind::Button);
            }
            if record.contains("m_Delegates:") {
                return ChunkClass::Component(UiKind::EventTrigger);
            }
        }

        ChunkClass::Other
    }

    fn extract_game_object(&self, record: &SerializedRecord<'_>) -> Option<GameObjectRecord> {
        let name = record.first_value("m_Name").filter(|n| !n.is_empty())?;

        let identifier = record.header.anchor.clone().or_else(|| {
            record
                .body()
                .lines()
                .filter(|line| line.contains("fileID:"))
                .filter_map(parse_file_id)
                .find(|id| *id != "0")
                .map(ObjectIdentifier::new)
        });

        match identifier {
            Some(identifier) => Some(GameObjectRecord::new(identifier, name)),
            None => {
                debug!("GameObject '{}' has no identifier, skipping", name);
                None
            }
        }
    }

    fn extract_component(
        &self,
        path: &Path,
        record: &SerializedRecord<'_>,
        kind: UiKind,
    ) -> AnalysisResult<UiComponentRecord> {
        if kind.uses_structured_calls() && record.contains("m_PersistentCalls:") {
            return self.extract_structured(path, record, kind);
        }

        let owner = record
            .first_value("m_GameObject")
            .and_then(parse_file_id)
            .map(ObjectIdentifier::new);

        let targets = record
            .values("m_MethodName")
            .filter(|method| !method.is_empty())
            .map(str::to_string)
            .collect();

        Ok(UiComponentRecord::new(kind, owner, targets))
    }

    fn extract_structured(
        &self,
        path: &Path,
        record: &SerializedRecord<'_>,
        kind: UiKind,
    ) -> AnalysisResult<UiComponentRecord> {
        let node = tree::decode(&record.structured_body()).map_err(|message| {
            AnalysisError::ChunkDecode {
                path: path.to_path_buf(),
                index: record.index,
                message,
            }
        })?;

        let owner = node
            .root_bodies()
            .find_map(|body| body.path(&["m_GameObject", "fileID"]))
            .and_then(Node::as_scalar)
            .filter(|id| !id.is_empty())
            .map(ObjectIdentifier::new);

        Ok(UiComponentRecord::new(kind, owner, node.persistent_call_targets()))
    }
}

impl Default for ObjectExtractor {
    fn default() -> Self {
        Self::new()
    }
}
