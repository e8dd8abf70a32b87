//! Object extraction from chunk-delimited scene and prefab assets
//!
//! An asset is split into [`SerializedRecord`]s; each record is classified as
//! a GameObject, one UI component kind, or noise, and the few fields the
//! navigation model needs are projected out of it.

mod chunk;
mod extractor;
mod records;
pub mod tree;

pub use chunk::{parse_file_id, split_records, ChunkHeader, LineEntry, SerializedRecord, CHUNK_DELIMITER};
pub use extractor::{ChunkClass, ObjectExtractor};
pub use records::{AssetRecords, GameObjectRecord, ObjectIdentifier, UiComponentRecord, UiKind};
