use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset-local reference token (a `fileID` / anchor value)
///
/// Only unique within the asset it came from; never compare identifiers
/// taken from different assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectIdentifier(String);

impl ObjectIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectIdentifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Interactive UI component kinds recognised by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UiKind {
    Button,
    Toggle,
    Dropdown,
    Slider,
    EventTrigger,
}

impl UiKind {
    /// Classification order: the first kind whose marker occurs in a chunk wins
    pub const PRIORITY: [UiKind; 5] = [
        UiKind::Button,
        UiKind::Toggle,
        UiKind::Dropdown,
        UiKind::Slider,
        UiKind::EventTrigger,
    ];

    /// Literal text marking a chunk as this component kind
    pub fn marker(&self) -> &'static str {
        match self {
            UiKind::Button => "Button:",
            UiKind::Toggle => "Toggle:",
            UiKind::Dropdown => "Dropdown:",
            UiKind::Slider => "Slider:",
            UiKind::EventTrigger => "EventTrigger:",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UiKind::Button => "Button",
            UiKind::Toggle => "Toggle",
            UiKind::Dropdown => "Dropdown",
            UiKind::Slider => "Slider",
            UiKind::EventTrigger => "EventTrigger",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(name))
    }

    /// Kinds whose persistent calls need the structured decode
    pub fn uses_structured_calls(&self) -> bool {
        matches!(self, UiKind::Button | UiKind::EventTrigger)
    }
}

impl fmt::Display for UiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named GameObject within one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameObjectRecord {
    pub identifier: ObjectIdentifier,
    pub display_name: String,
}

impl GameObjectRecord {
    pub fn new(identifier: impl Into<ObjectIdentifier>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

/// An interactive component and the method names its events invoke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiComponentRecord {
    pub kind: UiKind,

    /// Owning GameObject; absent when the reference was missing or malformed
    pub owner: Option<ObjectIdentifier>,

    /// Persistent-call method names in source order, duplicates retained
    pub targets: Vec<String>,
}

impl UiComponentRecord {
    pub fn new(kind: UiKind, owner: Option<ObjectIdentifier>, targets: Vec<String>) -> Self {
        Self { kind, owner, targets }
    }
}

/// Everything extracted from a single asset
#[derive(Debug, Default, Clone)]
pub struct AssetRecords {
    pub game_objects: Vec<GameObjectRecord>,
    pub components: Vec<UiComponentRecord>,

    /// Records dropped because structured decoding failed
    pub chunks_skipped: usize,
}

impl AssetRecords {
    pub fn is_empty(&self) -> bool {
        self.game_objects.is_empty() && self.components.is_empty()
    }
}
