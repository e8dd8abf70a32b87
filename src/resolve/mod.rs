//! Per-asset identifier resolution
//!
//! UI components reference their owning GameObject only by an asset-local
//! identifier. The resolver collects every GameObject of one asset before
//! resolving any component, since owners may appear before or after the
//! components that reference them.

use crate::config::NamingConfig;
use crate::discovery::AssetFile;
use crate::parser::{AssetRecords, GameObjectRecord, ObjectIdentifier, UiComponentRecord, UiKind};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Prefix of the display name synthesized for unresolved owners
pub const PLACEHOLDER_PREFIX: &str = "UnknownButton";

/// Separator between asset label and display name in qualified node keys
pub const QUALIFIER_SEPARATOR: &str = "::";

/// An identifier together with the asset it is valid in
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetScopedId {
    pub asset: PathBuf,
    pub identifier: ObjectIdentifier,
}

impl fmt::Display for AssetScopedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.asset.display(), self.identifier)
    }
}

/// A UI component with its owner resolved to a display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedElement {
    /// Label of the asset the component came from
    pub asset_label: String,

    pub owner: Option<AssetScopedId>,

    /// GameObject name, or the `UnknownButton(<id>)` placeholder
    pub display_name: String,

    /// Whether `display_name` came from a GameObject record
    pub resolved: bool,

    pub kind: UiKind,
    pub targets: Vec<String>,
}

impl ResolvedElement {
    /// Graph node key for this element
    pub fn node_key(&self, naming: &NamingConfig) -> String {
        if naming.qualify_with_asset {
            format!("{}{}{}", self.asset_label, QUALIFIER_SEPARATOR, self.display_name)
        } else {
            self.display_name.clone()
        }
    }
}

/// Display name used when an owner cannot be resolved
///
/// The raw identifier is embedded so distinct unresolved owners stay distinct.
pub fn placeholder_name(owner: Option<&ObjectIdentifier>) -> String {
    match owner {
        Some(id) => format!("{}({})", PLACEHOLDER_PREFIX, id),
        None => format!("{}(None)", PLACEHOLDER_PREFIX),
    }
}

/// Output of resolving one asset
#[derive(Debug, Default, Clone)]
pub struct ResolvedAsset {
    pub elements: Vec<ResolvedElement>,
    pub unresolved: usize,
    pub collisions: usize,
}

/// Identifier → display name mapping scoped to a single asset
#[derive(Debug)]
pub struct IdentifierResolver {
    asset_path: PathBuf,
    asset_label: String,
    names: HashMap<ObjectIdentifier, String>,
    collisions: usize,
}

impl IdentifierResolver {
    pub fn new(asset_path: impl Into<PathBuf>, asset_label: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            asset_label: asset_label.into(),
            names: HashMap::new(),
            collisions: 0,
        }
    }

    pub fn for_asset(asset: &AssetFile) -> Self {
        Self::new(&asset.path, &asset.label)
    }

    /// Register GameObjects; a repeated identifier keeps the later name
    pub fn collect(&mut self, game_objects: &[GameObjectRecord]) {
        for game_object in game_objects {
            if let Some(previous) = self
                .names
                .insert(game_object.identifier.clone(), game_object.display_name.clone())
            {
                self.collisions += 1;
                debug!(
                    "Identifier {} in {} maps to both '{}' and '{}', keeping the latter",
                    game_object.identifier, self.asset_label, previous, game_object.display_name
                );
            }
        }
    }

    pub fn lookup(&self, identifier: &ObjectIdentifier) -> Option<&str> {
        self.names.get(identifier).map(String::as_str)
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Resolve one component against the collected GameObjects
    pub fn resolve(&self, component: &UiComponentRecord) -> ResolvedElement {
        let name = component.owner.as_ref().and_then(|id| self.lookup(id));

        let display_name = match name {
            Some(name) => name.to_string(),
            None => {
                debug!(
                    "Unresolved owner {:?} for {} in {}",
                    component.owner.as_ref().map(ObjectIdentifier::as_str),
                    component.kind,
                    self.asset_label
                );
                placeholder_name(component.owner.as_ref())
            }
        };

        ResolvedElement {
            asset_label: self.asset_label.clone(),
            owner: component.owner.clone().map(|identifier| AssetScopedId {
                asset: self.asset_path.clone(),
                identifier,
            }),
            display_name,
            resolved: name.is_some(),
            kind: component.kind,
            targets: component.targets.clone(),
        }
    }

    /// Collect every GameObject of the asset, then resolve every component
    pub fn resolve_all(mut self, records: &AssetRecords) -> ResolvedAsset {
        self.collect(&records.game_objects);

        let elements: Vec<ResolvedElement> = records
            .components
            .iter()
            .map(|component| self.resolve(component))
            .collect();

        ResolvedAsset {
            unresolved: elements.iter().filter(|e| !e.resolved).count(),
            collisions: self.collisions,
            elements,
        }
    }
}
