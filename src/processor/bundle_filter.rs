//! Excludes items from indexing based on their bundle (content type,
//! vocabulary, ...).

use super::{Processor, ProcessorInfo};
use crate::config::BundleFilterConfig;
use crate::types::{IndexInfo, Item};
use ahash::AHashSet;

pub const BUNDLE_FILTER: ProcessorInfo = ProcessorInfo {
    id: "bundle_filter",
    name: "Bundle filter",
    description: "Exclude items from indexing based on their bundle (content type, vocabulary, ...).",
    weight: -20,
};

/// A bundle declared by an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleInfo {
    pub id: String,
    pub label: Option<String>,
}

/// Entity type metadata the filter needs from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTypeInfo {
    /// Name of the property holding an entity's bundle.
    pub bundle_key: Option<String>,
    pub bundles: Vec<BundleInfo>,
}

impl EntityTypeInfo {
    /// Whether the type declares both a bundle key and at least one bundle.
    pub fn has_bundles(&self) -> bool {
        self.bundle_key.as_deref().is_some_and(|key| !key.is_empty()) && !self.bundles.is_empty()
    }
}

/// Host capability: entity type metadata lookup.
pub trait EntityInfoProvider {
    fn entity_info(&self, entity_type: &str) -> Option<EntityTypeInfo>;
}

#[derive(Debug, Clone)]
pub struct BundleFilter {
    /// `true`: drop items in a selected bundle. `false`: keep only those.
    exclude_selected: bool,
    /// `None` when no selection was saved; the filter then keeps every item.
    bundles: Option<AHashSet<String>>,
}

impl BundleFilter {
    pub fn new(config: &BundleFilterConfig) -> Self {
        Self {
            exclude_selected: config.default,
            bundles: config
                .bundles
                .as_ref()
                .map(|bundles| bundles.iter().cloned().collect()),
        }
    }

    /// The filter only applies to indexes of entity types with bundles.
    pub fn supports_index(index: &IndexInfo, entities: &dyn EntityInfoProvider) -> bool {
        index
            .entity_type
            .as_deref()
            .and_then(|entity_type| entities.entity_info(entity_type))
            .is_some_and(|info| info.has_bundles())
    }

    /// `(id, label)` choices for the host's bundle selector. Bundles without
    /// a label are listed under their id.
    pub fn bundle_options(info: &EntityTypeInfo) -> Vec<(String, String)> {
        if !info.has_bundles() {
            return Vec::new();
        }
        info.bundles
            .iter()
            .map(|bundle| {
                let label = bundle.label.clone().unwrap_or_else(|| bundle.id.clone());
                (bundle.id.clone(), label)
            })
            .collect()
    }

    fn is_selected(selected: &AHashSet<String>, item: &Item) -> bool {
        item.bundle
            .as_deref()
            .is_some_and(|bundle| selected.contains(bundle))
    }
}

impl Processor for BundleFilter {
    fn info(&self) -> &ProcessorInfo {
        &BUNDLE_FILTER
    }

    fn preprocess_items(&self, items: &mut Vec<Item>) {
        let Some(selected) = &self.bundles else {
            tracing::debug!("no bundles selected, keeping all items");
            return;
        };
        let before = items.len();
        items.retain(|item| Self::is_selected(selected, item) != self.exclude_selected);
        tracing::debug!(
            removed = before - items.len(),
            kept = items.len(),
            "bundle filter applied"
        );
    }
}
