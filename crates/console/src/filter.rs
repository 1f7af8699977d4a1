use asset_catalog::{Asset, AssetType};
use std::collections::BTreeSet;

/// Active narrowing state for the asset list: type toggles, label
/// selections, and the fuzzy search query.
///
/// The three category predicates are AND-combined; within a category any
/// selected value may match. An empty category is inactive and lets every
/// asset through.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_query: String,
    pub active_types: BTreeSet<AssetType>,
    pub selected_tags: Vec<String>,
    pub selected_groups: Vec<String>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Category predicate (stage 2 of the pipeline; search runs later on
    /// the survivors)
    #[must_use]
    pub fn matches(&self, asset: &Asset) -> bool {
        if !self.active_types.is_empty() && !self.active_types.contains(&asset.kind) {
            return false;
        }
        if !self.selected_tags.is_empty()
            && !self.selected_tags.iter().any(|tag| asset.tags.contains(tag))
        {
            return false;
        }
        if !self.selected_groups.is_empty()
            && !self
                .selected_groups
                .iter()
                .any(|group| asset.groups.contains(group))
        {
            return false;
        }
        true
    }
}
