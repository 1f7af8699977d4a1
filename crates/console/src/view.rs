use crate::filter::FilterState;
use crate::selection::Selection;
use asset_catalog::{Asset, CatalogStore};
use asset_search::FuzzySearch;
use std::collections::BTreeSet;

/// One rendered list row: the asset plus its selection flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRow {
    pub asset: Asset,
    pub selected: bool,
}

/// Snapshot of everything the presentation layer reads, re-derived after
/// every committed command or filter/selection change.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Filtered (and, with a query, search-ranked) assets in display order
    pub rows: Vec<AssetRow>,

    /// Union of asset tags and draft tags
    pub all_tags: BTreeSet<String>,

    /// Union of asset groups and draft groups
    pub all_groups: BTreeSet<String>,

    /// Catalogue size before filtering
    pub total_count: usize,
}

impl ViewState {
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.rows.len()
    }

    /// Ids of the currently visible rows, in display order
    pub fn filtered_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.asset.id.as_str())
    }
}

/// Recompute the derived view from current state.
///
/// Stage order matters: the category filter narrows the catalogue first,
/// then the fuzzy query ranks only the survivors, then rows are annotated
/// with selection flags. Pure in its inputs; the matcher argument only
/// carries reusable scratch buffers.
pub fn derive_view(
    store: &CatalogStore,
    filters: &FilterState,
    selection: &Selection,
    matcher: &mut FuzzySearch,
) -> ViewState {
    let narrowed: Vec<&Asset> = store.iter().filter(|asset| filters.matches(asset)).collect();

    let query = filters.search_query.trim();
    let ordered: Vec<&Asset> = if query.is_empty() {
        narrowed
    } else {
        matcher
            .rank(query, &narrowed)
            .into_iter()
            .map(|(asset, _score)| asset)
            .collect()
    };

    let rows = ordered
        .into_iter()
        .map(|asset| AssetRow {
            selected: selection.contains(&asset.id),
            asset: asset.clone(),
        })
        .collect();

    ViewState {
        rows,
        all_tags: store.all_tags(),
        all_groups: store.all_groups(),
        total_count: store.len(),
    }
}
