use crate::filter::FilterState;
use crate::selection::Selection;
use crate::view::{derive_view, ViewState};
use asset_catalog::{
    ops, Asset, AssetPatch, AssetType, CatalogStore, Command, History, NewAsset, Result,
};
use asset_search::FuzzySearch;
use std::path::Path;

/// One admin-console editing session.
///
/// Owns the catalogue store, the undo history, the filter and selection
/// state, and the current derived view. Every inbound mutation maps to
/// exactly one command; the view is re-derived eagerly after each committed
/// command and each filter or selection change, so the read accessors are
/// always current when a call returns.
pub struct Session {
    store: CatalogStore,
    history: History,
    filters: FilterState,
    selection: Selection,
    matcher: FuzzySearch,
    view: ViewState,
}

impl Session {
    /// Empty session (no seed)
    #[must_use]
    pub fn new() -> Self {
        Self::with_assets(Vec::new())
    }

    /// Session seeded with pre-built records
    #[must_use]
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        let mut store = CatalogStore::new();
        store.seed(assets);
        let mut session = Self {
            store,
            history: History::new(),
            filters: FilterState::new(),
            selection: Selection::new(),
            matcher: FuzzySearch::new(),
            view: ViewState::default(),
        };
        session.refresh();
        session
    }

    /// Session seeded from a JSON seed document on disk
    pub fn from_seed_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_assets(asset_catalog::load_seed(path)?))
    }

    // ----- catalogue mutations (one undoable command each) -----

    /// Merge `patch` into the asset
    pub fn update_asset(&mut self, id: &str, patch: &AssetPatch) -> Result<()> {
        let command = ops::update_asset(&self.store, id, patch)?;
        self.commit(command);
        Ok(())
    }

    /// Insert a fresh asset; returns its assigned id
    pub fn add_asset(&mut self, new: &NewAsset) -> Result<String> {
        let command = ops::add_asset(&self.store, new)?;
        // the serial only advances when the command applies, so this peek
        // is the id the builder captured
        let id = self.store.peek_next_id(new.kind);
        self.commit(command);
        Ok(id)
    }

    /// Delete a single asset; its selection (if any) is dropped with it
    pub fn remove_asset(&mut self, id: &str) -> Result<()> {
        let command = ops::remove_asset(&self.store, id)?;
        self.commit(command);
        Ok(())
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<()> {
        let command = ops::rename_tag(&self.store, old, new)?;
        self.commit(command);
        Ok(())
    }

    pub fn rename_group(&mut self, old: &str, new: &str) -> Result<()> {
        let command = ops::rename_group(&self.store, old, new)?;
        self.commit(command);
        Ok(())
    }

    pub fn add_draft_tag(&mut self, tag: &str) -> Result<()> {
        let command = ops::add_draft_tag(&self.store, tag)?;
        self.commit(command);
        Ok(())
    }

    pub fn add_draft_group(&mut self, group: &str) -> Result<()> {
        let command = ops::add_draft_group(&self.store, group)?;
        self.commit(command);
        Ok(())
    }

    /// Add `tag` to every selected asset (if absent)
    pub fn bulk_add_tag(&mut self, tag: &str) -> Result<()> {
        let ids = self.selected_ids();
        let command = ops::bulk_add_tag(&self.store, tag, &ids)?;
        self.commit(command);
        Ok(())
    }

    /// Remove `tag` from every selected asset (if present)
    pub fn bulk_remove_tag(&mut self, tag: &str) -> Result<()> {
        let ids = self.selected_ids();
        let command = ops::bulk_remove_tag(&self.store, tag, &ids)?;
        self.commit(command);
        Ok(())
    }

    pub fn bulk_add_group(&mut self, group: &str) -> Result<()> {
        let ids = self.selected_ids();
        let command = ops::bulk_add_group(&self.store, group, &ids)?;
        self.commit(command);
        Ok(())
    }

    pub fn bulk_remove_group(&mut self, group: &str) -> Result<()> {
        let ids = self.selected_ids();
        let command = ops::bulk_remove_group(&self.store, group, &ids)?;
        self.commit(command);
        Ok(())
    }

    /// Delete every selected asset in one command. Undoing the deletion
    /// re-inserts the records but does not re-select them.
    pub fn delete_selected(&mut self) -> Result<()> {
        let ids = self.selected_ids();
        let command = ops::delete_assets(&self.store, &ids)?;
        self.commit(command);
        Ok(())
    }

    /// Revert the most recent command. Returns false when the history is
    /// exhausted.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.store);
        if undone {
            self.sync_after_mutation();
        }
        undone
    }

    // ----- filter state (not undoable) -----

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
        self.refresh();
    }

    pub fn set_type_filter(&mut self, kind: AssetType, active: bool) {
        if active {
            self.filters.active_types.insert(kind);
        } else {
            self.filters.active_types.remove(&kind);
        }
        self.refresh();
    }

    pub fn set_tag_filters(&mut self, tags: Vec<String>) {
        self.filters.selected_tags = tags;
        self.refresh();
    }

    pub fn set_group_filters(&mut self, groups: Vec<String>) {
        self.filters.selected_groups = groups;
        self.refresh();
    }

    // ----- selection (not undoable) -----

    pub fn toggle_select(&mut self, id: &str) {
        self.selection.toggle(id);
        self.refresh();
    }

    /// Select every catalogue id, filtered or not
    pub fn select_all(&mut self) {
        let ids: Vec<String> = self.store.iter().map(|asset| asset.id.clone()).collect();
        self.selection.insert_all(ids);
        self.refresh();
    }

    /// Add the currently filtered ids to the selection; selections outside
    /// the filtered set stay
    pub fn select_filtered(&mut self) {
        let ids: Vec<String> = self.view.filtered_ids().map(ToString::to_string).collect();
        self.selection.insert_all(ids);
        self.refresh();
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
        self.refresh();
    }

    /// Drop only the currently filtered ids from the selection; ghost
    /// selections outside the filter survive
    pub fn deselect_filtered(&mut self) {
        let ids: Vec<String> = self.view.filtered_ids().map(ToString::to_string).collect();
        self.selection.remove_all(ids.iter().map(String::as_str));
        self.refresh();
    }

    // ----- read accessors -----

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&str> {
        self.history.last_action()
    }

    /// Labels of the most recent `n` commands, newest first
    #[must_use]
    pub fn recent_actions(&self, n: usize) -> Vec<&str> {
        self.history.recent_labels(n)
    }

    // ----- internals -----

    fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().iter().cloned().collect()
    }

    fn commit(&mut self, command: Command) {
        self.history.execute(command, &mut self.store);
        self.sync_after_mutation();
    }

    /// Re-establish the selection invariant (no id outside the catalogue)
    /// and re-derive the view. Runs after every committed command and every
    /// undo; an undone removal therefore does not resurrect the asset's
    /// selection.
    fn sync_after_mutation(&mut self) {
        let before = self.selection.len();
        let store = &self.store;
        self.selection.retain(|id| store.contains(id));
        let dropped = before - self.selection.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} selected ids no longer in the catalogue");
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = derive_view(&self.store, &self.filters, &self.selection, &mut self.matcher);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
