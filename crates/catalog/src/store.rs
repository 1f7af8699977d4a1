use crate::asset::{Asset, AssetType};
use std::collections::{BTreeMap, BTreeSet};

/// Owns the authoritative id -> asset mapping plus the draft label sets.
///
/// There is no public mutation path: every change goes through a command
/// built by [`crate::ops`] and executed by [`crate::History`], so the undo
/// log always sees the full mutation stream.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    assets: BTreeMap<String, Asset>,
    draft_tags: BTreeSet<String>,
    draft_groups: BTreeSet<String>,
    serials: BTreeMap<AssetType, u64>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the seed records produced by the external data source and
    /// advance the per-type serial counters past every seeded id. Called
    /// once at session start, outside the undo log.
    pub fn seed(&mut self, assets: Vec<Asset>) {
        for asset in assets {
            self.bump_serial_past(&asset);
            self.assets.insert(asset.id.clone(), asset);
        }
        log::info!("seeded catalogue with {} assets", self.assets.len());
    }

    /// Id the next add command for `kind` will use. The counter itself only
    /// advances when the command is applied, so an id is never burned by a
    /// rejected operation and never reused after a deletion.
    #[must_use]
    pub fn peek_next_id(&self, kind: AssetType) -> String {
        let serial = self.serials.get(&kind).copied().unwrap_or(0);
        format!("{}-{serial}", kind.as_str())
    }

    #[must_use]
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.assets.contains_key(id)
    }

    /// Assets in catalogue (id) order
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    #[must_use]
    pub const fn assets(&self) -> &BTreeMap<String, Asset> {
        &self.assets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    #[must_use]
    pub const fn draft_tags(&self) -> &BTreeSet<String> {
        &self.draft_tags
    }

    #[must_use]
    pub const fn draft_groups(&self) -> &BTreeSet<String> {
        &self.draft_groups
    }

    /// Every tag known to the catalogue: union of asset tags and draft tags
    #[must_use]
    pub fn all_tags(&self) -> BTreeSet<String> {
        let mut set: BTreeSet<String> = self
            .assets
            .values()
            .flat_map(|asset| asset.tags.iter().cloned())
            .collect();
        set.extend(self.draft_tags.iter().cloned());
        set
    }

    /// Every group known to the catalogue: union of asset groups and drafts
    #[must_use]
    pub fn all_groups(&self) -> BTreeSet<String> {
        let mut set: BTreeSet<String> = self
            .assets
            .values()
            .flat_map(|asset| asset.groups.iter().cloned())
            .collect();
        set.extend(self.draft_groups.iter().cloned());
        set
    }

    /// Whether `label` is a known tag (on any asset, or drafted)
    #[must_use]
    pub fn knows_tag(&self, label: &str) -> bool {
        self.draft_tags.contains(label)
            || self
                .assets
                .values()
                .any(|asset| asset.tags.iter().any(|tag| tag == label))
    }

    /// Whether `label` is a known group (on any asset, or drafted)
    #[must_use]
    pub fn knows_group(&self, label: &str) -> bool {
        self.draft_groups.contains(label)
            || self
                .assets
                .values()
                .any(|asset| asset.groups.iter().any(|group| group == label))
    }

    // Mutators below are crate-private: commands are the only writers.

    pub(crate) fn insert_asset(&mut self, asset: Asset) {
        self.bump_serial_past(&asset);
        self.assets.insert(asset.id.clone(), asset);
    }

    pub(crate) fn take_asset(&mut self, id: &str) -> Option<Asset> {
        self.assets.remove(id)
    }

    pub(crate) fn replace_asset(&mut self, id: &str, asset: Asset) {
        if self.assets.insert(id.to_string(), asset).is_none() {
            log::warn!("replace_asset inserted previously unknown id {id}");
        }
    }

    pub(crate) fn set_tags(&mut self, id: &str, tags: Vec<String>) {
        match self.assets.get_mut(id) {
            Some(asset) => asset.tags = tags,
            None => log::warn!("set_tags on unknown id {id}"),
        }
    }

    pub(crate) fn set_groups(&mut self, id: &str, groups: Vec<String>) {
        match self.assets.get_mut(id) {
            Some(asset) => asset.groups = groups,
            None => log::warn!("set_groups on unknown id {id}"),
        }
    }

    pub(crate) fn insert_draft_tag(&mut self, tag: &str) {
        self.draft_tags.insert(tag.to_string());
    }

    pub(crate) fn remove_draft_tag(&mut self, tag: &str) {
        self.draft_tags.remove(tag);
    }

    pub(crate) fn insert_draft_group(&mut self, group: &str) {
        self.draft_groups.insert(group.to_string());
    }

    pub(crate) fn remove_draft_group(&mut self, group: &str) {
        self.draft_groups.remove(group);
    }

    fn bump_serial_past(&mut self, asset: &Asset) {
        let Some(suffix) = asset.id.strip_prefix(asset.kind.as_str()) else {
            return;
        };
        let Some(serial) = suffix.strip_prefix('-').and_then(|s| s.parse::<u64>().ok()) else {
            return;
        };
        let next = self.serials.entry(asset.kind).or_insert(0);
        *next = (*next).max(serial + 1);
    }
}
