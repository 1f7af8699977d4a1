//! Command builders for every logical catalogue operation.
//!
//! Each builder validates against the current store state and returns a
//! fully-populated [`Command`] for the history engine to execute, or a
//! [`CatalogError`] rejection that leaves no trace in the log. Snapshots of
//! prior state are taken here, at build time, which is also apply time for
//! the single-threaded session.

use crate::asset::{dedup_labels, Asset, AssetPatch, NewAsset};
use crate::command::{Command, CommandKind};
use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Merge `patch` into the asset; undo restores the entire prior record.
pub fn update_asset(store: &CatalogStore, id: &str, patch: &AssetPatch) -> Result<Command> {
    let before = store
        .asset(id)
        .cloned()
        .ok_or_else(|| CatalogError::UnknownAsset(id.to_string()))?;

    if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(CatalogError::EmptyName);
    }
    if patch.value.as_deref().is_some_and(|value| value.trim().is_empty()) {
        return Err(CatalogError::EmptyValue);
    }

    let after = patch.apply_to(&before);
    Ok(command(
        format!("Update asset \"{}\"", before.name),
        CommandKind::UpdateAsset {
            id: id.to_string(),
            before,
            after,
        },
    ))
}

/// Insert a fresh asset under the next id for its type; undo deletes it.
pub fn add_asset(store: &CatalogStore, new: &NewAsset) -> Result<Command> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    let value = new.value.trim();
    if value.is_empty() {
        return Err(CatalogError::EmptyValue);
    }

    let asset = Asset {
        id: store.peek_next_id(new.kind),
        kind: new.kind,
        name: name.to_string(),
        value: value.to_string(),
        tags: dedup_labels(new.tags.clone()),
        groups: dedup_labels(new.groups.clone()),
    };
    Ok(command(
        format!("Add asset \"{name}\""),
        CommandKind::AddAsset { asset },
    ))
}

/// Delete one asset; undo re-inserts the exact prior record.
pub fn remove_asset(store: &CatalogStore, id: &str) -> Result<Command> {
    let asset = store
        .asset(id)
        .cloned()
        .ok_or_else(|| CatalogError::UnknownAsset(id.to_string()))?;

    Ok(command(
        format!("Remove asset \"{}\" ({id})", asset.name),
        CommandKind::RemoveAsset { asset },
    ))
}

/// Replace `old` with `new` in every asset carrying the tag, in place.
/// Rejected when `new` is blank, collides with a known tag, or no asset
/// carries `old`.
pub fn rename_tag(store: &CatalogStore, old: &str, new: &str) -> Result<Command> {
    let new = new.trim();
    if new.is_empty() {
        return Err(CatalogError::EmptyLabel);
    }
    if store.knows_tag(new) {
        return Err(CatalogError::DuplicateLabel(new.to_string()));
    }

    let before = snapshot(store, |asset| {
        asset.tags.iter().any(|tag| tag == old).then(|| asset.tags.clone())
    })?;
    Ok(command(
        format!("Rename tag \"{old}\" → \"{new}\""),
        CommandKind::RenameTag {
            old: old.to_string(),
            new: new.to_string(),
            before,
        },
    ))
}

/// Group counterpart of [`rename_tag`], same guards.
pub fn rename_group(store: &CatalogStore, old: &str, new: &str) -> Result<Command> {
    let new = new.trim();
    if new.is_empty() {
        return Err(CatalogError::EmptyLabel);
    }
    if store.knows_group(new) {
        return Err(CatalogError::DuplicateLabel(new.to_string()));
    }

    let before = snapshot(store, |asset| {
        asset
            .groups
            .iter()
            .any(|group| group == old)
            .then(|| asset.groups.clone())
    })?;
    Ok(command(
        format!("Rename group \"{old}\" → \"{new}\""),
        CommandKind::RenameGroup {
            old: old.to_string(),
            new: new.to_string(),
            before,
        },
    ))
}

/// Add `tag` to every given id that exists, if absent; undo restores each
/// affected id's prior sequence individually.
pub fn bulk_add_tag(store: &CatalogStore, tag: &str, ids: &[String]) -> Result<Command> {
    let tag = nonempty_label(tag)?;
    let before = snapshot_ids(store, ids, |asset| asset.tags.clone())?;
    Ok(command(
        format!("Bulk add tag \"{tag}\""),
        CommandKind::BulkAddTag {
            tag: tag.to_string(),
            before,
        },
    ))
}

/// Remove `tag` from every given id that exists, if present.
pub fn bulk_remove_tag(store: &CatalogStore, tag: &str, ids: &[String]) -> Result<Command> {
    let tag = nonempty_label(tag)?;
    let before = snapshot_ids(store, ids, |asset| asset.tags.clone())?;
    Ok(command(
        format!("Bulk remove tag \"{tag}\""),
        CommandKind::BulkRemoveTag {
            tag: tag.to_string(),
            before,
        },
    ))
}

/// Group counterpart of [`bulk_add_tag`].
pub fn bulk_add_group(store: &CatalogStore, group: &str, ids: &[String]) -> Result<Command> {
    let group = nonempty_label(group)?;
    let before = snapshot_ids(store, ids, |asset| asset.groups.clone())?;
    Ok(command(
        format!("Bulk add group \"{group}\""),
        CommandKind::BulkAddGroup {
            group: group.to_string(),
            before,
        },
    ))
}

/// Group counterpart of [`bulk_remove_tag`].
pub fn bulk_remove_group(store: &CatalogStore, group: &str, ids: &[String]) -> Result<Command> {
    let group = nonempty_label(group)?;
    let before = snapshot_ids(store, ids, |asset| asset.groups.clone())?;
    Ok(command(
        format!("Bulk remove group \"{group}\""),
        CommandKind::BulkRemoveGroup {
            group: group.to_string(),
            before,
        },
    ))
}

/// Delete every given id that exists in one command; undo re-inserts all
/// prior records in one command.
pub fn delete_assets(store: &CatalogStore, ids: &[String]) -> Result<Command> {
    let before: Vec<Asset> = ids
        .iter()
        .filter_map(|id| store.asset(id).cloned())
        .collect();
    if before.is_empty() {
        return Err(CatalogError::NothingToDo);
    }

    Ok(command(
        format!("Delete {} selected assets", before.len()),
        CommandKind::DeleteAssets { before },
    ))
}

/// Register a tag before any asset carries it. Rejected when already known.
pub fn add_draft_tag(store: &CatalogStore, tag: &str) -> Result<Command> {
    let tag = nonempty_label(tag)?;
    if store.knows_tag(tag) {
        return Err(CatalogError::DuplicateLabel(tag.to_string()));
    }

    Ok(command(
        format!("Add draft tag \"{tag}\""),
        CommandKind::AddDraftTag {
            tag: tag.to_string(),
        },
    ))
}

/// Group counterpart of [`add_draft_tag`].
pub fn add_draft_group(store: &CatalogStore, group: &str) -> Result<Command> {
    let group = nonempty_label(group)?;
    if store.knows_group(group) {
        return Err(CatalogError::DuplicateLabel(group.to_string()));
    }

    Ok(command(
        format!("Add draft group \"{group}\""),
        CommandKind::AddDraftGroup {
            group: group.to_string(),
        },
    ))
}

fn command(label: String, kind: CommandKind) -> Command {
    Command {
        label,
        timestamp_ms: now_ms(),
        kind,
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn nonempty_label(label: &str) -> Result<&str> {
    let label = label.trim();
    if label.is_empty() {
        return Err(CatalogError::EmptyLabel);
    }
    Ok(label)
}

/// Snapshot the prior label sequence of every asset `select` matches,
/// rejecting the operation when none do.
fn snapshot<F>(store: &CatalogStore, select: F) -> Result<BTreeMap<String, Vec<String>>>
where
    F: Fn(&Asset) -> Option<Vec<String>>,
{
    let before: BTreeMap<String, Vec<String>> = store
        .iter()
        .filter_map(|asset| select(asset).map(|labels| (asset.id.clone(), labels)))
        .collect();
    if before.is_empty() {
        return Err(CatalogError::NothingToDo);
    }
    Ok(before)
}

/// Snapshot prior label sequences for the given ids (unknown ids are
/// skipped), rejecting the operation when none remain.
fn snapshot_ids<F>(
    store: &CatalogStore,
    ids: &[String],
    labels_of: F,
) -> Result<BTreeMap<String, Vec<String>>>
where
    F: Fn(&Asset) -> Vec<String>,
{
    let before: BTreeMap<String, Vec<String>> = ids
        .iter()
        .filter_map(|id| store.asset(id).map(|asset| (asset.id.clone(), labels_of(asset))))
        .collect();
    if before.is_empty() {
        return Err(CatalogError::NothingToDo);
    }
    Ok(before)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetType;
    use crate::history::History;

    fn seeded() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.seed(vec![
            Asset {
                id: "fill-0".to_string(),
                kind: AssetType::Fill,
                name: "Ink".to_string(),
                value: "#111111".to_string(),
                tags: vec!["dark".to_string()],
                groups: vec!["base".to_string()],
            },
            Asset {
                id: "gradient-0".to_string(),
                kind: AssetType::Gradient,
                name: "Dawn".to_string(),
                value: "linear-gradient(#f00, #00f)".to_string(),
                tags: vec!["warm".to_string()],
                groups: Vec::new(),
            },
        ]);
        store
    }

    #[test]
    fn test_add_asset_rejects_blank_name_and_value() {
        let store = seeded();

        let blank_name = NewAsset::new(AssetType::Fill, "   ", "#fff");
        assert!(matches!(
            add_asset(&store, &blank_name),
            Err(CatalogError::EmptyName)
        ));

        let blank_value = NewAsset::new(AssetType::Fill, "Snow", "  ");
        assert!(matches!(
            add_asset(&store, &blank_value),
            Err(CatalogError::EmptyValue)
        ));
    }

    #[test]
    fn test_add_asset_assigns_next_serial_and_trims() {
        let mut store = seeded();
        let mut history = History::new();

        let command = add_asset(
            &store,
            &NewAsset::new(AssetType::Fill, " Snow ", " #ffffff "),
        )
        .unwrap();
        history.execute(command, &mut store);

        let added = store.asset("fill-1").expect("inserted under next serial");
        assert_eq!(added.name, "Snow");
        assert_eq!(added.value, "#ffffff");
    }

    #[test]
    fn test_update_unknown_asset_is_rejected() {
        let store = seeded();
        let patch = AssetPatch::new().name("Renamed");
        assert!(matches!(
            update_asset(&store, "fill-99", &patch),
            Err(CatalogError::UnknownAsset(_))
        ));
    }

    #[test]
    fn test_update_rejects_blank_fields() {
        let store = seeded();
        assert!(matches!(
            update_asset(&store, "fill-0", &AssetPatch::new().name("  ")),
            Err(CatalogError::EmptyName)
        ));
        assert!(matches!(
            update_asset(&store, "fill-0", &AssetPatch::new().value("")),
            Err(CatalogError::EmptyValue)
        ));
    }

    #[test]
    fn test_rename_tag_guards() {
        let store = seeded();

        // target collides with a known tag
        assert!(matches!(
            rename_tag(&store, "dark", "warm"),
            Err(CatalogError::DuplicateLabel(_))
        ));
        // no asset carries the old tag
        assert!(matches!(
            rename_tag(&store, "missing", "fresh"),
            Err(CatalogError::NothingToDo)
        ));
        // blank target
        assert!(matches!(
            rename_tag(&store, "dark", "  "),
            Err(CatalogError::EmptyLabel)
        ));
    }

    #[test]
    fn test_rename_tag_snapshots_only_affected() {
        let store = seeded();
        let command = rename_tag(&store, "dark", "night").unwrap();
        let CommandKind::RenameTag { before, .. } = &command.kind else {
            panic!("expected RenameTag, got {:?}", command.kind);
        };
        assert_eq!(before.len(), 1);
        assert!(before.contains_key("fill-0"));
    }

    #[test]
    fn test_bulk_ops_skip_unknown_ids() {
        let store = seeded();
        let ids = vec!["fill-0".to_string(), "fill-42".to_string()];

        let command = bulk_add_tag(&store, "brand", &ids).unwrap();
        let CommandKind::BulkAddTag { before, .. } = &command.kind else {
            panic!("expected BulkAddTag, got {:?}", command.kind);
        };
        assert_eq!(before.len(), 1);

        let none: Vec<String> = vec!["fill-42".to_string()];
        assert!(matches!(
            bulk_add_tag(&store, "brand", &none),
            Err(CatalogError::NothingToDo)
        ));
        assert!(matches!(
            bulk_add_tag(&store, "brand", &[]),
            Err(CatalogError::NothingToDo)
        ));
    }

    #[test]
    fn test_draft_rejected_when_label_known() {
        let mut store = seeded();
        let mut history = History::new();

        assert!(matches!(
            add_draft_tag(&store, "dark"),
            Err(CatalogError::DuplicateLabel(_))
        ));

        let command = add_draft_tag(&store, "brand-new").unwrap();
        history.execute(command, &mut store);
        assert!(store.draft_tags().contains("brand-new"));

        // a second draft of the same label is now a duplicate
        assert!(matches!(
            add_draft_tag(&store, "brand-new"),
            Err(CatalogError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_delete_assets_requires_a_live_id() {
        let store = seeded();
        assert!(matches!(
            delete_assets(&store, &["fill-9".to_string()]),
            Err(CatalogError::NothingToDo)
        ));

        let command =
            delete_assets(&store, &["fill-0".to_string(), "gradient-0".to_string()]).unwrap();
        assert_eq!(command.label, "Delete 2 selected assets");
    }
}
