use crate::asset::Asset;
use crate::store::CatalogStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One executed, invertible unit of mutation. Immutable once built; owned
/// by the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Human-readable description shown in the history view
    pub label: String,

    /// Wall-clock milliseconds since the Unix epoch at build time
    pub timestamp_ms: u64,

    pub kind: CommandKind,
}

impl Command {
    pub(crate) fn apply(&self, store: &mut CatalogStore) {
        self.kind.apply(store);
    }

    pub(crate) fn revert(&self, store: &mut CatalogStore) {
        self.kind.revert(store);
    }
}

/// Tagged mutation carrying the explicit before-state needed to invert it.
///
/// `apply`/`revert` dispatch on the tag rather than on stored closures,
/// which keeps the log inspectable and serializable. Bulk variants snapshot
/// the prior label sequence per affected id so undo restores each asset
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandKind {
    UpdateAsset {
        id: String,
        before: Asset,
        after: Asset,
    },
    AddAsset {
        asset: Asset,
    },
    RemoveAsset {
        asset: Asset,
    },
    RenameTag {
        old: String,
        new: String,
        before: BTreeMap<String, Vec<String>>,
    },
    RenameGroup {
        old: String,
        new: String,
        before: BTreeMap<String, Vec<String>>,
    },
    BulkAddTag {
        tag: String,
        before: BTreeMap<String, Vec<String>>,
    },
    BulkRemoveTag {
        tag: String,
        before: BTreeMap<String, Vec<String>>,
    },
    BulkAddGroup {
        group: String,
        before: BTreeMap<String, Vec<String>>,
    },
    BulkRemoveGroup {
        group: String,
        before: BTreeMap<String, Vec<String>>,
    },
    DeleteAssets {
        before: Vec<Asset>,
    },
    AddDraftTag {
        tag: String,
    },
    AddDraftGroup {
        group: String,
    },
}

impl CommandKind {
    fn apply(&self, store: &mut CatalogStore) {
        match self {
            Self::UpdateAsset { id, after, .. } => {
                store.replace_asset(id, after.clone());
            }
            Self::AddAsset { asset } => {
                store.insert_asset(asset.clone());
            }
            Self::RemoveAsset { asset } => {
                store.take_asset(&asset.id);
            }
            Self::RenameTag { old, new, before } => {
                for (id, prior) in before {
                    store.set_tags(id, replace_label(prior, old, new));
                }
            }
            Self::RenameGroup { old, new, before } => {
                for (id, prior) in before {
                    store.set_groups(id, replace_label(prior, old, new));
                }
            }
            Self::BulkAddTag { tag, before } => {
                for (id, prior) in before {
                    store.set_tags(id, push_label(prior, tag));
                }
            }
            Self::BulkRemoveTag { tag, before } => {
                for (id, prior) in before {
                    store.set_tags(id, drop_label(prior, tag));
                }
            }
            Self::BulkAddGroup { group, before } => {
                for (id, prior) in before {
                    store.set_groups(id, push_label(prior, group));
                }
            }
            Self::BulkRemoveGroup { group, before } => {
                for (id, prior) in before {
                    store.set_groups(id, drop_label(prior, group));
                }
            }
            Self::DeleteAssets { before } => {
                for asset in before {
                    store.take_asset(&asset.id);
                }
            }
            Self::AddDraftTag { tag } => {
                store.insert_draft_tag(tag);
            }
            Self::AddDraftGroup { group } => {
                store.insert_draft_group(group);
            }
        }
    }

    fn revert(&self, store: &mut CatalogStore) {
        match self {
            Self::UpdateAsset { id, before, .. } => {
                store.replace_asset(id, before.clone());
            }
            Self::AddAsset { asset } => {
                store.take_asset(&asset.id);
            }
            Self::RemoveAsset { asset } => {
                store.insert_asset(asset.clone());
            }
            Self::RenameTag { before, .. }
            | Self::BulkAddTag { before, .. }
            | Self::BulkRemoveTag { before, .. } => {
                for (id, prior) in before {
                    store.set_tags(id, prior.clone());
                }
            }
            Self::RenameGroup { before, .. }
            | Self::BulkAddGroup { before, .. }
            | Self::BulkRemoveGroup { before, .. } => {
                for (id, prior) in before {
                    store.set_groups(id, prior.clone());
                }
            }
            Self::DeleteAssets { before } => {
                for asset in before {
                    store.insert_asset(asset.clone());
                }
            }
            Self::AddDraftTag { tag } => {
                store.remove_draft_tag(tag);
            }
            Self::AddDraftGroup { group } => {
                store.remove_draft_group(group);
            }
        }
    }
}

/// Replace `old` with `new` in place, preserving the position of every
/// other label
fn replace_label(labels: &[String], old: &str, new: &str) -> Vec<String> {
    labels
        .iter()
        .map(|label| {
            if label == old {
                new.to_string()
            } else {
                label.clone()
            }
        })
        .collect()
}

/// Add-if-absent: append `label` unless already present
fn push_label(labels: &[String], label: &str) -> Vec<String> {
    let mut next: Vec<String> = labels.to_vec();
    if !next.iter().any(|existing| existing == label) {
        next.push(label.to_string());
    }
    next
}

/// Remove-if-present: drop every occurrence of `label`
fn drop_label(labels: &[String], label: &str) -> Vec<String> {
    labels
        .iter()
        .filter(|existing| existing.as_str() != label)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_replace_label_keeps_order() {
        assert_eq!(
            replace_label(&labels(&["a", "old", "b"]), "old", "new"),
            labels(&["a", "new", "b"])
        );
    }

    #[test]
    fn test_push_label_is_add_if_absent() {
        assert_eq!(push_label(&labels(&["a"]), "b"), labels(&["a", "b"]));
        assert_eq!(push_label(&labels(&["a", "b"]), "b"), labels(&["a", "b"]));
    }

    #[test]
    fn test_drop_label_is_remove_if_present() {
        assert_eq!(drop_label(&labels(&["a", "b"]), "b"), labels(&["a"]));
        assert_eq!(drop_label(&labels(&["a"]), "b"), labels(&["a"]));
    }
}
