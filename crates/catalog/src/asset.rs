use serde::{Deserialize, Serialize};

/// Kind of visual asset held in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Flat colour fill
    Fill,
    /// Gradient spec string
    Gradient,
    /// Image pattern referenced by URL
    Pattern,
}

impl AssetType {
    pub const ALL: [Self; 3] = [Self::Fill, Self::Gradient, Self::Pattern];

    /// Lowercase name; doubles as the id prefix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Gradient => "gradient",
            Self::Pattern => "pattern",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued visual asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique `<type>-<serial>` id; never changes once assigned
    pub id: String,

    /// Asset kind; fixed at creation because the id prefix encodes it
    pub kind: AssetType,

    /// Display name
    pub name: String,

    /// Raw colour, gradient spec, or pattern URL
    pub value: String,

    /// Free-form labels, ordered, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,

    /// Collection labels, ordered, no duplicates
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Fields for an asset that has not been inserted yet; the store assigns
/// the id when the add command is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub kind: AssetType,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl NewAsset {
    pub fn new(kind: AssetType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            tags: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Builder: set tags
    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builder: set groups
    #[must_use]
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }
}

/// Partial update for a single asset; `None` fields keep their current
/// value. Id and kind are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    pub tags: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
}

impl AssetPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: set tags
    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Builder: set groups
    #[must_use]
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Merge into `asset`, producing the patched record. Name and value are
    /// trimmed; label lists are de-duplicated keeping the first occurrence.
    #[must_use]
    pub fn apply_to(&self, asset: &Asset) -> Asset {
        let mut next = asset.clone();
        if let Some(name) = &self.name {
            next.name = name.trim().to_string();
        }
        if let Some(value) = &self.value {
            next.value = value.trim().to_string();
        }
        if let Some(tags) = &self.tags {
            next.tags = dedup_labels(tags.clone());
        }
        if let Some(groups) = &self.groups {
            next.groups = dedup_labels(groups.clone());
        }
        next
    }
}

/// Drop duplicate labels, keeping the first occurrence in order
#[must_use]
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
