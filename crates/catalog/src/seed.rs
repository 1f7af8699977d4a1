//! Seed-document loading.
//!
//! The console is seeded once at startup from a JSON export grouped by
//! asset type: fills live under `colours.textColors`, gradients under
//! `gradients`, and patterns under `patterns` with the image `url`
//! standing in for the value. Records are normalized into [`Asset`]s with
//! type-prefixed sequential ids and defaulted label arrays.

use crate::asset::{dedup_labels, Asset, AssetType};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Top-level shape of the seed export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub colours: ColourSection,

    #[serde(default)]
    pub gradients: Vec<SeedRecord>,

    #[serde(default)]
    pub patterns: Vec<SeedPattern>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColourSection {
    #[serde(default, rename = "textColors")]
    pub text_colors: Vec<SeedRecord>,
}

/// Fill or gradient record; `value` carries the colour or gradient spec
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Pattern record; the image URL stands in for the value
#[derive(Debug, Clone, Deserialize)]
pub struct SeedPattern {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl SeedDocument {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Normalize into assets with sequential per-type ids, in document
    /// order. Records whose name or value trim to blank are skipped with a
    /// warning rather than failing the whole seed.
    #[must_use]
    pub fn into_assets(self) -> Vec<Asset> {
        let mut assets = Vec::new();

        collect(
            &mut assets,
            AssetType::Fill,
            self.colours
                .text_colors
                .into_iter()
                .map(|record| (record.name, record.value, record.tags, record.groups)),
        );
        collect(
            &mut assets,
            AssetType::Gradient,
            self.gradients
                .into_iter()
                .map(|record| (record.name, record.value, record.tags, record.groups)),
        );
        collect(
            &mut assets,
            AssetType::Pattern,
            self.patterns
                .into_iter()
                .map(|record| (record.name, record.url, record.tags, record.groups)),
        );

        assets
    }
}

/// Load a seed file and normalize it in one step
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Asset>> {
    Ok(SeedDocument::from_path(path)?.into_assets())
}

fn collect<I>(assets: &mut Vec<Asset>, kind: AssetType, records: I)
where
    I: Iterator<Item = (String, String, Vec<String>, Vec<String>)>,
{
    let mut serial = 0u64;
    for (name, value, tags, groups) in records {
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            log::warn!("skipping {kind} seed record with blank name or value");
            continue;
        }

        assets.push(Asset {
            id: format!("{}-{serial}", kind.as_str()),
            kind,
            name: name.to_string(),
            value: value.to_string(),
            tags: dedup_labels(tags),
            groups: dedup_labels(groups),
        });
        serial += 1;
    }
}
