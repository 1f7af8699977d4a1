//! # Asset Catalog
//!
//! In-memory catalogue of visual assets (fills, gradients, patterns) with
//! every mutation modeled as a reversible command.
//!
//! ## Architecture
//!
//! ```text
//! Seed JSON
//!     │
//!     ├──> SeedDocument ─> Asset[] ─> CatalogStore (id -> Asset, drafts)
//!     │
//! Operation request
//!     │
//!     ├──> ops::* builder (validate, snapshot before-state)
//!     │      └─> Command { label, timestamp, CommandKind }
//!     │
//!     └──> History::execute (apply, truncate undone suffix, append)
//!            └─> History::undo (revert, move cursor back)
//! ```
//!
//! Rejections (blank fields, duplicate labels, zero affected assets) are
//! raised by the builders before a command exists, so the log never holds
//! inert entries.

mod asset;
mod command;
mod error;
mod history;
pub mod ops;
mod seed;
mod store;

pub use asset::{dedup_labels, Asset, AssetPatch, AssetType, NewAsset};
pub use command::{Command, CommandKind};
pub use error::{CatalogError, Result};
pub use history::History;
pub use seed::{load as load_seed, ColourSection, SeedDocument, SeedPattern, SeedRecord};
pub use store::CatalogStore;
