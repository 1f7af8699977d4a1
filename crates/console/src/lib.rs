//! # Asset Console
//!
//! Session facade over the asset catalogue: filters, fuzzy search,
//! selection, and the derived view the presentation layer renders.
//!
//! ## Pipeline
//!
//! ```text
//! CatalogStore + drafts
//!     │
//!     ├──> FilterState::matches   (type/tag/group, AND across categories)
//!     │      └─> survivors
//!     ├──> FuzzySearch::rank      (blank query passes through unchanged)
//!     │      └─> display order
//!     └──> Selection annotation   (ghost selections persist off-filter)
//!            └─> ViewState rows + all-labels + counts
//! ```

mod filter;
mod selection;
mod session;
mod view;

pub use asset_catalog::{CatalogError, Result};
pub use filter::FilterState;
pub use selection::Selection;
pub use session::Session;
pub use view::{derive_view, AssetRow, ViewState};
