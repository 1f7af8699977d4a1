use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Rejection raised before any command is built; the store and the history
/// log are left exactly as they were.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no asset with id \"{0}\"")]
    UnknownAsset(String),

    #[error("asset name must not be empty")]
    EmptyName,

    #[error("asset value must not be empty")]
    EmptyValue,

    #[error("label must not be empty")]
    EmptyLabel,

    #[error("label \"{0}\" already exists")]
    DuplicateLabel(String),

    #[error("operation affects no assets")]
    NothingToDo,

    #[error("seed document parse error: {0}")]
    Seed(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
