pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::Cell;

pub use memory::MemorySheetStore;
pub use postgres::PgSheetStore;

#[derive(Debug)]
pub enum StoreError {
    MissingSheet(String),
    Encode(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::MissingSheet(name) => write!(f, "Sheet does not exist: {name}"),
            StoreError::Encode(msg) => write!(f, "Failed to encode row: {msg}"),
            StoreError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Append-only storage of named sheets.
///
/// Implementations serialize concurrent appends to the same sheet; callers hold
/// no locks across these calls.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Create the sheet if it does not exist. Calling it for an existing sheet is a no-op.
    async fn ensure_sheet(&self, name: &str) -> Result<(), StoreError>;

    /// Append one row at the end of an existing sheet.
    async fn append_row(&self, name: &str, row: &[Cell]) -> Result<(), StoreError>;

    /// Create the sheet if needed and append `header` iff the sheet has no rows, as one
    /// atomic step. Returns true when the header was written.
    async fn ensure_header(&self, name: &str, header: &[Cell]) -> Result<bool, StoreError>;

    /// Number of rows in the sheet, header included. Zero for a missing sheet.
    async fn row_count(&self, name: &str) -> Result<u64, StoreError>;
}
