use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{Cell, Row};

use super::{SheetStore, StoreError};

/// Process-local sheet storage. Contents are lost on restart.
#[derive(Default)]
pub struct MemorySheetStore {
    sheets: DashMap<String, Vec<Row>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a sheet's rows, header included.
    pub fn rows(&self, name: &str) -> Option<Vec<Row>> {
        self.sheets.get(name).map(|rows| rows.value().clone())
    }

    pub fn sheet_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sheets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn ensure_sheet(&self, name: &str) -> Result<(), StoreError> {
        self.sheets.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn append_row(&self, name: &str, row: &[Cell]) -> Result<(), StoreError> {
        let mut rows = self
            .sheets
            .get_mut(name)
            .ok_or_else(|| StoreError::MissingSheet(name.to_string()))?;
        rows.push(row.to_vec());
        Ok(())
    }

    async fn ensure_header(&self, name: &str, header: &[Cell]) -> Result<bool, StoreError> {
        // The entry guard holds the shard lock across the check and the push.
        let mut rows = self.sheets.entry(name.to_string()).or_default();
        if !rows.is_empty() {
            return Ok(false);
        }
        rows.push(header.to_vec());
        Ok(true)
    }

    async fn row_count(&self, name: &str) -> Result<u64, StoreError> {
        Ok(self
            .sheets
            .get(name)
            .map(|rows| rows.len() as u64)
            .unwrap_or(0))
    }
}
