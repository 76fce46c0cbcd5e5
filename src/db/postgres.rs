use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{Cell, SheetRow};

use super::{SheetStore, StoreError};

/// Sheets stored in Postgres: one `sheets` row per sheet, one `sheet_rows` row per
/// appended row with the cells kept as a JSON array.
#[derive(Clone)]
pub struct PgSheetStore {
    pool: PgPool,
}

impl PgSheetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SheetStore for PgSheetStore {
    async fn ensure_sheet(&self, name: &str) -> Result<(), StoreError> {
        create_sheet(&self.pool, name).await?;
        Ok(())
    }

    async fn append_row(&self, name: &str, row: &[Cell]) -> Result<(), StoreError> {
        let cells = serde_json::to_value(row).map_err(|e| StoreError::Encode(e.to_string()))?;
        append(&self.pool, name, &cells).await
    }

    async fn ensure_header(&self, name: &str, header: &[Cell]) -> Result<bool, StoreError> {
        let cells = serde_json::to_value(header).map_err(|e| StoreError::Encode(e.to_string()))?;
        write_header(&self.pool, name, &cells).await
    }

    async fn row_count(&self, name: &str) -> Result<u64, StoreError> {
        let count = count(&self.pool, name).await?;
        Ok(count.max(0) as u64)
    }
}

/// Returns true when the sheet was created by this call.
pub async fn create_sheet(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("INSERT INTO sheets (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn append(pool: &PgPool, sheet: &str, cells: &serde_json::Value) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;

    if !lock_sheet(&mut tx, sheet).await? {
        return Err(StoreError::MissingSheet(sheet.to_string()));
    }

    let (last,): (i64,) =
        sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM sheet_rows WHERE sheet = $1")
            .bind(sheet)
            .fetch_one(&mut *tx)
            .await?;

    insert_row(&mut tx, sheet, last + 1, cells).await?;

    tx.commit().await?;
    Ok(())
}

/// Create the sheet if needed and write `cells` as its first row when it has none.
/// Returns true when the header was written.
pub async fn write_header(pool: &PgPool, sheet: &str, cells: &serde_json::Value) -> Result<bool, StoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO sheets (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(sheet)
        .execute(&mut *tx)
        .await?;

    if !lock_sheet(&mut tx, sheet).await? {
        return Err(StoreError::MissingSheet(sheet.to_string()));
    }

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sheet_rows WHERE sheet = $1")
        .bind(sheet)
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    insert_row(&mut tx, sheet, 1, cells).await?;

    tx.commit().await?;
    Ok(true)
}

/// Row lock on the sheet; serializes writers to it until the transaction ends.
async fn lock_sheet(tx: &mut Transaction<'_, Postgres>, sheet: &str) -> Result<bool, sqlx::Error> {
    let locked: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sheets WHERE name = $1 FOR UPDATE")
            .bind(sheet)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(locked.is_some())
}

async fn insert_row(
    tx: &mut Transaction<'_, Postgres>,
    sheet: &str,
    position: i64,
    cells: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sheet_rows (id, sheet, position, cells)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::now_v7())
    .bind(sheet)
    .bind(position)
    .bind(cells)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn count(pool: &PgPool, sheet: &str) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sheet_rows WHERE sheet = $1")
        .bind(sheet)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn list_rows(pool: &PgPool, sheet: &str) -> Result<Vec<SheetRow>, sqlx::Error> {
    sqlx::query_as::<_, SheetRow>(
        "SELECT * FROM sheet_rows WHERE sheet = $1 ORDER BY position ASC",
    )
    .bind(sheet)
    .fetch_all(pool)
    .await
}
