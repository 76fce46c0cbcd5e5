use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SheetRow {
    pub id: Uuid,
    pub sheet: String,
    pub position: i64,
    pub cells: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
