use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single display value in a sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn now() -> Self {
        Cell::Timestamp(Utc::now())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Timestamp(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

pub type Row = Vec<Cell>;
