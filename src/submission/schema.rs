use crate::db::{SheetStore, StoreError};
use crate::models::{Cell, Row};

/// A sheet name and its fixed header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    pub fn header_row(&self) -> Row {
        self.columns.iter().map(|c| Cell::text(*c)).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

pub const NEWSLETTER: TableSchema = TableSchema {
    name: "Newsletter",
    columns: &["Timestamp", "Email"],
};

pub const CALCULATOR_TRACKING: TableSchema = TableSchema {
    name: "Calculator Tracking",
    columns: &[
        "Timestamp",
        "User IP/Session",
        "Appliances Count",
        "Total Daily kWh",
        "Morning Usage %",
        "Afternoon Usage %",
        "Evening Usage %",
        "Night Usage %",
        "Utility Provider",
        "Monthly Savings Estimate",
        "VPP Earnings Estimate",
        "Recommended System",
        "System Price",
        "Payback Period",
    ],
};

pub const SAVINGS_PREVIEW: TableSchema = TableSchema {
    name: "Savings Preview",
    columns: &[
        "Timestamp",
        "User IP/Session",
        "Appliance Count",
        "Estimated Savings",
    ],
};

pub const FORM_SUBMISSIONS: TableSchema = TableSchema {
    name: "Form Submissions",
    columns: &[
        "Timestamp",
        "Name",
        "Email",
        "Phone",
        "Zip Code",
        "User Type",
        "How did you hear about us?",
        "Comments",
        "Want updates?",
        "Want tips?",
        "Interest - Starter Pack",
        "Interest - Home Pack",
        "Interest - Power Pack",
        "Interest - Not sure",
        "Excited - Lower bills",
        "Excited - Making money",
        "Excited - Backup power",
        "Excited - Portable/renter-friendly",
        "Excited - Clean cooking",
        "Excited - Environmental impact",
    ],
};

/// Make sure the sheet exists and starts with its header row.
///
/// The header is written when the sheet has no rows at all, whether it was just
/// created or already existed empty. A sheet with any row is never touched, even
/// if its first row is not the expected header. The check and the write are one store
/// operation, so concurrent first submissions produce a single header. Returns true when
/// the header was written.
pub async fn ensure_schema(store: &dyn SheetStore, schema: &TableSchema) -> Result<bool, StoreError> {
    let written = store.ensure_header(schema.name, &schema.header_row()).await?;
    if written {
        tracing::info!(sheet = schema.name, "Created header row");
    }
    Ok(written)
}
