//! Shape a submission into the ordered row of its sheet.
//!
//! Every value is carried as opaque text. Missing fields become empty cells, so a
//! row always has exactly one cell per column with the timestamp first.

use crate::models::{Cell, Row};

use super::request::SubmissionRequest;

const CHECKED: &str = "on";
const YES: &str = "Yes";
const UNKNOWN_SESSION: &str = "Unknown";

const CALCULATOR_FIELDS: [&str; 12] = [
    "appliances_count",
    "total_kwh",
    "morning_usage",
    "afternoon_usage",
    "evening_usage",
    "night_usage",
    "utility",
    "monthly_savings",
    "vpp_earnings",
    "recommended_system",
    "system_price",
    "payback_period",
];

const SAVINGS_PREVIEW_FIELDS: [&str; 2] = ["appliance_count", "estimated_savings"];

const TEXT_FIELDS: [&str; 7] = [
    "name",
    "email",
    "phone",
    "zipcode",
    "user_type",
    "source",
    "comments",
];

const SINGLE_CHECKBOX_FIELDS: [&str; 2] = ["updates", "tips"];

/// A checkbox group exploded into one column per option.
pub struct CheckboxGroup {
    pub field: &'static str,
    pub options: &'static [&'static str],
}

pub const INTEREST: CheckboxGroup = CheckboxGroup {
    field: "interest",
    options: &["starter", "home", "power", "notsure"],
};

pub const EXCITED: CheckboxGroup = CheckboxGroup {
    field: "excited",
    options: &["bills", "money", "backup", "portable", "cooking", "environment"],
};

pub fn newsletter(request: &SubmissionRequest) -> Row {
    vec![Cell::now(), Cell::text(request.text("email"))]
}

pub fn calculator_tracking(request: &SubmissionRequest) -> Row {
    let mut row = Vec::with_capacity(CALCULATOR_FIELDS.len() + 2);
    row.push(Cell::now());
    row.push(Cell::text(session_id(request)));
    row.extend(CALCULATOR_FIELDS.iter().map(|f| Cell::text(request.text(f))));
    row
}

pub fn savings_preview(request: &SubmissionRequest) -> Row {
    let mut row = Vec::with_capacity(SAVINGS_PREVIEW_FIELDS.len() + 2);
    row.push(Cell::now());
    row.push(Cell::text(session_id(request)));
    row.extend(SAVINGS_PREVIEW_FIELDS.iter().map(|f| Cell::text(request.text(f))));
    row
}

pub fn interest_form(request: &SubmissionRequest) -> Row {
    let mut row = Vec::with_capacity(20);
    row.push(Cell::now());
    row.extend(TEXT_FIELDS.iter().map(|f| Cell::text(request.text(f))));
    row.extend(
        SINGLE_CHECKBOX_FIELDS
            .iter()
            .map(|f| yes_or_empty(request.is(f, CHECKED))),
    );
    for group in [&INTEREST, &EXCITED] {
        row.extend(
            group
                .options
                .iter()
                .map(|option| yes_or_empty(request.contains(group.field, option))),
        );
    }
    row
}

/// `user_session`, then `ip`, then a fixed placeholder. Empty values count as absent.
pub fn session_id(request: &SubmissionRequest) -> &str {
    request
        .non_empty("user_session")
        .or_else(|| request.non_empty("ip"))
        .unwrap_or(UNKNOWN_SESSION)
}

fn yes_or_empty(checked: bool) -> Cell {
    if checked { Cell::text(YES) } else { Cell::empty() }
}
