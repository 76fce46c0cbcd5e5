use crate::db::SheetStore;
use crate::error::SubmissionFailure;
use crate::models::Row;
use crate::response::ResponseEnvelope;

use super::kind::SubmissionKind;
use super::normalize;
use super::request::SubmissionRequest;
use super::schema;

/// Classify a submission and append it as one row to its sheet.
pub async fn classify_and_handle(
    store: &dyn SheetStore,
    request: &SubmissionRequest,
) -> Result<ResponseEnvelope, SubmissionFailure> {
    let kind = SubmissionKind::classify(request);
    let sheet = kind.schema();

    schema::ensure_schema(store, sheet).await?;

    let row = build_row(kind, request);
    debug_assert_eq!(row.len(), sheet.width(), "row width for {}", sheet.name);

    store.append_row(sheet.name, &row).await?;

    tracing::debug!(?kind, sheet = sheet.name, fields = request.len(), "Submission recorded");

    Ok(ResponseEnvelope::success(kind.success_message()))
}

pub fn build_row(kind: SubmissionKind, request: &SubmissionRequest) -> Row {
    match kind {
        SubmissionKind::Newsletter => normalize::newsletter(request),
        SubmissionKind::CalculatorTracking => normalize::calculator_tracking(request),
        SubmissionKind::SavingsPreviewTracking => normalize::savings_preview(request),
        SubmissionKind::InterestForm => normalize::interest_form(request),
    }
}
