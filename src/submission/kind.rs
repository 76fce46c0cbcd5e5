use super::request::SubmissionRequest;
use super::schema::{self, TableSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Newsletter,
    CalculatorTracking,
    SavingsPreviewTracking,
    InterestForm,
}

impl SubmissionKind {
    /// First matching rule wins; anything unrecognized is an interest form.
    pub fn classify(request: &SubmissionRequest) -> Self {
        if request.is("newsletter", "yes") {
            SubmissionKind::Newsletter
        } else if request.is("tracking_type", "calculator") {
            SubmissionKind::CalculatorTracking
        } else if request.is("tracking_type", "savings_preview") {
            SubmissionKind::SavingsPreviewTracking
        } else {
            SubmissionKind::InterestForm
        }
    }

    pub fn schema(self) -> &'static TableSchema {
        match self {
            SubmissionKind::Newsletter => &schema::NEWSLETTER,
            SubmissionKind::CalculatorTracking => &schema::CALCULATOR_TRACKING,
            SubmissionKind::SavingsPreviewTracking => &schema::SAVINGS_PREVIEW,
            SubmissionKind::InterestForm => &schema::FORM_SUBMISSIONS,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            SubmissionKind::Newsletter => "Newsletter subscription successful",
            SubmissionKind::CalculatorTracking => "Calculator tracking recorded",
            SubmissionKind::SavingsPreviewTracking => "Savings preview tracking recorded",
            SubmissionKind::InterestForm => "Form submitted successfully",
        }
    }
}
