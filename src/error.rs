use crate::db::StoreError;

/// Any failure while turning a request into a stored row.
#[derive(Debug)]
pub enum SubmissionFailure {
    MalformedBody(String),
    Storage(StoreError),
}

impl std::fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionFailure::MalformedBody(msg) => write!(f, "Malformed submission: {msg}"),
            SubmissionFailure::Storage(err) => write!(f, "Storage Error: {err}"),
        }
    }
}

impl std::error::Error for SubmissionFailure {}

impl From<StoreError> for SubmissionFailure {
    fn from(err: StoreError) -> Self {
        SubmissionFailure::Storage(err)
    }
}
