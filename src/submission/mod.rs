pub mod kind;
pub mod metadata;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod request;
pub mod schema;

pub use kind::SubmissionKind;
pub use request::{FormValue, SubmissionRequest};
pub use schema::TableSchema;
