use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, RawQuery, State};
use axum::http::HeaderMap;

use crate::error::SubmissionFailure;
use crate::response::ResponseEnvelope;
use crate::state::SharedState;
use crate::submission::{SubmissionRequest, metadata, parser, pipeline};

pub const LIVENESS_MESSAGE: &str =
    "Form submission service is running. Use POST requests to submit data.";

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> ResponseEnvelope {
    let client = metadata::extract(&headers, Some(addr.ip()), &state.config.trusted_proxies);

    let outcome = match read_request(&headers, query.as_deref(), body).await {
        Ok(request) => pipeline::classify_and_handle(state.store.as_ref(), &request).await,
        Err(failure) => Err(failure),
    };

    match outcome {
        Ok(envelope) => {
            tracing::info!(ip = %client.ip, message = %envelope.message, "Submission accepted");
            envelope
        }
        Err(failure) => {
            tracing::error!(
                ip = %client.ip,
                user_agent = %client.user_agent,
                referer = %client.referer,
                "Submission failed: {failure}"
            );
            ResponseEnvelope::from(failure)
        }
    }
}

/// Body fields plus query parameters; the body wins on conflicting names.
async fn read_request(
    headers: &HeaderMap,
    query: Option<&str>,
    body: Bytes,
) -> Result<SubmissionRequest, SubmissionFailure> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let mut request = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
        parser::parse_multipart(headers, body).await
    } else {
        parser::parse_body(content_type, &body)
    }
    .map_err(SubmissionFailure::MalformedBody)?;

    request.merge_missing(parser::parse_query(query));
    Ok(request)
}
