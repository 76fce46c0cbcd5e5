use axum::http::HeaderMap;
use serde_json::Value;

use super::request::{FormValue, SubmissionRequest};

/// Parse a request body based on Content-Type header.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<SubmissionRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SubmissionRequest::new());
    }

    let ct = content_type.unwrap_or("application/x-www-form-urlencoded");

    if ct.contains("application/json") {
        parse_json(body)
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else if ct.contains("multipart/form-data") {
        Err("Multipart bodies must go through parse_multipart".to_string())
    } else {
        // Try JSON first, then form-urlencoded
        parse_json(body)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}"))
    }
}

/// Parse a URL query string. Query parameters count as submitted fields.
pub fn parse_query(query: Option<&str>) -> SubmissionRequest {
    query
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_form_urlencoded(body: &[u8]) -> Result<SubmissionRequest, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    Ok(form_urlencoded::parse(body_str.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

fn parse_json(body: &[u8]) -> Result<SubmissionRequest, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?;
    let Value::Object(obj) = value else {
        return Err("Expected a JSON object".to_string());
    };

    let mut request = SubmissionRequest::new();
    for (key, value) in obj {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let values = items.iter().filter_map(json_text).collect::<Vec<_>>();
                request.insert(key, FormValue::List(values));
            }
            other => {
                if let Some(text) = json_text(&other) {
                    request.insert(key, FormValue::Scalar(text));
                }
            }
        }
    }
    Ok(request)
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse multipart form data using multer.
pub async fn parse_multipart(
    headers: &HeaderMap,
    body: bytes::Bytes,
) -> Result<SubmissionRequest, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut request = SubmissionRequest::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        request.append(name, value);
    }

    Ok(request)
}
