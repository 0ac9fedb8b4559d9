//! Request ID middleware for log correlation.

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the caller's request ID when it sent one, otherwise mint a UUID.
fn get_or_generate_request_id(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware that tags every request and response with an `x-request-id`
/// header and logs request start/completion under that ID.
pub async fn request_id_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let request_id = get_or_generate_request_id(request.headers());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, header_value);
    }

    tracing::info!(
        request_id = %request_id,
        status = %parts.status,
        "Request completed"
    );

    Ok(Response::from_parts(parts, body))
}

/// Request ID stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_existing_request_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("test-id-123"));

        assert_eq!(get_or_generate_request_id(&headers), "test-id-123");
    }

    #[test]
    fn test_missing_request_id_generates_uuid() {
        let headers = HeaderMap::new();
        let request_id = get_or_generate_request_id(&headers);

        assert!(Uuid::parse_str(&request_id).is_ok());
    }
}
