//! Security headers middleware.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Adds security headers to all responses.
///
/// `Strict-Transport-Security` is only emitted when
/// `WM__SECURITY__HSTS_ENABLED=true`, since HSTS must not be sent before
/// HTTPS termination is in place.
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );

    headers.insert(
        header::HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );

    if std::env::var("WM__SECURITY__HSTS_ENABLED")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
    {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values_parse() {
        assert!(HeaderValue::from_static("nosniff").to_str().is_ok());
        assert!(HeaderValue::from_static("DENY").to_str().is_ok());
        assert!(HeaderValue::from_static("1; mode=block").to_str().is_ok());
    }

    #[test]
    fn test_hsts_flag_parsing() {
        for (input, expected) in [("true", true), ("TRUE", true), ("false", false), ("1", false)] {
            assert_eq!(input.to_lowercase() == "true", expected);
        }
    }
}
