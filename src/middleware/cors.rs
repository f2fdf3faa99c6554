use axum::http::{request::Parts, HeaderValue};
use once_cell::sync::Lazy;
use regex::Regex;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

static LOCAL_ORIGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(localhost|127\.0\.0\.1)(:\d+)?$").expect("origin pattern is valid")
});

/// True for loopback front ends such as `http://localhost:3000`.
pub fn is_local_origin(origin: &str) -> bool {
    LOCAL_ORIGIN.is_match(origin)
}

/// Credentialed CORS for loopback origins only. Methods and headers are
/// mirrored because wildcards are not allowed together with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _request: &Parts| {
                origin.to_str().map(is_local_origin).unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_origins() {
        assert!(is_local_origin("http://localhost"));
        assert!(is_local_origin("http://localhost:5173"));
        assert!(is_local_origin("https://127.0.0.1:8443"));
        assert!(is_local_origin("http://127.0.0.1"));
    }

    #[test]
    fn test_foreign_origins() {
        assert!(!is_local_origin("http://example.com"));
        assert!(!is_local_origin("http://localhost.evil.com"));
        assert!(!is_local_origin("http://192.168.1.10:3000"));
        assert!(!is_local_origin("ftp://localhost"));
        assert!(!is_local_origin("http://localhost:abc"));
        assert!(!is_local_origin("http://localhost:3000/"));
    }
}
