//! Authentication for the HTTP server.
//!
//! Mutating commands require a bearer token; lookups stay open. Because the
//! check depends on which command is invoked, it runs inside the invoke
//! handler rather than as route middleware.

use axum::http::{header, HeaderMap};

/// Extract bearer token from the Authorization header.
///
/// Looks for header in format: `Authorization: Bearer <token>`
/// Returns None if header is missing, malformed, or uses a different auth scheme.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

// ============================================================================
// TESTS
// ============================================================================
