use axum_extra::extract::cookie::CookieJar;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use std::collections::HashMap;

/// Name of the cookie carrying a provider-issued session credential.
pub const SESSION_COOKIE: &str = "session";

/// A candidate credential parsed off an inbound request. Nothing is
/// validated here; malformed values are passed through to the verifier,
/// which is responsible for rejecting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    SessionCookie(String),
    BearerToken(String),
}

impl Credential {
    /// Returns the credentials present on a request, in verification
    /// precedence order: session cookie first, then bearer token.
    /// Absence of credentials is a valid (empty) result.
    pub fn extract(headers: &HeaderMap) -> Vec<Credential> {
        let mut credentials = Vec::new();

        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            credentials.push(Credential::SessionCookie(cookie.value().to_string()));
        }

        if let Some(token) = bearer_token(headers) {
            credentials.push(Credential::BearerToken(token));
        }

        credentials
    }
}

/// Extracts a bearer token from the `authorization` header: the header
/// value must contain "bearer" case-insensitively, and the token is the
/// second whitespace-separated word. A bare "Bearer" with no token
/// yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    if !value.to_lowercase().contains("bearer") {
        return None;
    }
    value.split(' ').nth(1).map(str::to_string)
}

/// Parses the request's cookies into a plain map for response echoing.
pub fn cookie_map(headers: &HeaderMap) -> HashMap<String, String> {
    CookieJar::from_headers(headers)
        .iter()
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect()
}

/// Echoes request headers as a string map, skipping values that are
/// not valid UTF-8.
pub fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
