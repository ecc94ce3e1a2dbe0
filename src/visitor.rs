use crate::credentials::bearer_token;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use http::header::SET_COOKIE;
use http::{HeaderValue, Method};
use log::warn;
use uuid::Uuid;

/// Name of the cookie carrying the anonymous visitor identifier.
pub const USERID_COOKIE: &str = "userid";

/// Per-request context populated by the visitor middleware: a stable
/// anonymous identifier and the raw (unverified) bearer token, if any.
/// No authorization semantics attach to either.
#[derive(Debug, Clone)]
pub struct VisitorContext {
    pub visitor_id: String,
    pub id_token: Option<String>,
}

/// Assigns a visitor identifier per browser, forwards the bearer token
/// into request extensions, and honors the `_method` query-parameter
/// override for clients limited to GET/POST. When the request carried
/// no `userid` cookie, the response gets a session-lifetime
/// `Set-Cookie: userid=<uuid>; Path=/; HttpOnly` so the browser is
/// recognised on return visits. A previously assigned identifier is
/// never mutated.
pub async fn visitor_context_middleware(mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let existing = jar.get(USERID_COOKIE).map(|c| c.value().to_string());
    let visitor_id = existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let context = VisitorContext {
        visitor_id: visitor_id.clone(),
        id_token: bearer_token(request.headers()),
    };
    request.extensions_mut().insert(context);

    if let Some(method) = method_override(&request) {
        *request.method_mut() = method;
    }

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = Cookie::build((USERID_COOKIE, visitor_id))
            .path("/")
            .http_only(true)
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Failed to encode visitor cookie: {}", e),
        }
    }

    response
}

/// Reads a `_method` query parameter and parses its uppercased value
/// as the effective HTTP method. Unparseable values are ignored.
fn method_override(request: &Request) -> Option<Method> {
    let query = request.uri().query()?;
    let (_, value) = url::form_urlencoded::parse(query.as_bytes()).find(|(k, _)| k == "_method")?;
    match Method::from_bytes(value.to_uppercase().as_bytes()) {
        Ok(method) => Some(method),
        Err(_) => {
            warn!("Ignoring invalid _method override: {}", value);
            None
        }
    }
}
