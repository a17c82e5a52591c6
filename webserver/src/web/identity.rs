//! Actor identity extraction
//!
//! Authentication itself is an upstream black box; by the time a request
//! reaches this process the proxy has stamped the trusted identity
//! headers. Absent or malformed identity rejects with 401.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use leads::LeadError;
use shared::{Actor, Role};

use crate::error::WebServerError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
pub const ACTOR_EMAIL_HEADER: &str = "x-actor-email";

/// Extracted caller identity.
#[derive(Debug, Clone)]
pub struct Identity(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = WebServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let id = header_str(headers, ACTOR_ID_HEADER)
            .ok_or(WebServerError::Lead(LeadError::Unauthorized))?;

        let role = match header_str(headers, ACTOR_ROLE_HEADER) {
            None => Role::User,
            Some(raw) => raw
                .parse()
                .map_err(|_| WebServerError::Lead(LeadError::Unauthorized))?,
        };

        let email = header_str(headers, ACTOR_EMAIL_HEADER).map(str::to_string);

        Ok(Identity(Actor {
            id: id.to_string(),
            role,
            email,
        }))
    }
}

/// Rate-limit origin: forwarded client address, falling back to a
/// localhost marker when no proxy header is present.
pub fn request_origin(headers: &HeaderMap) -> String {
    header_str(headers, "x-forwarded-for")
        .unwrap_or("ipv6-localhost")
        .to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
}
