// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction.
//!
//! Authentication happens upstream. The gateway forwards the verified
//! caller in two headers, which this extractor turns into an
//! `AuthenticatedActor`.

use axum::{extract::FromRequestParts, http::request::Parts};
use servicedesk_api::AuthenticatedActor;
use servicedesk_domain::Role;
use tracing::{debug, warn};

use crate::error::HttpError;

/// Header carrying the caller's directory user id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the caller's role, e.g. `SUPPORT_STAFF`.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the calling actor.
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing, not valid text, or
/// names an unknown role.
pub struct CallerActor(pub AuthenticatedActor);

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, HttpError> {
    let value: &str = parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing identity header");
            HttpError::unauthorized(format!("Missing {name} header"))
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Identity header is not valid text");
            HttpError::unauthorized(format!("Invalid {name} header"))
        })?
        .trim();

    if value.is_empty() {
        return Err(HttpError::unauthorized(format!("Empty {name} header")));
    }
    Ok(value)
}

impl<S: Send + Sync> FromRequestParts<S> for CallerActor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id: &str = header_value(parts, ACTOR_ID_HEADER)?;
        let role_text: String = header_value(parts, ACTOR_ROLE_HEADER)?.to_ascii_uppercase();
        let role: Role = role_text.parse().map_err(|_| {
            warn!(actor_id = id, role = %role_text, "Unknown role in identity header");
            HttpError::unauthorized(format!("Unknown role '{role_text}'"))
        })?;

        Ok(Self(AuthenticatedActor::new(id, role)))
    }
}
