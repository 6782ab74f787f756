// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction.
//!
//! Callers present their identity in the `x-participant-id` header and,
//! optionally, a display name in `x-participant-name`. The values are handed
//! to the identity stub in the API layer.

use axum::{extract::FromRequestParts, http::request::Parts};
use quiz_room_api::{AuthError, AuthenticatedParticipant, authenticate_stub};
use tracing::{debug, warn};

use crate::HttpError;

/// Header carrying the caller's stable identity.
pub const PARTICIPANT_ID_HEADER: &str = "x-participant-id";

/// Header carrying the caller's preferred display name.
pub const PARTICIPANT_NAME_HEADER: &str = "x-participant-name";

/// Extractor for an identified caller.
///
/// Rejects with 401 when the identity header is missing, blank, too long or
/// not valid UTF-8.
pub struct Participant(pub AuthenticatedParticipant);

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, AuthError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Header is not valid UTF-8");
                AuthError::InvalidIdentity {
                    reason: format!("Header '{name}' is not valid UTF-8"),
                }
            })
        })
        .transpose()
}

impl<S> FromRequestParts<S> for Participant
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let participant_id: Option<&str> = header_value(parts, PARTICIPANT_ID_HEADER)?;
        let display_name: Option<&str> = header_value(parts, PARTICIPANT_NAME_HEADER)?;

        let participant: AuthenticatedParticipant =
            authenticate_stub(participant_id, display_name)
                .inspect_err(|e| debug!(error = %e, "Caller identification failed"))?;

        debug!(identity = %participant.identity, "Caller identified");
        Ok(Self(participant))
    }
}
