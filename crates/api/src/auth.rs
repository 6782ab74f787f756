// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity resolution.
//!
//! Real authentication lives outside this system. The stub here trusts the
//! identity the caller presents and only checks that it is usable.

use quiz_room_domain::Identity;

use crate::error::AuthError;

/// Maximum accepted identity length, in characters.
const MAX_IDENTITY_LEN: usize = 128;

/// A caller whose identity has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedParticipant {
    /// Stable identity used as `host` and roster key.
    pub identity: Identity,
    /// Name supplied by the identity provider, if any.
    pub display_name: Option<String>,
}

impl AuthenticatedParticipant {
    #[must_use]
    pub const fn new(identity: Identity, display_name: Option<String>) -> Self {
        Self {
            identity,
            display_name,
        }
    }

    /// Name to seat the participant under: the explicit one if given,
    /// otherwise the provider's, otherwise the identity itself.
    #[must_use]
    pub fn resolve_display_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_else(|| self.identity.value())
            .to_string()
    }
}

/// Stub identity provider.
///
/// # Arguments
///
/// * `participant_id` - The identity presented by the caller
/// * `display_name` - An optional name presented by the caller
///
/// # Errors
///
/// Returns an error if the identity is missing, blank or too long.
pub fn authenticate_stub(
    participant_id: Option<&str>,
    display_name: Option<&str>,
) -> Result<AuthenticatedParticipant, AuthError> {
    let raw: &str = participant_id.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AuthError::MissingIdentity);
    }
    if raw.chars().count() > MAX_IDENTITY_LEN {
        return Err(AuthError::InvalidIdentity {
            reason: format!("Identity cannot exceed {MAX_IDENTITY_LEN} characters"),
        });
    }

    Ok(AuthenticatedParticipant::new(
        Identity::new(raw),
        display_name.map(str::to_string),
    ))
}
