// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use quiz_room::CoreError;
use quiz_room_domain::DomainError;
use quiz_room_persistence::PersistenceError;
use tracing::error;

/// Identity resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity was supplied.
    MissingIdentity,
    /// The supplied identity cannot be used.
    InvalidIdentity {
        /// Why the identity was rejected.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIdentity => write!(f, "No participant identity was provided"),
            Self::InvalidIdentity { reason } => write!(f, "Invalid participant identity: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// Every failure a caller can observe is one of these kinds. Lower layer
/// errors are translated explicitly and never leak through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A room, question set or roster entry does not exist.
    #[error("{resource} not found: {message}")]
    NotFound {
        /// The kind of resource that was looked up.
        resource: String,
        message: String,
    },
    /// The caller lacks the required role.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },
    /// The request conflicts with the room's current state.
    #[error("Conflict ({rule}): {message}")]
    Conflict {
        /// Machine-readable name of the rule that was violated.
        rule: String,
        message: String,
    },
    /// The request payload is malformed.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },
    /// The caller could not be identified.
    #[error("Unauthenticated: {reason}")]
    Unauthenticated { reason: String },
    /// The store could not complete the request; it may be retried.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },
    /// An unexpected failure.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Unauthenticated {
            reason: err.to_string(),
        }
    }
}

fn conflict(rule: &str, message: String) -> ApiError {
    ApiError::Conflict {
        rule: rule.to_string(),
        message,
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidArgument {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDisplayName(_) => invalid("display_name", message),
        DomainError::InvalidRoomCode(_) => invalid("room_code", message),
        DomainError::EmptyQuestionSet { .. } | DomainError::InvalidQuestion { .. } => {
            invalid("question_set_id", message)
        }
        DomainError::QuestionIndexOutOfRange { .. } => invalid("question_index", message),
        DomainError::InvalidTimeSpent(_) => invalid("time_spent", message),
        DomainError::InvalidAnswer(_) => invalid("user_answer", message),
        DomainError::NotHost { .. } => ApiError::PermissionDenied { message },
        DomainError::NotParticipant { .. } => ApiError::NotFound {
            resource: String::from("Participant"),
            message,
        },
        DomainError::InvalidStatusTransition { .. } => {
            conflict("invalid_status_transition", message)
        }
        DomainError::RoomNotStarted { .. } => conflict("room_not_started", message),
        DomainError::RoomCompleted { .. } => conflict("room_completed", message),
        DomainError::DuplicateAnswer { .. } => conflict("duplicate_answer", message),
        DomainError::ParticipantFinished { .. } => conflict("participant_finished", message),
        DomainError::InvalidRoomStatus(_) | DomainError::InvalidDifficulty(_) => {
            error!(error = %message, "Stored room data is invalid");
            ApiError::Internal { message }
        }
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => {
            error!(error = %msg, "Room transition failed");
            ApiError::Internal { message: msg }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are logged here, once, at the boundary.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::RoomNotFound(_) | PersistenceError::RoomCodeNotFound(_) => {
            ApiError::NotFound {
                resource: String::from("Room"),
                message,
            }
        }
        PersistenceError::QuestionSetNotFound(_) => ApiError::NotFound {
            resource: String::from("Question set"),
            message,
        },
        PersistenceError::ParticipantNotFound { .. } => ApiError::NotFound {
            resource: String::from("Participant"),
            message,
        },
        PersistenceError::NotFound(_) => ApiError::NotFound {
            resource: String::from("Record"),
            message,
        },
        PersistenceError::DuplicateAnswer { .. } => conflict("duplicate_answer", message),
        PersistenceError::DuplicateRoomCode(_) => conflict("duplicate_room_code", message),
        PersistenceError::VersionConflict { .. } => {
            error!(error = %message, "Room version conflict escaped the retry loop");
            ApiError::Unavailable { message }
        }
        PersistenceError::DatabaseError(_) | PersistenceError::DatabaseConnectionFailed(_) => {
            error!(error = %message, "Room store unavailable");
            ApiError::Unavailable { message }
        }
        PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::Other(_) => {
            error!(error = %message, "Room store failure");
            ApiError::Internal { message }
        }
    }
}
