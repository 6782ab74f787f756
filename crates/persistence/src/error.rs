// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested room does not exist.
    RoomNotFound(i64),
    /// No room carries the requested join code.
    RoomCodeNotFound(String),
    /// The requested question set does not exist.
    QuestionSetNotFound(i64),
    /// The participant is not on the room roster.
    ParticipantNotFound { room_id: i64, identity: String },
    /// The room was modified since it was read.
    VersionConflict { room_id: i64, expected_version: i64 },
    /// The participant already has an answer for this question.
    DuplicateAnswer {
        room_id: i64,
        identity: String,
        question_index: usize,
    },
    /// The generated join code is already taken.
    DuplicateRoomCode(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Room reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::RoomNotFound(room_id) => write!(f, "Room not found: {room_id}"),
            Self::RoomCodeNotFound(code) => write!(f, "No room with code '{code}'"),
            Self::QuestionSetNotFound(id) => write!(f, "Question set not found: {id}"),
            Self::ParticipantNotFound { room_id, identity } => {
                write!(f, "'{identity}' is not a participant of room {room_id}")
            }
            Self::VersionConflict {
                room_id,
                expected_version,
            } => write!(
                f,
                "Room {room_id} changed since version {expected_version} was read"
            ),
            Self::DuplicateAnswer {
                room_id,
                identity,
                question_index,
            } => write!(
                f,
                "'{identity}' already answered question {question_index} in room {room_id}"
            ),
            Self::DuplicateRoomCode(code) => write!(f, "Room code '{code}' is already in use"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Returns whether a diesel error is a unique constraint violation.
pub(crate) const fn is_unique_violation(err: &diesel::result::Error) -> bool {
    matches!(
        err,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    )
}
