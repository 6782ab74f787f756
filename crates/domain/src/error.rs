// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::RoomStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// Room code is malformed.
    InvalidRoomCode(String),
    /// Stored room status string could not be parsed.
    InvalidRoomStatus(String),
    /// Stored difficulty string could not be parsed.
    InvalidDifficulty(String),
    /// The question set contains no questions.
    EmptyQuestionSet {
        /// The question set identifier.
        question_set_id: i64,
    },
    /// A question in the source set is malformed.
    InvalidQuestion {
        /// Zero-based position of the question in the set.
        index: usize,
        /// Description of the problem.
        reason: String,
    },
    /// The question index is outside the room's question snapshot.
    QuestionIndexOutOfRange {
        /// The requested index.
        index: i64,
        /// Number of questions in the room.
        question_count: usize,
    },
    /// Time spent is negative or not a finite number.
    InvalidTimeSpent(String),
    /// Submitted answer is empty or invalid.
    InvalidAnswer(String),
    /// The requester is not the host of the room.
    NotHost {
        /// The room identifier.
        room_id: i64,
        /// The identity that attempted the host-only action.
        identity: String,
    },
    /// The identity has not joined the room.
    NotParticipant {
        /// The room identifier.
        room_id: i64,
        /// The identity that is not on the roster.
        identity: String,
    },
    /// Room status cannot move from `from` to `to`.
    InvalidStatusTransition {
        /// The current status.
        from: RoomStatus,
        /// The requested status.
        to: RoomStatus,
    },
    /// The room has not been activated yet.
    RoomNotStarted {
        /// The room identifier.
        room_id: i64,
    },
    /// The room is already completed.
    RoomCompleted {
        /// The room identifier.
        room_id: i64,
    },
    /// The participant already answered this question.
    DuplicateAnswer {
        /// The room identifier.
        room_id: i64,
        /// The participant identity.
        identity: String,
        /// The question index that was already answered.
        question_index: usize,
    },
    /// The participant has already been finalized.
    ParticipantFinished {
        /// The room identifier.
        room_id: i64,
        /// The participant identity.
        identity: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidRoomCode(msg) => write!(f, "Invalid room code: {msg}"),
            Self::InvalidRoomStatus(status) => write!(f, "Invalid room status: '{status}'"),
            Self::InvalidDifficulty(value) => write!(f, "Invalid difficulty: '{value}'"),
            Self::EmptyQuestionSet { question_set_id } => {
                write!(f, "Question set {question_set_id} has no questions")
            }
            Self::InvalidQuestion { index, reason } => {
                write!(f, "Invalid question at position {index}: {reason}")
            }
            Self::QuestionIndexOutOfRange {
                index,
                question_count,
            } => {
                write!(
                    f,
                    "Question index {index} is out of range. Must be between 0 and {}",
                    question_count.saturating_sub(1)
                )
            }
            Self::InvalidTimeSpent(msg) => write!(f, "Invalid time spent: {msg}"),
            Self::InvalidAnswer(msg) => write!(f, "Invalid answer: {msg}"),
            Self::NotHost { room_id, identity } => {
                write!(f, "'{identity}' is not the host of room {room_id}")
            }
            Self::NotParticipant { room_id, identity } => {
                write!(f, "'{identity}' has not joined room {room_id}")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Room cannot move from {from} to {to}")
            }
            Self::RoomNotStarted { room_id } => {
                write!(f, "Room {room_id} has not been started by the host")
            }
            Self::RoomCompleted { room_id } => write!(f, "Room {room_id} is already completed"),
            Self::DuplicateAnswer {
                room_id,
                identity,
                question_index,
            } => {
                write!(
                    f,
                    "'{identity}' already answered question {question_index} in room {room_id}"
                )
            }
            Self::ParticipantFinished { room_id, identity } => {
                write!(f, "'{identity}' has already finished room {room_id}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
