// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a room.
///
/// Status only ever moves forward: `Waiting` → `Active` → `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Created, admitting participants, not yet started by the host.
    #[default]
    Waiting,
    /// Started by the host. Answers are accepted.
    Active,
    /// Finished. No further answers or joins.
    Completed,
}

impl RoomStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Checks if a transition from this status to `target` is permitted.
    ///
    /// Valid transitions are:
    /// - `Waiting` → `Active`
    /// - `Active` → `Completed`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Active) | (Self::Active, Self::Completed)
        )
    }

    /// Returns whether new participants may still take a seat.
    #[must_use]
    pub const fn admits_participants(&self) -> bool {
        matches!(self, Self::Waiting | Self::Active)
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidRoomStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical room identifier assigned by the room store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Wraps a stored room identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short human-enterable join token.
///
/// Codes are normalized to uppercase so that lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    /// Creates a room code, normalizing to uppercase.
    ///
    /// No validation is performed here; see [`crate::is_valid_room_code`].
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }

    /// Parses and validates a room code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomCode` if the code does not have the
    /// expected length or contains characters outside the code alphabet.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let code: Self = Self::new(value);
        if !crate::room_code::is_valid_room_code(code.value()) {
            return Err(DomainError::InvalidRoomCode(format!(
                "'{value}' must be {} characters of A-Z or 0-9",
                crate::room_code::ROOM_CODE_LENGTH
            )));
        }
        Ok(code)
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable caller identity as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates a new identity. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identity value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty label carried over from the source question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DomainError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Descriptive metadata of a question set, snapshotted into each room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Suggested time limit in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// Creates a new question.
    #[must_use]
    pub const fn new(text: String, options: Vec<String>, correct_answer: String) -> Self {
        Self {
            text,
            options,
            correct_answer,
        }
    }

    /// Returns whether `user_answer` matches the correct answer exactly.
    #[must_use]
    pub fn is_correct(&self, user_answer: &str) -> bool {
        self.correct_answer == user_answer
    }
}

/// A question set as provided by the question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Identifier assigned by the question source. `None` until stored.
    #[serde(default)]
    pub question_set_id: Option<i64>,
    #[serde(flatten)]
    pub meta: TestMeta,
    pub questions: Vec<Question>,
}

/// Listing entry for available question sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSetSummary {
    pub question_set_id: i64,
    pub title: String,
    pub question_count: usize,
}
