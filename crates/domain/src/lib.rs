// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod leaderboard;
mod room;
mod room_code;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use leaderboard::{LeaderboardEntry, rank_participants};
pub use room::{AnswerRecord, NewRoom, ParticipantState, Room};
pub use room_code::{
    ROOM_CODE_ALPHABET, ROOM_CODE_LENGTH, generate_room_code, is_valid_room_code,
};
pub use types::{
    Difficulty, Identity, Question, QuestionSet, QuestionSetSummary, RoomCode, RoomId, RoomStatus,
    TestMeta,
};
pub use validation::{
    validate_display_name, validate_question_index, validate_question_set, validate_time_spent,
    validate_user_answer,
};
