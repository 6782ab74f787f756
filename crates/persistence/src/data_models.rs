// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and column conversions.

use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{
    question_set_questions, question_sets, room_answers, room_participants, room_questions, rooms,
};
use crate::error::PersistenceError;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = question_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuestionSetRow {
    pub question_set_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit_secs: Option<i32>,
}

/// One question as stored, either in the question source or in a room
/// snapshot.
#[derive(Debug, Clone, Queryable)]
pub struct QuestionRow {
    pub position: i32,
    pub text: String,
    pub options_json: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoomRow {
    pub room_id: i64,
    pub room_code: String,
    pub host_identity: String,
    pub status: String,
    pub version: i64,
    pub source_question_set_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit_secs: Option<i32>,
    pub question_count: i32,
    pub created_at: String,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = room_participants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub identity: String,
    pub display_name: String,
    pub join_order: i32,
    pub score: i32,
    pub total_time: Option<f64>,
    pub is_finished: i32,
    pub joined_at: String,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = room_answers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AnswerRow {
    pub participant_id: i64,
    pub question_index: i32,
    pub user_answer: String,
    pub is_correct: i32,
    pub time_spent: f64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = question_set_questions)]
pub struct NewQuestionSetQuestion<'a> {
    pub question_set_id: i64,
    pub position: i32,
    pub text: &'a str,
    pub options_json: String,
    pub correct_answer: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = room_questions)]
pub struct NewRoomQuestion<'a> {
    pub room_id: i64,
    pub position: i32,
    pub text: &'a str,
    pub options_json: String,
    pub correct_answer: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = room_participants)]
pub struct NewParticipant<'a> {
    pub room_id: i64,
    pub identity: &'a str,
    pub display_name: &'a str,
    pub join_order: i32,
    pub score: i32,
    pub total_time: Option<f64>,
    pub is_finished: i32,
    pub joined_at: String,
    pub finished_at: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = room_answers)]
pub struct NewAnswer<'a> {
    pub participant_id: i64,
    pub question_index: i32,
    pub user_answer: &'a str,
    pub is_correct: i32,
    pub time_spent: f64,
}

/// Formats a timestamp for storage as RFC 3339 text.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp: {e}")))
}

/// Parses a stored RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the text is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid stored timestamp '{value}': {e}"))
    })
}

/// Converts an in-memory count or index to its column type.
///
/// # Errors
///
/// Returns an error if the value does not fit in an `i32` column.
pub fn to_column_int(value: usize, what: &str) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| PersistenceError::Other(format!("{what} out of range: {value}")))
}

/// Converts a stored integer back to an in-memory count or index.
///
/// # Errors
///
/// Returns an error if the stored value is negative.
pub fn from_column_int(value: i32, what: &str) -> Result<usize, PersistenceError> {
    usize::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("{what} cannot be negative: {value}"))
    })
}
