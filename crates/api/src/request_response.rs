// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use quiz_room_domain::{
    AnswerRecord, Difficulty, Identity, LeaderboardEntry, ParticipantState, Question, Room,
    RoomStatus,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to create a room from a question set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoomRequest {
    /// The question set to snapshot.
    pub question_set_id: i64,
    /// Host name on the roster; defaults to the provider's name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// API response for a successful room creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: i64,
    /// Code other participants join with.
    pub room_code: String,
    pub status: RoomStatus,
    pub message: String,
}

/// API request to join a room, by code or by id.
///
/// When both are given the code wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JoinRoomRequest {
    #[serde(default)]
    pub room_code: Option<String>,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// API response for a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub room_id: i64,
    pub room_code: String,
    /// Zero-based roster position.
    pub participant_index: usize,
    pub status: RoomStatus,
    /// False when the caller was already on the roster.
    pub newly_joined: bool,
}

/// API request to submit one answer.
///
/// Any correctness flag sent by the client is ignored; correctness is always
/// computed from the room's question snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_index: i64,
    pub user_answer: String,
    /// Seconds spent on the question.
    pub time_spent: f64,
}

/// API response for an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub accepted: bool,
    pub is_correct: bool,
    /// Running score after this answer.
    pub score: u32,
    pub answered_count: usize,
}

/// API response for a participant completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteParticipantResponse {
    pub score: u32,
    /// Seconds, summed over every answer.
    pub total_time: f64,
    pub room_status: RoomStatus,
}

/// One question as shown to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
    /// Only present once answers may be revealed to the caller.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub correct_answer: Option<String>,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(index: usize, question: &Question, reveal: bool) -> Self {
        Self {
            index,
            text: question.text.clone(),
            options: question.options.clone(),
            correct_answer: reveal.then(|| question.correct_answer.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerView {
    pub question_index: usize,
    pub user_answer: String,
    pub is_correct: bool,
    pub time_spent: f64,
}

impl From<&AnswerRecord> for AnswerView {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_index: record.question_index,
            user_answer: record.user_answer.clone(),
            is_correct: record.is_correct,
            time_spent: record.time_spent,
        }
    }
}

/// One roster entry as shown to a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub identity: String,
    pub display_name: String,
    pub join_order: usize,
    pub score: u32,
    pub total_time: Option<f64>,
    pub answered_count: usize,
    pub is_finished: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub finished_at: Option<OffsetDateTime>,
    /// The caller's own answers, or everyone's once the room is completed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub answers: Option<Vec<AnswerView>>,
}

impl ParticipantView {
    #[must_use]
    pub fn from_participant(participant: &ParticipantState, show_answers: bool) -> Self {
        Self {
            identity: participant.identity.value().to_string(),
            display_name: participant.display_name.clone(),
            join_order: participant.join_order,
            score: participant.score,
            total_time: participant.total_time,
            answered_count: participant.answers.len(),
            is_finished: participant.is_finished,
            joined_at: participant.joined_at,
            finished_at: participant.finished_at,
            answers: show_answers
                .then(|| participant.answers.iter().map(AnswerView::from).collect()),
        }
    }
}

/// Full room snapshot as seen by one caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room_id: i64,
    pub room_code: String,
    pub status: RoomStatus,
    pub host_identity: String,
    /// Whether the caller is the host.
    pub is_host: bool,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub time_limit_secs: Option<u32>,
    pub question_count: usize,
    pub questions: Vec<QuestionView>,
    pub participants: Vec<ParticipantView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub ended_at: Option<OffsetDateTime>,
}

impl RoomResponse {
    /// Builds the caller's view of a room.
    ///
    /// Correct answers are revealed once the room is completed or the
    /// caller has finished. Answer lists are shown for the caller's own
    /// entry, and for everyone once the room is completed.
    #[must_use]
    pub fn for_requester(room: &Room, requester: &Identity) -> Self {
        let completed: bool = room.status == RoomStatus::Completed;
        let requester_finished: bool = room.participant(requester).is_some_and(|p| p.is_finished);
        let reveal: bool = completed || requester_finished;

        Self {
            room_id: room.room_id.value(),
            room_code: room.code.value().to_string(),
            status: room.status,
            host_identity: room.host.value().to_string(),
            is_host: room.is_host(requester),
            title: room.meta.title.clone(),
            description: room.meta.description.clone(),
            difficulty: room.meta.difficulty,
            time_limit_secs: room.meta.time_limit_secs,
            question_count: room.question_count(),
            questions: room
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| QuestionView::from_question(index, question, reveal))
                .collect(),
            participants: room
                .participants
                .iter()
                .map(|p| ParticipantView::from_participant(p, completed || &p.identity == requester))
                .collect(),
            created_at: room.created_at,
            started_at: room.started_at,
            ended_at: room.ended_at,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntryView {
    /// 1-based position.
    pub position: usize,
    pub identity: String,
    pub display_name: String,
    pub score: u32,
    /// Frozen total once finished, running total before.
    pub elapsed_time: f64,
    pub answered_count: usize,
    pub is_finished: bool,
}

impl From<&LeaderboardEntry> for LeaderboardEntryView {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            position: entry.position,
            identity: entry.participant.identity.value().to_string(),
            display_name: entry.participant.display_name.clone(),
            score: entry.participant.score,
            elapsed_time: entry.participant.elapsed_time(),
            answered_count: entry.participant.answers.len(),
            is_finished: entry.participant.is_finished,
        }
    }
}

/// API response for a leaderboard query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub room_id: i64,
    pub status: RoomStatus,
    pub entries: Vec<LeaderboardEntryView>,
}

/// Listing entry for room creation UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSetInfo {
    pub question_set_id: i64,
    pub title: String,
    pub question_count: usize,
}

/// API response listing question sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuestionSetsResponse {
    pub question_sets: Vec<QuestionSetInfo>,
}
