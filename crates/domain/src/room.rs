// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The room aggregate and its participant records.
//!
//! A `Room` owns a frozen snapshot of its questions and the ordered roster of
//! participants. Roster order is join order and is the final tie-breaker of
//! the leaderboard.

use time::OffsetDateTime;

use crate::types::{Identity, Question, RoomCode, RoomId, RoomStatus, TestMeta};

/// One immutable answer submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    /// Zero-based index into the room's question snapshot.
    pub question_index: usize,
    /// The answer text as submitted.
    pub user_answer: String,
    /// Correctness computed against the room's snapshot, never client-supplied.
    pub is_correct: bool,
    /// Seconds spent on the question.
    pub time_spent: f64,
}

/// Progress of one joined identity within a room.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantState {
    pub identity: Identity,
    /// Name snapshot taken at join time.
    pub display_name: String,
    /// Zero-based join position.
    pub join_order: usize,
    /// Answers in submission order. No two share a `question_index`.
    pub answers: Vec<AnswerRecord>,
    /// Count of correct answers.
    pub score: u32,
    /// Frozen sum of `time_spent`, set on finalization.
    pub total_time: Option<f64>,
    pub is_finished: bool,
    pub joined_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
}

impl ParticipantState {
    /// Creates a participant with no progress.
    #[must_use]
    pub const fn new(
        identity: Identity,
        display_name: String,
        join_order: usize,
        joined_at: OffsetDateTime,
    ) -> Self {
        Self {
            identity,
            display_name,
            join_order,
            answers: Vec::new(),
            score: 0,
            total_time: None,
            is_finished: false,
            joined_at,
            finished_at: None,
        }
    }

    /// Returns whether this participant already answered `question_index`.
    #[must_use]
    pub fn has_answered(&self, question_index: usize) -> bool {
        self.answers
            .iter()
            .any(|answer| answer.question_index == question_index)
    }

    /// Number of correct answers, derived from the answer list.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let count: usize = self.answers.iter().filter(|a| a.is_correct).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Sum of time spent over the answers recorded so far.
    #[must_use]
    pub fn running_time(&self) -> f64 {
        self.answers.iter().fold(0.0, |total, a| total + a.time_spent)
    }

    /// Time used for ranking: the frozen total once finished, the running
    /// sum before that.
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        self.total_time.unwrap_or_else(|| self.running_time())
    }

    /// Appends an answer and bumps the score when it is correct.
    ///
    /// Callers must have checked for duplicates and finalization first.
    pub fn record_answer(&mut self, record: AnswerRecord) {
        if record.is_correct {
            self.score += 1;
        }
        self.answers.push(record);
    }

    /// Freezes score and total time. Returns the frozen values.
    ///
    /// Finalizing an already finished participant returns the stored values
    /// unchanged.
    pub fn finalize(&mut self, now: OffsetDateTime) -> (u32, f64) {
        if let (true, Some(total_time)) = (self.is_finished, self.total_time) {
            return (self.score, total_time);
        }
        let score: u32 = self.correct_count();
        let total_time: f64 = self.running_time();
        self.score = score;
        self.total_time = Some(total_time);
        self.is_finished = true;
        self.finished_at = Some(now);
        (score, total_time)
    }
}

/// A room that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub code: RoomCode,
    pub host: Identity,
    pub source_question_set_id: Option<i64>,
    pub meta: TestMeta,
    pub questions: Vec<Question>,
    /// Seeded with the host as the first entry.
    pub participants: Vec<ParticipantState>,
    pub created_at: OffsetDateTime,
}

/// The room aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_id: RoomId,
    pub code: RoomCode,
    pub host: Identity,
    pub status: RoomStatus,
    pub source_question_set_id: Option<i64>,
    pub meta: TestMeta,
    /// Frozen copy of the source questions.
    pub questions: Vec<Question>,
    /// Roster in join order.
    pub participants: Vec<ParticipantState>,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl Room {
    /// Returns whether `identity` is the room host.
    #[must_use]
    pub fn is_host(&self, identity: &Identity) -> bool {
        &self.host == identity
    }

    /// Number of questions in the snapshot.
    #[must_use]
    pub const fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Looks up a question by index.
    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Roster position of `identity`, if joined.
    #[must_use]
    pub fn participant_index(&self, identity: &Identity) -> Option<usize> {
        self.participants
            .iter()
            .position(|p| &p.identity == identity)
    }

    #[must_use]
    pub fn participant(&self, identity: &Identity) -> Option<&ParticipantState> {
        self.participants.iter().find(|p| &p.identity == identity)
    }

    pub fn participant_mut(&mut self, identity: &Identity) -> Option<&mut ParticipantState> {
        self.participants
            .iter_mut()
            .find(|p| &p.identity == identity)
    }

    /// Returns whether every participant has been finalized.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.participants.iter().all(|p| p.is_finished)
    }
}
