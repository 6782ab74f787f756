// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for quiz rooms.
//!
//! This crate resolves caller identity, validates request payloads, drives
//! the core transition function against the store, and shapes responses.
//! It is transport agnostic; the server crate maps it onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedParticipant, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    MAX_CODE_ATTEMPTS, MAX_MUTATION_ATTEMPTS, activate_room, complete_participant, create_room,
    end_room, get_leaderboard, get_room, join_room, list_question_sets, submit_answer,
};
pub use request_response::{
    AnswerView, CompleteParticipantResponse, CreateRoomRequest, CreateRoomResponse,
    JoinRoomRequest, JoinRoomResponse, LeaderboardEntryView, LeaderboardResponse,
    ListQuestionSetsResponse, ParticipantView, QuestionSetInfo, QuestionView, RoomResponse,
    SubmitAnswerRequest, SubmitAnswerResponse,
};
