// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use quiz_room_domain::{Difficulty, Identity, Question, QuestionSet, RoomId, TestMeta};
use quiz_room_persistence::Persistence;

use crate::{
    AuthenticatedParticipant, CreateRoomRequest, CreateRoomResponse, JoinRoomRequest,
    SubmitAnswerRequest, create_room, join_room,
};

pub fn host() -> AuthenticatedParticipant {
    AuthenticatedParticipant::new(Identity::new("host-1"), Some(String::from("Hannah Host")))
}

pub fn guest(n: u32) -> AuthenticatedParticipant {
    AuthenticatedParticipant::new(Identity::new(&format!("guest-{n}")), None)
}

/// Three questions whose correct answers are "A", "B" and "C".
pub fn create_test_question_set() -> QuestionSet {
    let questions: Vec<Question> = ["A", "B", "C"]
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            Question::new(
                format!("Question {index}"),
                vec![String::from("A"), String::from("B"), String::from("C")],
                (*answer).to_string(),
            )
        })
        .collect();

    QuestionSet {
        question_set_id: None,
        meta: TestMeta {
            title: String::from("Capitals"),
            description: Some(String::from("European capitals")),
            difficulty: Some(Difficulty::Medium),
            time_limit_secs: Some(300),
        },
        questions,
    }
}

/// Opens an in-memory store seeded with the test question set.
pub fn setup() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let question_set_id: i64 = persistence
        .insert_question_set(&create_test_question_set())
        .unwrap();
    (persistence, question_set_id)
}

/// Creates a room hosted by [`host`].
pub fn setup_room() -> (Persistence, RoomId, String) {
    let (mut persistence, question_set_id) = setup();
    let response: CreateRoomResponse = create_room(
        &mut persistence,
        &CreateRoomRequest {
            question_set_id,
            display_name: None,
        },
        &host(),
    )
    .unwrap();
    (
        persistence,
        RoomId::new(response.room_id),
        response.room_code,
    )
}

pub fn join_by_code(
    persistence: &mut Persistence,
    code: &str,
    participant: &AuthenticatedParticipant,
) {
    join_room(
        persistence,
        &JoinRoomRequest {
            room_code: Some(code.to_string()),
            ..JoinRoomRequest::default()
        },
        participant,
    )
    .unwrap();
}

pub fn answer(question_index: i64, user_answer: &str, time_spent: f64) -> SubmitAnswerRequest {
    SubmitAnswerRequest {
        question_index,
        user_answer: user_answer.to_string(),
        time_spent,
    }
}
