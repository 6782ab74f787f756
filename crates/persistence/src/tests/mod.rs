// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use quiz_room::{Command, TransitionResult, apply, create_room};
use quiz_room_domain::{Difficulty, Identity, Question, QuestionSet, Room, RoomCode, TestMeta};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::Persistence;

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2026-03-01 12:00:00 UTC)
}

pub fn later(seconds: i64) -> OffsetDateTime {
    create_test_time() + Duration::seconds(seconds)
}

pub fn host() -> Identity {
    Identity::new("host-1")
}

pub fn guest(n: u32) -> Identity {
    Identity::new(&format!("guest-{n}"))
}

/// Three questions; the correct answers are "A", "B" and "C".
pub fn create_test_question_set() -> QuestionSet {
    QuestionSet {
        question_set_id: None,
        meta: TestMeta {
            title: String::from("Letters"),
            description: Some(String::from("Pick the right letter")),
            difficulty: Some(Difficulty::Easy),
            time_limit_secs: Some(120),
        },
        questions: ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, correct)| {
                Question::new(
                    format!("Question {i}"),
                    vec![String::from("A"), String::from("B"), String::from("C")],
                    (*correct).to_string(),
                )
            })
            .collect(),
    }
}

/// Stores the test question set and a waiting room created from it.
pub fn create_test_room(persistence: &mut Persistence, code: &str) -> Room {
    let question_set_id = persistence
        .insert_question_set(&create_test_question_set())
        .unwrap();
    let source = persistence.get_question_set(question_set_id).unwrap();
    let new_room = create_room(
        &source,
        &host(),
        "Host",
        RoomCode::new(code),
        create_test_time(),
    )
    .unwrap();
    persistence.insert_room(&new_room).unwrap()
}

/// Loads, applies and persists one command, panicking on any failure.
pub fn run(persistence: &mut Persistence, room: &Room, actor: &Identity, command: Command) -> Room {
    let (current, version) = persistence.load_room(room.room_id).unwrap();
    let result: TransitionResult = apply(&current, actor, command, later(1)).unwrap();
    persistence
        .persist_transition(room.room_id, version, &result.change)
        .unwrap();
    result.new_room
}

pub fn answer_cmd(question_index: i64, user_answer: &str, time_spent: f64) -> Command {
    Command::SubmitAnswer {
        question_index,
        user_answer: user_answer.to_string(),
        time_spent,
    }
}

pub fn join_cmd(name: &str) -> Command {
    Command::Join {
        display_name: name.to_string(),
    }
}
