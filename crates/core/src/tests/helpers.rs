// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quiz_room_domain::{
    Identity, Question, QuestionSet, Room, RoomCode, RoomId, RoomStatus, TestMeta,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{Command, TransitionResult, apply, create_room};

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
        question_set_id: Some(1),
        meta: TestMeta {
            title: String::from("Letters"),
            description: None,
            difficulty: None,
            time_limit_secs: None,
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

/// A stored-looking room in `waiting` with only the host seated.
pub fn create_test_room() -> Room {
    let new_room = create_room(
        &create_test_question_set(),
        &host(),
        "Host",
        RoomCode::new("ABC123"),
        create_test_time(),
    )
    .unwrap();

    Room {
        room_id: RoomId::new(42),
        code: new_room.code,
        host: new_room.host,
        status: RoomStatus::Waiting,
        source_question_set_id: new_room.source_question_set_id,
        meta: new_room.meta,
        questions: new_room.questions,
        participants: new_room.participants,
        created_at: new_room.created_at,
        started_at: None,
        ended_at: None,
    }
}

/// Applies a command that is expected to succeed and returns the new room.
pub fn step(room: &Room, actor: &Identity, command: Command) -> Room {
    let result: TransitionResult = apply(room, actor, command, later(1)).unwrap();
    result.new_room
}

pub fn join_cmd(name: &str) -> Command {
    Command::Join {
        display_name: name.to_string(),
    }
}

pub fn answer_cmd(question_index: i64, user_answer: &str, time_spent: f64) -> Command {
    Command::SubmitAnswer {
        question_index,
        user_answer: user_answer.to_string(),
        time_spent,
    }
}

/// Host plus `guests` guests, activated.
pub fn create_active_room(guests: u32) -> Room {
    let mut room = create_test_room();
    for n in 1..=guests {
        room = step(&room, &guest(n), join_cmd(&format!("Guest {n}")));
    }
    step(&room, &host(), Command::Activate)
}
