// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AnswerRecord, Identity, ParticipantState, Question, QuestionSet, TestMeta};

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2026-03-01 12:00:00 UTC)
}

pub fn create_test_question_set() -> QuestionSet {
    QuestionSet {
        question_set_id: Some(7),
        meta: TestMeta {
            title: String::from("Capitals"),
            description: Some(String::from("European capitals")),
            difficulty: None,
            time_limit_secs: Some(300),
        },
        questions: vec![
            Question::new(
                String::from("Capital of France?"),
                vec![String::from("Paris"), String::from("Lyon")],
                String::from("Paris"),
            ),
            Question::new(
                String::from("Capital of Spain?"),
                vec![String::from("Madrid"), String::from("Seville")],
                String::from("Madrid"),
            ),
        ],
    }
}

pub fn create_test_participant(identity: &str, join_order: usize) -> ParticipantState {
    ParticipantState::new(
        Identity::new(identity),
        format!("User {identity}"),
        join_order,
        create_test_time(),
    )
}

pub fn answer(question_index: usize, is_correct: bool, time_spent: f64) -> AnswerRecord {
    AnswerRecord {
        question_index,
        user_answer: String::from("x"),
        is_correct,
        time_spent,
    }
}
