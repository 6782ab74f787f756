// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use quiz_room_domain::{Difficulty, QuestionSet};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewQuestionSetQuestion, to_column_int};
use crate::diesel_schema::{question_set_questions, question_sets};
use crate::error::PersistenceError;

/// Stores a question set and returns its new id.
///
/// Any `question_set_id` already on `question_set` is ignored. Authoring
/// rules are not checked here; rooms validate the set when they are created.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_question_set(
    conn: &mut SqliteConnection,
    question_set: &QuestionSet,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let time_limit_secs: Option<i32> = question_set
            .meta
            .time_limit_secs
            .map(i32::try_from)
            .transpose()
            .map_err(|_| PersistenceError::Other(String::from("Time limit out of range")))?;

        diesel::insert_into(question_sets::table)
            .values((
                question_sets::title.eq(&question_set.meta.title),
                question_sets::description.eq(question_set.meta.description.as_deref()),
                question_sets::difficulty
                    .eq(question_set.meta.difficulty.as_ref().map(Difficulty::as_str)),
                question_sets::time_limit_secs.eq(time_limit_secs),
            ))
            .execute(conn)?;

        let question_set_id: i64 = conn.get_last_insert_rowid()?;

        let rows: Vec<NewQuestionSetQuestion<'_>> = question_set
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| -> Result<NewQuestionSetQuestion<'_>, PersistenceError> {
                Ok(NewQuestionSetQuestion {
                    question_set_id,
                    position: to_column_int(position, "Question position")?,
                    text: &question.text,
                    options_json: serde_json::to_string(&question.options)?,
                    correct_answer: &question.correct_answer,
                })
            })
            .collect::<Result<_, _>>()?;

        if !rows.is_empty() {
            diesel::insert_into(question_set_questions::table)
                .values(&rows)
                .execute(conn)?;
        }

        info!(
            question_set_id,
            question_count = rows.len(),
            title = %question_set.meta.title,
            "Stored question set"
        );

        Ok(question_set_id)
    })
}
