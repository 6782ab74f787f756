// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Question source queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use quiz_room_domain::{Difficulty, Question, QuestionSet, QuestionSetSummary, TestMeta};

use crate::data_models::{QuestionRow, QuestionSetRow, from_column_int};
use crate::diesel_schema::{question_set_questions, question_sets};
use crate::error::PersistenceError;

/// Lists every stored question set with its question count, ordered by id.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_question_sets(
    conn: &mut SqliteConnection,
) -> Result<Vec<QuestionSetSummary>, PersistenceError> {
    let rows: Vec<QuestionSetRow> = question_sets::table
        .select(QuestionSetRow::as_select())
        .order(question_sets::question_set_id.asc())
        .load(conn)?;

    let counts: HashMap<i64, i64> = question_set_questions::table
        .group_by(question_set_questions::question_set_id)
        .select((
            question_set_questions::question_set_id,
            diesel::dsl::count_star(),
        ))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let count: i64 = counts.get(&row.question_set_id).copied().unwrap_or(0);
            let question_count: usize = usize::try_from(count).map_err(|_| {
                PersistenceError::ReconstructionError(format!(
                    "Invalid question count {count} for set {}",
                    row.question_set_id
                ))
            })?;
            Ok(QuestionSetSummary {
                question_set_id: row.question_set_id,
                title: row.title,
                question_count,
            })
        })
        .collect()
}

/// Loads a full question set, questions in position order.
///
/// # Errors
///
/// Returns `PersistenceError::QuestionSetNotFound` if no such set exists.
pub fn get_question_set(
    conn: &mut SqliteConnection,
    question_set_id: i64,
) -> Result<QuestionSet, PersistenceError> {
    let row: QuestionSetRow = match question_sets::table
        .select(QuestionSetRow::as_select())
        .filter(question_sets::question_set_id.eq(question_set_id))
        .first(conn)
    {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::QuestionSetNotFound(question_set_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let question_rows: Vec<QuestionRow> = question_set_questions::table
        .select((
            question_set_questions::position,
            question_set_questions::text,
            question_set_questions::options_json,
            question_set_questions::correct_answer,
        ))
        .filter(question_set_questions::question_set_id.eq(question_set_id))
        .order(question_set_questions::position.asc())
        .load(conn)?;

    Ok(QuestionSet {
        question_set_id: Some(row.question_set_id),
        meta: build_meta(row.title, row.description, row.difficulty, row.time_limit_secs)?,
        questions: build_questions(question_rows)?,
    })
}

/// Rebuilds test metadata from stored columns.
///
/// # Errors
///
/// Returns an error if the difficulty or time limit is invalid.
pub fn build_meta(
    title: String,
    description: Option<String>,
    difficulty: Option<String>,
    time_limit_secs: Option<i32>,
) -> Result<TestMeta, PersistenceError> {
    let difficulty: Option<Difficulty> = difficulty
        .map(|value| value.parse::<Difficulty>())
        .transpose()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let time_limit_secs: Option<u32> = time_limit_secs
        .map(u32::try_from)
        .transpose()
        .map_err(|_| {
            PersistenceError::ReconstructionError(String::from("Negative stored time limit"))
        })?;

    Ok(TestMeta {
        title,
        description,
        difficulty,
        time_limit_secs,
    })
}

/// Rebuilds questions from rows already ordered by position.
///
/// # Errors
///
/// Returns an error if positions are not contiguous from zero or the stored
/// options cannot be decoded.
pub fn build_questions(rows: Vec<QuestionRow>) -> Result<Vec<Question>, PersistenceError> {
    rows.into_iter()
        .enumerate()
        .map(|(expected, row)| {
            let position: usize = from_column_int(row.position, "Question position")?;
            if position != expected {
                return Err(PersistenceError::ReconstructionError(format!(
                    "Question positions are not contiguous: expected {expected}, found {position}"
                )));
            }
            let options: Vec<String> = serde_json::from_str(&row.options_json)?;
            Ok(Question::new(row.text, options, row.correct_answer))
        })
        .collect()
}
