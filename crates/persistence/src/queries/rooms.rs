// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room aggregate queries.
//!
//! A room is reconstructed from its row, its question snapshot, its roster
//! and every answer of every participant. The stored `version` is returned
//! alongside so a caller can persist a follow-up transition optimistically.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use quiz_room_domain::{
    AnswerRecord, Identity, ParticipantState, Room, RoomCode, RoomId, RoomStatus,
};

use crate::data_models::{
    AnswerRow, ParticipantRow, QuestionRow, RoomRow, from_column_int, parse_timestamp,
};
use crate::diesel_schema::{room_answers, room_participants, room_questions, rooms};
use crate::error::PersistenceError;
use crate::queries::question_sets::{build_meta, build_questions};

/// Resolves a join code to its room.
///
/// # Errors
///
/// Returns `PersistenceError::RoomCodeNotFound` if no room carries the code.
pub fn find_room_id_by_code(
    conn: &mut SqliteConnection,
    code: &RoomCode,
) -> Result<RoomId, PersistenceError> {
    let result = rooms::table
        .select(rooms::room_id)
        .filter(rooms::room_code.eq(code.value()))
        .first::<i64>(conn);

    match result {
        Ok(room_id) => Ok(RoomId::new(room_id)),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::RoomCodeNotFound(code.value().to_string()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Looks up the row id of a roster entry.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if the identity has not
/// joined the room.
pub fn lookup_participant_id(
    conn: &mut SqliteConnection,
    room_id: i64,
    identity: &Identity,
) -> Result<i64, PersistenceError> {
    let result = room_participants::table
        .select(room_participants::participant_id)
        .filter(room_participants::room_id.eq(room_id))
        .filter(room_participants::identity.eq(identity.value()))
        .first::<i64>(conn);

    match result {
        Ok(id) => Ok(id),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::ParticipantNotFound {
            room_id,
            identity: identity.value().to_string(),
        }),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Loads the full room aggregate and its current version.
///
/// # Errors
///
/// Returns `PersistenceError::RoomNotFound` if the room does not exist, or a
/// reconstruction error if stored rows are inconsistent.
pub fn load_room(
    conn: &mut SqliteConnection,
    room_id: RoomId,
) -> Result<(Room, i64), PersistenceError> {
    let id: i64 = room_id.value();

    let row: RoomRow = match rooms::table
        .select(RoomRow::as_select())
        .filter(rooms::room_id.eq(id))
        .first(conn)
    {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => return Err(PersistenceError::RoomNotFound(id)),
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let question_rows: Vec<QuestionRow> = room_questions::table
        .select((
            room_questions::position,
            room_questions::text,
            room_questions::options_json,
            room_questions::correct_answer,
        ))
        .filter(room_questions::room_id.eq(id))
        .order(room_questions::position.asc())
        .load(conn)?;

    let participant_rows: Vec<ParticipantRow> = room_participants::table
        .select(ParticipantRow::as_select())
        .filter(room_participants::room_id.eq(id))
        .order(room_participants::join_order.asc())
        .load(conn)?;

    // Submission order is insertion order.
    let answer_rows: Vec<AnswerRow> = room_answers::table
        .inner_join(room_participants::table)
        .select(AnswerRow::as_select())
        .filter(room_participants::room_id.eq(id))
        .order(room_answers::answer_id.asc())
        .load(conn)?;

    let mut answers_by_participant: HashMap<i64, Vec<AnswerRecord>> = HashMap::new();
    for answer in answer_rows {
        answers_by_participant
            .entry(answer.participant_id)
            .or_default()
            .push(AnswerRecord {
                question_index: from_column_int(answer.question_index, "Question index")?,
                user_answer: answer.user_answer,
                is_correct: answer.is_correct != 0,
                time_spent: answer.time_spent,
            });
    }

    let participants: Vec<ParticipantState> = participant_rows
        .into_iter()
        .map(|p| {
            let answers: Vec<AnswerRecord> = answers_by_participant
                .remove(&p.participant_id)
                .unwrap_or_default();
            build_participant(p, answers)
        })
        .collect::<Result<_, _>>()?;

    let status: RoomStatus = row
        .status
        .parse()
        .map_err(|e: quiz_room_domain::DomainError| {
            PersistenceError::ReconstructionError(e.to_string())
        })?;

    let questions = build_questions(question_rows)?;
    let expected_count: usize = from_column_int(row.question_count, "Question count")?;
    if questions.len() != expected_count {
        return Err(PersistenceError::ReconstructionError(format!(
            "Room {id} expects {expected_count} questions but {} are stored",
            questions.len()
        )));
    }

    let room: Room = Room {
        room_id,
        code: RoomCode::new(&row.room_code),
        host: Identity::new(&row.host_identity),
        status,
        source_question_set_id: row.source_question_set_id,
        meta: build_meta(
            row.title,
            row.description,
            row.difficulty,
            row.time_limit_secs,
        )?,
        questions,
        participants,
        created_at: parse_timestamp(&row.created_at)?,
        started_at: row.started_at.as_deref().map(parse_timestamp).transpose()?,
        ended_at: row.ended_at.as_deref().map(parse_timestamp).transpose()?,
    };

    Ok((room, row.version))
}

fn build_participant(
    row: ParticipantRow,
    answers: Vec<AnswerRecord>,
) -> Result<ParticipantState, PersistenceError> {
    let score: u32 = u32::try_from(row.score).map_err(|_| {
        PersistenceError::ReconstructionError(format!("Negative score for '{}'", row.identity))
    })?;

    Ok(ParticipantState {
        identity: Identity::new(&row.identity),
        display_name: row.display_name,
        join_order: from_column_int(row.join_order, "Join order")?,
        answers,
        score,
        total_time: row.total_time,
        is_finished: row.is_finished != 0,
        joined_at: parse_timestamp(&row.joined_at)?,
        finished_at: row.finished_at.as_deref().map(parse_timestamp).transpose()?,
    })
}
