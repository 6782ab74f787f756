// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use quiz_room_domain::{Difficulty, NewRoom, Room, RoomId, RoomStatus};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewRoomQuestion, format_timestamp, to_column_int};
use crate::diesel_schema::{room_questions, rooms};
use crate::error::{PersistenceError, is_unique_violation};
use crate::mutations::transitions::insert_participant;

/// Stores a new room with its question snapshot and initial roster.
///
/// The room starts in `waiting` at version 0.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateRoomCode` if the join code is taken,
/// or another error if any insert fails. Nothing is written on error.
pub fn insert_room(
    conn: &mut SqliteConnection,
    new_room: &NewRoom,
) -> Result<Room, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let time_limit_secs: Option<i32> = new_room
            .meta
            .time_limit_secs
            .map(i32::try_from)
            .transpose()
            .map_err(|_| PersistenceError::Other(String::from("Time limit out of range")))?;

        let insert_result = diesel::insert_into(rooms::table)
            .values((
                rooms::room_code.eq(new_room.code.value()),
                rooms::host_identity.eq(new_room.host.value()),
                rooms::status.eq(RoomStatus::Waiting.as_str()),
                rooms::version.eq(0_i64),
                rooms::source_question_set_id.eq(new_room.source_question_set_id),
                rooms::title.eq(&new_room.meta.title),
                rooms::description.eq(new_room.meta.description.as_deref()),
                rooms::difficulty.eq(new_room.meta.difficulty.as_ref().map(Difficulty::as_str)),
                rooms::time_limit_secs.eq(time_limit_secs),
                rooms::question_count
                    .eq(to_column_int(new_room.questions.len(), "Question count")?),
                rooms::created_at.eq(format_timestamp(new_room.created_at)?),
            ))
            .execute(conn);

        match insert_result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(PersistenceError::DuplicateRoomCode(
                    new_room.code.value().to_string(),
                ));
            }
            Err(e) => return Err(PersistenceError::from(e)),
        }

        let room_id: i64 = conn.get_last_insert_rowid()?;

        let question_rows: Vec<NewRoomQuestion<'_>> = new_room
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| -> Result<NewRoomQuestion<'_>, PersistenceError> {
                Ok(NewRoomQuestion {
                    room_id,
                    position: to_column_int(position, "Question position")?,
                    text: &question.text,
                    options_json: serde_json::to_string(&question.options)?,
                    correct_answer: &question.correct_answer,
                })
            })
            .collect::<Result<_, _>>()?;

        if !question_rows.is_empty() {
            diesel::insert_into(room_questions::table)
                .values(&question_rows)
                .execute(conn)?;
        }

        for participant in &new_room.participants {
            insert_participant(conn, room_id, participant)?;
        }

        info!(
            room_id,
            code = %new_room.code,
            host = %new_room.host,
            question_count = new_room.questions.len(),
            "Created room"
        );

        Ok(Room {
            room_id: RoomId::new(room_id),
            code: new_room.code.clone(),
            host: new_room.host.clone(),
            status: RoomStatus::Waiting,
            source_question_set_id: new_room.source_question_set_id,
            meta: new_room.meta.clone(),
            questions: new_room.questions.clone(),
            participants: new_room.participants.clone(),
            created_at: new_room.created_at,
            started_at: None,
            ended_at: None,
        })
    })
}
