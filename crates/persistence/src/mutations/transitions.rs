// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned transition persistence.
//!
//! Each transition first claims the room by bumping `rooms.version` under a
//! `WHERE version = expected` guard, then writes only the rows the change
//! names. A stale reader finds zero rows to claim and gets
//! `VersionConflict` instead of overwriting a newer state.

use diesel::prelude::*;
use diesel::SqliteConnection;
use quiz_room::{FinalizedParticipant, RoomChange};
use quiz_room_domain::{AnswerRecord, Identity, ParticipantState, RoomId, RoomStatus};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{NewAnswer, NewParticipant, format_timestamp, to_column_int};
use crate::diesel_schema::{room_answers, room_participants, rooms};
use crate::error::{PersistenceError, is_unique_violation};
use crate::queries::rooms::lookup_participant_id;

/// Persists one room transition atomically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `room_id` - The room the change applies to
/// * `expected_version` - The version the change was computed from
/// * `change` - The targeted write
///
/// # Returns
///
/// The room's version after the write. An unchanged transition writes
/// nothing and returns `expected_version`.
///
/// # Errors
///
/// Returns `PersistenceError::VersionConflict` if the room moved on since
/// `expected_version`, `PersistenceError::DuplicateAnswer` if the answer row
/// already exists, or another error if a write fails. Nothing is written on
/// error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    room_id: RoomId,
    expected_version: i64,
    change: &RoomChange,
) -> Result<i64, PersistenceError> {
    if change.is_unchanged() {
        return Ok(expected_version);
    }

    let id: i64 = room_id.value();

    conn.immediate_transaction(|conn| {
        claim_version(conn, id, expected_version)?;

        match change {
            RoomChange::Unchanged => {}
            RoomChange::Activated { started_at } => {
                set_room_status(conn, id, RoomStatus::Active)?;
                diesel::update(rooms::table.filter(rooms::room_id.eq(id)))
                    .set(rooms::started_at.eq(Some(format_timestamp(*started_at)?)))
                    .execute(conn)?;
            }
            RoomChange::ParticipantJoined { participant } => {
                insert_participant(conn, id, participant)?;
            }
            RoomChange::AnswerRecorded { identity, record } => {
                record_answer(conn, id, identity, record)?;
            }
            RoomChange::ParticipantFinished {
                result,
                room_completed_at,
            } => {
                finalize_participant(conn, id, result)?;
                if let Some(ended_at) = room_completed_at {
                    complete_room(conn, id, *ended_at)?;
                }
            }
            RoomChange::RoomEnded {
                ended_at,
                finalized,
            } => {
                for result in finalized {
                    finalize_participant(conn, id, result)?;
                }
                complete_room(conn, id, *ended_at)?;
            }
        }

        let new_version: i64 = expected_version + 1;
        info!(room_id = id, new_version, "Persisted room transition");
        Ok(new_version)
    })
}

/// Bumps the room version if it still equals `expected_version`.
fn claim_version(
    conn: &mut SqliteConnection,
    room_id: i64,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        rooms::table
            .filter(rooms::room_id.eq(room_id))
            .filter(rooms::version.eq(expected_version)),
    )
    .set(rooms::version.eq(rooms::version + 1))
    .execute(conn)?;

    if updated == 1 {
        return Ok(());
    }

    let exists: i64 = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .count()
        .get_result(conn)?;

    if exists == 0 {
        Err(PersistenceError::RoomNotFound(room_id))
    } else {
        debug!(room_id, expected_version, "Room version moved on");
        Err(PersistenceError::VersionConflict {
            room_id,
            expected_version,
        })
    }
}

fn set_room_status(
    conn: &mut SqliteConnection,
    room_id: i64,
    status: RoomStatus,
) -> Result<(), PersistenceError> {
    diesel::update(rooms::table.filter(rooms::room_id.eq(room_id)))
        .set(rooms::status.eq(status.as_str()))
        .execute(conn)?;
    Ok(())
}

fn complete_room(
    conn: &mut SqliteConnection,
    room_id: i64,
    ended_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    set_room_status(conn, room_id, RoomStatus::Completed)?;
    diesel::update(rooms::table.filter(rooms::room_id.eq(room_id)))
        .set(rooms::ended_at.eq(Some(format_timestamp(ended_at)?)))
        .execute(conn)?;
    info!(room_id, "Room completed");
    Ok(())
}

/// Inserts one roster entry with whatever progress it carries.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_participant(
    conn: &mut SqliteConnection,
    room_id: i64,
    participant: &ParticipantState,
) -> Result<(), PersistenceError> {
    let score: i32 = i32::try_from(participant.score)
        .map_err(|_| PersistenceError::Other(String::from("Score out of range")))?;

    let row: NewParticipant<'_> = NewParticipant {
        room_id,
        identity: participant.identity.value(),
        display_name: &participant.display_name,
        join_order: to_column_int(participant.join_order, "Join order")?,
        score,
        total_time: participant.total_time,
        is_finished: i32::from(participant.is_finished),
        joined_at: format_timestamp(participant.joined_at)?,
        finished_at: participant.finished_at.map(format_timestamp).transpose()?,
    };

    diesel::insert_into(room_participants::table)
        .values(&row)
        .execute(conn)?;

    debug!(
        room_id,
        identity = %participant.identity,
        join_order = participant.join_order,
        "Inserted participant"
    );
    Ok(())
}

/// Appends one answer and moves the score by its correctness.
fn record_answer(
    conn: &mut SqliteConnection,
    room_id: i64,
    identity: &Identity,
    record: &AnswerRecord,
) -> Result<(), PersistenceError> {
    let participant_id: i64 = lookup_participant_id(conn, room_id, identity)?;

    let row: NewAnswer<'_> = NewAnswer {
        participant_id,
        question_index: to_column_int(record.question_index, "Question index")?,
        user_answer: &record.user_answer,
        is_correct: i32::from(record.is_correct),
        time_spent: record.time_spent,
    };

    match diesel::insert_into(room_answers::table)
        .values(&row)
        .execute(conn)
    {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(PersistenceError::DuplicateAnswer {
                room_id,
                identity: identity.value().to_string(),
                question_index: record.question_index,
            });
        }
        Err(e) => return Err(PersistenceError::from(e)),
    }

    if record.is_correct {
        diesel::update(
            room_participants::table
                .filter(room_participants::participant_id.eq(participant_id)),
        )
        .set(room_participants::score.eq(room_participants::score + 1))
        .execute(conn)?;
    }

    debug!(
        room_id,
        identity = %identity,
        question_index = record.question_index,
        is_correct = record.is_correct,
        "Recorded answer"
    );
    Ok(())
}

/// Freezes one participant. Already finished rows are left untouched.
fn finalize_participant(
    conn: &mut SqliteConnection,
    room_id: i64,
    result: &FinalizedParticipant,
) -> Result<(), PersistenceError> {
    let participant_id: i64 = lookup_participant_id(conn, room_id, &result.identity)?;
    let score: i32 = i32::try_from(result.score)
        .map_err(|_| PersistenceError::Other(String::from("Score out of range")))?;

    diesel::update(
        room_participants::table
            .filter(room_participants::participant_id.eq(participant_id))
            .filter(room_participants::is_finished.eq(0)),
    )
    .set((
        room_participants::score.eq(score),
        room_participants::total_time.eq(Some(result.total_time)),
        room_participants::is_finished.eq(1),
        room_participants::finished_at.eq(Some(format_timestamp(result.finished_at)?)),
    ))
    .execute(conn)?;

    debug!(
        room_id,
        identity = %result.identity,
        score = result.score,
        total_time = result.total_time,
        "Finalized participant"
    );
    Ok(())
}
