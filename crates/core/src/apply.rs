// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quiz_room_domain::{
    AnswerRecord, DomainError, Identity, ParticipantState, Question, Room, RoomStatus,
    validate_display_name, validate_question_index, validate_time_spent, validate_user_answer,
};
use time::OffsetDateTime;

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{FinalizedParticipant, RoomChange, TransitionResult};

/// Applies a command to a room, producing the next room and the write that
/// persists it.
///
/// This function is pure. It never mutates `room`, and identical inputs
/// always yield identical outputs.
///
/// # Arguments
///
/// * `room` - The current room (immutable)
/// * `actor` - The authenticated identity issuing the command
/// * `command` - The command to apply
/// * `now` - The transition timestamp
///
/// # Errors
///
/// Returns an error if the command violates a room rule. The room is left
/// unchanged on error.
pub fn apply(
    room: &Room,
    actor: &Identity,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::Activate => activate(room, actor, now),
        Command::Join { display_name } => join(room, actor, &display_name, now),
        Command::SubmitAnswer {
            question_index,
            user_answer,
            time_spent,
        } => submit_answer(room, actor, question_index, user_answer, time_spent),
        Command::CompleteParticipant => complete_participant(room, actor, now),
        Command::EndRoom => end_room(room, actor, now),
    }
}

fn unchanged(room: &Room) -> TransitionResult {
    TransitionResult {
        new_room: room.clone(),
        change: RoomChange::Unchanged,
    }
}

fn require_host(room: &Room, actor: &Identity) -> Result<(), CoreError> {
    if room.is_host(actor) {
        Ok(())
    } else {
        Err(CoreError::DomainViolation(DomainError::NotHost {
            room_id: room.room_id.value(),
            identity: actor.value().to_string(),
        }))
    }
}

/// Returns the actor's roster position, or `NotParticipant`.
fn require_participant(room: &Room, actor: &Identity) -> Result<usize, CoreError> {
    room.participant_index(actor).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::NotParticipant {
            room_id: room.room_id.value(),
            identity: actor.value().to_string(),
        })
    })
}

fn require_active(room: &Room) -> Result<(), CoreError> {
    match room.status {
        RoomStatus::Active => Ok(()),
        RoomStatus::Waiting => Err(CoreError::DomainViolation(DomainError::RoomNotStarted {
            room_id: room.room_id.value(),
        })),
        RoomStatus::Completed => Err(CoreError::DomainViolation(DomainError::RoomCompleted {
            room_id: room.room_id.value(),
        })),
    }
}

fn activate(
    room: &Room,
    actor: &Identity,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    require_host(room, actor)?;

    match room.status {
        RoomStatus::Active => Ok(unchanged(room)),
        RoomStatus::Completed => Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: RoomStatus::Completed,
                to: RoomStatus::Active,
            },
        )),
        RoomStatus::Waiting => {
            let mut new_room: Room = room.clone();
            new_room.status = RoomStatus::Active;
            new_room.started_at = Some(now);
            Ok(TransitionResult {
                new_room,
                change: RoomChange::Activated { started_at: now },
            })
        }
    }
}

fn join(
    room: &Room,
    actor: &Identity,
    display_name: &str,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    // Rejoining keeps the existing seat and progress, whatever the status.
    if room.participant_index(actor).is_some() {
        return Ok(unchanged(room));
    }

    if !room.status.admits_participants() {
        return Err(CoreError::DomainViolation(DomainError::RoomCompleted {
            room_id: room.room_id.value(),
        }));
    }

    validate_display_name(display_name)?;

    let participant: ParticipantState = ParticipantState::new(
        actor.clone(),
        display_name.trim().to_string(),
        room.participants.len(),
        now,
    );

    let mut new_room: Room = room.clone();
    new_room.participants.push(participant.clone());

    Ok(TransitionResult {
        new_room,
        change: RoomChange::ParticipantJoined { participant },
    })
}

fn submit_answer(
    room: &Room,
    actor: &Identity,
    question_index: i64,
    user_answer: String,
    time_spent: f64,
) -> Result<TransitionResult, CoreError> {
    let position: usize = require_participant(room, actor)?;
    require_active(room)?;

    let index: usize = validate_question_index(question_index, room.question_count())?;
    validate_time_spent(time_spent)?;
    validate_user_answer(&user_answer)?;

    let participant: &ParticipantState = room
        .participants
        .get(position)
        .ok_or_else(|| CoreError::Internal(format!("Roster position {position} missing")))?;

    if participant.is_finished {
        return Err(CoreError::DomainViolation(DomainError::ParticipantFinished {
            room_id: room.room_id.value(),
            identity: actor.value().to_string(),
        }));
    }

    if participant.has_answered(index) {
        return Err(CoreError::DomainViolation(DomainError::DuplicateAnswer {
            room_id: room.room_id.value(),
            identity: actor.value().to_string(),
            question_index: index,
        }));
    }

    let question: &Question = room
        .question(index)
        .ok_or_else(|| CoreError::Internal(format!("Question {index} missing from snapshot")))?;

    let record: AnswerRecord = AnswerRecord {
        question_index: index,
        is_correct: question.is_correct(&user_answer),
        user_answer,
        time_spent,
    };

    let mut new_room: Room = room.clone();
    let target: &mut ParticipantState = new_room
        .participants
        .get_mut(position)
        .ok_or_else(|| CoreError::Internal(format!("Roster position {position} missing")))?;
    target.record_answer(record.clone());

    Ok(TransitionResult {
        new_room,
        change: RoomChange::AnswerRecorded {
            identity: actor.clone(),
            record,
        },
    })
}

fn complete_participant(
    room: &Room,
    actor: &Identity,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let position: usize = require_participant(room, actor)?;

    if room.status == RoomStatus::Waiting {
        return Err(CoreError::DomainViolation(DomainError::RoomNotStarted {
            room_id: room.room_id.value(),
        }));
    }

    let already_finished: bool = room
        .participants
        .get(position)
        .is_some_and(|p| p.is_finished);
    if already_finished {
        return Ok(unchanged(room));
    }

    // A completed room finalizes everyone, so nobody unfinished remains there.
    if room.status == RoomStatus::Completed {
        return Err(CoreError::Internal(format!(
            "Room {} is completed but '{}' is unfinished",
            room.room_id, actor
        )));
    }

    let mut new_room: Room = room.clone();
    let target: &mut ParticipantState = new_room
        .participants
        .get_mut(position)
        .ok_or_else(|| CoreError::Internal(format!("Roster position {position} missing")))?;
    let (score, total_time) = target.finalize(now);

    let result: FinalizedParticipant = FinalizedParticipant {
        identity: actor.clone(),
        score,
        total_time,
        finished_at: now,
    };

    let room_completed_at: Option<OffsetDateTime> = if new_room.all_finished() {
        new_room.status = RoomStatus::Completed;
        new_room.ended_at = Some(now);
        Some(now)
    } else {
        None
    };

    Ok(TransitionResult {
        new_room,
        change: RoomChange::ParticipantFinished {
            result,
            room_completed_at,
        },
    })
}

fn end_room(
    room: &Room,
    actor: &Identity,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    require_host(room, actor)?;

    match room.status {
        RoomStatus::Completed => Ok(unchanged(room)),
        RoomStatus::Waiting => Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: RoomStatus::Waiting,
                to: RoomStatus::Completed,
            },
        )),
        RoomStatus::Active => {
            let mut new_room: Room = room.clone();
            let finalized: Vec<FinalizedParticipant> = new_room
                .participants
                .iter_mut()
                .filter(|p| !p.is_finished)
                .map(|p| {
                    let (score, total_time) = p.finalize(now);
                    FinalizedParticipant {
                        identity: p.identity.clone(),
                        score,
                        total_time,
                        finished_at: now,
                    }
                })
                .collect();
            new_room.status = RoomStatus::Completed;
            new_room.ended_at = Some(now);

            Ok(TransitionResult {
                new_room,
                change: RoomChange::RoomEnded {
                    ended_at: now,
                    finalized,
                },
            })
        }
    }
}
