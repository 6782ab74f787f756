// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room operations.
//!
//! Every mutating operation runs the same cycle: load the room and its
//! version, apply the command in the core, and persist the resulting change
//! guarded by that version. A version conflict means another caller got
//! there first; the cycle restarts from a fresh read, up to
//! [`MAX_MUTATION_ATTEMPTS`] times.

use quiz_room::{Command, RoomChange, TransitionResult, apply};
use quiz_room_domain::{
    Identity, NewRoom, ParticipantState, QuestionSet, Room, RoomCode, RoomId, RoomStatus,
    generate_room_code, rank_participants,
};
use quiz_room_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::AuthenticatedParticipant;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CompleteParticipantResponse, CreateRoomRequest, CreateRoomResponse, JoinRoomRequest,
    JoinRoomResponse, LeaderboardEntryView, LeaderboardResponse, ListQuestionSetsResponse,
    QuestionSetInfo, RoomResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};

/// Maximum read-apply-persist cycles per mutation.
pub const MAX_MUTATION_ATTEMPTS: u32 = 5;

/// Maximum join codes tried before room creation gives up.
pub const MAX_CODE_ATTEMPTS: u32 = 8;

/// Applies `command` to a room with optimistic concurrency.
///
/// # Errors
///
/// Returns the translated rule or storage error, or `ApiError::Unavailable`
/// if every attempt lost a race.
fn mutate_room(
    persistence: &mut Persistence,
    room_id: RoomId,
    actor: &Identity,
    command: &Command,
) -> Result<TransitionResult, ApiError> {
    mutate_room_with(persistence, room_id, actor, command, |_| {})
}

/// [`mutate_room`] with a hook that runs after the core accepted the
/// command and before its change is persisted. The hook receives the
/// 1-based attempt number.
pub(crate) fn mutate_room_with<F>(
    persistence: &mut Persistence,
    room_id: RoomId,
    actor: &Identity,
    command: &Command,
    mut before_persist: F,
) -> Result<TransitionResult, ApiError>
where
    F: FnMut(u32),
{
    for attempt in 1..=MAX_MUTATION_ATTEMPTS {
        let (room, version) = persistence
            .load_room(room_id)
            .map_err(translate_persistence_error)?;

        let result: TransitionResult = apply(
            &room,
            actor,
            command.clone(),
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_core_error)?;

        before_persist(attempt);

        match persistence.persist_transition(room_id, version, &result.change) {
            Ok(new_version) => {
                debug!(
                    room_id = room_id.value(),
                    identity = %actor,
                    command = command.name(),
                    new_version,
                    "Room mutation committed"
                );
                return Ok(result);
            }
            Err(PersistenceError::VersionConflict { .. }) => {
                warn!(
                    room_id = room_id.value(),
                    identity = %actor,
                    command = command.name(),
                    attempt,
                    "Room changed concurrently, retrying"
                );
            }
            Err(e) => return Err(translate_persistence_error(e)),
        }
    }

    Err(ApiError::Unavailable {
        message: format!(
            "Room {room_id} is busy; gave up after {MAX_MUTATION_ATTEMPTS} attempts"
        ),
    })
}

fn load_room(persistence: &mut Persistence, room_id: RoomId) -> Result<Room, ApiError> {
    persistence
        .load_room(room_id)
        .map(|(room, _)| room)
        .map_err(translate_persistence_error)
}

/// Lists the question sets rooms can be created from.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_question_sets(
    persistence: &mut Persistence,
) -> Result<ListQuestionSetsResponse, ApiError> {
    let question_sets: Vec<QuestionSetInfo> = persistence
        .list_question_sets()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|summary| QuestionSetInfo {
            question_set_id: summary.question_set_id,
            title: summary.title,
            question_count: summary.question_count,
        })
        .collect();

    Ok(ListQuestionSetsResponse { question_sets })
}

/// Creates a room from a question set, with the caller as host.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the question set does not exist,
/// `ApiError::InvalidArgument` if it has no questions, or
/// `ApiError::Unavailable` if no free join code was found.
pub fn create_room(
    persistence: &mut Persistence,
    request: &CreateRoomRequest,
    participant: &AuthenticatedParticipant,
) -> Result<CreateRoomResponse, ApiError> {
    let source: QuestionSet = persistence
        .get_question_set(request.question_set_id)
        .map_err(translate_persistence_error)?;
    let display_name: String = participant.resolve_display_name(request.display_name.as_deref());

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let new_room: NewRoom = quiz_room::create_room(
            &source,
            &participant.identity,
            &display_name,
            generate_room_code(),
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_core_error)?;

        match persistence.insert_room(&new_room) {
            Ok(room) => {
                info!(
                    room_id = room.room_id.value(),
                    code = %room.code,
                    host = %room.host,
                    question_set_id = request.question_set_id,
                    "Room created"
                );
                return Ok(CreateRoomResponse {
                    room_id: room.room_id.value(),
                    room_code: room.code.value().to_string(),
                    status: room.status,
                    message: format!(
                        "Created room {} from '{}' with {} questions",
                        room.code,
                        room.meta.title,
                        room.question_count()
                    ),
                });
            }
            Err(PersistenceError::DuplicateRoomCode(code)) => {
                warn!(code = %code, attempt, "Room code collision, drawing another");
            }
            Err(e) => return Err(translate_persistence_error(e)),
        }
    }

    Err(ApiError::Unavailable {
        message: format!("No free room code found after {MAX_CODE_ATTEMPTS} attempts"),
    })
}

/// Seats the caller in a room found by code or id.
///
/// Joining again is a no-op that returns the existing seat.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the room does not exist,
/// `ApiError::InvalidArgument` if neither code nor id is given, or
/// `ApiError::Conflict` if the room is completed.
pub fn join_room(
    persistence: &mut Persistence,
    request: &JoinRoomRequest,
    participant: &AuthenticatedParticipant,
) -> Result<JoinRoomResponse, ApiError> {
    let room_id: RoomId = match (&request.room_code, request.room_id) {
        (Some(code), _) => {
            let code: RoomCode = RoomCode::parse(code).map_err(translate_domain_error)?;
            persistence
                .find_room_id_by_code(&code)
                .map_err(translate_persistence_error)?
        }
        (None, Some(room_id)) => RoomId::new(room_id),
        (None, None) => {
            return Err(ApiError::InvalidArgument {
                field: String::from("room_code"),
                message: String::from("Either room_code or room_id is required"),
            });
        }
    };

    let command: Command = Command::Join {
        display_name: participant.resolve_display_name(request.display_name.as_deref()),
    };
    let result: TransitionResult =
        mutate_room(persistence, room_id, &participant.identity, &command)?;

    let participant_index: usize = result
        .new_room
        .participant_index(&participant.identity)
        .ok_or_else(|| ApiError::Internal {
            message: format!("'{}' missing from roster after join", participant.identity),
        })?;

    Ok(JoinRoomResponse {
        room_id: result.new_room.room_id.value(),
        room_code: result.new_room.code.value().to_string(),
        participant_index,
        status: result.new_room.status,
        newly_joined: !result.change.is_unchanged(),
    })
}

/// Starts a room. Host only; repeating it is harmless.
///
/// # Errors
///
/// Returns `ApiError::PermissionDenied` for non-hosts, or
/// `ApiError::Conflict` if the room is completed.
pub fn activate_room(
    persistence: &mut Persistence,
    room_id: RoomId,
    participant: &AuthenticatedParticipant,
) -> Result<RoomResponse, ApiError> {
    let result: TransitionResult = mutate_room(
        persistence,
        room_id,
        &participant.identity,
        &Command::Activate,
    )?;
    Ok(RoomResponse::for_requester(
        &result.new_room,
        &participant.identity,
    ))
}

/// Returns the caller's view of a room.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the room does not exist.
pub fn get_room(
    persistence: &mut Persistence,
    room_id: RoomId,
    participant: &AuthenticatedParticipant,
) -> Result<RoomResponse, ApiError> {
    let room: Room = load_room(persistence, room_id)?;
    Ok(RoomResponse::for_requester(&room, &participant.identity))
}

/// Records one answer for the caller.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the room or seat does not exist,
/// `ApiError::InvalidArgument` for a bad index, answer or time, or
/// `ApiError::Conflict` for a repeated question or a room not accepting
/// answers.
pub fn submit_answer(
    persistence: &mut Persistence,
    room_id: RoomId,
    request: &SubmitAnswerRequest,
    participant: &AuthenticatedParticipant,
) -> Result<SubmitAnswerResponse, ApiError> {
    let command: Command = Command::SubmitAnswer {
        question_index: request.question_index,
        user_answer: request.user_answer.clone(),
        time_spent: request.time_spent,
    };
    let result: TransitionResult =
        mutate_room(persistence, room_id, &participant.identity, &command)?;

    let is_correct: bool = match &result.change {
        RoomChange::AnswerRecorded { record, .. } => record.is_correct,
        other => {
            return Err(ApiError::Internal {
                message: format!("Unexpected change for an answer: {other:?}"),
            });
        }
    };
    let seat: &ParticipantState = result
        .new_room
        .participant(&participant.identity)
        .ok_or_else(|| ApiError::Internal {
            message: format!("'{}' missing from roster", participant.identity),
        })?;

    Ok(SubmitAnswerResponse {
        accepted: true,
        is_correct,
        score: seat.score,
        answered_count: seat.answers.len(),
    })
}

/// Freezes the caller's score and total time.
///
/// Repeating it returns the frozen values.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the room or seat does not exist, or
/// `ApiError::Conflict` if the room has not started.
pub fn complete_participant(
    persistence: &mut Persistence,
    room_id: RoomId,
    participant: &AuthenticatedParticipant,
) -> Result<CompleteParticipantResponse, ApiError> {
    let result: TransitionResult = mutate_room(
        persistence,
        room_id,
        &participant.identity,
        &Command::CompleteParticipant,
    )?;

    let seat: &ParticipantState = result
        .new_room
        .participant(&participant.identity)
        .ok_or_else(|| ApiError::Internal {
            message: format!("'{}' missing from roster", participant.identity),
        })?;
    let total_time: f64 = seat.total_time.ok_or_else(|| ApiError::Internal {
        message: format!("'{}' finished without a total time", participant.identity),
    })?;

    if result.new_room.status == RoomStatus::Completed && !result.change.is_unchanged() {
        info!(room_id = room_id.value(), "Last participant finished");
    }

    Ok(CompleteParticipantResponse {
        score: seat.score,
        total_time,
        room_status: result.new_room.status,
    })
}

/// Closes a room, finalizing everyone still playing. Host only.
///
/// # Errors
///
/// Returns `ApiError::PermissionDenied` for non-hosts, or
/// `ApiError::Conflict` if the room has not started.
pub fn end_room(
    persistence: &mut Persistence,
    room_id: RoomId,
    participant: &AuthenticatedParticipant,
) -> Result<RoomResponse, ApiError> {
    let result: TransitionResult = mutate_room(
        persistence,
        room_id,
        &participant.identity,
        &Command::EndRoom,
    )?;
    Ok(RoomResponse::for_requester(
        &result.new_room,
        &participant.identity,
    ))
}

/// Ranks the room's participants.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the room does not exist.
pub fn get_leaderboard(
    persistence: &mut Persistence,
    room_id: RoomId,
) -> Result<LeaderboardResponse, ApiError> {
    let room: Room = load_room(persistence, room_id)?;
    let entries: Vec<LeaderboardEntryView> = rank_participants(&room.participants)
        .iter()
        .map(LeaderboardEntryView::from)
        .collect();

    Ok(LeaderboardResponse {
        room_id: room.room_id.value(),
        status: room.status,
        entries,
    })
}
