// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quiz_room_domain::{QuestionSet, RoomId, RoomStatus};
use quiz_room_persistence::Persistence;

use crate::{
    ApiError, CompleteParticipantResponse, CreateRoomRequest, CreateRoomResponse, JoinRoomRequest,
    JoinRoomResponse, ListQuestionSetsResponse, RoomResponse, SubmitAnswerResponse,
    activate_room, complete_participant, create_room, end_room, get_leaderboard, get_room,
    join_room, list_question_sets, submit_answer,
};

use super::helpers::{
    answer, create_test_question_set, guest, host, join_by_code, setup, setup_room,
};

// ============================================================================
// Question sets and room creation
// ============================================================================

#[test]
fn test_list_question_sets() {
    let (mut persistence, question_set_id) = setup();
    let response: ListQuestionSetsResponse = list_question_sets(&mut persistence).unwrap();
    assert_eq!(response.question_sets.len(), 1);
    assert_eq!(response.question_sets[0].question_set_id, question_set_id);
    assert_eq!(response.question_sets[0].title, "Capitals");
    assert_eq!(response.question_sets[0].question_count, 3);
}

#[test]
fn test_create_room_seats_host() {
    let (mut persistence, question_set_id) = setup();
    let response: CreateRoomResponse = create_room(
        &mut persistence,
        &CreateRoomRequest {
            question_set_id,
            display_name: None,
        },
        &host(),
    )
    .unwrap();

    assert_eq!(response.status, RoomStatus::Waiting);
    assert_eq!(response.room_code.len(), 6);

    let room: RoomResponse =
        get_room(&mut persistence, RoomId::new(response.room_id), &host()).unwrap();
    assert!(room.is_host);
    assert_eq!(room.question_count, 3);
    assert_eq!(room.participants.len(), 1);
    assert_eq!(room.participants[0].display_name, "Hannah Host");
    assert_eq!(room.participants[0].join_order, 0);
}

#[test]
fn test_create_room_unknown_question_set() {
    let (mut persistence, _) = setup();
    let result: Result<CreateRoomResponse, ApiError> = create_room(
        &mut persistence,
        &CreateRoomRequest {
            question_set_id: 999,
            display_name: None,
        },
        &host(),
    );
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_create_room_rejects_unanswerable_question() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut question_set: QuestionSet = create_test_question_set();
    question_set.questions[1].correct_answer = String::from("D");
    let question_set_id: i64 = persistence.insert_question_set(&question_set).unwrap();

    let result: Result<CreateRoomResponse, ApiError> = create_room(
        &mut persistence,
        &CreateRoomRequest {
            question_set_id,
            display_name: None,
        },
        &host(),
    );

    assert!(
        matches!(result, Err(ApiError::InvalidArgument { field, .. }) if field == "question_set_id")
    );
}

// ============================================================================
// Joining
// ============================================================================

#[test]
fn test_join_by_code_is_case_insensitive() {
    let (mut persistence, room_id, code) = setup_room();
    let response: JoinRoomResponse = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_code: Some(code.to_lowercase()),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    )
    .unwrap();

    assert_eq!(response.room_id, room_id.value());
    assert_eq!(response.participant_index, 1);
    assert!(response.newly_joined);
}

#[test]
fn test_join_by_id() {
    let (mut persistence, room_id, _) = setup_room();
    let response: JoinRoomResponse = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_id: Some(room_id.value()),
            display_name: Some(String::from("Gus")),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    )
    .unwrap();
    assert_eq!(response.participant_index, 1);

    let room: RoomResponse = get_room(&mut persistence, room_id, &guest(1)).unwrap();
    assert_eq!(room.participants[1].display_name, "Gus");
}

#[test]
fn test_rejoin_is_noop() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));

    let response: JoinRoomResponse = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_code: Some(code),
            display_name: Some(String::from("Renamed")),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    )
    .unwrap();
    assert!(!response.newly_joined);
    assert_eq!(response.participant_index, 1);

    let room: RoomResponse = get_room(&mut persistence, room_id, &guest(1)).unwrap();
    assert_eq!(room.participants.len(), 2);
    assert_eq!(room.participants[1].display_name, "guest-1");
}

#[test]
fn test_join_requires_code_or_id() {
    let (mut persistence, _, _) = setup_room();
    let result: Result<JoinRoomResponse, ApiError> =
        join_room(&mut persistence, &JoinRoomRequest::default(), &guest(1));
    assert!(matches!(result, Err(ApiError::InvalidArgument { .. })));
}

#[test]
fn test_join_malformed_code() {
    let (mut persistence, _, _) = setup_room();
    let result: Result<JoinRoomResponse, ApiError> = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_code: Some(String::from("AB")),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    );
    assert!(matches!(result, Err(ApiError::InvalidArgument { field, .. }) if field == "room_code"));
}

#[test]
fn test_join_unknown_code() {
    let (mut persistence, _, code) = setup_room();
    let unknown: String = if code == "ZZZZZZ" {
        String::from("YYYYYY")
    } else {
        String::from("ZZZZZZ")
    };
    let result: Result<JoinRoomResponse, ApiError> = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_code: Some(unknown),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    );
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_join_completed_room_conflicts() {
    let (mut persistence, room_id, code) = setup_room();
    activate_room(&mut persistence, room_id, &host()).unwrap();
    end_room(&mut persistence, room_id, &host()).unwrap();

    let result: Result<JoinRoomResponse, ApiError> = join_room(
        &mut persistence,
        &JoinRoomRequest {
            room_code: Some(code),
            ..JoinRoomRequest::default()
        },
        &guest(1),
    );
    assert!(matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "room_completed"));
}

#[test]
fn test_late_join_gets_zero_progress() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();
    submit_answer(&mut persistence, room_id, &answer(0, "A", 2.0), &guest(1)).unwrap();

    join_by_code(&mut persistence, &code, &guest(2));
    let room: RoomResponse = get_room(&mut persistence, room_id, &guest(2)).unwrap();
    assert_eq!(room.status, RoomStatus::Active);
    assert_eq!(room.participants[2].join_order, 2);
    assert_eq!(room.participants[2].answered_count, 0);
    assert_eq!(room.participants[2].score, 0);

    let response: SubmitAnswerResponse =
        submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(2)).unwrap();
    assert!(response.is_correct);
}

// ============================================================================
// Activation and ending
// ============================================================================

#[test]
fn test_activate_is_idempotent() {
    let (mut persistence, room_id, _) = setup_room();
    let first: RoomResponse = activate_room(&mut persistence, room_id, &host()).unwrap();
    let second: RoomResponse = activate_room(&mut persistence, room_id, &host()).unwrap();

    assert_eq!(first.status, RoomStatus::Active);
    assert_eq!(second.status, RoomStatus::Active);
    assert!(first.started_at.is_some());
    assert_eq!(first.started_at, second.started_at);
}

#[test]
fn test_activate_requires_host() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    let result: Result<RoomResponse, ApiError> =
        activate_room(&mut persistence, room_id, &guest(1));
    assert!(matches!(result, Err(ApiError::PermissionDenied { .. })));
}

#[test]
fn test_activate_unknown_room() {
    let (mut persistence, _) = setup();
    let result: Result<RoomResponse, ApiError> =
        activate_room(&mut persistence, RoomId::new(404), &host());
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_end_waiting_room_conflicts() {
    let (mut persistence, room_id, _) = setup_room();
    let result: Result<RoomResponse, ApiError> = end_room(&mut persistence, room_id, &host());
    assert!(
        matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "invalid_status_transition")
    );
}

#[test]
fn test_end_room_finalizes_everyone() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();
    submit_answer(&mut persistence, room_id, &answer(0, "A", 4.0), &guest(1)).unwrap();

    let room: RoomResponse = end_room(&mut persistence, room_id, &host()).unwrap();
    assert_eq!(room.status, RoomStatus::Completed);
    assert!(room.ended_at.is_some());
    assert!(room.participants.iter().all(|p| p.is_finished));
    assert_eq!(room.participants[1].score, 1);
    assert_eq!(room.participants[1].total_time, Some(4.0));

    let again: RoomResponse = end_room(&mut persistence, room_id, &host()).unwrap();
    assert_eq!(again.ended_at, room.ended_at);
}

#[test]
fn test_end_room_requires_host() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();
    let result: Result<RoomResponse, ApiError> = end_room(&mut persistence, room_id, &guest(1));
    assert!(matches!(result, Err(ApiError::PermissionDenied { .. })));
}

// ============================================================================
// Answers
// ============================================================================

#[test]
fn test_submit_before_activation_conflicts() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    let result: Result<SubmitAnswerResponse, ApiError> =
        submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(1));
    assert!(matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "room_not_started"));
}

#[test]
fn test_submit_by_stranger_is_not_found() {
    let (mut persistence, room_id, _) = setup_room();
    activate_room(&mut persistence, room_id, &host()).unwrap();
    let result: Result<SubmitAnswerResponse, ApiError> =
        submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(9));
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_submit_computes_correctness_server_side() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();

    let right: SubmitAnswerResponse =
        submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(1)).unwrap();
    assert!(right.accepted);
    assert!(right.is_correct);
    assert_eq!(right.score, 1);

    let wrong: SubmitAnswerResponse =
        submit_answer(&mut persistence, room_id, &answer(1, "A", 1.0), &guest(1)).unwrap();
    assert!(!wrong.is_correct);
    assert_eq!(wrong.score, 1);
    assert_eq!(wrong.answered_count, 2);
}

#[test]
fn test_duplicate_answer_conflicts_without_side_effects() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();

    submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(1)).unwrap();
    let result: Result<SubmitAnswerResponse, ApiError> =
        submit_answer(&mut persistence, room_id, &answer(0, "B", 1.0), &guest(1));
    assert!(matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "duplicate_answer"));

    let room: RoomResponse = get_room(&mut persistence, room_id, &guest(1)).unwrap();
    assert_eq!(room.participants[1].score, 1);
    assert_eq!(room.participants[1].answered_count, 1);
}

#[test]
fn test_submit_rejects_bad_payloads() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();

    let cases: Vec<(crate::SubmitAnswerRequest, &str)> = vec![
        (answer(3, "A", 1.0), "question_index"),
        (answer(-1, "A", 1.0), "question_index"),
        (answer(0, "A", -1.0), "time_spent"),
        (answer(0, "A", f64::NAN), "time_spent"),
        (answer(0, "", 1.0), "user_answer"),
    ];
    for (request, expected) in cases {
        let result: Result<SubmitAnswerResponse, ApiError> =
            submit_answer(&mut persistence, room_id, &request, &guest(1));
        assert!(
            matches!(&result, Err(ApiError::InvalidArgument { field, .. }) if field == expected),
            "expected {expected} rejection, got {result:?}"
        );
    }
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_complete_before_activation_conflicts() {
    let (mut persistence, room_id, _) = setup_room();
    let result: Result<CompleteParticipantResponse, ApiError> =
        complete_participant(&mut persistence, room_id, &host());
    assert!(matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "room_not_started"));
}

#[test]
fn test_complete_is_idempotent() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();
    submit_answer(&mut persistence, room_id, &answer(0, "A", 2.5), &guest(1)).unwrap();

    let first: CompleteParticipantResponse =
        complete_participant(&mut persistence, room_id, &guest(1)).unwrap();
    let second: CompleteParticipantResponse =
        complete_participant(&mut persistence, room_id, &guest(1)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.score, 1);
    assert!((first.total_time - 2.5).abs() < f64::EPSILON);
    assert_eq!(first.room_status, RoomStatus::Active);
}

#[test]
fn test_submit_after_completion_conflicts() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();
    complete_participant(&mut persistence, room_id, &guest(1)).unwrap();

    let result: Result<SubmitAnswerResponse, ApiError> =
        submit_answer(&mut persistence, room_id, &answer(0, "A", 1.0), &guest(1));
    assert!(
        matches!(result, Err(ApiError::Conflict { rule, .. }) if rule == "participant_finished")
    );
}

#[test]
fn test_last_completion_completes_room() {
    let (mut persistence, room_id, code) = setup_room();
    join_by_code(&mut persistence, &code, &guest(1));
    activate_room(&mut persistence, room_id, &host()).unwrap();

    let guest_done: CompleteParticipantResponse =
        complete_participant(&mut persistence, room_id, &guest(1)).unwrap();
    assert_eq!(guest_done.room_status, RoomStatus::Active);

    let host_done: CompleteParticipantResponse =
        complete_participant(&mut persistence, room_id, &host()).unwrap();
    assert_eq!(host_done.room_status, RoomStatus::Completed);

    let room: RoomResponse = get_room(&mut persistence, room_id, &host()).unwrap();
    assert_eq!(room.status, RoomStatus::Completed);
    assert!(room.ended_at.is_some());
}

#[test]
fn test_leaderboard_unknown_room() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(matches!(
        get_leaderboard(&mut persistence, RoomId::new(5)),
        Err(ApiError::NotFound { .. })
    ));
}
