// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room status transitions, participant completion and room ending.

use quiz_room_domain::{DomainError, RoomStatus, rank_participants};

use crate::{Command, CoreError, FinalizedParticipant, RoomChange, apply};

use super::helpers::{
    answer_cmd, create_active_room, create_test_room, guest, host, join_cmd, later, step,
};

// ============================================================================
// Activate
// ============================================================================

#[test]
fn test_activate_sets_status_and_started_at() {
    let room = create_test_room();

    let result = apply(&room, &host(), Command::Activate, later(10)).unwrap();

    assert_eq!(result.new_room.status, RoomStatus::Active);
    assert_eq!(result.new_room.started_at, Some(later(10)));
    assert_eq!(
        result.change,
        RoomChange::Activated {
            started_at: later(10)
        }
    );
}

#[test]
fn test_activate_twice_keeps_started_at() {
    let room = create_test_room();
    let first = apply(&room, &host(), Command::Activate, later(10)).unwrap();

    let second = apply(&first.new_room, &host(), Command::Activate, later(20)).unwrap();

    assert_eq!(second.change, RoomChange::Unchanged);
    assert_eq!(second.new_room.status, RoomStatus::Active);
    assert_eq!(second.new_room.started_at, Some(later(10)));
}

#[test]
fn test_activate_by_non_host_is_rejected() {
    let room = step(&create_test_room(), &guest(1), join_cmd("Guest"));

    let result = apply(&room, &guest(1), Command::Activate, later(1));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotHost { room_id: 42, .. })
    ));
}

#[test]
fn test_activate_completed_room_is_rejected() {
    let room = create_active_room(0);
    let room = step(&room, &host(), Command::EndRoom);

    let result = apply(&room, &host(), Command::Activate, later(5));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition {
            from: RoomStatus::Completed,
            to: RoomStatus::Active,
        })
    ));
}

// ============================================================================
// CompleteParticipant
// ============================================================================

#[test]
fn test_complete_participant_freezes_score_and_time() {
    let room = create_active_room(2);
    let room = step(&room, &guest(1), answer_cmd(0, "A", 2.0));
    let room = step(&room, &guest(1), answer_cmd(1, "A", 3.0));
    let room = step(&room, &guest(1), answer_cmd(2, "C", 1.0));

    let result = apply(&room, &guest(1), Command::CompleteParticipant, later(30)).unwrap();

    assert_eq!(
        result.change,
        RoomChange::ParticipantFinished {
            result: FinalizedParticipant {
                identity: guest(1),
                score: 2,
                total_time: 6.0,
                finished_at: later(30),
            },
            room_completed_at: None,
        }
    );
    let participant = result.new_room.participant(&guest(1)).unwrap();
    assert!(participant.is_finished);
    assert_eq!(participant.total_time, Some(6.0));
    assert_eq!(result.new_room.status, RoomStatus::Active);
}

#[test]
fn test_complete_participant_is_idempotent() {
    let room = create_active_room(1);
    let room = step(&room, &guest(1), answer_cmd(0, "A", 2.0));
    let room = step(&room, &guest(1), Command::CompleteParticipant);

    let result = apply(&room, &guest(1), Command::CompleteParticipant, later(60)).unwrap();

    assert!(result.change.is_unchanged());
    let participant = result.new_room.participant(&guest(1)).unwrap();
    assert_eq!(participant.score, 1);
    assert_eq!(participant.total_time, Some(2.0));
    assert_eq!(participant.finished_at, Some(later(1)));
}

#[test]
fn test_last_completion_completes_room() {
    let room = create_active_room(1);
    let room = step(&room, &host(), Command::CompleteParticipant);

    let result = apply(&room, &guest(1), Command::CompleteParticipant, later(40)).unwrap();

    match result.change {
        RoomChange::ParticipantFinished {
            room_completed_at, ..
        } => assert_eq!(room_completed_at, Some(later(40))),
        other => panic!("unexpected change: {other:?}"),
    }
    assert_eq!(result.new_room.status, RoomStatus::Completed);
    assert_eq!(result.new_room.ended_at, Some(later(40)));
}

#[test]
fn test_complete_participant_in_waiting_room_is_rejected() {
    let room = create_test_room();

    let result = apply(&room, &host(), Command::CompleteParticipant, later(1));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::RoomNotStarted { .. })
    ));
}

#[test]
fn test_complete_participant_requires_membership() {
    let room = create_active_room(0);

    let result = apply(&room, &guest(9), Command::CompleteParticipant, later(1));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotParticipant { .. })
    ));
}

// ============================================================================
// EndRoom
// ============================================================================

#[test]
fn test_end_room_finalizes_unfinished_participants() {
    let room = create_active_room(2);
    let room = step(&room, &guest(1), answer_cmd(0, "A", 4.0));
    let room = step(&room, &guest(1), Command::CompleteParticipant);
    let room = step(&room, &guest(2), answer_cmd(0, "B", 1.5));

    let result = apply(&room, &host(), Command::EndRoom, later(90)).unwrap();

    match &result.change {
        RoomChange::RoomEnded {
            ended_at,
            finalized,
        } => {
            assert_eq!(*ended_at, later(90));
            let identities: Vec<_> = finalized.iter().map(|f| f.identity.clone()).collect();
            assert_eq!(identities, vec![host(), guest(2)]);
            assert_eq!(finalized[1].score, 0);
            assert!((finalized[1].total_time - 1.5).abs() < f64::EPSILON);
        }
        other => panic!("unexpected change: {other:?}"),
    }
    assert_eq!(result.new_room.status, RoomStatus::Completed);
    assert!(result.new_room.all_finished());
    // Already finished participants keep their original finish time.
    let first = result.new_room.participant(&guest(1)).unwrap();
    assert_eq!(first.finished_at, Some(later(1)));
}

#[test]
fn test_end_room_by_non_host_is_rejected() {
    let room = create_active_room(1);

    let result = apply(&room, &guest(1), Command::EndRoom, later(1));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotHost { .. })
    ));
}

#[test]
fn test_end_waiting_room_is_rejected() {
    let room = create_test_room();

    let result = apply(&room, &host(), Command::EndRoom, later(1));

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition {
            from: RoomStatus::Waiting,
            to: RoomStatus::Completed,
        })
    ));
}

#[test]
fn test_end_completed_room_is_noop() {
    let room = create_active_room(0);
    let room = step(&room, &host(), Command::EndRoom);

    let result = apply(&room, &host(), Command::EndRoom, later(5)).unwrap();

    assert!(result.change.is_unchanged());
}

#[test]
fn test_complete_after_room_end_returns_frozen_values() {
    let room = create_active_room(1);
    let room = step(&room, &guest(1), answer_cmd(0, "A", 2.0));
    let room = step(&room, &host(), Command::EndRoom);

    let result = apply(&room, &guest(1), Command::CompleteParticipant, later(5)).unwrap();

    assert!(result.change.is_unchanged());
    let participant = result.new_room.participant(&guest(1)).unwrap();
    assert_eq!(participant.score, 1);
    assert_eq!(participant.total_time, Some(2.0));
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_guest_with_two_correct_outranks_guest_with_one() {
    let room = create_active_room(2);
    let room = step(&room, &guest(1), answer_cmd(0, "A", 2.0));
    let room = step(&room, &guest(1), answer_cmd(1, "C", 3.0));
    let room = step(&room, &guest(1), answer_cmd(2, "C", 1.0));
    let room = step(&room, &guest(1), Command::CompleteParticipant);
    let room = step(&room, &guest(2), answer_cmd(0, "A", 0.5));
    let room = step(&room, &guest(2), Command::CompleteParticipant);

    let guest_one = room.participant(&guest(1)).unwrap();
    assert_eq!(guest_one.score, 2);
    assert_eq!(guest_one.total_time, Some(6.0));

    let ranking = rank_participants(&room.participants);
    assert_eq!(ranking[0].participant.identity, guest(1));
    assert_eq!(ranking[1].participant.identity, guest(2));
    assert_eq!(ranking[2].participant.identity, host());
}
