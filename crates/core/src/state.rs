// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quiz_room_domain::{AnswerRecord, Identity, ParticipantState, Room};
use time::OffsetDateTime;

/// Frozen result of one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedParticipant {
    pub identity: Identity,
    pub score: u32,
    pub total_time: f64,
    pub finished_at: OffsetDateTime,
}

/// The targeted write that persists a transition.
///
/// Each variant touches only the rows it names, so the store never has to
/// overwrite the whole aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomChange {
    /// Idempotent command; nothing to write.
    Unchanged,
    /// `waiting` → `active`.
    Activated {
        started_at: OffsetDateTime,
    },
    /// A new roster entry.
    ParticipantJoined {
        participant: ParticipantState,
    },
    /// One answer appended; the score moves by one when `record.is_correct`.
    AnswerRecorded {
        identity: Identity,
        record: AnswerRecord,
    },
    /// One participant finalized. When this was the last unfinished
    /// participant of an active room, the room completes at
    /// `room_completed_at`.
    ParticipantFinished {
        result: FinalizedParticipant,
        room_completed_at: Option<OffsetDateTime>,
    },
    /// Host closed the room; every unfinished participant was finalized.
    RoomEnded {
        ended_at: OffsetDateTime,
        finalized: Vec<FinalizedParticipant>,
    },
}

impl RoomChange {
    /// Returns whether persisting this change is a no-op.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// The result of applying a command to a room.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The room after the command.
    pub new_room: Room,
    /// What has to be written to reach `new_room`.
    pub change: RoomChange,
}
