// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quiz_room_domain::{
    Identity, NewRoom, ParticipantState, QuestionSet, RoomCode, validate_display_name,
    validate_question_set,
};
use time::OffsetDateTime;

use crate::error::CoreError;

/// Builds a new room from a question set.
///
/// The questions and metadata are deep-copied so later edits to the source
/// set never reach the room. The host is seated first, with join order 0.
///
/// # Errors
///
/// Returns an error if the question set cannot seed a room or the host
/// display name is invalid.
pub fn create_room(
    source: &QuestionSet,
    host: &Identity,
    host_display_name: &str,
    code: RoomCode,
    now: OffsetDateTime,
) -> Result<NewRoom, CoreError> {
    validate_question_set(source)?;
    validate_display_name(host_display_name)?;

    let host_seat: ParticipantState = ParticipantState::new(
        host.clone(),
        host_display_name.trim().to_string(),
        0,
        now,
    );

    Ok(NewRoom {
        code,
        host: host.clone(),
        source_question_set_id: source.question_set_id,
        meta: source.meta.clone(),
        questions: source.questions.clone(),
        participants: vec![host_seat],
        created_at: now,
    })
}
