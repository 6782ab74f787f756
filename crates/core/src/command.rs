// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A command represents caller intent against one room as data only.
///
/// The acting identity is supplied separately to [`crate::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the room. Host only.
    Activate,
    /// Take a seat in the room.
    Join {
        /// Name snapshot to show on the roster.
        display_name: String,
    },
    /// Answer one question.
    SubmitAnswer {
        /// Index into the room's question snapshot, unchecked.
        question_index: i64,
        /// The chosen answer text.
        user_answer: String,
        /// Seconds spent on the question.
        time_spent: f64,
    },
    /// Freeze the actor's score and total time.
    CompleteParticipant,
    /// Close the room for everyone. Host only.
    EndRoom,
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Activate => "Activate",
            Self::Join { .. } => "Join",
            Self::SubmitAnswer { .. } => "SubmitAnswer",
            Self::CompleteParticipant => "CompleteParticipant",
            Self::EndRoom => "EndRoom",
        }
    }
}
