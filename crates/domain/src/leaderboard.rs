// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leaderboard ranking.
//!
//! Participants are ordered by:
//! 1. Score (highest first)
//! 2. Elapsed time (lowest first)
//! 3. Join order (earliest first)
//!
//! Join order is unique within a room, so the result is a strict total order
//! and is identical for every call on the same room state. Unfinished
//! participants are ranked with their running score and running time.

use std::cmp::Ordering;

use crate::room::ParticipantState;

/// A participant's position on the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// The 1-based position (1 = winner).
    pub position: usize,
    pub participant: ParticipantState,
}

/// Ranks participants for leaderboard display.
///
/// # Arguments
///
/// * `participants` - The room roster, in any order
///
/// # Returns
///
/// One entry per participant, position 1 first.
#[must_use]
pub fn rank_participants(participants: &[ParticipantState]) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&ParticipantState> = participants.iter().collect();
    ordered.sort_by(|a, b| compare_standing(a, b));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, participant)| LeaderboardEntry {
            position: index + 1,
            participant: participant.clone(),
        })
        .collect()
}

/// Compares two participants by leaderboard rules.
///
/// Returns `Ordering::Less` if `a` ranks above `b`.
fn compare_standing(a: &ParticipantState, b: &ParticipantState) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            a.elapsed_time()
                .partial_cmp(&b.elapsed_time())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.join_order.cmp(&b.join_order))
}
