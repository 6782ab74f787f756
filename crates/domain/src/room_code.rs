// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Join code generation.
//!
//! Codes are drawn uniformly from 36^6 (about 2.2 billion) combinations.
//! Uniqueness is not checked here; the room store enforces it and the
//! caller retries on collision.

use crate::types::RoomCode;

/// Characters a room code may contain.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a room code.
pub const ROOM_CODE_LENGTH: usize = 6;

/// Generates a random room code.
#[must_use]
pub fn generate_room_code() -> RoomCode {
    let code: String = (0..ROOM_CODE_LENGTH)
        .map(|_| {
            let index: usize = rand::random_range(0..ROOM_CODE_ALPHABET.len());
            char::from(ROOM_CODE_ALPHABET[index])
        })
        .collect();
    RoomCode::new(&code)
}

/// Returns whether `code` has the expected length and alphabet.
///
/// The check is case-sensitive; normalize with [`RoomCode::new`] first.
#[must_use]
pub fn is_valid_room_code(code: &str) -> bool {
    code.len() == ROOM_CODE_LENGTH && code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b))
}
