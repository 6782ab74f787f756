// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the room store.
//!
//! ## Module Organization
//!
//! - `question_sets`: Question source listing and lookup
//! - `rooms`: Room aggregate reconstruction and code lookup

pub mod question_sets;
pub mod rooms;

pub use question_sets::{get_question_set, list_question_sets};
pub use rooms::{find_room_id_by_code, load_room};
