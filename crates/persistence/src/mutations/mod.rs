// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the room store.
//!
//! ## Module Organization
//!
//! - `question_sets`: Question source seeding
//! - `rooms`: Room creation with its question snapshot and host seat
//! - `transitions`: Versioned, targeted writes for room transitions
//!
//! Every public mutation runs in a single immediate transaction, so a
//! failure leaves the store exactly as it was.

pub mod question_sets;
pub mod rooms;
pub mod transitions;

pub use question_sets::insert_question_set;
pub use rooms::insert_room;
pub use transitions::persist_transition;
