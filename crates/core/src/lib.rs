// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room coordination core.
//!
//! Commands are applied to an immutable `Room` and produce a new room plus a
//! `RoomChange` describing the minimal write needed to persist the
//! transition. Nothing here performs I/O; atomicity is the room store's job.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod create;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use create::create_room;
pub use error::CoreError;
pub use state::{FinalizedParticipant, RoomChange, TransitionResult};
