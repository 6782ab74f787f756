// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room store for the quiz room coordination core.
//!
//! This crate owns the database: the question source tables, the room
//! aggregate tables and the single connection used to reach them. It is
//! built on Diesel over `SQLite`.
//!
//! ## Concurrency
//!
//! Rooms carry a monotonically increasing `version`. A caller loads a room
//! with [`Persistence::load_room`], computes a transition with
//! `quiz_room::apply`, and hands the resulting change back to
//! [`Persistence::persist_transition`] together with the version it read.
//! The write is rejected with [`PersistenceError::VersionConflict`] if any
//! other transition landed in between, and the caller retries from a fresh
//! read. Writes never replace the whole aggregate: each change inserts or
//! updates only the rows it names.
//!
//! ## Migration Strategy
//!
//! Migrations live in `migrations/` and are embedded into the binary. They
//! run on every connection open.
//!
//! ## Testing
//!
//! Tests run against isolated shared-cache in-memory databases, one per
//! [`Persistence::new_in_memory`] call.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::prelude::*;
use quiz_room::RoomChange;
use quiz_room_domain::{NewRoom, QuestionSet, QuestionSetSummary, Room, RoomCode, RoomId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The room store.
///
/// One instance owns one database connection. Construct it once at startup
/// and release it with [`Persistence::shutdown`].
pub struct Persistence {
    conn: SqliteConnection,
    file_backed: bool,
}

impl Persistence {
    /// Creates a room store backed by a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_quiz_room_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self {
            conn,
            file_backed: false,
        })
    }

    /// Creates a room store backed by a `SQLite` database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self {
            conn,
            file_backed: true,
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Releases the store.
    ///
    /// File-backed databases are checkpointed so the WAL does not outlive
    /// the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkpoint fails. The connection is closed
    /// either way.
    pub fn shutdown(mut self) -> Result<(), PersistenceError> {
        if self.file_backed {
            diesel::sql_query("PRAGMA wal_checkpoint(TRUNCATE)")
                .execute(&mut self.conn)
                .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
        }
        info!("Room store shut down");
        Ok(())
    }

    // ========================================================================
    // Question Source
    // ========================================================================

    /// Stores a question set and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_question_set(
        &mut self,
        question_set: &QuestionSet,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_question_set(&mut self.conn, question_set)
    }

    /// Lists available question sets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_question_sets(&mut self) -> Result<Vec<QuestionSetSummary>, PersistenceError> {
        queries::list_question_sets(&mut self.conn)
    }

    /// Loads one question set with its questions.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::QuestionSetNotFound` if it does not exist.
    pub fn get_question_set(
        &mut self,
        question_set_id: i64,
    ) -> Result<QuestionSet, PersistenceError> {
        queries::get_question_set(&mut self.conn, question_set_id)
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Stores a new room.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateRoomCode` if the code is taken.
    pub fn insert_room(&mut self, new_room: &NewRoom) -> Result<Room, PersistenceError> {
        mutations::insert_room(&mut self.conn, new_room)
    }

    /// Loads a room and the version it was read at.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` if the room does not exist.
    pub fn load_room(&mut self, room_id: RoomId) -> Result<(Room, i64), PersistenceError> {
        queries::load_room(&mut self.conn, room_id)
    }

    /// Resolves a join code to a room id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomCodeNotFound` if no room has the code.
    pub fn find_room_id_by_code(&mut self, code: &RoomCode) -> Result<RoomId, PersistenceError> {
        queries::find_room_id_by_code(&mut self.conn, code)
    }

    /// Persists a room transition computed from `expected_version`.
    ///
    /// # Returns
    ///
    /// The room's new version.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if the room changed since
    /// it was read. Nothing is written on error.
    pub fn persist_transition(
        &mut self,
        room_id: RoomId,
        expected_version: i64,
        change: &RoomChange,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, room_id, expected_version, change)
    }
}
