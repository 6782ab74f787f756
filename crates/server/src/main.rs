// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod json_body;
mod participant;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use quiz_room_api::{
    ApiError, AuthError, CompleteParticipantResponse, CreateRoomRequest, CreateRoomResponse,
    JoinRoomRequest, JoinRoomResponse, LeaderboardResponse, ListQuestionSetsResponse,
    RoomResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use quiz_room_domain::{QuestionSet, RoomId};
use quiz_room_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::json_body::JsonBody;
use crate::participant::Participant;

/// Quiz Room Server - HTTP server for live quiz rooms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file with question sets to load at startup
    #[arg(short, long)]
    question_sets: Option<String>,
}

/// Application state shared across handlers.
///
/// The store is owned here, not by handlers, and is released on shutdown.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        Self::from(ApiError::from(err))
    }
}

/// Handler for GET `/question_sets` endpoint.
async fn handle_list_question_sets(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListQuestionSetsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListQuestionSetsResponse = quiz_room_api::list_question_sets(&mut persistence)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms` endpoint.
///
/// Creates a room hosted by the caller.
async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    Participant(participant): Participant,
    JsonBody(req): JsonBody<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, HttpError> {
    info!(
        identity = %participant.identity,
        question_set_id = req.question_set_id,
        "Handling create_room request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateRoomResponse =
        quiz_room_api::create_room(&mut persistence, &req, &participant)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/rooms/join` endpoint.
async fn handle_join_room(
    AxumState(app_state): AxumState<AppState>,
    Participant(participant): Participant,
    JsonBody(req): JsonBody<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, HttpError> {
    info!(
        identity = %participant.identity,
        room_code = ?req.room_code,
        room_id = ?req.room_id,
        "Handling join_room request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: JoinRoomResponse =
        quiz_room_api::join_room(&mut persistence, &req, &participant)?;
    drop(persistence);

    if response.newly_joined {
        info!(
            room_id = response.room_id,
            identity = %participant.identity,
            participant_index = response.participant_index,
            "Participant joined"
        );
    }

    Ok(Json(response))
}

/// Handler for GET `/rooms/{room_id}` endpoint.
async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Participant(participant): Participant,
) -> Result<Json<RoomResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse =
        quiz_room_api::get_room(&mut persistence, RoomId::new(room_id), &participant)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms/{room_id}/activate` endpoint.
async fn handle_activate_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Participant(participant): Participant,
) -> Result<Json<RoomResponse>, HttpError> {
    info!(room_id, identity = %participant.identity, "Handling activate_room request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse =
        quiz_room_api::activate_room(&mut persistence, RoomId::new(room_id), &participant)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms/{room_id}/answers` endpoint.
async fn handle_submit_answer(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Participant(participant): Participant,
    JsonBody(req): JsonBody<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, HttpError> {
    info!(
        room_id,
        identity = %participant.identity,
        question_index = req.question_index,
        "Handling submit_answer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitAnswerResponse =
        quiz_room_api::submit_answer(&mut persistence, RoomId::new(room_id), &req, &participant)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms/{room_id}/complete` endpoint.
async fn handle_complete_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Participant(participant): Participant,
) -> Result<Json<CompleteParticipantResponse>, HttpError> {
    info!(room_id, identity = %participant.identity, "Handling complete_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteParticipantResponse = quiz_room_api::complete_participant(
        &mut persistence,
        RoomId::new(room_id),
        &participant,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rooms/{room_id}/end` endpoint.
async fn handle_end_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Participant(participant): Participant,
) -> Result<Json<RoomResponse>, HttpError> {
    info!(room_id, identity = %participant.identity, "Handling end_room request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse =
        quiz_room_api::end_room(&mut persistence, RoomId::new(room_id), &participant)?;
    Ok(Json(response))
}

/// Handler for GET `/rooms/{room_id}/leaderboard` endpoint.
///
/// Rankings are public to anyone who knows the room id.
async fn handle_get_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<LeaderboardResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeaderboardResponse =
        quiz_room_api::get_leaderboard(&mut persistence, RoomId::new(room_id))?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/question_sets", get(handle_list_question_sets))
        .route("/rooms", post(handle_create_room))
        .route("/rooms/join", post(handle_join_room))
        .route("/rooms/{room_id}", get(handle_get_room))
        .route("/rooms/{room_id}/activate", post(handle_activate_room))
        .route("/rooms/{room_id}/answers", post(handle_submit_answer))
        .route("/rooms/{room_id}/complete", post(handle_complete_participant))
        .route("/rooms/{room_id}/end", post(handle_end_room))
        .route("/rooms/{room_id}/leaderboard", get(handle_get_leaderboard))
        .with_state(app_state)
}

/// Loads question sets from a JSON array into the store.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a set cannot
/// be stored.
fn seed_question_sets(
    persistence: &mut Persistence,
    path: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let question_sets: Vec<QuestionSet> = serde_json::from_str(&contents)?;

    for question_set in &question_sets {
        let question_set_id: i64 = persistence.insert_question_set(question_set)?;
        info!(
            question_set_id,
            title = %question_set.meta.title,
            questions = question_set.questions.len(),
            "Loaded question set"
        );
    }

    Ok(question_sets.len())
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown requested");
}

/// Releases the store once every handler has let go of it.
fn release_persistence(persistence: Arc<Mutex<Persistence>>) -> Result<(), PersistenceError> {
    match Arc::try_unwrap(persistence) {
        Ok(mutex) => mutex.into_inner().shutdown(),
        Err(_) => {
            warn!("Store still shared at shutdown; skipping checkpoint");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Quiz Room Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(path) = &args.question_sets {
        let loaded: usize = seed_question_sets(&mut persistence, path)?;
        info!(loaded, path = %path, "Question sets loaded");
    }

    let shared: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
    let app: Router = build_router(AppState {
        persistence: Arc::clone(&shared),
    });

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    release_persistence(shared)?;
    info!("Server stopped");

    Ok(())
}
