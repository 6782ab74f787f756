// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON request bodies.
//!
//! Wraps axum's `Json` extractor so that malformed or wrongly typed payloads
//! are reported as `InvalidArgument` with the usual error body.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use quiz_room_api::ApiError;
use tracing::debug;

use crate::HttpError;

/// Extractor for a JSON request body of type `T`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(HttpError::from(ApiError::InvalidArgument {
                    field: String::from("body"),
                    message: rejection.body_text(),
                }))
            }
        }
    }
}
