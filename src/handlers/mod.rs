use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};

use crate::actions::ActionOutcome;

pub mod auth;
pub mod invoice;

pub async fn hello_world() -> &'static str {
    "invoice dashboard"
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { to } => Redirect::to(&to).into_response(),
            ActionOutcome::Completed(state) => (StatusCode::OK, Json(state)).into_response(),
            ActionOutcome::Rejected(state) | ActionOutcome::Failed(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
        }
    }
}
