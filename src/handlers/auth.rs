use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::actions::{Actions, SignInOutcome};
use crate::errors::AuthError;
use crate::models::requests::FormFields;
use crate::models::responses::DefaultResponse;

pub async fn login(
    State(actions): State<Actions>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AuthError> {
    let session = match actions.authenticate(&fields).await? {
        SignInOutcome::SignedIn(session) => session,
        SignInOutcome::Rejected(sentinel) => {
            let body = DefaultResponse::error(sentinel, String::new()).into_json();

            return Ok((StatusCode::UNAUTHORIZED, body).into_response());
        }
    };

    let body = DefaultResponse::ok("login successfully")
        .with_access_token(session.access_token.clone())
        .with_data(json!({ "user_id": session.user_id, "email": session.email }))
        .into_json();

    Ok((StatusCode::OK, body).into_response())
}
