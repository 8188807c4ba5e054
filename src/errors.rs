use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use validator::ValidationErrors;

use crate::logger::Logger;
use crate::messages::Locale;
use crate::models::responses::DefaultResponse;

/// Field name to ordered list of human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised by a credential verifier.
///
/// Only `CredentialsSignin` is an expected outcome; its display text is the
/// marker the sign-in action looks for.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("CredentialsSignin")]
    CredentialsSignin,
    #[error("unknown authentication provider `{0}`")]
    UnknownProvider(String),
    #[error("user lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),
    #[error("password hash error: {0}")]
    Hash(#[from] argon2::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Logger::new(format!("authenticate: {:?}", self)).log();

        let body = DefaultResponse::error("authentication failed", String::new()).into_json();

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("redis client error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("server error: {0}")]
    Serve(String),
}

/// Flattens `validator` output into localized, form-keyed messages.
pub fn field_errors(errors: &ValidationErrors, locale: Locale) -> FieldErrors {
    let mut flattened = FieldErrors::new();

    for (field, violations) in errors.field_errors() {
        let key = form_key(field);
        let messages = flattened.entry(key.to_string()).or_insert_with(Vec::new);

        for violation in violations {
            let message = locale.field_message(key, violation.code.as_ref());
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }

    flattened
}

// validator reports struct field names; the dashboard posts camelCase names
fn form_key(field: &str) -> &str {
    match field {
        "customer_id" => "customerId",
        other => other,
    }
}
