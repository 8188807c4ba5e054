use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::FieldErrors;

/// What a dashboard form re-renders with after a submission.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub message: Option<String>,
}

impl ActionState {
    pub fn message(message: String) -> Self {
        ActionState {
            errors: None,
            message: Some(message),
        }
    }

    pub fn invalid(errors: FieldErrors, message: String) -> Self {
        ActionState {
            errors: Some(errors),
            message: Some(message),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DefaultResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl DefaultResponse {
    pub fn new(status: &str, message: String) -> Self {
        DefaultResponse {
            status: status.to_string(),
            message,
            error: None,
            access_token: None,
            data: None,
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::new("ok", message.to_string())
    }

    pub fn error(message: &str, error: String) -> Self {
        let mut response = Self::new("error", message.to_string());
        if !error.is_empty() {
            response.error = Some(error);
        }
        response
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_access_token(mut self, access_token: String) -> Self {
        self.access_token = Some(access_token);
        self
    }

    pub fn into_json(self) -> Json<Value> {
        Json(json!(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_state_omits_empty_errors() {
        let value = json!(ActionState::message("Deleted Invoice.".to_string()));

        assert_eq!(value, json!({ "message": "Deleted Invoice." }));
    }

    #[test]
    fn error_response_hides_empty_detail() {
        let Json(value) = DefaultResponse::error("CredentialsSignin", String::new()).into_json();

        assert_eq!(value, json!({ "status": "error", "message": "CredentialsSignin" }));
    }

    #[test]
    fn token_and_data_are_attached() {
        let Json(value) = DefaultResponse::ok("login successfully")
            .with_access_token("abc".to_string())
            .with_data(json!({ "email": "user@nextmail.com" }))
            .into_json();

        assert_eq!(value["access_token"], "abc");
        assert_eq!(value["data"]["email"], "user@nextmail.com");
    }
}
