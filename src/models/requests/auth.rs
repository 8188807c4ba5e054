use validator_derive::Validate;

use super::FormFields;

#[derive(Validate, Debug, Default)]
pub struct RequestSignIn {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 6))]
    pub password: Option<String>,
}

impl RequestSignIn {
    pub fn from_fields(fields: &FormFields) -> Self {
        RequestSignIn {
            email: fields.get("email").cloned(),
            password: fields.get("password").cloned(),
        }
    }

    /// `(email, password)` when both pass the schema.
    pub fn into_credentials(self) -> Option<(String, String)> {
        if validator::Validate::validate(&self).is_err() {
            return None;
        }

        match (self.email, self.password) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}
