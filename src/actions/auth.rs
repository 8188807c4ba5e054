use super::Actions;
use crate::errors::AuthError;
use crate::models::requests::FormFields;
use crate::repositories::credentials::{Session, CREDENTIALS_PROVIDER};

/// Marker in a verifier failure that means the credentials were wrong.
pub const CREDENTIALS_SIGNIN: &str = "CredentialsSignin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Session),
    /// Bad credentials; carries the sentinel shown by the login form.
    Rejected(&'static str),
}

impl Actions {
    /// Any verifier failure other than bad credentials is returned as `Err`.
    pub async fn authenticate(&self, fields: &FormFields) -> Result<SignInOutcome, AuthError> {
        match self.verifier.sign_in(CREDENTIALS_PROVIDER, fields).await {
            Ok(session) => Ok(SignInOutcome::SignedIn(session)),
            Err(err) if err.to_string().contains(CREDENTIALS_SIGNIN) => {
                tracing::debug!("sign-in rejected");
                Ok(SignInOutcome::Rejected(CREDENTIALS_SIGNIN))
            }
            Err(err) => Err(err),
        }
    }
}
