//! Server-side mutations behind the invoice dashboard forms.
//!
//! Every action validates first, runs at most one statement, and only then
//! touches the page cache. Validation and database failures come back as
//! [`ActionOutcome`] values; only unexpected sign-in failures are errors.

use std::sync::Arc;

use crate::database::Persistence;
use crate::messages::Locale;
use crate::models::responses::ActionState;
use crate::repositories::credentials::CredentialVerifier;
use crate::repositories::page_cache::PageCache;

mod auth;
mod invoice;

pub use auth::SignInOutcome;

/// Page that lists invoices; every successful invoice mutation refreshes it.
pub const DASHBOARD_INVOICES: &str = "/dashboard/invoices";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Done; the caller must navigate to `to` and nothing else runs.
    Redirect { to: String },
    /// Done; the state is shown in place.
    Completed(ActionState),
    /// The form failed validation. Nothing was written.
    Rejected(ActionState),
    /// The statement failed. Nothing else was attempted.
    Failed(ActionState),
}

#[cfg(test)]
impl ActionOutcome {
    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::Redirect { .. } => None,
            ActionOutcome::Completed(state)
            | ActionOutcome::Rejected(state)
            | ActionOutcome::Failed(state) => Some(state),
        }
    }
}

#[derive(Clone)]
pub struct Actions {
    db: Arc<dyn Persistence>,
    cache: Arc<dyn PageCache>,
    verifier: Arc<dyn CredentialVerifier>,
    locale: Locale,
}

impl Actions {
    pub fn new(
        db: Arc<dyn Persistence>,
        cache: Arc<dyn PageCache>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Actions {
            db,
            cache,
            verifier,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
