use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use crypto_hash::{hex_digest, Algorithm};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AuthError;
use crate::models::requests::auth::RequestSignIn;
use crate::models::requests::FormFields;
use crate::models::user::User;

pub const CREDENTIALS_PROVIDER: &str = "credentials";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
}

/// Verifies submitted credentials for a named provider.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn sign_in(&self, provider: &str, fields: &FormFields) -> Result<Session, AuthError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUsers {
    pool: PgPool,
}

impl PgUsers {
    pub fn new(pool: PgPool) -> Self {
        PgUsers { pool }
    }
}

#[async_trait]
impl UserRepository for PgUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        User::get_by_email(&self.pool, email).await
    }
}

/// Users held in memory, keyed by email.
#[derive(Clone, Default)]
pub struct MemoryUsers {
    users: Arc<HashMap<String, User>>,
}

impl MemoryUsers {
    pub fn new(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();

        MemoryUsers {
            users: Arc::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.get(email).cloned())
    }
}

/// Email and password sign-in against argon2 hashes in the users table.
pub struct CredentialsProvider<R> {
    users: R,
    secret: String,
}

impl<R: UserRepository> CredentialsProvider<R> {
    pub fn new(users: R, secret: String) -> Self {
        CredentialsProvider { users, secret }
    }

    fn access_token(&self, user: &User) -> String {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let payload = format!("{}/{}/{}/", &user.id, &self.secret, timestamp);

        hex_digest(Algorithm::SHA256, payload.as_bytes())
    }
}

#[async_trait]
impl<R: UserRepository> CredentialVerifier for CredentialsProvider<R> {
    async fn sign_in(&self, provider: &str, fields: &FormFields) -> Result<Session, AuthError> {
        if provider != CREDENTIALS_PROVIDER {
            return Err(AuthError::UnknownProvider(provider.to_string()));
        }

        let (email, password) = RequestSignIn::from_fields(fields)
            .into_credentials()
            .ok_or(AuthError::CredentialsSignin)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::CredentialsSignin)?;

        if !argon2::verify_encoded(&user.password, password.as_bytes())? {
            tracing::debug!(email = %user.email, "password mismatch");
            return Err(AuthError::CredentialsSignin);
        }

        Ok(Session {
            user_id: user.id,
            email: user.email.clone(),
            access_token: self.access_token(&user),
        })
    }
}
