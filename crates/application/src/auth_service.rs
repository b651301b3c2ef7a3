//! Credential login against the fixed credential table.
//!
//! There is no hashing, lockout or rate limiting; the table only decides
//! which role a session gets.

use std::sync::Arc;

use hopespring_core::{AppError, AppResult};
use hopespring_domain::{GuardDecision, LOGIN_PATH, Role, SessionRole, evaluate_navigation};

use crate::{CredentialDirectory, SessionStore};

/// Generic failure message; never says which field was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Role now held by the session.
    pub role: Role,
    /// Where the shell goes next; the guard's answer for `/login`.
    pub next: GuardDecision,
}

/// Application service for login and logout.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialDirectory>,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialDirectory>) -> Self {
        Self { credentials }
    }

    /// Checks the pair against the credential table and assigns the role.
    ///
    /// Both fields must match one entry exactly. On failure the session is
    /// left untouched.
    pub async fn login(
        &self,
        session: &dyn SessionStore,
        username: &str,
        password: &str,
    ) -> AppResult<LoginOutcome> {
        let entry = self
            .credentials
            .find_by_username(username)
            .await?
            .into_iter()
            .find(|entry| entry.username == username && entry.password == password)
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_owned()))?;

        session.store_role(&entry.role).await?;

        let next = evaluate_navigation(&SessionRole::Assigned(entry.role.clone()), LOGIN_PATH);
        Ok(LoginOutcome {
            role: entry.role,
            next,
        })
    }

    /// Signs the session out.
    pub async fn logout(&self, session: &dyn SessionStore) -> AppResult<()> {
        session.clear().await
    }
}
