//! Ports for per-session state and the credential table.

use async_trait::async_trait;
use hopespring_core::AppResult;
use hopespring_domain::{AppointmentForm, Role, SessionRole};

/// Session port holding the signed-in role.
///
/// One store is bound to one browser session; services receive it per call.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the current role.
    async fn load_role(&self) -> AppResult<SessionRole>;

    /// Records the role assigned at login.
    async fn store_role(&self, role: &Role) -> AppResult<()>;

    /// Signs the session out, dropping everything it holds.
    async fn clear(&self) -> AppResult<()>;
}

/// Session port holding the open appointment dialog, if any.
///
/// Requests of one session may overlap, so edits go through
/// [`AppointmentFormStore::update_form`], which applies them to the form as
/// currently stored rather than to a copy read earlier.
#[async_trait]
pub trait AppointmentFormStore: Send + Sync {
    /// Reads the open form.
    async fn load_form(&self) -> AppResult<Option<AppointmentForm>>;

    /// Stores a freshly opened form, replacing any open one.
    async fn save_form(&self, form: &AppointmentForm) -> AppResult<()>;

    /// Applies an edit to the open form atomically and returns the result.
    ///
    /// Returns `None` without calling `apply` when no form is open.
    async fn update_form(
        &self,
        apply: &mut (dyn for<'a> FnMut(&'a mut AppointmentForm) + Send),
    ) -> AppResult<Option<AppointmentForm>>;

    /// Closes the open form, discarding its availability answers.
    async fn discard_form(&self) -> AppResult<()>;
}

/// One row of the fixed credential table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    /// Login name, matched exactly.
    pub username: String,
    /// Plain-text password, matched exactly.
    pub password: String,
    /// Role granted on success.
    pub role: Role,
}

impl CredentialEntry {
    /// Creates a credential row.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

/// Lookup port for the credential table.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    /// Returns every entry whose username matches exactly.
    async fn find_by_username(&self, username: &str) -> AppResult<Vec<CredentialEntry>>;
}
