//! Cookie-session adapters for the session ports.

use std::sync::Arc;

use async_trait::async_trait;
use hopespring_application::{AppointmentFormStore, SessionStore};
use hopespring_core::{AppError, AppResult};
use hopespring_domain::{AppointmentForm, FormId, Role, SessionRole};
use hopespring_infrastructure::InMemoryAppointmentFormRegistry;
use tower_sessions::Session;

/// Session key holding the signed-in role.
pub const SESSION_ROLE_KEY: &str = "role";

/// Session key holding the id of the open appointment dialog.
pub const SESSION_APPOINTMENT_FORM_KEY: &str = "appointment_form_id";

/// Binds the role port to one browser's cookie session.
#[derive(Clone)]
pub struct CookieSession(Session);

impl CookieSession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

fn session_error(action: &str, error: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("failed to {action}: {error}"))
}

#[async_trait]
impl SessionStore for CookieSession {
    async fn load_role(&self) -> AppResult<SessionRole> {
        let stored = self
            .0
            .get::<String>(SESSION_ROLE_KEY)
            .await
            .map_err(|error| session_error("read session role", error))?;

        Ok(SessionRole::from_stored(stored.as_deref()))
    }

    async fn store_role(&self, role: &Role) -> AppResult<()> {
        self.0
            .cycle_id()
            .await
            .map_err(|error| session_error("rotate session id", error))?;
        self.0
            .insert(SESSION_ROLE_KEY, role.as_str())
            .await
            .map_err(|error| session_error("store session role", error))
    }

    async fn clear(&self) -> AppResult<()> {
        self.0
            .flush()
            .await
            .map_err(|error| session_error("clear session", error))
    }
}

/// Binds the form port to one browser's cookie session.
///
/// The cookie session is loaded once per request, so overlapping requests
/// each see their own copy of it. Only the form id lives there; the form
/// itself is kept in the shared registry, where every edit is applied to the
/// latest version.
#[derive(Clone)]
pub struct SessionFormStore {
    session: Session,
    forms: Arc<InMemoryAppointmentFormRegistry>,
}

impl SessionFormStore {
    pub fn new(session: Session, forms: Arc<InMemoryAppointmentFormRegistry>) -> Self {
        Self { session, forms }
    }

    async fn form_id(&self) -> AppResult<Option<FormId>> {
        self.session
            .get::<FormId>(SESSION_APPOINTMENT_FORM_KEY)
            .await
            .map_err(|error| session_error("read appointment form id", error))
    }
}

#[async_trait]
impl AppointmentFormStore for SessionFormStore {
    async fn load_form(&self) -> AppResult<Option<AppointmentForm>> {
        let Some(form_id) = self.form_id().await? else {
            return Ok(None);
        };

        Ok(self.forms.get(form_id).await)
    }

    async fn save_form(&self, form: &AppointmentForm) -> AppResult<()> {
        let previous = self.form_id().await?;
        self.forms.insert(form).await;

        if previous == Some(form.form_id()) {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.forms.remove(previous).await;
        }

        self.session
            .insert(SESSION_APPOINTMENT_FORM_KEY, form.form_id())
            .await
            .map_err(|error| session_error("store appointment form id", error))
    }

    async fn update_form(
        &self,
        apply: &mut (dyn for<'a> FnMut(&'a mut AppointmentForm) + Send),
    ) -> AppResult<Option<AppointmentForm>> {
        let Some(form_id) = self.form_id().await? else {
            return Ok(None);
        };

        Ok(self.forms.update(form_id, |form| apply(form)).await)
    }

    async fn discard_form(&self) -> AppResult<()> {
        let form_id = self
            .session
            .remove::<FormId>(SESSION_APPOINTMENT_FORM_KEY)
            .await
            .map_err(|error| session_error("discard appointment form id", error))?;

        if let Some(form_id) = form_id {
            self.forms.remove(form_id).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
