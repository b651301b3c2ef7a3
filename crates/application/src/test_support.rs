//! In-memory session fake shared by service tests.

use async_trait::async_trait;
use hopespring_core::AppResult;
use hopespring_domain::{AppointmentForm, Role, SessionRole};
use tokio::sync::Mutex;

use crate::{AppointmentFormStore, SessionStore};

#[derive(Default)]
pub(crate) struct FakeSession {
    role: Mutex<SessionRole>,
    form: Mutex<Option<AppointmentForm>>,
}

#[async_trait]
impl SessionStore for FakeSession {
    async fn load_role(&self) -> AppResult<SessionRole> {
        Ok(self.role.lock().await.clone())
    }

    async fn store_role(&self, role: &Role) -> AppResult<()> {
        *self.role.lock().await = SessionRole::Assigned(role.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.role.lock().await = SessionRole::None;
        *self.form.lock().await = None;
        Ok(())
    }
}

#[async_trait]
impl AppointmentFormStore for FakeSession {
    async fn load_form(&self) -> AppResult<Option<AppointmentForm>> {
        Ok(self.form.lock().await.clone())
    }

    async fn save_form(&self, form: &AppointmentForm) -> AppResult<()> {
        *self.form.lock().await = Some(form.clone());
        Ok(())
    }

    async fn update_form(
        &self,
        apply: &mut (dyn for<'a> FnMut(&'a mut AppointmentForm) + Send),
    ) -> AppResult<Option<AppointmentForm>> {
        let mut form = self.form.lock().await;
        Ok(form.as_mut().map(|form| {
            apply(form);
            form.clone()
        }))
    }

    async fn discard_form(&self) -> AppResult<()> {
        *self.form.lock().await = None;
        Ok(())
    }
}
