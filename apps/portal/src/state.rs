use std::sync::Arc;

use hopespring_application::{
    AccessGuardService, AppointmentFormService, AuthService, RecordService,
};
use hopespring_infrastructure::InMemoryAppointmentFormRegistry;
use tower_sessions::Session;

use crate::session::SessionFormStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub access_guard_service: AccessGuardService,
    pub appointment_form_service: AppointmentFormService,
    pub record_service: RecordService,
    pub appointment_forms: Arc<InMemoryAppointmentFormRegistry>,
    pub frontend_url: String,
}

impl AppState {
    /// Binds the open-form port to the request's session.
    pub fn form_store(&self, session: Session) -> SessionFormStore {
        SessionFormStore::new(session, self.appointment_forms.clone())
    }
}
