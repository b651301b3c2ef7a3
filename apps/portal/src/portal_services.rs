use std::sync::Arc;
use std::time::Duration as StdDuration;

use hopespring_application::{
    AccessGuardService, AppointmentFormService, AppointmentRepository, AuthService,
    RecordDirectory, RecordService,
};
use hopespring_core::AppError;
use hopespring_infrastructure::{
    HttpHospitalBackend, InMemoryAppointmentFormRegistry, InMemoryCredentialDirectory,
    InMemoryHospitalBackend,
};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::portal_config::{BackendConfig, PortalConfig};
use crate::state::AppState;

/// Idle time after which a session and its open form are dropped.
const SESSION_IDLE_SECONDS: i64 = 30 * 60;

pub fn build_app_state(config: &PortalConfig) -> Result<AppState, AppError> {
    let (appointments, records): (Arc<dyn AppointmentRepository>, Arc<dyn RecordDirectory>) =
        match &config.backend {
            BackendConfig::Rest { base_url, timeout } => {
                let http_client = reqwest::Client::builder()
                    .timeout(*timeout)
                    .build()
                    .map_err(|error| {
                        AppError::Internal(format!("failed to build backend http client: {error}"))
                    })?;
                info!(%base_url, "using REST hospital backend");

                let backend = Arc::new(HttpHospitalBackend::new(http_client, base_url.clone()));
                (backend.clone(), backend)
            }
            BackendConfig::InMemory => {
                info!("using in-memory hospital backend with sample data");

                let backend = Arc::new(InMemoryHospitalBackend::with_sample_data()?);
                (backend.clone(), backend)
            }
        };

    let credentials = Arc::new(InMemoryCredentialDirectory::new(config.credentials.clone()));

    Ok(AppState {
        auth_service: AuthService::new(credentials),
        access_guard_service: AccessGuardService::new(),
        appointment_form_service: AppointmentFormService::new(appointments.clone()),
        record_service: RecordService::new(records, appointments),
        appointment_forms: Arc::new(InMemoryAppointmentFormRegistry::new(
            StdDuration::from_secs(SESSION_IDLE_SECONDS.unsigned_abs()),
        )),
        frontend_url: config.frontend_url.clone(),
    })
}

pub fn build_session_layer(cookie_secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(SESSION_IDLE_SECONDS)))
}
