//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard_service;
mod appointment_form_service;
mod auth_service;
mod hospital_ports;
mod record_service;
mod session_ports;

#[cfg(test)]
mod test_support;

pub use access_guard_service::{AccessGuardService, SessionView};
pub use appointment_form_service::{AppointmentFormService, SubmitOutcome};
pub use auth_service::{AuthService, INVALID_CREDENTIALS_MESSAGE, LoginOutcome};
pub use hospital_ports::{AppointmentRepository, RecordDirectory};
pub use record_service::RecordService;
pub use session_ports::{AppointmentFormStore, CredentialDirectory, CredentialEntry, SessionStore};
