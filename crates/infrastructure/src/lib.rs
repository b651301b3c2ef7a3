//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_hospital_backend;
mod in_memory_appointment_form_registry;
mod in_memory_credential_directory;
mod in_memory_hospital_backend;

pub use http_hospital_backend::HttpHospitalBackend;
pub use in_memory_appointment_form_registry::InMemoryAppointmentFormRegistry;
pub use in_memory_credential_directory::{
    InMemoryCredentialDirectory, default_accounts, parse_credential_table,
};
pub use in_memory_hospital_backend::InMemoryHospitalBackend;
