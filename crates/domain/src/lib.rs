//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access_guard;
mod appointment;
mod appointment_form;
mod availability;
mod dashboard;
mod navigation;
mod record_inputs;
mod records;
mod role;
mod route;
mod validation;

pub use access_guard::{GuardDecision, evaluate_navigation};
pub use appointment::{Appointment, AppointmentDraft, AppointmentStatus, AppointmentSubmission};
pub use appointment_form::{
    AVAILABILITY_CHECK_FAILED_MESSAGE, AppointmentForm, AvailabilityOutcome, AvailabilityQuery,
    FormFieldChange, FormId, SAVE_FAILED_MESSAGE, SLOT_UNAVAILABLE_MESSAGE, SubmitRequest,
};
pub use availability::{AvailabilityLedger, AvailabilitySlot, SlotKey};
pub use navigation::{NavigationItem, navigation_menu};
pub use dashboard::{DashboardStats, DoctorOverview, ManagerOverview, PatientOverview};
pub use record_inputs::{
    BillingRecordInput, DoctorInput, InventoryItemInput, LabTestInput, MedicationInput,
    PAYMENT_STATUSES, PatientInput, PrescriptionInput,
};
pub use records::{
    BillingRecord, Doctor, InventoryItem, LabTest, Medication, Patient, Prescription,
};
pub use role::{Role, SessionRole};
pub use route::{
    DASHBOARD_PATH, LANDING_PATH, LOGIN_PATH, OperationalPage, PUBLIC_PATHS, RouteClass,
    classify_route, is_public_path, normalize_path,
};
pub use validation::{parse_date, parse_time, validate_email, validate_phone};
