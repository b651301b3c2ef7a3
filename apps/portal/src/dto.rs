mod appointment_form;
mod auth;
mod dashboard;
mod record_requests;
mod records;

pub use appointment_form::{
    AppointmentFieldChange, AppointmentFormResponse, OpenAppointmentFormRequest,
    SubmitAppointmentFormResponse, UpdateAppointmentFormRequest,
};
pub use auth::{
    LoginRequest, LoginResponse, NavigationDecisionResponse, NavigationItemResponse,
    NavigationQuery, SessionResponse,
};
pub use dashboard::{
    DashboardStatsResponse, DoctorOverviewResponse, ManagerOverviewResponse,
    PatientOverviewResponse,
};
pub use record_requests::{
    BillingRecordRequest, DoctorRequest, InventoryItemRequest, LabTestRequest, MedicationRequest,
    PrescriptionRequest,
};
pub use records::{
    AppointmentResponse, AppointmentStatusRequest, BillingRecordResponse, DoctorListQuery,
    DoctorResponse, InventoryItemResponse, LabTestResponse, MedicationResponse, PatientRequest,
    PatientResponse, PrescriptionResponse,
};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
