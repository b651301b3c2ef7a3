use hopespring_core::{AppError, RecordId};
use hopespring_domain::{AppointmentForm, AppointmentStatus, FormFieldChange};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::AppointmentResponse;

/// Incoming payload for opening the appointment dialog.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/open-appointment-form-request.ts"
)]
pub struct OpenAppointmentFormRequest {
    #[serde(default)]
    #[ts(type = "number | null")]
    pub appointment_id: Option<i64>,
}

/// One field edit made in the dialog.
#[derive(Debug, Deserialize, TS)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/appointment-field-change.ts"
)]
pub enum AppointmentFieldChange {
    Patient(#[ts(type = "number | null")] Option<i64>),
    Doctor(#[ts(type = "number | null")] Option<i64>),
    Date(Option<String>),
    Time(Option<String>),
    Status(String),
    Notes(String),
}

/// Incoming batch of field edits.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/update-appointment-form-request.ts"
)]
pub struct UpdateAppointmentFormRequest {
    pub changes: Vec<AppointmentFieldChange>,
}

/// State of the open appointment dialog.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/appointment-form-response.ts"
)]
pub struct AppointmentFormResponse {
    pub form_id: String,
    #[ts(type = "number | null")]
    pub appointment_id: Option<i64>,
    #[ts(type = "number | null")]
    pub patient_id: Option<i64>,
    #[ts(type = "number | null")]
    pub doctor_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: String,
    pub notes: String,
    pub checking_availability: bool,
    pub slot_bookable: bool,
    pub can_submit: bool,
    pub error: Option<String>,
}

/// Outcome of a submit attempt.
#[derive(Debug, Serialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/submit-appointment-form-response.ts"
)]
pub enum SubmitAppointmentFormResponse {
    Saved { appointment: AppointmentResponse },
    Rejected { form: AppointmentFormResponse },
}

fn optional_id(value: Option<i64>) -> Result<Option<RecordId>, AppError> {
    value.map(RecordId::new).transpose()
}

impl TryFrom<AppointmentFieldChange> for FormFieldChange {
    type Error = AppError;

    fn try_from(change: AppointmentFieldChange) -> Result<Self, Self::Error> {
        Ok(match change {
            AppointmentFieldChange::Patient(patient_id) => Self::Patient(optional_id(patient_id)?),
            AppointmentFieldChange::Doctor(doctor_id) => Self::Doctor(optional_id(doctor_id)?),
            AppointmentFieldChange::Date(date) => Self::Date(date),
            AppointmentFieldChange::Time(time) => Self::Time(time),
            AppointmentFieldChange::Status(status) => {
                Self::Status(status.parse::<AppointmentStatus>()?)
            }
            AppointmentFieldChange::Notes(notes) => Self::Notes(notes),
        })
    }
}

impl OpenAppointmentFormRequest {
    pub fn appointment_id(&self) -> Result<Option<RecordId>, AppError> {
        optional_id(self.appointment_id)
    }
}

impl From<&AppointmentForm> for AppointmentFormResponse {
    fn from(form: &AppointmentForm) -> Self {
        let draft = form.draft();
        Self {
            form_id: form.form_id().to_string(),
            appointment_id: form.appointment_id().map(|id| id.get()),
            patient_id: draft.patient_id.map(|id| id.get()),
            doctor_id: draft.doctor_id.map(|id| id.get()),
            date: draft.date.clone(),
            time: draft.time.clone(),
            status: draft.status.as_str().to_owned(),
            notes: draft.notes.clone(),
            checking_availability: form.pending_check().is_some(),
            slot_bookable: form.is_current_slot_bookable(),
            can_submit: form.can_submit(),
            error: form.error().map(ToOwned::to_owned),
        }
    }
}
