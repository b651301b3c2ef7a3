use std::str::FromStr;

use hopespring_core::{AppError, AppResult, RecordId};
use serde::{Deserialize, Serialize};

use crate::availability::SlotKey;
use crate::validation::{parse_date, parse_time};

const NOTES_MAX_LENGTH: usize = 500;

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and pending.
    #[default]
    Scheduled,
    /// Took place.
    Completed,
    /// Called off.
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the stable transport value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::Validation(format!(
                "unknown appointment status '{value}'"
            ))),
        }
    }
}

/// Appointment record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Backend key.
    pub id: RecordId,
    /// Booked patient.
    pub patient_id: RecordId,
    /// Patient display name.
    #[serde(default)]
    pub patient_name: String,
    /// Booked doctor.
    pub doctor_id: RecordId,
    /// Doctor display name.
    #[serde(default)]
    pub doctor_name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// Lifecycle state.
    pub status: AppointmentStatus,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Editable appointment form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    /// Selected patient.
    pub patient_id: Option<RecordId>,
    /// Selected doctor.
    pub doctor_id: Option<RecordId>,
    /// Selected date.
    pub date: Option<String>,
    /// Selected time.
    pub time: Option<String>,
    /// Status to save.
    pub status: AppointmentStatus,
    /// Free-text notes.
    pub notes: String,
}

impl AppointmentDraft {
    /// Prefills a draft from an existing appointment.
    #[must_use]
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            patient_id: Some(appointment.patient_id),
            doctor_id: Some(appointment.doctor_id),
            date: Some(appointment.date.clone()),
            time: Some(appointment.time.clone()),
            status: appointment.status,
            notes: appointment.notes.clone().unwrap_or_default(),
        }
    }

    /// Returns the slot this draft targets once doctor, date and time are set.
    #[must_use]
    pub fn slot_key(&self) -> Option<SlotKey> {
        match (self.doctor_id, self.date.as_deref(), self.time.as_deref()) {
            (Some(doctor_id), Some(date), Some(time)) => Some(SlotKey::new(doctor_id, date, time)),
            _ => None,
        }
    }

    /// Validates the draft and produces the backend payload.
    pub fn to_submission(&self) -> AppResult<AppointmentSubmission> {
        let patient_id = self
            .patient_id
            .ok_or_else(|| AppError::Validation("Missing required field: patient".to_owned()))?;
        let key = self.slot_key().ok_or_else(|| {
            AppError::Validation("Doctor, date and time are required".to_owned())
        })?;

        parse_date(&key.date)?;
        parse_time(&key.time)?;

        if self.notes.chars().count() > NOTES_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "notes must not exceed {NOTES_MAX_LENGTH} characters"
            )));
        }

        Ok(AppointmentSubmission {
            patient_id,
            doctor_id: key.doctor_id,
            date: key.date,
            time: key.time,
            status: self.status,
            notes: self.notes.clone(),
        })
    }
}

/// Validated appointment payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSubmission {
    /// Booked patient.
    pub patient_id: RecordId,
    /// Booked doctor.
    pub doctor_id: RecordId,
    /// Calendar date.
    pub date: String,
    /// Start time.
    pub time: String,
    /// Status to save.
    pub status: AppointmentStatus,
    /// Free-text notes.
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use hopespring_core::RecordId;

    use super::{AppointmentDraft, AppointmentStatus};

    fn id(value: i64) -> Option<RecordId> {
        RecordId::new(value).ok()
    }

    fn complete_draft() -> AppointmentDraft {
        AppointmentDraft {
            patient_id: id(3),
            doctor_id: id(5),
            date: Some("2025-07-10".to_owned()),
            time: Some("09:00".to_owned()),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    #[test]
    fn slot_key_needs_doctor_date_and_time() {
        let mut draft = complete_draft();
        assert!(draft.slot_key().is_some());

        draft.time = None;
        assert!(draft.slot_key().is_none());
    }

    #[test]
    fn submission_requires_patient() {
        let mut draft = complete_draft();
        draft.patient_id = None;
        assert!(draft.to_submission().is_err());
    }

    #[test]
    fn submission_rejects_malformed_time() {
        let mut draft = complete_draft();
        draft.time = Some("9am".to_owned());
        assert!(draft.to_submission().is_err());
    }

    #[test]
    fn submission_serializes_backend_field_names() {
        let submission = complete_draft().to_submission();
        assert!(submission.is_ok());

        let value = submission
            .ok()
            .and_then(|submission| serde_json::to_value(submission).ok())
            .unwrap_or_default();
        assert_eq!(value["doctor_id"], 5);
        assert_eq!(value["status"], "scheduled");
    }

    #[test]
    fn status_parses_transport_value() {
        assert_eq!(
            "cancelled".parse::<AppointmentStatus>().ok(),
            Some(AppointmentStatus::Cancelled)
        );
        assert!("CANCELLED".parse::<AppointmentStatus>().is_err());
    }
}
