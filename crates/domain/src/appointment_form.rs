//! State of one open appointment dialog.
//!
//! The form owns its availability answers. Every change of doctor, date or
//! time yields a fresh [`AvailabilityQuery`] tagged with the form instance
//! and the tuple it was issued for; answers are applied only while the form
//! still targets that exact tuple, so a slow response can never overwrite a
//! fresher one.

use std::fmt::{Display, Formatter};

use hopespring_core::{AppResult, RecordId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::appointment::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentSubmission,
};
use crate::availability::{AvailabilityLedger, AvailabilitySlot, SlotKey};

/// Shown when an availability lookup fails.
pub const AVAILABILITY_CHECK_FAILED_MESSAGE: &str = "Failed to check doctor availability";

/// Shown when submit is attempted for a slot not known to be bookable.
pub const SLOT_UNAVAILABLE_MESSAGE: &str = "Doctor is not available at the selected time";

/// Shown when the backend rejects or fails a save.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save appointment";

/// Identifier of one open form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(Uuid);

impl FormId {
    /// Creates a random form identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FormId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Availability lookup issued by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Form instance that issued the lookup.
    pub form_id: FormId,
    /// Slot the lookup is about.
    pub key: SlotKey,
}

/// What happened to an availability answer handed to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityOutcome {
    /// The answer belonged to the current tuple and was recorded.
    Applied,
    /// The form moved on; the answer was dropped.
    Stale,
}

/// One field edit made in the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FormFieldChange {
    /// Patient picker changed.
    Patient(Option<RecordId>),
    /// Doctor picker changed.
    Doctor(Option<RecordId>),
    /// Date input changed.
    Date(Option<String>),
    /// Time input changed.
    Time(Option<String>),
    /// Status picker changed.
    Status(AppointmentStatus),
    /// Notes edited.
    Notes(String),
}

/// Save request produced by a successful submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Form instance that produced the request.
    pub form_id: FormId,
    /// Existing appointment to update, or `None` to create one.
    pub appointment_id: Option<RecordId>,
    /// Validated payload.
    pub submission: AppointmentSubmission,
}

/// One open appointment dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentForm {
    form_id: FormId,
    appointment_id: Option<RecordId>,
    draft: AppointmentDraft,
    availability: AvailabilityLedger,
    pending: Option<SlotKey>,
    error: Option<String>,
}

impl AppointmentForm {
    /// Opens an empty form for a new appointment.
    #[must_use]
    pub fn open() -> Self {
        Self::with_draft(None, AppointmentDraft::default())
    }

    /// Opens a form prefilled from an existing appointment.
    ///
    /// No availability is known yet, so the form cannot be submitted until a
    /// field change triggers a check.
    #[must_use]
    pub fn edit(appointment: &Appointment) -> Self {
        Self::with_draft(
            Some(appointment.id),
            AppointmentDraft::from_appointment(appointment),
        )
    }

    fn with_draft(appointment_id: Option<RecordId>, draft: AppointmentDraft) -> Self {
        Self {
            form_id: FormId::new(),
            appointment_id,
            draft,
            availability: AvailabilityLedger::default(),
            pending: None,
            error: None,
        }
    }

    /// Returns the form instance id.
    #[must_use]
    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    /// Returns the appointment being edited, if any.
    #[must_use]
    pub fn appointment_id(&self) -> Option<RecordId> {
        self.appointment_id
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    /// Returns the availability answers held by the form.
    #[must_use]
    pub fn availability(&self) -> &AvailabilityLedger {
        &self.availability
    }

    /// Returns the tuple of the unanswered lookup, if one is in flight.
    #[must_use]
    pub fn pending_check(&self) -> Option<&SlotKey> {
        self.pending.as_ref()
    }

    /// Returns the unanswered lookup, if one is in flight.
    #[must_use]
    pub fn pending_query(&self) -> Option<AvailabilityQuery> {
        self.pending.clone().map(|key| AvailabilityQuery {
            form_id: self.form_id,
            key,
        })
    }

    /// Returns the message to show, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Selects the patient.
    pub fn set_patient(&mut self, patient_id: Option<RecordId>) {
        self.draft.patient_id = patient_id;
    }

    /// Sets the status to save.
    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.draft.status = status;
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Selects the doctor and re-checks availability with the current date
    /// and time.
    pub fn set_doctor(&mut self, doctor_id: Option<RecordId>) -> Option<AvailabilityQuery> {
        self.draft.doctor_id = doctor_id;
        self.requery()
    }

    /// Selects the date and re-checks availability with the current doctor
    /// and time.
    pub fn set_date(&mut self, date: Option<String>) -> Option<AvailabilityQuery> {
        self.draft.date = non_blank(date);
        self.requery()
    }

    /// Selects the time and re-checks availability with the current doctor
    /// and date.
    pub fn set_time(&mut self, time: Option<String>) -> Option<AvailabilityQuery> {
        self.draft.time = non_blank(time);
        self.requery()
    }

    /// Applies one field edit, returning the lookup it triggers, if any.
    pub fn apply_change(&mut self, change: FormFieldChange) -> Option<AvailabilityQuery> {
        match change {
            FormFieldChange::Patient(patient_id) => {
                self.set_patient(patient_id);
                None
            }
            FormFieldChange::Doctor(doctor_id) => self.set_doctor(doctor_id),
            FormFieldChange::Date(date) => self.set_date(date),
            FormFieldChange::Time(time) => self.set_time(time),
            FormFieldChange::Status(status) => {
                self.set_status(status);
                None
            }
            FormFieldChange::Notes(notes) => {
                self.set_notes(notes);
                None
            }
        }
    }

    fn requery(&mut self) -> Option<AvailabilityQuery> {
        self.pending = self.draft.slot_key();
        self.pending_query()
    }

    /// Hands the answer of a lookup back to the form.
    ///
    /// Answers for another form instance or an outdated tuple are dropped. A
    /// failed lookup keeps earlier answers and only sets the error message.
    pub fn apply_availability(
        &mut self,
        query: &AvailabilityQuery,
        answer: AppResult<Vec<AvailabilitySlot>>,
    ) -> AvailabilityOutcome {
        if query.form_id != self.form_id || self.draft.slot_key().as_ref() != Some(&query.key) {
            return AvailabilityOutcome::Stale;
        }

        self.pending = None;
        match answer {
            Ok(slots) => {
                self.availability.replace(slots);
                self.error = None;
            }
            Err(_) => self.error = Some(AVAILABILITY_CHECK_FAILED_MESSAGE.to_owned()),
        }

        AvailabilityOutcome::Applied
    }

    /// Returns whether the slot is known to be bookable.
    #[must_use]
    pub fn is_slot_bookable(&self, doctor_id: RecordId, date: &str, time: &str) -> bool {
        self.availability.is_slot_bookable(doctor_id, date, time)
    }

    /// Returns whether the slot selected in the draft is known to be bookable.
    #[must_use]
    pub fn is_current_slot_bookable(&self) -> bool {
        self.draft
            .slot_key()
            .is_some_and(|key| self.is_slot_bookable(key.doctor_id, &key.date, &key.time))
    }

    /// Returns whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.draft.patient_id.is_some() && self.pending.is_none() && self.is_current_slot_bookable()
    }

    /// Attempts to submit the form.
    ///
    /// Returns `None` and records the reason when submission is not possible;
    /// the draft itself is left unchanged.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.pending.is_some() || !self.is_current_slot_bookable() {
            self.error = Some(SLOT_UNAVAILABLE_MESSAGE.to_owned());
            return None;
        }

        match self.draft.to_submission() {
            Ok(submission) => {
                self.error = None;
                Some(SubmitRequest {
                    form_id: self.form_id,
                    appointment_id: self.appointment_id,
                    submission,
                })
            }
            Err(error) => {
                self.error = Some(error.message().to_owned());
                None
            }
        }
    }

    /// Records a failed save; the form stays open with its draft.
    pub fn record_save_failure(&mut self) {
        self.error = Some(SAVE_FAILED_MESSAGE.to_owned());
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests;
