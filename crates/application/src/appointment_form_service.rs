//! Appointment dialog lifecycle with live availability gating.

use std::sync::Arc;

use hopespring_core::{AppError, AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentForm, AvailabilityQuery, AvailabilitySlot, FormFieldChange,
};

use crate::{AppointmentFormStore, AppointmentRepository};

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend stored the appointment and the form was closed.
    Saved(Appointment),
    /// Submission was not allowed; the form carries the reason.
    Blocked(AppointmentForm),
    /// The backend save failed; the form stays open with a generic message.
    Failed {
        /// Form as left open.
        form: AppointmentForm,
        /// Underlying backend error.
        error: AppError,
    },
}

/// Application service driving the appointment dialog.
#[derive(Clone)]
pub struct AppointmentFormService {
    appointments: Arc<dyn AppointmentRepository>,
}

impl AppointmentFormService {
    /// Creates a new appointment form service.
    #[must_use]
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// Opens the dialog, replacing any form already open in the session.
    ///
    /// With an appointment id the form is prefilled for editing.
    pub async fn open(
        &self,
        forms: &dyn AppointmentFormStore,
        appointment_id: Option<RecordId>,
    ) -> AppResult<AppointmentForm> {
        let form = match appointment_id {
            None => AppointmentForm::open(),
            Some(appointment_id) => {
                let appointment = self
                    .appointments
                    .find_appointment(appointment_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "appointment '{appointment_id}' does not exist"
                        ))
                    })?;
                AppointmentForm::edit(&appointment)
            }
        };

        forms.save_form(&form).await?;
        Ok(form)
    }

    /// Returns the open form.
    pub async fn current(&self, forms: &dyn AppointmentFormStore) -> AppResult<AppointmentForm> {
        forms
            .load_form()
            .await?
            .ok_or_else(|| AppError::NotFound("no appointment form is open".to_owned()))
    }

    /// Applies field edits and re-checks availability when the slot changed.
    ///
    /// The answer is handed to the form as stored after the lookup, so an
    /// edit that landed meanwhile makes the answer stale instead of being
    /// overwritten by it.
    pub async fn change_fields(
        &self,
        forms: &dyn AppointmentFormStore,
        mut changes: Vec<FormFieldChange>,
    ) -> AppResult<AppointmentForm> {
        let mut query = None;
        let form = update_open_form(forms, |form| {
            let mut slot_changed = false;
            for change in std::mem::take(&mut changes) {
                slot_changed |= form.apply_change(change).is_some();
            }
            query = slot_changed.then(|| form.pending_query()).flatten();
        })
        .await?;

        let Some(query) = query else {
            return Ok(form);
        };

        let mut answer = Some(self.check_availability(&query).await);
        update_open_form(forms, |form| {
            if let Some(answer) = answer.take() {
                form.apply_availability(&query, answer);
            }
        })
        .await
    }

    /// Runs one availability lookup against the backend.
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> AppResult<Vec<AvailabilitySlot>> {
        self.appointments
            .check_availability(query.key.doctor_id, &query.key.date, &query.key.time)
            .await
    }

    /// Submits the open form.
    ///
    /// A slot not known to be bookable makes this a no-op apart from the
    /// message on the form.
    pub async fn submit(&self, forms: &dyn AppointmentFormStore) -> AppResult<SubmitOutcome> {
        let mut request = None;
        let form = update_open_form(forms, |form| request = form.begin_submit()).await?;

        let Some(request) = request else {
            return Ok(SubmitOutcome::Blocked(form));
        };

        let saved = match request.appointment_id {
            Some(appointment_id) => {
                self.appointments
                    .update_appointment(appointment_id, &request.submission)
                    .await
            }
            None => {
                self.appointments
                    .create_appointment(&request.submission)
                    .await
            }
        };

        match saved {
            Ok(appointment) => {
                forms.discard_form().await?;
                Ok(SubmitOutcome::Saved(appointment))
            }
            Err(error) => {
                let form = update_open_form(forms, AppointmentForm::record_save_failure).await?;
                Ok(SubmitOutcome::Failed { form, error })
            }
        }
    }

    /// Closes the dialog.
    pub async fn close(&self, forms: &dyn AppointmentFormStore) -> AppResult<()> {
        forms.discard_form().await
    }
}

async fn update_open_form(
    forms: &dyn AppointmentFormStore,
    mut apply: impl FnMut(&mut AppointmentForm) + Send,
) -> AppResult<AppointmentForm> {
    forms
        .update_form(&mut apply)
        .await?
        .ok_or_else(|| AppError::NotFound("no appointment form is open".to_owned()))
}
