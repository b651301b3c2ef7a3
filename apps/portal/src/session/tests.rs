use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hopespring_application::{
    AppointmentFormService, AppointmentFormStore, AppointmentRepository, SessionStore,
};
use hopespring_core::{AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentForm, AppointmentStatus, AppointmentSubmission, AvailabilitySlot,
    FormFieldChange, Role, SessionRole,
};
use hopespring_infrastructure::{InMemoryAppointmentFormRegistry, InMemoryHospitalBackend};
use tokio::sync::{Mutex, oneshot};
use tower_sessions::{MemoryStore, Session};

use super::{CookieSession, SessionFormStore};

fn id(value: i64) -> RecordId {
    RecordId::new(value).unwrap_or_else(|_| panic!("record id {value} should be valid"))
}

fn memory_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

fn registry() -> Arc<InMemoryAppointmentFormRegistry> {
    Arc::new(InMemoryAppointmentFormRegistry::new(Duration::from_secs(60)))
}

#[tokio::test]
async fn role_survives_round_trip_and_clear() {
    let session = CookieSession::new(memory_session());
    assert_eq!(session.load_role().await.ok(), Some(SessionRole::None));

    assert!(session.store_role(&Role::Doctor).await.is_ok());
    assert_eq!(
        session.load_role().await.ok(),
        Some(SessionRole::Assigned(Role::Doctor))
    );

    assert!(session.clear().await.is_ok());
    assert_eq!(session.load_role().await.ok(), Some(SessionRole::None));
}

#[tokio::test]
async fn unknown_stored_role_is_kept_without_dashboard() {
    let session = CookieSession::new(memory_session());
    assert!(session.store_role(&Role::parse("staff")).await.is_ok());

    let role = session.load_role().await.unwrap_or_default();
    assert!(role.is_signed_in());
    assert_eq!(role.dashboard_path(), None);
}

#[tokio::test]
async fn form_is_stored_and_discarded() {
    let forms = registry();
    let store = SessionFormStore::new(memory_session(), forms.clone());
    let form = AppointmentForm::open();

    assert!(store.save_form(&form).await.is_ok());
    assert_eq!(store.load_form().await.ok().flatten(), Some(form.clone()));

    assert!(store.discard_form().await.is_ok());
    assert!(matches!(store.load_form().await, Ok(None)));
    assert_eq!(forms.get(form.form_id()).await, None);
}

#[tokio::test]
async fn reopening_drops_the_replaced_form() {
    let forms = registry();
    let store = SessionFormStore::new(memory_session(), forms.clone());
    let first = AppointmentForm::open();
    let second = AppointmentForm::open();

    assert!(store.save_form(&first).await.is_ok());
    assert!(store.save_form(&second).await.is_ok());

    assert_eq!(forms.get(first.form_id()).await, None);
    assert_eq!(store.load_form().await.ok().flatten(), Some(second));
}

#[tokio::test]
async fn form_is_visible_to_a_later_request_of_the_same_session() {
    let store = Arc::new(MemoryStore::default());
    let forms = registry();

    let opening = Session::new(None, store.clone(), None);
    let form = AppointmentForm::open();
    assert!(
        SessionFormStore::new(opening.clone(), forms.clone())
            .save_form(&form)
            .await
            .is_ok()
    );
    assert!(opening.save().await.is_ok());

    let later = SessionFormStore::new(Session::new(opening.id(), store, None), forms);
    let edited = later
        .update_form(&mut |form: &mut AppointmentForm| form.set_notes("bring reports"))
        .await;

    assert!(matches!(
        edited,
        Ok(Some(edited)) if edited.form_id() == form.form_id() && edited.draft().notes == "bring reports"
    ));
}

/// Hospital backend whose first availability lookup waits for a signal.
struct GatedBackend {
    backend: InMemoryHospitalBackend,
    entered: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl AppointmentRepository for GatedBackend {
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.backend.list_appointments().await
    }

    async fn find_appointment(&self, appointment_id: RecordId) -> AppResult<Option<Appointment>> {
        self.backend.find_appointment(appointment_id).await
    }

    async fn create_appointment(
        &self,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        self.backend.create_appointment(submission).await
    }

    async fn update_appointment(
        &self,
        appointment_id: RecordId,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        self.backend
            .update_appointment(appointment_id, submission)
            .await
    }

    async fn update_appointment_status(
        &self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        self.backend
            .update_appointment_status(appointment_id, status)
            .await
    }

    async fn delete_appointment(&self, appointment_id: RecordId) -> AppResult<()> {
        self.backend.delete_appointment(appointment_id).await
    }

    async fn check_availability(
        &self,
        doctor_id: RecordId,
        date: &str,
        time: &str,
    ) -> AppResult<Vec<AvailabilitySlot>> {
        if let Some(entered) = self.entered.lock().await.take() {
            let _ = entered.send(());
        }
        let release = self.release.lock().await.take();
        if let Some(release) = release {
            let _ = release.await;
        }

        self.backend.check_availability(doctor_id, date, time).await
    }
}

#[tokio::test]
async fn overlapping_requests_keep_the_latest_slot() {
    let store = Arc::new(MemoryStore::default());
    let forms = registry();
    let (entered_tx, entered_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    let backend = InMemoryHospitalBackend::with_sample_data()
        .unwrap_or_else(|error| panic!("sample data should load: {error}"));
    let service = AppointmentFormService::new(Arc::new(GatedBackend {
        backend,
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
    }));

    // Incomplete slot, so no lookup runs while opening.
    let opening = Session::new(None, store.clone(), None);
    let opening_forms = SessionFormStore::new(opening.clone(), forms.clone());
    assert!(service.open(&opening_forms, None).await.is_ok());
    let prepared = service
        .change_fields(
            &opening_forms,
            vec![
                FormFieldChange::Patient(Some(id(6))),
                FormFieldChange::Doctor(Some(id(5))),
                FormFieldChange::Time(Some("09:00".to_owned())),
            ],
        )
        .await;
    assert!(matches!(prepared, Ok(form) if form.pending_check().is_none()));
    assert!(opening.save().await.is_ok());

    let request = || {
        SessionFormStore::new(
            Session::new(opening.id(), store.clone(), None),
            forms.clone(),
        )
    };
    let slow_request = request();
    let fast_request = request();

    // 2025-07-10 09:00 is already booked for doctor 5; 2025-07-11 is free.
    let slow = service.change_fields(
        &slow_request,
        vec![FormFieldChange::Date(Some("2025-07-10".to_owned()))],
    );
    let fast = async {
        let _ = entered_rx.await;
        let form = service
            .change_fields(
                &fast_request,
                vec![FormFieldChange::Date(Some("2025-07-11".to_owned()))],
            )
            .await;
        let _ = release_tx.send(());
        form
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(matches!(fast, Ok(form) if form.can_submit()));
    assert!(matches!(
        &slow,
        Ok(form) if form.draft().date.as_deref() == Some("2025-07-11") && form.can_submit()
    ));

    let stored = request().load_form().await.ok().flatten();
    let Some(stored) = stored else {
        panic!("form should still be open");
    };
    assert_eq!(stored.draft().date.as_deref(), Some("2025-07-11"));
    assert!(stored.pending_check().is_none());
    assert!(stored.is_current_slot_bookable());
}
