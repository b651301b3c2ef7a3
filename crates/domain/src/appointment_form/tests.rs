use hopespring_core::{AppError, RecordId};

use super::{
    AVAILABILITY_CHECK_FAILED_MESSAGE, AppointmentForm, AvailabilityOutcome,
    SLOT_UNAVAILABLE_MESSAGE,
};
use crate::appointment::{Appointment, AppointmentStatus};
use crate::availability::AvailabilitySlot;

fn id(value: i64) -> Option<RecordId> {
    RecordId::new(value).ok()
}

fn slot(doctor: i64, date: &str, time: &str, is_available: bool) -> AvailabilitySlot {
    AvailabilitySlot {
        doctor_id: RecordId::new(doctor).unwrap_or_else(|_| panic!("invalid test id {doctor}")),
        date: date.to_owned(),
        time: time.to_owned(),
        is_available,
    }
}

fn filled_form() -> (AppointmentForm, Option<super::AvailabilityQuery>) {
    let mut form = AppointmentForm::open();
    form.set_patient(id(3));
    assert!(form.set_doctor(id(5)).is_none());
    assert!(form.set_date(Some("2025-07-10".to_owned())).is_none());
    let query = form.set_time(Some("09:00".to_owned()));
    (form, query)
}

#[test]
fn query_is_issued_once_all_three_fields_are_set() {
    let (form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));

    assert_eq!(query.form_id, form.form_id());
    assert_eq!(query.key.date, "2025-07-10");
    assert_eq!(query.key.time, "09:00");
    assert_eq!(form.pending_check(), Some(&query.key));
    assert!(!form.can_submit());
}

#[test]
fn unavailable_slot_keeps_submit_disabled_and_submit_is_a_noop() {
    let (mut form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));

    let outcome = form.apply_availability(
        &query,
        Ok(vec![slot(5, "2025-07-10", "09:00", false)]),
    );
    assert_eq!(outcome, AvailabilityOutcome::Applied);
    assert!(!form.can_submit());

    let draft_before = form.draft().clone();
    assert!(form.begin_submit().is_none());
    assert_eq!(form.draft(), &draft_before);
    assert_eq!(form.error(), Some(SLOT_UNAVAILABLE_MESSAGE));
}

#[test]
fn available_slot_enables_submit() {
    let (mut form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));

    form.apply_availability(&query, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));
    assert!(form.can_submit());

    let request = form.begin_submit();
    assert!(request.is_some());
    assert_eq!(
        request.map(|request| request.submission.status),
        Some(AppointmentStatus::Scheduled)
    );
}

#[test]
fn date_change_requeries_with_previous_doctor_and_time() {
    let (mut form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));
    form.apply_availability(&query, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));
    assert!(form.can_submit());

    let next = form.set_date(Some("2025-07-11".to_owned()));
    let next = next.unwrap_or_else(|| panic!("expected availability query"));
    assert_eq!(next.key.doctor_id, query.key.doctor_id);
    assert_eq!(next.key.time, "09:00");
    assert_eq!(next.key.date, "2025-07-11");
    assert!(!form.can_submit());

    form.apply_availability(&next, Ok(vec![slot(5, "2025-07-11", "09:00", true)]));
    assert!(form.can_submit());
}

#[test]
fn stale_answer_cannot_overwrite_fresher_one() {
    let (mut form, first) = filled_form();
    let first = first.unwrap_or_else(|| panic!("expected availability query"));
    let second = form
        .set_time(Some("10:00".to_owned()))
        .unwrap_or_else(|| panic!("expected availability query"));

    let fresh = form.apply_availability(&second, Ok(vec![slot(5, "2025-07-10", "10:00", false)]));
    let stale = form.apply_availability(&first, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));

    assert_eq!(fresh, AvailabilityOutcome::Applied);
    assert_eq!(stale, AvailabilityOutcome::Stale);
    assert_eq!(form.availability().slots().len(), 1);
    assert!(!form.can_submit());
}

#[test]
fn answer_for_another_form_instance_is_stale() {
    let (_, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));
    let (mut reopened, _) = filled_form();

    let outcome = reopened.apply_availability(&query, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));
    assert_eq!(outcome, AvailabilityOutcome::Stale);
    assert!(!reopened.is_current_slot_bookable());
}

#[test]
fn failed_check_keeps_previous_answers() {
    let (mut form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));
    form.apply_availability(&query, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));

    let retry = form
        .set_doctor(id(5))
        .unwrap_or_else(|| panic!("expected availability query"));
    form.apply_availability(&retry, Err(AppError::Internal("timeout".to_owned())));

    assert_eq!(form.error(), Some(AVAILABILITY_CHECK_FAILED_MESSAGE));
    assert!(form.is_current_slot_bookable());
}

#[test]
fn clearing_a_field_disables_submit() {
    let (mut form, query) = filled_form();
    let query = query.unwrap_or_else(|| panic!("expected availability query"));
    form.apply_availability(&query, Ok(vec![slot(5, "2025-07-10", "09:00", true)]));

    assert!(form.set_time(Some("  ".to_owned())).is_none());
    assert!(form.pending_check().is_none());
    assert!(!form.can_submit());
}

#[test]
fn edit_form_starts_without_availability() {
    let appointment = Appointment {
        id: RecordId::new(9).unwrap_or_else(|_| panic!("invalid test id")),
        patient_id: RecordId::new(3).unwrap_or_else(|_| panic!("invalid test id")),
        patient_name: "Asha Rao".to_owned(),
        doctor_id: RecordId::new(5).unwrap_or_else(|_| panic!("invalid test id")),
        doctor_name: "Vikram Menon".to_owned(),
        date: "2025-07-10".to_owned(),
        time: "09:00".to_owned(),
        status: AppointmentStatus::Scheduled,
        notes: None,
        created_at: None,
        updated_at: None,
    };

    let form = AppointmentForm::edit(&appointment);
    assert_eq!(form.appointment_id(), id(9));
    assert!(form.draft().slot_key().is_some());
    assert!(!form.can_submit());
}

#[test]
fn field_changes_decode_from_tagged_json() {
    let payload = r#"[{"field":"doctor","value":5},{"field":"date","value":"2025-07-10"},{"field":"time","value":null}]"#;
    let changes = serde_json::from_str::<Vec<super::FormFieldChange>>(payload).unwrap_or_default();
    assert_eq!(changes.len(), 3);

    let mut form = AppointmentForm::open();
    let queries: Vec<_> = changes
        .into_iter()
        .map(|change| form.apply_change(change))
        .collect();
    assert!(queries.iter().all(Option::is_none));
    assert_eq!(form.draft().doctor_id, id(5));
    assert_eq!(form.draft().date.as_deref(), Some("2025-07-10"));
}
