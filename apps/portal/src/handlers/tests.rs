use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use hopespring_core::AppError;
use hopespring_domain::{FormId, Role};
use tower_sessions::{MemoryStore, Session};

use super::{appointment_form, auth, billing, clinical, dashboard, inventory, records};
use crate::dto::{
    AppointmentFieldChange, BillingRecordRequest, DoctorListQuery, DoctorRequest,
    InventoryItemRequest, LabTestRequest, LoginRequest, MedicationRequest, NavigationQuery,
    OpenAppointmentFormRequest, PatientRequest, PrescriptionRequest,
    SubmitAppointmentFormResponse, UpdateAppointmentFormRequest,
};
use crate::portal_config::PortalConfig;
use crate::portal_services::build_app_state;
use crate::session::SESSION_APPOINTMENT_FORM_KEY;
use crate::state::AppState;

fn in_memory_state() -> AppState {
    let config = PortalConfig::from_lookup(|name| {
        (name == "BACKEND_TARGET").then(|| "in_memory".to_owned())
    })
    .unwrap_or_else(|error| panic!("in-memory config should load: {error}"));

    build_app_state(&config).unwrap_or_else(|error| panic!("state should build: {error}"))
}

fn new_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

async fn sign_in(state: &AppState, session: &Session, username: &str) {
    let response = auth::login_handler(
        State(state.clone()),
        session.clone(),
        Json(LoginRequest {
            username: username.to_owned(),
            password: "123".to_owned(),
        }),
    )
    .await;
    assert!(response.is_ok());
}

async fn navigate(state: &AppState, session: &Session, path: &str) -> Option<String> {
    auth::navigation_handler(
        State(state.clone()),
        session.clone(),
        Query(NavigationQuery {
            path: path.to_owned(),
        }),
    )
    .await
    .map(|Json(decision)| decision.location)
    .unwrap_or_else(|error| panic!("navigation should be answered: {:?}", error.0))
}

#[tokio::test]
async fn admin_login_redirects_to_admin_dashboard() {
    let state = in_memory_state();
    let session = new_session();

    let response = auth::login_handler(
        State(state.clone()),
        session.clone(),
        Json(LoginRequest {
            username: "admin".to_owned(),
            password: "123".to_owned(),
        }),
    )
    .await;

    assert!(matches!(
        response,
        Ok(Json(login)) if login.redirect_to == "/dashboard/admin" && login.role == "admin"
    ));
    assert_eq!(
        navigate(&state, &session, "/login").await.as_deref(),
        Some("/dashboard/admin")
    );
}

#[tokio::test]
async fn wrong_password_is_unauthorized_with_generic_message() {
    let state = in_memory_state();
    let session = new_session();

    let response = auth::login_handler(
        State(state.clone()),
        session.clone(),
        Json(LoginRequest {
            username: "admin".to_owned(),
            password: "wrong".to_owned(),
        }),
    )
    .await;

    let Err(error) = response else {
        panic!("wrong password must be rejected");
    };
    assert_eq!(error.0.message(), "Invalid credentials");
    assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        navigate(&state, &session, "/billing").await.as_deref(),
        Some("/")
    );
}

#[tokio::test]
async fn doctor_is_kept_off_admin_dashboard() {
    let state = in_memory_state();
    let session = new_session();
    sign_in(&state, &session, "doctor").await;

    assert_eq!(
        navigate(&state, &session, "/dashboard/admin").await.as_deref(),
        Some("/dashboard/doctor")
    );
    assert_eq!(navigate(&state, &session, "/billing").await, None);
}

#[tokio::test]
async fn logout_returns_session_to_public_routes() {
    let state = in_memory_state();
    let session = new_session();
    sign_in(&state, &session, "manager").await;

    let logout = auth::logout_handler(State(state.clone()), session.clone()).await;
    assert!(matches!(logout, Ok(StatusCode::NO_CONTENT)));

    let view = auth::session_handler(State(state.clone()), session.clone()).await;
    assert!(matches!(view, Ok(Json(view)) if view.role.is_none() && view.menu.is_empty()));
}

#[tokio::test]
async fn doctor_picker_lists_active_doctors() {
    let state = in_memory_state();

    let doctors = records::list_doctors_handler(
        State(state),
        Query(DoctorListQuery { active_only: true }),
    )
    .await;

    assert!(matches!(
        doctors,
        Ok(Json(doctors)) if doctors.len() == 4 && doctors.iter().all(|doctor| doctor.is_active)
    ));
}

#[tokio::test]
async fn booked_slot_cannot_be_submitted() {
    let state = in_memory_state();
    let session = new_session();
    sign_in(&state, &session, "admin").await;

    let opened = appointment_form::open_appointment_form_handler(
        State(state.clone()),
        session.clone(),
        Json(OpenAppointmentFormRequest::default()),
    )
    .await;
    assert!(matches!(opened, Ok((StatusCode::CREATED, _))));

    let updated = appointment_form::update_appointment_form_handler(
        State(state.clone()),
        session.clone(),
        Json(UpdateAppointmentFormRequest {
            changes: vec![
                AppointmentFieldChange::Patient(Some(6)),
                AppointmentFieldChange::Doctor(Some(5)),
                AppointmentFieldChange::Date(Some("2025-07-10".to_owned())),
                AppointmentFieldChange::Time(Some("09:00".to_owned())),
            ],
        }),
    )
    .await;
    assert!(matches!(
        &updated,
        Ok(Json(form)) if !form.slot_bookable && !form.can_submit && !form.checking_availability
    ));

    let submitted =
        appointment_form::submit_appointment_form_handler(State(state.clone()), session.clone())
            .await;
    assert!(matches!(
        submitted,
        Ok(Json(SubmitAppointmentFormResponse::Rejected { form }))
            if form.error.as_deref() == Some("Doctor is not available at the selected time")
    ));
}

#[tokio::test]
async fn free_slot_is_booked_and_form_closed() {
    let state = in_memory_state();
    let session = new_session();
    sign_in(&state, &session, "admin").await;

    let _ = appointment_form::open_appointment_form_handler(
        State(state.clone()),
        session.clone(),
        Json(OpenAppointmentFormRequest::default()),
    )
    .await;
    let _ = appointment_form::update_appointment_form_handler(
        State(state.clone()),
        session.clone(),
        Json(UpdateAppointmentFormRequest {
            changes: vec![
                AppointmentFieldChange::Patient(Some(6)),
                AppointmentFieldChange::Doctor(Some(5)),
                AppointmentFieldChange::Date(Some("2025-07-11".to_owned())),
                AppointmentFieldChange::Time(Some("10:30".to_owned())),
            ],
        }),
    )
    .await;

    let submitted =
        appointment_form::submit_appointment_form_handler(State(state.clone()), session.clone())
            .await;
    assert!(matches!(
        submitted,
        Ok(Json(SubmitAppointmentFormResponse::Saved { appointment }))
            if appointment.doctor_id == 5 && appointment.status == "scheduled"
    ));

    let current =
        appointment_form::current_appointment_form_handler(State(state), session).await;
    assert!(matches!(current, Err(error) if matches!(error.0, AppError::NotFound(_))));
}

#[tokio::test]
async fn form_carries_over_between_requests_of_one_session() {
    let state = in_memory_state();
    let store = Arc::new(MemoryStore::default());

    let login = Session::new(None, store.clone(), None);
    sign_in(&state, &login, "admin").await;
    assert!(login.save().await.is_ok());
    let next_request = || Session::new(login.id(), store.clone(), None);

    let opening = next_request();
    let opened = appointment_form::open_appointment_form_handler(
        State(state.clone()),
        opening.clone(),
        Json(OpenAppointmentFormRequest::default()),
    )
    .await;
    let Ok((_, Json(opened))) = opened else {
        panic!("form should open");
    };
    assert!(opening.save().await.is_ok());

    let updated = appointment_form::update_appointment_form_handler(
        State(state.clone()),
        next_request(),
        Json(UpdateAppointmentFormRequest {
            changes: vec![
                AppointmentFieldChange::Patient(Some(7)),
                AppointmentFieldChange::Doctor(Some(2)),
                AppointmentFieldChange::Date(Some("2025-08-01".to_owned())),
                AppointmentFieldChange::Time(Some("11:00".to_owned())),
            ],
        }),
    )
    .await;
    assert!(matches!(
        &updated,
        Ok(Json(form)) if form.form_id == opened.form_id && form.can_submit
    ));

    let submitted =
        appointment_form::submit_appointment_form_handler(State(state.clone()), next_request())
            .await;
    assert!(matches!(
        submitted,
        Ok(Json(SubmitAppointmentFormResponse::Saved { appointment }))
            if appointment.patient_id == 7 && appointment.time == "11:00"
    ));
}

#[tokio::test]
async fn logout_closes_the_open_form() {
    let state = in_memory_state();
    let session = new_session();
    sign_in(&state, &session, "admin").await;

    let opened = appointment_form::open_appointment_form_handler(
        State(state.clone()),
        session.clone(),
        Json(OpenAppointmentFormRequest::default()),
    )
    .await;
    assert!(opened.is_ok());
    let form_id = session
        .get::<FormId>(SESSION_APPOINTMENT_FORM_KEY)
        .await
        .ok()
        .flatten();
    let Some(form_id) = form_id else {
        panic!("session should reference the open form");
    };

    let logout = auth::logout_handler(State(state.clone()), session.clone()).await;
    assert!(matches!(logout, Ok(StatusCode::NO_CONTENT)));

    assert_eq!(state.appointment_forms.get(form_id).await, None);
    let current =
        appointment_form::current_appointment_form_handler(State(state), session).await;
    assert!(matches!(current, Err(error) if matches!(error.0, AppError::NotFound(_))));
}

fn patient_request(email: &str) -> PatientRequest {
    PatientRequest {
        first_name: "Sara".to_owned(),
        last_name: "Thomas".to_owned(),
        date_of_birth: "1992-06-18".to_owned(),
        gender: "female".to_owned(),
        address: "12 Lake Road".to_owned(),
        phone: "9812345670".to_owned(),
        email: email.to_owned(),
    }
}

fn gloves_request(quantity: i64) -> InventoryItemRequest {
    InventoryItemRequest {
        name: "Surgical gloves".to_owned(),
        category: "Supplies".to_owned(),
        quantity,
        unit: "boxes".to_owned(),
        price_per_unit: 250.0,
        supplier: None,
        expiry_date: None,
        minimum_stock: 25,
    }
}

#[tokio::test]
async fn patient_is_registered_updated_and_deleted() {
    let state = in_memory_state();
    let admin = Extension(Role::Admin);

    let created = records::register_patient_handler(
        State(state.clone()),
        admin.clone(),
        Json(patient_request("sara@hopespring.test")),
    )
    .await;
    let Ok((StatusCode::CREATED, Json(created))) = created else {
        panic!("patient should be registered");
    };

    let mut changed = patient_request("sara.thomas@hopespring.test");
    changed.address = "4 Hill Street".to_owned();
    let updated = records::update_patient_handler(
        State(state.clone()),
        admin.clone(),
        Path(created.id),
        Json(changed),
    )
    .await;
    assert!(matches!(
        &updated,
        Ok(Json(patient)) if patient.address == "4 Hill Street" && patient.id == created.id
    ));

    let deleted =
        records::delete_patient_handler(State(state.clone()), admin.clone(), Path(created.id))
            .await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));

    let listed = records::list_patients_handler(State(state.clone())).await;
    assert!(matches!(
        listed,
        Ok(Json(patients)) if patients.iter().all(|patient| patient.id != created.id)
    ));

    let again = records::delete_patient_handler(State(state), admin, Path(created.id)).await;
    assert!(matches!(again, Err(error) if matches!(error.0, AppError::NotFound(_))));
}

#[tokio::test]
async fn invalid_patient_update_is_rejected() {
    let state = in_memory_state();

    let updated = records::update_patient_handler(
        State(state),
        Extension(Role::Admin),
        Path(6),
        Json(patient_request("not-an-email")),
    )
    .await;

    assert!(matches!(updated, Err(error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn deactivated_doctor_leaves_the_picker() {
    let state = in_memory_state();
    let admin = Extension(Role::Admin);

    let added = records::add_doctor_handler(
        State(state.clone()),
        admin.clone(),
        Json(DoctorRequest {
            first_name: "Leela".to_owned(),
            last_name: "Pillai".to_owned(),
            specialization: "Oncology".to_owned(),
            phone: "9000012345".to_owned(),
            email: "leela.pillai@hopespring.test".to_owned(),
            is_active: true,
        }),
    )
    .await;
    let Ok((StatusCode::CREATED, Json(added))) = added else {
        panic!("doctor should be added");
    };

    let deactivated =
        records::deactivate_doctor_handler(State(state.clone()), admin, Path(added.id)).await;
    assert!(matches!(deactivated, Ok(StatusCode::NO_CONTENT)));

    let active = records::list_doctors_handler(
        State(state.clone()),
        Query(DoctorListQuery { active_only: true }),
    )
    .await;
    assert!(matches!(
        active,
        Ok(Json(doctors)) if doctors.len() == 4 && doctors.iter().all(|doctor| doctor.id != added.id)
    ));

    let everyone =
        records::list_doctors_handler(State(state), Query(DoctorListQuery::default())).await;
    assert!(matches!(
        everyone,
        Ok(Json(doctors)) if doctors.iter().any(|doctor| doctor.id == added.id && !doctor.is_active)
    ));
}

#[tokio::test]
async fn bill_payments_update_the_outstanding_amount() {
    let state = in_memory_state();
    let manager = Extension(Role::Manager);

    let created = billing::create_billing_record_handler(
        State(state.clone()),
        manager.clone(),
        Json(BillingRecordRequest {
            patient_id: 8,
            appointment_id: None,
            total_amount: 800.0,
            paid_amount: 0.0,
            payment_status: "pending".to_owned(),
            payment_method: None,
            insurance_provider: None,
            notes: Some("Consultation".to_owned()),
        }),
    )
    .await;
    let Ok((StatusCode::CREATED, Json(created))) = created else {
        panic!("bill should be created");
    };
    assert!((created.outstanding_amount - 800.0).abs() < f64::EPSILON);
    assert!(created.created_at.is_some());

    let paid = billing::update_billing_record_handler(
        State(state.clone()),
        manager.clone(),
        Path(created.id),
        Json(BillingRecordRequest {
            patient_id: 8,
            appointment_id: None,
            total_amount: 800.0,
            paid_amount: 800.0,
            payment_status: "paid".to_owned(),
            payment_method: Some("cash".to_owned()),
            insurance_provider: None,
            notes: Some("Consultation".to_owned()),
        }),
    )
    .await;
    assert!(matches!(
        &paid,
        Ok(Json(record)) if record.payment_status == "paid"
            && record.outstanding_amount.abs() < f64::EPSILON
            && record.created_at == created.created_at
    ));

    let deleted =
        billing::delete_billing_record_handler(State(state), manager, Path(created.id)).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));
}

#[tokio::test]
async fn bill_for_unknown_patient_is_rejected() {
    let state = in_memory_state();

    let created = billing::create_billing_record_handler(
        State(state),
        Extension(Role::Manager),
        Json(BillingRecordRequest {
            patient_id: 999,
            appointment_id: None,
            total_amount: 100.0,
            paid_amount: 0.0,
            payment_status: "pending".to_owned(),
            payment_method: None,
            insurance_provider: None,
            notes: None,
        }),
    )
    .await;

    assert!(matches!(created, Err(error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn restocking_clears_the_low_stock_list() {
    let state = in_memory_state();
    let manager = Extension(Role::Manager);

    let low = inventory::list_low_stock_handler(State(state.clone())).await;
    let Ok(Json(low)) = low else {
        panic!("low stock should be listed");
    };
    let names = low.iter().map(|item| item.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Surgical gloves"]);
    let gloves_id = low.first().map(|item| item.id).unwrap_or_default();

    let restocked = inventory::update_inventory_item_handler(
        State(state.clone()),
        manager.clone(),
        Path(gloves_id),
        Json(gloves_request(200)),
    )
    .await;
    assert!(matches!(&restocked, Ok(Json(item)) if !item.is_low_stock && item.quantity == 200));

    let low = inventory::list_low_stock_handler(State(state.clone())).await;
    assert!(matches!(low, Ok(Json(items)) if items.is_empty()));

    let rejected = inventory::create_inventory_item_handler(
        State(state.clone()),
        manager.clone(),
        Json(gloves_request(-1)),
    )
    .await;
    assert!(matches!(rejected, Err(error) if matches!(error.0, AppError::Validation(_))));

    let deleted =
        inventory::delete_inventory_item_handler(State(state), manager, Path(gloves_id)).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));
}

#[tokio::test]
async fn prescription_is_written_and_revised() {
    let state = in_memory_state();
    let doctor = Extension(Role::Doctor);
    let request = |medications: Vec<MedicationRequest>| PrescriptionRequest {
        patient_id: 6,
        doctor_id: 1,
        diagnosis: "Seasonal influenza".to_owned(),
        notes: None,
        medications,
    };
    let medication = |name: &str| MedicationRequest {
        name: name.to_owned(),
        dosage: "500mg".to_owned(),
        frequency: "Twice daily".to_owned(),
        duration: Some("5 days".to_owned()),
        instructions: None,
    };

    let created = clinical::create_prescription_handler(
        State(state.clone()),
        doctor.clone(),
        Json(request(vec![medication("Oseltamivir")])),
    )
    .await;
    let Ok((StatusCode::CREATED, Json(created))) = created else {
        panic!("prescription should be created");
    };

    let revised = clinical::update_prescription_handler(
        State(state.clone()),
        doctor.clone(),
        Path(created.id),
        Json(request(vec![medication("Paracetamol"), medication("Cetirizine")])),
    )
    .await;
    assert!(matches!(
        &revised,
        Ok(Json(prescription)) if prescription.medications.len() == 2
            && prescription.medications.iter().all(|medication| medication.name != "Oseltamivir")
    ));

    let for_patient =
        clinical::list_patient_prescriptions_handler(State(state.clone()), Path(6)).await;
    assert!(matches!(
        for_patient,
        Ok(Json(prescriptions)) if prescriptions.iter().any(|prescription| prescription.id == created.id)
    ));

    let deleted =
        clinical::delete_prescription_handler(State(state), doctor, Path(created.id)).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));
}

#[tokio::test]
async fn lab_test_results_are_recorded() {
    let state = in_memory_state();
    let doctor = Extension(Role::Doctor);
    let request = |results: Option<&str>, status: &str| LabTestRequest {
        patient_id: 7,
        doctor_id: 2,
        test_name: "Complete blood count".to_owned(),
        test_type: "Blood".to_owned(),
        test_date: "2025-07-20".to_owned(),
        results: results.map(str::to_owned),
        status: status.to_owned(),
        notes: None,
    };

    let ordered = clinical::create_lab_test_handler(
        State(state.clone()),
        doctor.clone(),
        Json(request(None, "pending")),
    )
    .await;
    let Ok((StatusCode::CREATED, Json(ordered))) = ordered else {
        panic!("lab test should be ordered");
    };

    let completed = clinical::update_lab_test_handler(
        State(state.clone()),
        doctor.clone(),
        Path(ordered.id),
        Json(request(Some("Within normal range"), "completed")),
    )
    .await;
    assert!(matches!(
        &completed,
        Ok(Json(test)) if test.status == "completed"
            && test.results.as_deref() == Some("Within normal range")
    ));

    let inactive_doctor = clinical::create_lab_test_handler(
        State(state.clone()),
        doctor.clone(),
        Json(LabTestRequest {
            doctor_id: 4,
            ..request(None, "pending")
        }),
    )
    .await;
    assert!(matches!(inactive_doctor, Err(error) if matches!(error.0, AppError::Validation(_))));

    let deleted = clinical::delete_lab_test_handler(State(state), doctor, Path(ordered.id)).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));
}

#[tokio::test]
async fn dashboards_summarise_the_demo_hospital() {
    let state = in_memory_state();

    let stats = dashboard::dashboard_stats_handler(State(state.clone())).await;
    assert!(matches!(
        stats,
        Ok(Json(stats)) if stats.total_patients == 3
            && stats.total_doctors == 5
            && stats.total_appointments == 1
    ));

    let patient = dashboard::patient_overview_handler(State(state.clone()), Path(7)).await;
    assert!(matches!(
        patient,
        Ok(Json(overview)) if overview.prescriptions.len() == 1
            && overview.lab_tests.len() == 1
            && overview.billing_records.is_empty()
            && overview.outstanding_balance.abs() < f64::EPSILON
    ));

    let doctor = dashboard::doctor_overview_handler(State(state.clone()), Path(1)).await;
    assert!(matches!(
        doctor,
        Ok(Json(overview)) if overview.pending_lab_tests.len() == 1
    ));

    let manager = dashboard::manager_overview_handler(State(state.clone())).await;
    let Ok(Json(manager)) = manager else {
        panic!("manager overview should load");
    };
    let low_stock = manager
        .low_stock_items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(low_stock, ["Surgical gloves"]);
    assert_eq!(manager.unpaid_billing_records.len(), 1);
    assert!((manager.outstanding_total - 1000.0).abs() < f64::EPSILON);
    assert!((manager.inventory_value - 5600.0).abs() < f64::EPSILON);

    let unknown = dashboard::doctor_overview_handler(State(state), Path(999)).await;
    assert!(matches!(unknown, Err(error) if matches!(error.0, AppError::NotFound(_))));
}
