use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use hopespring_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(&app_state.frontend_url)?;

    // Operational pages require a role, mirroring the shell's protected routes.
    let protected_routes = Router::new()
        .route(
            "/api/patients",
            get(handlers::records::list_patients_handler)
                .post(handlers::records::register_patient_handler),
        )
        .route(
            "/api/patients/{patient_id}",
            put(handlers::records::update_patient_handler)
                .delete(handlers::records::delete_patient_handler),
        )
        .route(
            "/api/doctors",
            get(handlers::records::list_doctors_handler)
                .post(handlers::records::add_doctor_handler),
        )
        .route(
            "/api/doctors/{doctor_id}",
            put(handlers::records::update_doctor_handler)
                .delete(handlers::records::deactivate_doctor_handler),
        )
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments_handler),
        )
        .route(
            "/api/appointments/{appointment_id}",
            delete(handlers::appointments::delete_appointment_handler),
        )
        .route(
            "/api/appointments/{appointment_id}/status",
            put(handlers::appointments::update_appointment_status_handler),
        )
        .route(
            "/api/billing",
            get(handlers::billing::list_billing_records_handler)
                .post(handlers::billing::create_billing_record_handler),
        )
        .route(
            "/api/billing/{billing_id}",
            put(handlers::billing::update_billing_record_handler)
                .delete(handlers::billing::delete_billing_record_handler),
        )
        .route(
            "/api/inventory",
            get(handlers::inventory::list_inventory_handler)
                .post(handlers::inventory::create_inventory_item_handler),
        )
        .route(
            "/api/inventory/low-stock",
            get(handlers::inventory::list_low_stock_handler),
        )
        .route(
            "/api/inventory/{item_id}",
            put(handlers::inventory::update_inventory_item_handler)
                .delete(handlers::inventory::delete_inventory_item_handler),
        )
        .route(
            "/api/prescriptions",
            get(handlers::clinical::list_prescriptions_handler)
                .post(handlers::clinical::create_prescription_handler),
        )
        .route(
            "/api/prescriptions/patient/{patient_id}",
            get(handlers::clinical::list_patient_prescriptions_handler),
        )
        .route(
            "/api/prescriptions/{prescription_id}",
            put(handlers::clinical::update_prescription_handler)
                .delete(handlers::clinical::delete_prescription_handler),
        )
        .route(
            "/api/lab-tests",
            get(handlers::clinical::list_lab_tests_handler)
                .post(handlers::clinical::create_lab_test_handler),
        )
        .route(
            "/api/lab-tests/{test_id}",
            put(handlers::clinical::update_lab_test_handler)
                .delete(handlers::clinical::delete_lab_test_handler),
        )
        .route(
            "/api/dashboard/stats",
            get(handlers::dashboard::dashboard_stats_handler),
        )
        .route(
            "/api/dashboard/patient/{patient_id}",
            get(handlers::dashboard::patient_overview_handler),
        )
        .route(
            "/api/dashboard/doctor/{doctor_id}",
            get(handlers::dashboard::doctor_overview_handler),
        )
        .route(
            "/api/dashboard/manager",
            get(handlers::dashboard::manager_overview_handler),
        )
        .route(
            "/api/appointment-form",
            get(handlers::appointment_form::current_appointment_form_handler)
                .post(handlers::appointment_form::open_appointment_form_handler)
                .delete(handlers::appointment_form::close_appointment_form_handler),
        )
        .route(
            "/api/appointment-form/fields",
            put(handlers::appointment_form::update_appointment_form_handler),
        )
        .route(
            "/api/appointment-form/submit",
            post(handlers::appointment_form::submit_appointment_form_handler),
        )
        .route_layer(from_fn(middleware::require_session_role));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(handlers::auth::login_handler))
        .route("/auth/logout", post(handlers::auth::logout_handler))
        .route("/auth/session", get(handlers::auth::session_handler))
        .route("/api/navigation", get(handlers::auth::navigation_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
