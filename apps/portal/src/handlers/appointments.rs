use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hopespring_core::RecordId;
use hopespring_domain::{AppointmentStatus, Role};
use tracing::info;

use crate::dto::{AppointmentResponse, AppointmentStatusRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_appointments_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let appointments = state.record_service.list_appointments().await?;
    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

pub async fn update_appointment_status_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(appointment_id): Path<i64>,
    Json(payload): Json<AppointmentStatusRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment_id = RecordId::new(appointment_id)?;
    let status = payload.status.parse::<AppointmentStatus>()?;

    let appointment = state
        .record_service
        .change_appointment_status(appointment_id, status)
        .await?;
    info!(%role, %appointment_id, status = status.as_str(), "appointment status changed");

    Ok(Json(appointment.into()))
}

pub async fn delete_appointment_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(appointment_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let appointment_id = RecordId::new(appointment_id)?;
    state
        .record_service
        .delete_appointment(appointment_id)
        .await?;
    info!(%role, %appointment_id, "appointment deleted");

    Ok(StatusCode::NO_CONTENT)
}
