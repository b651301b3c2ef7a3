use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hopespring_core::RecordId;
use hopespring_domain::Role;
use tracing::info;

use crate::dto::{DoctorListQuery, DoctorRequest, DoctorResponse, PatientRequest, PatientResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_patients_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PatientResponse>>> {
    let patients = state.record_service.list_patients().await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

pub async fn register_patient_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<PatientRequest>,
) -> ApiResult<(StatusCode, Json<PatientResponse>)> {
    let patient = state.record_service.register_patient(payload.into()).await?;
    info!(%role, patient_id = %patient.id, "patient registered");

    Ok((StatusCode::CREATED, Json(patient.into())))
}

pub async fn update_patient_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(patient_id): Path<i64>,
    Json(payload): Json<PatientRequest>,
) -> ApiResult<Json<PatientResponse>> {
    let patient_id = RecordId::new(patient_id)?;
    let patient = state
        .record_service
        .update_patient(patient_id, payload.into())
        .await?;
    info!(%role, %patient_id, "patient updated");

    Ok(Json(patient.into()))
}

pub async fn delete_patient_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(patient_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let patient_id = RecordId::new(patient_id)?;
    state.record_service.delete_patient(patient_id).await?;
    info!(%role, %patient_id, "patient deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_doctors_handler(
    State(state): State<AppState>,
    Query(query): Query<DoctorListQuery>,
) -> ApiResult<Json<Vec<DoctorResponse>>> {
    let doctors = state.record_service.list_doctors(query.active_only).await?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

pub async fn add_doctor_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<DoctorRequest>,
) -> ApiResult<(StatusCode, Json<DoctorResponse>)> {
    let doctor = state.record_service.add_doctor(payload.into()).await?;
    info!(%role, doctor_id = %doctor.id, "doctor added");

    Ok((StatusCode::CREATED, Json(doctor.into())))
}

pub async fn update_doctor_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(doctor_id): Path<i64>,
    Json(payload): Json<DoctorRequest>,
) -> ApiResult<Json<DoctorResponse>> {
    let doctor_id = RecordId::new(doctor_id)?;
    let doctor = state
        .record_service
        .update_doctor(doctor_id, payload.into())
        .await?;
    info!(%role, %doctor_id, "doctor updated");

    Ok(Json(doctor.into()))
}

/// Doctors are deactivated rather than removed so past records keep their author.
pub async fn deactivate_doctor_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(doctor_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let doctor_id = RecordId::new(doctor_id)?;
    state.record_service.deactivate_doctor(doctor_id).await?;
    info!(%role, %doctor_id, "doctor deactivated");

    Ok(StatusCode::NO_CONTENT)
}
