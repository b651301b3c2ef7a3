use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hopespring_core::RecordId;
use hopespring_domain::Role;
use tracing::info;

use crate::dto::{LabTestRequest, LabTestResponse, PrescriptionRequest, PrescriptionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_prescriptions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PrescriptionResponse>>> {
    let prescriptions = state.record_service.list_prescriptions(None).await?;
    Ok(Json(prescriptions.into_iter().map(Into::into).collect()))
}

pub async fn list_patient_prescriptions_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> ApiResult<Json<Vec<PrescriptionResponse>>> {
    let prescriptions = state
        .record_service
        .list_prescriptions(Some(RecordId::new(patient_id)?))
        .await?;
    Ok(Json(prescriptions.into_iter().map(Into::into).collect()))
}

pub async fn create_prescription_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<PrescriptionRequest>,
) -> ApiResult<(StatusCode, Json<PrescriptionResponse>)> {
    let prescription = state
        .record_service
        .create_prescription(payload.try_into()?)
        .await?;
    info!(
        %role,
        prescription_id = %prescription.id,
        medications = prescription.medications.len(),
        "prescription created"
    );

    Ok((StatusCode::CREATED, Json(prescription.into())))
}

pub async fn update_prescription_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(prescription_id): Path<i64>,
    Json(payload): Json<PrescriptionRequest>,
) -> ApiResult<Json<PrescriptionResponse>> {
    let prescription_id = RecordId::new(prescription_id)?;
    let prescription = state
        .record_service
        .update_prescription(prescription_id, payload.try_into()?)
        .await?;
    info!(%role, %prescription_id, "prescription updated");

    Ok(Json(prescription.into()))
}

pub async fn delete_prescription_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(prescription_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let prescription_id = RecordId::new(prescription_id)?;
    state
        .record_service
        .delete_prescription(prescription_id)
        .await?;
    info!(%role, %prescription_id, "prescription deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_lab_tests_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LabTestResponse>>> {
    let tests = state.record_service.list_lab_tests().await?;
    Ok(Json(tests.into_iter().map(Into::into).collect()))
}

pub async fn create_lab_test_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<LabTestRequest>,
) -> ApiResult<(StatusCode, Json<LabTestResponse>)> {
    let test = state
        .record_service
        .create_lab_test(payload.try_into()?)
        .await?;
    info!(%role, test_id = %test.id, test_name = %test.test_name, "lab test ordered");

    Ok((StatusCode::CREATED, Json(test.into())))
}

pub async fn update_lab_test_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(test_id): Path<i64>,
    Json(payload): Json<LabTestRequest>,
) -> ApiResult<Json<LabTestResponse>> {
    let test_id = RecordId::new(test_id)?;
    let test = state
        .record_service
        .update_lab_test(test_id, payload.try_into()?)
        .await?;
    info!(%role, %test_id, status = %test.status, "lab test updated");

    Ok(Json(test.into()))
}

pub async fn delete_lab_test_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(test_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let test_id = RecordId::new(test_id)?;
    state.record_service.delete_lab_test(test_id).await?;
    info!(%role, %test_id, "lab test deleted");

    Ok(StatusCode::NO_CONTENT)
}
