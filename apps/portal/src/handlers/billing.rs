use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hopespring_core::RecordId;
use hopespring_domain::Role;
use tracing::info;

use crate::dto::{BillingRecordRequest, BillingRecordResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_billing_records_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BillingRecordResponse>>> {
    let records = state.record_service.list_billing_records().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

pub async fn create_billing_record_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<BillingRecordRequest>,
) -> ApiResult<(StatusCode, Json<BillingRecordResponse>)> {
    let record = state
        .record_service
        .create_billing_record(payload.try_into()?)
        .await?;
    info!(%role, billing_id = %record.id, patient_id = %record.patient_id, "bill created");

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn update_billing_record_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(billing_id): Path<i64>,
    Json(payload): Json<BillingRecordRequest>,
) -> ApiResult<Json<BillingRecordResponse>> {
    let billing_id = RecordId::new(billing_id)?;
    let record = state
        .record_service
        .update_billing_record(billing_id, payload.try_into()?)
        .await?;
    info!(%role, %billing_id, status = %record.payment_status, "bill updated");

    Ok(Json(record.into()))
}

pub async fn delete_billing_record_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(billing_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let billing_id = RecordId::new(billing_id)?;
    state.record_service.delete_billing_record(billing_id).await?;
    info!(%role, %billing_id, "bill deleted");

    Ok(StatusCode::NO_CONTENT)
}
