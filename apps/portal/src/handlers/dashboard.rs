//! Dashboard feeds, computed against the local calendar day.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Local;
use hopespring_core::RecordId;

use crate::dto::{
    DashboardStatsResponse, DoctorOverviewResponse, ManagerOverviewResponse,
    PatientOverviewResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardStatsResponse>> {
    let today = Local::now().date_naive();
    let stats = state.record_service.dashboard_stats(today).await?;
    Ok(Json(stats.into()))
}

pub async fn patient_overview_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> ApiResult<Json<PatientOverviewResponse>> {
    let today = Local::now().date_naive();
    let overview = state
        .record_service
        .patient_overview(RecordId::new(patient_id)?, today)
        .await?;
    Ok(Json(overview.into()))
}

pub async fn doctor_overview_handler(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
) -> ApiResult<Json<DoctorOverviewResponse>> {
    let today = Local::now().date_naive();
    let overview = state
        .record_service
        .doctor_overview(RecordId::new(doctor_id)?, today)
        .await?;
    Ok(Json(overview.into()))
}

pub async fn manager_overview_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ManagerOverviewResponse>> {
    let overview = state.record_service.manager_overview().await?;
    Ok(Json(overview.into()))
}
