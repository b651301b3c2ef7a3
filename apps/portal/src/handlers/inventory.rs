use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hopespring_core::RecordId;
use hopespring_domain::Role;
use tracing::info;

use crate::dto::{InventoryItemRequest, InventoryItemResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_inventory_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InventoryItemResponse>>> {
    let items = state.record_service.list_inventory().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn list_low_stock_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InventoryItemResponse>>> {
    let items = state.record_service.list_low_stock().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn create_inventory_item_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Json(payload): Json<InventoryItemRequest>,
) -> ApiResult<(StatusCode, Json<InventoryItemResponse>)> {
    let item = state
        .record_service
        .create_inventory_item(payload.into())
        .await?;
    info!(%role, item_id = %item.id, "inventory item created");

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_inventory_item_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(item_id): Path<i64>,
    Json(payload): Json<InventoryItemRequest>,
) -> ApiResult<Json<InventoryItemResponse>> {
    let item_id = RecordId::new(item_id)?;
    let item = state
        .record_service
        .update_inventory_item(item_id, payload.into())
        .await?;
    info!(%role, %item_id, quantity = item.quantity, "inventory item updated");

    Ok(Json(item.into()))
}

pub async fn delete_inventory_item_handler(
    State(state): State<AppState>,
    Extension(role): Extension<Role>,
    Path(item_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let item_id = RecordId::new(item_id)?;
    state.record_service.delete_inventory_item(item_id).await?;
    info!(%role, %item_id, "inventory item deleted");

    Ok(StatusCode::NO_CONTENT)
}
