// handlers/protected/outlets.rs - /api/outlets and /api/outlets/:id

use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::api::request::{OutletAddRequest, OutletUpdateRequest};
use crate::api::response::OutletResponse;
use crate::app::AppState;
use crate::auth::Principal;
use crate::criteria::OutletCriteria;
use crate::filter::{PageEnvelope, PageRequest};
use crate::handlers::extract::{parse_id, ApiQuery, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};

pub async fn outlet_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<OutletAddRequest>,
) -> ApiResult<Value> {
    let id = state.services.outlets.create(principal, request).await?;
    Ok(ApiResponse::created(json!({ "outlet_id": id })))
}

/// GET /api/outlets?name=&location=&merchant_id=&page=&limit=&sort=
pub async fn outlets_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(criteria): ApiQuery<OutletCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<PageEnvelope<OutletResponse>> {
    let page = state.services.outlets.fetch(principal, &criteria, &page).await?;
    Ok(ApiResponse::success(page))
}

pub async fn outlet_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<OutletResponse> {
    let outlet = state.services.outlets.get(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::success(outlet))
}

pub async fn outlet_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<OutletUpdateRequest>,
) -> ApiResult<Value> {
    let id = state.services.outlets.update(principal, request).await?;
    Ok(ApiResponse::updated(json!({ "outlet_id": id })))
}

pub async fn outlet_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.outlets.delete(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::deleted())
}
