// handlers/protected/merchants.rs - /api/merchants and /api/merchants/:id

use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::api::request::{MerchantAddRequest, MerchantUpdateRequest};
use crate::api::response::MerchantResponse;
use crate::app::AppState;
use crate::auth::Principal;
use crate::criteria::MerchantCriteria;
use crate::filter::{PageEnvelope, PageRequest};
use crate::handlers::extract::{parse_id, ApiQuery, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};

pub async fn merchant_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<MerchantAddRequest>,
) -> ApiResult<Value> {
    let id = state.services.merchants.create(principal, request).await?;
    Ok(ApiResponse::created(json!({ "merchant_id": id })))
}

/// GET /api/merchants?name=&institution_name=&page=&limit=&sort=
pub async fn merchants_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(criteria): ApiQuery<MerchantCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<PageEnvelope<MerchantResponse>> {
    let page = state.services.merchants.fetch(principal, criteria, &page).await?;
    Ok(ApiResponse::success(page))
}

pub async fn merchant_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<MerchantResponse> {
    let merchant = state.services.merchants.get(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::success(merchant))
}

pub async fn merchant_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<MerchantUpdateRequest>,
) -> ApiResult<Value> {
    let id = state.services.merchants.update(principal, request).await?;
    Ok(ApiResponse::updated(json!({ "merchant_id": id })))
}

pub async fn merchant_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.merchants.delete(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::deleted())
}
