// handlers/protected/users.rs - /api/users and /api/users/:id

use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::api::request::UserUpdateRequest;
use crate::api::response::UserResponse;
use crate::app::AppState;
use crate::auth::Principal;
use crate::criteria::UserCriteria;
use crate::filter::{PageEnvelope, PageRequest};
use crate::handlers::extract::{parse_id, ApiQuery, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/users?email=&phone_number=&page=&limit=&sort=
pub async fn users_get(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<UserCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<PageEnvelope<UserResponse>> {
    let page = state.services.users.fetch(&criteria, &page).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/users/:id - only the caller's own account resolves
pub async fn user_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let user = state.services.users.get(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::success(user))
}

pub async fn user_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<UserUpdateRequest>,
) -> ApiResult<Value> {
    let id = state.services.users.update(principal, request).await?;
    Ok(ApiResponse::updated(json!({ "user_id": id })))
}

pub async fn user_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.users.delete(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::deleted())
}
