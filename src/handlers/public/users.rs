// handlers/public/users.rs - POST /api/users (registration)

use axum::extract::State;
use serde_json::{json, Value};

use crate::api::request::UserAddRequest;
use crate::app::AppState;
use crate::handlers::extract::ValidatedJson;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserAddRequest>,
) -> ApiResult<Value> {
    let id = state.services.users.register(request).await?;
    Ok(ApiResponse::created(json!({ "user_id": id })))
}
