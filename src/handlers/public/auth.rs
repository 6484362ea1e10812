// handlers/public/auth.rs - POST /api/login

use axum::extract::State;

use crate::api::request::LoginRequest;
use crate::api::response::TokenResponse;
use crate::app::AppState;
use crate::handlers::extract::ValidatedJson;
use crate::middleware::{ApiResponse, ApiResult};

/**
 * POST /api/login - exchange credentials for an access token
 *
 * Input: `{"email": "...", "password": "..."}`
 * Output: `{"status": "success", "message": "success get data", "data": {"access_token": "..."}}`
 */
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let token = state.services.auth.login(request).await?;
    Ok(ApiResponse::success(token))
}
