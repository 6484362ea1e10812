use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope: `{status: "success", message, data}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: &'static str,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_status(data: T, message: &'static str, status_code: StatusCode) -> Self {
        Self {
            data,
            message,
            status_code,
        }
    }

    /// 200 for reads and listings
    pub fn success(data: T) -> Self {
        Self::with_status(data, "success get data", StatusCode::OK)
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self::with_status(data, "success add data", StatusCode::CREATED)
    }

    pub fn updated(data: T) -> Self {
        Self::with_status(data, "success update data", StatusCode::OK)
    }
}

impl ApiResponse<()> {
    /// 200 with no data member
    pub fn deleted() -> Self {
        Self::with_status((), "success delete data", StatusCode::OK)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": "failed",
                        "message": "StatusInternalServerError",
                        "errors": "failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let mut envelope = json!({
            "status": "success",
            "message": self.message,
        });
        if data_value != Value::Null {
            envelope["data"] = data_value;
        }

        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
