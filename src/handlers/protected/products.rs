// handlers/protected/products.rs - /api/products, /api/products/:id, /api/products/image

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::request::{ProductAddRequest, ProductUpdateRequest};
use crate::api::response::ProductResponse;
use crate::app::AppState;
use crate::auth::Principal;
use crate::criteria::ProductCriteria;
use crate::error::ApiError;
use crate::filter::{PageEnvelope, PageRequest};
use crate::handlers::extract::{parse_id, ApiQuery, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::product_service::ImageUpload;

pub async fn product_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<ProductAddRequest>,
) -> ApiResult<Value> {
    let id = state.services.products.create(principal, request).await?;
    Ok(ApiResponse::created(json!({ "product_id": id })))
}

/// GET /api/products?name=&stock=&price=&outlet_id=&page=&limit=&sort=
pub async fn products_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(criteria): ApiQuery<ProductCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<PageEnvelope<ProductResponse>> {
    let page = state.services.products.fetch(principal, &criteria, &page).await?;
    Ok(ApiResponse::success(page))
}

pub async fn product_get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    let product = state.services.products.get(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::success(product))
}

pub async fn product_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<ProductUpdateRequest>,
) -> ApiResult<Value> {
    let id = state.services.products.update(principal, request).await?;
    Ok(ApiResponse::updated(json!({ "product_id": id })))
}

pub async fn product_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.products.delete(principal, parse_id(&id)?).await?;
    Ok(ApiResponse::deleted())
}

/// POST /api/products/image - multipart upload
///
/// Fields: `product_id` (text) and one or more `image` files whose content
/// type is in the `image` family (`image/png`, `image/jpeg`, ...).
pub async fn product_image_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    mut multipart: Multipart,
) -> ApiResult<Value> {
    let mut product_id: Option<Uuid> = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("product_id") => {
                let text = field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
                product_id = Some(parse_id(&text)?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
                uploads.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let product_id = product_id.ok_or_else(|| ApiError::bad_request("product id not found"))?;
    let stored = state.services.products.attach_images(principal, product_id, uploads).await?;

    Ok(ApiResponse::with_status(
        json!({ "product_id": product_id, "images": stored }),
        "success upload image",
        StatusCode::OK,
    ))
}
