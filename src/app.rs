use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::config::AppConfig;
use crate::database::Repositories;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::Services;

/// Shared, cheaply cloned handler state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub repos: Repositories,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repos: Repositories, config: Arc<AppConfig>) -> Self {
        Self {
            services: Services::new(repos.clone(), config.clone()),
            repos,
            config,
        }
    }
}

/// Full router without transport layers (CORS, tracing), which the binary adds.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::status::root))
        .route("/health", get(public::status::health))
        .route("/api/login", post(public::auth::login_post))
        .route("/api/users", post(public::users::register_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{merchants, outlets, products, users};

    Router::new()
        .route("/api/users", get(users::users_get).put(users::user_put))
        .route("/api/users/:id", get(users::user_get).delete(users::user_delete))
        .route(
            "/api/merchants",
            get(merchants::merchants_get)
                .post(merchants::merchant_post)
                .put(merchants::merchant_put),
        )
        .route(
            "/api/merchants/:id",
            get(merchants::merchant_get).delete(merchants::merchant_delete),
        )
        .route(
            "/api/outlets",
            get(outlets::outlets_get).post(outlets::outlet_post).put(outlets::outlet_put),
        )
        .route("/api/outlets/:id", get(outlets::outlet_get).delete(outlets::outlet_delete))
        .route(
            "/api/products",
            get(products::products_get)
                .post(products::product_post)
                .put(products::product_put),
        )
        .route("/api/products/image", post(products::product_image_post))
        .route(
            "/api/products/:id",
            get(products::product_get).delete(products::product_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
