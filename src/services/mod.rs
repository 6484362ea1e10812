pub mod auth_service;
pub mod error;
pub mod guard;
pub mod merchant_service;
pub mod outlet_service;
pub mod product_service;
pub mod user_service;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

pub use auth_service::AuthService;
pub use error::ServiceError;
pub use guard::OwnershipGuard;
pub use merchant_service::MerchantService;
pub use outlet_service::OutletService;
pub use product_service::ProductService;
pub use user_service::UserService;

use crate::config::AppConfig;
use crate::criteria::Criteria;
use crate::database::{DatabaseError, Entity, Repositories, Repository};
use crate::filter::{PageEnvelope, PageRequest};

/// Every service, wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub merchants: MerchantService,
    pub outlets: OutletService,
    pub products: ProductService,
}

impl Services {
    pub fn new(repos: Repositories, config: Arc<AppConfig>) -> Self {
        let guard = OwnershipGuard::new(repos.clone());
        Self {
            auth: AuthService::new(repos.clone(), config.clone()),
            users: UserService::new(repos.clone(), guard.clone(), config.clone()),
            merchants: MerchantService::new(repos.clone(), guard.clone(), config.clone()),
            outlets: OutletService::new(repos.clone(), guard.clone(), config.clone()),
            products: ProductService::new(repos, guard, config),
        }
    }
}

/// Bound a store call by the request deadline. An elapsed deadline drops the
/// in-flight future and reports an internal error.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, DatabaseError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => {
            warn!("Store call exceeded deadline of {:?}", deadline);
            Err(ServiceError::internal("request timed out"))
        }
    }
}

/// Resolve paging, build the predicate set, run rows+count concurrently and
/// project the page.
pub async fn fetch_page<T, R, C>(
    repo: &dyn Repository<T>,
    criteria: &C,
    page: &PageRequest,
    config: &AppConfig,
) -> Result<PageEnvelope<R>, ServiceError>
where
    T: Entity,
    R: From<T>,
    C: Criteria,
{
    let pagination = page.resolve(T::SORTABLE, &config.filter)?;
    let set = criteria.build(pagination);
    let (rows, total) = with_deadline(config.database.query_timeout(), repo.fetch(&set)).await?;
    Ok(PageEnvelope::assemble(
        &pagination,
        rows.into_iter().map(R::from).collect(),
        total,
    ))
}
