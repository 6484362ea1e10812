use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::ServiceError;
use super::guard::OwnershipGuard;
use super::fetch_page;
use crate::api::request::{OutletAddRequest, OutletUpdateRequest};
use crate::api::response::OutletResponse;
use crate::auth::Principal;
use crate::config::AppConfig;
use crate::criteria::OutletCriteria;
use crate::database::models::{Audit, Outlet};
use crate::database::Repositories;
use crate::filter::{PageEnvelope, PageRequest};

#[derive(Clone)]
pub struct OutletService {
    repos: Repositories,
    guard: OwnershipGuard,
    config: Arc<AppConfig>,
}

impl OutletService {
    pub fn new(repos: Repositories, guard: OwnershipGuard, config: Arc<AppConfig>) -> Self {
        Self { repos, guard, config }
    }

    pub async fn create(&self, principal: Principal, request: OutletAddRequest) -> Result<Uuid, ServiceError> {
        let merchant = self.guard.merchant(principal, request.merchant_id).await?;

        let outlet = Outlet {
            id: Uuid::nil(),
            merchant_id: merchant.id,
            name: request.name,
            location: request.location,
            phone_number: request.phone_number,
            audit: Audit::default(),
        };
        let id = self.repos.outlets.save(outlet).await?;
        info!("Created outlet {} under merchant {}", id, merchant.id);
        Ok(id)
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> Result<OutletResponse, ServiceError> {
        Ok(self.guard.outlet(principal, id).await?.into())
    }

    /// Moving an outlet is allowed only between merchants the principal owns.
    pub async fn update(&self, principal: Principal, request: OutletUpdateRequest) -> Result<Uuid, ServiceError> {
        let merchant = self.guard.merchant(principal, request.merchant_id).await?;
        let existing = self.guard.outlet(principal, request.id).await?;

        let outlet = Outlet {
            id: existing.id,
            merchant_id: merchant.id,
            name: request.name,
            location: request.location,
            phone_number: request.phone_number,
            audit: existing.audit,
        };
        Ok(self.repos.outlets.save(outlet).await?)
    }

    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), ServiceError> {
        let outlet = self.guard.outlet(principal, id).await?;
        self.repos.outlets.delete(&outlet).await?;
        info!("Deleted outlet {}", id);
        Ok(())
    }

    /// A `merchant_id` filter must name a merchant the principal owns.
    pub async fn fetch(
        &self,
        principal: Principal,
        criteria: &OutletCriteria,
        page: &PageRequest,
    ) -> Result<PageEnvelope<OutletResponse>, ServiceError> {
        if let Some(merchant_id) = criteria.merchant_id.filter(|id| !id.is_nil()) {
            self.guard.merchant(principal, merchant_id).await?;
        }
        fetch_page(self.repos.outlets.as_ref(), criteria, page, &self.config).await
    }
}
