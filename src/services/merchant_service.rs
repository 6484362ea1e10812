use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::{lookup, ServiceError};
use super::guard::OwnershipGuard;
use super::fetch_page;
use crate::api::request::{MerchantAddRequest, MerchantUpdateRequest};
use crate::api::response::MerchantResponse;
use crate::auth::Principal;
use crate::config::AppConfig;
use crate::criteria::MerchantCriteria;
use crate::database::models::{Audit, Merchant};
use crate::database::Repositories;
use crate::filter::{PageEnvelope, PageRequest, PredicateSet};

#[derive(Clone)]
pub struct MerchantService {
    repos: Repositories,
    guard: OwnershipGuard,
    config: Arc<AppConfig>,
}

impl MerchantService {
    pub fn new(repos: Repositories, guard: OwnershipGuard, config: Arc<AppConfig>) -> Self {
        Self { repos, guard, config }
    }

    /// New merchant owned by the principal, who must still exist.
    pub async fn create(&self, principal: Principal, request: MerchantAddRequest) -> Result<Uuid, ServiceError> {
        self.repos
            .users
            .get_one(&PredicateSet::by_id(principal.user_id))
            .await
            .map_err(|e| lookup(e, "user not found"))?;

        let merchant = Merchant {
            id: Uuid::nil(),
            user_id: principal.user_id,
            name: request.name,
            institution_name: request.institution_name,
            phone_number: request.phone_number,
            audit: Audit::default(),
        };
        let id = self.repos.merchants.save(merchant).await?;
        info!("Created merchant {} for user {}", id, principal.user_id);
        Ok(id)
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> Result<MerchantResponse, ServiceError> {
        Ok(self.guard.merchant(principal, id).await?.into())
    }

    pub async fn update(&self, principal: Principal, request: MerchantUpdateRequest) -> Result<Uuid, ServiceError> {
        let existing = self.guard.merchant(principal, request.id).await?;
        let merchant = Merchant {
            id: existing.id,
            user_id: existing.user_id,
            name: request.name,
            institution_name: request.institution_name,
            phone_number: request.phone_number,
            audit: existing.audit,
        };
        Ok(self.repos.merchants.save(merchant).await?)
    }

    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), ServiceError> {
        let merchant = self.guard.merchant(principal, id).await?;
        self.repos.merchants.delete(&merchant).await?;
        info!("Deleted merchant {}", id);
        Ok(())
    }

    /// Lists only the principal's own merchants.
    pub async fn fetch(
        &self,
        principal: Principal,
        criteria: MerchantCriteria,
        page: &PageRequest,
    ) -> Result<PageEnvelope<MerchantResponse>, ServiceError> {
        let criteria = MerchantCriteria {
            user_id: principal.user_id,
            ..criteria
        };
        fetch_page(self.repos.merchants.as_ref(), &criteria, page, &self.config).await
    }
}
