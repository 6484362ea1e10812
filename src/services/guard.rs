use tracing::debug;
use uuid::Uuid;

use super::error::{lookup, ServiceError};
use crate::auth::Principal;
use crate::database::models::{Merchant, Outlet, Product, User};
use crate::database::Repositories;
use crate::filter::PredicateSet;

/// Resolves a resource only if its ownership chain ends at the principal.
/// Anything absent or owned by someone else is reported as NotFound.
#[derive(Clone)]
pub struct OwnershipGuard {
    repos: Repositories,
}

impl OwnershipGuard {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn user(&self, principal: Principal, id: Uuid) -> Result<User, ServiceError> {
        if id != principal.user_id {
            debug!("User {} is not principal {}", id, principal.user_id);
            return Err(ServiceError::not_found("user not found"));
        }
        self.repos
            .users
            .get_one(&PredicateSet::by_id(id))
            .await
            .map_err(|e| lookup(e, "user not found"))
    }

    pub async fn merchant(&self, principal: Principal, id: Uuid) -> Result<Merchant, ServiceError> {
        let set = PredicateSet::builder().eq("id", id).eq("user_id", principal.user_id).build();
        self.repos
            .merchants
            .get_one(&set)
            .await
            .map_err(|e| lookup(e, "merchant not found"))
    }

    pub async fn outlet(&self, principal: Principal, id: Uuid) -> Result<Outlet, ServiceError> {
        let outlet = self
            .repos
            .outlets
            .get_one(&PredicateSet::by_id(id))
            .await
            .map_err(|e| lookup(e, "outlet not found"))?;
        self.merchant(principal, outlet.merchant_id)
            .await
            .map_err(|e| e.hide_as("outlet not found"))?;
        Ok(outlet)
    }

    pub async fn product(&self, principal: Principal, id: Uuid) -> Result<Product, ServiceError> {
        let product = self
            .repos
            .products
            .get_one(&PredicateSet::by_id(id))
            .await
            .map_err(|e| lookup(e, "product not found"))?;
        self.outlet(principal, product.outlet_id)
            .await
            .map_err(|e| e.hide_as("product not found"))?;
        Ok(product)
    }
}
