use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::ServiceError;
use super::guard::OwnershipGuard;
use super::fetch_page;
use crate::api::request::{UserAddRequest, UserUpdateRequest};
use crate::api::response::UserResponse;
use crate::auth::password::hash_password;
use crate::auth::Principal;
use crate::config::AppConfig;
use crate::criteria::UserCriteria;
use crate::database::models::{Audit, User};
use crate::database::{DatabaseError, Repositories};
use crate::filter::{PageEnvelope, PageRequest, PredicateSet};

#[derive(Clone)]
pub struct UserService {
    repos: Repositories,
    guard: OwnershipGuard,
    config: Arc<AppConfig>,
}

impl UserService {
    pub fn new(repos: Repositories, guard: OwnershipGuard, config: Arc<AppConfig>) -> Self {
        Self { repos, guard, config }
    }

    /// Create an account. The email must not belong to any live user.
    pub async fn register(&self, request: UserAddRequest) -> Result<Uuid, ServiceError> {
        self.ensure_email_free(&request.email, None).await?;

        let user = User {
            id: Uuid::nil(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: self.hash(&request.password)?,
            phone_number: request.phone_number,
            audit: Audit::default(),
        };
        let id = self.repos.users.save(user).await?;
        info!("Registered user {}", id);
        Ok(id)
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> Result<UserResponse, ServiceError> {
        Ok(self.guard.user(principal, id).await?.into())
    }

    pub async fn update(&self, principal: Principal, request: UserUpdateRequest) -> Result<Uuid, ServiceError> {
        let existing = self.guard.user(principal, request.id).await?;
        self.ensure_email_free(&request.email, Some(existing.id)).await?;

        let user = User {
            id: existing.id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: self.hash(&request.password)?,
            phone_number: request.phone_number,
            audit: existing.audit,
        };
        Ok(self.repos.users.save(user).await?)
    }

    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), ServiceError> {
        let user = self.guard.user(principal, id).await?;
        self.repos.users.delete(&user).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn fetch(
        &self,
        criteria: &UserCriteria,
        page: &PageRequest,
    ) -> Result<PageEnvelope<UserResponse>, ServiceError> {
        fetch_page(self.repos.users.as_ref(), criteria, page, &self.config).await
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> Result<(), ServiceError> {
        let set = PredicateSet::builder().eq("email", email).build();
        match self.repos.users.get_one(&set).await {
            Ok(found) if Some(found.id) == owner => Ok(()),
            Ok(_) => {
                debug!("Email {} already registered", email);
                Err(ServiceError::bad_request("email already exist"))
            }
            Err(DatabaseError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn hash(&self, password: &str) -> Result<String, ServiceError> {
        hash_password(password, self.config.security.bcrypt_cost).map_err(|e| {
            error!("Password hashing failed: {}", e);
            ServiceError::internal("internal server error")
        })
    }
}
