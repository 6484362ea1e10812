use std::sync::Arc;

use tracing::{debug, error};

use super::error::ServiceError;
use crate::api::request::LoginRequest;
use crate::api::response::TokenResponse;
use crate::auth::generate_jwt;
use crate::auth::password::verify_password;
use crate::config::AppConfig;
use crate::database::{DatabaseError, Repositories};
use crate::filter::PredicateSet;

const BAD_CREDENTIALS: &str = "email or password is incorrect";

#[derive(Clone)]
pub struct AuthService {
    repos: Repositories,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(repos: Repositories, config: Arc<AppConfig>) -> Self {
        Self { repos, config }
    }

    /// Exchange email + password for a signed access token. Unknown email and
    /// wrong password are indistinguishable.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ServiceError> {
        let set = PredicateSet::builder().eq("email", request.email.as_str()).build();
        let user = match self.repos.users.get_one(&set).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound(_)) => {
                debug!("Login for unknown email {}", request.email);
                return Err(ServiceError::bad_request(BAD_CREDENTIALS));
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(&request.password, &user.password) {
            debug!("Wrong password for user {}", user.id);
            return Err(ServiceError::bad_request(BAD_CREDENTIALS));
        }

        let access_token = generate_jwt(user.id, &self.config.security).map_err(|e| {
            error!("Token generation failed: {}", e);
            ServiceError::internal("internal server error")
        })?;
        Ok(TokenResponse { access_token })
    }
}
