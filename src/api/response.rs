//! Outbound projections. Password, `modified_at` and `deleted_at` never leave
//! the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Merchant, Outlet, Product, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            created_at: user.audit.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub institution_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<Merchant> for MerchantResponse {
    fn from(merchant: Merchant) -> Self {
        Self {
            id: merchant.id,
            user_id: merchant.user_id,
            name: merchant.name,
            institution_name: merchant.institution_name,
            phone_number: merchant.phone_number,
            created_at: merchant.audit.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletResponse {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    pub location: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<Outlet> for OutletResponse {
    fn from(outlet: Outlet) -> Self {
        Self {
            id: outlet.id,
            merchant_id: outlet.merchant_id,
            name: outlet.name,
            location: outlet.location,
            phone_number: outlet.phone_number,
            created_at: outlet.audit.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub outlet_id: Uuid,
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            outlet_id: product.outlet_id,
            name: product.name,
            description: product.description,
            stock: product.stock,
            price: product.price,
            image: product.image,
            created_at: product.audit.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
