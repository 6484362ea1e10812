//! Request bodies with validation rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn required_id(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        let mut err = ValidationError::new("required");
        err.add_param("value".into(), id);
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserAddRequest {
    #[validate(length(min = 3, max = 50))]
    pub first_name: String,
    #[validate(length(min = 3, max = 50))]
    pub last_name: String,
    #[validate(email, length(min = 3, max = 50))]
    pub email: String,
    #[validate(length(min = 8, max = 50))]
    pub password: String,
    #[validate(length(min = 3, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(custom(function = "required_id"))]
    pub id: Uuid,
    #[validate(length(min = 3, max = 50))]
    pub first_name: String,
    #[validate(length(min = 3, max = 50))]
    pub last_name: String,
    #[validate(email, length(min = 3, max = 50))]
    pub email: String,
    #[validate(length(min = 8, max = 50))]
    pub password: String,
    #[validate(length(min = 3, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MerchantAddRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub institution_name: String,
    #[validate(length(min = 1, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MerchantUpdateRequest {
    #[validate(custom(function = "required_id"))]
    pub id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub institution_name: String,
    #[validate(length(min = 1, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutletAddRequest {
    #[validate(custom(function = "required_id"))]
    pub merchant_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutletUpdateRequest {
    #[validate(custom(function = "required_id"))]
    pub id: Uuid,
    #[validate(custom(function = "required_id"))]
    pub merchant_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1, max = 13))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductAddRequest {
    #[validate(custom(function = "required_id"))]
    pub outlet_id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub stock: i64,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdateRequest {
    #[validate(custom(function = "required_id"))]
    pub id: Uuid,
    #[validate(custom(function = "required_id"))]
    pub outlet_id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub stock: i64,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
}
