pub mod request;
pub mod response;
pub mod validate;

pub use validate::{validate_request, FieldError};
