use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub failed_field: String,
    pub tag: String,
    pub value: Value,
}

/// Run the derived rules and flatten failures into a stable, field-sorted list.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), Vec<FieldError>> {
    let errors = match request.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut failures: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                failed_field: field.to_string(),
                tag: e.code.to_string(),
                value: e.params.get("value").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();
    failures.sort_by(|a, b| a.failed_field.cmp(&b.failed_field).then_with(|| a.tag.cmp(&b.tag)));
    Err(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{MerchantAddRequest, ProductAddRequest, UserAddRequest};
    use uuid::Uuid;

    #[test]
    fn valid_request_passes() {
        let request = MerchantAddRequest {
            name: "Acme".into(),
            institution_name: "Acme Holdings".into(),
            phone_number: "0812345".into(),
        };
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn reports_each_failed_field() {
        let request = UserAddRequest {
            first_name: "Al".into(),
            last_name: "Smith".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            phone_number: "0812".into(),
        };
        let failures = validate_request(&request).unwrap_err();
        let fields: Vec<&str> = failures.iter().map(|f| f.failed_field.as_str()).collect();
        assert_eq!(fields, vec!["email", "first_name", "password"]);
        assert_eq!(failures[0].tag, "email");
        assert_eq!(failures[1].tag, "length");
    }

    #[test]
    fn nil_parent_id_is_required() {
        let request = ProductAddRequest {
            outlet_id: Uuid::nil(),
            name: "Tea".into(),
            description: "Jasmine".into(),
            stock: 4,
            price: 12.5,
        };
        let failures = validate_request(&request).unwrap_err();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].failed_field, "outlet_id");
        assert_eq!(failures[0].tag, "required");
    }
}
