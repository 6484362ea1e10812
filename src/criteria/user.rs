use serde::Deserialize;

use super::Criteria;
use crate::filter::PredicateSetBuilder;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserCriteria {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl Criteria for UserCriteria {
    fn apply(&self, builder: PredicateSetBuilder) -> PredicateSetBuilder {
        builder
            .contains_if("email", self.email.as_deref())
            .contains_exact_case_if("phone_number", self.phone_number.as_deref())
    }
}
