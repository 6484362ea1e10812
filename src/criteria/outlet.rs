use serde::Deserialize;
use uuid::Uuid;

use super::Criteria;
use crate::filter::PredicateSetBuilder;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutletCriteria {
    pub name: Option<String>,
    pub location: Option<String>,
    pub merchant_id: Option<Uuid>,
}

impl Criteria for OutletCriteria {
    fn apply(&self, builder: PredicateSetBuilder) -> PredicateSetBuilder {
        builder
            .contains_if("name", self.name.as_deref())
            .contains_if("location", self.location.as_deref())
            .eq_if("merchant_id", self.merchant_id)
    }
}
