use serde::Deserialize;
use uuid::Uuid;

use super::Criteria;
use crate::filter::PredicateSetBuilder;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MerchantCriteria {
    pub name: Option<String>,
    pub institution_name: Option<String>,
    /// Owner scope, filled from the authenticated principal
    #[serde(skip)]
    pub user_id: Uuid,
}

impl Criteria for MerchantCriteria {
    fn apply(&self, builder: PredicateSetBuilder) -> PredicateSetBuilder {
        builder
            .eq("user_id", self.user_id)
            .contains_if("name", self.name.as_deref())
            .contains_if("institution_name", self.institution_name.as_deref())
    }
}
