use serde::Deserialize;
use uuid::Uuid;

use super::Criteria;
use crate::filter::PredicateSetBuilder;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCriteria {
    pub name: Option<String>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
    pub outlet_id: Option<Uuid>,
}

impl Criteria for ProductCriteria {
    fn apply(&self, builder: PredicateSetBuilder) -> PredicateSetBuilder {
        builder
            .contains_if("name", self.name.as_deref())
            .eq_if("stock", self.stock)
            .eq_if("price", self.price)
            .eq_if("outlet_id", self.outlet_id)
    }
}
