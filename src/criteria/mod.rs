//! Per-resource list filters parsed from the query string and turned into a
//! `PredicateSet`. Every set filter adds one conjunctive predicate.

pub mod merchant;
pub mod outlet;
pub mod product;
pub mod user;

pub use merchant::MerchantCriteria;
pub use outlet::OutletCriteria;
pub use product::ProductCriteria;
pub use user::UserCriteria;

use crate::filter::{Pagination, PredicateSet, PredicateSetBuilder};

pub trait Criteria {
    /// Add this resource's filters to the default bucket.
    fn apply(&self, builder: PredicateSetBuilder) -> PredicateSetBuilder;

    fn build(&self, pagination: Pagination) -> PredicateSet {
        self.apply(PredicateSet::builder()).paginate(pagination).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Comparison, FilterValue, SortDirection, SortSpec};
    use uuid::Uuid;

    fn page() -> Pagination {
        Pagination {
            page: 1,
            limit: 10,
            sort: SortSpec { field: "created_at", direction: SortDirection::Asc },
        }
    }

    #[test]
    fn empty_criteria_only_paginates() {
        let set = ProductCriteria::default().build(page());
        assert!(set.default.is_empty());
        assert!(set.any.is_empty());
        assert_eq!(set.pagination, Some(page()));
    }

    #[test]
    fn every_set_filter_is_kept() {
        let outlet_id = Uuid::new_v4();
        let criteria = ProductCriteria {
            name: Some("tea".into()),
            stock: Some(5),
            price: Some(12.5),
            outlet_id: Some(outlet_id),
        };
        let set = criteria.build(page());
        let columns: Vec<&str> = set.default.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec!["name", "stock", "price", "outlet_id"]);
        assert_eq!(set.default[0].comparison, Comparison::ILike);
        assert_eq!(set.default[0].value, FilterValue::Text("%tea%".into()));
        assert_eq!(set.default[3].value, FilterValue::Uuid(outlet_id));
    }

    #[test]
    fn zero_numbers_are_not_filters() {
        let criteria = ProductCriteria {
            stock: Some(0),
            price: Some(0.0),
            ..Default::default()
        };
        assert!(criteria.build(page()).default.is_empty());
    }

    #[test]
    fn merchant_listing_is_always_owner_scoped() {
        let owner = Uuid::new_v4();
        let criteria = MerchantCriteria {
            name: Some("acme".into()),
            institution_name: None,
            user_id: owner,
        };
        let set = criteria.build(page());
        assert_eq!(set.default[0].column, "user_id");
        assert_eq!(set.default[0].value, FilterValue::Uuid(owner));
        assert_eq!(set.default[1].column, "name");
    }

    #[test]
    fn user_phone_match_is_case_sensitive() {
        let criteria = UserCriteria {
            email: Some("Example.COM".into()),
            phone_number: Some("0812".into()),
        };
        let set = criteria.build(page());
        assert_eq!(set.default[0].comparison, Comparison::ILike);
        assert_eq!(set.default[1].comparison, Comparison::Like);
    }

    #[test]
    fn outlet_filters_escape_wildcards() {
        let criteria = OutletCriteria {
            name: None,
            location: Some("100%_real".into()),
            merchant_id: None,
        };
        let set = criteria.build(page());
        assert_eq!(set.default[0].value, FilterValue::Text("%100\\%\\_real%".into()));
    }
}
