use super::types::{FilterValue, Predicate, PredicateSet};

/// Renders a `PredicateSet` as a parameterized WHERE body:
/// `deleted_at IS NULL AND ((d1 AND d2) OR (o1 OR o2))`.
pub struct FilterWhere {
    param_values: Vec<FilterValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Full WHERE body for row fetches (default and OR buckets).
    pub fn generate(set: &PredicateSet) -> (String, Vec<FilterValue>) {
        let mut filter_where = Self::new(0);
        filter_where.build(set, true)
    }

    /// WHERE body for counting; the OR bucket and pagination are ignored.
    pub fn generate_defaults(set: &PredicateSet) -> (String, Vec<FilterValue>) {
        let mut filter_where = Self::new(0);
        filter_where.build(set, false)
    }

    fn build(&mut self, set: &PredicateSet, include_or: bool) -> (String, Vec<FilterValue>) {
        let mut sql_conditions = vec![];
        if !set.options.include_deleted {
            sql_conditions.push("\"deleted_at\" IS NULL".to_string());
        }

        let defaults = self.join(&set.default, " AND ");
        let any = if include_or { self.join(&set.any, " OR ") } else { None };

        match (defaults, any) {
            (Some(d), Some(o)) => sql_conditions.push(format!("(({}) OR ({}))", d, o)),
            (Some(d), None) => sql_conditions.push(format!("({})", d)),
            (None, Some(o)) => sql_conditions.push(format!("({})", o)),
            (None, None) => {}
        }

        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, std::mem::take(&mut self.param_values))
    }

    fn join(&mut self, predicates: &[Predicate], joiner: &str) -> Option<String> {
        if predicates.is_empty() {
            return None;
        }
        let parts: Vec<String> = predicates.iter().map(|p| self.build_sql_condition(p)).collect();
        Some(parts.join(joiner))
    }

    fn build_sql_condition(&mut self, predicate: &Predicate) -> String {
        let quoted_column = format!("\"{}\"", predicate.column);
        if matches!(predicate.value, FilterValue::Null) {
            return format!("{} IS NULL", quoted_column);
        }
        let placeholder = self.param(predicate.value.clone());
        format!("{} {} {}", quoted_column, predicate.comparison.to_sql(), placeholder)
    }

    fn param(&mut self, value: FilterValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn empty_set_only_hides_tombstones() {
        let (sql, params) = FilterWhere::generate(&PredicateSet::default());
        assert_eq!(sql, "\"deleted_at\" IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn include_deleted_drops_tombstone_guard() {
        let set = PredicateSet::builder().include_deleted().build();
        let (sql, _) = FilterWhere::generate(&set);
        assert_eq!(sql, "1=1");
    }

    #[test]
    fn defaults_are_conjunctive_and_bound() {
        let id = Uuid::new_v4();
        let set = PredicateSet::builder().eq("id", id).contains_if("name", Some("shop")).build();
        let (sql, params) = FilterWhere::generate(&set);
        assert_eq!(sql, "\"deleted_at\" IS NULL AND (\"id\" = $1 AND \"name\" ILIKE $2)");
        assert_eq!(params, vec![FilterValue::Uuid(id), FilterValue::Text("%shop%".into())]);
    }

    #[test]
    fn or_bucket_is_disjunctive_and_ignored_for_count() {
        let set = PredicateSet::builder()
            .eq("user_id", Uuid::nil())
            .or_eq("email", "a@x.com")
            .or_eq("email", "b@x.com")
            .build();

        let (sql, params) = FilterWhere::generate(&set);
        assert_eq!(
            sql,
            "\"deleted_at\" IS NULL AND ((\"user_id\" = $1) OR (\"email\" = $2 OR \"email\" = $3))"
        );
        assert_eq!(params.len(), 3);

        let (count_sql, count_params) = FilterWhere::generate_defaults(&set);
        assert_eq!(count_sql, "\"deleted_at\" IS NULL AND (\"user_id\" = $1)");
        assert_eq!(count_params.len(), 1);
    }
}
