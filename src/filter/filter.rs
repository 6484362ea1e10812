use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{PredicateSet, SqlResult};

/// SQL renderer for a single table and predicate set.
pub struct Filter<'a> {
    table_name: &'a str,
    set: &'a PredicateSet,
}

impl<'a> Filter<'a> {
    pub fn new(table_name: &'a str, set: &'a PredicateSet) -> Result<Self, FilterError> {
        Self::validate_table_name(table_name)?;
        Ok(Self { table_name, set })
    }

    /// `SELECT *` with both buckets, ORDER BY and LIMIT/OFFSET when paginated.
    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.set);
        let (order_clause, limit_clause) = match &self.set.pagination {
            Some(p) => (FilterOrder::generate(&p.sort), format!("LIMIT {} OFFSET {}", p.limit, p.offset())),
            None => (String::new(), String::new()),
        };

        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    /// First matching row only; pagination is ignored.
    pub fn to_first_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.set);
        SqlResult {
            query: format!("SELECT * FROM \"{}\" WHERE {} LIMIT 1", self.table_name, where_clause),
            params,
        }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate_defaults(self.set);
        SqlResult {
            query: format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_clause),
            params,
        }
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return Err(FilterError::InvalidTableName(name.to_string())),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidTableName(name.to_string()));
        }
        Ok(())
    }
}
