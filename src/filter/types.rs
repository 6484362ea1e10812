use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bound query parameter. Values never reach the SQL text; they are always
/// sent as `$n` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Uuid(Uuid),
    Int(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl FilterValue {
    /// Empty strings, zero numbers and the nil UUID count as "no filter".
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::Uuid(id) => id.is_nil(),
            FilterValue::Int(n) => *n == 0,
            FilterValue::Float(f) => *f == 0.0,
            FilterValue::Timestamp(_) => false,
            FilterValue::Text(s) => s.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        FilterValue::Uuid(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    /// Case-sensitive substring match
    Like,
    /// Case-insensitive substring match
    ILike,
}

impl Comparison {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Like => "LIKE",
            Comparison::ILike => "ILIKE",
        }
    }
}

/// One `column <op> $n` fragment. Column names are compile-time constants
/// supplied by criteria, never user input.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub comparison: Comparison,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Validated page request: `page >= 1`, `limit >= 1`, sort field whitelisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub sort: SortSpec,
}

impl Pagination {
    /// Rows skipped before this page. `None` when it does not fit in an i64.
    pub fn checked_offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.limit)
    }

    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterWhereOptions {
    /// Also match tombstoned rows (`deleted_at IS NOT NULL`)
    pub include_deleted: bool,
}

/// Request-scoped filter: conjunctive `default` bucket, disjunctive `any`
/// bucket, optional pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    pub default: Vec<Predicate>,
    pub any: Vec<Predicate>,
    pub pagination: Option<Pagination>,
    pub options: FilterWhereOptions,
}

impl PredicateSet {
    pub fn builder() -> super::builder::PredicateSetBuilder {
        super::builder::PredicateSetBuilder::new()
    }

    /// Shorthand for the common point lookup `id = $1`.
    pub fn by_id(id: uuid::Uuid) -> Self {
        Self::builder().eq("id", id).build()
    }

    /// Copy of this set restricted to the default bucket, as used for counting.
    pub fn defaults_only(&self) -> Self {
        Self {
            default: self.default.clone(),
            any: vec![],
            pagination: None,
            options: self.options,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}
