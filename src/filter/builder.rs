use super::types::{Comparison, FilterValue, FilterWhereOptions, Pagination, Predicate, PredicateSet};

/// Accumulates predicates for one request. Every `*_if` method skips unset
/// values (empty string, zero, nil id) so criteria can be passed straight in.
#[derive(Debug, Default)]
pub struct PredicateSetBuilder {
    default: Vec<Predicate>,
    any: Vec<Predicate>,
    pagination: Option<Pagination>,
    options: FilterWhereOptions,
}

impl PredicateSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional equality in the default bucket.
    pub fn eq(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.default.push(Predicate {
            column,
            comparison: Comparison::Eq,
            value: value.into(),
        });
        self
    }

    pub fn eq_if(self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        if value.is_unset() {
            return self;
        }
        self.eq(column, value)
    }

    /// Case-insensitive substring match (`ILIKE '%value%'`).
    pub fn contains_if(self, column: &'static str, value: Option<&str>) -> Self {
        self.substring(column, value, Comparison::ILike)
    }

    /// Case-sensitive substring match (`LIKE '%value%'`).
    pub fn contains_exact_case_if(self, column: &'static str, value: Option<&str>) -> Self {
        self.substring(column, value, Comparison::Like)
    }

    fn substring(mut self, column: &'static str, value: Option<&str>, comparison: Comparison) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.default.push(Predicate {
                    column,
                    comparison,
                    value: FilterValue::Text(format!("%{}%", escape_like(v))),
                });
                self
            }
            _ => self,
        }
    }

    /// Equality in the OR bucket.
    pub fn or_eq(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.any.push(Predicate {
            column,
            comparison: Comparison::Eq,
            value: value.into(),
        });
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn include_deleted(mut self) -> Self {
        self.options.include_deleted = true;
        self
    }

    pub fn build(self) -> PredicateSet {
        PredicateSet {
            default: self.default,
            any: self.any,
            pagination: self.pagination,
            options: self.options,
        }
    }
}

/// Escape LIKE metacharacters so user input only ever matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
