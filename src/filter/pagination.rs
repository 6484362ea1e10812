use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::types::Pagination;
use crate::config::FilterConfig;

/// Raw `page`/`limit`/`sort` query parameters before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64, sort: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            sort: Some(sort.into()),
        }
    }

    /// Apply defaults, validate ranges and the sort string, cap the limit.
    pub fn resolve(&self, sortable: &[&'static str], config: &FilterConfig) -> Result<Pagination, FilterError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(FilterError::InvalidPage);
        }

        let mut limit = self.limit.unwrap_or(config.default_limit);
        if limit < 1 {
            return Err(FilterError::InvalidLimit);
        }
        if let Some(max) = config.max_limit {
            if limit > max {
                if config.debug_logging {
                    tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max);
                }
                limit = max;
            }
        }

        let sort = match self.sort.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => config.default_sort.as_str(),
        };
        let sort = FilterOrder::parse(sort, sortable)?;

        let pagination = Pagination { page, limit, sort };
        if pagination.checked_offset().is_none() {
            return Err(FilterError::InvalidPage);
        }
        Ok(pagination)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub total_record: i64,
    pub total_page: i64,
    pub page: i64,
    pub order_by: String,
    pub sort_by: String,
    pub size: i64,
}

/// A page of projections plus the paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> PageEnvelope<T> {
    pub fn assemble(pagination: &Pagination, data: Vec<T>, total_record: i64) -> Self {
        Self {
            data,
            paging: Paging {
                total_record,
                total_page: total_pages(total_record, pagination.limit),
                page: pagination.page,
                order_by: pagination.sort.field.to_string(),
                sort_by: pagination.sort.direction.as_str().to_string(),
                size: pagination.limit,
            },
        }
    }
}

/// `ceil(total / limit)`, except a single record always reports one page.
pub fn total_pages(total_record: i64, limit: i64) -> i64 {
    if total_record == 1 {
        return 1;
    }
    if limit <= 0 || total_record <= 0 {
        return 0;
    }
    (total_record + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::filter::types::SortDirection;

    const FIELDS: &[&str] = &["created_at", "name"];

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn single_record_is_one_page() {
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(1, 1), 1);
    }

    #[test]
    fn defaults_fill_missing_params() {
        let config = AppConfig::development().filter;
        let p = PageRequest::default().resolve(FIELDS, &config).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, config.default_limit);
        assert_eq!(p.sort.field, "created_at");
        assert_eq!(p.sort.direction, SortDirection::Asc);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn rejects_non_positive_page_and_limit() {
        let config = AppConfig::development().filter;
        let bad_page = PageRequest { page: Some(0), ..Default::default() };
        assert_eq!(bad_page.resolve(FIELDS, &config), Err(FilterError::InvalidPage));
        let bad_limit = PageRequest { limit: Some(-3), ..Default::default() };
        assert_eq!(bad_limit.resolve(FIELDS, &config), Err(FilterError::InvalidLimit));
    }

    #[test]
    fn rejects_page_whose_offset_overflows() {
        let config = AppConfig::development().filter;
        let huge = PageRequest::new(i64::MAX, 10, "name asc");
        assert_eq!(huge.resolve(FIELDS, &config), Err(FilterError::InvalidPage));

        let last_fitting = PageRequest::new(i64::MAX / 10, 10, "name asc");
        let p = last_fitting.resolve(FIELDS, &config).unwrap();
        assert_eq!(p.offset(), (i64::MAX / 10 - 1) * 10);
    }

    #[test]
    fn caps_limit_at_configured_max() {
        let mut config = AppConfig::development().filter;
        config.max_limit = Some(50);
        let p = PageRequest::new(1, 500, "name desc").resolve(FIELDS, &config).unwrap();
        assert_eq!(p.limit, 50);
    }

    #[test]
    fn malformed_sort_is_an_error() {
        let config = AppConfig::development().filter;
        let req = PageRequest::new(1, 10, "created_at");
        assert!(matches!(req.resolve(FIELDS, &config), Err(FilterError::InvalidSort(_))));
    }

    #[test]
    fn envelope_echoes_request() {
        let config = AppConfig::development().filter;
        let p = PageRequest::new(2, 10, "name desc").resolve(FIELDS, &config).unwrap();
        let env = PageEnvelope::assemble(&p, vec![1, 2, 3], 25);
        assert_eq!(
            env.paging,
            Paging {
                total_record: 25,
                total_page: 3,
                page: 2,
                order_by: "name".to_string(),
                sort_by: "desc".to_string(),
                size: 10,
            }
        );
    }
}
