use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("invalid sort format, expected \"field direction\": {0}")]
    InvalidSort(String),

    #[error("unsupported sort field: {0}")]
    UnsupportedSortField(String),

    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("page must be at least 1 and address a reachable row")]
    InvalidPage,

    #[error("limit must be greater than zero")]
    InvalidLimit,
}
