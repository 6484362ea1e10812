pub mod builder;
pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod pagination;
pub mod types;

pub use builder::{escape_like, PredicateSetBuilder};
pub use error::FilterError;
pub use filter::Filter;
pub use pagination::{PageEnvelope, PageRequest, Paging};
pub use types::*;
