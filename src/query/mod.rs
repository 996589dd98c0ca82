// Query composition is pure data transformation; execution against the
// in-memory store lives in `eval`.
mod compose;
mod eval;
mod types;

pub use compose::{compose_rating_query, compose_restaurant_query};
pub use eval::{compare_documents, execute, matches};
pub use types::{Filters, OrderBy, Predicate, QueryDescription, SortDirection, SortField};

/// Result bound shared by the restaurant list and rating detail queries.
/// Unbounded queries are disallowed.
pub const DEFAULT_LIMIT: usize = 50;
