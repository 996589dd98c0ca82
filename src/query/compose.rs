use super::types::{Filters, OrderBy, Predicate, QueryDescription, SortDirection, SortField};
use super::DEFAULT_LIMIT;
use crate::model::{COLL_RESTAURANTS, Rating, Restaurant, rating_collection};
use bson::Bson;

/// Builds the restaurant list query: one equality predicate per present
/// criterion, the requested ordering (average rating descending when none
/// is requested), and the shared result bound.
#[must_use]
pub fn compose_restaurant_query(filters: &Filters) -> QueryDescription {
    let mut predicates = Vec::new();
    if let Some(category) = &filters.category {
        predicates.push(Predicate::Eq {
            field: Restaurant::FIELD_CATEGORY.to_string(),
            value: Bson::String(category.clone()),
        });
    }
    if let Some(city) = &filters.city {
        predicates.push(Predicate::Eq {
            field: Restaurant::FIELD_CITY.to_string(),
            value: Bson::String(city.clone()),
        });
    }
    if let Some(price) = filters.price {
        predicates.push(Predicate::Eq {
            field: Restaurant::FIELD_PRICE.to_string(),
            value: Bson::Int32(i32::from(price)),
        });
    }
    let field = filters.sort_by.unwrap_or(SortField::AvgRating);
    let direction = filters.direction.unwrap_or(SortDirection::Descending);
    QueryDescription {
        collection: COLL_RESTAURANTS.to_string(),
        predicates,
        order_by: OrderBy { field: field.field_name().to_string(), direction },
        limit: DEFAULT_LIMIT,
    }
}

/// Builds the fixed rating detail query: newest first, same bound, no
/// filter criteria.
#[must_use]
pub fn compose_rating_query(restaurant_id: &str) -> QueryDescription {
    QueryDescription {
        collection: rating_collection(restaurant_id),
        predicates: Vec::new(),
        order_by: OrderBy {
            field: Rating::FIELD_TIMESTAMP.to_string(),
            direction: SortDirection::Descending,
        },
        limit: DEFAULT_LIMIT,
    }
}
