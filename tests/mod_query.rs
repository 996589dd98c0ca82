use bson::Bson;
use eatery::model::{Rating, Restaurant};
use eatery::query::{
    DEFAULT_LIMIT, Filters, Predicate, SortDirection, SortField, compose_rating_query,
    compose_restaurant_query,
};

#[test]
fn no_filters_defaults_to_top_rated() {
    let q = compose_restaurant_query(&Filters::default());
    assert_eq!(q.collection, "restaurants");
    assert!(q.predicates.is_empty());
    assert_eq!(q.order_by.field, Restaurant::FIELD_AVG_RATING);
    assert_eq!(q.order_by.direction, SortDirection::Descending);
    assert_eq!(q.limit, DEFAULT_LIMIT);
}

#[test]
fn category_filter_with_price_ascending_sort() {
    let filters = Filters {
        category: Some("Indian".into()),
        sort_by: Some(SortField::Price),
        direction: Some(SortDirection::Ascending),
        ..Filters::default()
    };
    let q = compose_restaurant_query(&filters);
    assert_eq!(
        q.predicates,
        vec![Predicate::Eq {
            field: Restaurant::FIELD_CATEGORY.into(),
            value: Bson::String("Indian".into())
        }]
    );
    assert_eq!(q.order_by.field, Restaurant::FIELD_PRICE);
    assert_eq!(q.order_by.direction, SortDirection::Ascending);
    assert_eq!(q.limit, DEFAULT_LIMIT);
}

#[test]
fn all_criteria_produce_one_predicate_each() {
    let filters = Filters {
        category: Some("Sushi".into()),
        city: Some("Tokyo".into()),
        price: Some(2),
        ..Filters::default()
    };
    let q = compose_restaurant_query(&filters);
    assert_eq!(q.predicates.len(), 3);
    assert_eq!(
        q.predicates[2],
        Predicate::Eq { field: Restaurant::FIELD_PRICE.into(), value: Bson::Int32(2) }
    );
}

#[test]
fn rating_query_is_fixed() {
    let q = compose_rating_query("abc123");
    assert_eq!(q.collection, "restaurants/abc123/ratings");
    assert!(q.predicates.is_empty());
    assert_eq!(q.order_by.field, Rating::FIELD_TIMESTAMP);
    assert_eq!(q.order_by.direction, SortDirection::Descending);
    assert_eq!(q.limit, DEFAULT_LIMIT);
}

#[test]
fn filter_descriptions() {
    assert_eq!(Filters::default().search_description(), "All restaurants");
    assert_eq!(Filters::default().order_description(), "Sorted by rating");

    let filters = Filters {
        category: Some("Pizza".into()),
        city: Some("Albany".into()),
        price: Some(3),
        sort_by: Some(SortField::Name),
        ..Filters::default()
    };
    assert_eq!(filters.search_description(), "Pizza in Albany $$$");
    assert_eq!(filters.order_description(), "Sorted by name");
}
