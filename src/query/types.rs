use crate::model::{Restaurant, price_string};
use bson::Bson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Price,
    AvgRating,
}

impl SortField {
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Name => Restaurant::FIELD_NAME,
            Self::Price => Restaurant::FIELD_PRICE,
            Self::AvgRating => Restaurant::FIELD_AVG_RATING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// User-chosen constraints narrowing the restaurant list query.
/// Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub category: Option<String>,
    pub city: Option<String>,
    pub price: Option<u8>,
    pub sort_by: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl Filters {
    /// Human-readable summary of the selected constraints, for list headers.
    #[must_use]
    pub fn search_description(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(category) = &self.category {
            parts.push(category.clone());
        }
        if let Some(city) = &self.city {
            parts.push(format!("in {city}"));
        }
        if let Some(price) = self.price {
            parts.push(price_string(price));
        }
        if parts.is_empty() { "All restaurants".to_string() } else { parts.join(" ") }
    }

    /// Summary of the active ordering, for list headers.
    #[must_use]
    pub fn order_description(&self) -> &'static str {
        match self.sort_by.unwrap_or(SortField::AvgRating) {
            SortField::Name => "Sorted by name",
            SortField::Price => "Sorted by price",
            SortField::AvgRating => "Sorted by rating",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { field: String, value: Bson },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// A filtered, ordered, bounded query against one collection. Predicates
/// apply first, then the ordering, then the limit.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescription {
    pub collection: String,
    pub predicates: Vec<Predicate>,
    pub order_by: OrderBy,
    pub limit: usize,
}
