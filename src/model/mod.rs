// Data contracts shared by the query and rating layers.
mod rating;
mod restaurant;

pub use rating::{MAX_RATING_VALUE, Rating, UserRef};
pub use restaurant::{PRICE_MAX, PRICE_MIN, Restaurant, price_string};

/// Top-level restaurant collection.
pub const COLL_RESTAURANTS: &str = "restaurants";

/// Per-restaurant rating sub-collection path.
#[must_use]
pub fn rating_collection(restaurant_id: &str) -> String {
    format!("{COLL_RESTAURANTS}/{restaurant_id}/ratings")
}
