use crate::errors::{Error, Result};
use bson::{Document as BsonDocument, doc};
use serde::{Deserialize, Serialize};

pub const PRICE_MIN: u8 = 1;
pub const PRICE_MAX: u8 = 3;

/// One directory entry. The aggregate pair (`num_ratings`, `avg_rating`)
/// is mutated exclusively by the rating transaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub city: String,
    pub category: String,
    pub price: u8,
    pub photo: String,
    pub num_ratings: u64,
    pub avg_rating: f64,
}

impl Restaurant {
    pub const FIELD_NAME: &'static str = "name";
    pub const FIELD_CITY: &'static str = "city";
    pub const FIELD_CATEGORY: &'static str = "category";
    pub const FIELD_PRICE: &'static str = "price";
    pub const FIELD_PHOTO: &'static str = "photo";
    pub const FIELD_NUM_RATINGS: &'static str = "numRatings";
    pub const FIELD_AVG_RATING: &'static str = "avgRating";

    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        doc! {
            Self::FIELD_NAME: &self.name,
            Self::FIELD_CITY: &self.city,
            Self::FIELD_CATEGORY: &self.category,
            Self::FIELD_PRICE: i32::from(self.price),
            Self::FIELD_PHOTO: &self.photo,
            Self::FIELD_NUM_RATINGS: self.num_ratings as i64,
            Self::FIELD_AVG_RATING: self.avg_rating,
        }
    }

    /// # Errors
    /// Returns `FieldAccess` when a field is missing or has the wrong type,
    /// or `Store` when a numeric field is out of its expected range.
    pub fn from_document(doc: &BsonDocument) -> Result<Self> {
        let price = doc.get_i32(Self::FIELD_PRICE)?;
        let num_ratings = doc.get_i64(Self::FIELD_NUM_RATINGS)?;
        Ok(Self {
            name: doc.get_str(Self::FIELD_NAME)?.to_string(),
            city: doc.get_str(Self::FIELD_CITY)?.to_string(),
            category: doc.get_str(Self::FIELD_CATEGORY)?.to_string(),
            price: u8::try_from(price)
                .map_err(|_| Error::Store(format!("price out of range: {price}")))?,
            photo: doc.get_str(Self::FIELD_PHOTO)?.to_string(),
            num_ratings: u64::try_from(num_ratings)
                .map_err(|_| Error::Store(format!("negative rating count: {num_ratings}")))?,
            avg_rating: doc.get_f64(Self::FIELD_AVG_RATING)?,
        })
    }
}

/// Relative-cost marker for a price tier, e.g. `"$$"` for tier 2.
#[must_use]
pub fn price_string(price: u8) -> String {
    "$".repeat(usize::from(price.clamp(PRICE_MIN, PRICE_MAX)))
}
