use crate::errors::{Error, Result};
use bson::{Bson, Document as BsonDocument, doc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of the rating scale. The UI offers discrete steps but the
/// model tolerates any finite value in `[0.0, MAX_RATING_VALUE]`.
pub const MAX_RATING_VALUE: f64 = 5.0;

/// Opaque reference to the submitting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub uid: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

impl UserRef {
    #[must_use]
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { uid: uid.into(), display_name: display_name.into(), photo_url: None }
    }
}

/// One user's evaluation of a restaurant. Immutable once committed; the
/// timestamp stays `None` until the transaction engine assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: String,
    pub user_name: String,
    pub user_photo: Option<String>,
    pub value: f64,
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Rating {
    pub const FIELD_USER_ID: &'static str = "userId";
    pub const FIELD_USER_NAME: &'static str = "userName";
    pub const FIELD_USER_PHOTO: &'static str = "userPhoto";
    pub const FIELD_VALUE: &'static str = "rating";
    pub const FIELD_TEXT: &'static str = "text";
    pub const FIELD_TIMESTAMP: &'static str = "timestamp";

    #[must_use]
    pub fn new(user: &UserRef, value: f64, text: impl Into<String>) -> Self {
        Self {
            user_id: user.uid.clone(),
            user_name: user.display_name.clone(),
            user_photo: user.photo_url.clone(),
            value,
            text: text.into(),
            timestamp: None,
        }
    }

    /// Rejects out-of-range values and anonymous authors before any store
    /// interaction is attempted.
    ///
    /// # Errors
    /// Returns `InvalidArgument` describing the first failing check.
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() || self.value < 0.0 || self.value > MAX_RATING_VALUE {
            return Err(Error::InvalidArgument(format!(
                "rating value {} outside [0, {MAX_RATING_VALUE}]",
                self.value
            )));
        }
        if self.user_id.is_empty() {
            return Err(Error::InvalidArgument("rating author has no id".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_document(&self) -> BsonDocument {
        doc! {
            Self::FIELD_USER_ID: &self.user_id,
            Self::FIELD_USER_NAME: &self.user_name,
            Self::FIELD_USER_PHOTO: self.user_photo.clone(),
            Self::FIELD_VALUE: self.value,
            Self::FIELD_TEXT: &self.text,
            Self::FIELD_TIMESTAMP: self.timestamp.map(bson::DateTime::from_chrono),
        }
    }

    /// # Errors
    /// Returns `FieldAccess` when a required field is missing or mistyped.
    pub fn from_document(doc: &BsonDocument) -> Result<Self> {
        let user_photo = match doc.get(Self::FIELD_USER_PHOTO) {
            Some(Bson::String(s)) => Some(s.clone()),
            _ => None,
        };
        let timestamp = match doc.get(Self::FIELD_TIMESTAMP) {
            Some(Bson::DateTime(dt)) => Some(dt.to_chrono()),
            _ => None,
        };
        Ok(Self {
            user_id: doc.get_str(Self::FIELD_USER_ID)?.to_string(),
            user_name: doc.get_str(Self::FIELD_USER_NAME)?.to_string(),
            user_photo,
            value: doc.get_f64(Self::FIELD_VALUE)?,
            text: doc.get_str(Self::FIELD_TEXT)?.to_string(),
            timestamp,
        })
    }
}
