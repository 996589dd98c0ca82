use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transient store failure: {0}")]
    Transient(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("BSON field access: {0}")]
    FieldAccess(#[from] bson::document::ValueAccessError),
}

impl Error {
    /// True for failures that are safe to retry as a whole operation.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
