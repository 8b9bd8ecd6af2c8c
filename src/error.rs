//! All error types for the langstore crate.
//!
//! Lookups never fail; "not found" is expressed with `Option`. These errors are
//! returned only where a value cannot be constructed or parsed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("unknown resource kind `{0}`")]
    UnknownKind(String),

    #[error("unknown plural category `{0}`")]
    UnknownPluralCategory(String),
}

impl Error {
    /// Creates a missing-fields error from any list of field names.
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::MissingFields(fields.into_iter().map(Into::into).collect())
    }
}
