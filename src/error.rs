//! Contains the error-related types for the `bson-extjson` crate.

mod decimal128;
mod oid;

use thiserror::Error;

pub use decimal128::Decimal128ErrorKind;
pub use oid::ObjectIdErrorKind;

/// The result type for all methods that can return an error in the `bson-extjson` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in the `bson-extjson` crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,

    /// The document key associated with the error, if any.
    pub key: Option<String>,

    /// The array index associated with the error, if any.
    pub index: Option<usize>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(key) = self.key.as_deref() {
            write!(f, "Error at key \"{key}\": ")?;
        } else if let Some(index) = self.index {
            write!(f, "Error at array index {index}: ")?;
        }

        write!(f, "{}", self.kind)
    }
}

/// The types of errors that can occur in the `bson-extjson` crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An error related to the [`ObjectId`](crate::oid::ObjectId) type occurred.
    #[error("An ObjectId-related error occurred: {kind}")]
    #[non_exhaustive]
    ObjectId {
        /// The kind of error that occurred.
        kind: ObjectIdErrorKind,
    },

    /// An error related to the [`Decimal128`](crate::Decimal128) type occurred.
    #[error("A Decimal128-related error occurred: {kind}")]
    #[non_exhaustive]
    Decimal128 {
        /// The kind of error that occurred.
        kind: Decimal128ErrorKind,
    },

    /// An error related to the [`Binary`](crate::Binary) type occurred.
    #[error("A Binary-related error occurred: {message}")]
    #[non_exhaustive]
    Binary { message: String },

    /// Documents or arrays were nested deeper than the encoder allows.
    #[error("Nesting depth exceeds the maximum of {max_depth}")]
    #[non_exhaustive]
    DepthLimitExceeded {
        /// The deepest nesting level that can be written.
        max_depth: usize,
    },

    /// The string escaping primitive failed.
    #[error("Failed to escape a JSON string: {0}")]
    Json(serde_json::Error),

    /// A [`std::io::Error`] occurred.
    #[error("An IO error occurred: {0}")]
    Io(std::io::Error),

    /// Invalid UTF-8 bytes were encountered.
    #[error("Invalid UTF-8")]
    Utf8Encoding,
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            key: None,
            index: None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        ErrorKind::Io(value).into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        ErrorKind::Json(value).into()
    }
}

impl Error {
    // Errors keep the location closest to where they were raised, so an outer container does
    // not overwrite the key or index recorded by an inner one.
    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        if self.key.is_none() && self.index.is_none() {
            self.key = Some(key.into());
        }
        self
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        if self.key.is_none() && self.index.is_none() {
            self.index = Some(index);
        }
        self
    }

    pub(crate) fn binary(message: impl ToString) -> Self {
        ErrorKind::Binary {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn depth_limit_exceeded(max_depth: usize) -> Self {
        ErrorKind::DepthLimitExceeded { max_depth }.into()
    }

    pub(crate) fn utf8_encoding() -> Self {
        ErrorKind::Utf8Encoding.into()
    }

    #[cfg(test)]
    pub(crate) fn is_depth_limit_exceeded(&self) -> bool {
        matches!(self.kind, ErrorKind::DepthLimitExceeded { .. })
    }
}
