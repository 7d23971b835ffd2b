//! Error types for environment lookups and value conversion.
//!
//! Two layers:
//! - [`ConvertError`] is what the built-in converters return on their own.
//! - [`EnvError`] is what every read returns. A converter failure is wrapped in
//!   [`EnvError::Conversion`] with the variable name attached and the original
//!   error kept as its `source`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by an arbitrary converter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which value a converter was applied to when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    /// The value read from the environment.
    Environment,
    /// The caller-supplied default (only converted on request).
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOrigin::Environment => write!(f, "environment value"),
            ValueOrigin::Default => write!(f, "default value"),
        }
    }
}

/// Error returned by environment reads and dotenv loading.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The caller asked for a variable with an empty name.
    #[error("Environment variable name must not be empty")]
    EmptyName,

    /// Required variable is absent and no default was given.
    #[error("Environment variable {name} is not set")]
    MissingVariable { name: String },

    /// Variable is present but its value is not valid UTF-8.
    #[error("Environment variable {name} is not valid UTF-8")]
    NotUnicode { name: String },

    /// The converter rejected the value.
    #[error("Failed to convert {origin} of {name}: {source}")]
    Conversion {
        name: String,
        origin: ValueOrigin,
        #[source]
        source: BoxError,
    },

    /// A dotenv file exists but could not be read or parsed.
    #[cfg(feature = "dotenv")]
    #[error("Failed to load dotenv file {}: {source}", .path.display())]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl EnvError {
    /// Create a missing variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Wrap a converter failure with the variable it was converting.
    pub fn conversion(
        name: impl Into<String>,
        origin: ValueOrigin,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Conversion {
            name: name.into(),
            origin,
            source: source.into(),
        }
    }

    /// Check if this is a missing variable error.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingVariable { .. })
    }

    /// Name of the variable the error is about, if any.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::MissingVariable { name }
            | Self::NotUnicode { name }
            | Self::Conversion { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Downcast the converter's original error.
    ///
    /// Returns `None` for non-conversion errors or when the converter failed
    /// with a different error type.
    ///
    /// # Example
    /// ```
    /// use envyronment::{to_bool, ConvertError, EnvReader, MapEnvironment};
    ///
    /// let reader = EnvReader::new(MapEnvironment::from_pairs([("DEBUG", "maybe")]));
    /// let err = reader.read_as("DEBUG", to_bool).unwrap_err();
    /// assert!(matches!(
    ///     err.conversion_source::<ConvertError>(),
    ///     Some(ConvertError::InvalidBoolean { .. })
    /// ));
    /// ```
    pub fn conversion_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Conversion { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Error returned by the built-in converters.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Not one of the accepted boolean literals.
    #[error("Invalid boolean literal '{value}' (expected 1/true/yes/y/on or 0/false/no/n/off)")]
    InvalidBoolean { value: String },

    /// JSON parsing failed; carries the parser's message.
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// `FromStr` parsing into the target type failed.
    #[error("Cannot convert '{value}' to {type_name}: {reason}")]
    InvalidValue {
        value: String,
        type_name: &'static str,
        reason: String,
    },

    /// Resolving the path or creating its directories failed.
    #[error("Path error for {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Create an invalid boolean error
    pub fn invalid_boolean(value: impl Into<String>) -> Self {
        Self::InvalidBoolean {
            value: value.into(),
        }
    }

    /// Create a path error
    pub fn path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Path {
            path: path.into(),
            source,
        }
    }
}
