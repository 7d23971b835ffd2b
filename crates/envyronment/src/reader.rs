//! Read environment variables with defaults and conversion.
//!
//! [`EnvReader::read_with`] is the general operation: look a variable up,
//! convert it if present, otherwise fall back according to a [`Fallback`].
//! The other `read*` methods are shorthands for the common combinations, and
//! the free functions at the bottom of this module do the same against the
//! process environment.
//!
//! # Example
//!
//! ```
//! use envyronment::{to_list, to_parsed, EnvReader, MapEnvironment};
//!
//! let env = MapEnvironment::new().with("GARDEN_TOOLS", "shovel,rake,watering_can");
//! let reader = EnvReader::new(env);
//!
//! let tools = reader.read_as("GARDEN_TOOLS", to_list).unwrap();
//! assert_eq!(tools, ["shovel", "rake", "watering_can"]);
//!
//! let port = reader.read_as_or("GARDEN_PORT", to_parsed::<u16>, 8080).unwrap();
//! assert_eq!(port, 8080);
//! ```

use std::convert::Infallible;

use crate::environment::{EnvironmentPort, SystemEnvironment};
use crate::error::{BoxError, EnvError, ValueOrigin};

/// What to do when a variable is not set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fallback<T> {
    /// The variable must be set; absence is [`EnvError::MissingVariable`].
    #[default]
    Required,
    /// Return this value as-is. The converter is not applied.
    Value(T),
    /// Run this raw string through the converter, as if it had been read
    /// from the environment.
    Convert(String),
}

impl<T> Fallback<T> {
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    pub fn convert(raw: impl Into<String>) -> Self {
        Self::Convert(raw.into())
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Reads variables from an [`EnvironmentPort`], optionally under a prefix.
#[derive(Debug, Clone, Default)]
pub struct EnvReader<E = SystemEnvironment> {
    env: E,
    prefix: Option<String>,
}

impl EnvReader<SystemEnvironment> {
    /// Reader over the process environment.
    pub fn system() -> Self {
        Self::new(SystemEnvironment)
    }
}

impl<E: EnvironmentPort> EnvReader<E> {
    pub fn new(env: E) -> Self {
        Self { env, prefix: None }
    }

    /// Prepend `prefix` to every variable name, e.g. `APP_` turns
    /// `read("PORT")` into a lookup of `APP_PORT`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Full variable name looked up for `name`, prefix included.
    pub fn variable_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    /// Read `name`, converting it with `astype`.
    ///
    /// - Set: `astype(raw)`. A converter error becomes
    ///   [`EnvError::Conversion`] with [`ValueOrigin::Environment`].
    /// - Unset with [`Fallback::Value`]: the value, unconverted.
    /// - Unset with [`Fallback::Convert`]: `astype(default)`; errors carry
    ///   [`ValueOrigin::Default`].
    /// - Unset with [`Fallback::Required`]: [`EnvError::MissingVariable`].
    pub fn read_with<T, F, ConvErr>(
        &self,
        name: &str,
        fallback: Fallback<T>,
        astype: F,
    ) -> Result<T, EnvError>
    where
        F: FnOnce(&str) -> Result<T, ConvErr>,
        ConvErr: Into<BoxError>,
    {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        let key = self.variable_name(name);

        if let Some(raw) = self.env.get_var(&key)? {
            tracing::debug!(
                variable = %key,
                origin = %ValueOrigin::Environment,
                "Read environment variable"
            );
            return astype(&raw)
                .map_err(|err| EnvError::conversion(key, ValueOrigin::Environment, err));
        }

        match fallback {
            Fallback::Required => Err(EnvError::missing(key)),
            Fallback::Value(value) => {
                tracing::debug!(
                    variable = %key,
                    origin = %ValueOrigin::Default,
                    "Environment variable not set, using default"
                );
                Ok(value)
            }
            Fallback::Convert(raw) => {
                tracing::debug!(
                    variable = %key,
                    origin = %ValueOrigin::Default,
                    "Environment variable not set, converting default"
                );
                astype(&raw).map_err(|err| EnvError::conversion(key, ValueOrigin::Default, err))
            }
        }
    }

    /// Read a required variable as a raw string.
    pub fn read(&self, name: &str) -> Result<String, EnvError> {
        self.read_with(name, Fallback::Required, identity)
    }

    /// Read a variable as a raw string, or return `default` if unset.
    pub fn read_or(&self, name: &str, default: impl Into<String>) -> Result<String, EnvError> {
        self.read_with(name, Fallback::Value(default.into()), identity)
    }

    /// Read and convert a required variable.
    pub fn read_as<T, F, ConvErr>(&self, name: &str, astype: F) -> Result<T, EnvError>
    where
        F: FnOnce(&str) -> Result<T, ConvErr>,
        ConvErr: Into<BoxError>,
    {
        self.read_with(name, Fallback::Required, astype)
    }

    /// Read and convert a variable, or return `default` unconverted if unset.
    pub fn read_as_or<T, F, ConvErr>(&self, name: &str, astype: F, default: T) -> Result<T, EnvError>
    where
        F: FnOnce(&str) -> Result<T, ConvErr>,
        ConvErr: Into<BoxError>,
    {
        self.read_with(name, Fallback::Value(default), astype)
    }

    /// Read and convert a variable, converting the raw `default` if unset.
    pub fn read_as_or_convert<T, F, ConvErr>(
        &self,
        name: &str,
        astype: F,
        default: impl Into<String>,
    ) -> Result<T, EnvError>
    where
        F: FnOnce(&str) -> Result<T, ConvErr>,
        ConvErr: Into<BoxError>,
    {
        self.read_with(name, Fallback::Convert(default.into()), astype)
    }

    /// Read and convert a variable, returning `None` if unset.
    pub fn read_as_opt<T, F, ConvErr>(&self, name: &str, astype: F) -> Result<Option<T>, EnvError>
    where
        F: FnOnce(&str) -> Result<T, ConvErr>,
        ConvErr: Into<BoxError>,
    {
        self.read_with(name, Fallback::Value(None), |raw| astype(raw).map(Some))
    }
}

fn identity(raw: &str) -> Result<String, Infallible> {
    Ok(raw.to_string())
}

// =============================================================================
// Process environment shorthands
// =============================================================================

/// [`EnvReader::read_with`] against the process environment.
pub fn read_with<T, F, ConvErr>(name: &str, fallback: Fallback<T>, astype: F) -> Result<T, EnvError>
where
    F: FnOnce(&str) -> Result<T, ConvErr>,
    ConvErr: Into<BoxError>,
{
    EnvReader::system().read_with(name, fallback, astype)
}

/// [`EnvReader::read`] against the process environment.
pub fn read(name: &str) -> Result<String, EnvError> {
    EnvReader::system().read(name)
}

/// [`EnvReader::read_or`] against the process environment.
pub fn read_or(name: &str, default: impl Into<String>) -> Result<String, EnvError> {
    EnvReader::system().read_or(name, default)
}

/// [`EnvReader::read_as`] against the process environment.
pub fn read_as<T, F, ConvErr>(name: &str, astype: F) -> Result<T, EnvError>
where
    F: FnOnce(&str) -> Result<T, ConvErr>,
    ConvErr: Into<BoxError>,
{
    EnvReader::system().read_as(name, astype)
}

/// [`EnvReader::read_as_or`] against the process environment.
pub fn read_as_or<T, F, ConvErr>(name: &str, astype: F, default: T) -> Result<T, EnvError>
where
    F: FnOnce(&str) -> Result<T, ConvErr>,
    ConvErr: Into<BoxError>,
{
    EnvReader::system().read_as_or(name, astype, default)
}

/// [`EnvReader::read_as_or_convert`] against the process environment.
pub fn read_as_or_convert<T, F, ConvErr>(
    name: &str,
    astype: F,
    default: impl Into<String>,
) -> Result<T, EnvError>
where
    F: FnOnce(&str) -> Result<T, ConvErr>,
    ConvErr: Into<BoxError>,
{
    EnvReader::system().read_as_or_convert(name, astype, default)
}

/// [`EnvReader::read_as_opt`] against the process environment.
pub fn read_as_opt<T, F, ConvErr>(name: &str, astype: F) -> Result<Option<T>, EnvError>
where
    F: FnOnce(&str) -> Result<T, ConvErr>,
    ConvErr: Into<BoxError>,
{
    EnvReader::system().read_as_opt(name, astype)
}
