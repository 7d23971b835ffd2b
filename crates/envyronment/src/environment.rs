//! Environment port for abstracting environment variable access.
//!
//! Readers look variables up through [`EnvironmentPort`] rather than calling
//! `std::env` directly, so tests and embedding applications can supply their
//! own variable table.

use std::collections::HashMap;
use std::env::VarError;
use std::sync::Arc;

use crate::error::EnvError;

/// Port for environment variable access.
///
/// Implementations can provide the OS environment, an in-memory table, or test
/// mocks. Lookups are exact and case-sensitive.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentPort: Send + Sync {
    /// Get an environment variable value.
    /// Returns `Ok(None)` if the variable is not set.
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError>;

    /// Get an environment variable or return a default value.
    fn get_var_or(&self, key: &str, default: &str) -> Result<String, EnvError> {
        Ok(self.get_var(key)?.unwrap_or_else(|| default.to_string()))
    }
}

impl<T: EnvironmentPort + ?Sized> EnvironmentPort for Arc<T> {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        (**self).get_var(key)
    }
}

impl<T: EnvironmentPort + ?Sized> EnvironmentPort for &T {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        (**self).get_var(key)
    }
}

/// Process environment.
///
/// Uses `std::env` for reading environment variables from the OS. Values that
/// are not valid UTF-8 are reported as [`EnvError::NotUnicode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentPort for SystemEnvironment {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        // Keys with '=' or NUL can never be set; std may panic on them.
        if key.is_empty() || key.contains(&['=', '\0'][..]) {
            return Ok(None);
        }
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
                name: key.to_string(),
            }),
        }
    }
}

/// In-memory variable table.
///
/// Never touches the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, value)` pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Builder form of [`MapEnvironment::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvironmentPort for MapEnvironment {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        Ok(self.vars.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_environment_lookup_is_case_sensitive() {
        let env = MapEnvironment::new().with("GARDEN_TOOLS", "rake");

        assert_eq!(
            env.get_var("GARDEN_TOOLS").expect("lookup"),
            Some("rake".to_string())
        );
        assert_eq!(env.get_var("garden_tools").expect("lookup"), None);
    }

    #[test]
    fn test_map_environment_from_pairs_last_wins() {
        let env = MapEnvironment::from_pairs([("A", "1"), ("B", "2"), ("A", "3")]);

        assert_eq!(env.len(), 2);
        assert_eq!(env.get_var("A").expect("lookup"), Some("3".to_string()));
    }

    #[test]
    fn test_map_environment_remove() {
        let mut env = MapEnvironment::new().with("A", "1");
        assert_eq!(env.remove("A"), Some("1".to_string()));
        assert!(env.is_empty());
        assert_eq!(env.get_var("A").expect("lookup"), None);
    }

    #[test]
    fn test_get_var_or_falls_back() {
        let env = MapEnvironment::new().with("SET", "value");

        assert_eq!(env.get_var_or("SET", "fallback").expect("lookup"), "value");
        assert_eq!(
            env.get_var_or("UNSET", "fallback").expect("lookup"),
            "fallback"
        );
    }

    #[test]
    fn test_shared_port_delegates() {
        let env: Arc<dyn EnvironmentPort> = Arc::new(MapEnvironment::new().with("K", "v"));
        assert_eq!(env.get_var("K").expect("lookup"), Some("v".to_string()));
    }

    #[test]
    fn test_system_environment_ignores_unsettable_keys() {
        let env = SystemEnvironment::new();
        assert_eq!(env.get_var("").expect("lookup"), None);
        assert_eq!(env.get_var("A=B").expect("lookup"), None);
        assert_eq!(env.get_var("NUL\0KEY").expect("lookup"), None);
    }

    #[test]
    fn test_system_environment_reports_absent_variable() {
        let env = SystemEnvironment::new();
        assert_eq!(
            env.get_var("ENVYRONMENT_TEST_SURELY_UNSET_VARIABLE")
                .expect("lookup"),
            None
        );
    }
}
