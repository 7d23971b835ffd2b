//! Built-in converters from raw variable strings to typed values.
//!
//! Every converter has the shape `fn(&str) -> Result<T, ConvertError>` so it
//! can be handed straight to [`EnvReader::read_as`](crate::EnvReader::read_as)
//! or called on its own.
//!
//! The path converters are the only ones with side effects: they create
//! missing directories. Creation is idempotent.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::ConvertError;

/// Literals accepted as `true` (compared case-insensitively).
pub const TRUE_LITERALS: &[&str] = &["1", "true", "yes", "y", "on"];

/// Literals accepted as `false` (compared case-insensitively).
pub const FALSE_LITERALS: &[&str] = &["0", "false", "no", "n", "off"];

/// Convert a boolean literal.
///
/// Surrounding whitespace is ignored and matching is case-insensitive, so
/// `"YES"`, `" on "` and `"1"` are all `true`.
pub fn to_bool(value: &str) -> Result<bool, ConvertError> {
    let normalized = value.trim().to_ascii_lowercase();
    if TRUE_LITERALS.contains(&normalized.as_str()) {
        return Ok(true);
    }
    if FALSE_LITERALS.contains(&normalized.as_str()) {
        return Ok(false);
    }
    Err(ConvertError::invalid_boolean(value))
}

/// Split a comma-separated value into trimmed, non-empty items.
///
/// Order is preserved and duplicates are kept. Empty items (from trailing or
/// doubled commas) are dropped, so `"a, b ,c,"` becomes `["a", "b", "c"]`.
pub fn to_list(value: &str) -> Result<Vec<String>, ConvertError> {
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse a JSON document into a [`serde_json::Value`].
pub fn to_json(value: &str) -> Result<serde_json::Value, ConvertError> {
    serde_json::from_str(value).map_err(ConvertError::MalformedJson)
}

/// Deserialize a JSON document into `T`.
pub fn to_json_as<T: DeserializeOwned>(value: &str) -> Result<T, ConvertError> {
    serde_json::from_str(value).map_err(ConvertError::MalformedJson)
}

/// Parse a value with its `FromStr` implementation after trimming whitespace.
pub fn to_parsed<T>(value: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| ConvertError::InvalidValue {
            value: value.to_string(),
            type_name: std::any::type_name::<T>(),
            reason: err.to_string(),
        })
}

/// Resolve a file path and make sure its parent directories exist.
///
/// Relative paths are resolved against the current directory. The file itself
/// is not created.
pub fn to_filepath(value: &str) -> Result<PathBuf, ConvertError> {
    let path = absolute_path(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| ConvertError::path(parent, err))?;
        tracing::debug!(parent = %parent.display(), "Ensured parent directories exist");
    }
    Ok(path)
}

/// Resolve a directory path and create it (with parents) if missing.
pub fn to_dirpath(value: &str) -> Result<PathBuf, ConvertError> {
    let path = absolute_path(value)?;
    fs::create_dir_all(&path).map_err(|err| ConvertError::path(&path, err))?;
    tracing::debug!(path = %path.display(), "Ensured directory exists");
    Ok(path)
}

fn absolute_path(value: &str) -> Result<PathBuf, ConvertError> {
    std::path::absolute(value).map_err(|err| ConvertError::path(value, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_to_bool_truthy_any_case() {
        for literal in ["1", "true", "yes", "y", "on", "YES", "True", "ON", " yes "] {
            assert!(to_bool(literal).expect(literal), "{literal} should be true");
        }
    }

    #[test]
    fn test_to_bool_falsy_any_case() {
        for literal in ["0", "false", "no", "n", "off", "OFF", "False", "N"] {
            assert!(!to_bool(literal).expect(literal), "{literal} should be false");
        }
    }

    #[test]
    fn test_to_bool_rejects_unknown_literal() {
        for literal in ["maybe", "", "2", "yess", "tru"] {
            let err = to_bool(literal).expect_err(literal);
            assert!(
                matches!(&err, ConvertError::InvalidBoolean { value } if value == literal),
                "unexpected error for {literal:?}: {err}"
            );
        }
    }

    #[test]
    fn test_to_list_splits_on_comma() {
        assert_eq!(
            to_list("shovel,rake,watering_can").expect("list"),
            vec!["shovel", "rake", "watering_can"]
        );
    }

    #[test]
    fn test_to_list_trims_and_drops_trailing_separator() {
        assert_eq!(to_list("a, b ,c,").expect("list"), vec!["a", "b", "c"]);
        assert_eq!(
            to_list("apple,banana,cherry, dragon fruit").expect("list"),
            vec!["apple", "banana", "cherry", "dragon fruit"]
        );
    }

    #[test]
    fn test_to_list_keeps_order_and_duplicates() {
        assert_eq!(to_list("b,a,b").expect("list"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_to_list_empty_items() {
        assert!(to_list("").expect("list").is_empty());
        assert!(to_list(" , ,").expect("list").is_empty());
        assert_eq!(to_list("a,,b").expect("list"), vec!["a", "b"]);
    }

    #[test]
    fn test_to_json_nested_structure() {
        let value = to_json(r#"{"a":[1,2]}"#).expect("json");
        assert_eq!(value, serde_json::json!({ "a": [1, 2] }));

        let value = to_json(r#"{"key": "value", "number": 123}"#).expect("json");
        assert_eq!(value["key"], "value");
        assert_eq!(value["number"], 123);
    }

    #[test]
    fn test_to_json_scalars() {
        assert_eq!(to_json("42").expect("json"), serde_json::json!(42));
        assert_eq!(to_json("null").expect("json"), serde_json::Value::Null);
    }

    #[test]
    fn test_to_json_malformed() {
        assert!(matches!(
            to_json("{bad"),
            Err(ConvertError::MalformedJson(_))
        ));
        assert!(matches!(
            to_json(r#"{"key": "value", "number": 123"#),
            Err(ConvertError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_to_json_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Bed {
            name: String,
            plants: Vec<String>,
        }

        let bed: Bed = to_json_as(r#"{"name":"north","plants":["kale","leek"]}"#).expect("bed");
        assert_eq!(
            bed,
            Bed {
                name: "north".to_string(),
                plants: vec!["kale".to_string(), "leek".to_string()],
            }
        );

        assert!(matches!(
            to_json_as::<Bed>(r#"{"name":"north"}"#),
            Err(ConvertError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_to_parsed() {
        assert_eq!(to_parsed::<u16>(" 8080 ").expect("port"), 8080);
        assert_eq!(to_parsed::<f64>("0.5").expect("ratio"), 0.5);

        let err = to_parsed::<u16>("not_an_int").expect_err("invalid");
        match err {
            ConvertError::InvalidValue {
                value, type_name, ..
            } => {
                assert_eq!(value, "not_an_int");
                assert_eq!(type_name, "u16");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_filepath_creates_parents_not_file() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let file = temp_dir.path().join("nested").join("dir").join("file.txt");
        let raw = file.to_string_lossy().to_string();

        let result = to_filepath(&raw).expect("filepath");

        assert_eq!(result, file);
        assert!(file.parent().expect("parent").is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn test_to_filepath_is_idempotent() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let file = temp_dir.path().join("logs").join("garden.log");
        let raw = file.to_string_lossy().to_string();

        let first = to_filepath(&raw).expect("first");
        std::fs::write(&file, b"entry").expect("write");
        let second = to_filepath(&raw).expect("second");

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&file).expect("read"), b"entry");
    }

    #[test]
    fn test_to_filepath_resolves_relative_paths() {
        let result = to_filepath("relative.txt").expect("filepath");
        assert!(result.is_absolute());
        assert!(result.ends_with("relative.txt"));
    }

    #[test]
    fn test_to_filepath_parent_is_a_file() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").expect("write");
        let raw = blocker.join("file.txt").to_string_lossy().to_string();

        assert!(matches!(
            to_filepath(&raw),
            Err(ConvertError::Path { .. })
        ));
    }

    #[test]
    fn test_to_dirpath_creates_nested_directories() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let dir = temp_dir.path().join("nested").join("dir").join("subdir");
        let raw = dir.to_string_lossy().to_string();
        assert!(!dir.exists());

        let result = to_dirpath(&raw).expect("dirpath");

        assert_eq!(result, dir);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_to_dirpath_is_idempotent() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let dir = temp_dir.path().join("seeds");
        let raw = dir.to_string_lossy().to_string();

        to_dirpath(&raw).expect("first");
        std::fs::write(dir.join("tomato"), b"").expect("write");
        to_dirpath(&raw).expect("second");

        assert!(dir.join("tomato").exists());
    }

    #[test]
    fn test_to_dirpath_rejects_existing_file() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let file = temp_dir.path().join("not_a_dir");
        std::fs::write(&file, b"").expect("write");

        let err = to_dirpath(&file.to_string_lossy()).expect_err("file in the way");
        assert!(matches!(err, ConvertError::Path { path, .. } if path == file));
    }

    #[test]
    fn test_path_converters_reject_empty_path() {
        assert!(matches!(to_dirpath(""), Err(ConvertError::Path { .. })));
        assert!(matches!(to_filepath(""), Err(ConvertError::Path { .. })));
    }
}
