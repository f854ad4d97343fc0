//! Path mapping over configuration lists
//!
//! A thin utility that reads a list-valued configuration path, applies a pure
//! string transformation element-wise, and writes the result back in place.
//! No other configuration path is touched.

use crate::config::{ConfigStore, ConfigValue};
use crate::error::{ConfigError, ConfigResult};

/// Transform every element of the list at `path` with `f`
///
/// Fails with [`ConfigError::TypeMismatch`] when the value at `path` is not a
/// list of strings. Transformed strings are re-classified, so a function that
/// injects a template marker produces deferred values.
pub fn apply_map<F>(store: &mut ConfigStore, path: &str, f: F) -> ConfigResult<()>
where
    F: Fn(&str) -> String,
{
    let items = match store.get(path)? {
        ConfigValue::List(items) => items,
        _ => {
            return Err(ConfigError::TypeMismatch {
                path: path.to_string(),
                expected: "list",
            })
        }
    };

    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        let raw = item.as_raw_str().ok_or_else(|| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: "list of strings",
        })?;
        mapped.push(ConfigValue::string(f(raw)));
    }

    store.set(path, ConfigValue::List(mapped))
}
