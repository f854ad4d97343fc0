//! Configuration store
//!
//! An in-memory nested tree of named properties, addressable by dotted
//! (and list-indexed) paths such as `copy.custom.files.0.src`. The store
//! never resolves templates itself; readers that need expanded strings go
//! through a [`TemplateResolver`](crate::config::TemplateResolver).

use crate::config::template::TemplateResolver;
use crate::config::value::ConfigValue;
use crate::error::{ConfigError, ConfigResult, Result};
use std::collections::BTreeMap;

/// Nested configuration tree with path-based access
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    root: BTreeMap<String, ConfigValue>,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        ConfigStore {
            root: BTreeMap::new(),
        }
    }

    /// Read the raw value at a dotted path
    pub fn get(&self, path: &str) -> ConfigResult<&ConfigValue> {
        let mut segments = path.split('.');
        let first = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))?;

        let mut current = self
            .root
            .get(first)
            .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))?;

        for segment in segments {
            current = descend(current, segment)
                .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))?;
        }

        Ok(current)
    }

    /// Write a value at a dotted path, creating intermediate tree nodes
    ///
    /// A numeric segment indexes into a list; it may reference an existing
    /// slot or the position immediately past the end (append).
    pub fn set(&mut self, path: &str, value: ConfigValue) -> ConfigResult<()> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some((last, intermediate)) = segments.split_last() else {
            return Err(ConfigError::PathNotFound(path.to_string()));
        };

        let mut current: &mut ConfigValue = {
            let first = intermediate.first().copied().unwrap_or(*last);
            self.root.entry(first.to_string()).or_insert_with(ConfigValue::tree)
        };
        if intermediate.is_empty() {
            *current = value;
            return Ok(());
        }

        for segment in &intermediate[1..] {
            current = descend_mut(current, segment, path)?;
        }

        // Final segment
        match current {
            ConfigValue::Tree(map) => {
                map.insert(last.to_string(), value);
                Ok(())
            }
            ConfigValue::List(items) => {
                let index: usize = last
                    .parse()
                    .map_err(|_| ConfigError::PathNotFound(path.to_string()))?;
                if index < items.len() {
                    items[index] = value;
                    Ok(())
                } else if index == items.len() {
                    items.push(value);
                    Ok(())
                } else {
                    Err(ConfigError::PathNotFound(path.to_string()))
                }
            }
            _ => Err(ConfigError::TypeMismatch {
                path: path.to_string(),
                expected: "tree",
            }),
        }
    }

    /// True if a value exists at the path
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Read a scalar at a path, expanding any deferred template
    pub fn get_string(&self, path: &str, resolver: &dyn TemplateResolver) -> Result<String> {
        match self.get(path)? {
            ConfigValue::Literal(s) => Ok(s.clone()),
            ConfigValue::Deferred(raw) => Ok(resolver.resolve(raw, self)?),
            _ => Err(ConfigError::TypeMismatch {
                path: path.to_string(),
                expected: "string",
            }
            .into()),
        }
    }

    /// Read a list of scalars at a path, expanding deferred templates
    pub fn get_strings(&self, path: &str, resolver: &dyn TemplateResolver) -> Result<Vec<String>> {
        let items = match self.get(path)? {
            ConfigValue::List(items) => items,
            _ => {
                return Err(ConfigError::TypeMismatch {
                    path: path.to_string(),
                    expected: "list",
                }
                .into())
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                ConfigValue::Literal(s) => out.push(s.clone()),
                ConfigValue::Deferred(raw) => out.push(resolver.resolve(raw, self)?),
                _ => {
                    return Err(ConfigError::TypeMismatch {
                        path: path.to_string(),
                        expected: "list of strings",
                    }
                    .into())
                }
            }
        }
        Ok(out)
    }
}

/// Follow one path segment down a value
fn descend<'a>(value: &'a ConfigValue, segment: &str) -> Option<&'a ConfigValue> {
    match value {
        ConfigValue::Tree(map) => map.get(segment),
        ConfigValue::List(items) => {
            let index: usize = segment.parse().ok()?;
            items.get(index)
        }
        _ => None,
    }
}

/// Follow one path segment down a value mutably, creating tree nodes
fn descend_mut<'a>(
    value: &'a mut ConfigValue,
    segment: &str,
    path: &str,
) -> ConfigResult<&'a mut ConfigValue> {
    match value {
        ConfigValue::Tree(map) => Ok(map
            .entry(segment.to_string())
            .or_insert_with(ConfigValue::tree)),
        ConfigValue::List(items) => {
            let index: usize = segment
                .parse()
                .map_err(|_| ConfigError::PathNotFound(path.to_string()))?;
            if index == items.len() {
                items.push(ConfigValue::tree());
            }
            items
                .get_mut(index)
                .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))
        }
        _ => Err(ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: "tree",
        }),
    }
}
