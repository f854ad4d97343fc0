//! Configuration value tree
//!
//! Values in the configuration store are either literal strings, deferred
//! template expressions, ordered lists, or nested trees. Deferred values keep
//! their raw `<%= expr %>` text and are only expanded when read through a
//! template resolver.

use std::collections::BTreeMap;

/// Marker that distinguishes a deferred template string from a literal
pub const TEMPLATE_MARKER: &str = "<%=";

/// A single value in the configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// A plain string, usable as-is
    Literal(String),

    /// A template-bearing string, resolved against the tree at read time
    Deferred(String),

    /// An ordered list of values
    List(Vec<ConfigValue>),

    /// A nested tree of named values
    Tree(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Build a scalar value, classifying template-bearing strings as deferred
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.contains(TEMPLATE_MARKER) {
            ConfigValue::Deferred(s)
        } else {
            ConfigValue::Literal(s)
        }
    }

    /// Build a list value from plain strings
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigValue::List(items.into_iter().map(ConfigValue::string).collect())
    }

    /// Build an empty tree value
    pub fn tree() -> Self {
        ConfigValue::Tree(BTreeMap::new())
    }

    /// The raw string form of a scalar, template text included
    pub fn as_raw_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Literal(s) | ConfigValue::Deferred(s) => Some(s),
            _ => None,
        }
    }

    /// True for scalar variants (literal or deferred)
    pub fn is_scalar(&self) -> bool {
        matches!(self, ConfigValue::Literal(_) | ConfigValue::Deferred(_))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::string(s)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::string(s)
    }
}
