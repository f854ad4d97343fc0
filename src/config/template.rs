//! Template resolution for deferred configuration values
//!
//! Deferred values keep `<%= dotted.path %>` expressions verbatim; this module
//! expands them against the current state of the configuration store at the
//! moment a value is read.

use crate::config::store::ConfigStore;
use crate::config::value::ConfigValue;
use crate::error::{TemplateError, TemplateResult};
use regex::Regex;

/// Expansion passes allowed before assuming a cycle
const MAX_EXPANSION_DEPTH: usize = 32;

/// Resolves template expressions against a configuration store
pub trait TemplateResolver {
    /// Expand every `<%= expr %>` placeholder in `raw`
    fn resolve(&self, raw: &str, store: &ConfigStore) -> TemplateResult<String>;
}

/// Default resolver: placeholders are dotted paths into the store
pub struct ExpressionResolver {
    pattern: Regex,
}

impl ExpressionResolver {
    pub fn new() -> Self {
        ExpressionResolver {
            // Placeholder bodies are dotted/indexed config paths
            pattern: Regex::new(r"<%=\s*([A-Za-z0-9_.]+)\s*%>").unwrap(),
        }
    }
}

impl Default for ExpressionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver for ExpressionResolver {
    fn resolve(&self, raw: &str, store: &ConfigStore) -> TemplateResult<String> {
        let mut result = raw.to_string();

        // Loop so an expansion that itself produced a template gets expanded
        for _ in 0..MAX_EXPANSION_DEPTH {
            if !result.contains(crate::config::value::TEMPLATE_MARKER) {
                return Ok(result);
            }

            let mut failed: Option<TemplateError> = None;
            result = self
                .pattern
                .replace_all(&result, |caps: &regex::Captures| {
                    let path = &caps[1];
                    match store.get(path) {
                        Ok(ConfigValue::Literal(s)) => s.clone(),
                        Ok(ConfigValue::Deferred(s)) => s.clone(),
                        _ => {
                            failed = Some(TemplateError::Unresolved(path.to_string()));
                            String::new()
                        }
                    }
                })
                .to_string();

            if let Some(err) = failed {
                return Err(err);
            }

            // A marker that matches nothing the pattern recognizes would
            // otherwise loop forever
            if self.pattern.find(&result).is_none()
                && result.contains(crate::config::value::TEMPLATE_MARKER)
            {
                return Err(TemplateError::Unresolved(result));
            }
        }

        Err(TemplateError::Recursive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pairs: &[(&str, &str)]) -> ConfigStore {
        let mut store = ConfigStore::new();
        for (path, value) in pairs {
            store.set(path, ConfigValue::string(*value)).unwrap();
        }
        store
    }

    #[test]
    fn test_plain_string_passes_through() {
        let store = ConfigStore::new();
        let resolver = ExpressionResolver::new();
        assert_eq!(resolver.resolve("build", &store).unwrap(), "build");
    }

    #[test]
    fn test_single_expansion() {
        let store = store_with(&[("pkg.name", "infusion")]);
        let resolver = ExpressionResolver::new();
        assert_eq!(
            resolver.resolve("<%= pkg.name %>-all", &store).unwrap(),
            "infusion-all"
        );
    }

    #[test]
    fn test_chained_expansion() {
        let store = store_with(&[
            ("pkg.name", "infusion"),
            ("allBuildName", "<%= pkg.name %>-all"),
        ]);
        let resolver = ExpressionResolver::new();
        assert_eq!(
            resolver
                .resolve("./build/<%= allBuildName %>.js", &store)
                .unwrap(),
            "./build/infusion-all.js"
        );
    }

    #[test]
    fn test_unknown_path_fails() {
        let store = ConfigStore::new();
        let resolver = ExpressionResolver::new();
        let result = resolver.resolve("<%= missing %>", &store);
        assert!(matches!(result, Err(TemplateError::Unresolved(_))));
    }

    #[test]
    fn test_cycle_detected() {
        let mut store = ConfigStore::new();
        store
            .set("a", ConfigValue::string("<%= b %>"))
            .unwrap();
        store
            .set("b", ConfigValue::string("<%= a %>"))
            .unwrap();

        let resolver = ExpressionResolver::new();
        let result = resolver.resolve("<%= a %>", &store);
        assert!(matches!(result, Err(TemplateError::Recursive)));
    }

    #[test]
    fn test_late_write_is_visible() {
        let mut store = store_with(&[("banner", "rev <%= revision %>")]);
        let resolver = ExpressionResolver::new();

        // The template referencing `revision` was stored before the value
        // existed; it resolves once the value arrives.
        store
            .set("revision", ConfigValue::string("abc123"))
            .unwrap();
        assert_eq!(
            resolver.resolve("rev <%= revision %>", &store).unwrap(),
            "rev abc123"
        );
    }
}
