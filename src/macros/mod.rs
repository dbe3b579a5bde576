//! User-registered macros and the per-client macro registry.
//!
//! A macro is a named text transformation invoked from message content via a
//! placeholder block: `{{name params}}`. The function receives the raw
//! parameter string (after any recipient substitution has been applied to it)
//! and returns the replacement text.
//!
//! Registration is the only way the registry grows. Names are validated
//! against `^\w+$`; registering an existing name overwrites the prior macro.
//! Nothing ever removes an entry.

use crate::error::{CourierError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static MACRO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("macro name pattern must compile"));

/// The callable stored for each macro: a total function from the parameter
/// string to the replacement text.
///
/// Any closure or function pointer with this signature qualifies; there is no
/// trait to implement. `Send + Sync` so a registry can sit behind a lock
/// shared across threads.
pub type MacroFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A named text transformation.
pub struct Macro {
    name: String,
    function: MacroFn,
}

impl Macro {
    /// Create a macro from a name and any `Fn(&str) -> String`.
    ///
    /// The name is validated at registration time, not here, so a `Macro`
    /// value can be built unconditionally and passed around.
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }

    /// The macro's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the macro on a parameter string.
    pub fn call(&self, params: &str) -> String {
        (self.function)(params)
    }
}

impl std::fmt::Debug for Macro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Macro")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Mapping from macro name to macro, owned by a client.
///
/// Empty at client creation. Last registration for a given name wins.
#[derive(Debug, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, Macro>,
}

impl MacroRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a macro, overwriting any prior macro of the same name.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The macro was inserted.
    /// * `Err(CourierError::InvalidMacroName)` - The name does not match
    ///   `^\w+$`; the registry is left unchanged.
    pub fn register(&mut self, macro_def: Macro) -> Result<()> {
        if !MACRO_NAME.is_match(&macro_def.name) {
            return Err(CourierError::InvalidMacroName {
                name: macro_def.name.clone(),
            });
        }

        self.macros.insert(macro_def.name.clone(), macro_def);
        Ok(())
    }

    /// Look up a macro by name.
    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    /// Whether no macros are registered.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Number of registered macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MacroRegistry::new();
        registry
            .register(Macro::new("ext_upper", |s: &str| s.to_uppercase()))
            .unwrap();

        let m = registry.get("ext_upper").unwrap();
        assert_eq!(m.name(), "ext_upper");
        assert_eq!(m.call("def"), "DEF");
    }

    #[test]
    fn test_empty_registry() {
        let registry = MacroRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("anything").is_none());
    }

    #[test]
    fn test_invalid_name_rejected_and_registry_unchanged() {
        let mut registry = MacroRegistry::new();
        let err = registry
            .register(Macro::new("b:ar", |s: &str| s.to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            CourierError::InvalidMacroName { ref name } if name == "b:ar"
        ));
        assert!(registry.get("b:ar").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = MacroRegistry::new();
        let err = registry
            .register(Macro::new("", |s: &str| s.to_string()))
            .unwrap_err();
        assert!(matches!(err, CourierError::InvalidMacroName { .. }));
    }

    #[test]
    fn test_name_with_whitespace_rejected() {
        let mut registry = MacroRegistry::new();
        let result = registry.register(Macro::new("two words", |s: &str| s.to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_underscores_and_digits_allowed() {
        let mut registry = MacroRegistry::new();
        registry
            .register(Macro::new("macro_2", |s: &str| s.to_string()))
            .unwrap();
        assert!(registry.get("macro_2").is_some());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = MacroRegistry::new();
        registry
            .register(Macro::new("greet", |_: &str| "first".to_string()))
            .unwrap();
        registry
            .register(Macro::new("greet", |_: &str| "second".to_string()))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("greet").unwrap().call(""), "second");
    }
}
