//! The long-lived API client: configuration plus the macro registry.
//!
//! A [`Client`] is created once per API key and shared across sends. Macros
//! registered on it apply to every subsequent expansion. The registry sits
//! behind a read-write lock: `register_macro` takes the write lock and
//! `apply_macros` a read lock, so registration and expansion are safe to mix
//! from multiple threads.
//!
//! Expansion is two-phase by construction: recipient substitution runs over a
//! macro's parameter string before the macro function sees it, so a
//! placeholder nested inside a macro invocation resolves first.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::macros::{Macro, MacroRegistry};
use crate::recipient::Recipient;
use crate::template::{tokenize, Token};
use std::sync::RwLock;

/// An email-sending API client.
///
/// Owns the configuration for the remote endpoint and the session-scoped
/// macro registry. The actual HTTP transport lives outside this crate; the
/// client's job here is to prepare content for transmission.
pub struct Client {
    config: ClientConfig,
    macros: RwLock<MacroRegistry>,
}

impl Client {
    /// Create a client with the given configuration and an empty registry.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            macros: RwLock::new(MacroRegistry::new()),
        }
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a macro for use in content expansion.
    ///
    /// Later registrations of the same name replace earlier ones.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The macro is available to subsequent expansions.
    /// * `Err(CourierError::InvalidMacroName)` - The name does not match
    ///   `^\w+$`; the registry is unchanged.
    pub fn register_macro(&self, macro_def: Macro) -> Result<()> {
        let mut registry = self
            .macros
            .write()
            .unwrap_or_else(|poison| poison.into_inner());
        registry.register(macro_def)
    }

    /// Whether a macro with the given name is registered.
    pub fn has_macro(&self, name: &str) -> bool {
        let registry = self
            .macros
            .read()
            .unwrap_or_else(|poison| poison.into_inner());
        registry.get(name).is_some()
    }

    /// Expand registered macros in `input`, optionally against a recipient.
    ///
    /// With an empty registry the input is returned unchanged without being
    /// tokenized. Otherwise each macro block is split on its first whitespace
    /// run into a macro name and a parameter string. For a registered name,
    /// the parameters first go through the recipient's substitution (when a
    /// recipient was supplied) and the macro function's return value replaces
    /// the block. An unregistered name leaves the block exactly as written,
    /// which is how recipient-only placeholders survive this pass.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The expanded content.
    /// * `Err(CourierError::MismatchedBrace)` - `input` does not tokenize.
    /// * `Err(CourierError::InvalidDataShape)` - The recipient's context is
    ///   malformed.
    pub fn apply_macros(&self, input: &str, recipient: Option<&Recipient>) -> Result<String> {
        let registry = self
            .macros
            .read()
            .unwrap_or_else(|poison| poison.into_inner());

        if registry.is_empty() {
            return Ok(input.to_string());
        }

        let tokens = tokenize(input)?;

        if let [Token::Static(_)] = tokens.as_slice() {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        for token in &tokens {
            match token {
                Token::Static(text) => result.push_str(text),
                Token::Macro(text) => {
                    let body = token.macro_body().unwrap_or_default();
                    let (name, params) = split_invocation(body);

                    match registry.get(name) {
                        Some(macro_def) => {
                            let replacement = match recipient {
                                Some(recipient) => macro_def.call(&recipient.apply(params)?),
                                None => macro_def.call(params),
                            };
                            result.push_str(&replacement);
                        }
                        None => result.push_str(text),
                    }
                }
            }
        }

        Ok(result)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Split a macro block body on its first run of whitespace.
///
/// Returns the macro name and the parameter string; the parameter string is
/// empty when the body has no whitespace at all.
fn split_invocation(body: &str) -> (&str, &str) {
    match body.find(char::is_whitespace) {
        Some(split) => (&body[..split], body[split..].trim_start()),
        None => (body, ""),
    }
}
