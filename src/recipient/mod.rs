//! Recipient model and per-recipient placeholder substitution.
//!
//! Each recipient carries an address plus two optional JSON maps:
//! substitution data and metadata. Placeholder blocks in message content
//! (`{{key}}`) are filled from these maps before any macro expansion runs.
//!
//! # Substitution rules
//!
//! - Substitution data is consulted first; metadata second. On a key present
//!   in both, substitution data wins.
//! - Only string values substitute. A key mapped to a number, boolean, array
//!   or object leaves the placeholder text exactly as written - values are
//!   never stringified.
//! - A key found in neither map also leaves the placeholder untouched. This
//!   lets content carry placeholders that a later pipeline stage resolves.
//!
//! Malformed recipients are a different matter: an address that is neither a
//! plain email string nor a recognized address object, or substitution
//! data/metadata that is not a string-keyed mapping, fails the whole call
//! before any substitution happens.


use crate::error::{CourierError, Result};
use crate::template::{tokenize, Token};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recipient address: either a bare email string or an object carrying an
/// email with optional display name and header-to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// A plain email address, e.g. `"user@example.com"`.
    Email(String),
    /// The object form used by the transmissions API.
    Full {
        /// The recipient's email address.
        email: String,
        /// Optional display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Optional value for the `To` header, for CC/BCC-style delivery.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header_to: Option<String>,
    },
}

impl Address {
    /// The email address, used in diagnostics for this recipient.
    pub fn email(&self) -> &str {
        match self {
            Address::Email(email) => email,
            Address::Full { email, .. } => email,
        }
    }

    /// Parse an address from a raw JSON value.
    ///
    /// Accepts a string or an object with a string `email` field. Anything
    /// else is an [`CourierError::InvalidAddressFormat`].
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(email) => Ok(Address::Email(email.clone())),
            Value::Object(map) => {
                let email = match map.get("email") {
                    Some(Value::String(email)) => email.clone(),
                    _ => {
                        return Err(CourierError::InvalidAddressFormat {
                            detail: "address object is missing a string 'email' field".to_string(),
                        });
                    }
                };
                let field_string = |key: &str| match map.get(key) {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                };
                Ok(Address::Full {
                    email,
                    name: field_string("name"),
                    header_to: field_string("header_to"),
                })
            }
            other => Err(CourierError::InvalidAddressFormat {
                detail: format!("expected a string or address object, got {}", other),
            }),
        }
    }
}

impl From<&str> for Address {
    fn from(email: &str) -> Self {
        Address::Email(email.to_string())
    }
}

/// A transmission recipient: address plus optional substitution context.
///
/// The substitution data and metadata are kept as raw JSON so that callers
/// can pass through whatever the API payload carried; [`Recipient::apply`]
/// validates their shape before using them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    /// Where the message goes, and the identity used in error reports.
    pub address: Address,

    /// Per-recipient substitution data. Takes priority over metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution_data: Option<Value>,

    /// Per-recipient metadata, also visible to substitution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Recipient {
    /// Create a recipient with no substitution context.
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
            substitution_data: None,
            metadata: None,
        }
    }

    /// Attach substitution data.
    pub fn with_substitution_data(mut self, data: Value) -> Self {
        self.substitution_data = Some(data);
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Parse a recipient from a raw JSON value, surfacing shape problems as
    /// courier errors rather than generic deserialization failures.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CourierError::InvalidAddressFormat {
                detail: format!("expected a recipient object, got {}", value),
            });
        };

        let address = Address::from_value(map.get("address").unwrap_or(&Value::Null))?;

        let recipient = Self {
            address,
            substitution_data: map.get("substitution_data").cloned(),
            metadata: map.get("metadata").cloned(),
        };
        recipient.validate()?;
        Ok(recipient)
    }

    /// Check that substitution data and metadata, when present, are
    /// string-keyed mappings. Fatal per the substitution contract; reported
    /// with this recipient's address.
    pub fn validate(&self) -> Result<()> {
        self.require_object(self.substitution_data.as_ref(), "substitution_data")?;
        self.require_object(self.metadata.as_ref(), "metadata")?;
        Ok(())
    }

    fn require_object(&self, value: Option<&Value>, field: &'static str) -> Result<()> {
        match value {
            None | Some(Value::Object(_)) => Ok(()),
            Some(_) => Err(CourierError::InvalidDataShape {
                field,
                address: self.address.email().to_string(),
            }),
        }
    }

    /// Fill placeholder blocks in `content` from this recipient's context.
    ///
    /// Re-tokenizes the raw text, so this can be called standalone outside
    /// the macro pipeline. Static tokens pass through; each macro block is
    /// stripped of its delimiters and trimmed to obtain a key, which is
    /// looked up in substitution data first and metadata second. Only string
    /// values replace the block; everything else leaves the original text.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The content with resolvable placeholders filled.
    /// * `Err(CourierError::MismatchedBrace)` - The content does not
    ///   tokenize.
    /// * `Err(CourierError::InvalidDataShape)` - Substitution data or
    ///   metadata is not a string-keyed mapping.
    pub fn apply(&self, content: &str) -> Result<String> {
        self.validate()?;

        let tokens = tokenize(content)?;

        // A lone token is either the whole input as static text or a single
        // unresolvable-or-resolvable block; skip reassembly when nothing
        // would change.
        if let [Token::Static(_)] = tokens.as_slice() {
            return Ok(content.to_string());
        }

        let mut result = String::with_capacity(content.len());
        for token in &tokens {
            match token {
                Token::Static(text) => result.push_str(text),
                Token::Macro(text) => match self.lookup(token.macro_body().unwrap_or_default()) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(text),
                },
            }
        }

        Ok(result)
    }

    /// Resolve a key to its string value, substitution data first.
    ///
    /// Presence decides which map wins: a key found in substitution data
    /// shadows the same key in metadata even when its value is non-string.
    /// Returns `None` for missing keys and for keys mapped to non-string
    /// values; both leave the placeholder as written.
    fn lookup(&self, key: &str) -> Option<&str> {
        let value = lookup_value(self.substitution_data.as_ref(), key)
            .or_else(|| lookup_value(self.metadata.as_ref(), key))?;
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

fn lookup_value<'a>(map: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    map?.get(key)
}
