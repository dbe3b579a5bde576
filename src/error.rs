//! Error types for the courier client library.
//!
//! Uses thiserror for derive macros. Note that an unknown macro name or a
//! missing substitution key is *not* an error anywhere in this crate: both
//! leave the placeholder text untouched so that a send degrades to literal
//! text instead of failing.

use thiserror::Error;

/// Main error type for courier operations.
#[derive(Error, Debug)]
pub enum CourierError {
    /// The tokenizer found an opening `{{` with no balanced closing sequence.
    ///
    /// Carries the offending substring (from the opening delimiter to the end
    /// of input). The call that triggered it returns no partial output.
    #[error("mismatched braces in template content: '{snippet}'")]
    MismatchedBrace {
        /// The unterminated span, starting at the opening `{{`.
        snippet: String,
    },

    /// A macro was registered with a name that does not match `^\w+$`.
    ///
    /// The registry is left unchanged.
    #[error("invalid macro name: '{name}' (names must match ^\\w+$)")]
    InvalidMacroName {
        /// The rejected macro name.
        name: String,
    },

    /// A recipient's address field is neither a plain string nor a
    /// recognized address object.
    #[error("invalid recipient address format: {detail}")]
    InvalidAddressFormat {
        /// Description of the unrecognized shape.
        detail: String,
    },

    /// A recipient's substitution data or metadata is not a string-keyed
    /// mapping. Reported with the recipient's address for traceability.
    #[error("invalid {field} for recipient '{address}': expected a string-keyed mapping")]
    InvalidDataShape {
        /// Which field was malformed ("substitution_data" or "metadata").
        field: &'static str,
        /// The recipient's address, for diagnostics.
        address: String,
    },

    /// Client configuration could not be loaded or failed validation.
    #[error("{0}")]
    Config(String),
}

/// Result type alias for courier operations.
pub type Result<T> = std::result::Result<T, CourierError>;
