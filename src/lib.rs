//! courier - an email-sending API client library with a recipient-aware
//! macro/template engine.
//!
//! The crate's core is the two-phase content expansion pipeline:
//!
//! 1. **Tokenizer** ([`template`]) - splits raw content into static text and
//!    `{{ ... }}` macro blocks, tolerating arbitrary nesting of inner braces.
//! 2. **Expander** ([`Client::apply_macros`]) - dispatches blocks to
//!    user-registered macros, substituting per-recipient data into macro
//!    parameters first, and leaves anything unresolved exactly as written.
//!
//! # Example
//!
//! ```
//! use courier::{Client, ClientConfig, Macro, Recipient};
//! use serde_json::json;
//!
//! let client = Client::new(ClientConfig::new("my-api-key"));
//! client.register_macro(Macro::new("ext_upper", |s: &str| s.to_uppercase()))?;
//!
//! let recipient = Recipient::new("user@example.com")
//!     .with_metadata(json!({"abc": "def"}));
//!
//! let out = client.apply_macros("{{ ext_upper {{abc}} }}", Some(&recipient))?;
//! assert_eq!(out, "DEF");
//! # Ok::<(), courier::CourierError>(())
//! ```
//!
//! Unknown macros and missing substitution keys are never errors: the
//! placeholder text ships verbatim rather than blocking a send.

pub mod client;
pub mod config;
pub mod error;
pub mod macros;
pub mod recipient;
pub mod template;
pub mod transmission;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{CourierError, Result};
pub use macros::{Macro, MacroFn, MacroRegistry};
pub use recipient::{Address, Recipient};
pub use template::{tokenize, Token};
pub use transmission::{RenderedMessage, Transmission, TransmissionContent};
