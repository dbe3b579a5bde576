//! Transmission payload types and per-recipient content rendering.
//!
//! A transmission pairs message content (subject, optional HTML and text
//! bodies) with a list of recipients. [`Transmission::render`] produces the
//! per-recipient messages the send pathway would serialize and POST to the
//! remote API; the POST itself is outside this crate.
//!
//! Rendering is the engine's real call site: each content field goes through
//! client-wide macro expansion (with the recipient's context available to
//! macro parameters) and then a standalone recipient substitution pass, so
//! recipient-only placeholders outside any macro resolve too.

use crate::client::Client;
use crate::error::Result;
use crate::recipient::Recipient;
use serde::{Deserialize, Serialize};

/// Message content shared by every recipient of a transmission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransmissionContent {
    /// The subject line.
    pub subject: String,

    /// HTML body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Plain-text body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A transmission: shared content plus its recipients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transmission {
    /// Content template applied to every recipient.
    pub content: TransmissionContent,

    /// The recipients, each with their own substitution context.
    pub recipients: Vec<Recipient>,
}

/// Content fully rendered for one recipient, ready for payload assembly.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMessage {
    /// The recipient's email address.
    pub address: String,

    /// Rendered subject line.
    pub subject: String,

    /// Rendered HTML body, if the transmission had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Rendered text body, if the transmission had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Transmission {
    /// Create a transmission from content and recipients.
    pub fn new(content: TransmissionContent, recipients: Vec<Recipient>) -> Self {
        Self {
            content,
            recipients,
        }
    }

    /// Render the content for every recipient through the client's macros.
    ///
    /// Fails on the first recipient whose context is malformed or whose
    /// rendered content does not tokenize; the error names that recipient's
    /// address where applicable and no partial result is returned.
    pub fn render(&self, client: &Client) -> Result<Vec<RenderedMessage>> {
        self.recipients
            .iter()
            .map(|recipient| self.render_for(client, recipient))
            .collect()
    }

    fn render_for(&self, client: &Client, recipient: &Recipient) -> Result<RenderedMessage> {
        recipient.validate()?;

        let render_field = |field: &str| -> Result<String> {
            let expanded = client.apply_macros(field, Some(recipient))?;
            recipient.apply(&expanded)
        };

        Ok(RenderedMessage {
            address: recipient.address.email().to_string(),
            subject: render_field(&self.content.subject)?,
            html: self.content.html.as_deref().map(&render_field).transpose()?,
            text: self.content.text.as_deref().map(&render_field).transpose()?,
        })
    }
}
