//! Template tokenizer for macro blocks embedded in message content.
//!
//! Message content (subjects, HTML and text bodies) may contain macro blocks
//! delimited by double curly braces. This module splits a raw content string
//! into an ordered sequence of [`Token`]s: static text runs and macro blocks.
//!
//! # Syntax
//!
//! - `{{ body }}` - A macro block. The body is either a recipient
//!   substitution key or a macro invocation (`name params`).
//! - Blocks may nest: `{{ upper {{first_name}} }}` is a single block whose
//!   inner braces are balanced, allowing a placeholder as a macro argument.
//!
//! # Guarantees
//!
//! Tokenization is lossless: concatenating the text of every token, in order,
//! reproduces the input exactly. A macro token's text includes its own
//! enclosing braces and is internally brace-balanced.
//!
//! Stray closing braces that follow a balanced block are treated as ordinary
//! static text rather than an error; an opening `{{` that never balances is a
//! [`CourierError::MismatchedBrace`](crate::error::CourierError).

mod tokenizer;

#[cfg(test)]
mod tests;

pub use tokenizer::tokenize;

/// A single unit of tokenized template content.
///
/// Tokens are produced in source order and together cover every character of
/// the input with no gaps or overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal text containing no macro block.
    Static(String),
    /// A macro block, including its enclosing `{{` and `}}`.
    Macro(String),
}

impl Token {
    /// The literal source text of this token.
    pub fn text(&self) -> &str {
        match self {
            Token::Static(text) | Token::Macro(text) => text,
        }
    }

    /// Whether this token is a macro block.
    pub fn is_macro(&self) -> bool {
        matches!(self, Token::Macro(_))
    }

    /// The body of a macro block: outer delimiters stripped, surrounding
    /// whitespace trimmed. Returns `None` for static tokens.
    ///
    /// A degenerate block can close on a single `}` (the nesting counter
    /// reaches zero there), so the suffix is stripped as `}}` or, failing
    /// that, `}`.
    pub fn macro_body(&self) -> Option<&str> {
        match self {
            Token::Macro(text) => {
                let inner = text.strip_prefix("{{").unwrap_or(text);
                let inner = inner
                    .strip_suffix("}}")
                    .or_else(|| inner.strip_suffix('}'))
                    .unwrap_or(inner);
                Some(inner.trim())
            }
            Token::Static(_) => None,
        }
    }
}
