//! The macro-block scanner.

use super::Token;
use crate::error::{CourierError, Result};

/// Split raw template content into static text runs and macro blocks.
///
/// Scans for `{{` and matches each opening delimiter to the position where a
/// signed brace counter returns to zero, so a block's body may itself contain
/// balanced brace pairs (nested placeholders as macro arguments).
///
/// # Returns
///
/// * `Ok(Vec<Token>)` - Tokens in source order; concatenating their text
///   reproduces `input` exactly. Empty static runs are never emitted, so an
///   empty input yields an empty sequence.
/// * `Err(CourierError::MismatchedBrace)` - An opening `{{` never balances
///   before the end of input. The error carries the unterminated span.
///
/// # Examples
///
/// ```
/// use courier::template::{tokenize, Token};
///
/// let tokens = tokenize("Hello {{first_name}}!").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Static("Hello ".to_string()),
///         Token::Macro("{{first_name}}".to_string()),
///         Token::Static("!".to_string()),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            tokens.push(Token::Static(rest[..open].to_string()));
        }

        let block = &rest[open..];
        let Some(end) = balanced_block_end(block) else {
            return Err(CourierError::MismatchedBrace {
                snippet: block.to_string(),
            });
        };

        tokens.push(Token::Macro(block[..end].to_string()));
        rest = &block[end..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Static(rest.to_string()));
    }

    Ok(tokens)
}

/// Find the exclusive end offset of the macro block starting at the beginning
/// of `block` (which must start with `{{`).
///
/// Each `{` increments and each `}` decrements a nesting counter; the block
/// ends at the byte where the counter first returns to zero. Returns `None`
/// when the counter never reaches zero. Any `}` beyond that point belongs to
/// the surrounding static text and does not re-trigger matching.
fn balanced_block_end(block: &str) -> Option<usize> {
    let mut depth: i32 = 0;

    for (i, byte) in block.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
