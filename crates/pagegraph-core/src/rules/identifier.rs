//! Identifier grammar
//!
//! Entity ids, relationship type names and constraint ids share one
//! grammar: 1 to 64 characters drawn from `a-z`, `0-9` and `_`.

use crate::errors::{PageGraphError, Result};

/// Maximum identifier length in bytes
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Check an identifier against the grammar
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_IDENTIFIER_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Validate the identifier held by `field`
///
/// # Errors
///
/// Returns `MalformedOperation` naming the field when the value breaks the
/// grammar.
pub fn check_identifier(field: &str, id: &str) -> Result<()> {
    if is_valid_identifier(id) {
        return Ok(());
    }

    let reason = if id.is_empty() {
        format!("'{}' must not be empty", field)
    } else if id.len() > MAX_IDENTIFIER_LEN {
        format!(
            "'{}' exceeds {} characters ({} given)",
            field,
            MAX_IDENTIFIER_LEN,
            id.len()
        )
    } else {
        format!(
            "'{}' value '{}' must use only lowercase letters, digits and underscores",
            field, id
        )
    };

    Err(PageGraphError::MalformedOperation { reason })
}
