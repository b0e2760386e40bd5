//! Colour normalization for shift and template colours.
//!
//! ## Summary
//! Custom colours arrive from colour pickers in several spellings. They are
//! stored and rendered as lowercase `#rrggbb`.

use crate::error::{CoreError, CoreResult};

/// Normalize a hex colour to lowercase `#rrggbb`.
///
/// Accepts an optional leading `#` and the three-digit shorthand.
///
/// Examples:
/// - "#3B82F6" -> "#3b82f6"
/// - "fff" -> "#ffffff"
///
/// ## Errors
/// Returns `CoreError::InvalidInput` for anything that is not 3 or 6 hex digits.
pub fn normalize_hex_color(input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidInput(format!("not a hex colour: {input}")));
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => {
            return Err(CoreError::InvalidInput(format!(
                "hex colour must have 3 or 6 digits: {input}"
            )));
        }
    };

    Ok(format!("#{}", expanded.to_ascii_lowercase()))
}
