//! Whitespace normalization utilities.
//!
//! Uses Unicode's definition of whitespace (space, tab, CR, LF, NBSP, ...).
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \t  world  "), "hello world");
//! assert_eq!(collapse_whitespace("   \n\t   "), "");
//! ```

/// Collapses runs of whitespace to a single ASCII space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
