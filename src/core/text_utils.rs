//! Text manipulation utilities for working with source identifiers.

/// Check if a character starts a new word inside a camel-case identifier.
#[inline]
fn is_big_character(c: char) -> bool {
    c.is_uppercase()
}

/// Insert a blank before every word boundary of a camel-case identifier.
///
/// Underscores become blanks. An uppercase letter starts a new word when the
/// character before it is not uppercase or is a digit, so acronyms stay
/// together. The first character behaves as if preceded by a lowercase
/// letter.
///
/// # Example
/// ```
/// use sigdoc::core::text_utils::add_blanks_to_camel_syntax;
///
/// assert_eq!(add_blanks_to_camel_syntax("findCustomerByName"), "find Customer By Name");
/// assert_eq!(add_blanks_to_camel_syntax("read_allItems"), "read all Items");
/// ```
pub fn add_blanks_to_camel_syntax(label: &str) -> String {
    let mut with_blanks = String::with_capacity(label.len() + 8);
    let mut prev = 'a';

    for c in label.chars() {
        let c = if c == '_' { ' ' } else { c };
        if is_big_character(c) && (!is_big_character(prev) || prev.is_ascii_digit()) {
            with_blanks.push(' ');
        }
        with_blanks.push(c);
        prev = c;
    }

    with_blanks
}

/// Split an identifier into its camel-case words.
///
/// Empty words (leading boundaries, doubled underscores) are dropped.
pub fn split_words(label: &str) -> Vec<String> {
    add_blanks_to_camel_syntax(label)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Extract the leading verb of an operation identifier, lower-cased.
///
/// Returns `None` if the identifier contains no word at all.
///
/// # Example
/// ```
/// use sigdoc::core::text_utils::extract_verb;
///
/// assert_eq!(extract_verb("findCustomerByName"), Some("find".to_string()));
/// assert_eq!(extract_verb("   "), None);
/// ```
pub fn extract_verb(identifier: &str) -> Option<String> {
    add_blanks_to_camel_syntax(identifier)
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
}
