//! Post validity checks
//!
//! A post is valid when it is non-empty, contains none of the characters
//! below, and its weighted length is at most [`MAX_POST_LENGTH`].
//!
//! - U+FFFE, U+FEFF (byte order marks)
//! - U+FFFF
//! - U+202A to U+202E (bidirectional embedding and override controls)
//!
//! The weighted length counts code points after NFC normalization and
//! gives combining marks no weight. A base letter followed by any number of
//! combining accents counts once, whether or not a precomposed form exists,
//! and a character outside the Basic Multilingual Plane counts once as well.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Maximum weighted length of a valid post
pub const MAX_POST_LENGTH: usize = 140;

#[inline]
fn is_invalid_char(ch: char) -> bool {
    matches!(ch, '\u{FFFE}' | '\u{FEFF}' | '\u{FFFF}' | '\u{202A}'..='\u{202E}')
}

/// Checks posts for length and forbidden characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_length: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            max_length: MAX_POST_LENGTH,
        }
    }
}

impl Validator {
    /// Create a validator with the standard maximum length
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different maximum weighted length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// The maximum weighted length
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Weighted length of a text: code points after NFC normalization,
    /// not counting combining marks
    pub fn weighted_length(&self, text: &str) -> usize {
        if text.is_ascii() {
            return text.len();
        }
        text.nfc().filter(|&ch| !is_combining_mark(ch)).count()
    }

    /// Check whether a text is a valid post
    pub fn is_valid(&self, text: &str) -> bool {
        if text.is_empty() || text.chars().any(is_invalid_char) {
            return false;
        }
        self.weighted_length(text) <= self.max_length
    }
}
