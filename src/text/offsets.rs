//! Offset conversion between index spaces
//!
//! Entities come out of the extractor with UTF-16 code-unit offsets. Some
//! consumers count Unicode code points instead, where a character outside
//! the Basic Multilingual Plane is one position rather than two.
//!
//! # Conversion rules
//!
//! The text is walked once. A high surrogate immediately followed by a low
//! surrogate advances the UTF-16 index by two and the code-point index by
//! one; every other code unit, including an unpaired surrogate, advances
//! both by one. An offset that points between the halves of a pair has no
//! code-point equivalent and is rounded down to the start of the pair.
//! Offsets past the end of the text keep their distance from the end.
//!
//! `&str` cannot hold unpaired surrogates, so the `*_units` variants accept
//! raw UTF-16 for callers holding text that did not come from Rust.

use super::entity::Entity;

// ============================================================================
// Offset Table
// ============================================================================

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Precomputed UTF-16 <-> code-point offset mapping for one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    /// Code-point offset for every UTF-16 offset `0..=len_utf16`
    utf16_to_cp: Vec<usize>,
    /// UTF-16 offset for every code-point offset `0..=len_code_points`
    cp_to_utf16: Vec<usize>,
}

impl OffsetTable {
    /// Build the table from a Rust string
    pub fn new(text: &str) -> Self {
        let mut utf16_to_cp = Vec::with_capacity(text.len() + 1);
        let mut cp_to_utf16 = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;

        for (cp, ch) in text.chars().enumerate() {
            utf16_to_cp.push(cp);
            cp_to_utf16.push(utf16);
            if ch.len_utf16() == 2 {
                utf16_to_cp.push(cp);
            }
            utf16 += ch.len_utf16();
        }

        utf16_to_cp.push(cp_to_utf16.len());
        cp_to_utf16.push(utf16);

        Self {
            utf16_to_cp,
            cp_to_utf16,
        }
    }

    /// Build the table from raw UTF-16, which may hold unpaired surrogates
    pub fn from_units(units: &[u16]) -> Self {
        let mut utf16_to_cp = Vec::with_capacity(units.len() + 1);
        let mut cp_to_utf16 = Vec::with_capacity(units.len() + 1);
        let mut i = 0;
        let mut cp = 0;

        while i < units.len() {
            utf16_to_cp.push(cp);
            cp_to_utf16.push(i);

            let paired = is_high_surrogate(units[i])
                && units.get(i + 1).is_some_and(|next| is_low_surrogate(*next));
            if paired {
                utf16_to_cp.push(cp);
                i += 2;
            } else {
                i += 1;
            }
            cp += 1;
        }

        utf16_to_cp.push(cp);
        cp_to_utf16.push(i);

        Self {
            utf16_to_cp,
            cp_to_utf16,
        }
    }

    /// Length of the text in UTF-16 code units
    #[inline]
    pub fn len_utf16(&self) -> usize {
        self.utf16_to_cp.len() - 1
    }

    /// Length of the text in code points
    #[inline]
    pub fn len_code_points(&self) -> usize {
        self.cp_to_utf16.len() - 1
    }

    /// Convert one UTF-16 offset to a code-point offset
    pub fn utf16_to_code_point(&self, offset: usize) -> usize {
        lookup(&self.utf16_to_cp, offset)
    }

    /// Convert one code-point offset to a UTF-16 offset
    pub fn code_point_to_utf16(&self, offset: usize) -> usize {
        lookup(&self.cp_to_utf16, offset)
    }

    /// Rewrite entity offsets from UTF-16 to code-point space
    pub fn entities_to_code_points(&self, entities: &mut [Entity]) {
        for entity in entities.iter_mut() {
            entity.start = self.utf16_to_code_point(entity.start);
            entity.end = self.utf16_to_code_point(entity.end);
        }
    }

    /// Rewrite entity offsets from code-point to UTF-16 space
    pub fn entities_to_utf16(&self, entities: &mut [Entity]) {
        for entity in entities.iter_mut() {
            entity.start = self.code_point_to_utf16(entity.start);
            entity.end = self.code_point_to_utf16(entity.end);
        }
    }
}

#[inline]
fn lookup(table: &[usize], offset: usize) -> usize {
    match table.get(offset) {
        Some(mapped) => *mapped,
        None => {
            // Tables always hold the end-of-text entry
            let last = table.len() - 1;
            table[last] + (offset - last)
        }
    }
}

// ============================================================================
// Entity Conversion
// ============================================================================

/// Convert entity offsets from UTF-16 code units to code points, in place
pub fn to_code_point_space(text: &str, entities: &mut [Entity]) {
    if text.is_ascii() || entities.is_empty() {
        return;
    }
    OffsetTable::new(text).entities_to_code_points(entities);
}

/// Convert entity offsets from code points to UTF-16 code units, in place
pub fn to_utf16_space(text: &str, entities: &mut [Entity]) {
    if text.is_ascii() || entities.is_empty() {
        return;
    }
    OffsetTable::new(text).entities_to_utf16(entities);
}

/// [`to_code_point_space`] over raw UTF-16
pub fn units_to_code_point_space(units: &[u16], entities: &mut [Entity]) {
    if entities.is_empty() {
        return;
    }
    OffsetTable::from_units(units).entities_to_code_points(entities);
}

/// [`to_utf16_space`] over raw UTF-16
pub fn units_to_utf16_space(units: &[u16], entities: &mut [Entity]) {
    if entities.is_empty() {
        return;
    }
    OffsetTable::from_units(units).entities_to_utf16(entities);
}

// ============================================================================
// Byte Index
// ============================================================================

/// Byte <-> UTF-16 offset mapping used to move between regex matches and
/// entity offsets
#[derive(Debug, Clone)]
pub(crate) struct Utf16Index {
    /// `(byte offset, utf16 offset)` of every char start, plus the end
    /// of the text. Empty when the text is ASCII and both spaces agree.
    boundaries: Vec<(usize, usize)>,
    len: usize,
}

impl Utf16Index {
    pub(crate) fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                boundaries: Vec::new(),
                len: text.len(),
            };
        }

        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;
        for (byte, ch) in text.char_indices() {
            boundaries.push((byte, utf16));
            utf16 += ch.len_utf16();
        }
        boundaries.push((text.len(), utf16));

        Self {
            boundaries,
            len: text.len(),
        }
    }

    /// UTF-16 offset of a byte offset; mid-char offsets round down
    pub(crate) fn byte_to_utf16(&self, byte: usize) -> usize {
        if self.boundaries.is_empty() {
            return byte;
        }
        match self.boundaries.binary_search_by_key(&byte, |(b, _)| *b) {
            Ok(i) => self.boundaries[i].1,
            Err(0) => 0,
            Err(i) if i == self.boundaries.len() => {
                let (end_byte, end_utf16) = self.boundaries[i - 1];
                end_utf16 + (byte - end_byte)
            }
            Err(i) => self.boundaries[i - 1].1,
        }
    }

    /// Byte offset of a UTF-16 offset, clamped to the text; offsets inside
    /// a surrogate pair round down to the start of the character
    pub(crate) fn utf16_to_byte(&self, utf16: usize) -> usize {
        if self.boundaries.is_empty() {
            return utf16.min(self.len);
        }
        match self.boundaries.binary_search_by_key(&utf16, |(_, u)| *u) {
            Ok(i) => self.boundaries[i].0,
            Err(0) => 0,
            Err(i) if i == self.boundaries.len() => self.len,
            Err(i) => self.boundaries[i - 1].0,
        }
    }
}
