//! Result of hyphenating one word.

use crate::error::{Error, Result};
use std::fmt;

/// A word together with the positions where it may be broken.
///
/// Points are character offsets into the word, strictly increasing; a point
/// `p` means a hyphen may be placed between characters `p - 1` and `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyphenation {
    word: String,
    points: Vec<usize>,
}

impl Hyphenation {
    /// Build a hyphenation, checking the points against the word.
    pub fn new(word: impl Into<String>, points: Vec<usize>) -> Result<Self> {
        let word = word.into();
        let chars = word.chars().count();
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Hyphenation(format!(
                "break points for {word:?} are not strictly increasing"
            )));
        }
        if points.iter().any(|&p| p == 0 || p >= chars) {
            return Err(Error::Hyphenation(format!(
                "break point outside {word:?}"
            )));
        }
        Ok(Self { word, points })
    }

    /// Number of break points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the word has no break point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The hyphenated word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Break offsets in characters.
    pub fn hyphenation_points(&self) -> &[usize] {
        &self.points
    }

    /// Text before break `index`.
    pub fn pre_hyphen_text(&self, index: usize) -> Option<&str> {
        let at = self.byte_offset(*self.points.get(index)?);
        Some(&self.word[..at])
    }

    /// Text after break `index`.
    pub fn post_hyphen_text(&self, index: usize) -> Option<&str> {
        let at = self.byte_offset(*self.points.get(index)?);
        Some(&self.word[at..])
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.word
            .char_indices()
            .nth(chars)
            .map_or(self.word.len(), |(i, _)| i)
    }
}

impl fmt::Display for Hyphenation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut start = 0;
        for &p in &self.points {
            let end = self.byte_offset(p);
            write!(f, "{}-", &self.word[start..end])?;
            start = end;
        }
        f.write_str(&self.word[start..])
    }
}
