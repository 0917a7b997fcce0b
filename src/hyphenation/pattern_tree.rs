//! Liang-style hyphenation patterns.
//!
//! Patterns are TeX-style strings such as `.ach4` or `4b1l`: letters with
//! interletter digits. The letters form the lookup key and the digits the
//! break weights; an odd weight allows a break. Weights are packed two per
//! byte (each stored plus one, a zero nibble ending the run) in a shared
//! [`ByteVector`], and identical weight runs are stored once.

use crate::collections::OrderedTree;
use crate::config::PdfConfig;
use crate::error::{Error, Result};
use crate::hyphenation::vectors::{ByteVector, CharVector};
use crate::hyphenation::Hyphenation;

const WORD_EDGE: char = '.';

/// Pattern and exception store.
#[derive(Debug, Clone)]
pub struct HyphenationTree {
    /// Pattern letters → offset of the packed weights.
    patterns: OrderedTree<String, usize>,
    /// Distinct weight runs → offset, for sharing.
    weight_index: OrderedTree<Vec<u8>, usize>,
    weights: ByteVector,
    exceptions: OrderedTree<String, Vec<usize>>,
    longest_pattern: usize,
}

impl Default for HyphenationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HyphenationTree {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            patterns: OrderedTree::new(),
            weight_index: OrderedTree::new(),
            weights: ByteVector::with_block_size(512),
            exceptions: OrderedTree::new(),
            longest_pattern: 0,
        }
    }

    /// Load a TeX hyphenation file body.
    ///
    /// Reads `\patterns{...}` and `\hyphenation{...}` groups; `%` starts a
    /// comment. Storage is trimmed once loading is done.
    pub fn from_tex(source: &str) -> Result<Self> {
        let mut tree = Self::new();
        tree.load_tex(source)?;
        tree.trim_to_size();
        log::debug!(
            "Loaded {} hyphenation patterns and {} exceptions",
            tree.pattern_count(),
            tree.exception_count()
        );
        Ok(tree)
    }

    fn load_tex(&mut self, source: &str) -> Result<()> {
        #[derive(PartialEq)]
        enum Section {
            None,
            Patterns,
            Exceptions,
        }

        let mut section = Section::None;
        for line in source.lines() {
            let line = line.split('%').next().unwrap_or("");
            for token in line.split_whitespace() {
                let mut token = token;
                if let Some(rest) = token.strip_prefix("\\patterns{") {
                    section = Section::Patterns;
                    token = rest;
                } else if let Some(rest) = token.strip_prefix("\\hyphenation{") {
                    section = Section::Exceptions;
                    token = rest;
                }
                let closes = token.ends_with('}');
                let token = token.trim_end_matches('}');
                if !token.is_empty() {
                    match section {
                        Section::Patterns => self.add_pattern(token)?,
                        Section::Exceptions => self.add_exception(token)?,
                        Section::None => {
                            return Err(Error::Hyphenation(format!(
                                "token {token:?} outside a pattern or exception group"
                            )))
                        },
                    }
                }
                if closes {
                    section = Section::None;
                }
            }
        }
        Ok(())
    }

    /// Add one pattern such as `hy3ph`.
    pub fn add_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut letters = String::new();
        let mut levels = Vec::new();
        let mut pending = 0u8;
        for c in pattern.chars() {
            if let Some(d) = c.to_digit(10) {
                pending = d as u8;
            } else {
                levels.push(pending);
                pending = 0;
                letters.extend(c.to_lowercase());
            }
        }
        levels.push(pending);
        if letters.is_empty() {
            return Err(Error::Hyphenation(format!("pattern {pattern:?} has no letters")));
        }

        let offset = self.store_weights(&levels);
        self.longest_pattern = self.longest_pattern.max(letters.chars().count());
        self.patterns.set(letters, offset);
        Ok(())
    }

    /// Add an explicit exception such as `ta-ble`.
    pub fn add_exception(&mut self, marked: &str) -> Result<()> {
        let mut word = String::new();
        let mut points = Vec::new();
        let mut count = 0;
        for c in marked.chars() {
            if c == '-' {
                points.push(count);
            } else {
                word.extend(c.to_lowercase());
                count += 1;
            }
        }
        // Validates ordering and range.
        Hyphenation::new(word.clone(), points.clone())?;
        self.exceptions.set(word, points);
        Ok(())
    }

    fn store_weights(&mut self, levels: &[u8]) -> usize {
        if let Some(&offset) = self.weight_index.get(&levels.to_vec()) {
            return offset;
        }
        let packed_len = levels.len() / 2 + 1;
        let offset = self.weights.alloc(packed_len);
        for (i, &level) in levels.iter().enumerate() {
            let nibble = (level + 1) & 0x0f;
            let at = offset + i / 2;
            if i % 2 == 0 {
                self.weights[at] = nibble << 4;
            } else {
                self.weights[at] |= nibble;
            }
        }
        // An even run ends with a full zero byte; an odd one in the low nibble.
        if levels.len() % 2 == 0 {
            self.weights[offset + levels.len() / 2] = 0;
        }
        self.weight_index.set(levels.to_vec(), offset);
        offset
    }

    fn unpack_weights(&self, offset: usize) -> Vec<u8> {
        let mut levels = Vec::new();
        let mut at = offset;
        while let Some(byte) = self.weights.get(at) {
            let hi = byte >> 4;
            if hi == 0 {
                break;
            }
            levels.push(hi - 1);
            let lo = byte & 0x0f;
            if lo == 0 {
                break;
            }
            levels.push(lo - 1);
            at += 1;
        }
        levels
    }

    /// Break weights of a stored pattern key, if present.
    pub fn pattern_weights(&self, letters: &str) -> Option<Vec<u8>> {
        self.patterns
            .get(&letters.to_string())
            .map(|&offset| self.unpack_weights(offset))
    }

    /// Number of stored patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of stored exceptions.
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Release unused weight storage.
    pub fn trim_to_size(&mut self) {
        self.weights.trim_to_size();
    }

    /// Hyphenate with the minimum fragment lengths from `config`.
    pub fn hyphenate_with(&self, word: &str, config: &PdfConfig) -> Option<Hyphenation> {
        self.hyphenate(word, config.hyphenation_left_min, config.hyphenation_right_min)
    }

    /// Find the break points of `word`.
    ///
    /// `left_min` and `right_min` are the shortest fragments allowed before
    /// the first and after the last break. Returns `None` when the word
    /// cannot be broken.
    pub fn hyphenate(&self, word: &str, left_min: usize, right_min: usize) -> Option<Hyphenation> {
        let left_min = left_min.max(1);
        let right_min = right_min.max(1);
        let lower: String = word.chars().flat_map(char::to_lowercase).collect();
        let len = lower.chars().count();
        if len != word.chars().count() || len < left_min + right_min {
            return None;
        }

        let points: Vec<usize> = match self.exceptions.get(&lower) {
            Some(points) => points
                .iter()
                .copied()
                .filter(|&p| p >= left_min && p + right_min <= len)
                .collect(),
            None => self.pattern_points(&lower, len, left_min, right_min),
        };

        if points.is_empty() {
            return None;
        }
        Hyphenation::new(word, points).ok()
    }

    fn pattern_points(&self, lower: &str, len: usize, left_min: usize, right_min: usize) -> Vec<usize> {
        // ".word."
        let mut buf = CharVector::with_block_size(len + 2);
        buf.push(WORD_EDGE);
        for c in lower.chars() {
            buf.push(c);
        }
        buf.push(WORD_EDGE);
        let text = buf.as_slice();

        let mut levels = vec![0u8; text.len() + 1];
        let mut key = String::with_capacity(self.longest_pattern * 4);
        for start in 0..text.len() {
            key.clear();
            let end_limit = (start + self.longest_pattern).min(text.len());
            for &c in &text[start..end_limit] {
                key.push(c);
                if let Some(&offset) = self.patterns.get(&key) {
                    for (k, &w) in self.unpack_weights(offset).iter().enumerate() {
                        let slot = &mut levels[start + k];
                        if w > *slot {
                            *slot = w;
                        }
                    }
                }
            }
        }

        // levels[i] sits before text[i]; text[0] is the leading edge marker,
        // so a break before word character p is levels[p + 1].
        (left_min..=len - right_min)
            .filter(|&p| levels[p + 1] % 2 == 1)
            .collect()
    }
}
