//! Subset bookkeeping for glyph-addressed fonts.
//!
//! Collects the glyphs a document showed, names the subset with the
//! six-letter tag prefix (`ABCDEF+FontName`) and produces the ToUnicode
//! CMap mapping those glyph ids back to text.

use crate::collections::OrderedTree;
use crate::fonts::base_font::UsedGlyph;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::hash::{Hash, Hasher};

/// Used glyphs of one font in one document.
#[derive(Debug, Clone, Default)]
pub struct FontSubsetter {
    /// Glyph id → code point.
    used_chars: BTreeMap<u16, u32>,
    used_glyphs: BTreeSet<u16>,
}

impl FontSubsetter {
    /// Empty subsetter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subsetter over a glyph usage table.
    pub fn from_glyphs(glyphs: &OrderedTree<u32, UsedGlyph>) -> Self {
        let mut subsetter = Self::new();
        for (_, used) in glyphs {
            if let Ok(gid) = u16::try_from(used.glyph) {
                subsetter.use_glyph(gid, used.unicode);
            }
        }
        subsetter
    }

    /// Record a glyph and the code point it stands for.
    pub fn use_glyph(&mut self, glyph_id: u16, codepoint: u32) {
        self.used_chars.entry(glyph_id).or_insert(codepoint);
        self.used_glyphs.insert(glyph_id);
    }

    /// Used glyph ids.
    pub fn used_glyphs(&self) -> &BTreeSet<u16> {
        &self.used_glyphs
    }

    /// Number of used glyphs.
    pub fn glyph_count(&self) -> usize {
        self.used_glyphs.len()
    }

    /// Whether no glyph was recorded.
    pub fn is_empty(&self) -> bool {
        self.used_glyphs.is_empty()
    }

    /// Six uppercase letters derived from the glyph set; equal sets give
    /// equal tags.
    pub fn subset_tag(&self) -> String {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for glyph in &self.used_glyphs {
            glyph.hash(&mut hasher);
        }
        let mut h = hasher.finish();
        let mut tag = String::with_capacity(6);
        for _ in 0..6 {
            tag.push((b'A' + (h % 26) as u8) as char);
            h /= 26;
        }
        tag
    }

    /// `TAG+base_name`.
    pub fn subset_font_name(&self, base_name: &str) -> String {
        format!("{}+{}", self.subset_tag(), base_name)
    }

    /// ToUnicode CMap for the recorded glyphs (glyph ids used as CIDs).
    pub fn to_unicode_cmap(&self) -> String {
        let mut cmap = String::new();
        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

        let mappings: Vec<(u16, u32)> = self.used_chars.iter().map(|(&g, &u)| (g, u)).collect();
        // At most 100 entries per section.
        for chunk in mappings.chunks(100) {
            let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
            for &(gid, unicode) in chunk {
                let _ = writeln!(cmap, "<{:04X}> <{}>", gid, utf16_hex(unicode));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\nend\n");
        cmap
    }
}

fn utf16_hex(unicode: u32) -> String {
    match char::from_u32(unicode) {
        Some(c) => {
            let mut units = [0u16; 2];
            c.encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect()
        },
        None => "FFFD".to_string(),
    }
}
