//! Per-document record of how a font is used.
//!
//! Every font registered with a document gets one [`FontDetails`]. Text
//! shown with the font passes through [`FontDetails::convert_to_bytes`],
//! which records the glyphs involved; when the document is finished,
//! [`FontDetails::write_font`] hands that record to the font so only the
//! used part is written.

use crate::collections::OrderedTree;
use crate::error::{Error, Result};
use crate::fonts::base_font::{BaseFont, FontType, FontUsage, UsedGlyph};
use crate::fonts::encoding::{convert_to_bytes, TextEncoding};
use crate::object::ObjectRef;
use crate::writer::ObjectSink;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Usage record, shaped by the font class.
#[derive(Debug, Clone)]
enum GlyphUsage {
    /// Type 1 and TrueType: one flag per byte code.
    SingleByte(Box<[bool; 256]>),
    /// CJK: used CIDs.
    Cjk(BTreeSet<u32>),
    /// Unicode TrueType: glyph id → glyph entry.
    UnicodeGlyphs {
        glyphs: OrderedTree<u32, UsedGlyph>,
        symbolic: bool,
    },
    /// Type 3 and document fonts.
    Untracked,
}

/// Font usage tracker and dictionary writer for one document.
#[derive(Debug)]
pub struct FontDetails {
    font_name: String,
    font_ref: ObjectRef,
    base_font: Arc<dyn BaseFont>,
    subset: bool,
    usage: GlyphUsage,
    written: bool,
}

impl FontDetails {
    /// Tracker for `base_font`, shown as resource `font_name` and written
    /// under `font_ref`. Subsetting is on.
    pub fn new(font_name: impl Into<String>, font_ref: ObjectRef, base_font: Arc<dyn BaseFont>) -> Self {
        let usage = match base_font.font_type() {
            FontType::Type1 | FontType::TrueType => GlyphUsage::SingleByte(Box::new([false; 256])),
            FontType::Cjk => GlyphUsage::Cjk(BTreeSet::new()),
            FontType::TrueTypeUnicode => GlyphUsage::UnicodeGlyphs {
                glyphs: OrderedTree::new(),
                symbolic: base_font.is_font_specific(),
            },
            FontType::Type3 | FontType::Document => GlyphUsage::Untracked,
        };
        Self {
            font_name: font_name.into(),
            font_ref,
            base_font,
            subset: true,
            usage,
            written: false,
        }
    }

    /// Resource name, e.g. `F1`.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Reference the font dictionary is written under.
    pub fn indirect_reference(&self) -> ObjectRef {
        self.font_ref
    }

    /// The font.
    pub fn base_font(&self) -> &Arc<dyn BaseFont> {
        &self.base_font
    }

    /// Whether unused glyphs are left out of the written font.
    pub fn subset(&self) -> bool {
        self.subset
    }

    /// Include only used glyphs (`true`) or the whole font.
    pub fn set_subset(&mut self, subset: bool) {
        self.subset = subset;
    }

    /// Whether [`write_font`](Self::write_font) already ran.
    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Encode `text` for a content stream and record the glyphs it uses.
    ///
    /// Unicode TrueType fonts produce two-byte glyph ids; characters the
    /// font has no glyph for are left out.
    pub fn convert_to_bytes(&mut self, text: &str) -> Vec<u8> {
        let font = &self.base_font;
        match &mut self.usage {
            GlyphUsage::Untracked => font.convert_to_bytes(text),
            GlyphUsage::SingleByte(used) => {
                let bytes = font.convert_to_bytes(text);
                for &b in &bytes {
                    used[b as usize] = true;
                }
                bytes
            },
            GlyphUsage::Cjk(cids) => {
                for ch in text.chars() {
                    cids.insert(font.cid_code(ch));
                }
                font.convert_to_bytes(text)
            },
            GlyphUsage::UnicodeGlyphs { glyphs, symbolic } => {
                let mut shown: Vec<u16> = Vec::with_capacity(text.len());
                if *symbolic {
                    for b in convert_to_bytes(text, TextEncoding::SymbolTT) {
                        let Some(metric) = font.metrics_tt(b as u32) else {
                            continue;
                        };
                        glyphs.set(
                            metric.glyph,
                            UsedGlyph {
                                glyph: metric.glyph,
                                width: metric.width,
                                unicode: font.unicode_differences(b),
                            },
                        );
                        shown.push(metric.glyph as u16);
                    }
                } else {
                    for ch in text.chars() {
                        let code = ch as u32;
                        let Some(metric) = font.metrics_tt(code) else {
                            log::trace!("No glyph for U+{:04X} in {}", code, font.postscript_name());
                            continue;
                        };
                        if !glyphs.contains_key(&metric.glyph) {
                            glyphs.set(
                                metric.glyph,
                                UsedGlyph {
                                    glyph: metric.glyph,
                                    width: metric.width,
                                    unicode: code,
                                },
                            );
                        }
                        shown.push(metric.glyph as u16);
                    }
                }
                shown.iter().flat_map(|g| g.to_be_bytes()).collect()
            },
        }
    }

    /// First and last used byte code; `(255, 255)` when nothing was used
    /// or the font is not single byte.
    pub fn used_range(&self) -> (u8, u8) {
        let GlyphUsage::SingleByte(used) = &self.usage else {
            return (255, 255);
        };
        match (used.iter().position(|&u| u), used.iter().rposition(|&u| u)) {
            (Some(first), Some(last)) => (first as u8, last as u8),
            _ => (255, 255),
        }
    }

    /// Used CIDs of a CJK font.
    pub fn used_cids(&self) -> Option<&BTreeSet<u32>> {
        match &self.usage {
            GlyphUsage::Cjk(cids) => Some(cids),
            _ => None,
        }
    }

    /// Used glyphs of a Unicode TrueType font.
    pub fn used_glyphs(&self) -> Option<&OrderedTree<u32, UsedGlyph>> {
        match &self.usage {
            GlyphUsage::UnicodeGlyphs { glyphs, .. } => Some(glyphs),
            _ => None,
        }
    }

    /// Write the font dictionary. Runs once per document; a second call
    /// fails with [`Error::InvalidState`].
    pub fn write_font(&mut self, sink: &mut dyn ObjectSink) -> Result<()> {
        if self.written {
            return Err(Error::InvalidState(format!("font {} already written", self.font_name)));
        }
        let usage = match &self.usage {
            GlyphUsage::Untracked => FontUsage::None,
            GlyphUsage::SingleByte(used) => {
                let (first_char, last_char) = self.used_range();
                FontUsage::SingleByte {
                    first_char,
                    last_char,
                    used: &**used,
                    subset: self.subset,
                }
            },
            GlyphUsage::Cjk(cids) => FontUsage::Cjk { cids },
            GlyphUsage::UnicodeGlyphs { glyphs, .. } => FontUsage::UnicodeGlyphs {
                glyphs,
                subset: self.subset,
            },
        };
        log::debug!(
            "Writing font {} ({}) as {}",
            self.font_name,
            self.base_font.postscript_name(),
            self.font_ref
        );
        self.base_font.write_font(sink, self.font_ref, usage)?;
        self.written = true;
        Ok(())
    }
}
