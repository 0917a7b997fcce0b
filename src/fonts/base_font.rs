//! Font abstraction shared by every font program the writer can use.
//!
//! A [`BaseFont`] describes a font independently of any document: how text
//! is encoded, how wide glyphs are, and how the font dictionary looks. The
//! per-document record of which glyphs were actually used lives in
//! [`FontDetails`](crate::fonts::FontDetails) and is handed back to the font
//! as a [`FontUsage`] when the dictionary is written.

use crate::collections::OrderedTree;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use crate::writer::ObjectSink;
use bitflags::bitflags;
use std::collections::BTreeSet;
use std::fmt;

/// Font class; decides how usage is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontType {
    /// Type 1 font, single byte.
    Type1,
    /// TrueType font with a single byte encoding.
    TrueType,
    /// CJK font addressed through a predefined CMap.
    Cjk,
    /// TrueType font addressed by glyph id (Identity-H).
    TrueTypeUnicode,
    /// User-defined Type 3 font.
    Type3,
    /// Font taken over from an existing document.
    Document,
}

/// Glyph id and advance width (1/1000 em) of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetric {
    /// Glyph id.
    pub glyph: u32,
    /// Advance width.
    pub width: u32,
}

/// Entry of the glyph table kept for Unicode TrueType fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsedGlyph {
    /// Glyph id.
    pub glyph: u32,
    /// Advance width.
    pub width: u32,
    /// Code point the glyph was reached from.
    pub unicode: u32,
}

/// Glyph usage handed to [`BaseFont::write_font`].
#[derive(Debug, Clone, Copy)]
pub enum FontUsage<'a> {
    /// Nothing is tracked for this font class.
    None,
    /// Single byte fonts: used codes and the used range.
    SingleByte {
        /// First used code, 255 when nothing was used.
        first_char: u8,
        /// Last used code, 255 when nothing was used.
        last_char: u8,
        /// One flag per code.
        used: &'a [bool; 256],
        /// Strip unused glyphs.
        subset: bool,
    },
    /// CJK fonts: used CIDs.
    Cjk {
        /// CIDs in ascending order.
        cids: &'a BTreeSet<u32>,
    },
    /// Unicode TrueType fonts: glyph id to glyph entry.
    UnicodeGlyphs {
        /// Used glyphs keyed by glyph id.
        glyphs: &'a OrderedTree<u32, UsedGlyph>,
        /// Strip unused glyphs.
        subset: bool,
    },
}

bitflags! {
    /// `/Flags` of a font descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontFlags: u32 {
        /// All glyphs have the same width.
        const FIXED_PITCH = 1 << 0;
        /// Glyphs have serifs.
        const SERIF = 1 << 1;
        /// Glyphs outside the standard Latin set.
        const SYMBOLIC = 1 << 2;
        /// Cursive glyphs.
        const SCRIPT = 1 << 3;
        /// Standard Latin character set.
        const NONSYMBOLIC = 1 << 5;
        /// Slanted glyphs.
        const ITALIC = 1 << 6;
        /// No lowercase letters.
        const ALL_CAP = 1 << 16;
        /// Lowercase letters drawn as small capitals.
        const SMALL_CAP = 1 << 17;
        /// Bold glyphs at small sizes.
        const FORCE_BOLD = 1 << 18;
    }
}

/// A font program usable by the writer.
pub trait BaseFont: fmt::Debug + Send + Sync {
    /// Font class.
    fn font_type(&self) -> FontType;

    /// PostScript name without subset tag.
    fn postscript_name(&self) -> &str;

    /// Whether the font uses its own built-in encoding.
    fn is_font_specific(&self) -> bool {
        false
    }

    /// Encode `text` into the codes shown in a content stream.
    fn convert_to_bytes(&self, text: &str) -> Vec<u8>;

    /// Advance width of `ch` in 1/1000 em.
    fn char_width(&self, ch: char) -> u32;

    /// Width of `text` in points at `size`.
    fn width_point(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c)).sum();
        units as f32 * size / 1000.0
    }

    /// Glyph and width for a code point (or a byte, for symbolic fonts).
    fn metrics_tt(&self, _code: u32) -> Option<GlyphMetric> {
        None
    }

    /// CID used for `ch` by CJK fonts.
    fn cid_code(&self, ch: char) -> u32 {
        ch as u32
    }

    /// Unicode value behind a byte of a font specific encoding.
    fn unicode_differences(&self, byte: u8) -> u32 {
        byte as u32
    }

    /// Write the font dictionary under `font_ref`, plus any objects it
    /// references.
    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, usage: FontUsage<'_>) -> Result<()>;
}

/// Metrics written into a `/FontDescriptor`, in 1/1000 em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDescriptor {
    /// Ascender.
    pub ascent: i32,
    /// Descender, negative.
    pub descent: i32,
    /// Height of flat capitals.
    pub cap_height: i32,
    /// Font bounding box `[llx lly urx ury]`.
    pub bbox: [i32; 4],
    /// Slant in degrees.
    pub italic_angle: f32,
    /// Dominant vertical stem width.
    pub stem_v: i32,
    /// Descriptor flags.
    pub flags: FontFlags,
}

impl FontDescriptor {
    /// Descriptor dictionary; `font_file` is the program key and stream.
    pub fn to_object(&self, font_name: &str, font_file: Option<(&str, ObjectRef)>) -> Object {
        let mut entries = vec![
            ("Type", Object::name("FontDescriptor")),
            ("FontName", Object::name(font_name)),
            ("Flags", Object::Integer(self.flags.bits() as i64)),
            ("FontBBox", Object::Array(self.bbox.iter().map(|&v| Object::from(v)).collect())),
            ("ItalicAngle", Object::from(self.italic_angle)),
            ("Ascent", Object::from(self.ascent)),
            ("Descent", Object::from(self.descent)),
            ("CapHeight", Object::from(self.cap_height)),
            ("StemV", Object::from(self.stem_v)),
        ];
        if let Some((key, stream)) = font_file {
            entries.push((key, Object::Reference(stream)));
        }
        Object::dict(entries)
    }
}

/// `/Widths` for codes `first..=last`; with `subset`, unused codes get 0.
pub fn single_byte_widths(
    first: u8,
    last: u8,
    used: &[bool; 256],
    subset: bool,
    width: impl Fn(u8) -> u32,
) -> Vec<Object> {
    (first..=last)
        .map(|code| {
            if !subset || used[code as usize] {
                Object::Integer(width(code) as i64)
            } else {
                Object::Integer(0)
            }
        })
        .collect()
}

/// CIDFont `/W` array grouping consecutive ids: `[c [w1 w2 ..] c' [..]]`.
pub fn cid_widths_array(widths: impl IntoIterator<Item = (u32, u32)>) -> Object {
    let mut out = Vec::new();
    let mut run: Vec<Object> = Vec::new();
    let mut run_start = 0u32;
    let mut previous: Option<u32> = None;
    for (cid, width) in widths {
        match previous {
            Some(p) if p + 1 == cid => {},
            _ => {
                if !run.is_empty() {
                    out.push(Object::Integer(run_start as i64));
                    out.push(Object::Array(std::mem::take(&mut run)));
                }
                run_start = cid;
            },
        }
        run.push(Object::Integer(width as i64));
        previous = Some(cid);
    }
    if !run.is_empty() {
        out.push(Object::Integer(run_start as i64));
        out.push(Object::Array(run));
    }
    Object::Array(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_widths_subset() {
        let mut used = [false; 256];
        used[65] = true;
        used[67] = true;
        let widths = single_byte_widths(65, 67, &used, true, |_| 500);
        assert_eq!(widths, vec![Object::Integer(500), Object::Integer(0), Object::Integer(500)]);
    }

    #[test]
    fn test_single_byte_widths_full() {
        let used = [false; 256];
        let widths = single_byte_widths(1, 2, &used, false, |c| c as u32 * 10);
        assert_eq!(widths, vec![Object::Integer(10), Object::Integer(20)]);
    }

    #[test]
    fn test_cid_widths_groups_runs() {
        let w = cid_widths_array(vec![(3, 100), (4, 200), (9, 300)]);
        assert_eq!(
            w,
            Object::Array(vec![
                Object::Integer(3),
                Object::Array(vec![Object::Integer(100), Object::Integer(200)]),
                Object::Integer(9),
                Object::Array(vec![Object::Integer(300)]),
            ])
        );
    }

    #[test]
    fn test_cid_widths_empty() {
        assert_eq!(cid_widths_array(Vec::new()), Object::Array(Vec::new()));
    }

    #[test]
    fn test_descriptor_flags() {
        let descriptor = FontDescriptor {
            ascent: 718,
            descent: -207,
            cap_height: 718,
            bbox: [-166, -225, 1000, 931],
            italic_angle: 0.0,
            stem_v: 88,
            flags: FontFlags::NONSYMBOLIC | FontFlags::ITALIC,
        };
        let obj = descriptor.to_object("Test", None);
        let dict = obj.as_dict().unwrap();
        assert_eq!(dict.get("Flags"), Some(&Object::Integer(96)));
        assert!(!dict.contains_key("FontFile2"));
    }
}
