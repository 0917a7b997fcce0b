//! The fourteen standard Type 1 fonts.
//!
//! These are never embedded; viewers provide them. The dictionary carries
//! the WinAnsi encoding (optionally with `/Differences`) and, for the used
//! range, the AFM advance widths.

use crate::error::{Error, Result};
use crate::fonts::base_font::{single_byte_widths, BaseFont, FontType, FontUsage};
use crate::fonts::encoding::{convert_to_bytes, unicode_to_winansi, winansi_to_unicode, TextEncoding};
use crate::fonts::glyph_list::glyph_name_or_algorithmic;
use crate::object::{Object, ObjectRef};
use crate::writer::ObjectSink;
use std::collections::BTreeMap;

/// Standard 14 font names.
pub const STANDARD_14: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Roman",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "ZapfDingbats",
];

// Advance widths for codes 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Helvetica,
    HelveticaBold,
    Times,
    TimesBold,
    Courier,
    Symbol,
    ZapfDingbats,
}

impl Family {
    fn of(name: &str) -> Option<Self> {
        Some(match name {
            "Helvetica" | "Helvetica-Oblique" => Family::Helvetica,
            "Helvetica-Bold" | "Helvetica-BoldOblique" => Family::HelveticaBold,
            "Times-Roman" | "Times-Italic" => Family::Times,
            "Times-Bold" | "Times-BoldItalic" => Family::TimesBold,
            "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => Family::Courier,
            "Symbol" => Family::Symbol,
            "ZapfDingbats" => Family::ZapfDingbats,
            _ => return None,
        })
    }

    fn width(self, unicode: u32) -> u32 {
        let table = match self {
            Family::Helvetica => &HELVETICA,
            Family::HelveticaBold => &HELVETICA_BOLD,
            Family::Times => &TIMES_ROMAN,
            Family::TimesBold => &TIMES_BOLD,
            Family::Courier => return 600,
            Family::Symbol | Family::ZapfDingbats => {
                return match unicode {
                    0x20 if self == Family::Symbol => 250,
                    0x20 => 278,
                    _ => 500,
                };
            },
        };
        match unicode {
            0x20..=0x7E => table[(unicode - 0x20) as usize] as u32,
            _ => match self {
                Family::Helvetica | Family::HelveticaBold => 556,
                _ => 500,
            },
        }
    }

    fn is_symbolic(self) -> bool {
        matches!(self, Family::Symbol | Family::ZapfDingbats)
    }
}

/// One of the standard 14 fonts.
#[derive(Debug, Clone)]
pub struct Type1Font {
    name: String,
    family: Family,
    /// Code → character replacing the WinAnsi assignment.
    differences: BTreeMap<u8, char>,
}

impl Type1Font {
    /// Font by standard name, e.g. `"Helvetica-Bold"`.
    pub fn standard(name: &str) -> Result<Self> {
        let family = Family::of(name)
            .ok_or_else(|| Error::Font(format!("{name} is not a standard Type 1 font")))?;
        Ok(Self {
            name: name.to_string(),
            family,
            differences: BTreeMap::new(),
        })
    }

    /// Helvetica.
    pub fn helvetica() -> Self {
        Self {
            name: "Helvetica".to_string(),
            family: Family::Helvetica,
            differences: BTreeMap::new(),
        }
    }

    /// Reassign byte codes to other characters (`/Differences`).
    pub fn with_differences(mut self, differences: impl IntoIterator<Item = (u8, char)>) -> Self {
        self.differences.extend(differences);
        self
    }

    fn code_for(&self, ch: char) -> Option<u8> {
        self.differences
            .iter()
            .find(|&(_, &c)| c == ch)
            .map(|(&code, _)| code)
            .or_else(|| unicode_to_winansi(ch as u32).filter(|code| !self.differences.contains_key(code)))
    }

    fn differences_array(&self, first: u8, last: u8, used: &[bool; 256], subset: bool) -> Vec<Object> {
        let mut out = Vec::new();
        let mut previous: Option<u8> = None;
        for (&code, &ch) in self.differences.range(first..=last) {
            if subset && !used[code as usize] {
                continue;
            }
            if previous.map_or(true, |p| p + 1 != code) {
                out.push(Object::Integer(code as i64));
            }
            out.push(Object::Name(glyph_name_or_algorithmic(ch as u32)));
            previous = Some(code);
        }
        out
    }
}

impl BaseFont for Type1Font {
    fn font_type(&self) -> FontType {
        FontType::Type1
    }

    fn postscript_name(&self) -> &str {
        &self.name
    }

    fn is_font_specific(&self) -> bool {
        self.family.is_symbolic()
    }

    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        if self.family.is_symbolic() {
            return convert_to_bytes(text, TextEncoding::SymbolTT);
        }
        text.chars().filter_map(|c| self.code_for(c)).collect()
    }

    fn char_width(&self, ch: char) -> u32 {
        self.family.width(ch as u32)
    }

    fn unicode_differences(&self, byte: u8) -> u32 {
        if let Some(&ch) = self.differences.get(&byte) {
            return ch as u32;
        }
        winansi_to_unicode(byte).unwrap_or(byte as u32)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, usage: FontUsage<'_>) -> Result<()> {
        let mut entries = vec![
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name(&self.name)),
        ];

        if let FontUsage::SingleByte {
            first_char,
            last_char,
            used,
            subset,
        } = usage
        {
            if !self.family.is_symbolic() {
                let differences = self.differences_array(first_char, last_char, used, subset);
                if differences.is_empty() {
                    entries.push(("Encoding", Object::name("WinAnsiEncoding")));
                } else {
                    entries.push((
                        "Encoding",
                        Object::dict([
                            ("Type", Object::name("Encoding")),
                            ("BaseEncoding", Object::name("WinAnsiEncoding")),
                            ("Differences", Object::Array(differences)),
                        ]),
                    ));
                }
            }
            let widths = single_byte_widths(first_char, last_char, used, subset, |code| {
                self.family.width(self.unicode_differences(code))
            });
            entries.push(("FirstChar", Object::Integer(first_char as i64)));
            entries.push(("LastChar", Object::Integer(last_char as i64)));
            entries.push(("Widths", Object::Array(widths)));
        }

        log::debug!("Writing Type1 font {} as {}", self.name, font_ref);
        sink.add_object_at(font_ref, Object::dict(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ObjectCollector;

    #[test]
    fn test_standard_names() {
        for name in STANDARD_14 {
            assert!(Type1Font::standard(name).is_ok(), "{name}");
        }
        assert!(Type1Font::standard("Arial").is_err());
    }

    #[test]
    fn test_widths() {
        let font = Type1Font::helvetica();
        assert_eq!(font.char_width('A'), 667);
        assert_eq!(font.char_width(' '), 278);
        assert_eq!(font.char_width('\u{e9}'), 556);
        let courier = Type1Font::standard("Courier-Bold").unwrap();
        assert_eq!(courier.char_width('i'), 600);
        let times = Type1Font::standard("Times-Roman").unwrap();
        assert!((times.width_point("AB", 10.0) - 13.89).abs() < 1e-3);
    }

    #[test]
    fn test_winansi_conversion() {
        let font = Type1Font::helvetica();
        assert_eq!(font.convert_to_bytes("A\u{20AC}\u{4E2D}"), vec![0x41, 0x80]);
    }

    #[test]
    fn test_differences_conversion() {
        let font = Type1Font::helvetica().with_differences([(0x80, '\u{3A9}')]);
        assert_eq!(font.convert_to_bytes("\u{3A9}\u{20AC}"), vec![0x80]);
        assert_eq!(font.unicode_differences(0x80), 0x3A9);
        assert_eq!(font.unicode_differences(0x41), 0x41);
    }

    #[test]
    fn test_symbol_is_font_specific() {
        let font = Type1Font::standard("Symbol").unwrap();
        assert!(font.is_font_specific());
        assert_eq!(font.convert_to_bytes("\u{F061}"), vec![0x61]);
    }

    #[test]
    fn test_write_font_range() {
        let font = Type1Font::helvetica();
        let mut used = [false; 256];
        used[65] = true;
        used[67] = true;
        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        font.write_font(
            &mut sink,
            r,
            FontUsage::SingleByte {
                first_char: 65,
                last_char: 67,
                used: &used,
                subset: true,
            },
        )
        .unwrap();
        let dict = sink.get(r).unwrap().as_dict().unwrap();
        assert_eq!(dict.get("FirstChar"), Some(&Object::Integer(65)));
        assert_eq!(dict.get("LastChar"), Some(&Object::Integer(67)));
        assert_eq!(
            dict.get("Widths"),
            Some(&Object::Array(vec![Object::Integer(667), Object::Integer(0), Object::Integer(722)]))
        );
        assert_eq!(dict.get("Encoding"), Some(&Object::name("WinAnsiEncoding")));
    }

    #[test]
    fn test_write_font_differences() {
        let font = Type1Font::helvetica().with_differences([(0x80, '\u{3C0}'), (0x81, '\u{3B1}')]);
        let mut used = [false; 256];
        used[0x80] = true;
        used[0x81] = true;
        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        font.write_font(
            &mut sink,
            r,
            FontUsage::SingleByte {
                first_char: 0x80,
                last_char: 0x81,
                used: &used,
                subset: true,
            },
        )
        .unwrap();
        let dict = sink.get(r).unwrap().as_dict().unwrap();
        let encoding = dict.get("Encoding").unwrap().as_dict().unwrap();
        assert_eq!(
            encoding.get("Differences"),
            Some(&Object::Array(vec![
                Object::Integer(0x80),
                Object::name("pi"),
                Object::name("alpha"),
            ]))
        );
    }
}
