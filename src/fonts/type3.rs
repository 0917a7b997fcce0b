//! Fonts whose usage is not tracked: user-defined Type 3 fonts and fonts
//! taken over from another document.

use crate::error::{Error, Result};
use crate::fonts::base_font::{BaseFont, FontType, FontUsage};
use crate::fonts::encoding::{convert_to_bytes, TextEncoding};
use crate::fonts::glyph_list::glyph_name_or_algorithmic;
use crate::object::{Object, ObjectRef, PdfDictionary};
use crate::writer::ObjectSink;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Type3Glyph {
    width: u32,
    procedure: Vec<u8>,
}

/// Font with glyphs drawn by content stream procedures, in a 1000 unit
/// glyph space.
#[derive(Debug, Clone)]
pub struct Type3Font {
    name: String,
    glyphs: BTreeMap<u8, (char, Type3Glyph)>,
    bbox: [i32; 4],
}

impl Type3Font {
    /// Empty font.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            glyphs: BTreeMap::new(),
            bbox: [0, 0, 1000, 1000],
        }
    }

    /// Define the glyph for `ch`. Only single byte characters can be
    /// defined.
    pub fn define_glyph(&mut self, ch: char, width: u32, procedure: impl Into<Vec<u8>>) -> Result<()> {
        let code = u8::try_from(ch as u32)
            .map_err(|_| Error::Font(format!("Type 3 glyph {ch:?} is outside the single byte range")))?;
        self.glyphs.insert(
            code,
            (
                ch,
                Type3Glyph {
                    width,
                    procedure: procedure.into(),
                },
            ),
        );
        Ok(())
    }

    /// Glyph space bounding box.
    pub fn with_bbox(mut self, bbox: [i32; 4]) -> Self {
        self.bbox = bbox;
        self
    }
}

impl BaseFont for Type3Font {
    fn font_type(&self) -> FontType {
        FontType::Type3
    }

    fn postscript_name(&self) -> &str {
        &self.name
    }

    fn is_font_specific(&self) -> bool {
        true
    }

    /// Codes of defined glyphs; other characters are dropped.
    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        convert_to_bytes(text, TextEncoding::SymbolTT)
            .into_iter()
            .filter(|code| self.glyphs.contains_key(code))
            .collect()
    }

    fn char_width(&self, ch: char) -> u32 {
        u8::try_from(ch as u32)
            .ok()
            .and_then(|code| self.glyphs.get(&code))
            .map_or(0, |(_, glyph)| glyph.width)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, _usage: FontUsage<'_>) -> Result<()> {
        let (Some(&first), Some(&last)) = (self.glyphs.keys().next(), self.glyphs.keys().next_back()) else {
            return Err(Error::Font(format!("Type 3 font {} has no glyphs", self.name)));
        };

        let mut char_procs = PdfDictionary::new();
        let mut differences = Vec::new();
        let mut previous: Option<u8> = None;
        for (&code, (ch, glyph)) in &self.glyphs {
            let name = glyph_name_or_algorithmic(*ch as u32);
            let proc_ref = sink.add_object(Object::stream(PdfDictionary::new(), glyph.procedure.clone()))?;
            char_procs.insert(name.clone(), Object::Reference(proc_ref));
            if previous.map_or(true, |p| p + 1 != code) {
                differences.push(Object::Integer(code as i64));
            }
            differences.push(Object::Name(name));
            previous = Some(code);
        }
        let widths = (first..=last)
            .map(|code| {
                let width = self.glyphs.get(&code).map_or(0, |(_, g)| g.width);
                Object::Integer(width as i64)
            })
            .collect();

        sink.add_object_at(
            font_ref,
            Object::dict([
                ("Type", Object::name("Font")),
                ("Subtype", Object::name("Type3")),
                ("Name", Object::name(&self.name)),
                ("FontBBox", Object::Array(self.bbox.iter().map(|&v| Object::from(v)).collect())),
                (
                    "FontMatrix",
                    Object::Array(vec![
                        Object::Real(0.001),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(0.001),
                        Object::Integer(0),
                        Object::Integer(0),
                    ]),
                ),
                ("CharProcs", Object::Dictionary(char_procs)),
                (
                    "Encoding",
                    Object::dict([
                        ("Type", Object::name("Encoding")),
                        ("Differences", Object::Array(differences)),
                    ]),
                ),
                ("FirstChar", Object::Integer(first as i64)),
                ("LastChar", Object::Integer(last as i64)),
                ("Widths", Object::Array(widths)),
                ("Resources", Object::Dictionary(PdfDictionary::new())),
            ]),
        )
    }
}

/// Font whose dictionary already exists, e.g. copied from another document.
#[derive(Debug, Clone)]
pub struct DocumentFont {
    name: String,
    dictionary: PdfDictionary,
    widths: BTreeMap<u8, u32>,
    default_width: u32,
}

impl DocumentFont {
    /// Wrap an existing font dictionary. `/FirstChar` and `/Widths`, when
    /// present, provide the metrics.
    pub fn new(dictionary: PdfDictionary) -> Result<Self> {
        let name = dictionary
            .get("BaseFont")
            .and_then(Object::as_name)
            .unwrap_or("Unknown")
            .to_string();
        let mut widths = BTreeMap::new();
        if let (Some(first), Some(list)) = (dictionary.get("FirstChar"), dictionary.get("Widths")) {
            let first = first.expect_number()? as usize;
            for (i, width) in list.expect_array()?.iter().enumerate() {
                if let Ok(code) = u8::try_from(first + i) {
                    widths.insert(code, width.expect_number()? as u32);
                }
            }
        }
        Ok(Self {
            name,
            dictionary,
            widths,
            default_width: 0,
        })
    }
}

impl BaseFont for DocumentFont {
    fn font_type(&self) -> FontType {
        FontType::Document
    }

    fn postscript_name(&self) -> &str {
        &self.name
    }

    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        convert_to_bytes(text, TextEncoding::WinAnsi)
    }

    fn char_width(&self, ch: char) -> u32 {
        convert_to_bytes(ch.encode_utf8(&mut [0; 4]), TextEncoding::WinAnsi)
            .first()
            .and_then(|code| self.widths.get(code))
            .copied()
            .unwrap_or(self.default_width)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, _usage: FontUsage<'_>) -> Result<()> {
        sink.add_object_at(font_ref, Object::Dictionary(self.dictionary.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ObjectCollector;

    #[test]
    fn test_type3_write() {
        let mut font = Type3Font::new("Marks");
        font.define_glyph('a', 600, b"600 0 0 0 500 500 d1 0 0 500 500 re f".to_vec()).unwrap();
        font.define_glyph('c', 400, b"400 0 d0".to_vec()).unwrap();
        assert_eq!(font.convert_to_bytes("abc"), vec![b'a', b'c']);
        assert_eq!(font.char_width('a'), 600);

        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        font.write_font(&mut sink, r, FontUsage::None).unwrap();
        let dict = sink.get(r).unwrap().as_dict().unwrap();
        assert_eq!(
            dict.get("Widths"),
            Some(&Object::Array(vec![Object::Integer(600), Object::Integer(0), Object::Integer(400)]))
        );
        let procs = dict.get("CharProcs").unwrap().as_dict().unwrap();
        assert!(procs.contains_key("a"));
        assert!(procs.contains_key("c"));
    }

    #[test]
    fn test_type3_rejects_wide_glyph() {
        let mut font = Type3Font::new("Marks");
        assert!(font.define_glyph('\u{4E2D}', 1000, Vec::new()).is_err());
    }

    #[test]
    fn test_type3_without_glyphs() {
        let font = Type3Font::new("Empty");
        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        assert!(font.write_font(&mut sink, r, FontUsage::None).is_err());
    }

    #[test]
    fn test_document_font() {
        let dict = match Object::dict([
            ("Type", Object::name("Font")),
            ("BaseFont", Object::name("Existing")),
            ("FirstChar", Object::Integer(65)),
            ("Widths", Object::Array(vec![Object::Integer(700), Object::Integer(710)])),
        ]) {
            Object::Dictionary(d) => d,
            _ => unreachable!(),
        };
        let font = DocumentFont::new(dict.clone()).unwrap();
        assert_eq!(font.postscript_name(), "Existing");
        assert_eq!(font.char_width('B'), 710);
        assert_eq!(font.char_width('Z'), 0);

        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        font.write_font(&mut sink, r, FontUsage::None).unwrap();
        assert_eq!(sink.get(r), Some(&Object::Dictionary(dict)));
    }
}
